use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::dashboard::{Action, Dashboard, Draft, Effect, FilterChange};
use crate::models::{Category, Division, TxnType};
use crate::ui::app::{App, FormField, InputMode, PendingAction};
use crate::ui::commands;
use crate::ui::util::{cycle, scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub(crate) fn as_tui(dashboard: &mut Dashboard) -> Result<()> {
    let mut app = App::new();
    app.queue(Some(Effect::Reload));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, dashboard);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Term, app: &mut App, dashboard: &mut Dashboard) -> Result<()> {
    while app.running {
        for effect in std::mem::take(&mut app.pending_effects) {
            run_effect(terminal, app, dashboard, effect)?;
        }

        terminal.draw(|f| crate::ui::render::render(f, app, dashboard.state()))?;

        if let Event::Key(key) = event::read()? {
            if dashboard.state().notice.is_some() {
                dashboard.dispatch(Action::DismissNotice);
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            if dashboard.state().form.is_open() {
                handle_form_input(key, app, dashboard);
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, dashboard)?,
                InputMode::Command => handle_command_input(key, app, dashboard)?,
                InputMode::Confirm => handle_confirm_input(key, app, dashboard),
            }
        }
    }
    info!("Shutting down");
    Ok(())
}

/// Show the loading panel for the duration of the fetch.
fn run_effect(
    terminal: &mut Term,
    app: &mut App,
    dashboard: &mut Dashboard,
    effect: Effect,
) -> Result<()> {
    match effect {
        Effect::Reload => {
            dashboard.dispatch(Action::LoadStarted);
            terminal.draw(|f| crate::ui::render::render(f, app, dashboard.state()))?;
            dashboard.load();
            let len = dashboard.state().visible().len();
            app.clamp_selection(len);
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, dashboard: &mut Dashboard) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app, dashboard),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') | KeyCode::Home => scroll_to_top(&mut app.table_index, &mut app.table_scroll),
        KeyCode::Char('G') | KeyCode::End => {
            let len = dashboard.state().visible().len();
            scroll_to_bottom(&mut app.table_index, &mut app.table_scroll, len, app.visible_rows);
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app, dashboard);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('n') | KeyCode::Char('a') => commands::open_create(app, dashboard),
        KeyCode::Char('e') | KeyCode::Enter => {
            commands::handle_command("edit", app, dashboard)?;
        }
        KeyCode::Char('D') | KeyCode::Delete => commands::begin_delete(app, dashboard),
        KeyCode::Char('v') | KeyCode::Char('V') => {
            let delta = if key.code == KeyCode::Char('V') { -1 } else { 1 };
            let next = dashboard
                .state()
                .filters
                .division
                .cycle(Division::all(), delta);
            commands::change_filter(app, dashboard, FilterChange::Division(next));
            app.set_status(format!("Division: {next}"));
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            let delta = if key.code == KeyCode::Char('C') { -1 } else { 1 };
            let next = dashboard
                .state()
                .filters
                .category
                .cycle(Category::all(), delta);
            commands::change_filter(app, dashboard, FilterChange::Category(next));
            app.set_status(format!("Category: {next}"));
        }
        KeyCode::Char('x') => commands::handle_command("clear-filters", app, dashboard)?,
        KeyCode::Char('R') => commands::handle_command("reload", app, dashboard)?,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.set_status(""),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App, dashboard: &mut Dashboard) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, dashboard)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: KeyEvent, app: &mut App, dashboard: &mut Dashboard) {
    let confirmed = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => true,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Enter => false,
        _ => return,
    };

    if let Some(PendingAction::DeleteTransaction { id, description }) = app.pending_action.take() {
        let effect = dashboard.delete(&id, |_| confirmed);
        if !confirmed {
            app.set_status("Cancelled");
        } else if effect.is_some() {
            app.set_status(format!("Deleted: {description}"));
        }
        app.queue(effect);
    }
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
}

fn handle_form_input(key: KeyEvent, app: &mut App, dashboard: &mut Dashboard) {
    let field = app.form_field;
    match key.code {
        KeyCode::Esc => {
            dashboard.dispatch(Action::CancelForm);
            app.set_status("Cancelled");
        }
        KeyCode::Enter => {
            let editing = dashboard.state().form.is_editing();
            let effect = dashboard.submit();
            if effect.is_some() {
                app.set_status(if editing {
                    "Transaction updated"
                } else {
                    "Transaction added"
                });
            }
            app.queue(effect);
        }
        KeyCode::Tab | KeyCode::Down => app.form_field = field.next(),
        KeyCode::BackTab | KeyCode::Up => app.form_field = field.prev(),
        KeyCode::Left if !field.is_text() => edit_draft(dashboard, |d| cycle_choice(d, field, -1)),
        KeyCode::Right | KeyCode::Char(' ') if !field.is_text() => {
            edit_draft(dashboard, |d| cycle_choice(d, field, 1));
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            edit_draft(dashboard, |d| {
                if let Some(text) = text_mut(d, field) {
                    text.clear();
                }
            });
        }
        KeyCode::Backspace => edit_draft(dashboard, |d| {
            if let Some(text) = text_mut(d, field) {
                text.pop();
            }
        }),
        KeyCode::Char(c) => edit_draft(dashboard, |d| {
            if let Some(text) = text_mut(d, field) {
                text.push(c);
            }
        }),
        _ => {}
    }
}

// ── Form helpers ─────────────────────────────────────────────

fn edit_draft(dashboard: &mut Dashboard, f: impl FnOnce(&mut Draft)) {
    if let Some(draft) = dashboard.state_mut().form.draft_mut() {
        f(draft);
    }
}

fn text_mut(draft: &mut Draft, field: FormField) -> Option<&mut String> {
    match field {
        FormField::Amount => Some(&mut draft.amount),
        FormField::Date => Some(&mut draft.date),
        FormField::Description => Some(&mut draft.description),
        _ => None,
    }
}

fn cycle_choice(draft: &mut Draft, field: FormField, delta: i32) {
    match field {
        FormField::Kind => draft.kind = cycle(draft.kind, TxnType::all(), delta),
        FormField::Division => draft.division = cycle(draft.division, Division::all(), delta),
        FormField::Category => draft.category = cycle(draft.category, Category::all(), delta),
        _ => {}
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn handle_move_down(app: &mut App, dashboard: &Dashboard) {
    let len = dashboard.state().visible().len();
    scroll_down(&mut app.table_index, &mut app.table_scroll, len, app.visible_rows);
}

fn handle_move_up(app: &mut App) {
    scroll_up(&mut app.table_index, &mut app.table_scroll);
}
