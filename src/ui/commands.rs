use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, FormField, InputMode, PendingAction};
use crate::dashboard::{Action, Dashboard, Effect, FilterChange, Selector, DELETE_PROMPT};
use crate::models::{timestamp, Category, Division};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Dashboard) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit FinDash", cmd_quit, r);
    register_command!("quit", "Quit FinDash", cmd_quit, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("reload", "Fetch stats and transactions again", cmd_reload, r);
    register_command!("r", "Fetch stats and transactions again", cmd_reload, r);
    register_command!("add", "Open the new transaction form", cmd_add, r);
    register_command!("a", "Open the new transaction form", cmd_add, r);
    register_command!("new", "Open the new transaction form", cmd_add, r);
    register_command!("edit", "Edit selected transaction (or :edit <id>)", cmd_edit, r);
    register_command!("e", "Edit selected transaction", cmd_edit, r);
    register_command!("delete", "Delete selected transaction", cmd_delete, r);
    register_command!("del", "Delete selected transaction", cmd_delete, r);
    register_command!(
        "division",
        "Filter by division (e.g. :division office, :division all)",
        cmd_division,
        r
    );
    register_command!("div", "Filter by division", cmd_division, r);
    register_command!(
        "category",
        "Filter by category (e.g. :category fuel, :category all)",
        cmd_category,
        r
    );
    register_command!("cat", "Filter by category", cmd_category, r);
    register_command!(
        "from",
        "Set range start (e.g. :from 2024-01-01, :from clear)",
        cmd_from,
        r
    );
    register_command!(
        "to",
        "Set range end, inclusive (e.g. :to 2024-01-31)",
        cmd_to,
        r
    );
    register_command!("clear-filters", "Reset every filter", cmd_clear_filters, r);
    register_command!("clear", "Reset every filter", cmd_clear_filters, r);

    r
});

/// Short forms left out of the help listing.
const ALIASES: &[&str] = &["q", "h", "r", "a", "new", "e", "del", "div", "cat", "clear"];

/// `(name, description)` for every non-alias command, sorted by name.
pub(crate) fn help_entries() -> Vec<(&'static str, &'static str)> {
    let mut entries: Vec<(&str, &str)> = COMMANDS
        .iter()
        .filter(|(name, _)| !ALIASES.contains(*name))
        .map(|(&name, cmd)| (name, cmd.description))
        .collect();
    entries.sort_by_key(|(name, _)| *name);
    entries
}

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    dashboard: &mut Dashboard,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, dashboard)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Shared actions (also bound to keys) ──────────────────────

pub(crate) fn open_create(app: &mut App, dashboard: &mut Dashboard) {
    dashboard.dispatch(Action::OpenCreate {
        now: timestamp::now_minute(),
    });
    app.form_field = FormField::Kind;
}

pub(crate) fn open_edit(app: &mut App, dashboard: &mut Dashboard, id: String) {
    dashboard.dispatch(Action::OpenEdit { id: id.clone() });
    if dashboard.state().form.is_editing() {
        app.form_field = FormField::Kind;
    } else {
        app.set_status(format!("No transaction with id {id}"));
    }
}

/// Stage a delete of the selected row behind a y/N prompt.
pub(crate) fn begin_delete(app: &mut App, dashboard: &Dashboard) {
    let Some(txn) = app.selected(dashboard.state()) else {
        app.set_status("No transaction selected");
        return;
    };
    app.confirm_message = format!("{DELETE_PROMPT} \"{}\"", txn.description);
    app.pending_action = Some(PendingAction::DeleteTransaction {
        id: txn.id.clone(),
        description: txn.description.clone(),
    });
    app.input_mode = InputMode::Confirm;
}

pub(crate) fn change_filter(app: &mut App, dashboard: &mut Dashboard, change: FilterChange) {
    dashboard.dispatch(Action::FilterChanged(change));
    let len = dashboard.state().visible().len();
    app.clamp_selection(len);
}

/// `clear`, `none` or an empty argument removes a date bound.
pub(crate) fn parse_date_arg(args: &str) -> Result<Option<chrono::NaiveDate>, String> {
    let args = args.trim();
    if args.is_empty() || args.eq_ignore_ascii_case("clear") || args.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    timestamp::parse_date(args)
        .map(Some)
        .ok_or_else(|| format!("Invalid date: {args}. Use YYYY-MM-DD"))
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _dashboard: &mut Dashboard) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _dashboard: &mut Dashboard) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_reload(_args: &str, app: &mut App, _dashboard: &mut Dashboard) -> anyhow::Result<()> {
    app.queue(Some(Effect::Reload));
    app.set_status("Reloading…");
    Ok(())
}

fn cmd_add(_args: &str, app: &mut App, dashboard: &mut Dashboard) -> anyhow::Result<()> {
    open_create(app, dashboard);
    Ok(())
}

fn cmd_edit(args: &str, app: &mut App, dashboard: &mut Dashboard) -> anyhow::Result<()> {
    let id = if args.is_empty() {
        match app.selected(dashboard.state()) {
            Some(txn) => txn.id.clone(),
            None => {
                app.set_status("No transaction selected");
                return Ok(());
            }
        }
    } else {
        args.to_string()
    };
    open_edit(app, dashboard, id);
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, dashboard: &mut Dashboard) -> anyhow::Result<()> {
    begin_delete(app, dashboard);
    Ok(())
}

fn cmd_division(args: &str, app: &mut App, dashboard: &mut Dashboard) -> anyhow::Result<()> {
    let selector = if args.is_empty() {
        Some(Selector::All)
    } else {
        Selector::<Division>::parse(args)
    };
    match selector {
        Some(selector) => {
            change_filter(app, dashboard, FilterChange::Division(selector));
            app.set_status(format!("Division: {selector}"));
        }
        None => {
            let names: Vec<&str> = Division::all().iter().map(|d| d.as_str()).collect();
            app.set_status(format!(
                "Unknown division: {args}. Use all, {}",
                names.join(", ")
            ));
        }
    }
    Ok(())
}

fn cmd_category(args: &str, app: &mut App, dashboard: &mut Dashboard) -> anyhow::Result<()> {
    let selector = if args.is_empty() {
        Some(Selector::All)
    } else {
        Selector::<Category>::parse(args)
    };
    match selector {
        Some(selector) => {
            change_filter(app, dashboard, FilterChange::Category(selector));
            app.set_status(format!("Category: {selector}"));
        }
        None => {
            let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
            app.set_status(format!(
                "Unknown category: {args}. Use all, {}",
                names.join(", ")
            ));
        }
    }
    Ok(())
}

fn cmd_from(args: &str, app: &mut App, dashboard: &mut Dashboard) -> anyhow::Result<()> {
    match parse_date_arg(args) {
        Ok(date) => {
            change_filter(app, dashboard, FilterChange::StartDate(date));
            app.set_status(match date {
                Some(d) => format!("From {d}"),
                None => "Start date cleared".to_string(),
            });
        }
        Err(msg) => app.set_status(msg),
    }
    Ok(())
}

fn cmd_to(args: &str, app: &mut App, dashboard: &mut Dashboard) -> anyhow::Result<()> {
    match parse_date_arg(args) {
        Ok(date) => {
            change_filter(app, dashboard, FilterChange::EndDate(date));
            app.set_status(match date {
                Some(d) => format!("To {d}"),
                None => "End date cleared".to_string(),
            });
        }
        Err(msg) => app.set_status(msg),
    }
    Ok(())
}

fn cmd_clear_filters(
    _args: &str,
    app: &mut App,
    dashboard: &mut Dashboard,
) -> anyhow::Result<()> {
    change_filter(app, dashboard, FilterChange::Clear);
    app.set_status("Filters cleared");
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
