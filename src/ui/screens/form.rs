use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::dashboard::{Draft, FormState};
use crate::ui::app::{App, FormField};
use crate::ui::theme;
use crate::ui::util::CURRENCY;

fn field_value(draft: &Draft, field: FormField) -> String {
    match field {
        FormField::Kind => draft.kind.label().to_string(),
        FormField::Amount => format!("{CURRENCY} {}", draft.amount),
        FormField::Date => draft.date.clone(),
        FormField::Division => draft.division.to_string(),
        FormField::Category => draft.category.to_string(),
        FormField::Description => draft.description.clone(),
    }
}

/// Modal create/edit form drawn over the dashboard.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, form: &FormState) {
    let Some(draft) = form.draft() else {
        return;
    };
    let submitting = form.is_submitting();
    let (title, submit_label) = if form.is_editing() {
        (" Edit Transaction ", "Update Transaction")
    } else {
        (" New Transaction ", "Add Transaction")
    };

    let mut lines = vec![Line::from("")];
    for &field in FormField::all() {
        let focused = field == app.form_field && !submitting;
        let marker = if field.is_text() { "" } else { "◂ " };
        let value = if field.is_text() {
            field_value(draft, field)
        } else {
            format!("{marker}{} ▸", field_value(draft, field))
        };
        let value_style = if focused {
            theme::focused_field_style()
        } else {
            theme::normal_style()
        };

        lines.push(Line::from(vec![
            Span::styled(format!("  {:<13}", field.label()), theme::dim_style()),
            Span::styled(format!(" {value} "), value_style),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        if submitting {
            "  Saving…".to_string()
        } else {
            format!("  [Enter] {submit_label}")
        },
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "  Tab/Shift-Tab move   Left/Right change   Esc cancel",
        theme::dim_style(),
    )));

    let popup_height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 64.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(popup, popup_area);
}
