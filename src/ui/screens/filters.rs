use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::dashboard::DashboardState;
use crate::models::timestamp::DATE_FORMAT;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, state: &DashboardState) {
    let filters = &state.filters;
    let date = |d: Option<chrono::NaiveDate>| {
        d.map_or_else(|| "any".to_string(), |d| d.format(DATE_FORMAT).to_string())
    };

    let label = |text: &'static str| {
        Line::from(Span::styled(
            format!(" {text}"),
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let value = |text: String| Line::from(Span::styled(format!("   {text}"), theme::normal_style()));

    let mut lines = vec![
        Line::from(""),
        label("Division"),
        value(filters.division.to_string()),
        Line::from(""),
        label("Category"),
        value(filters.category.to_string()),
        Line::from(""),
        label("Date Range"),
        value(format!("from {}", date(filters.start_date))),
        value(format!("to   {}", date(filters.end_date))),
    ];

    // A lone bound has no effect until its partner is set.
    if filters.start_date.is_some() != filters.end_date.is_some() {
        lines.push(Line::from(Span::styled(
            "   (needs both dates)",
            theme::dim_style(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" v/c  cycle", theme::dim_style())));
    lines.push(Line::from(Span::styled(" :from :to", theme::dim_style())));
    lines.push(Line::from(Span::styled(" x    clear", theme::dim_style())));

    let title_style = if filters.is_active() {
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        theme::title_style()
    };

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style())
            .title(Span::styled(" Filters ", title_style)),
    );
    f.render_widget(panel, area);
}
