use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::dashboard::DashboardState;
use crate::ui::theme;
use crate::ui::util::format_amount;

/// Title bar with the net balance on the right.
pub(crate) fn render_header(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(28)])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            " Financial Dashboard",
            Style::default()
                .fg(theme::HEADER_FG)
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(title, chunks[0]);

    let overdrawn = state.stats.is_overdrawn();
    let balance = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(state.stats.net.abs()),
            Style::default()
                .fg(theme::HEADER_FG)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            if overdrawn {
                "Overdrawn"
            } else {
                "Available Balance"
            },
            Style::default().fg(if overdrawn { theme::RED } else { theme::TEXT_DIM }),
        )),
    ])
    .right_aligned()
    .style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(balance, chunks[1]);
}

/// Total income, total expenses and transaction count.
pub(crate) fn render_kpi_cards(f: &mut Frame, area: Rect, state: &DashboardState) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    render_card(
        f,
        cards[0],
        "Total Income",
        format_amount(state.stats.income),
        theme::GREEN,
    );
    render_card(
        f,
        cards[1],
        "Total Expenses",
        format_amount(state.stats.expense),
        theme::RED,
    );
    render_card(
        f,
        cards[2],
        "Transaction Count",
        state.transactions.len().to_string(),
        theme::TEXT,
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style())
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}
