use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::dashboard::DashboardState;
use crate::models::timestamp;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, state: &DashboardState) {
    let visible = state.visible();
    let title = Span::styled(
        format!(
            " Transaction History  {} of {} transactions ",
            visible.len(),
            state.transactions.len()
        ),
        Style::default()
            .fg(theme::TEXT_DIM)
            .add_modifier(Modifier::BOLD),
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style())
        .title(title);

    if visible.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No transactions found",
                Style::default()
                    .fg(theme::TEXT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                if state.filters.is_active() {
                    "Try clearing the filters with x"
                } else {
                    "Add a transaction to get started"
                },
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Description", "Division", "Category", "Date", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .skip(app.table_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let is_cursor = i == app.table_index;
            let sign = if txn.is_income() { "+" } else { "" };
            let amount_str = format!("{sign}{}", format_amount(txn.signed_amount()));

            let style = if is_cursor {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            // The cursor row keeps one flat highlight.
            let (division_cell, amount_cell) = if is_cursor {
                (
                    Cell::from(txn.division.as_str()),
                    Cell::from(amount_str),
                )
            } else {
                (
                    Cell::from(Span::styled(
                        txn.division.as_str(),
                        theme::division_style(txn.division),
                    )),
                    Cell::from(Span::styled(amount_str, theme::amount_style(txn.kind))),
                )
            };

            Row::new(vec![
                Cell::from(format!("  {}", truncate(&txn.description, 40))),
                division_cell,
                Cell::from(txn.category.as_str()),
                Cell::from(timestamp::format_display(&txn.date)),
                amount_cell,
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(17),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
