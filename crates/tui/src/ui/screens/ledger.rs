use chrono::{DateTime, Utc};
use engine::{DATE_FORMAT, LedgerEntry, Schema};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
};

use crate::{
    app::{ListPage, RowActions},
    ui::{
        components::card::Card,
        screens::{empty_message, or_dash, page_footer, render_toolbar, table_state},
        theme::Theme,
    },
};

/// Income and expense pages share one layout: search, running total, table.
pub fn render<S>(
    frame: &mut Frame<'_>,
    area: Rect,
    page: &ListPage<S>,
    currency_symbol: &str,
    now: DateTime<Utc>,
) where
    S: RowActions + Schema<Record = LedgerEntry>,
{
    let theme = Theme::default();
    let view = page.controller.page_view(now);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(28)])
        .split(layout[0]);
    render_toolbar(frame, top[0], page, &theme);

    // Total covers the whole collection, not the search result.
    let total = Card::new("Total", &theme);
    frame.render_widget(
        Paragraph::new(Span::styled(
            page.controller.total().format(currency_symbol),
            Style::default()
                .fg(theme.positive)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right)
        .block(total.block()),
        top[1],
    );

    let label = format!("{}s", S::LABEL);
    let card = Card::new(&label, &theme).focused(page.search_active);
    if view.rows.is_empty() {
        let filtered = !page.controller.search_text().is_empty();
        card.render_with(frame, layout[1], empty_message(&format!("{}s", S::NOUN), filtered, &theme));
    } else {
        let header = Row::new([
            Cell::from("Customer"),
            Cell::from(Line::from("Amount").alignment(Alignment::Right)),
            Cell::from("Date"),
            Cell::from("Remark"),
            Cell::from("Upload"),
        ])
        .style(Style::default().fg(theme.dim).add_modifier(Modifier::BOLD));
        let rows = view
            .rows
            .iter()
            .map(|row| entry_row(row.record, currency_symbol));
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(24),
                Constraint::Percentage(16),
                Constraint::Percentage(14),
                Constraint::Percentage(30),
                Constraint::Percentage(16),
            ],
        )
        .header(header)
        .column_spacing(2)
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ");

        let inner = card.inner(layout[1]);
        frame.render_widget(card.block(), layout[1]);
        let mut table_state = table_state(page.selected, view.rows.len());
        frame.render_stateful_widget(table, inner, &mut table_state);
    }

    let footer = page_footer(&view, ("entry", "entries"), &theme);
    frame.render_widget(Paragraph::new(footer), layout[2]);
}

fn entry_row(entry: &LedgerEntry, currency_symbol: &str) -> Row<'static> {
    Row::new(vec![
        Cell::from(entry.customer.clone()),
        Cell::from(Line::from(entry.amount.format(currency_symbol)).alignment(Alignment::Right)),
        Cell::from(entry.date.format(DATE_FORMAT).to_string()),
        Cell::from(or_dash(entry.remark.as_deref())),
        Cell::from(or_dash(entry.uploaded.as_deref())),
    ])
}
