use engine::Customer;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
};

use crate::{
    app::AppState,
    ui::{
        components::card::Card,
        screens::{empty_message, or_dash, page_footer, render_toolbar, table_state},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let page = &state.customers;
    let view = page.controller.page_view(state.now);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2), // Selected address
            Constraint::Length(1), // Pager
        ])
        .split(area);

    render_toolbar(frame, layout[0], page, &theme);

    let card = Card::new("Customers", &theme).focused(page.search_active);
    if view.rows.is_empty() {
        let filtered = !page.controller.search_text().is_empty();
        card.render_with(frame, layout[1], empty_message("customers", filtered, &theme));
    } else {
        let header = Row::new(["Client", "Company", "Designation", "Phone", "Email", "GST", "Tags"])
            .style(Style::default().fg(theme.dim).add_modifier(Modifier::BOLD));
        let rows = view.rows.iter().map(|row| customer_row(row.record));
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(14),
                Constraint::Percentage(18),
                Constraint::Percentage(12),
                Constraint::Percentage(13),
                Constraint::Percentage(19),
                Constraint::Percentage(12),
                Constraint::Percentage(12),
            ],
        )
        .header(header)
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

    if let Some(customer) = page.selected_record(state.now) {
        frame.render_widget(Paragraph::new(detail_lines(customer, &theme)), layout[2]);
    }
    let footer = page_footer(&view, ("customer", "customers"), &theme);
    frame.render_widget(Paragraph::new(footer), layout[3]);
}

fn customer_row(customer: &Customer) -> Row<'static> {
    Row::new(vec![
        Cell::from(customer.client_name.clone()),
        Cell::from(customer.company_name.clone()),
        Cell::from(or_dash(customer.designation.as_deref())),
        Cell::from(or_dash(customer.phone.as_deref())),
        Cell::from(or_dash(customer.email.as_deref())),
        Cell::from(or_dash(customer.gst.as_deref())),
        Cell::from(customer.tags.join(", ")),
    ])
}

fn detail_lines(customer: &Customer, theme: &Theme) -> Vec<Line<'static>> {
    vec![Line::from(vec![
        Span::styled(" Address", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", or_dash(customer.address.as_deref()))),
    ])]
}
