use engine::{CategoryFilter, Credential, DATE_FORMAT, Urgency, ViewRow};
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
    let page = &state.credentials;
    let view = page.controller.page_view(state.now);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2), // Portal and notes
            Constraint::Length(1),
        ])
        .split(area);

    render_toolbar(frame, layout[0], page, &theme);

    let card = Card::new("Credentials", &theme).focused(page.search_active);
    if view.rows.is_empty() {
        let filtered = !page.controller.search_text().is_empty()
            || *page.controller.category() != CategoryFilter::All;
        card.render_with(frame, layout[1], empty_message("credentials", filtered, &theme));
    } else {
        let header = Row::new([
            "Client", "Type", "Provider", "Service", "Login", "Password", "Expiry",
        ])
        .style(Style::default().fg(theme.dim).add_modifier(Modifier::BOLD));
        let rows = view.rows.iter().map(|row| {
            let revealed = page.controller.is_revealed(&row.record.id);
            credential_row(row, revealed, &theme)
        });
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(14),
                Constraint::Percentage(8),
                Constraint::Percentage(12),
                Constraint::Percentage(16),
                Constraint::Percentage(16),
                Constraint::Percentage(12),
                Constraint::Percentage(22),
            ],
        )
        .header(header)
        .row_highlight_style(Style::default().bg(theme.border).add_modifier(Modifier::BOLD))
        .highlight_symbol("› ");

        let inner = card.inner(layout[1]);
        frame.render_widget(card.block(), layout[1]);
        let mut table_state = table_state(page.selected, view.rows.len());
        frame.render_stateful_widget(table, inner, &mut table_state);
    }

    if let Some(credential) = page.selected_record(state.now) {
        frame.render_widget(Paragraph::new(detail_lines(credential, &theme)), layout[2]);
    }
    let footer = page_footer(&view, ("credential", "credentials"), &theme);
    frame.render_widget(Paragraph::new(footer), layout[3]);
}

fn credential_row(row: &ViewRow<'_, Credential>, revealed: bool, theme: &Theme) -> Row<'static> {
    let credential = row.record;
    let password = if revealed {
        or_dash(credential.password.as_deref())
    } else {
        credential.masked_password()
    };

    let mut expiry = vec![Span::raw(format!(
        "{} ",
        credential.expiry.format(DATE_FORMAT)
    ))];
    if let Some(days) = row.days_remaining {
        expiry.push(Span::styled(
            Urgency::badge(days),
            Style::default()
                .fg(theme.urgency(Urgency::from_days(days)))
                .add_modifier(Modifier::BOLD),
        ));
    }

    Row::new(vec![
        Cell::from(credential.client.clone()),
        Cell::from(credential.kind.as_str()),
        Cell::from(credential.provider.clone()),
        Cell::from(credential.service_name.clone()),
        Cell::from(or_dash(credential.login.as_deref())),
        Cell::from(password),
        Cell::from(Line::from(expiry)),
    ])
}

fn detail_lines(credential: &Credential, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(" Portal", Style::default().fg(theme.dim)),
            Span::raw(format!(": {}", or_dash(credential.url.as_deref()))),
        ]),
        Line::from(vec![
            Span::styled(" Notes", Style::default().fg(theme.dim)),
            Span::raw(format!(": {}", or_dash(credential.notes.as_deref()))),
        ]),
    ]
}
