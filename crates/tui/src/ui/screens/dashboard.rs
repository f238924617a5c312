use engine::{DATE_FORMAT, DashboardSummary, Renewal, Urgency};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use crate::{
    app::AppState,
    ui::{
        components::card::{Card, StatCard},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let summary = DashboardSummary::from_parts(
        state.customers.controller.store().len(),
        state.credentials.controller.store().as_slice(),
        state.income.controller.total(),
        state.expenses.controller.total(),
        state.now,
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    render_stats(frame, layout[0], &summary, &state.currency_symbol, &theme);
    render_renewals(frame, layout[1], &summary, &theme);
}

fn render_stats(
    frame: &mut Frame<'_>,
    area: Rect,
    summary: &DashboardSummary<'_>,
    symbol: &str,
    theme: &Theme,
) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    StatCard::new("Customers", summary.customers.to_string(), theme).render(frame, tiles[0]);

    let mut credentials = StatCard::new("Credentials", summary.credentials.to_string(), theme);
    if let Some(days) = summary.min_days() {
        credentials = credentials.subtitle(format!("next: {}", Urgency::badge(days)));
    }
    credentials.render(frame, tiles[1]);

    StatCard::new("Income", summary.total_income.format(symbol), theme)
        .value_color(theme.positive)
        .render(frame, tiles[2]);
    StatCard::new("Expenses", summary.total_expenses.format(symbol), theme)
        .value_color(theme.warning)
        .render(frame, tiles[3]);

    let net = summary.net();
    let net_color = if net.is_negative() {
        theme.error
    } else {
        theme.positive
    };
    StatCard::new("Net", net.format(symbol), theme)
        .value_color(net_color)
        .render(frame, tiles[4]);
}

fn render_renewals(
    frame: &mut Frame<'_>,
    area: Rect,
    summary: &DashboardSummary<'_>,
    theme: &Theme,
) {
    let title = format!("{} renewals upcoming", summary.renewals.len());
    let card = Card::new(&title, theme);

    if summary.renewals.is_empty() {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(
                "No credentials saved.",
                Style::default().fg(theme.dim),
            )),
        );
        return;
    }

    let inner = card.inner(area);
    frame.render_widget(card.block(), area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    frame.render_widget(Paragraph::new(urgency_counts(summary, theme)), rows[0]);

    let items: Vec<ListItem> = summary
        .renewals
        .iter()
        .map(|renewal| ListItem::new(renewal_line(renewal, theme)))
        .collect();
    frame.render_widget(List::new(items), rows[1]);
}

fn urgency_counts(summary: &DashboardSummary<'_>, theme: &Theme) -> Line<'static> {
    let bands = [
        (Urgency::Overdue, "overdue"),
        (Urgency::Critical, "within 7 days"),
        (Urgency::Warning, "within 30 days"),
    ];
    let mut spans = Vec::new();
    for (urgency, label) in bands {
        if !spans.is_empty() {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            summary.count(urgency).to_string(),
            Style::default()
                .fg(theme.urgency(urgency))
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {label}"), Style::default().fg(theme.dim)));
    }
    Line::from(spans)
}

fn renewal_line(renewal: &Renewal<'_>, theme: &Theme) -> Line<'static> {
    let credential = renewal.credential;
    Line::from(vec![
        Span::styled(
            format!("{:<14}", Urgency::badge(renewal.days_remaining)),
            Style::default()
                .fg(theme.urgency(renewal.urgency()))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "{}  {:<24}",
            credential.expiry.format(DATE_FORMAT),
            credential.service_name
        )),
        Span::styled(
            format!("{} · {} · {}", credential.client, credential.kind, credential.provider),
            Style::default().fg(theme.dim),
        ),
    ])
}
