use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, RowActions, Section},
    ui::{
        components::{centered_rect, tabs},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    if !state.help {
        return;
    }

    let theme = Theme::default();
    let popup = centered_rect(70, 70, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(" Keybinds ", Style::default().fg(theme.accent)))
        .title_bottom(Line::from(vec![
            Span::styled(" Esc", Style::default().fg(theme.accent)),
            Span::raw(" close "),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.panel));
    frame.render_widget(Paragraph::new(help_lines(state, &theme)).block(block), popup);
}

fn key_line(pairs: &[(&str, &str)], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in pairs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key.to_string(), Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {action}")));
    }
    Line::from(spans)
}

fn help_lines(state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(tabs::tab_shortcuts(theme)),
        key_line(&[("?", "help"), ("x", "logout"), ("q", "quit"), ("Ctrl+C", "quit")], theme),
        Line::from(""),
    ];

    if state.section != Section::Dashboard {
        lines.push(Line::from(format!("{}:", state.section.label())));
    }
    match state.section {
        Section::Dashboard => {
            lines.push(Line::from("Dashboard: totals and upcoming renewals."));
            lines.push(Line::from("Badges turn red at 7 days and amber at 30."));
        }
        Section::Customers => page_lines::<engine::CustomerSchema>(&mut lines, theme),
        Section::Credentials => page_lines::<engine::CredentialSchema>(&mut lines, theme),
        Section::Income => page_lines::<engine::IncomeSchema>(&mut lines, theme),
        Section::Expenses => page_lines::<engine::ExpenseSchema>(&mut lines, theme),
    }

    lines.push(Line::from(""));
    lines.push(Line::from("In forms:"));
    lines.push(key_line(
        &[
            ("Tab/↑↓", "move"),
            ("←→", "change choice"),
            ("Enter", "save"),
            ("Esc", "cancel"),
        ],
        theme,
    ));
    lines
}

fn page_lines<S: RowActions>(lines: &mut Vec<Line<'static>>, theme: &Theme) {
    lines.push(key_line(
        &[
            ("↑↓", "select"),
            ("/", "search"),
            ("Esc", "clear search"),
            ("a", "add"),
            ("e", "edit"),
            ("d", "delete"),
        ],
        theme,
    ));

    let mut extra: Vec<(String, String)> = Vec::new();
    if S::PAGE_SIZE.is_some() {
        extra.push(("n/p".to_string(), "next/prev page".to_string()));
    }
    if !S::CATEGORIES.is_empty() {
        extra.push(("f".to_string(), "cycle type filter".to_string()));
    }
    if S::REVEAL {
        extra.push(("r".to_string(), "reveal password".to_string()));
    }
    if S::PORTAL {
        extra.push(("o".to_string(), "open portal".to_string()));
    }
    for (key, action) in S::COPY_KEYS {
        extra.push((key.to_string(), (*action).to_string()));
    }
    if !extra.is_empty() {
        let pairs: Vec<(&str, &str)> = extra
            .iter()
            .map(|(key, action)| (key.as_str(), action.as_str()))
            .collect();
        lines.push(key_line(&pairs, theme));
    }
}
