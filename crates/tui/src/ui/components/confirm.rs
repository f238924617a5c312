use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::{components::centered_box, theme::Theme};

/// Yes/no popup for destructive actions.
pub fn render(frame: &mut Frame<'_>, area: Rect, message: &str) {
    let theme = Theme::default();
    let width = (message.chars().count() as u16 + 6).clamp(30, 60);
    let popup = centered_box(width, 6, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(" Confirm ", Style::default().fg(theme.warning)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.warning))
        .style(Style::default().bg(theme.panel));

    let key = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled(message, Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", key),
            Span::raw(" yes   "),
            Span::styled("n", key),
            Span::raw(" no"),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        popup,
    );
}
