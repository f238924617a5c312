pub mod credentials;
pub mod customers;
pub mod dashboard;
pub mod ledger;
pub mod login;

use engine::{CategoryFilter, PageView};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, TableState},
};

use crate::{
    app::{ListPage, RowActions},
    ui::theme::Theme,
};

/// Search box plus, for categorised pages, the filter tabs.
pub(crate) fn render_toolbar<S: RowActions>(
    frame: &mut Frame<'_>,
    area: Rect,
    page: &ListPage<S>,
    theme: &Theme,
) {
    let query = page.controller.search_text();
    let shown = if query.is_empty() && !page.search_active {
        "press / to search"
    } else {
        query
    };
    let mut search_style = Style::default().fg(theme.text);
    if page.search_active {
        search_style = search_style.fg(theme.accent).add_modifier(Modifier::BOLD);
    } else if query.is_empty() {
        search_style = search_style.fg(theme.dim);
    }

    let mut spans = vec![
        Span::styled("Search", Style::default().fg(theme.dim)),
        Span::raw(": "),
        Span::styled(shown.to_string(), search_style),
    ];
    if page.search_active {
        spans.push(Span::styled("│", Style::default().fg(theme.accent)));
    }

    if !S::CATEGORIES.is_empty() {
        spans.push(Span::raw("   "));
        let active = page.controller.category();
        let all = std::iter::once(CategoryFilter::All).chain(
            S::CATEGORIES
                .iter()
                .map(|value| CategoryFilter::Only((*value).to_string())),
        );
        for filter in all {
            let style = if &filter == active {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.dim)
            };
            spans.push(Span::styled(format!(" {} ", filter.label()), style));
        }
    }

    let border = if page.search_active {
        theme.accent
    } else {
        theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// `Page 2 of 3 · 20 customers` under a paginated table.
pub(crate) fn page_footer<R>(
    view: &PageView<'_, R>,
    (one, many): (&str, &str),
    theme: &Theme,
) -> Line<'static> {
    let mut spans = Vec::new();
    if view.total_pages > 1 {
        let prev = if view.has_prev { "‹ p" } else { "   " };
        let next = if view.has_next { "n ›" } else { "   " };
        spans.push(Span::styled(prev, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(
            "  Page {} of {}  ",
            view.page, view.total_pages
        )));
        spans.push(Span::styled(next, Style::default().fg(theme.accent)));
        spans.push(Span::raw("  ·  "));
    }
    let noun = if view.total_rows == 1 { one } else { many };
    spans.push(Span::styled(
        format!("{} {noun}", view.total_rows),
        Style::default().fg(theme.dim),
    ));
    Line::from(spans)
}

pub(crate) fn table_state(selected: usize, len: usize) -> TableState {
    let selected = (len > 0).then_some(selected.min(len.saturating_sub(1)));
    TableState::default().with_selected(selected)
}

/// Empty-state text when the filters leave no rows.
pub(crate) fn empty_message(label: &str, filtered: bool, theme: &Theme) -> Paragraph<'static> {
    let text = if filtered {
        format!("No {label} match the current search.")
    } else {
        format!("No {label} yet. Press a to add one.")
    };
    Paragraph::new(Span::styled(text, Style::default().fg(theme.dim)))
}

/// Column text for an optional field.
pub(crate) fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}
