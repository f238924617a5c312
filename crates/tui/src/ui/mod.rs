pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::{AppState, ListPage, RowActions, Screen, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

use components::hints::{KeyHint, hint_separator, hints_to_spans};

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );
    match state.screen {
        Screen::Login => screens::login::render(frame, area, state),
        Screen::Home => render_shell(frame, area, state),
    }
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    // Main layout: info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    let content = layout[2];
    match state.section {
        Section::Dashboard => screens::dashboard::render(frame, content, state),
        Section::Customers => screens::customers::render(frame, content, state),
        Section::Credentials => screens::credentials::render(frame, content, state),
        Section::Income => screens::ledger::render(
            frame,
            content,
            &state.income,
            &state.currency_symbol,
            state.now,
        ),
        Section::Expenses => screens::ledger::render(
            frame,
            content,
            &state.expenses,
            &state.currency_symbol,
            state.now,
        ),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
    render_form_modal(frame, area, state);
    components::help_overlay::render(frame, area, state);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let user = state.user.as_deref().unwrap_or("-");
    let local = state.now.with_timezone(&state.timezone);

    let line = Line::from(vec![
        Span::styled("ZapDesk", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled("User", Style::default().fg(theme.dim)),
        Span::raw(format!(": {user}  ")),
        Span::styled("Today", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", local.format("%a %d %b %Y %H:%M"))),
        Span::styled(state.timezone.name(), Style::default().fg(theme.dim)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_form_modal(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    match state.section {
        Section::Dashboard => {}
        Section::Customers => form_modal(frame, area, &state.customers, state),
        Section::Credentials => form_modal(frame, area, &state.credentials, state),
        Section::Income => form_modal(frame, area, &state.income, state),
        Section::Expenses => form_modal(frame, area, &state.expenses, state),
    }
}

fn form_modal<S: RowActions>(
    frame: &mut Frame<'_>,
    area: Rect,
    page: &ListPage<S>,
    state: &AppState,
) {
    if let Some(form) = page.controller.form() {
        let verb = if page.controller.is_editing() {
            "Edit"
        } else {
            "Add"
        };
        let title = format!("{verb} {}", S::LABEL);
        components::form::render(frame, area, &title, form, state.now);
    }
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = Vec::new();
    if !state.captures_text() {
        parts.extend(components::tabs::tab_shortcuts(theme));
        parts.push(hint_separator(theme));
    }

    let context = context_hints(state);
    if !context.is_empty() {
        parts.extend(hints_to_spans(&context, theme));
    }

    if !state.captures_text() {
        parts.push(hint_separator(theme));
        parts.extend(hints_to_spans(&components::hints::common::global_shortcuts(), theme));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// Context-specific hints for the active section and mode.
fn context_hints(state: &AppState) -> Vec<KeyHint> {
    match state.section {
        Section::Dashboard => vec![KeyHint::new("2-5", "open a list")],
        Section::Customers => page_hints(&state.customers),
        Section::Credentials => page_hints(&state.credentials),
        Section::Income => page_hints(&state.income),
        Section::Expenses => page_hints(&state.expenses),
    }
}

fn page_hints<S: RowActions>(page: &ListPage<S>) -> Vec<KeyHint> {
    use components::hints::common;

    if page.controller.form().is_some() {
        return common::form_editing();
    }
    if page.search_active {
        return common::search_editing();
    }

    let mut hints = common::list_navigation();
    hints.extend(common::crud_operations());
    if S::PAGE_SIZE.is_some() {
        hints.push(KeyHint::new("n/p", "page"));
    }
    if !S::CATEGORIES.is_empty() {
        hints.push(KeyHint::new("f", "type"));
    }
    if S::REVEAL {
        hints.push(KeyHint::new("r", "reveal"));
    }
    if S::PORTAL {
        hints.push(KeyHint::new("o", "portal"));
    }
    for (key, action) in S::COPY_KEYS {
        hints.push(KeyHint::new(key.to_string(), *action));
    }
    hints
}
