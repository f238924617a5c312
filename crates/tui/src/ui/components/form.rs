use chrono::{DateTime, Utc};
use engine::{
    CredentialKind, FieldKind, FormField, RecordForm, Urgency, days_remaining, expiry_hint,
    parse_date,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::ui::{components::centered_box, theme::Theme};

const LABEL_WIDTH: usize = 16;

/// Modal add/edit form. One line per field, plus a hint line under expiry
/// fields and the validation error at the bottom.
pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    form: &RecordForm,
    now: DateTime<Utc>,
) {
    let theme = Theme::default();
    let lines = form_lines(form, now, &theme);
    let height = lines.len() as u16 + 4;
    let popup = centered_box(64, height, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(theme.accent),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.panel));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .margin(1)
        .split(inner);
    frame.render_widget(Paragraph::new(lines), rows[0]);

    if let Some(error) = form.error() {
        frame.render_widget(
            Paragraph::new(Span::styled(error, Style::default().fg(theme.error))),
            rows[1],
        );
    }
}

fn form_lines(form: &RecordForm, now: DateTime<Utc>, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, field) in form.fields().iter().enumerate() {
        let focused = index == form.focus();
        lines.push(field_line(form, field, focused, theme));

        if field.spec.kind == FieldKind::Expiry {
            let days = parse_date(&field.value)
                .ok()
                .map(|date| days_remaining(date, now));
            let color = match days {
                Some(d) => theme.urgency(Urgency::from_days(d)),
                None => theme.dim,
            };
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(LABEL_WIDTH + 2)),
                Span::styled(expiry_hint(days), Style::default().fg(color)),
            ]));
        }
    }
    lines
}

/// The credential service field is named after the selected type.
fn field_label(form: &RecordForm, field: &FormField) -> &'static str {
    if field.spec.key == "service_name"
        && let Ok(kind) = CredentialKind::try_from(form.value("type"))
    {
        return kind.service_label();
    }
    field.spec.label
}

fn field_line(
    form: &RecordForm,
    field: &FormField,
    focused: bool,
    theme: &Theme,
) -> Line<'static> {
    let marker = if field.spec.required { "*" } else { " " };
    let label = format!(
        "{:<width$}{marker} ",
        field_label(form, field),
        width = LABEL_WIDTH
    );
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };

    let value = display_value(field, focused);
    let value_style = if focused {
        Style::default().fg(theme.text).add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(theme.text)
    };

    Line::from(vec![
        Span::styled(label, label_style),
        Span::styled(value, value_style),
    ])
}

fn display_value(field: &FormField, focused: bool) -> String {
    match field.spec.kind {
        FieldKind::Choice(_) => format!("‹ {} ›", field.value),
        FieldKind::Secret if !focused => "•".repeat(field.value.chars().count()),
        FieldKind::Date | FieldKind::Expiry if field.value.is_empty() && !focused => {
            "YYYY-MM-DD".to_string()
        }
        _ if focused => format!("{}│", field.value),
        _ => field.value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use engine::{CredentialSchema, FieldSpec, IncomeSchema, RecordForm, Schema, Stores};

    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 24, 9, 0, 0).unwrap()
    }

    const SPECS: &[FieldSpec] = &[
        FieldSpec::required("name", "Name", FieldKind::Text),
        FieldSpec::optional("password", "Password", FieldKind::Secret),
        FieldSpec::required("kind", "Type", FieldKind::Choice(&["Domain", "Hosting"])),
    ];

    #[test]
    fn secrets_are_masked_unless_focused() {
        let form = RecordForm::empty(SPECS).with("password", "hunter2");
        let field = &form.fields()[1];
        assert_eq!(display_value(field, false), "•••••••");
        assert_eq!(display_value(field, true), "hunter2│");
    }

    #[test]
    fn choices_show_arrows() {
        let form = RecordForm::empty(SPECS);
        assert_eq!(display_value(&form.fields()[2], false), "‹ Domain ›");
    }

    #[test]
    fn payment_dates_have_no_expiry_hint() {
        let stores = Stores::seeded().unwrap();
        let entry = stores.income.iter().next().unwrap();
        let form = IncomeSchema::to_form(entry);

        let lines = form_lines(&form, now(), &Theme::default());
        assert_eq!(lines.len(), form.fields().len());
        assert!(lines.iter().all(|line| !line_text(line).contains("day(s)")));
    }

    #[test]
    fn credential_expiry_shows_days_left() {
        let form = RecordForm::for_schema::<CredentialSchema>().with("expiry", "2025-11-29");

        let lines = form_lines(&form, now(), &Theme::default());
        assert_eq!(lines.len(), form.fields().len() + 1);
        assert!(lines.iter().any(|line| line_text(line).contains("Due in 5 day(s)")));
    }

    #[test]
    fn service_label_follows_selected_type() {
        let theme = Theme::default();
        let mut form = RecordForm::for_schema::<CredentialSchema>();
        let service_line = |form: &RecordForm| {
            let field = form
                .fields()
                .iter()
                .find(|field| field.spec.key == "service_name")
                .unwrap();
            line_text(&field_line(form, field, false, &theme))
        };

        assert!(service_line(&form).starts_with("Domain Name"));
        assert!(form.set("type", "Hosting"));
        assert!(service_line(&form).starts_with("Hosting Name"));
    }

    #[test]
    fn other_labels_are_unchanged() {
        let form = RecordForm::empty(SPECS).with("name", "x");
        let field = &form.fields()[0];
        assert_eq!(field_label(&form, field), "Name");
    }
}
