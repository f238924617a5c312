//! Transient, uncommitted form state.
//!
//! A [`RecordForm`] never touches a collection. The controller promotes it to
//! a record on submit, and only when every required field is filled in.

use chrono::NaiveDate;

use crate::{
    Amount, EngineError, ResultEngine,
    schema::{FieldKind, FieldSpec, Schema},
    urgency,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub spec: FieldSpec,
    pub value: String,
}

impl FormField {
    fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordForm {
    fields: Vec<FormField>,
    focus: usize,
    error: Option<String>,
}

impl RecordForm {
    /// Empty form for `specs`, with choice fields on their first option.
    #[must_use]
    pub fn empty(specs: &[FieldSpec]) -> Self {
        Self {
            fields: specs
                .iter()
                .map(|spec| FormField {
                    spec: *spec,
                    value: spec.default_value().to_string(),
                })
                .collect(),
            focus: 0,
            error: None,
        }
    }

    /// Empty create form for schema `S`.
    #[must_use]
    pub fn for_schema<S: Schema>() -> Self {
        Self::empty(S::fields())
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Replace the value of field `key`. Returns `false` for unknown keys.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|field| field.spec.key == key) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Raw value of field `key`, empty for unknown keys.
    #[must_use]
    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|field| field.spec.key == key)
            .map(|field| field.value.as_str())
            .unwrap_or("")
    }

    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    #[must_use]
    pub fn focus(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Type a character into the focused field. Choice fields ignore typing.
    pub fn push_char(&mut self, ch: char) {
        if let Some(field) = self.fields.get_mut(self.focus)
            && !matches!(field.spec.kind, FieldKind::Choice(_))
        {
            field.value.push(ch);
            self.error = None;
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus)
            && !matches!(field.spec.kind, FieldKind::Choice(_))
        {
            field.value.pop();
            self.error = None;
        }
    }

    /// Step the focused choice field to its next (or previous) option.
    pub fn cycle_choice(&mut self, forward: bool) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        let FieldKind::Choice(options) = field.spec.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let current = options
            .iter()
            .position(|option| *option == field.value)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        field.value = options[next].to_string();
    }

    /// Labels of required fields that are empty or whitespace only.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|field| field.spec.required && field.is_blank())
            .map(|field| field.spec.label)
            .collect()
    }

    /// Fails with [`EngineError::Validation`] naming every missing field.
    pub fn validate(&self) -> ResultEngine<()> {
        let missing = self.missing_required();
        if missing.is_empty() {
            return Ok(());
        }
        Err(EngineError::Validation(format!(
            "Required: {}",
            missing.join(", ")
        )))
    }

    /// Inline message from the last failed submit.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Trimmed text value.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        self.value(key).trim().to_string()
    }

    /// Trimmed text value, `None` when blank.
    #[must_use]
    pub fn optional_text(&self, key: &str) -> Option<String> {
        let value = self.value(key).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    pub fn date(&self, key: &str) -> ResultEngine<NaiveDate> {
        urgency::parse_date(self.value(key))
    }

    pub fn amount(&self, key: &str) -> ResultEngine<Amount> {
        self.value(key).parse()
    }

    /// Comma separated list, trimmed, blanks dropped.
    #[must_use]
    pub fn tags(&self, key: &str) -> Vec<String> {
        self.value(key)
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECS: &[FieldSpec] = &[
        FieldSpec::required("name", "Name", FieldKind::Text),
        FieldSpec::required("kind", "Type", FieldKind::Choice(&["Domain", "Hosting"])),
        FieldSpec::optional("tags", "Tags", FieldKind::Tags),
        FieldSpec::required("date", "Date", FieldKind::Date),
    ];

    #[test]
    fn empty_form_uses_choice_default() {
        let form = RecordForm::empty(SPECS);
        assert_eq!(form.value("name"), "");
        assert_eq!(form.value("kind"), "Domain");
        assert_eq!(form.missing_required(), vec!["Name", "Date"]);
    }

    #[test]
    fn whitespace_counts_as_missing() {
        let form = RecordForm::empty(SPECS)
            .with("name", "   ")
            .with("date", "2025-01-01");
        assert_eq!(
            form.validate(),
            Err(EngineError::Validation("Required: Name".to_string()))
        );
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = RecordForm::empty(SPECS);
        form.push_char('A');
        form.push_char('c');
        form.pop_char();
        form.focus_next();
        form.push_char('x');
        assert_eq!(form.value("name"), "A");
        assert_eq!(form.value("kind"), "Domain");

        form.cycle_choice(true);
        assert_eq!(form.value("kind"), "Hosting");
        form.cycle_choice(true);
        assert_eq!(form.value("kind"), "Domain");
        form.cycle_choice(false);
        assert_eq!(form.value("kind"), "Hosting");
    }

    #[test]
    fn focus_wraps() {
        let mut form = RecordForm::empty(SPECS);
        form.focus_prev();
        assert_eq!(form.focused().map(|f| f.spec.key), Some("date"));
        form.focus_next();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn tags_are_split_and_trimmed() {
        let form = RecordForm::empty(SPECS).with("tags", " Priority, ,Web ,");
        assert_eq!(form.tags("tags"), vec!["Priority", "Web"]);
    }

    #[test]
    fn editing_clears_inline_error() {
        let mut form = RecordForm::empty(SPECS);
        form.set_error("Required: Name");
        form.push_char('a');
        assert_eq!(form.error(), None);
    }
}
