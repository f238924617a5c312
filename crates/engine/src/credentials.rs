use std::{borrow::Cow, fmt};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, RecordForm, ResultEngine,
    schema::{FieldKind, FieldSpec, Record, RecordId, Schema},
    urgency::DATE_FORMAT,
};

/// What a credential gives access to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredentialKind {
    #[default]
    Domain,
    Hosting,
}

impl CredentialKind {
    pub const ALL: [CredentialKind; 2] = [CredentialKind::Domain, CredentialKind::Hosting];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Domain => "Domain",
            Self::Hosting => "Hosting",
        }
    }

    /// Label of the service-name field while this kind is selected.
    #[must_use]
    pub const fn service_label(self) -> &'static str {
        match self {
            Self::Domain => "Domain Name",
            Self::Hosting => "Hosting Name",
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CredentialKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| EngineError::Validation(format!("unknown credential type: {value}")))
    }
}

/// Domain or hosting access record for a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub id: RecordId,
    pub client: String,
    #[serde(rename = "type", default)]
    pub kind: CredentialKind,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub service_name: String,
    pub expiry: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Credential {
    /// Password hidden behind at most 8 bullets.
    #[must_use]
    pub fn masked_password(&self) -> String {
        let len = self
            .password
            .as_deref()
            .map_or(0, |password| password.chars().count());
        "•".repeat(len.min(8))
    }
}

impl Record for Credential {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// Credentials page: filtered by type, searched by client, provider and
/// service, sorted by days until expiry.
#[derive(Clone, Copy, Debug, Default)]
pub struct CredentialSchema;

const KINDS: &[&str] = &["Domain", "Hosting"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("client", "Client", FieldKind::Text),
    FieldSpec::required("type", "Type", FieldKind::Choice(KINDS)),
    FieldSpec::required("provider", "Provider", FieldKind::Text),
    FieldSpec::optional("url", "Portal URL", FieldKind::Text),
    FieldSpec::optional("login", "Login", FieldKind::Text),
    FieldSpec::optional("password", "Password", FieldKind::Secret),
    FieldSpec::required("service_name", "Service Name", FieldKind::Text),
    FieldSpec::required("expiry", "Expiry Date", FieldKind::Expiry),
    FieldSpec::optional("notes", "Notes", FieldKind::Text),
];

impl Schema for CredentialSchema {
    type Record = Credential;

    const NOUN: &'static str = "credential";
    const LABEL: &'static str = "Credential";
    const CATEGORIES: &'static [&'static str] = KINDS;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn search_text(record: &Credential) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(record.client.as_str()),
            Cow::Borrowed(record.provider.as_str()),
            Cow::Borrowed(record.service_name.as_str()),
        ]
    }

    fn category(record: &Credential) -> Option<&str> {
        Some(record.kind.as_str())
    }

    fn due_date(record: &Credential) -> Option<NaiveDate> {
        Some(record.expiry)
    }

    fn to_form(record: &Credential) -> RecordForm {
        RecordForm::for_schema::<Self>()
            .with("client", record.client.as_str())
            .with("type", record.kind.as_str())
            .with("provider", record.provider.as_str())
            .with("url", record.url.clone().unwrap_or_default())
            .with("login", record.login.clone().unwrap_or_default())
            .with("password", record.password.clone().unwrap_or_default())
            .with("service_name", record.service_name.as_str())
            .with("expiry", record.expiry.format(DATE_FORMAT).to_string())
            .with("notes", record.notes.clone().unwrap_or_default())
    }

    fn from_form(id: RecordId, form: &RecordForm) -> ResultEngine<Credential> {
        Ok(Credential {
            id,
            client: form.text("client"),
            kind: CredentialKind::try_from(form.value("type"))?,
            provider: form.text("provider"),
            url: form.optional_text("url"),
            login: form.optional_text("login"),
            // Passwords are stored verbatim, surrounding spaces included.
            password: Some(form.value("password").to_string()).filter(|p| !p.is_empty()),
            service_name: form.text("service_name"),
            expiry: form.date("expiry")?,
            notes: form.optional_text("notes"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> Credential {
        Credential {
            id: RecordId::from("2"),
            client: "Jane Smith".to_string(),
            kind: CredentialKind::Hosting,
            provider: "AWS".to_string(),
            url: Some("https://console.aws.amazon.com".to_string()),
            login: Some("jane@aws.com".to_string()),
            password: Some("awsPASS!9".to_string()),
            service_name: "EC2 Server".to_string(),
            expiry: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn form_round_trip() {
        let record = credential();
        let form = CredentialSchema::to_form(&record);
        assert_eq!(form.value("type"), "Hosting");
        assert_eq!(form.value("expiry"), "2026-01-15");
        assert_eq!(
            CredentialSchema::from_form(record.id.clone(), &form).unwrap(),
            record
        );
    }

    #[test]
    fn bad_expiry_is_rejected() {
        let form = CredentialSchema::to_form(&credential()).with("expiry", "15/01/2026");
        let err = CredentialSchema::from_form(RecordId::from("x"), &form).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn password_mask_is_capped() {
        let mut record = credential();
        assert_eq!(record.masked_password(), "••••••••");
        record.password = Some("abc".to_string());
        assert_eq!(record.masked_password(), "•••");
        record.password = None;
        assert_eq!(record.masked_password(), "");
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(CredentialKind::try_from("hosting").unwrap(), CredentialKind::Hosting);
        assert!(CredentialKind::try_from("Email").is_err());
    }
}
