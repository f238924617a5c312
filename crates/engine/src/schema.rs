//! Per-variant record descriptors.
//!
//! A [`Schema`] tells the generic [`RecordListController`] everything it needs
//! to know about one kind of record: which fields the form shows and which of
//! them are required, which text free-text search looks at, the categorical
//! field used by the tab filter, the date that drives the expiry sort, and
//! whether the list is paginated.
//!
//! [`RecordListController`]: crate::RecordListController

use std::{borrow::Cow, fmt};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{RecordForm, ResultEngine};

/// Opaque, stable identifier of a record.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// A fresh random id. Uniqueness within a store is enforced by the store.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Anything stored in a [`RecordStore`](crate::RecordStore).
pub trait Record: Clone + fmt::Debug {
    fn id(&self) -> &RecordId;
}

/// How a form field is edited and parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Text that is masked when displayed.
    Secret,
    /// `YYYY-MM-DD`.
    Date,
    /// `YYYY-MM-DD` deadline; the form shows the days left while typing.
    Expiry,
    /// Decimal amount, see [`Amount`](crate::Amount).
    Amount,
    /// Comma separated list.
    Tags,
    /// One of a fixed set of values; the first one is the default.
    Choice(&'static [&'static str]),
}

/// Static description of one form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldSpec {
    #[must_use]
    pub const fn required(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            required: true,
            kind,
        }
    }

    #[must_use]
    pub const fn optional(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            required: false,
            kind,
        }
    }

    /// Value a fresh create form starts with.
    #[must_use]
    pub fn default_value(&self) -> &'static str {
        match self.kind {
            FieldKind::Choice(options) => options.first().copied().unwrap_or(""),
            _ => "",
        }
    }
}

/// Descriptor of one record variant.
pub trait Schema {
    type Record: Record;

    /// Lowercase noun used in prompts (`"Delete this customer?"`).
    const NOUN: &'static str;
    /// Capitalised label used in notices (`"Customer added"`).
    const LABEL: &'static str;
    /// Page size, for paginated variants.
    const PAGE_SIZE: Option<usize> = None;
    /// Values of the categorical field, for variants that have one.
    const CATEGORIES: &'static [&'static str] = &[];

    /// Form fields, in display order.
    fn fields() -> &'static [FieldSpec];

    /// Text looked at by free-text search.
    fn search_text(record: &Self::Record) -> Vec<Cow<'_, str>>;

    /// Value of the categorical field.
    fn category(_record: &Self::Record) -> Option<&str> {
        None
    }

    /// Date the derived view sorts by (soonest first).
    fn due_date(_record: &Self::Record) -> Option<NaiveDate> {
        None
    }

    /// Form pre-populated from an existing record.
    fn to_form(record: &Self::Record) -> RecordForm;

    /// Build a record from a form whose required fields are already known to
    /// be non-empty. Typed fields (dates, amounts) are parsed here.
    fn from_form(id: RecordId, form: &RecordForm) -> ResultEngine<Self::Record>;
}
