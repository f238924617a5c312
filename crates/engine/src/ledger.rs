//! Income and expense entries.
//!
//! Both pages share one record shape and differ only in wording and in the
//! expense page also matching amounts in free-text search.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    Amount, EngineError, RecordForm, RecordListController, ResultEngine,
    schema::{FieldKind, FieldSpec, Record, RecordId, Schema},
    urgency::DATE_FORMAT,
};

/// A received or paid amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: RecordId,
    pub customer: String,
    pub amount: Amount,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// Name of the attached document (invoice, quotation).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded: Option<String>,
}

impl Record for LedgerEntry {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("customer", "Customer Name", FieldKind::Text),
    FieldSpec::required("amount", "Amount", FieldKind::Amount),
    FieldSpec::required("date", "Date", FieldKind::Date),
    FieldSpec::optional("remark", "Remark", FieldKind::Text),
    FieldSpec::optional("uploaded", "Uploaded", FieldKind::Text),
];

fn base_search_text(entry: &LedgerEntry) -> Vec<Cow<'_, str>> {
    [
        Some(entry.customer.as_str()),
        entry.remark.as_deref(),
        entry.uploaded.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(Cow::Borrowed)
    .collect()
}

fn entry_form<S: Schema>(entry: &LedgerEntry) -> RecordForm {
    RecordForm::for_schema::<S>()
        .with("customer", entry.customer.as_str())
        .with("amount", entry.amount.to_string())
        .with("date", entry.date.format(DATE_FORMAT).to_string())
        .with("remark", entry.remark.clone().unwrap_or_default())
        .with("uploaded", entry.uploaded.clone().unwrap_or_default())
}

fn entry_from_form(id: RecordId, form: &RecordForm) -> ResultEngine<LedgerEntry> {
    let amount = form.amount("amount")?;
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(
            "amount must not be negative".to_string(),
        ));
    }
    Ok(LedgerEntry {
        id,
        customer: form.text("customer"),
        amount,
        date: form.date("date")?,
        remark: form.optional_text("remark"),
        uploaded: form.optional_text("uploaded"),
    })
}

/// Income page.
#[derive(Clone, Copy, Debug, Default)]
pub struct IncomeSchema;

impl Schema for IncomeSchema {
    type Record = LedgerEntry;

    const NOUN: &'static str = "income record";
    const LABEL: &'static str = "Income";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn search_text(record: &LedgerEntry) -> Vec<Cow<'_, str>> {
        base_search_text(record)
    }

    fn to_form(record: &LedgerEntry) -> RecordForm {
        entry_form::<Self>(record)
    }

    fn from_form(id: RecordId, form: &RecordForm) -> ResultEngine<LedgerEntry> {
        entry_from_form(id, form)
    }
}

/// Expense page. Search also matches the plain amount (`1200`).
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpenseSchema;

impl Schema for ExpenseSchema {
    type Record = LedgerEntry;

    const NOUN: &'static str = "expense record";
    const LABEL: &'static str = "Expense";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn search_text(record: &LedgerEntry) -> Vec<Cow<'_, str>> {
        let mut text = base_search_text(record);
        text.push(Cow::Owned(record.amount.to_string()));
        text
    }

    fn to_form(record: &LedgerEntry) -> RecordForm {
        entry_form::<Self>(record)
    }

    fn from_form(id: RecordId, form: &RecordForm) -> ResultEngine<LedgerEntry> {
        entry_from_form(id, form)
    }
}

/// Sum of `entries`.
pub fn total<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> Amount {
    entries.into_iter().map(|entry| entry.amount).sum()
}

impl<S: Schema<Record = LedgerEntry>> RecordListController<S> {
    /// Total over the whole collection, independent of search.
    pub fn total(&self) -> Amount {
        total(self.store().iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> LedgerEntry {
        LedgerEntry {
            id: RecordId::from("e1"),
            customer: "John Doe".to_string(),
            amount: Amount::new(1200_00),
            date: NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(),
            remark: Some("Invoice Uploaded".to_string()),
            uploaded: Some("INVOICE".to_string()),
        }
    }

    #[test]
    fn only_expenses_search_amounts() {
        let entry = entry();
        assert!(ExpenseSchema::search_text(&entry).iter().any(|t| t == "1200"));
        assert!(!IncomeSchema::search_text(&entry).iter().any(|t| t == "1200"));
    }

    #[test]
    fn form_round_trip() {
        let entry = entry();
        let form = IncomeSchema::to_form(&entry);
        assert_eq!(form.value("amount"), "1200");
        assert_eq!(IncomeSchema::from_form(entry.id.clone(), &form).unwrap(), entry);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let form = ExpenseSchema::to_form(&entry()).with("amount", "-5");
        assert_eq!(
            ExpenseSchema::from_form(RecordId::from("e9"), &form),
            Err(EngineError::InvalidAmount(
                "amount must not be negative".to_string()
            ))
        );
    }

    #[test]
    fn total_sums_amounts() {
        let mut second = entry();
        second.amount = Amount::new(850_50);
        assert_eq!(total([&entry(), &second]), Amount::new(2050_50));
    }
}
