//! Startup data for the four collections.
//!
//! The built-in seed ships with the crate; a JSON file of the same shape can
//! replace it. Amounts are integer minor units.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Credential, Customer, EngineError, LedgerEntry, RecordStore, ResultEngine};

const BUILTIN_SEED: &str = include_str!("../data/seed.json");

/// Serialized shape of a seed file. Missing sections are empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub credentials: Vec<Credential>,
    #[serde(default)]
    pub income: Vec<LedgerEntry>,
    #[serde(default)]
    pub expenses: Vec<LedgerEntry>,
}

/// One owned store per page, built once at startup.
#[derive(Debug, Default)]
pub struct Stores {
    pub customers: RecordStore<Customer>,
    pub credentials: RecordStore<Credential>,
    pub income: RecordStore<LedgerEntry>,
    pub expenses: RecordStore<LedgerEntry>,
}

impl Stores {
    /// Stores filled with the built-in demo data.
    pub fn seeded() -> ResultEngine<Self> {
        Self::from_json(BUILTIN_SEED)
    }

    pub fn from_json(json: &str) -> ResultEngine<Self> {
        let seed: SeedFile = serde_json::from_str(json)?;
        Self::try_from(seed)
    }

    /// Read a seed file from disk.
    pub fn load(path: impl AsRef<Path>) -> ResultEngine<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let stores = Self::from_json(&json)
            .map_err(|err| EngineError::Seed(format!("{}: {err}", path.display())))?;
        tracing::info!(
            path = %path.display(),
            customers = stores.customers.len(),
            credentials = stores.credentials.len(),
            income = stores.income.len(),
            expenses = stores.expenses.len(),
            "seed file loaded"
        );
        Ok(stores)
    }
}

impl TryFrom<SeedFile> for Stores {
    type Error = EngineError;

    fn try_from(seed: SeedFile) -> Result<Self, Self::Error> {
        if let Some(entry) = seed
            .income
            .iter()
            .chain(&seed.expenses)
            .find(|entry| entry.amount.is_negative())
        {
            return Err(EngineError::Seed(format!(
                "negative amount on entry \"{}\"",
                entry.id
            )));
        }
        Ok(Self {
            customers: RecordStore::from_records(seed.customers)?,
            credentials: RecordStore::from_records(seed.credentials)?,
            income: RecordStore::from_records(seed.income)?,
            expenses: RecordStore::from_records(seed.expenses)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Amount, CredentialKind, RecordId};

    #[test]
    fn builtin_seed_loads() {
        let stores = Stores::seeded().unwrap();
        assert_eq!(stores.customers.len(), 7);
        assert_eq!(stores.credentials.len(), 5);
        assert_eq!(stores.income.len(), 2);
        assert_eq!(stores.expenses.len(), 3);

        let aws = stores.credentials.get(&RecordId::from("2")).unwrap();
        assert_eq!(aws.kind, CredentialKind::Hosting);
        assert_eq!(aws.provider, "AWS");

        let advance = stores.income.get(&RecordId::from("i1")).unwrap();
        assert_eq!(advance.amount, Amount::new(15_000_00));
    }

    #[test]
    fn missing_sections_are_empty() {
        let stores = Stores::from_json(r#"{"customers": []}"#).unwrap();
        assert!(stores.credentials.is_empty());
        assert!(stores.expenses.is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"{"income": [
            {"id": "a", "customer": "X", "amount": 100, "date": "2025-01-01"},
            {"id": "a", "customer": "Y", "amount": 200, "date": "2025-01-02"}
        ]}"#;
        assert_eq!(
            Stores::from_json(json).unwrap_err(),
            EngineError::Seed("duplicate record id \"a\"".to_string())
        );
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let json = r#"{"expenses": [
            {"id": "e", "customer": "X", "amount": -100, "date": "2025-01-01"}
        ]}"#;
        assert_eq!(
            Stores::from_json(json).unwrap_err(),
            EngineError::Seed("negative amount on entry \"e\"".to_string())
        );
    }
}
