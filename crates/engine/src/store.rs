use std::collections::HashSet;

use crate::{
    EngineError, ResultEngine,
    schema::{Record, RecordId},
};

/// Ordered, owned collection of records of one kind.
///
/// Ids are unique at all times. New records go to the front so they surface
/// first in views that keep insertion order.
#[derive(Clone, Debug)]
pub struct RecordStore<R> {
    records: Vec<R>,
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Record> RecordStore<R> {
    /// Build a store from seed records, rejecting duplicate ids.
    pub fn from_records(records: Vec<R>) -> ResultEngine<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id().clone()) {
                return Err(EngineError::Seed(format!(
                    "duplicate record id \"{}\"",
                    record.id()
                )));
            }
        }
        Ok(Self { records })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    /// A random id not used by any record in the store.
    #[must_use]
    pub fn fresh_id(&self) -> RecordId {
        loop {
            let id = RecordId::random();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Insert `record` at the front. Fails if its id is already taken.
    pub fn prepend(&mut self, record: R) -> ResultEngine<()> {
        if self.contains(record.id()) {
            return Err(EngineError::Validation(format!(
                "id \"{}\" already present",
                record.id()
            )));
        }
        self.records.insert(0, record);
        Ok(())
    }

    /// Replace the record with the same id, keeping its position.
    pub fn replace(&mut self, record: R) -> ResultEngine<()> {
        let slot = self
            .records
            .iter_mut()
            .find(|existing| existing.id() == record.id())
            .ok_or_else(|| EngineError::KeyNotFound(record.id().to_string()))?;
        *slot = record;
        Ok(())
    }

    /// Remove the record with `id`, if any.
    pub fn remove(&mut self, id: &RecordId) -> Option<R> {
        let position = self.records.iter().position(|record| record.id() == id)?;
        Some(self.records.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: RecordId,
        body: &'static str,
    }

    impl Record for Note {
        fn id(&self) -> &RecordId {
            &self.id
        }
    }

    fn note(id: &str, body: &'static str) -> Note {
        Note {
            id: RecordId::from(id),
            body,
        }
    }

    #[test]
    fn rejects_duplicate_seed_ids() {
        let err = RecordStore::from_records(vec![note("a", "x"), note("a", "y")]).unwrap_err();
        assert_eq!(err, EngineError::Seed("duplicate record id \"a\"".to_string()));
    }

    #[test]
    fn prepend_puts_newest_first() {
        let mut store = RecordStore::from_records(vec![note("a", "x")]).unwrap();
        store.prepend(note("b", "y")).unwrap();
        let ids: Vec<_> = store.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(store.prepend(note("a", "z")).is_err());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn replace_keeps_position() {
        let mut store =
            RecordStore::from_records(vec![note("a", "x"), note("b", "y"), note("c", "z")])
                .unwrap();
        store.replace(note("b", "changed")).unwrap();
        assert_eq!(store.as_slice()[1], note("b", "changed"));
        assert_eq!(
            store.replace(note("missing", "")),
            Err(EngineError::KeyNotFound("missing".to_string()))
        );
    }

    #[test]
    fn remove_is_noop_when_absent() {
        let mut store = RecordStore::from_records(vec![note("a", "x")]).unwrap();
        assert_eq!(store.remove(&RecordId::from("zzz")), None);
        assert_eq!(store.remove(&RecordId::from("a")), Some(note("a", "x")));
        assert!(store.is_empty());
    }

    #[test]
    fn fresh_ids_are_unused() {
        let store = RecordStore::from_records(vec![note("a", "x")]).unwrap();
        let id = store.fresh_id();
        assert!(!store.contains(&id));
    }
}
