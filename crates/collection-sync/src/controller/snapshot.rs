//! Client snapshot of a collection and the sequence gate that decides which
//! list response is allowed to replace it.

use std::collections::HashSet;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::domain::{ItemId, Resource};

/// A snapshot row: the display key is the server identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    pub key: ItemId,
    pub item: T,
}

/// Last applied list response, replaced wholesale on every reload
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    rows: Rc<[Row<T>]>,
    seq: u64,
    fetched_at: Option<DateTime<Utc>>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            rows: Rc::from(Vec::new()),
            seq: 0,
            fetched_at: None,
        }
    }
}

impl<T: Resource> Snapshot<T> {
    /// Key every item by its identifier. Later duplicates of an identifier
    /// are dropped so keys stay unique.
    pub(crate) fn build(items: Vec<T>, seq: u64) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            let key = item.id().to_string();
            if !seen.insert(key.clone()) {
                log::warn!(
                    "dropping duplicate {} identifier {:?} from list response",
                    T::schema().path,
                    key
                );
                continue;
            }
            rows.push(Row { key, item });
        }
        Self {
            rows: rows.into(),
            seq,
            fetched_at: Some(Utc::now()),
        }
    }

    pub fn rows(&self) -> &[Row<T>] {
        &self.rows
    }

    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().map(|row| &row.item)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.rows.iter().find(|row| row.key == key).map(|row| &row.item)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sequence number of the load that produced this snapshot (0 = never loaded)
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }
}

/// Last-request-wins ordering for concurrent loads
#[derive(Debug, Default)]
pub(crate) struct LoadGate {
    issued: u64,
    applied: u64,
}

impl LoadGate {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Whether the response to request `seq` is newer than anything applied
    /// so far. Admitting it makes every older request stale.
    pub fn admit(&mut self, seq: u64) -> bool {
        if seq > self.applied {
            self.applied = seq;
            true
        } else {
            false
        }
    }

    pub fn is_loading(&self) -> bool {
        self.issued > self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    #[test]
    fn test_keys_match_identifiers() {
        let snapshot = Snapshot::build(
            vec![Category::new("a", "Drinks", 1), Category::new("b", "Snacks", 2)],
            1,
        );
        assert!(snapshot.rows().iter().all(|row| row.key == row.item.id));
        assert_eq!(snapshot.get("b").map(|c| c.name.as_str()), Some("Snacks"));
        assert!(snapshot.fetched_at().is_some());
    }

    #[test]
    fn test_duplicate_identifiers_dropped() {
        let snapshot = Snapshot::build(
            vec![
                Category::new("a", "Drinks", 1),
                Category::new("a", "Drinks again", 2),
                Category::new("b", "Snacks", 3),
            ],
            4,
        );
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("a").unwrap().name, "Drinks");
        assert_eq!(snapshot.seq(), 4);
    }

    #[test]
    fn test_gate_discards_older_responses() {
        let mut gate = LoadGate::default();
        let first = gate.issue();
        let second = gate.issue();
        assert!(gate.is_loading());

        assert!(gate.admit(second));
        assert!(!gate.is_loading());
        assert!(!gate.admit(first));

        let third = gate.issue();
        assert!(gate.admit(third));
    }
}
