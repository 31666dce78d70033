//! Client-side resource collections.
//!
//! A [`Collection`] is the in-memory view of a server-owned list: ordered,
//! keyed by server-assigned id, duplicate-free. Mutations project onto the
//! visible list through a [`MutationEffect`], which makes the
//! per-resource-kind asymmetry (remove vs. patch-in-place) explicit.

use serde::{Deserialize, Serialize};

/// A record held in a client-side collection.
pub trait ResourceRecord: Clone {
    /// The status enum for this resource kind.
    type Status: Clone + PartialEq;

    /// Server-assigned identifier.
    fn id(&self) -> &str;

    /// Replaces the record's status in place.
    fn set_status(&mut self, status: Self::Status);
}

/// How a successful status mutation projects onto the visible collection.
///
/// Staff deactivation removes the record from the list entirely; patient
/// discharge keeps the record and flips its status. Selecting the effect
/// per resource kind keeps that asymmetry out of call-site code.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationEffect<S> {
    /// The record disappears from the visible collection.
    Remove,
    /// The record stays; its status is replaced.
    Patch(S),
}

/// List-view state machine: `Idle -> Loading -> Ready`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// Ordered, duplicate-free sequence of resource records.
///
/// Order is the server response order; creates prepend (newest first).
#[derive(Debug, Clone)]
pub struct Collection<R> {
    records: Vec<R>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: ResourceRecord> Collection<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the collection wholesale with a server response.
    ///
    /// Server order is preserved; on duplicate ids the first occurrence
    /// wins, keeping the no-duplicate invariant.
    pub fn replace_all(&mut self, records: Vec<R>) {
        let mut deduped: Vec<R> = Vec::with_capacity(records.len());
        for record in records {
            if deduped.iter().any(|existing| existing.id() == record.id()) {
                continue;
            }
            deduped.push(record);
        }
        self.records = deduped;
    }

    /// Inserts a freshly created record at the front (newest first).
    ///
    /// An existing record with the same id is replaced rather than
    /// duplicated.
    pub fn prepend(&mut self, record: R) {
        self.records.retain(|existing| existing.id() != record.id());
        self.records.insert(0, record);
    }

    /// Applies a mutation effect to the record with the given id.
    ///
    /// Returns `true` when a record was touched.
    pub fn apply(&mut self, id: &str, effect: MutationEffect<R::Status>) -> bool {
        match effect {
            MutationEffect::Remove => {
                let before = self.records.len();
                self.records.retain(|record| record.id() != id);
                self.records.len() != before
            }
            MutationEffect::Patch(status) => {
                match self.records.iter_mut().find(|record| record.id() == id) {
                    Some(record) => {
                        record.set_status(status);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.records.iter().any(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        status: u8,
    }

    impl Item {
        fn new(id: &str, status: u8) -> Self {
            Self {
                id: id.to_string(),
                status,
            }
        }
    }

    impl ResourceRecord for Item {
        type Status = u8;

        fn id(&self) -> &str {
            &self.id
        }

        fn set_status(&mut self, status: u8) {
            self.status = status;
        }
    }

    #[test]
    fn test_replace_all_preserves_order_and_dedups() {
        let mut collection = Collection::new();
        collection.replace_all(vec![
            Item::new("a", 0),
            Item::new("b", 0),
            Item::new("a", 9),
            Item::new("c", 0),
        ]);

        let ids: Vec<&str> = collection.records().iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        // First occurrence wins
        assert_eq!(collection.get("a").unwrap().status, 0);
    }

    #[test]
    fn test_prepend_is_newest_first() {
        let mut collection = Collection::new();
        collection.replace_all(vec![Item::new("a", 0)]);
        collection.prepend(Item::new("b", 0));

        let ids: Vec<&str> = collection.records().iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_prepend_replaces_same_id() {
        let mut collection = Collection::new();
        collection.replace_all(vec![Item::new("a", 0), Item::new("b", 0)]);
        collection.prepend(Item::new("b", 7));

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.records()[0], Item::new("b", 7));
    }

    #[test]
    fn test_apply_remove() {
        let mut collection = Collection::new();
        collection.replace_all(vec![Item::new("a", 0), Item::new("b", 0)]);

        assert!(collection.apply("a", MutationEffect::Remove));
        assert!(!collection.contains_id("a"));
        assert_eq!(collection.len(), 1);

        // Removing an unknown id touches nothing
        assert!(!collection.apply("zzz", MutationEffect::Remove));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_apply_patch_in_place() {
        let mut collection = Collection::new();
        collection.replace_all(vec![Item::new("a", 0), Item::new("b", 0)]);

        assert!(collection.apply("b", MutationEffect::Patch(5)));
        assert_eq!(collection.get("b").unwrap().status, 5);
        // Position and neighbors unchanged
        assert_eq!(collection.records()[0].id(), "a");
        assert_eq!(collection.get("a").unwrap().status, 0);
    }
}
