//! Shared collection state for resource view-models.
//!
//! Wraps a [`Collection`] with the list-view state machine and the load
//! sequence counter that guards against stale responses: a `load()` that
//! resolves after a newer `load()` was issued is discarded instead of
//! overwriting fresher data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use hms_core::collection::{Collection, LoadState, MutationEffect, ResourceRecord};

struct ViewState<R> {
    collection: Collection<R>,
    load_state: LoadState,
}

/// Thread-safe holder of one resource collection and its load state.
#[derive(Clone)]
pub(crate) struct ResourceView<R: ResourceRecord> {
    state: Arc<RwLock<ViewState<R>>>,
    load_seq: Arc<AtomicU64>,
}

impl<R: ResourceRecord> ResourceView<R> {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(ViewState {
                collection: Collection::new(),
                load_state: LoadState::Idle,
            })),
            load_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Starts a load and returns its sequence number.
    pub(crate) fn begin_load(&self) -> u64 {
        self.state.write().unwrap().load_state = LoadState::Loading;
        self.load_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Replaces the collection with a load response.
    ///
    /// Returns `false` when the response is stale (a newer load was issued
    /// after this one); the collection is left untouched in that case.
    pub(crate) fn finish_load_success(&self, seq: u64, records: Vec<R>) -> bool {
        if seq != self.load_seq.load(Ordering::SeqCst) {
            return false;
        }
        let mut state = self.state.write().unwrap();
        state.collection.replace_all(records);
        state.load_state = LoadState::Ready;
        true
    }

    /// Marks a failed load as finished, preserving the previous collection.
    pub(crate) fn finish_load_failure(&self, seq: u64) {
        if seq != self.load_seq.load(Ordering::SeqCst) {
            return;
        }
        self.state.write().unwrap().load_state = LoadState::Ready;
    }

    /// Inserts a freshly created record at the front.
    pub(crate) fn prepend(&self, record: R) {
        self.state.write().unwrap().collection.prepend(record);
    }

    /// Applies a mutation effect; returns whether a record was touched.
    pub(crate) fn apply(&self, id: &str, effect: MutationEffect<R::Status>) -> bool {
        self.state.write().unwrap().collection.apply(id, effect)
    }

    pub(crate) fn records(&self) -> Vec<R> {
        self.state.read().unwrap().collection.records().to_vec()
    }

    pub(crate) fn load_state(&self) -> LoadState {
        self.state.read().unwrap().load_state
    }

    pub(crate) fn contains_id(&self, id: &str) -> bool {
        self.state.read().unwrap().collection.contains_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
    }

    impl Item {
        fn new(id: &str) -> Self {
            Self { id: id.to_string() }
        }
    }

    impl ResourceRecord for Item {
        type Status = ();

        fn id(&self) -> &str {
            &self.id
        }

        fn set_status(&mut self, _status: ()) {}
    }

    #[test]
    fn test_load_state_machine() {
        let view: ResourceView<Item> = ResourceView::new();
        assert_eq!(view.load_state(), LoadState::Idle);

        let seq = view.begin_load();
        assert_eq!(view.load_state(), LoadState::Loading);

        assert!(view.finish_load_success(seq, vec![Item::new("a")]));
        assert_eq!(view.load_state(), LoadState::Ready);
        assert_eq!(view.records(), vec![Item::new("a")]);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let view: ResourceView<Item> = ResourceView::new();
        let first = view.begin_load();
        let second = view.begin_load();

        // The newer load resolves first
        assert!(view.finish_load_success(second, vec![Item::new("fresh")]));
        // The older response arrives late and must not overwrite
        assert!(!view.finish_load_success(first, vec![Item::new("stale")]));
        assert_eq!(view.records(), vec![Item::new("fresh")]);
    }

    #[test]
    fn test_failed_reload_preserves_last_good_collection() {
        let view: ResourceView<Item> = ResourceView::new();
        let seq = view.begin_load();
        view.finish_load_success(seq, vec![Item::new("a"), Item::new("b")]);

        let retry = view.begin_load();
        view.finish_load_failure(retry);
        assert_eq!(view.load_state(), LoadState::Ready);
        assert_eq!(view.records().len(), 2);
    }

    #[test]
    fn test_stale_failure_does_not_clobber_loading_state() {
        let view: ResourceView<Item> = ResourceView::new();
        let first = view.begin_load();
        let _second = view.begin_load();

        view.finish_load_failure(first);
        // The newer load is still in flight
        assert_eq!(view.load_state(), LoadState::Loading);
    }
}
