//! Property-based tests for the persisted selection
//!
//! Tests invariants:
//! - A read is always a subset of the registry plus the unspecified marker
//! - Reading twice gives the same result
//! - Writes are persisted verbatim, sanitisation happens on read
//! - Arbitrary stored text never breaks a read

use proptest::prelude::*;

use super::arb_location_like;
use crate::core::locations::{is_selectable, FilterStateStore, LOCAL_STORAGE_KEY};
use crate::core::storage::{KeyValueStore, MemoryStore};

proptest! {
    /// Property: reads only ever contain selectable values
    #[test]
    fn prop_read_is_subset_of_selectable(values in prop::collection::vec(arb_location_like(), 0..12)) {
        let store = FilterStateStore::new(MemoryStore::new());
        store.set_selection(&values).unwrap();

        let selection = store.get_selection();
        prop_assert!(selection.iter().all(is_selectable));
        for value in selection.iter() {
            prop_assert!(values.iter().any(|v| v.trim() == value));
        }
    }

    /// Property: consecutive reads agree
    #[test]
    fn prop_read_is_idempotent(values in prop::collection::vec(arb_location_like(), 0..12)) {
        let store = FilterStateStore::new(MemoryStore::new());
        store.set_selection(&values).unwrap();
        prop_assert_eq!(store.get_selection(), store.get_selection());
    }

    /// Property: the stored value is exactly the written list
    #[test]
    fn prop_write_is_verbatim(values in prop::collection::vec(arb_location_like(), 0..12)) {
        let backend = MemoryStore::new();
        let store = FilterStateStore::new(backend.clone());
        store.set_selection(&values).unwrap();

        let raw = backend.get(LOCAL_STORAGE_KEY).unwrap().unwrap();
        let decoded: Vec<String> = serde_json::from_str(&raw).unwrap();
        prop_assert_eq!(decoded, values);
    }

    /// Property: any stored text reads without panicking
    #[test]
    fn prop_arbitrary_stored_text_is_tolerated(raw in ".{0,64}") {
        let store = FilterStateStore::new(MemoryStore::with_entry(LOCAL_STORAGE_KEY, raw));
        let selection = store.get_selection();
        prop_assert!(selection.iter().all(is_selectable));
    }
}
