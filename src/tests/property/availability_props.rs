//! Property-based tests for the availability constraint
//!
//! Tests invariants:
//! - The available set is never empty
//! - It only holds registry locations
//! - Valid candidates keep their relative order

use proptest::prelude::*;

use super::arb_location_like;
use crate::core::locations::{is_valid_location, AvailableLocations, ALL_LOCATIONS};

proptest! {
    /// Property: never empty, only registry members
    #[test]
    fn prop_available_is_never_empty(candidate in prop::collection::vec(arb_location_like(), 0..10)) {
        let available = AvailableLocations::from_candidate(Some(candidate.as_slice()));
        prop_assert!(!available.is_empty());
        prop_assert!(available.iter().all(is_valid_location));
    }

    /// Property: valid candidates survive in order, or the registry is used
    #[test]
    fn prop_candidate_order_is_kept(candidate in prop::collection::vec(arb_location_like(), 0..10)) {
        let expected: Vec<&str> = candidate
            .iter()
            .map(|c| c.trim())
            .filter(|c| is_valid_location(c))
            .collect();
        let available = AvailableLocations::from_candidate(Some(candidate.as_slice()));

        if expected.is_empty() {
            prop_assert_eq!(available.as_slice(), &ALL_LOCATIONS[..]);
        } else {
            prop_assert_eq!(available.as_slice(), expected.as_slice());
        }
    }
}
