//! Property-based tests for location aggregation
//!
//! Tests invariants:
//! - Never panics on arbitrary documents
//! - Unspecified count equals items whose own `locations` is absent or empty
//! - Contributions equal the sum of resolved string locations
//! - Group order does not change the result

use proptest::prelude::*;
use serde_json::{json, Value};

use super::arb_location_like;
use crate::core::locations::{compute_location_counts, Category, Group, Item};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// A `locations` field value: absent, empty, strings, mixed, or not an array.
fn arb_locations_field() -> impl Strategy<Value = Option<Value>> {
    prop_oneof![
        3 => Just(None),
        1 => Just(Some(json!([]))),
        4 => prop::collection::vec(arb_location_like(), 1..4).prop_map(|v| Some(json!(v))),
        1 => Just(Some(json!([1, "Abyss", null]))),
        1 => Just(Some(json!("Abyss"))),
    ]
}

fn arb_label() -> impl Strategy<Value = Option<Value>> {
    prop_oneof![
        4 => arb_location_like().prop_map(|l| Some(json!(l))),
        1 => Just(Some(json!(42))),
        1 => Just(None),
    ]
}

fn arb_item() -> impl Strategy<Value = Value> {
    arb_locations_field().prop_map(|locations| match locations {
        Some(l) => json!({ "id": "item", "locations": l }),
        None => json!({ "id": "item" }),
    })
}

fn arb_category() -> impl Strategy<Value = Value> {
    (
        arb_label(),
        arb_locations_field(),
        prop::collection::vec(arb_item(), 0..6),
    )
        .prop_map(|(label, locations, items)| {
            let mut category = serde_json::Map::new();
            if let Some(label) = label {
                category.insert("label".into(), label);
            }
            if let Some(locations) = locations {
                category.insert("locations".into(), locations);
            }
            category.insert("items".into(), Value::Array(items));
            Value::Object(category)
        })
}

fn arb_groups() -> impl Strategy<Value = Vec<Group>> {
    prop::collection::vec(prop::collection::vec(arb_category(), 0..4), 0..4).prop_map(|groups| {
        groups
            .into_iter()
            .enumerate()
            .map(|(i, categories)| {
                let doc = json!({ "categories": categories });
                Group::from_json_str(&format!("group-{i}"), &doc.to_string())
                    .expect("generated documents always parse")
            })
            .collect()
    })
}

fn items(groups: &[Group]) -> impl Iterator<Item = (&Category, &Item)> {
    groups
        .iter()
        .flat_map(|g| g.categories.iter())
        .flat_map(|c| c.items.iter().map(move |i| (c, i)))
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: unspecified counts items that declared no locations themselves
    #[test]
    fn prop_unspecified_matches_items_without_own_locations(groups in arb_groups()) {
        let counts = compute_location_counts(&groups);
        let expected = items(&groups)
            .filter(|(_, item)| item.own_locations().is_none())
            .count();
        prop_assert_eq!(counts.unspecified, expected);
    }

    /// Property: each item contributes once per resolved string location
    #[test]
    fn prop_contributions_match_resolved_locations(groups in arb_groups()) {
        let counts = compute_location_counts(&groups);
        let expected: usize = items(&groups)
            .map(|(category, item)| item.effective_locations(category).names().len())
            .sum();
        prop_assert_eq!(counts.total_contributions(), expected);
        prop_assert!(counts.locations.values().all(|c| *c > 0));
    }

    /// Property: group order does not change any count
    #[test]
    fn prop_group_order_is_irrelevant(groups in arb_groups()) {
        let forward = compute_location_counts(&groups);
        let mut reversed_groups = groups.clone();
        reversed_groups.reverse();
        let reversed = compute_location_counts(&reversed_groups);

        prop_assert_eq!(forward.unspecified, reversed.unspecified);
        prop_assert_eq!(forward.locations.len(), reversed.locations.len());
        for (name, count) in &forward.locations {
            prop_assert_eq!(reversed.get(name), *count);
        }
    }
}
