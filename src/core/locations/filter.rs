//! The location filter context.
//!
//! [`LocationFilter`] owns the persisted selection and the available set, so
//! independent filters (one per test, one per profile) never share state. It
//! also produces the headless model a dropdown renders from and answers
//! per-item visibility.

use serde::{Deserialize, Serialize};

use super::availability::AvailableLocations;
use super::counts::{compute_location_counts, LocationCounts};
use super::dataset::{Category, Dataset, Item};
use super::registry::UNSPECIFIED_LOCATION;
use super::selection::{FilterSelection, FilterStateStore};
use crate::core::storage::{KeyValueStore, StorageResult};

/// Label shown for the unspecified bucket.
pub const UNSPECIFIED_LABEL: &str = "No location";

/// What an empty selection shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySelectionPolicy {
    #[default]
    ShowAll,
    ShowNone,
}

/// One checkbox row of the location dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationRow {
    /// Value persisted when the row is checked.
    pub value: &'static str,
    pub label: &'static str,
    pub count: usize,
    pub checked: bool,
}

impl LocationRow {
    pub fn is_unspecified(&self) -> bool {
        self.value == UNSPECIFIED_LOCATION
    }
}

#[derive(Debug, Clone)]
pub struct LocationFilter<S> {
    state: FilterStateStore<S>,
    available: AvailableLocations,
    empty_policy: EmptySelectionPolicy,
}

impl<S: KeyValueStore> LocationFilter<S> {
    pub fn new(state: FilterStateStore<S>) -> Self {
        Self {
            state,
            available: AvailableLocations::default(),
            empty_policy: EmptySelectionPolicy::default(),
        }
    }

    pub fn with_empty_policy(mut self, policy: EmptySelectionPolicy) -> Self {
        self.empty_policy = policy;
        self
    }

    pub fn state(&self) -> &FilterStateStore<S> {
        &self.state
    }

    pub fn available(&self) -> &AvailableLocations {
        &self.available
    }

    pub fn empty_policy(&self) -> EmptySelectionPolicy {
        self.empty_policy
    }

    /// Restrict or reset the offered locations. Counts and selection display
    /// must be re-derived by the caller afterwards.
    pub fn set_available_locations<L: AsRef<str>>(&mut self, candidate: Option<&[L]>) {
        self.available.set(candidate);
    }

    pub fn selection(&self) -> FilterSelection {
        self.state.get_selection()
    }

    pub fn set_selection<L: AsRef<str>>(&self, locations: &[L]) -> StorageResult<()> {
        self.state.set_selection(locations)
    }

    pub fn select_all(&self) -> StorageResult<()> {
        self.state.select_all(&self.available)
    }

    pub fn clear(&self) -> StorageResult<()> {
        self.state.clear()
    }

    /// Check or uncheck one value and persist the whole selection.
    ///
    /// Works from the sanitised selection, so toggling also drops any stale
    /// entries left in storage.
    pub fn toggle(&self, value: &str, checked: bool) -> StorageResult<FilterSelection> {
        let mut values = self.selection().to_vec();
        let present = values.iter().any(|v| v == value);
        match (checked, present) {
            (true, false) => values.push(value.to_string()),
            (false, true) => values.retain(|v| v != value),
            _ => {}
        }
        self.state.set_selection(&values)?;
        Ok(self.selection())
    }

    pub fn counts(&self, dataset: &Dataset) -> LocationCounts {
        compute_location_counts(&dataset.groups)
    }

    /// Dropdown rows: the unspecified bucket first, then every available
    /// location in availability order.
    pub fn rows(&self, counts: &LocationCounts) -> Vec<LocationRow> {
        let selection = self.selection();
        let mut rows = Vec::with_capacity(self.available.len() + 1);
        rows.push(LocationRow {
            value: UNSPECIFIED_LOCATION,
            label: UNSPECIFIED_LABEL,
            count: counts.unspecified,
            checked: selection.includes_unspecified(),
        });
        rows.extend(self.available.iter().map(|location| LocationRow {
            value: location,
            label: location,
            count: counts.get(location),
            checked: selection.contains(location),
        }));
        rows
    }

    /// Whether `item` of `category` passes the current selection.
    pub fn is_item_visible(&self, category: &Category, item: &Item) -> bool {
        is_visible(&self.selection(), self.empty_policy, category, item)
    }

    /// Items of `dataset` that pass the current selection, in dataset order.
    pub fn visible_items<'a>(&self, dataset: &'a Dataset) -> Vec<(&'a Category, &'a Item)> {
        let selection = self.selection();
        dataset
            .entries()
            .filter(|(category, item)| is_visible(&selection, self.empty_policy, category, item))
            .collect()
    }
}

/// Visibility of one item against a selection.
pub fn is_visible(
    selection: &FilterSelection,
    policy: EmptySelectionPolicy,
    category: &Category,
    item: &Item,
) -> bool {
    if selection.is_empty() {
        return policy == EmptySelectionPolicy::ShowAll;
    }
    let effective = item.effective_locations(category).names();
    selection.matches(effective.as_slice(), item.is_unspecified())
}
