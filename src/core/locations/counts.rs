//! Per-location item counts.

use indexmap::IndexMap;
use serde::Serialize;

use super::dataset::{Dataset, Group};
use super::registry::is_valid_location;

/// How many items map to each location, plus the unspecified bucket.
///
/// Multi-location items count once per location, so the sum of all counts
/// may exceed the number of items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocationCounts {
    /// Keyed by location string in first-seen order. May contain strings
    /// outside the registry when the dataset does.
    pub locations: IndexMap<String, usize>,
    /// Items that did not declare locations themselves.
    pub unspecified: usize,
}

impl LocationCounts {
    pub fn get(&self, location: &str) -> usize {
        self.locations.get(location).copied().unwrap_or(0)
    }

    /// Sum of every per-location contribution.
    pub fn total_contributions(&self) -> usize {
        self.locations.values().sum()
    }

    /// Counted strings that are not registry locations, in first-seen order.
    pub fn unknown_locations(&self) -> impl Iterator<Item = (&str, usize)> {
        self.locations
            .iter()
            .filter(|(name, _)| !is_valid_location(name))
            .map(|(name, count)| (name.as_str(), *count))
    }

    fn bump(&mut self, location: &str) {
        match self.locations.get_mut(location) {
            Some(count) => *count += 1,
            None => {
                self.locations.insert(location.to_string(), 1);
            }
        }
    }
}

/// Walk every item of every category of every group and count it.
///
/// An item without its own locations always increments `unspecified`, even
/// when its category supplies fallback locations that it is then counted
/// under as well.
pub fn compute_location_counts(groups: &[Group]) -> LocationCounts {
    let mut counts = LocationCounts::default();
    let mut items = 0usize;

    for category in groups.iter().flat_map(|g| g.categories.iter()) {
        for item in &category.items {
            items += 1;
            if item.is_unspecified() {
                counts.unspecified += 1;
            }
            for location in item.effective_locations(category).names() {
                counts.bump(location);
            }
        }
    }

    tracing::debug!(
        items,
        locations = counts.locations.len(),
        unspecified = counts.unspecified,
        "Computed location counts"
    );
    counts
}

impl Dataset {
    pub fn location_counts(&self) -> LocationCounts {
        compute_location_counts(&self.groups)
    }
}
