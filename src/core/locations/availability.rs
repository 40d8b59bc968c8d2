//! Which registry locations are currently offered for selection.

use serde::Serialize;

use super::registry::ALL_LOCATIONS;

/// Ordered list of selectable locations. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AvailableLocations(Vec<&'static str>);

impl Default for AvailableLocations {
    fn default() -> Self {
        Self(ALL_LOCATIONS.to_vec())
    }
}

impl AvailableLocations {
    /// Build from a candidate list, see [`AvailableLocations::set`].
    pub fn from_candidate<S: AsRef<str>>(candidate: Option<&[S]>) -> Self {
        let mut available = Self::default();
        available.set(candidate);
        available
    }

    /// Replace the available set.
    ///
    /// `None` resets to the full registry. Otherwise each entry is trimmed
    /// and kept only if it is a registry location, in the candidate's order.
    /// Duplicates are kept. If nothing survives, the full registry is used.
    pub fn set<S: AsRef<str>>(&mut self, candidate: Option<&[S]>) {
        let Some(candidate) = candidate else {
            self.reset();
            return;
        };

        let normalized: Vec<&'static str> = candidate
            .iter()
            .filter_map(|s| canonical(s.as_ref().trim()))
            .collect();

        if normalized.is_empty() {
            tracing::debug!(
                candidates = candidate.len(),
                "No valid available locations given, using all locations"
            );
            self.reset();
        } else {
            tracing::debug!(available = normalized.len(), "Restricted available locations");
            self.0 = normalized;
        }
    }

    pub fn reset(&mut self) {
        self.0 = ALL_LOCATIONS.to_vec();
    }

    pub fn as_slice(&self) -> &[&'static str] {
        &self.0
    }

    pub fn contains(&self, location: &str) -> bool {
        self.0.contains(&location)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true: an empty restriction falls back to the full registry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_restricted(&self) -> bool {
        self.0 != ALL_LOCATIONS
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}

/// The registry's own `&'static str` for `s`, if it is a location.
fn canonical(s: &str) -> Option<&'static str> {
    ALL_LOCATIONS.iter().copied().find(|l| *l == s)
}
