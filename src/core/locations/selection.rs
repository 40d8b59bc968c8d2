//! Persisted location selection.
//!
//! Writes persist exactly what they are given. Sanitisation happens only on
//! read, so stale entries left behind by a registry change disappear the next
//! time the selection is read.

use indexmap::IndexSet;
use serde::Serialize;

use super::availability::AvailableLocations;
use super::registry::{is_selectable, UNSPECIFIED_LOCATION};
use crate::core::storage::{KeyValueStore, StorageResult};

/// Storage key the selection is persisted under by default.
pub const LOCAL_STORAGE_KEY: &str = "locationFilter";

/// A validated set of selected locations.
///
/// Every member is either a registry location or [`UNSPECIFIED_LOCATION`].
/// First-seen order is kept for display; it carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterSelection(IndexSet<String>);

impl FilterSelection {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Trim every value and keep those that are selectable.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            values
                .into_iter()
                .map(|v| v.as_ref().trim().to_string())
                .filter(|v| is_selectable(v))
                .collect(),
        )
    }

    /// Decode a persisted value.
    ///
    /// Unparseable or non-array content yields an empty selection; non-string
    /// array members are skipped.
    pub fn from_stored(raw: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Array(values)) => {
                let selection =
                    Self::from_values(values.iter().filter_map(serde_json::Value::as_str));
                if selection.len() < values.len() {
                    tracing::debug!(
                        stored = values.len(),
                        kept = selection.len(),
                        "Ignored unknown or duplicate stored locations"
                    );
                }
                selection
            }
            Ok(other) => {
                tracing::warn!(kind = json_kind(&other), "Stored location filter is not an array");
                Self::empty()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored location filter is not valid JSON");
                Self::empty()
            }
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.contains(value)
    }

    pub fn includes_unspecified(&self) -> bool {
        self.contains(UNSPECIFIED_LOCATION)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// Whether an item with the given effective locations matches.
    ///
    /// `unspecified` is true when the item declared no locations itself. Does
    /// not apply any empty-selection policy.
    pub fn matches<S: AsRef<str>>(&self, effective: &[S], unspecified: bool) -> bool {
        (unspecified && self.includes_unspecified())
            || effective.iter().any(|l| self.contains(l.as_ref()))
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Reads and writes the persisted selection through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct FilterStateStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> FilterStateStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, LOCAL_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The raw persisted value, unsanitised.
    pub fn raw(&self) -> StorageResult<Option<String>> {
        self.store.get(&self.key)
    }

    /// Current selection. Never fails: absence, malformed content and backend
    /// read failures all read as an empty selection.
    pub fn get_selection(&self) -> FilterSelection {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return FilterSelection::empty(),
            Err(e) => {
                tracing::warn!(
                    backend = self.store.name(),
                    key = %self.key,
                    error = %e,
                    "Failed to read location filter"
                );
                return FilterSelection::empty();
            }
        };

        let selection = FilterSelection::from_stored(&raw);
        tracing::debug!(key = %self.key, selected = selection.len(), "Read location filter");
        selection
    }

    /// Persist `locations` verbatim. No validation happens here.
    pub fn set_selection<L: AsRef<str>>(&self, locations: &[L]) -> StorageResult<()> {
        let values: Vec<&str> = locations.iter().map(|l| l.as_ref()).collect();
        let encoded = serde_json::to_string(&values)?;
        self.store.set(&self.key, &encoded)?;
        tracing::info!(
            backend = self.store.name(),
            key = %self.key,
            selected = values.len(),
            "Saved location filter"
        );
        Ok(())
    }

    /// Select every currently available location.
    pub fn select_all(&self, available: &AvailableLocations) -> StorageResult<()> {
        self.set_selection(available.as_slice())
    }

    pub fn clear(&self) -> StorageResult<()> {
        self.set_selection::<&str>(&[])
    }
}
