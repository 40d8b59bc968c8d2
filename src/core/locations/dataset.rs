//! Typed checklist dataset schema.
//!
//! A dataset is an ordered list of [`Group`]s, each read from one JSON
//! document with a top-level `categories` array. Optional fields that may be
//! missing or carry an unexpected JSON type are modelled with explicit
//! variants instead of failing the whole document.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse dataset file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid dataset JSON for group '{group}': {source}")]
    InvalidGroup {
        group: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type DatasetResult<T> = std::result::Result<T, DatasetError>;

// ============================================================================
// Loose JSON values
// ============================================================================

/// A JSON value that is expected to be a string but may not be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Text(String),
    Other(serde_json::Value),
}

impl TextValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Other(_) => None,
        }
    }
}

impl From<&str> for TextValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// The `locations` field of a category or item.
///
/// Anything other than an array is kept as `Other` and treated as if no
/// locations were declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationField {
    List(Vec<TextValue>),
    Other(serde_json::Value),
}

impl LocationField {
    /// The declared entries, only when this is a non-empty array.
    pub fn non_empty(&self) -> Option<&[TextValue]> {
        match self {
            Self::List(entries) if !entries.is_empty() => Some(entries),
            _ => None,
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for LocationField {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(|s| TextValue::from(s.as_ref())).collect())
    }
}

/// `Some` whenever the key is present, so an explicit `null` is kept as a
/// value instead of reading as a missing field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// ============================================================================
// Schema
// ============================================================================

/// One checklist entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub locations: Option<LocationField>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<TextValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub locations: Option<LocationField>,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// A top-level partition of the dataset, normally one JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// File stem the group was loaded from. Not part of the document.
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Where an item's effective locations came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectiveLocations<'a> {
    /// The item's own non-empty `locations`.
    Item(&'a [TextValue]),
    /// Inherited from the category's non-empty `locations`.
    Category(&'a [TextValue]),
    /// Inherited from the category label.
    Label(&'a str),
    /// Nothing resolvable.
    Empty,
}

impl<'a> EffectiveLocations<'a> {
    /// String entries in declaration order. Non-string entries are skipped.
    pub fn names(&self) -> Vec<&'a str> {
        match *self {
            Self::Item(entries) | Self::Category(entries) => {
                entries.iter().filter_map(TextValue::as_text).collect()
            }
            Self::Label(label) => vec![label],
            Self::Empty => Vec::new(),
        }
    }
}

impl Item {
    pub fn with_locations<S: AsRef<str>>(locations: impl IntoIterator<Item = S>) -> Self {
        Self {
            locations: Some(locations.into_iter().collect()),
            ..Self::default()
        }
    }

    /// The item's own locations, if it declares a non-empty list.
    pub fn own_locations(&self) -> Option<&[TextValue]> {
        self.locations.as_ref().and_then(LocationField::non_empty)
    }

    /// True when the item itself did not specify any location, regardless of
    /// what the category could supply.
    pub fn is_unspecified(&self) -> bool {
        self.own_locations().is_none()
    }

    pub fn effective_locations<'a>(&'a self, category: &'a Category) -> EffectiveLocations<'a> {
        match self.own_locations() {
            Some(entries) => EffectiveLocations::Item(entries),
            None => category.fallback_locations(),
        }
    }
}

impl Category {
    pub fn new(label: &str) -> Self {
        Self {
            label: Some(TextValue::from(label)),
            ..Self::default()
        }
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn with_locations<S: AsRef<str>>(mut self, locations: impl IntoIterator<Item = S>) -> Self {
        self.locations = Some(locations.into_iter().collect());
        self
    }

    pub fn label_text(&self) -> Option<&str> {
        self.label.as_ref().and_then(TextValue::as_text)
    }

    /// Locations items of this category inherit: the category's own non-empty
    /// list, else its label when that is a string.
    pub fn fallback_locations(&self) -> EffectiveLocations<'_> {
        if let Some(entries) = self.locations.as_ref().and_then(LocationField::non_empty) {
            return EffectiveLocations::Category(entries);
        }
        match self.label_text() {
            Some(label) => EffectiveLocations::Label(label),
            None => EffectiveLocations::Empty,
        }
    }
}

impl Group {
    pub fn new(name: impl Into<String>, categories: Vec<Category>) -> Self {
        Self {
            name: name.into(),
            categories,
        }
    }

    /// Parse one group document.
    pub fn from_json_str(name: &str, json: &str) -> DatasetResult<Self> {
        let mut group: Group =
            serde_json::from_str(json).map_err(|source| DatasetError::InvalidGroup {
                group: name.to_string(),
                source,
            })?;
        group.name = name.to_string();
        Ok(group)
    }

    /// Read and parse a group document, naming the group after the file stem.
    pub fn from_path(path: &Path) -> DatasetResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut group: Group =
            serde_json::from_str(&contents).map_err(|source| DatasetError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        group.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(group)
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}

/// The full ordered dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub groups: Vec<Group>,
}

impl Dataset {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// Load `<dir>/<name>.json` for every name, in the given order.
    pub fn load_dir<S: AsRef<str>>(dir: &Path, files: &[S]) -> DatasetResult<Self> {
        let groups = files
            .iter()
            .map(|name| Group::from_path(&dir.join(format!("{}.json", name.as_ref()))))
            .collect::<DatasetResult<Vec<_>>>()?;
        tracing::debug!(dir = %dir.display(), groups = groups.len(), "Loaded dataset");
        Ok(Self { groups })
    }

    /// Every `(category, item)` pair in dataset order.
    pub fn entries(&self) -> impl Iterator<Item = (&Category, &Item)> {
        self.groups
            .iter()
            .flat_map(|g| g.categories.iter())
            .flat_map(|c| c.items.iter().map(move |i| (c, i)))
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(Group::item_count).sum()
    }
}

impl From<Vec<Group>> for Dataset {
    fn from(groups: Vec<Group>) -> Self {
        Self::new(groups)
    }
}
