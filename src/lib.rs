/// Checklist Locations - location filter for game checklist datasets
///
/// Core library computing per-location item counts over a nested
/// group/category/item dataset and keeping a persisted, validated
/// location selection for the checklist renderer.

pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub use crate::core::locations::{
    compute_location_counts, is_valid_location, AvailableLocations, Dataset, FilterSelection,
    FilterStateStore, LocationCounts, LocationFilter, ALL_LOCATIONS, UNSPECIFIED_LOCATION,
};
pub use crate::core::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
