//! Location-based filtering of checklist items.
//!
//! # Modules
//!
//! - `registry` - canonical location names and the unspecified marker
//! - `dataset` - typed group/category/item schema and location inheritance
//! - `counts` - per-location item counts
//! - `selection` - the persisted, read-time-validated selection
//! - `availability` - which locations are offered for selection
//! - `filter` - owning context, dropdown rows and item visibility
//! - `audit` - entries missing a `locations` field

pub mod audit;
pub mod availability;
pub mod counts;
pub mod dataset;
pub mod filter;
pub mod registry;
pub mod selection;

pub use audit::{audit_dataset_dir, audit_group, AuditConfig, AuditReport, MissingLocations};
pub use availability::AvailableLocations;
pub use counts::{compute_location_counts, LocationCounts};
pub use dataset::{
    Category, Dataset, DatasetError, DatasetResult, EffectiveLocations, Group, Item,
    LocationField, TextValue,
};
pub use filter::{is_visible, EmptySelectionPolicy, LocationFilter, LocationRow, UNSPECIFIED_LABEL};
pub use registry::{is_selectable, is_valid_location, ALL_LOCATIONS, UNSPECIFIED_LOCATION};
pub use selection::{FilterSelection, FilterStateStore, LOCAL_STORAGE_KEY};
