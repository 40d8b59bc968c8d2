//! Property-based tests for the location filter
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `counts_props`: Tests for location aggregation
//!   - Unspecified count equals items without their own locations
//!   - Every item contributes once per resolved string location
//!   - Result does not depend on group order
//!
//! - `selection_props`: Tests for the persisted selection
//!   - Reads are always a subset of the registry plus the marker
//!   - Reads are idempotent
//!   - Writes are stored verbatim
//!
//! - `availability_props`: Tests for the availability constraint
//!   - Never empty
//!   - Only registry members, in candidate order
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable.

mod availability_props;
mod counts_props;
mod selection_props;

use proptest::prelude::*;

use crate::core::locations::{ALL_LOCATIONS, UNSPECIFIED_LOCATION};

/// Registry names, padded names, the marker and junk.
fn arb_location_like() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::sample::select(ALL_LOCATIONS.to_vec()).prop_map(str::to_string),
        2 => prop::sample::select(ALL_LOCATIONS.to_vec()).prop_map(|l| format!("  {l} ")),
        1 => Just(UNSPECIFIED_LOCATION.to_string()),
        2 => "[a-zA-Z ']{0,20}",
    ]
}
