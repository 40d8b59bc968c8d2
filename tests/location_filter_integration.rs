//! Integration tests for the location filter.
//!
//! These tests drive the public API the way the checklist front-end does:
//! load a dataset directory, compute counts, persist a selection to an
//! on-disk state file and read it back in a fresh filter.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test location_filter_integration
//! ```

use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use checklist_locations::config::{AppConfig, ConfigSource};
use checklist_locations::core::locations::{
    audit_dataset_dir, AuditConfig, Dataset, FilterStateStore, LocationFilter, ALL_LOCATIONS,
    UNSPECIFIED_LOCATION,
};
use checklist_locations::core::storage::{FileStore, KeyValueStore};

fn write_json(dir: &Path, name: &str, value: serde_json::Value) {
    std::fs::write(dir.join(format!("{name}.json")), value.to_string())
        .expect("Failed to write dataset file");
}

/// Dataset directory with two groups.
fn dataset_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    write_json(
        dir.path(),
        "main",
        json!({
            "categories": [
                {
                    "label": "Wisp Thicket",
                    "items": [
                        { "id": "a", "locations": ["Abyss"] },
                        { "id": "b" }
                    ]
                }
            ]
        }),
    );
    write_json(
        dir.path(),
        "bosses",
        json!({
            "categories": [
                {
                    "label": "Bosses",
                    "locations": ["Slab", "Cradle"],
                    "items": [
                        { "id": "c" },
                        { "id": "d", "locations": ["Abyss", "Old Place"] }
                    ]
                }
            ]
        }),
    );
    dir
}

fn file_filter(state: &Path) -> LocationFilter<FileStore> {
    let store = FileStore::new(state).expect("Failed to create file store");
    LocationFilter::new(FilterStateStore::new(store))
}

#[test]
fn test_end_to_end_counts() {
    let dir = dataset_dir();
    let dataset = Dataset::load_dir(dir.path(), &["main"]).expect("Failed to load dataset");

    let counts = dataset.location_counts();
    assert_eq!(counts.get("Abyss"), 1);
    assert_eq!(counts.get("Wisp Thicket"), 1);
    assert_eq!(counts.locations.len(), 2);
    assert_eq!(counts.unspecified, 1);
}

#[test]
fn test_counts_across_groups_in_configured_order() {
    let dir = dataset_dir();
    let dataset =
        Dataset::load_dir(dir.path(), &["main", "bosses"]).expect("Failed to load dataset");

    assert_eq!(dataset.groups[0].name, "main");
    assert_eq!(dataset.groups[1].name, "bosses");

    let counts = dataset.location_counts();
    assert_eq!(counts.get("Abyss"), 2);
    assert_eq!(counts.get("Slab"), 1);
    assert_eq!(counts.get("Cradle"), 1);
    assert_eq!(counts.get("Bosses"), 0);
    assert_eq!(counts.unspecified, 2);

    let unknown: Vec<_> = counts.unknown_locations().map(|(name, _)| name).collect();
    assert_eq!(unknown, vec!["Old Place"]);
}

#[test]
fn test_missing_group_file_is_an_error() {
    let dir = dataset_dir();
    let result = Dataset::load_dir(dir.path(), &["main", "wishes"]);
    assert!(result.is_err());
}

#[test]
fn test_selection_survives_a_new_session() {
    let state_dir = TempDir::new().unwrap();
    let state = state_dir.path().join("state.json");

    let filter = file_filter(&state);
    filter
        .set_selection(&["Abyss", "not-a-real-place", "  Slab  "])
        .unwrap();

    let reopened = file_filter(&state);
    assert_eq!(reopened.selection().to_vec(), vec!["Abyss", "Slab"]);

    let raw = reopened.state().raw().unwrap().unwrap();
    assert!(raw.contains("not-a-real-place"));
    assert!(raw.contains("  Slab  "));
}

#[test]
fn test_corrupt_state_file_reads_empty_and_recovers() {
    let state_dir = TempDir::new().unwrap();
    let state = state_dir.path().join("state.json");
    std::fs::write(&state, "definitely not json").unwrap();

    let filter = file_filter(&state);
    assert!(filter.selection().is_empty());

    filter.toggle(UNSPECIFIED_LOCATION, true).unwrap();
    assert!(file_filter(&state).selection().includes_unspecified());
}

#[test]
fn test_malformed_value_under_key_reads_empty() {
    let state_dir = TempDir::new().unwrap();
    let state = state_dir.path().join("state.json");
    let store = FileStore::new(&state).unwrap();
    store.set("locationFilter", "{\"Abyss\": 1}").unwrap();

    assert!(file_filter(&state).selection().is_empty());
}

#[test]
fn test_restricted_availability_and_visibility() {
    let dir = dataset_dir();
    let dataset =
        Dataset::load_dir(dir.path(), &["main", "bosses"]).expect("Failed to load dataset");
    let state_dir = TempDir::new().unwrap();

    let mut filter = file_filter(&state_dir.path().join("state.json"));
    filter.set_available_locations(Some(&["Slab", "bogus", "Cradle"][..]));
    assert_eq!(filter.available().as_slice(), &["Slab", "Cradle"]);

    filter.select_all().unwrap();
    let visible: Vec<_> = filter
        .visible_items(&dataset)
        .into_iter()
        .filter_map(|(_, item)| item.id.as_ref().and_then(|id| id.as_str()))
        .collect();
    assert_eq!(visible, vec!["c"]);

    filter.set_available_locations(Some::<&[&str]>(&[]));
    assert_eq!(filter.available().len(), ALL_LOCATIONS.len());
}

#[test]
fn test_audit_reports_missing_locations() {
    let dir = dataset_dir();
    let report = audit_dataset_dir(dir.path(), &AuditConfig::default()).unwrap();

    let ids: Vec<_> = report
        .findings
        .iter()
        .map(|f| (f.file.as_str(), f.id.as_str()))
        .collect();
    assert_eq!(ids, vec![("bosses.json", "c"), ("main.json", "b")]);
}

#[test]
fn test_config_drives_filter() {
    let config_dir = TempDir::new().unwrap();
    let state = config_dir.path().join("state.json");
    let config_path = config_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "[storage]\nstate_file = {:?}\nkey = \"custom\"\n\n[filter]\navailable_locations = [\"Abyss\"]\n",
            state.display().to_string()
        ),
    )
    .unwrap();

    let (config, source) = AppConfig::load_from(&config_path);
    assert!(!source.is_invalid());
    let store = config.state_store().unwrap();
    let mut filter = LocationFilter::new(FilterStateStore::with_key(store, config.storage.key.clone()));
    filter.set_available_locations(config.filter.available_locations.as_deref());
    filter.select_all().unwrap();

    let raw = FileStore::new(&state).unwrap().get("custom").unwrap();
    assert_eq!(raw.as_deref(), Some("[\"Abyss\"]"));
}

#[test]
fn test_broken_config_reports_parse_failure() {
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("config.toml");
    std::fs::write(&config_path, "data = [[[").unwrap();

    let (config, source) = AppConfig::load_from(&config_path);
    assert_eq!(config, AppConfig::default());
    assert!(matches!(source, ConfigSource::Invalid { ref path, .. } if *path == config_path));
}
