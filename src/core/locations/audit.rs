//! Report dataset entries that never declared a `locations` field.
//!
//! Only an absent field is reported; an explicit empty list or `null` counts
//! as a declaration. Any `id` key marks an entry, even `"id": null`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::dataset::{DatasetError, DatasetResult, Group};

/// Which dataset files the audit skips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Files whose name contains any of these substrings are skipped.
    pub exclude: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["scenes".to_string(), "journal".to_string()],
        }
    }
}

impl AuditConfig {
    fn includes(&self, file_name: &str) -> bool {
        file_name.ends_with(".json")
            && !file_name.ends_with(".schema.json")
            && !self.exclude.iter().any(|e| file_name.contains(e.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingLocations {
    pub file: String,
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub findings: Vec<MissingLocations>,
    /// Files that could not be read or parsed.
    pub skipped: Vec<PathBuf>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

fn display_id(id: &serde_json::Value) -> String {
    match id {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn display_description(description: Option<&serde_json::Value>) -> String {
    match description {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(other) => display_id(other),
    }
}

/// Findings for one parsed group, categories before their items.
pub fn audit_group(file: &str, group: &Group) -> Vec<MissingLocations> {
    let mut findings = Vec::new();
    let mut check = |id: Option<&serde_json::Value>,
                     description: Option<&serde_json::Value>,
                     declared: bool| {
        if let (Some(id), false) = (id, declared) {
            findings.push(MissingLocations {
                file: file.to_string(),
                id: display_id(id),
                description: display_description(description),
            });
        }
    };

    for category in &group.categories {
        check(
            category.id.as_ref(),
            category.description.as_ref(),
            category.locations.is_some(),
        );
        for item in &category.items {
            check(item.id.as_ref(), item.description.as_ref(), item.locations.is_some());
        }
    }
    findings
}

/// Audit every matching `*.json` file in `dir`, sorted by file name.
///
/// Only a failure to list the directory is an error; unreadable or invalid
/// files are logged and recorded in [`AuditReport::skipped`].
pub fn audit_dataset_dir(dir: &Path, config: &AuditConfig) -> DatasetResult<AuditReport> {
    let entries = std::fs::read_dir(dir).map_err(|source| DatasetError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<(String, PathBuf)> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            config.includes(&name).then(|| (name, entry.path()))
        })
        .collect();
    files.sort();

    let mut report = AuditReport::default();
    for (name, path) in files {
        match Group::from_path(&path) {
            Ok(group) => report.findings.extend(audit_group(&name, &group)),
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "Skipping dataset file");
                report.skipped.push(path);
            }
        }
    }

    tracing::info!(
        dir = %dir.display(),
        findings = report.findings.len(),
        skipped = report.skipped.len(),
        "Audited dataset"
    );
    Ok(report)
}
