use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::locations::{AuditConfig, EmptySelectionPolicy, LOCAL_STORAGE_KEY};
use crate::core::logging::default_log_dir;
use crate::core::storage::{FileStore, StorageResult};

/// Dataset files in group order, without the `.json` extension.
pub const DEFAULT_DATASET_FILES: [&str; 8] = [
    "main",
    "essentials",
    "bosses",
    "mini-bosses",
    "completion",
    "wishes",
    "journal",
    "scenes",
];

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub storage: StorageConfig,
    pub filter: FilterConfig,
    pub audit: AuditConfig,
    pub logging: LoggingConfig,
}

/// Dataset location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the dataset JSON files.
    pub data_dir: Option<PathBuf>,
    /// Group files in dataset order.
    pub files: Vec<String>,
}

/// Where the filter state is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Override the default state file.
    pub state_file: Option<PathBuf>,
    /// Key the selection is stored under.
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Restrict the offered locations, e.g. to one game version's areas.
    pub available_locations: Option<Vec<String>>,
    pub empty_selection: EmptySelectionPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    /// Override the default log directory.
    pub log_dir: Option<PathBuf>,
    /// Also write JSON logs to a daily rolling file.
    pub json_file: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            files: DEFAULT_DATASET_FILES.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: None,
            key: LOCAL_STORAGE_KEY.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
            json_file: false,
        }
    }
}

impl LoggingConfig {
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(default_log_dir)
    }
}

/// Where a loaded [`AppConfig`] came from.
///
/// Loading runs before logging is set up, so the outcome is returned to the
/// caller and reported with [`ConfigSource::log`] once a subscriber exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Missing(PathBuf),
    Invalid { path: PathBuf, error: String },
}

impl ConfigSource {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }

    pub fn log(&self) {
        match self {
            Self::File(path) => log::info!("Loaded config from {}", path.display()),
            Self::Missing(path) => {
                log::debug!("No config file at {}, using defaults", path.display())
            }
            Self::Invalid { path, error } => log::warn!(
                "Failed to parse config at {}: {error}, using defaults",
                path.display()
            ),
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/checklist-locations/config.toml`.
    /// Falls back to `Default` if the file is missing or unparseable.
    pub fn load() -> (Self, ConfigSource) {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, with the same fallback.
    pub fn load_from(config_path: &Path) -> (Self, ConfigSource) {
        let path = config_path.to_path_buf();
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, ConfigSource::File(path)),
                Err(e) => (
                    Self::default(),
                    ConfigSource::Invalid {
                        path,
                        error: e.to_string(),
                    },
                ),
            },
            Err(_) => (Self::default(), ConfigSource::Missing(path)),
        }
    }

    /// Dataset directory (override or `./data`).
    pub fn data_dir(&self) -> PathBuf {
        self.data
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Store for the filter state (override or XDG data default).
    pub fn state_store(&self) -> StorageResult<FileStore> {
        match &self.storage.state_file {
            Some(path) => FileStore::new(path),
            None => FileStore::app_data_path(),
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("checklist-locations").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
