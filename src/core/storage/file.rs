//! File-based key/value storage.
//!
//! Stores every key in one JSON object file, with:
//! - File permissions set to 0600 on Unix (owner read/write only)
//! - Parent directories created on first write
//! - Automatic `~` expansion to home directory
//! - Atomic writes via temp file + rename

use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::instrument;

use super::{KeyValueStore, StorageError, StorageResult};

/// Default state file name under the app data directory.
const STATE_FILE: &str = "state.json";

/// App-specific data directory name.
const APP_DIR: &str = "checklist-locations";

/// File permissions for the state file (Unix only): owner read/write.
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

type Entries = IndexMap<String, String>;

/// File-based key/value store.
///
/// # File Format
///
/// ```json
/// {
///   "locationFilter": "[\"Abyss\",\"__unspecified__\"]"
/// }
/// ```
///
/// Values are stored as opaque strings, so a value that is itself JSON is
/// double-encoded, exactly like browser local storage would hold it.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by `path` (supports `~` expansion).
    pub fn new<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = expand_tilde(path.as_ref())?;
        Ok(Self { path })
    }

    /// Store under the platform data directory,
    /// e.g. `~/.local/share/checklist-locations/state.json`.
    pub fn app_data_path() -> StorageResult<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| StorageError::config("Cannot determine data directory"))?;
        Ok(Self {
            path: dir.join(APP_DIR).join(STATE_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries. A missing, empty or whitespace-only file is empty.
    fn read_entries(&self) -> StorageResult<Entries> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(StorageError::Io(e)),
        };

        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| StorageError::corrupt(self.path.display().to_string(), e.to_string()))
    }

    /// Entries to rewrite on mutation. A corrupt file is discarded rather
    /// than making the store permanently unwritable.
    fn entries_for_update(&self) -> StorageResult<Entries> {
        match self.read_entries() {
            Err(StorageError::Corrupt { path, reason }) => {
                tracing::warn!(%path, %reason, "Discarding corrupt state file");
                Ok(Entries::new())
            }
            other => other,
        }
    }

    #[instrument(skip(self, entries), fields(path = %self.path.display()))]
    fn write_entries(&self, entries: &Entries) -> StorageResult<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let content = serde_json::to_string_pretty(entries)?;

        let mut temp = tempfile::NamedTempFile::new_in(&parent)?;
        temp.write_all(content.as_bytes())?;
        temp.flush()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(FILE_MODE);
            std::fs::set_permissions(temp.path(), perms)?;
        }

        temp.persist(&self.path).map_err(|e| {
            StorageError::backend(format!(
                "Failed to replace '{}': {}",
                self.path.display(),
                e.error
            ))
        })?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries_for_update()?;
        if entries.shift_remove(key).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// Expand `~` prefix to user's home directory.
fn expand_tilde(path: &Path) -> StorageResult<PathBuf> {
    // Only `~` and `~/...`; `~user` forms are left as written.
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };
    let home =
        dirs::home_dir().ok_or_else(|| StorageError::config("Cannot determine home directory"))?;
    if rest.as_os_str().is_empty() {
        Ok(home)
    } else {
        Ok(home.join(rest))
    }
}
