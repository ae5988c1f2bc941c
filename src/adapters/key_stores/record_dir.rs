use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::core::errors::{KeyboxError, Result};
use crate::core::models::key_record::KeyRecord;

const RECORD_EXTENSION: &str = "json";
const TOMBSTONE_SUFFIX: &str = "deleting";

/// Directory of JSON record files, one `<name>.json` per key.
///
/// Both key stores keep their records this way; they only differ in
/// what each file holds besides the `KeyRecord` fields. A missing
/// directory is an empty store.
#[derive(Debug, Clone)]
pub struct RecordDir {
    dir: PathBuf,
}

impl RecordDir {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the file holding `name`. Rejects unsafe names.
    pub fn record_path(&self, name: &str) -> Result<PathBuf> {
        KeyRecord::validate_name(name)?;
        Ok(self.dir.join(format!("{name}.{RECORD_EXTENSION}")))
    }

    /// Read and parse the file for `name`.
    pub fn read<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.record_path(name)?;
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => KeyboxError::NotFound {
                name: name.to_string(),
            },
            _ => store_io(&path, "read", e),
        })?;

        serde_json::from_str(&content).map_err(|e| KeyboxError::StoreIo {
            detail: format!("Corrupt key record {}: {e}", path.display()),
        })
    }

    /// Parse every record file in the directory, sorted by file name.
    ///
    /// Files with other extensions or invalid key names are ignored.
    pub fn read_all<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(store_io(&self.dir, "list", e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| store_io(&self.dir, "list", e))?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && KeyRecord::validate_name(stem).is_ok()
            {
                names.push(stem.to_string());
            }
        }
        names.sort();

        names.iter().map(|name| self.read(name)).collect()
    }

    /// Delete the file for `name`. Fails with `NotFound` if it is gone.
    pub fn remove(&self, name: &str) -> Result<()> {
        let path = self.record_path(name)?;
        std::fs::remove_file(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => KeyboxError::NotFound {
                name: name.to_string(),
            },
            _ => store_io(&path, "remove", e),
        })
    }

    /// Take `name` out of `read` and `read_all` by renaming its file to
    /// `<name>.json.deleting`. Undo with `restore`, complete with
    /// `finish_remove`.
    pub fn begin_remove(&self, name: &str) -> Result<()> {
        let path = self.record_path(name)?;
        let tombstone = self.tombstone_path(name)?;
        std::fs::rename(&path, &tombstone).map_err(|e| match e.kind() {
            ErrorKind::NotFound => KeyboxError::NotFound {
                name: name.to_string(),
            },
            _ => store_io(&path, "remove", e),
        })
    }

    /// Put a record taken out by `begin_remove` back in place.
    pub fn restore(&self, name: &str) -> Result<()> {
        let tombstone = self.tombstone_path(name)?;
        let path = self.record_path(name)?;
        std::fs::rename(&tombstone, &path).map_err(|e| store_io(&tombstone, "restore", e))
    }

    /// Delete the tombstone left by `begin_remove`.
    pub fn finish_remove(&self, name: &str) -> Result<()> {
        let tombstone = self.tombstone_path(name)?;
        match std::fs::remove_file(&tombstone) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_io(&tombstone, "remove", e)),
        }
    }

    fn tombstone_path(&self, name: &str) -> Result<PathBuf> {
        KeyRecord::validate_name(name)?;
        Ok(self
            .dir
            .join(format!("{name}.{RECORD_EXTENSION}.{TOMBSTONE_SUFFIX}")))
    }

    /// Write the file for `name`, creating the directory if needed.
    #[cfg(test)]
    pub fn write<T: serde::Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.record_path(name)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| store_io(&self.dir, "create", e))?;
        let json = serde_json::to_string_pretty(value).map_err(|e| KeyboxError::StoreIo {
            detail: format!("Failed to serialize key record: {e}"),
        })?;
        std::fs::write(&path, json).map_err(|e| store_io(&path, "write", e))
    }
}

fn store_io(path: &Path, action: &str, e: std::io::Error) -> KeyboxError {
    KeyboxError::StoreIo {
        detail: format!("Cannot {action} {}: {e}", path.display()),
    }
}
