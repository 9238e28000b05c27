//! [`PreferenceStore`] implementation that keeps preferences in a JSON file.
//!
//! The file holds one flat object of string values:
//!
//! ```json
//! {"tokenKey": "eyJhbGciOi...", "tokenKeyExpires": "1700000000000"}
//! ```

use log::warn;
use para_core::{Error, PreferenceStore, Result};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// FilePreferenceStore persists preferences into a single JSON file.
///
/// Every call reads the file again, so several stores pointing at the same
/// path in one process see each other's writes. Writes within one store are
/// serialized.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FilePreferenceStore {
    /// Create a store backed by `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(err.into()),
        };
        if content.is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_slice(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::unexpected(format!(
                "preference file {} does not contain a json object",
                self.path.display()
            ))),
        }
    }

    fn write_all(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_vec_pretty(map)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn save(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().expect("lock poisoned");

        let mut map = self.read_all()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_all(&map)
    }

    fn load(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().expect("lock poisoned");

        match self.read_all() {
            Ok(mut map) => match map.remove(key)? {
                Value::String(v) => Some(v),
                Value::Null => None,
                other => Some(other.to_string()),
            },
            Err(err) => {
                warn!(
                    "failed to read preference file {}: {err}",
                    self.path.display()
                );
                None
            }
        }
    }

    fn clear(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().expect("lock poisoned");

        let mut map = self.read_all()?;
        if map.remove(key).is_some() {
            self.write_all(&map)?;
        }
        Ok(())
    }
}
