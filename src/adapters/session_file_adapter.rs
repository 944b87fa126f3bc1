//! JSON-file session store adapter.
//!
//! Plays the role the browser's per-tab session storage played for the web
//! dashboard: a small flat string map that does not outlive the session. Here
//! it is a JSON object file under the system temp directory, removed once the
//! last key is cleared.

use crate::domain::error::WealthdeskError;
use crate::ports::store_port::StorePort;
use log::debug;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

pub struct SessionFileAdapter {
    path: PathBuf,
}

impl SessionFileAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<system temp dir>/wealthdesk-session.json`.
    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join("wealthdesk-session.json")
    }

    fn read_map(&self) -> Result<Map<String, Value>, WealthdeskError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| WealthdeskError::Storage {
            store: "session".to_string(),
            reason: format!("could not read {}: {e}", self.path.display()),
        })?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        let value: Value =
            serde_json::from_str(&content).map_err(|e| WealthdeskError::Storage {
                store: "session".to_string(),
                reason: format!("{} is not valid JSON: {e}", self.path.display()),
            })?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(WealthdeskError::Storage {
                store: "session".to_string(),
                reason: format!("{} does not hold a JSON object", self.path.display()),
            }),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), WealthdeskError> {
        if map.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path).map_err(|e| WealthdeskError::Storage {
                    store: "session".to_string(),
                    reason: format!("could not remove {}: {e}", self.path.display()),
                })?;
            }
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&Value::Object(map.clone())).map_err(|e| {
            WealthdeskError::Storage {
                store: "session".to_string(),
                reason: format!("could not serialize session map: {e}"),
            }
        })?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| WealthdeskError::Storage {
                    store: "session".to_string(),
                    reason: format!("could not create {}: {e}", parent.display()),
                })?;
            }
        }
        fs::write(&self.path, json).map_err(|e| WealthdeskError::Storage {
            store: "session".to_string(),
            reason: format!("could not write {}: {e}", self.path.display()),
        })
    }
}

impl StorePort for SessionFileAdapter {
    fn get(&self, key: &str) -> Result<Option<String>, WealthdeskError> {
        let map = self.read_map()?;
        Ok(map
            .get(key)
            .and_then(|value| value.as_str().map(str::to_string)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), WealthdeskError> {
        // Overwrite semantics: a corrupt file does not block a fresh write.
        let mut map = self.read_map().unwrap_or_else(|err| {
            debug!("replacing unreadable session file: {err}");
            Map::new()
        });
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map)
    }

    fn clear(&self, key: &str) -> Result<(), WealthdeskError> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(err) => {
                debug!("removing unreadable session file: {err}");
                Map::new()
            }
        };
        map.remove(key);
        self.write_map(&map)
    }
}
