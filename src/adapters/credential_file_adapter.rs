//! INI-file credential store adapter.
//!
//! Gateway credentials survive across sessions in a plain INI file under the
//! user's home directory, stored under the same key names the web deployment
//! used in browser local storage.

use crate::domain::error::WealthdeskError;
use crate::ports::store_port::StorePort;
use configparser::ini::Ini;
use std::fs;
use std::path::PathBuf;

/// INI section the gateway keys live under.
const SECTION: &str = "gateway";

pub struct CredentialFileAdapter {
    path: PathBuf,
}

impl CredentialFileAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `$HOME/.wealthdesk/credentials.ini`, or a dotfile in the working
    /// directory when `HOME` is unset.
    pub fn default_path() -> PathBuf {
        match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home)
                .join(".wealthdesk")
                .join("credentials.ini"),
            None => PathBuf::from(".wealthdesk-credentials.ini"),
        }
    }

    fn read_ini(&self) -> Result<Ini, WealthdeskError> {
        let mut config = Ini::new();
        if self.path.exists() {
            let content = fs::read_to_string(&self.path).map_err(|e| WealthdeskError::Storage {
                store: "credential".to_string(),
                reason: format!("could not read {}: {e}", self.path.display()),
            })?;
            config
                .read(content)
                .map_err(|e| WealthdeskError::Storage {
                    store: "credential".to_string(),
                    reason: format!("{} is not valid INI: {e}", self.path.display()),
                })?;
        }
        Ok(config)
    }

    fn write_ini(&self, config: &Ini) -> Result<(), WealthdeskError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| WealthdeskError::Storage {
                    store: "credential".to_string(),
                    reason: format!("could not create {}: {e}", parent.display()),
                })?;
            }
        }
        config.write(&self.path).map_err(|e| WealthdeskError::Storage {
            store: "credential".to_string(),
            reason: format!("could not write {}: {e}", self.path.display()),
        })
    }
}

impl StorePort for CredentialFileAdapter {
    fn get(&self, key: &str) -> Result<Option<String>, WealthdeskError> {
        Ok(self.read_ini()?.get(SECTION, key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), WealthdeskError> {
        let mut config = self.read_ini()?;
        config.set(SECTION, key, Some(value.to_string()));
        self.write_ini(&config)
    }

    fn clear(&self, key: &str) -> Result<(), WealthdeskError> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut config = self.read_ini()?;
        config.remove_key(SECTION, key);
        self.write_ini(&config)
    }
}
