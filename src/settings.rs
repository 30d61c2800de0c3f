//! Per-plugin settings: schema for the host UI and a key-value store to persist values.
//!
//! The file store keeps one TOML table per plugin id:
//!
//! ```toml
//! [mynovels]
//! hideLocked = true
//! ```

use crate::plugins::PluginError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A stored setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Text(String),
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            SettingValue::Text(_) => None,
        }
    }

    /// Parse a command-line value: `true`/`false`/`on`/`off` become booleans, anything else text.
    pub fn parse(raw: &str) -> SettingValue {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => SettingValue::Bool(true),
            "false" | "off" | "no" | "0" => SettingValue::Bool(false),
            _ => SettingValue::Text(raw.trim().to_string()),
        }
    }
}

/// Declared setting a plugin exposes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingDef {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    #[serde(flatten)]
    pub kind: SettingKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum SettingKind {
    Switch { default: bool },
}

/// Key-value storage collaborator for plugin settings.
pub trait SettingsStore {
    fn get(&self, plugin: &str, key: &str) -> Option<SettingValue>;
    fn set(&mut self, plugin: &str, key: &str, value: SettingValue) -> Result<(), PluginError>;

    fn get_bool(&self, plugin: &str, key: &str) -> Option<bool> {
        self.get(plugin, key).and_then(|v| v.as_bool())
    }
}

type Tables = BTreeMap<String, BTreeMap<String, SettingValue>>;

/// In-process store. Nothing is persisted.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    tables: Tables,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, plugin: &str, key: &str) -> Option<SettingValue> {
        self.tables.get(plugin).and_then(|t| t.get(key)).cloned()
    }

    fn set(&mut self, plugin: &str, key: &str, value: SettingValue) -> Result<(), PluginError> {
        self.tables
            .entry(plugin.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }
}

/// TOML file store. Every `set` rewrites the whole file.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    tables: Tables,
}

impl FileSettingsStore {
    /// Load from `path`. A missing file is an empty store; it is created on first `set`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PluginError> {
        let path = path.into();
        let tables = match std::fs::read_to_string(&path) {
            Ok(s) => toml::from_str(&s).map_err(|e| PluginError::Settings {
                reason: format!("invalid settings file {}: {}", path.display(), e),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Tables::new(),
            Err(e) => {
                return Err(PluginError::Settings {
                    reason: format!("cannot read {}: {}", path.display(), e),
                })
            }
        };
        Ok(Self { path, tables })
    }

    /// `$XDG_CONFIG_HOME/novelsource/settings.toml` (or the platform equivalent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("novelsource").join("settings.toml"))
    }

    fn save(&self) -> Result<(), PluginError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| PluginError::Settings {
                    reason: format!("cannot create {}: {}", parent.display(), e),
                })?;
            }
        }
        let s = toml::to_string(&self.tables).map_err(|e| PluginError::Settings {
            reason: e.to_string(),
        })?;
        std::fs::write(&self.path, s).map_err(|e| PluginError::Settings {
            reason: format!("cannot write {}: {}", self.path.display(), e),
        })
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, plugin: &str, key: &str) -> Option<SettingValue> {
        self.tables.get(plugin).and_then(|t| t.get(key)).cloned()
    }

    fn set(&mut self, plugin: &str, key: &str, value: SettingValue) -> Result<(), PluginError> {
        self.tables
            .entry(plugin.to_string())
            .or_default()
            .insert(key.to_string(), value);
        self.save()
    }
}
