use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::HexfieldError;
use crate::app::infrastructure::host::ConfigSource;

pub const CONFIG_NAMESPACE: &str = "hexfield";
pub const DEBOUNCE_KEY: &str = "hexfield.debounceMs";
const COLORS_PREFIX: &str = "hexfield.colors.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexfieldSettings {
    /// Color overrides keyed by color-class name (`overdue`, `projectTag`, ...).
    #[serde(default)]
    pub colors: BTreeMap<String, String>,

    /// Quiet period after the last edit before a re-scan runs.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    500
}

impl Default for HexfieldSettings {
    fn default() -> Self {
        Self {
            colors: BTreeMap::new(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl HexfieldSettings {
    /// Load settings from the user config dir, or defaults if missing/unreadable.
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Failed to parse settings: {e}. Using defaults.");
                    Self::default()
                }
            },
            Err(_) => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), HexfieldError> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), HexfieldError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(CONFIG_NAMESPACE);
        path.push("settings.json");
        path
    }
}

impl ConfigSource for HexfieldSettings {
    fn get_string(&self, key: &str) -> Option<String> {
        if key == DEBOUNCE_KEY {
            return Some(self.debounce_ms.to_string());
        }
        let name = key.strip_prefix(COLORS_PREFIX)?;
        self.colors.get(name).cloned()
    }
}

/// Namespaced configuration key for a color-class name.
pub fn color_key(name: &str) -> String {
    format!("{COLORS_PREFIX}{name}")
}
