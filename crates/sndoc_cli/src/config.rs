//! CLI configuration loaded from YAML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use sndoc_core::{DocumentData, User};
use sndoc_validate::{ReportFormat, ValidationMode};

/// Locations searched, relative to the working directory, when no config
/// file is given explicitly.
pub const CONFIG_CANDIDATES: &[&str] = &["config/sndoc.yaml", "sndoc.yaml"];

/// Per-user config location, relative to the home directory.
pub const HOME_CONFIG: &str = ".sndoc/config.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SndocConfig {
    pub validation: ValidationSettings,
    pub defaults: DocumentDefaults,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidationSettings {
    pub mode: ValidationMode,
    pub format: ReportFormat,
}

/// Values filled into document data that lacks them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DocumentDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientDefaults>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl DocumentDefaults {
    /// Insert every default whose key is absent from `data`. Existing keys are
    /// never touched. Returns the keys that were filled.
    pub fn apply(&self, data: &mut DocumentData) -> Vec<&'static str> {
        let mut filled = Vec::new();

        if let Some(version) = &self.version {
            if !data.contains_key("version") {
                data.insert("version".to_string(), Value::String(version.clone()));
                filled.push("version");
            }
        }

        if let Some(author) = &self.author {
            if !data.contains_key("author") {
                data.insert("author".to_string(), author.to_value());
                filled.push("author");
            }
        }

        if let Some(client) = &self.client {
            if !data.contains_key("client") {
                let mut map = serde_json::Map::new();
                if let Some(name) = &client.name {
                    map.insert("name".to_string(), Value::String(name.clone()));
                }
                if let Some(department) = &client.department {
                    map.insert("department".to_string(), Value::String(department.clone()));
                }
                data.insert("client".to_string(), Value::Object(map));
                filled.push("client");
            }
        }

        filled
    }
}

impl SndocConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // An empty file means every setting keeps its default.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// First existing config file under `base`, then under `home`.
    pub fn discover(base: &Path, home: Option<&Path>) -> Option<PathBuf> {
        CONFIG_CANDIDATES
            .iter()
            .map(|candidate| base.join(candidate))
            .chain(home.map(|home| home.join(HOME_CONFIG)))
            .find(|path| path.is_file())
    }

    /// Load the explicit config file, or the first discovered one.
    ///
    /// Explicit files must exist and parse. A discovered file that fails to
    /// load is reported and replaced by the defaults.
    pub fn load(explicit: Option<&Path>, base: &Path, home: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        let Some(path) = Self::discover(base, home) else {
            debug!("No config file found, using defaults");
            return Ok(Self::default());
        };

        debug!("Loading config from {}", path.display());
        match Self::from_file(&path) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("{}; using default configuration", e);
                Ok(Self::default())
            }
        }
    }
}
