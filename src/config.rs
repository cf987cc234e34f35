//! Configuration handling for the intake form

use crate::request::{OptionCatalog, SelectOption};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration for the intake form
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct IntakeConfig {
    /// Replacement list for the "Tipo de datos" multi-select
    pub data_type_options: Option<Vec<SelectOption>>,
    /// Replacement list for the "Periodicidad de la carga" select
    pub data_frequency_options: Option<Vec<SelectOption>>,
    /// Pretty-print submission payloads in the log
    pub pretty_payload: Option<bool>,
}

impl IntakeConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "datos-abiertos", "intake-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; a missing file yields defaults
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load configuration, falling back to defaults when the file is unreadable
    pub fn load_or_default() -> Self {
        Self::or_default(Self::load())
    }

    fn or_default(loaded: Result<Self>) -> Self {
        loaded.unwrap_or_else(|err| {
            tracing::warn!("Ignoring unreadable config: {err:#}");
            Self::default()
        })
    }

    /// Option catalog with any configured overrides applied.
    /// An empty override list is ignored.
    pub fn catalog(&self) -> OptionCatalog {
        let defaults = OptionCatalog::default();
        let pick = |configured: &Option<Vec<SelectOption>>, fallback: Vec<SelectOption>| {
            configured
                .as_ref()
                .filter(|options| !options.is_empty())
                .cloned()
                .unwrap_or(fallback)
        };
        OptionCatalog::new(
            pick(&self.data_type_options, defaults.data_types),
            pick(&self.data_frequency_options, defaults.data_frequencies),
        )
    }

    pub fn pretty_payload(&self) -> bool {
        self.pretty_payload.unwrap_or(false)
    }
}
