//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/optree/optree.toml`
//! 3. Environment variables: `OPTREE_*` prefix

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::{TreeError, TreeResult};

/// Program settings; defaults for what the CLI flags can also switch on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Echo each intermediate tree during conversion
    pub echo_steps: bool,
    /// Wait for Enter between steps
    pub pause: bool,
}

impl Settings {
    /// Loads settings with the documented precedence. A missing global file
    /// is not an error.
    pub fn load() -> TreeResult<Self> {
        let mut builder = Config::builder();

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                builder = builder.add_source(File::from(path));
            }
        }

        let merged = builder
            .add_source(Environment::with_prefix("OPTREE").try_parsing(true))
            .build()
            .map_err(|e| TreeError::InternalError(e.to_string()))?;

        merged
            .try_deserialize()
            .map_err(|e| TreeError::InternalError(e.to_string()))
    }

    /// `$XDG_CONFIG_HOME/optree/optree.toml` (platform equivalent elsewhere).
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "optree").map(|dirs| dirs.config_dir().join("optree.toml"))
    }

    /// Serializes the merged settings for `config show`.
    pub fn to_toml(&self) -> TreeResult<String> {
        toml::to_string_pretty(self).map_err(|e| TreeError::InternalError(e.to_string()))
    }
}
