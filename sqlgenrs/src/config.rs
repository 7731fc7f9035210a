//! Configuration system for sqlgen.
//!
//! TOML-based; every section and key is optional and falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::composability::KeywordBoundary;
use crate::dialect::DialectKind;
use crate::error::{Result, SqlgenError};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SqlgenConfig {
    pub composability: ComposabilityConfig,
    pub rendering: RenderingConfig,
}

/// Raw SQL composability checks.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ComposabilityConfig {
    /// What may follow `SELECT` (default: lenient).
    pub keyword_boundary: KeywordBoundary,
}

/// SQL text rendering.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Identifier quoting and literal style (default: ansi).
    pub dialect: DialectKind,
}

impl SqlgenConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| SqlgenError::Config(format!("failed to parse config: {e}")))
    }

    /// Load from default locations (env var, cwd, user config dir, or defaults).
    ///
    /// Search order:
    /// 1. `SQLGEN_CONFIG` environment variable
    /// 2. `./sqlgen.toml` (current directory)
    /// 3. `~/.config/sqlgen/config.toml` (user config dir)
    /// 4. Built-in defaults
    pub fn load_default() -> Self {
        if let Ok(path) = std::env::var("SQLGEN_CONFIG") {
            match Self::from_file(&path) {
                Ok(cfg) => {
                    tracing::info!(path = %path, "loaded config from SQLGEN_CONFIG");
                    return cfg;
                }
                Err(e) => tracing::warn!(path = %path, error = %e, "ignoring SQLGEN_CONFIG"),
            }
        }

        if let Ok(cfg) = Self::from_file("sqlgen.toml") {
            tracing::info!("loaded config from ./sqlgen.toml");
            return cfg;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("sqlgen").join("config.toml");
            if let Ok(cfg) = Self::from_file(&user_config) {
                tracing::info!(path = %user_config.display(), "loaded config from user config dir");
                return cfg;
            }
        }

        tracing::debug!("no config file found, using defaults");
        Self::default()
    }
}
