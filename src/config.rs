//! Builder configuration.
//!
//! Precedence, lowest first: defaults, TOML file, environment.
//! - `QUERYKIT_ID_FALLBACK` = `reject` | `generate`
//! - `QUERYKIT_TEMPLATE_FORMAT` = `json` | `extended-json`
//! - `QUERYKIT_LOG_LEVEL` = `error` | `warn` | `info` | `debug` | `trace`

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::QueryError;
use crate::ident::IdFallback;
use crate::template::TextFormat;

pub const ENV_ID_FALLBACK: &str = "QUERYKIT_ID_FALLBACK";
pub const ENV_TEMPLATE_FORMAT: &str = "QUERYKIT_TEMPLATE_FORMAT";
pub const ENV_LOG_LEVEL: &str = "QUERYKIT_LOG_LEVEL";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    pub id_fallback: IdFallback,
    pub format: TextFormat,
    pub log_level: Option<String>,
}

impl BuilderConfig {
    /// # Errors
    /// Returns [`QueryError::Config`] if `s` is not a valid configuration table.
    pub fn from_toml_str(s: &str) -> Result<Self, QueryError> {
        toml::from_str(s).map_err(|e| QueryError::Config(e.to_string()))
    }

    /// # Errors
    /// Fails if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, QueryError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| QueryError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Overlays values taken from `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    /// Returns [`QueryError::Config`] for an unrecognised value.
    pub fn overlay<F>(mut self, lookup: F) -> Result<Self, QueryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_ID_FALLBACK) {
            self.id_fallback = v.parse()?;
        }
        if let Some(v) = lookup(ENV_TEMPLATE_FORMAT) {
            self.format = v.parse()?;
        }
        if let Some(v) = lookup(ENV_LOG_LEVEL) {
            self.log_level = Some(v);
        }
        Ok(self)
    }

    /// Overlays the process environment.
    ///
    /// # Errors
    /// Returns [`QueryError::Config`] for an unrecognised value.
    pub fn with_env(self) -> Result<Self, QueryError> {
        self.overlay(|k| std::env::var(k).ok())
    }

    /// Defaults, then `path` when given, then the environment.
    ///
    /// # Errors
    /// Fails if the file cannot be read or any source holds an invalid value.
    pub fn load(path: Option<&Path>) -> Result<Self, QueryError> {
        let base = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        let cfg = base.with_env()?;
        log::debug!(target: "querykit::config", "effective config: {cfg:?}");
        Ok(cfg)
    }
}
