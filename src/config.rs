//! Configuration for label evaluation
//!
//! Defines the label-eval.toml schema. Every field has a default, so an
//! empty file (or no file at all) is a valid configuration.

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config location, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "label-eval.toml";

/// Evaluation run options loaded from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Treat the null ticker as a class in ticker macro-F1
    #[serde(default = "default_include_null_ticker")]
    pub include_null_ticker: bool,

    /// Print per-class tables after the summary
    #[serde(default)]
    pub pretty: bool,

    /// Print normalization resolution counts
    #[serde(default)]
    pub diagnostics: bool,

    /// Write the JSON report here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

fn default_include_null_ticker() -> bool { true }

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            include_null_ticker: default_include_null_ticker(),
            pretty: false,
            diagnostics: false,
            output: None,
        }
    }
}

impl EvalConfig {
    /// Load config from TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;
        toml::from_str(&content).map_err(|e| EvalError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load from default location (./label-eval.toml) or return defaults
    pub fn load_default() -> Result<Self> {
        let local_path = Path::new(DEFAULT_CONFIG_FILE);
        if local_path.exists() {
            return Self::load(local_path);
        }
        Ok(Self::default())
    }

    /// Save config to TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| EvalError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| EvalError::io(path, e))?;
        Ok(())
    }
}

/// Parse a permissive boolean flag value
///
/// `1`, `true`, `t`, `yes` and `y` (any case) are true; everything else is
/// false.
pub fn parse_bool_flag(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "1" | "true" | "t" | "yes" | "y"
    )
}
