//! `--config` file: logging level, schema override and output formatting.
//!
//! ```toml
//! log_level = "debug"
//! schema = "docs/htn-ir-schema.json"
//!
//! [output]
//! pretty = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct HtnConfig {
    /// Fallback filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Validate against this schema file instead of the embedded one.
    pub schema: Option<PathBuf>,
    pub output: OutputConfig,
}

impl Default for HtnConfig {
    fn default() -> Self {
        HtnConfig {
            log_level: "warn".to_string(),
            schema: None,
            output: OutputConfig::default(),
        }
    }
}

/// How `summary` and `attach` print JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct OutputConfig {
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig { pretty: true }
    }
}

/// Read and parse a config file; no path means defaults.
///
/// Returns a human-readable error string on failure.
pub(crate) fn load_config(path: Option<&Path>) -> Result<HtnConfig, String> {
    let Some(path) = path else {
        return Ok(HtnConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}
