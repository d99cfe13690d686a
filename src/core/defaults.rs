use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::paths;
use crate::utils::io;

/// Root configuration structure for csvrename.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CsvRenameConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// Policy defaults that can be overridden via csvrename.json.
///
/// Every field is optional in the file; CLI flags take precedence over
/// whatever is loaded here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Defaults {
    #[serde(default)]
    pub input_dir: Option<String>,

    #[serde(default)]
    pub output_dir: Option<String>,

    #[serde(default = "default_source_index")]
    pub source_index: usize,

    #[serde(default = "default_target_index")]
    pub target_index: usize,

    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    #[serde(default)]
    pub has_headers: bool,

    #[serde(default)]
    pub overwrite: bool,

    #[serde(default)]
    pub dirs: bool,

    #[serde(default)]
    pub nest_into_dirs: bool,

    #[serde(default = "default_strict_rows")]
    pub strict_rows: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            input_dir: None,
            output_dir: None,
            source_index: default_source_index(),
            target_index: default_target_index(),
            delimiter: default_delimiter(),
            has_headers: false,
            overwrite: false,
            dirs: false,
            nest_into_dirs: false,
            strict_rows: default_strict_rows(),
        }
    }
}

fn default_source_index() -> usize {
    0
}

fn default_target_index() -> usize {
    1
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_strict_rows() -> bool {
    true
}

// =============================================================================
// Loading
// =============================================================================

/// Load defaults from the config file, or built-in defaults when it is absent.
///
/// An unresolvable config location (no `HOME`) also means built-in defaults.
/// A config file that exists but fails to parse is an error rather than a
/// silent fallback.
pub fn load_defaults() -> crate::Result<Defaults> {
    let path = match paths::csvrename_json() {
        Ok(path) => path,
        Err(err) => {
            let reason = err.details["error"].as_str().unwrap_or(&err.message);
            log_status!("config", "{}. Using built-in defaults.", reason);
            return Ok(Defaults::default());
        }
    };
    Ok(load_config_from(&path)?.unwrap_or_default().defaults)
}

/// Load a config file from an explicit path. `Ok(None)` when it doesn't exist.
pub fn load_config_from(path: &Path) -> crate::Result<Option<CsvRenameConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = io::read_file(path, &format!("read {}", path.display()))?;

    let config: CsvRenameConfig = serde_json::from_str(&content)
        .map_err(|e| crate::Error::config_invalid_json(path.display().to_string(), e))?;

    Ok(Some(config))
}
