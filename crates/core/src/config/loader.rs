//! Configuration file loader for `svckit.toml`.
//!
//! A missing file is not an error: the launcher then runs with the
//! built-in defaults (development backend on 9091, deploy target on 9092).
//! An unreadable or syntactically invalid file is reported as a typed
//! error instead of being silently replaced by defaults.

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::LauncherConfig;
use std::path::Path;

/// Name of the configuration file looked up under the project root.
pub const CONFIG_FILE: &str = "svckit.toml";

/// Loads the launcher configuration from `<root>/svckit.toml`.
///
/// # Arguments
///
/// * `root` - Project root directory
///
/// # Returns
///
/// The parsed and validated configuration, or the defaults when the file
/// does not exist.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - The file exists but cannot be read
/// - The file has invalid TOML syntax
/// - A configured value fails validation (zero port, empty command)
pub async fn load_config(root: &Path) -> ConfigResult<LauncherConfig> {
    let config_path = root.join(CONFIG_FILE);

    if !config_path.exists() {
        let config = LauncherConfig::default();
        config.validate()?;
        return Ok(config);
    }

    let content = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
        path: config_path.clone(),
        source,
    })?;

    let config: LauncherConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path,
            source,
        })?;

    config.validate()?;

    Ok(config)
}
