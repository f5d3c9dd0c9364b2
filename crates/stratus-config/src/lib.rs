pub mod error;
pub mod settings;

pub use error::*;
pub use settings::{Features, IMPORT_EXISTING_ENV, Settings, TimeoutOverrides, parse_duration};

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable pointing directly at a settings file
pub const CONFIG_PATH_ENV: &str = "STRATUS_CONFIG_PATH";

const CONFIG_FILE: &str = "stratus.kdl";
const PROJECT_DIR: &str = ".stratus";

/// Global Stratus config directory (`<config_dir>/stratus`)
pub fn get_config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("stratus"))
}

/// Locate the settings file
///
/// Searched in order:
/// 1. `STRATUS_CONFIG_PATH`
/// 2. `./stratus.kdl`
/// 3. `./.stratus/stratus.kdl`
/// 4. `<config_dir>/stratus/stratus.kdl`
pub fn find_config_file() -> Result<PathBuf> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
        tracing::warn!("{} points at missing file {}", CONFIG_PATH_ENV, path.display());
    }

    let current_dir = std::env::current_dir()?;
    for path in [
        current_dir.join(CONFIG_FILE),
        current_dir.join(PROJECT_DIR).join(CONFIG_FILE),
    ] {
        if path.exists() {
            return Ok(path);
        }
    }

    if let Ok(config_dir) = get_config_dir() {
        let global_config = config_dir.join(CONFIG_FILE);
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(ConfigError::ConfigFileNotFound)
}

/// Install the global fmt subscriber
///
/// `RUST_LOG` wins over `default_level`. Calling this more than once is a
/// no-op.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
