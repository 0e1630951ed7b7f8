//! Configuration loading from the working directory.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::config::{CONFIG_FILE, parse_config_content};
use crate::domain::{AppError, StudioConfig};

/// Load `storyframe.toml`.
///
/// An explicit `config_path` must exist. Without one, `<root>/storyframe.toml` is used when present
/// and defaults apply otherwise.
pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<StudioConfig, AppError> {
    let path = match config_path {
        Some(path) if !path.is_file() => {
            return Err(AppError::config_error(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Some(path) => path.to_path_buf(),
        None => {
            let path = root.join(CONFIG_FILE);
            if !path.is_file() {
                debug!(root = %root.display(), "no config file, using defaults");
                return Ok(StudioConfig::default());
            }
            path
        }
    };

    debug!(path = %path.display(), "loading config");
    let content = fs::read_to_string(&path)?;
    parse_config_content(&content)
}
