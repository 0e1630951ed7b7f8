use std::fs;
use std::path::{Path, PathBuf};

use crate::adapters::embedded_assets::{DEFAULT_CONFIG, asset_text};
use crate::domain::AppError;
use crate::domain::config::CONFIG_FILE;

/// Write the default `storyframe.toml` into `root`. Existing files are never overwritten.
pub fn execute(root: &Path) -> Result<PathBuf, AppError> {
    let path = root.join(CONFIG_FILE);
    if path.exists() {
        return Err(AppError::config_error(format!(
            "{} already exists at {}",
            CONFIG_FILE,
            path.display()
        )));
    }
    fs::write(&path, asset_text(DEFAULT_CONFIG)?)?;
    Ok(path)
}
