//! Pure parse/validate for `storyframe.toml`.

use super::StudioConfig;
use crate::domain::AppError;

/// Parse and validate configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<StudioConfig, AppError> {
    let config: StudioConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
