use include_dir::{Dir, include_dir};

use crate::domain::AppError;

static ASSETS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets");

pub const SHOT_LIST_TEMPLATE: &str = "shot_list.md.j2";
pub const DEFAULT_CONFIG: &str = "storyframe.toml";

/// Text of an embedded asset.
pub fn asset_text(name: &str) -> Result<&'static str, AppError> {
    let missing = |reason: &str| AppError::Template { template: name.to_string(), reason: reason.into() };
    ASSETS_DIR
        .get_file(name)
        .ok_or_else(|| missing("embedded asset not found"))?
        .contents_utf8()
        .ok_or_else(|| missing("embedded asset is not UTF-8"))
}
