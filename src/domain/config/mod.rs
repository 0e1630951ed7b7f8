pub mod parse;
mod studio;

pub use parse::parse_config_content;
pub use studio::{GenerationConfig, StorageConfig, StudioConfig, TranslationConfig};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "storyframe.toml";

/// Environment variable holding the image service token.
pub const API_TOKEN_ENV: &str = "STORYFRAME_API_TOKEN";
