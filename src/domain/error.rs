use std::io;

use thiserror::Error;

/// Library-wide error type for storyframe operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// JSON encoding or decoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Required environment variable is not set.
    #[error("Environment variable '{0}' is not set")]
    EnvironmentVariableMissing(String),

    /// Script input is not decodable text.
    #[error("Script is not valid UTF-8 text (invalid byte sequence at offset {offset})")]
    MalformedScript { offset: usize },

    /// Script produced no scenes at all.
    #[error("No scenes found in script")]
    EmptyScript,

    /// Cue category name is not one of the known categories.
    #[error(
        "Unknown cue category '{0}': must be one of shot_type, camera_angle, camera_movement, lighting_time, lighting_style, color_palette, depth_of_field"
    )]
    UnknownCueCategory(String),

    /// Override references a field path outside the parameter schema.
    #[error("Unknown parameter field '{0}'")]
    UnknownParameterField(String),

    /// Value cannot be used for the given field.
    #[error("Invalid value '{value}' for '{field}': expected {expected}")]
    InvalidParameterValue { field: String, value: String, expected: String },

    /// Numeric override outside its documented bound (strict validation only).
    #[error("Value {value} for '{field}' is out of range [{min}, {max}]")]
    ParameterOutOfRange { field: String, value: f64, min: f64, max: f64 },

    /// Image generation service failure.
    #[error("Image generation failed: {message}")]
    ImageGeneration { message: String, status: Option<u16> },

    /// No storyboard with the given identifier.
    #[error("Storyboard '{0}' not found")]
    StoryboardNotFound(String),

    /// Storyboard has no frame for the given scene.
    #[error("Storyboard '{storyboard}' has no frame for scene {scene}")]
    FrameNotFound { storyboard: String, scene: u32 },

    /// Template rendering failure.
    #[error("Template error in '{template}': {reason}")]
    Template { template: String, reason: String },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        AppError::InvalidParameterValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}
