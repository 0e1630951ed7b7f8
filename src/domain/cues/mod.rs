//! Keyword-detected visual cues.

mod extractor;
pub mod tables;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;
use crate::domain::params::{
    CameraAngle, CameraMovement, DepthOfField, LightingStyle, Palette, ShotType, TimeOfDay,
};

pub use extractor::{extract, extract_from_text, first_match};

/// The independently scanned cue categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CueCategory {
    ShotType,
    CameraAngle,
    CameraMovement,
    LightingTime,
    LightingStyle,
    ColorPalette,
    DepthOfField,
}

impl CueCategory {
    pub const ALL: [CueCategory; 7] = [
        CueCategory::ShotType,
        CueCategory::CameraAngle,
        CueCategory::CameraMovement,
        CueCategory::LightingTime,
        CueCategory::LightingStyle,
        CueCategory::ColorPalette,
        CueCategory::DepthOfField,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CueCategory::ShotType => "shot_type",
            CueCategory::CameraAngle => "camera_angle",
            CueCategory::CameraMovement => "camera_movement",
            CueCategory::LightingTime => "lighting_time",
            CueCategory::LightingStyle => "lighting_style",
            CueCategory::ColorPalette => "color_palette",
            CueCategory::DepthOfField => "depth_of_field",
        }
    }

    pub fn parse(name: &str) -> Result<Self, AppError> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == name)
            .ok_or_else(|| AppError::UnknownCueCategory(name.to_string()))
    }
}

impl fmt::Display for CueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sparse mapping from cue category to detected canonical value.
///
/// Undetected categories are absent from the serialized form, never null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CueSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_type: Option<ShotType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_angle: Option<CameraAngle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_movement: Option<CameraMovement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting_time: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting_style: Option<LightingStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_palette: Option<Palette>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_of_field: Option<DepthOfField>,
}

impl CueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical value detected for `category`, if any.
    pub fn get(&self, category: CueCategory) -> Option<&'static str> {
        match category {
            CueCategory::ShotType => self.shot_type.map(|v| v.as_str()),
            CueCategory::CameraAngle => self.camera_angle.map(|v| v.as_str()),
            CueCategory::CameraMovement => self.camera_movement.map(|v| v.as_str()),
            CueCategory::LightingTime => self.lighting_time.map(|v| v.as_str()),
            CueCategory::LightingStyle => self.lighting_style.map(|v| v.as_str()),
            CueCategory::ColorPalette => self.color_palette.map(|v| v.as_str()),
            CueCategory::DepthOfField => self.depth_of_field.map(|v| v.as_str()),
        }
    }

    /// Number of detected categories.
    pub fn len(&self) -> usize {
        CueCategory::ALL.iter().filter(|c| self.get(**c).is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Detected `(category, value)` pairs in category order.
    pub fn entries(&self) -> Vec<(CueCategory, &'static str)> {
        CueCategory::ALL.iter().filter_map(|c| self.get(*c).map(|v| (*c, v))).collect()
    }

    /// Set a category from its textual name and canonical value.
    pub fn insert(&mut self, category: &str, value: &str) -> Result<(), AppError> {
        let category = CueCategory::parse(category)?;
        let invalid = || AppError::invalid_value(category.as_str(), value, "a known cue value");
        match category {
            CueCategory::ShotType => self.shot_type = Some(ShotType::parse(value).ok_or_else(invalid)?),
            CueCategory::CameraAngle => {
                self.camera_angle = Some(CameraAngle::parse(value).ok_or_else(invalid)?)
            }
            CueCategory::CameraMovement => {
                self.camera_movement = Some(CameraMovement::parse(value).ok_or_else(invalid)?)
            }
            CueCategory::LightingTime => {
                self.lighting_time = Some(TimeOfDay::parse(value).ok_or_else(invalid)?)
            }
            CueCategory::LightingStyle => {
                self.lighting_style = Some(LightingStyle::parse(value).ok_or_else(invalid)?)
            }
            CueCategory::ColorPalette => {
                self.color_palette = Some(Palette::parse(value).ok_or_else(invalid)?)
            }
            CueCategory::DepthOfField => {
                self.depth_of_field = Some(DepthOfField::parse(value).ok_or_else(invalid)?)
            }
        }
        Ok(())
    }
}
