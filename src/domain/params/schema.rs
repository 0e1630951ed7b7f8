//! The complete, schema-conformant visual specification for one frame.

use serde::{Deserialize, Serialize};

use super::field::{ParamField, ParamValue};
use super::vocabulary::{
    CameraAngle, CameraMovement, DepthOfField, Framing, Grading, LightDirection, LightingStyle,
    Palette, TimeOfDay,
};

pub const DEFAULT_FOV: i64 = 50;
pub const DEFAULT_INTENSITY: f64 = 0.7;
pub const DEFAULT_COLOR_TEMPERATURE: i64 = 5600;

/// Camera placement and motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraParams {
    pub angle: CameraAngle,
    /// Field of view in degrees, within [15, 120].
    pub fov: i64,
    /// Degrees within [-45, 45].
    pub elevation: i64,
    /// Roll in degrees within [-180, 180].
    pub rotation: i64,
    pub movement: CameraMovement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightingParams {
    pub time_of_day: TimeOfDay,
    pub style: LightingStyle,
    pub direction: LightDirection,
    /// Within [0, 1].
    pub intensity: f64,
    /// Kelvin.
    pub color_temperature: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorParams {
    pub palette: Palette,
    pub saturation: f64,
    pub contrast: f64,
    pub grading: Grading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositionParams {
    pub rule_of_thirds: bool,
    pub depth_of_field: DepthOfField,
    pub framing: Framing,
}

/// Every field always holds a value; consumers never need null checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterSet {
    pub camera: CameraParams,
    pub lighting: LightingParams,
    pub color: ColorParams,
    pub composition: CompositionParams,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            camera: CameraParams {
                angle: CameraAngle::EyeLevel,
                fov: DEFAULT_FOV,
                elevation: 0,
                rotation: 0,
                movement: CameraMovement::Static,
            },
            lighting: LightingParams {
                time_of_day: TimeOfDay::Day,
                style: LightingStyle::Natural,
                direction: LightDirection::Front,
                intensity: DEFAULT_INTENSITY,
                color_temperature: DEFAULT_COLOR_TEMPERATURE,
            },
            color: ColorParams {
                palette: Palette::Neutral,
                saturation: 0.7,
                contrast: 0.6,
                grading: Grading::Natural,
            },
            composition: CompositionParams {
                rule_of_thirds: true,
                depth_of_field: DepthOfField::Medium,
                framing: Framing::Medium,
            },
        }
    }
}

impl ParameterSet {
    /// Read a single field by schema path.
    pub fn get(&self, field: ParamField) -> ParamValue {
        match field {
            ParamField::CameraAngle => ParamValue::Angle(self.camera.angle),
            ParamField::CameraFov => ParamValue::Integer(self.camera.fov),
            ParamField::CameraElevation => ParamValue::Integer(self.camera.elevation),
            ParamField::CameraRotation => ParamValue::Integer(self.camera.rotation),
            ParamField::CameraMovement => ParamValue::Movement(self.camera.movement),
            ParamField::LightingTimeOfDay => ParamValue::TimeOfDay(self.lighting.time_of_day),
            ParamField::LightingStyle => ParamValue::Style(self.lighting.style),
            ParamField::LightingDirection => ParamValue::Direction(self.lighting.direction),
            ParamField::LightingIntensity => ParamValue::Float(self.lighting.intensity),
            ParamField::LightingColorTemperature => {
                ParamValue::Integer(self.lighting.color_temperature)
            }
            ParamField::ColorPalette => ParamValue::Palette(self.color.palette),
            ParamField::ColorSaturation => ParamValue::Float(self.color.saturation),
            ParamField::ColorContrast => ParamValue::Float(self.color.contrast),
            ParamField::ColorGrading => ParamValue::Grading(self.color.grading),
            ParamField::CompositionRuleOfThirds => {
                ParamValue::Bool(self.composition.rule_of_thirds)
            }
            ParamField::CompositionDepthOfField => {
                ParamValue::DepthOfField(self.composition.depth_of_field)
            }
            ParamField::CompositionFraming => ParamValue::Framing(self.composition.framing),
        }
    }

    /// True when every numeric field lies within its documented bound.
    pub fn is_within_bounds(&self) -> bool {
        ParamField::ALL.iter().all(|field| match (field.bounds(), self.get(*field)) {
            (Some((min, max)), ParamValue::Integer(v)) => (min..=max).contains(&(v as f64)),
            (Some((min, max)), ParamValue::Float(v)) => (min..=max).contains(&v),
            _ => true,
        })
    }

    /// Write a single field. Returns false, leaving the set untouched, when `value` does not fit
    /// the field's type.
    pub(crate) fn apply(&mut self, field: ParamField, value: ParamValue) -> bool {
        match (field, value) {
            (ParamField::CameraAngle, ParamValue::Angle(v)) => self.camera.angle = v,
            (ParamField::CameraFov, ParamValue::Integer(v)) => self.camera.fov = v,
            (ParamField::CameraElevation, ParamValue::Integer(v)) => self.camera.elevation = v,
            (ParamField::CameraRotation, ParamValue::Integer(v)) => self.camera.rotation = v,
            (ParamField::CameraMovement, ParamValue::Movement(v)) => self.camera.movement = v,
            (ParamField::LightingTimeOfDay, ParamValue::TimeOfDay(v)) => {
                self.lighting.time_of_day = v
            }
            (ParamField::LightingStyle, ParamValue::Style(v)) => self.lighting.style = v,
            (ParamField::LightingDirection, ParamValue::Direction(v)) => self.lighting.direction = v,
            (ParamField::LightingIntensity, ParamValue::Float(v)) => self.lighting.intensity = v,
            (ParamField::LightingColorTemperature, ParamValue::Integer(v)) => {
                self.lighting.color_temperature = v
            }
            (ParamField::ColorPalette, ParamValue::Palette(v)) => self.color.palette = v,
            (ParamField::ColorSaturation, ParamValue::Float(v)) => self.color.saturation = v,
            (ParamField::ColorContrast, ParamValue::Float(v)) => self.color.contrast = v,
            (ParamField::ColorGrading, ParamValue::Grading(v)) => self.color.grading = v,
            (ParamField::CompositionRuleOfThirds, ParamValue::Bool(v)) => {
                self.composition.rule_of_thirds = v
            }
            (ParamField::CompositionDepthOfField, ParamValue::DepthOfField(v)) => {
                self.composition.depth_of_field = v
            }
            (ParamField::CompositionFraming, ParamValue::Framing(v)) => {
                self.composition.framing = v
            }
            _ => return false,
        }
        true
    }
}
