//! Addressable fields of the parameter schema and their typed values.

use std::fmt;

use serde_json::Value;

use super::vocabulary::{
    CameraAngle, CameraMovement, DepthOfField, Framing, Grading, LightDirection, LightingStyle,
    Palette, TimeOfDay,
};
use crate::domain::AppError;

/// One leaf of the ParameterSet, addressed by a dotted path such as `camera.fov`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamField {
    CameraAngle,
    CameraFov,
    CameraElevation,
    CameraRotation,
    CameraMovement,
    LightingTimeOfDay,
    LightingStyle,
    LightingDirection,
    LightingIntensity,
    LightingColorTemperature,
    ColorPalette,
    ColorSaturation,
    ColorContrast,
    ColorGrading,
    CompositionRuleOfThirds,
    CompositionDepthOfField,
    CompositionFraming,
}

impl ParamField {
    /// All fields in schema order.
    pub const ALL: [ParamField; 17] = [
        ParamField::CameraAngle,
        ParamField::CameraFov,
        ParamField::CameraElevation,
        ParamField::CameraRotation,
        ParamField::CameraMovement,
        ParamField::LightingTimeOfDay,
        ParamField::LightingStyle,
        ParamField::LightingDirection,
        ParamField::LightingIntensity,
        ParamField::LightingColorTemperature,
        ParamField::ColorPalette,
        ParamField::ColorSaturation,
        ParamField::ColorContrast,
        ParamField::ColorGrading,
        ParamField::CompositionRuleOfThirds,
        ParamField::CompositionDepthOfField,
        ParamField::CompositionFraming,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            ParamField::CameraAngle => "camera.angle",
            ParamField::CameraFov => "camera.fov",
            ParamField::CameraElevation => "camera.elevation",
            ParamField::CameraRotation => "camera.rotation",
            ParamField::CameraMovement => "camera.movement",
            ParamField::LightingTimeOfDay => "lighting.time_of_day",
            ParamField::LightingStyle => "lighting.style",
            ParamField::LightingDirection => "lighting.direction",
            ParamField::LightingIntensity => "lighting.intensity",
            ParamField::LightingColorTemperature => "lighting.color_temperature",
            ParamField::ColorPalette => "color.palette",
            ParamField::ColorSaturation => "color.saturation",
            ParamField::ColorContrast => "color.contrast",
            ParamField::ColorGrading => "color.grading",
            ParamField::CompositionRuleOfThirds => "composition.rule_of_thirds",
            ParamField::CompositionDepthOfField => "composition.depth_of_field",
            ParamField::CompositionFraming => "composition.framing",
        }
    }

    /// Resolve a dotted path. Paths outside the schema are rejected.
    pub fn parse(path: &str) -> Result<Self, AppError> {
        let path = path.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.path() == path)
            .ok_or_else(|| AppError::UnknownParameterField(path.to_string()))
    }

    /// Inclusive numeric bound, for numeric fields only.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self {
            ParamField::CameraFov => Some((15.0, 120.0)),
            ParamField::CameraElevation => Some((-45.0, 45.0)),
            ParamField::CameraRotation => Some((-180.0, 180.0)),
            ParamField::LightingIntensity => Some((0.0, 1.0)),
            ParamField::LightingColorTemperature => Some((1000.0, 12000.0)),
            ParamField::ColorSaturation => Some((0.0, 1.0)),
            ParamField::ColorContrast => Some((0.0, 1.0)),
            _ => None,
        }
    }

    fn is_integer(&self) -> bool {
        matches!(
            self,
            ParamField::CameraFov
                | ParamField::CameraElevation
                | ParamField::CameraRotation
                | ParamField::LightingColorTemperature
        )
    }

    fn is_float(&self) -> bool {
        matches!(
            self,
            ParamField::LightingIntensity | ParamField::ColorSaturation | ParamField::ColorContrast
        )
    }

    /// Description of accepted values, used in error messages.
    pub fn expected(&self) -> String {
        fn names<T: Copy>(all: &[T], name: fn(&T) -> &'static str) -> String {
            format!("one of {}", all.iter().map(name).collect::<Vec<_>>().join(", "))
        }

        if let Some((min, max)) = self.bounds() {
            let kind = if self.is_integer() { "integer" } else { "number" };
            return format!("{} in [{}, {}]", kind, min, max);
        }

        match self {
            ParamField::CameraAngle => names(CameraAngle::ALL, CameraAngle::as_str),
            ParamField::CameraMovement => names(CameraMovement::ALL, CameraMovement::as_str),
            ParamField::LightingTimeOfDay => names(TimeOfDay::ALL, TimeOfDay::as_str),
            ParamField::LightingStyle => names(LightingStyle::ALL, LightingStyle::as_str),
            ParamField::LightingDirection => names(LightDirection::ALL, LightDirection::as_str),
            ParamField::ColorPalette => names(Palette::ALL, Palette::as_str),
            ParamField::ColorGrading => names(Grading::ALL, Grading::as_str),
            ParamField::CompositionDepthOfField => names(DepthOfField::ALL, DepthOfField::as_str),
            ParamField::CompositionFraming => names(Framing::ALL, Framing::as_str),
            _ => "true or false".to_string(),
        }
    }

    /// Parse a textual value (from `--set path=value`) into this field's type.
    pub fn parse_value(&self, raw: &str) -> Result<ParamValue, AppError> {
        let raw = raw.trim();
        let invalid = || AppError::invalid_value(self.path(), raw, self.expected());

        if self.is_integer() {
            return raw.parse::<i64>().map(ParamValue::Integer).map_err(|_| invalid());
        }
        if self.is_float() {
            return match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(ParamValue::Float(v)),
                _ => Err(invalid()),
            };
        }

        let parsed = match self {
            ParamField::CameraAngle => CameraAngle::parse(raw).map(ParamValue::Angle),
            ParamField::CameraMovement => CameraMovement::parse(raw).map(ParamValue::Movement),
            ParamField::LightingTimeOfDay => TimeOfDay::parse(raw).map(ParamValue::TimeOfDay),
            ParamField::LightingStyle => LightingStyle::parse(raw).map(ParamValue::Style),
            ParamField::LightingDirection => LightDirection::parse(raw).map(ParamValue::Direction),
            ParamField::ColorPalette => Palette::parse(raw).map(ParamValue::Palette),
            ParamField::ColorGrading => Grading::parse(raw).map(ParamValue::Grading),
            ParamField::CompositionDepthOfField => {
                DepthOfField::parse(raw).map(ParamValue::DepthOfField)
            }
            ParamField::CompositionFraming => Framing::parse(raw).map(ParamValue::Framing),
            ParamField::CompositionRuleOfThirds => parse_bool(raw).map(ParamValue::Bool),
            _ => None,
        };
        parsed.ok_or_else(invalid)
    }

    /// Convert a JSON leaf (from a partial ParameterSet document) into this field's type.
    pub fn value_from_json(&self, value: &Value) -> Result<ParamValue, AppError> {
        let invalid = || AppError::invalid_value(self.path(), value.to_string(), self.expected());

        match value {
            Value::String(text) => self.parse_value(text),
            Value::Bool(flag) if *self == ParamField::CompositionRuleOfThirds => {
                Ok(ParamValue::Bool(*flag))
            }
            Value::Number(number) if self.is_integer() => {
                if let Some(v) = number.as_i64() {
                    return Ok(ParamValue::Integer(v));
                }
                match number.as_f64() {
                    Some(v) if v.fract() == 0.0 && v.is_finite() => {
                        Ok(ParamValue::Integer(v as i64))
                    }
                    _ => Err(invalid()),
                }
            }
            Value::Number(number) if self.is_float() => {
                number.as_f64().map(ParamValue::Float).ok_or_else(invalid)
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// A typed value for one ParameterSet field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Angle(CameraAngle),
    Movement(CameraMovement),
    TimeOfDay(TimeOfDay),
    Style(LightingStyle),
    Direction(LightDirection),
    Palette(Palette),
    Grading(Grading),
    DepthOfField(DepthOfField),
    Framing(Framing),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl ParamValue {
    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Angle(v) => Value::from(v.as_str()),
            ParamValue::Movement(v) => Value::from(v.as_str()),
            ParamValue::TimeOfDay(v) => Value::from(v.as_str()),
            ParamValue::Style(v) => Value::from(v.as_str()),
            ParamValue::Direction(v) => Value::from(v.as_str()),
            ParamValue::Palette(v) => Value::from(v.as_str()),
            ParamValue::Grading(v) => Value::from(v.as_str()),
            ParamValue::DepthOfField(v) => Value::from(v.as_str()),
            ParamValue::Framing(v) => Value::from(v.as_str()),
            ParamValue::Integer(v) => Value::from(*v),
            ParamValue::Float(v) => Value::from(*v),
            ParamValue::Bool(v) => Value::from(*v),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Angle(v) => f.write_str(v.as_str()),
            ParamValue::Movement(v) => f.write_str(v.as_str()),
            ParamValue::TimeOfDay(v) => f.write_str(v.as_str()),
            ParamValue::Style(v) => f.write_str(v.as_str()),
            ParamValue::Direction(v) => f.write_str(v.as_str()),
            ParamValue::Palette(v) => f.write_str(v.as_str()),
            ParamValue::Grading(v) => f.write_str(v.as_str()),
            ParamValue::DepthOfField(v) => f.write_str(v.as_str()),
            ParamValue::Framing(v) => f.write_str(v.as_str()),
            ParamValue::Integer(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Bool(v) => write!(f, "{}", v),
        }
    }
}
