//! Numeric bound enforcement for manually supplied values.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::field::{ParamField, ParamValue};
use crate::domain::AppError;

/// How out-of-range numeric overrides are handled. Enum values are always validated strictly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    /// Pull the value to the nearest bound.
    #[default]
    Clamp,
    /// Fail with `ParameterOutOfRange`.
    Reject,
}

impl BoundsPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clamp" => Some(BoundsPolicy::Clamp),
            "reject" => Some(BoundsPolicy::Reject),
            _ => None,
        }
    }
}

/// Apply `policy` to a value destined for `field`. Non-numeric values pass through.
pub fn enforce(
    field: ParamField,
    value: ParamValue,
    policy: BoundsPolicy,
) -> Result<ParamValue, AppError> {
    let Some((min, max)) = field.bounds() else {
        return Ok(value);
    };

    let numeric = match value {
        ParamValue::Integer(v) => v as f64,
        ParamValue::Float(v) => v,
        _ => return Ok(value),
    };

    if (min..=max).contains(&numeric) {
        return Ok(value);
    }

    match policy {
        BoundsPolicy::Reject => Err(AppError::ParameterOutOfRange {
            field: field.path().to_string(),
            value: numeric,
            min,
            max,
        }),
        BoundsPolicy::Clamp => {
            let clamped = match value {
                ParamValue::Integer(v) => ParamValue::Integer(v.clamp(min as i64, max as i64)),
                _ => ParamValue::Float(numeric.clamp(min, max)),
            };
            warn!(field = field.path(), value = numeric, %clamped, "clamped out-of-range override");
            Ok(clamped)
        }
    }
}

/// Clamp a field of view to its documented range.
pub fn clamp_fov(fov: i64) -> i64 {
    fov.clamp(15, 120)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_values_to_nearest_bound() {
        let value = enforce(ParamField::CameraFov, ParamValue::Integer(200), BoundsPolicy::Clamp);
        assert_eq!(value.unwrap(), ParamValue::Integer(120));

        let value =
            enforce(ParamField::LightingIntensity, ParamValue::Float(-0.5), BoundsPolicy::Clamp);
        assert_eq!(value.unwrap(), ParamValue::Float(0.0));
    }

    #[test]
    fn reject_reports_the_bound() {
        let err = enforce(ParamField::CameraElevation, ParamValue::Integer(60), BoundsPolicy::Reject)
            .unwrap_err();
        match err {
            AppError::ParameterOutOfRange { field, min, max, .. } => {
                assert_eq!(field, "camera.elevation");
                assert_eq!((min, max), (-45.0, 45.0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn in_range_and_unbounded_values_pass_through() {
        let value = enforce(ParamField::CameraFov, ParamValue::Integer(15), BoundsPolicy::Reject);
        assert_eq!(value.unwrap(), ParamValue::Integer(15));
        let value =
            enforce(ParamField::CompositionRuleOfThirds, ParamValue::Bool(false), BoundsPolicy::Reject);
        assert_eq!(value.unwrap(), ParamValue::Bool(false));
    }

    #[test]
    fn policy_parses_from_config_text() {
        assert_eq!(BoundsPolicy::parse("Reject"), Some(BoundsPolicy::Reject));
        assert_eq!(BoundsPolicy::parse("clip"), None);
    }
}
