//! Parameter schema, manual overrides and the cue translator.

mod bounds;
mod field;
mod overrides;
mod schema;
mod translator;
mod vocabulary;

pub use bounds::{BoundsPolicy, clamp_fov, enforce};
pub use field::{ParamField, ParamValue};
pub use overrides::ParameterOverrides;
pub use schema::{
    CameraParams, ColorParams, CompositionParams, DEFAULT_COLOR_TEMPERATURE, DEFAULT_FOV,
    DEFAULT_INTENSITY, LightingParams, ParameterSet,
};
pub use translator::{MOVEMENT_FOV_DELTA, Provenance, Translation, translate, translate_with_overrides};
pub use vocabulary::{
    CameraAngle, CameraMovement, DepthOfField, Framing, Grading, LightDirection, LightingStyle,
    Palette, ShotType, TimeOfDay,
};
