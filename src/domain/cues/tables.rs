//! Ordered keyword tables, one per cue category.
//!
//! Within a table the first entry whose keyword occurs in the lowercased description wins,
//! regardless of where the keyword appears in the text.

use crate::domain::params::{
    CameraAngle, CameraMovement, DepthOfField, LightingStyle, Palette, ShotType, TimeOfDay,
};

/// `(keyword, canonical value)` pairs in priority order.
pub type RuleTable<T> = &'static [(&'static str, T)];

pub const SHOT_TYPE_RULES: RuleTable<ShotType> = &[
    ("extreme close-up", ShotType::ExtremeCloseUp),
    ("extreme close up", ShotType::ExtremeCloseUp),
    ("close-up", ShotType::CloseUp),
    ("close up", ShotType::CloseUp),
    ("closeup", ShotType::CloseUp),
    ("tight shot", ShotType::CloseUp),
    ("medium shot", ShotType::Medium),
    ("mid shot", ShotType::Medium),
    ("two shot", ShotType::Medium),
    ("wide", ShotType::Wide),
    ("establishing", ShotType::Wide),
    ("long shot", ShotType::Wide),
    ("full shot", ShotType::Wide),
];

pub const CAMERA_ANGLE_RULES: RuleTable<CameraAngle> = &[
    ("high angle", CameraAngle::High),
    ("from above", CameraAngle::High),
    ("overhead", CameraAngle::High),
    ("bird's eye", CameraAngle::High),
    ("low angle", CameraAngle::Low),
    ("from below", CameraAngle::Low),
    ("looking up", CameraAngle::Low),
    ("worm's eye", CameraAngle::Low),
    ("dutch", CameraAngle::Dutch),
    ("tilted", CameraAngle::Dutch),
    ("canted", CameraAngle::Dutch),
    ("eye level", CameraAngle::EyeLevel),
    ("eye-level", CameraAngle::EyeLevel),
    ("straight on", CameraAngle::EyeLevel),
];

pub const CAMERA_MOVEMENT_RULES: RuleTable<CameraMovement> = &[
    ("push in", CameraMovement::PushIn),
    ("pushes in", CameraMovement::PushIn),
    ("push-in", CameraMovement::PushIn),
    ("pushing in", CameraMovement::PushIn),
    ("zoom in", CameraMovement::PushIn),
    ("pull out", CameraMovement::PullOut),
    ("pulls out", CameraMovement::PullOut),
    ("pull-out", CameraMovement::PullOut),
    ("pull back", CameraMovement::PullOut),
    ("pulls back", CameraMovement::PullOut),
    ("zoom out", CameraMovement::PullOut),
    ("pans", CameraMovement::Pan),
    ("panning", CameraMovement::Pan),
    ("pan across", CameraMovement::Pan),
    ("tilts up", CameraMovement::Tilt),
    ("tilt up", CameraMovement::Tilt),
    ("tilts down", CameraMovement::Tilt),
    ("tilt down", CameraMovement::Tilt),
    ("dolly", CameraMovement::Dolly),
    ("tracking", CameraMovement::Dolly),
    ("track", CameraMovement::Dolly),
];

pub const LIGHTING_TIME_RULES: RuleTable<TimeOfDay> = &[
    ("golden hour", TimeOfDay::GoldenHour),
    ("sunset", TimeOfDay::GoldenHour),
    ("sunrise", TimeOfDay::GoldenHour),
    ("magic hour", TimeOfDay::GoldenHour),
    ("blue hour", TimeOfDay::BlueHour),
    ("twilight", TimeOfDay::BlueHour),
    ("dusk", TimeOfDay::BlueHour),
    ("dawn", TimeOfDay::BlueHour),
    ("night", TimeOfDay::Night),
    ("midnight", TimeOfDay::Night),
    ("moonlight", TimeOfDay::Night),
    ("streetlight", TimeOfDay::Night),
    ("neon", TimeOfDay::Night),
    ("dark", TimeOfDay::Night),
    ("noon", TimeOfDay::Midday),
    ("midday", TimeOfDay::Midday),
    ("day", TimeOfDay::Day),
    ("daylight", TimeOfDay::Day),
    ("sunny", TimeOfDay::Day),
    ("bright", TimeOfDay::Day),
];

pub const LIGHTING_STYLE_RULES: RuleTable<LightingStyle> = &[
    ("high key", LightingStyle::HighKey),
    ("high-key", LightingStyle::HighKey),
    ("low key", LightingStyle::LowKey),
    ("low-key", LightingStyle::LowKey),
    ("dramatic", LightingStyle::Dramatic),
    ("harsh", LightingStyle::Dramatic),
    ("chiaroscuro", LightingStyle::Dramatic),
    ("hard light", LightingStyle::Dramatic),
    ("silhouette", LightingStyle::Dramatic),
    ("soft", LightingStyle::Soft),
    ("diffused", LightingStyle::Soft),
    ("overcast", LightingStyle::Soft),
    ("natural light", LightingStyle::Natural),
    ("available light", LightingStyle::Natural),
];

pub const COLOR_PALETTE_RULES: RuleTable<Palette> = &[
    ("warm", Palette::Warm),
    ("golden", Palette::Warm),
    ("orange", Palette::Warm),
    ("amber", Palette::Warm),
    ("cool", Palette::Cool),
    ("blue", Palette::Cool),
    ("cyan", Palette::Cool),
    ("teal", Palette::Cool),
    ("desaturated", Palette::Desaturated),
    ("muted", Palette::Desaturated),
    ("gray", Palette::Desaturated),
    ("grey", Palette::Desaturated),
    ("washed out", Palette::Desaturated),
    ("monochrome", Palette::Desaturated),
    ("vibrant", Palette::Vibrant),
    ("saturated", Palette::Vibrant),
    ("colorful", Palette::Vibrant),
    ("colourful", Palette::Vibrant),
];

/// Depth of field is only read when the text talks about depth or focus explicitly.
pub const DEPTH_OF_FIELD_RULES: RuleTable<DepthOfField> = &[
    ("shallow depth", DepthOfField::Shallow),
    ("shallow focus", DepthOfField::Shallow),
    ("deep depth", DepthOfField::Deep),
    ("deep focus", DepthOfField::Deep),
];
