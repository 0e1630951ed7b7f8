//! Closed vocabularies for enum-valued parameter fields and cue values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declares a snake_case vocabulary enum with `ALL`, `as_str`, `parse` and `label`.
macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every value in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical snake_case identifier.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Parse a canonical identifier. Hyphens and spaces are accepted in place of underscores.
            pub fn parse(value: &str) -> Option<Self> {
                let normalized = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
                match normalized.as_str() {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Human-readable form used in prompts ("push_in" -> "push in").
            pub fn label(&self) -> String {
                self.as_str().replace('_', " ")
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary!(
    /// Vertical/roll orientation of the camera.
    CameraAngle {
        EyeLevel => "eye_level",
        High => "high",
        Low => "low",
        Dutch => "dutch",
    }
);

vocabulary!(
    /// Camera motion during the shot.
    CameraMovement {
        Static => "static",
        PushIn => "push_in",
        PullOut => "pull_out",
        Pan => "pan",
        Tilt => "tilt",
        Dolly => "dolly",
    }
);

vocabulary!(
    TimeOfDay {
        GoldenHour => "golden_hour",
        BlueHour => "blue_hour",
        Day => "day",
        Midday => "midday",
        Night => "night",
    }
);

vocabulary!(
    LightingStyle {
        Soft => "soft",
        Dramatic => "dramatic",
        HighKey => "high_key",
        LowKey => "low_key",
        Natural => "natural",
    }
);

vocabulary!(
    LightDirection {
        Front => "front",
        Side => "side",
        Back => "back",
        Top => "top",
        Bottom => "bottom",
    }
);

vocabulary!(
    Palette {
        Warm => "warm",
        Cool => "cool",
        Desaturated => "desaturated",
        Vibrant => "vibrant",
        Neutral => "neutral",
    }
);

vocabulary!(
    Grading {
        Cinematic => "cinematic",
        Natural => "natural",
        Stylized => "stylized",
    }
);

vocabulary!(
    DepthOfField {
        Shallow => "shallow",
        Medium => "medium",
        Deep => "deep",
    }
);

vocabulary!(
    Framing {
        Wide => "wide",
        Medium => "medium",
        Tight => "tight",
    }
);

vocabulary!(
    /// Shot size detected from script text. Not a ParameterSet field; it drives fov and framing.
    ShotType {
        Wide => "wide",
        Medium => "medium",
        CloseUp => "close_up",
        ExtremeCloseUp => "extreme_close_up",
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrips_every_identifier() {
        for movement in CameraMovement::ALL {
            assert_eq!(CameraMovement::parse(movement.as_str()), Some(*movement));
        }
        for time in TimeOfDay::ALL {
            assert_eq!(TimeOfDay::parse(time.as_str()), Some(*time));
        }
    }

    #[test]
    fn parse_accepts_spaced_and_hyphenated_forms() {
        assert_eq!(CameraMovement::parse("Push In"), Some(CameraMovement::PushIn));
        assert_eq!(ShotType::parse("close-up"), Some(ShotType::CloseUp));
        assert_eq!(LightingStyle::parse("HIGH_KEY"), Some(LightingStyle::HighKey));
        assert_eq!(Palette::parse("sepia"), None);
    }

    #[test]
    fn label_replaces_underscores() {
        assert_eq!(TimeOfDay::GoldenHour.label(), "golden hour");
        assert_eq!(CameraAngle::Dutch.label(), "dutch");
    }

    #[test]
    fn serde_uses_snake_case_identifiers() {
        let json = serde_json::to_string(&CameraMovement::PullOut).unwrap();
        assert_eq!(json, "\"pull_out\"");
        let parsed: ShotType = serde_json::from_str("\"extreme_close_up\"").unwrap();
        assert_eq!(parsed, ShotType::ExtremeCloseUp);
    }
}
