use serde::{Deserialize, Serialize};

use super::inversions::inverted_phrases;
use crate::domain::params::{
    CameraAngle, CameraMovement, CameraParams, ColorParams, CompositionParams, DepthOfField,
    Grading, LightDirection, LightingParams, Palette, ParameterSet,
};

/// Positive and negative instructions for the image service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedPrompt {
    pub prompt: String,
    pub negative_prompt: String,
}

/// Render a description and its parameters into prompt text. Deterministic.
///
/// Sections appear in fixed order: description, camera, lighting, color, composition.
/// The description is kept verbatim apart from surrounding whitespace.
pub fn compose(description: &str, params: &ParameterSet) -> ComposedPrompt {
    let sections = [
        format!("Camera: {}", camera_summary(&params.camera)),
        format!("Lighting: {}", lighting_summary(&params.lighting)),
        color_summary(&params.color).map(|s| format!("Color: {}", s)).unwrap_or_default(),
        format!("Composition: {}", composition_summary(&params.composition)),
    ];
    let mut summary = sections.iter().filter(|s| !s.is_empty()).cloned().collect::<Vec<_>>().join(". ");
    summary.push('.');

    let description = description.trim();
    let prompt = if description.is_empty() {
        summary
    } else if ends_sentence(description) {
        format!("{} {}", description, summary)
    } else {
        format!("{}. {}", description, summary)
    };

    ComposedPrompt { prompt, negative_prompt: inverted_phrases(params).join(", ") }
}

fn ends_sentence(text: &str) -> bool {
    text.ends_with(['.', '!', '?', '\u{2026}'])
}

/// Shot size implied by a field of view.
pub fn shot_size(fov: i64) -> &'static str {
    if fov < 30 {
        "close-up shot"
    } else if fov < 50 {
        "medium shot"
    } else {
        "wide shot"
    }
}

pub fn camera_summary(camera: &CameraParams) -> String {
    let mut parts = Vec::new();
    if camera.angle != CameraAngle::EyeLevel {
        parts.push(format!("{} angle", camera.angle.label()));
    }
    parts.push(shot_size(camera.fov).to_string());
    if camera.movement != CameraMovement::Static {
        parts.push(camera.movement.label());
    }
    parts.join(", ")
}

pub fn lighting_summary(lighting: &LightingParams) -> String {
    let mut summary =
        format!("{}, {} lighting", lighting.time_of_day.label(), lighting.style.label());
    if lighting.direction != LightDirection::Front {
        summary.push_str(&format!(", {} light", lighting.direction.label()));
    }
    summary
}

/// `None` when palette and grading are both neutral.
pub fn color_summary(color: &ColorParams) -> Option<String> {
    let mut parts = Vec::new();
    if color.palette != Palette::Neutral {
        parts.push(format!("{} palette", color.palette.label()));
    }
    if color.grading != Grading::Natural {
        parts.push(format!("{} grading", color.grading.label()));
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}

pub fn composition_summary(composition: &CompositionParams) -> String {
    let mut parts = vec![format!("{} framing", composition.framing.label())];
    if composition.depth_of_field != DepthOfField::Medium {
        parts.push(format!("{} depth of field", composition.depth_of_field.label()));
    }
    if composition.rule_of_thirds {
        parts.push("rule of thirds".to_string());
    }
    parts.join(", ")
}
