use super::CueSet;
use super::tables::{
    CAMERA_ANGLE_RULES, CAMERA_MOVEMENT_RULES, COLOR_PALETTE_RULES, DEPTH_OF_FIELD_RULES,
    LIGHTING_STYLE_RULES, LIGHTING_TIME_RULES, RuleTable, SHOT_TYPE_RULES,
};
use crate::domain::script::Scene;

/// First table entry whose keyword is contained in `haystack`. `haystack` must already be lowercase.
pub fn first_match<T: Copy>(haystack: &str, table: RuleTable<T>) -> Option<T> {
    table.iter().find(|(keyword, _)| haystack.contains(keyword)).map(|(_, value)| *value)
}

/// Scan free text for every cue category independently.
pub fn extract_from_text(text: &str) -> CueSet {
    let haystack = text.to_lowercase();
    CueSet {
        shot_type: first_match(&haystack, SHOT_TYPE_RULES),
        camera_angle: first_match(&haystack, CAMERA_ANGLE_RULES),
        camera_movement: first_match(&haystack, CAMERA_MOVEMENT_RULES),
        lighting_time: first_match(&haystack, LIGHTING_TIME_RULES),
        lighting_style: first_match(&haystack, LIGHTING_STYLE_RULES),
        color_palette: first_match(&haystack, COLOR_PALETTE_RULES),
        depth_of_field: first_match(&haystack, DEPTH_OF_FIELD_RULES),
    }
}

/// Detect cues in a scene's description.
pub fn extract(scene: &Scene) -> CueSet {
    extract_from_text(&scene.description)
}
