//! Prompt composition from descriptions and parameter sets.

mod composer;
mod inversions;

pub use composer::{
    ComposedPrompt, camera_summary, color_summary, compose, composition_summary, lighting_summary,
    shot_size,
};
pub use inversions::{INVERSIONS, Inversion, inverted_phrases};
