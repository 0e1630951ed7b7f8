//! storyframe: turn screenplay text into storyboard frames via a text-to-image service.
//!
//! The pure pipeline is split, extract, translate, compose. Image requests, persistence and
//! export live behind [`app::api`].

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{GenerateOptions, RegenerateOutcome, RetryOutcome, ScenePlan, StudioOptions};
pub use domain::cues::{extract, extract_from_text};
pub use domain::params::{Provenance, translate, translate_with_overrides};
pub use domain::prompt::compose;
pub use domain::script::split;
pub use domain::{
    AppError, BoundsPolicy, ComposedPrompt, CueCategory, CueSet, Frame, FrameImage,
    GenerationRequest, ParamField, ParamValue, ParameterOverrides, ParameterSet, Scene, Setting,
    Storyboard, StoryboardSummary, StudioConfig, Translation,
};
pub use ports::{ImageGenerator, MockImageGenerator, StoryboardStore};
