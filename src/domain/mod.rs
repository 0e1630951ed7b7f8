pub mod config;
pub mod cues;
pub mod error;
pub mod frame;
pub mod params;
pub mod prompt;
pub mod script;

pub use config::{GenerationConfig, StorageConfig, StudioConfig, TranslationConfig};
pub use cues::{CueCategory, CueSet};
pub use error::AppError;
pub use frame::{Frame, FrameImage, GenerationRequest, Storyboard, StoryboardSummary};
pub use params::{BoundsPolicy, ParamField, ParamValue, ParameterOverrides, ParameterSet, Translation};
pub use prompt::ComposedPrompt;
pub use script::{Scene, Setting};
