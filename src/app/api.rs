//! API Facade for the application.
//!
//! Glues configuration loading, adapter construction and command execution together so the CLI
//! and library callers share one entry point per operation.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::adapters::{FilesystemStoryboardStore, HttpImageClient};
use crate::app::config::load_config;
use crate::app::{
    AppContext,
    commands::{export, generate, init, regenerate, retry, scenes, storyboards, translate},
};
use crate::domain::StudioConfig;
use crate::ports::{ImageGenerator, MockImageGenerator};

pub use crate::app::commands::generate::GenerateOptions;
pub use crate::app::commands::regenerate::RegenerateOutcome;
pub use crate::app::commands::retry::RetryOutcome;
pub use crate::app::commands::translate::ScenePlan;
pub use crate::domain::{
    AppError, ParameterOverrides, Scene, Storyboard, StoryboardSummary,
};

/// Where to find configuration and storage, and whether to call the real service.
#[derive(Debug, Clone)]
pub struct StudioOptions {
    pub root: PathBuf,
    /// Explicit config file; `<root>/storyframe.toml` is used when absent.
    pub config_path: Option<PathBuf>,
    /// Serve placeholder images instead of calling the image service.
    pub mock: bool,
}

impl StudioOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), config_path: None, mock: false }
    }

    /// Options rooted at the current directory.
    pub fn current() -> Result<Self, AppError> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn load_config(&self) -> Result<StudioConfig, AppError> {
        load_config(&self.root, self.config_path.as_deref())
    }
}

fn create_store(options: &StudioOptions, config: &StudioConfig) -> FilesystemStoryboardStore {
    FilesystemStoryboardStore::new(options.root.join(&config.storage.output_dir))
}

fn create_generator(
    config: &StudioConfig,
    mock: bool,
) -> Result<Box<dyn ImageGenerator>, AppError> {
    if mock {
        debug!("using mock image generator");
        return Ok(Box::new(MockImageGenerator));
    }
    Ok(Box::new(HttpImageClient::from_env_with_config(&config.generation)?))
}

/// Create an `AppContext` for the given options.
fn create_context(
    options: &StudioOptions,
) -> Result<AppContext<Box<dyn ImageGenerator>, FilesystemStoryboardStore>, AppError> {
    let config = options.load_config()?;
    let generator = create_generator(&config, options.mock)?;
    let store = create_store(options, &config);
    Ok(AppContext::new(generator, store, config))
}

fn open_store(options: &StudioOptions) -> Result<FilesystemStoryboardStore, AppError> {
    let config = options.load_config()?;
    Ok(create_store(options, &config))
}

// =============================================================================
// Pipeline API
// =============================================================================

/// Split a script into scenes with detected cues.
pub fn scenes(script: &[u8]) -> Result<Vec<Scene>, AppError> {
    scenes::execute(script)
}

/// Translate every scene of a script without requesting images.
pub fn translate(
    options: &StudioOptions,
    script: &[u8],
    overrides: &ParameterOverrides,
) -> Result<Vec<ScenePlan>, AppError> {
    let config = options.load_config()?;
    translate::execute(script, overrides, config.translation.out_of_range)
}

/// Generate and save a storyboard for a script.
pub fn generate(
    options: &StudioOptions,
    script: &[u8],
    generate_options: &GenerateOptions,
) -> Result<Storyboard, AppError> {
    let ctx = create_context(options)?;
    generate::execute(&ctx, script, generate_options)
}

/// Re-translate one frame with extra overrides and request a new image for it.
pub fn regenerate(
    options: &StudioOptions,
    id: &str,
    scene_number: u32,
    overrides: &ParameterOverrides,
) -> Result<RegenerateOutcome, AppError> {
    let ctx = create_context(options)?;
    regenerate::execute(&ctx, id, scene_number, overrides)
}

/// Re-request images for every failed frame of a storyboard.
pub fn retry(options: &StudioOptions, id: &str) -> Result<RetryOutcome, AppError> {
    let ctx = create_context(options)?;
    retry::execute(&ctx, id)
}

// =============================================================================
// Storyboard API
// =============================================================================

pub fn list(options: &StudioOptions) -> Result<Vec<StoryboardSummary>, AppError> {
    storyboards::list(&open_store(options)?)
}

pub fn show(options: &StudioOptions, id: &str) -> Result<Storyboard, AppError> {
    storyboards::show(&open_store(options)?, id)
}

pub fn delete(options: &StudioOptions, id: &str) -> Result<(), AppError> {
    storyboards::delete(&open_store(options)?, id)
}

/// Render a saved storyboard as a Markdown shot list, optionally writing it to `output`.
pub fn export(
    options: &StudioOptions,
    id: &str,
    output: Option<&Path>,
) -> Result<String, AppError> {
    let store = open_store(options)?;
    let image_dir = store.storyboard_dir(id);
    export::execute(&store, id, Some(&image_dir), output)
}

/// Write the default configuration file into `root`.
pub fn init_at(root: &Path) -> Result<PathBuf, AppError> {
    init::execute(root)
}
