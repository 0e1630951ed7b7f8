use chrono::Utc;
use tracing::info;

use super::render::render_images;
use super::translate::plan_scenes;
use crate::app::AppContext;
use crate::domain::script::split_bytes;
use crate::domain::{AppError, GenerationRequest, ParameterOverrides, Storyboard};
use crate::ports::{ImageGenerator, StoryboardStore};

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Storyboard name; a timestamped default is used when absent.
    pub name: Option<String>,
    pub overrides: ParameterOverrides,
}

/// Run the full pipeline for a script and persist the resulting storyboard.
///
/// Individual image failures are recorded on their frames; only script and
/// parameter errors abort the run.
pub fn execute<G, S>(
    ctx: &AppContext<G, S>,
    script: &[u8],
    options: &GenerateOptions,
) -> Result<Storyboard, AppError>
where
    G: ImageGenerator,
    S: StoryboardStore,
{
    let scenes = split_bytes(script)?;
    if scenes.is_empty() {
        return Err(AppError::EmptyScript);
    }

    let config = ctx.config();
    let plans = plan_scenes(&scenes, &options.overrides, config.translation.out_of_range)?;
    let requests: Vec<GenerationRequest> = plans
        .iter()
        .map(|plan| {
            GenerationRequest::new(&plan.prompt, config.generation.width, config.generation.height)
        })
        .collect();

    info!(scenes = plans.len(), "requesting frames");
    let images =
        render_images(ctx.generator(), &requests, config.generation.max_concurrent_requests)?;

    let frames = plans
        .into_iter()
        .zip(images)
        .map(|(plan, image)| plan.into_frame(options.overrides.clone(), image))
        .collect();

    let script_text = std::str::from_utf8(script)
        .ok()
        .map(|text| text.trim_start_matches('\u{feff}').to_string());
    let storyboard = Storyboard::new(options.name.clone(), script_text, frames, Utc::now());
    ctx.store().save(&storyboard)?;

    info!(
        id = %storyboard.id,
        frames = storyboard.frames.len(),
        failed = storyboard.failed_scenes().len(),
        "storyboard saved"
    );
    Ok(storyboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::params::{CameraMovement, Framing};
    use crate::domain::{FrameImage, StudioConfig};
    use crate::testing::{FakeImageGenerator, MemoryStoryboardStore};

    const SCRIPT: &str = "EXT. CITY STREET - NIGHT\n\nWide shot, neon signs, camera slowly pushes in.\n\n\
INT. APARTMENT - DAY\n\nClose-up on a coffee cup, soft morning light.\n\n\
EXT. ROOFTOP - DUSK\n\nBird's eye view of the skyline at golden hour.";

    fn context(generator: FakeImageGenerator) -> AppContext<FakeImageGenerator, MemoryStoryboardStore> {
        AppContext::new(generator, MemoryStoryboardStore::new(), StudioConfig::default())
    }

    #[test]
    fn generates_one_frame_per_scene_in_order() {
        let ctx = context(FakeImageGenerator::new());
        let storyboard = execute(&ctx, SCRIPT.as_bytes(), &GenerateOptions::default()).unwrap();

        let numbers: Vec<u32> = storyboard.frames.iter().map(|f| f.scene_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(storyboard.frames[0].params.camera.movement, CameraMovement::PushIn);
        assert_eq!(storyboard.frames[1].params.composition.framing, Framing::Tight);
        assert!(storyboard.frames.iter().all(|f| f.image.is_rendered()));
        assert_eq!(storyboard.script.as_deref(), Some(SCRIPT));
        assert!(ctx.store().get(&storyboard.id).is_some());
    }

    #[test]
    fn requests_use_configured_dimensions() {
        let ctx = context(FakeImageGenerator::new());
        execute(&ctx, SCRIPT.as_bytes(), &GenerateOptions::default()).unwrap();

        let requests = ctx.generator().get_requests();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.width == 1920 && r.height == 1080));
    }

    #[test]
    fn failed_image_does_not_abort_other_frames() {
        let ctx = context(FakeImageGenerator::failing_on("coffee cup"));
        let storyboard = execute(&ctx, SCRIPT.as_bytes(), &GenerateOptions::default()).unwrap();

        assert_eq!(storyboard.failed_scenes(), vec![2]);
        assert!(matches!(
            &storyboard.frames[1].image,
            FrameImage::Failed { reason } if reason.contains("simulated outage")
        ));
        assert!(storyboard.frames[0].image.is_rendered());
        assert!(storyboard.frames[2].image.is_rendered());
    }

    #[test]
    fn overrides_are_recorded_on_frames() {
        let ctx = context(FakeImageGenerator::new());
        let options = GenerateOptions {
            name: Some("Night Shoot".into()),
            overrides: ParameterOverrides::from_assignments(&["camera.fov=35"]).unwrap(),
        };
        let storyboard = execute(&ctx, SCRIPT.as_bytes(), &options).unwrap();

        assert_eq!(storyboard.name, "Night Shoot");
        for frame in &storyboard.frames {
            assert_eq!(frame.params.camera.fov, 35);
            assert_eq!(frame.overrides, options.overrides);
        }
    }

    #[test]
    fn empty_script_is_rejected() {
        let ctx = context(FakeImageGenerator::new());
        let result = execute(&ctx, b"  \n\n ", &GenerateOptions::default());
        assert!(matches!(result, Err(AppError::EmptyScript)));
        assert!(ctx.generator().get_requests().is_empty());
    }

    #[test]
    fn invalid_utf8_is_rejected_before_any_request() {
        let ctx = context(FakeImageGenerator::new());
        let result = execute(&ctx, b"INT. LAB\n\xff\xfe", &GenerateOptions::default());
        assert!(matches!(result, Err(AppError::MalformedScript { .. })));
        assert!(ctx.generator().get_requests().is_empty());
    }
}
