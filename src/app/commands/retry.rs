use chrono::Utc;
use tracing::{debug, info};

use super::render::render_images;
use crate::app::AppContext;
use crate::domain::{AppError, ComposedPrompt, Frame, FrameImage, GenerationRequest};
use crate::ports::{ImageGenerator, StoryboardStore};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryOutcome {
    pub retried: Vec<u32>,
    pub still_failed: Vec<u32>,
}

impl RetryOutcome {
    pub fn recovered(&self) -> Vec<u32> {
        self.retried.iter().copied().filter(|scene| !self.still_failed.contains(scene)).collect()
    }
}

/// Re-request images for failed frames using their stored prompts.
///
/// Parameters are not re-translated. Nothing is saved when no frame failed. A retried image is
/// only stored if its frame still holds the same prompt and is still failed when the results
/// are written back.
pub fn execute<G, S>(ctx: &AppContext<G, S>, storyboard_id: &str) -> Result<RetryOutcome, AppError>
where
    G: ImageGenerator,
    S: StoryboardStore,
{
    let storyboard = ctx.store().load(storyboard_id)?;
    let failed: Vec<&Frame> =
        storyboard.frames.iter().filter(|frame| !frame.image.is_rendered()).collect();
    if failed.is_empty() {
        return Ok(RetryOutcome::default());
    }

    let generation = &ctx.config().generation;
    let requests: Vec<GenerationRequest> = failed
        .iter()
        .map(|frame| GenerationRequest::new(&frame.prompt, generation.width, generation.height))
        .collect();
    let images = render_images(ctx.generator(), &requests, generation.max_concurrent_requests)?;

    let retried: Vec<u32> = failed.iter().map(|frame| frame.scene_number).collect();
    let results: Vec<(u32, &ComposedPrompt, FrameImage)> = failed
        .iter()
        .zip(images)
        .map(|(frame, image)| (frame.scene_number, &frame.prompt, image))
        .collect();

    let updated = ctx.store().update(storyboard_id, &mut |current| {
        for (scene_number, prompt, image) in &results {
            let target = current.frames.iter_mut().find(|frame| {
                frame.scene_number == *scene_number
                    && frame.prompt == **prompt
                    && !frame.image.is_rendered()
            });
            match target {
                Some(frame) => frame.image = image.clone(),
                None => debug!(scene = *scene_number, "frame changed during retry; result dropped"),
            }
        }
        current.updated_at = Utc::now();
        Ok(())
    })?;

    let outcome = RetryOutcome { retried, still_failed: updated.failed_scenes() };
    info!(
        id = %updated.id,
        retried = outcome.retried.len(),
        still_failed = outcome.still_failed.len(),
        "retry finished"
    );
    Ok(outcome)
}
