use chrono::Utc;
use tracing::{info, warn};

use crate::app::AppContext;
use crate::domain::cues::extract_from_text;
use crate::domain::params::translate_with_overrides;
use crate::domain::prompt::compose;
use crate::domain::{
    AppError, Frame, FrameImage, GenerationRequest, ParamField, ParameterOverrides,
};
use crate::ports::{ImageGenerator, StoryboardStore};

#[derive(Debug, Clone)]
pub struct RegenerateOutcome {
    pub frame: Frame,
    /// Fields whose value differs from the replaced frame.
    pub changed: Vec<ParamField>,
}

/// Re-translate one frame with additional overrides and request a new image.
///
/// Overrides stored on the frame are kept; new values win on conflict.
/// Only the target frame is written back, so regenerations of other scenes running at the
/// same time are preserved.
pub fn execute<G, S>(
    ctx: &AppContext<G, S>,
    storyboard_id: &str,
    scene_number: u32,
    overrides: &ParameterOverrides,
) -> Result<RegenerateOutcome, AppError>
where
    G: ImageGenerator,
    S: StoryboardStore,
{
    let storyboard = ctx.store().load(storyboard_id)?;
    let previous = storyboard.frame(scene_number).cloned().ok_or_else(|| {
        AppError::FrameNotFound { storyboard: storyboard.id.clone(), scene: scene_number }
    })?;

    let merged = previous.overrides.merged_with(overrides);
    let cues = extract_from_text(&previous.description);
    let translation =
        translate_with_overrides(&cues, &merged, ctx.config().translation.out_of_range)?;
    let prompt = compose(&previous.description, &translation.params);

    let generation = &ctx.config().generation;
    let request = GenerationRequest::new(&prompt, generation.width, generation.height);
    let image = FrameImage::from(ctx.generator().generate(&request));
    if let FrameImage::Failed { reason } = &image {
        warn!(scene = scene_number, %reason, "image generation failed");
    }

    let changed = ParamField::ALL
        .into_iter()
        .filter(|field| previous.params.get(*field) != translation.params.get(*field))
        .collect();

    let frame = Frame {
        scene_number,
        location: previous.location,
        description: previous.description,
        params: translation.params,
        overrides: merged,
        prompt,
        image,
    };
    let storyboard = ctx
        .store()
        .update(storyboard_id, &mut |current| current.replace_frame(frame.clone(), Utc::now()))?;

    info!(id = %storyboard.id, scene = scene_number, "frame regenerated");
    Ok(RegenerateOutcome { frame, changed })
}
