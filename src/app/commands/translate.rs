use rayon::prelude::*;

use crate::domain::cues::extract;
use crate::domain::params::{BoundsPolicy, translate_with_overrides};
use crate::domain::prompt::compose;
use crate::domain::script::split_bytes;
use crate::domain::{
    AppError, ComposedPrompt, Frame, FrameImage, ParameterOverrides, Scene, Translation,
};

/// Everything needed to request one frame, computed without I/O.
#[derive(Debug, Clone)]
pub struct ScenePlan {
    pub scene: Scene,
    pub translation: Translation,
    pub prompt: ComposedPrompt,
}

impl ScenePlan {
    pub fn into_frame(self, overrides: ParameterOverrides, image: FrameImage) -> Frame {
        Frame {
            scene_number: self.scene.number,
            location: self.scene.location,
            description: self.scene.description,
            params: self.translation.params,
            overrides,
            prompt: self.prompt,
            image,
        }
    }
}

/// Extract, translate and compose one scene.
pub fn plan_scene(
    scene: &Scene,
    overrides: &ParameterOverrides,
    policy: BoundsPolicy,
) -> Result<ScenePlan, AppError> {
    let cues = extract(scene);
    let translation = translate_with_overrides(&cues, overrides, policy)?;
    let prompt = compose(&scene.description, &translation.params);
    Ok(ScenePlan { scene: scene.clone(), translation, prompt })
}

/// Plan every scene in parallel. Output order matches scene order.
pub fn plan_scenes(
    scenes: &[Scene],
    overrides: &ParameterOverrides,
    policy: BoundsPolicy,
) -> Result<Vec<ScenePlan>, AppError> {
    scenes.par_iter().map(|scene| plan_scene(scene, overrides, policy)).collect()
}

pub fn execute(
    script: &[u8],
    overrides: &ParameterOverrides,
    policy: BoundsPolicy,
) -> Result<Vec<ScenePlan>, AppError> {
    let scenes = split_bytes(script)?;
    plan_scenes(&scenes, overrides, policy)
}
