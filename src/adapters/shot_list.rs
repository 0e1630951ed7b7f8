//! Markdown shot-list rendering.

use std::path::Path;

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use super::embedded_assets::{SHOT_LIST_TEMPLATE, asset_text};
use crate::domain::prompt::{camera_summary, color_summary, composition_summary, lighting_summary};
use crate::domain::{AppError, Frame, FrameImage, Storyboard};

#[derive(Debug, Serialize)]
struct ShotListView<'a> {
    id: &'a str,
    name: &'a str,
    created_at: String,
    frames: Vec<FrameView<'a>>,
}

#[derive(Debug, Serialize)]
struct FrameView<'a> {
    scene_number: u32,
    location: Option<&'a str>,
    description: &'a str,
    camera: String,
    lighting: String,
    color: String,
    composition: String,
    overridden: String,
    prompt: &'a str,
    negative_prompt: &'a str,
    rendered: bool,
    image: Option<String>,
    reason: Option<&'a str>,
}

impl<'a> FrameView<'a> {
    fn new(frame: &'a Frame, image_dir: Option<&Path>) -> Self {
        let (image, reason) = match &frame.image {
            FrameImage::Rendered { .. } => (
                image_dir.map(|dir| {
                    dir.join(format!("scene_{:03}.png", frame.scene_number)).display().to_string()
                }),
                None,
            ),
            FrameImage::Failed { reason } => (None, Some(reason.as_str())),
        };

        Self {
            scene_number: frame.scene_number,
            location: frame.location.as_deref(),
            description: &frame.description,
            camera: format!("{}, fov {}°", camera_summary(&frame.params.camera), frame.params.camera.fov),
            lighting: format!(
                "{}, {} K, intensity {}",
                lighting_summary(&frame.params.lighting),
                frame.params.lighting.color_temperature,
                frame.params.lighting.intensity
            ),
            color: color_summary(&frame.params.color).unwrap_or_else(|| "neutral".to_string()),
            composition: composition_summary(&frame.params.composition),
            overridden: frame
                .overrides
                .iter()
                .map(|(field, value)| format!("{}={}", field, value))
                .collect::<Vec<_>>()
                .join(", "),
            prompt: &frame.prompt.prompt,
            negative_prompt: &frame.prompt.negative_prompt,
            rendered: frame.image.is_rendered(),
            image,
            reason,
        }
    }
}

/// Render a storyboard as a Markdown shot list. Rendered frames link into `image_dir` when given.
pub fn render_shot_list(storyboard: &Storyboard, image_dir: Option<&Path>) -> Result<String, AppError> {
    let source = asset_text(SHOT_LIST_TEMPLATE)?;

    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template(SHOT_LIST_TEMPLATE, source)
        .map_err(|err| template_error(SHOT_LIST_TEMPLATE, err))?;

    let view = ShotListView {
        id: &storyboard.id,
        name: &storyboard.name,
        created_at: storyboard.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        frames: storyboard.frames.iter().map(|frame| FrameView::new(frame, image_dir)).collect(),
    };

    env.get_template(SHOT_LIST_TEMPLATE)
        .and_then(|template| template.render(&view))
        .map_err(|err| template_error(SHOT_LIST_TEMPLATE, err))
}

fn template_error(template: &str, err: impl std::fmt::Display) -> AppError {
    AppError::Template { template: template.to_string(), reason: err.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::params::{ParameterOverrides, ParameterSet, translate};
    use crate::domain::cues::extract_from_text;
    use crate::domain::prompt::compose;
    use chrono::{TimeZone, Utc};

    fn storyboard() -> Storyboard {
        let description = "Wide shot, neon signs, camera slowly pushes in.";
        let params = translate(&extract_from_text(description));
        let rendered = Frame {
            scene_number: 1,
            location: Some("CITY STREET - NIGHT".into()),
            description: description.into(),
            prompt: compose(description, &params),
            params,
            overrides: ParameterOverrides::from_assignments(&["color.grading=stylized"]).unwrap(),
            image: FrameImage::Rendered { bytes: vec![1] },
        };
        let failed = Frame {
            scene_number: 2,
            location: None,
            description: String::new(),
            prompt: compose("", &ParameterSet::default()),
            params: ParameterSet::default(),
            overrides: ParameterOverrides::new(),
            image: FrameImage::Failed { reason: "quota exceeded".into() },
        };
        let at = Utc.with_ymd_and_hms(2026, 2, 3, 4, 5, 0).unwrap();
        Storyboard::new(Some("Night Shoot".into()), None, vec![rendered, failed], at)
    }

    #[test]
    fn renders_every_frame() {
        let markdown = render_shot_list(&storyboard(), Some(Path::new("boards/abc"))).unwrap();

        assert!(markdown.starts_with("# Night Shoot"));
        assert!(markdown.contains("created 2026-02-03 04:05 UTC with 2 frame(s)"));
        assert!(markdown.contains("## Scene 1: CITY STREET - NIGHT"));
        assert!(markdown.contains("| Camera | medium shot, push in, fov 45° |"));
        assert!(markdown.contains("| Manual | color.grading=stylized |"));
        assert!(markdown.contains("![Scene 1](boards/abc/scene_001.png)"));
        assert!(markdown.contains("## Scene 2\n"));
        assert!(markdown.contains("_No description._"));
        assert!(markdown.contains("**Image:** failed (quota exceeded)"));
        assert!(markdown.contains("**Negative prompt:** (none)"));
    }

    #[test]
    fn without_image_dir_rendered_frames_have_no_link() {
        let markdown = render_shot_list(&storyboard(), None).unwrap();
        assert!(!markdown.contains("!["));
        assert!(markdown.contains("**Image:** rendered"));
    }
}
