//! Frame and storyboard records handed to the image service and the persistence layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::AppError;
use super::params::{ParameterOverrides, ParameterSet};
use super::prompt::ComposedPrompt;

/// Request record for the image generation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub negative_prompt: String,
    pub width: u32,
    pub height: u32,
}

impl GenerationRequest {
    pub fn new(prompt: &ComposedPrompt, width: u32, height: u32) -> Self {
        Self {
            prompt: prompt.prompt.clone(),
            negative_prompt: prompt.negative_prompt.clone(),
            width,
            height,
        }
    }
}

/// Outcome of the image call for one frame. Image bytes are stored beside the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FrameImage {
    Rendered {
        #[serde(skip)]
        bytes: Vec<u8>,
    },
    Failed {
        reason: String,
    },
}

impl FrameImage {
    pub fn is_rendered(&self) -> bool {
        matches!(self, FrameImage::Rendered { .. })
    }

    pub fn status(&self) -> &'static str {
        match self {
            FrameImage::Rendered { .. } => "rendered",
            FrameImage::Failed { .. } => "failed",
        }
    }
}

impl From<Result<Vec<u8>, AppError>> for FrameImage {
    fn from(result: Result<Vec<u8>, AppError>) -> Self {
        match result {
            Ok(bytes) => FrameImage::Rendered { bytes },
            Err(err) => FrameImage::Failed { reason: err.to_string() },
        }
    }
}

/// One generated visual result. `description` is a copy, not a reference to the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub scene_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub description: String,
    pub params: ParameterSet,
    /// Manual values the params were translated with.
    #[serde(default, skip_serializing_if = "ParameterOverrides::is_empty")]
    pub overrides: ParameterOverrides,
    pub prompt: ComposedPrompt,
    pub image: FrameImage,
}

/// Ordered frames plus the originating script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storyboard {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    pub frames: Vec<Frame>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Storyboard {
    pub fn new(
        name: Option<String>,
        script: Option<String>,
        frames: Vec<Frame>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let name = name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| default_name(created_at));
        let id = storyboard_id(&name, created_at, script.as_deref());
        Self { id, name, script, frames, created_at, updated_at: created_at }
    }

    pub fn frame(&self, scene_number: u32) -> Option<&Frame> {
        self.frames.iter().find(|frame| frame.scene_number == scene_number)
    }

    /// Swap in a new frame for the same scene, leaving every other frame untouched.
    pub fn replace_frame(&mut self, frame: Frame, at: DateTime<Utc>) -> Result<(), AppError> {
        let slot = self
            .frames
            .iter_mut()
            .find(|existing| existing.scene_number == frame.scene_number)
            .ok_or_else(|| AppError::FrameNotFound {
                storyboard: self.id.clone(),
                scene: frame.scene_number,
            })?;
        *slot = frame;
        self.updated_at = at;
        Ok(())
    }

    pub fn failed_scenes(&self) -> Vec<u32> {
        self.frames
            .iter()
            .filter(|frame| !frame.image.is_rendered())
            .map(|frame| frame.scene_number)
            .collect()
    }

    pub fn summary(&self) -> StoryboardSummary {
        StoryboardSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            frame_count: self.frames.len(),
            failed_count: self.failed_scenes().len(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Listing row for a stored storyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryboardSummary {
    pub id: String,
    pub name: String,
    pub frame_count: usize,
    pub failed_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn default_name(at: DateTime<Utc>) -> String {
    format!("Storyboard {}", at.format("%Y-%m-%d %H:%M"))
}

/// First 12 hex digits of SHA-256 over name, creation time and script.
pub fn storyboard_id(name: &str, created_at: DateTime<Utc>, script: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(b"\n");
    hasher.update(created_at.to_rfc3339().as_bytes());
    hasher.update(b"\n");
    hasher.update(script.unwrap_or_default().as_bytes());
    let digest = hasher.finalize();
    digest.iter().take(6).map(|byte| format!("{:02x}", byte)).collect()
}
