use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::domain::{AppError, FrameImage, Storyboard, StoryboardSummary};
use crate::ports::StoryboardStore;

const STORYBOARDS_DIR: &str = "storyboards";
const RECORD_FILE: &str = "storyboard.json";

/// Serializes writers within this process. Held across load-modify-write in `update`.
static WRITE_LOCK: Mutex<()> = Mutex::new(());

fn write_lock() -> MutexGuard<'static, ()> {
    WRITE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Filesystem-based storyboard store.
///
/// Layout: `<root>/storyboards/<id>/storyboard.json` plus one `scene_NNN.png` per rendered frame.
#[derive(Debug, Clone)]
pub struct FilesystemStoryboardStore {
    root: PathBuf,
}

impl FilesystemStoryboardStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn storyboard_dir(&self, id: &str) -> PathBuf {
        self.root.join(STORYBOARDS_DIR).join(id)
    }

    /// Path of the image file for one scene.
    pub fn image_path(&self, id: &str, scene_number: u32) -> PathBuf {
        self.storyboard_dir(id).join(image_file_name(scene_number))
    }

    fn checked_dir(&self, id: &str) -> Result<PathBuf, AppError> {
        if !is_valid_id(id) {
            return Err(AppError::StoryboardNotFound(id.to_string()));
        }
        Ok(self.storyboard_dir(id))
    }

    /// Caller must hold the write lock.
    fn write(&self, storyboard: &Storyboard) -> Result<(), AppError> {
        let dir = self.checked_dir(&storyboard.id)?;
        fs::create_dir_all(&dir)?;

        for frame in &storyboard.frames {
            let path = dir.join(image_file_name(frame.scene_number));
            match &frame.image {
                FrameImage::Rendered { bytes } => fs::write(&path, bytes)?,
                FrameImage::Failed { .. } if path.exists() => fs::remove_file(&path)?,
                FrameImage::Failed { .. } => {}
            }
        }

        let json = serde_json::to_string_pretty(storyboard)?;
        fs::write(dir.join(RECORD_FILE), json)?;
        debug!(id = %storyboard.id, dir = %dir.display(), "saved storyboard");
        Ok(())
    }
}

fn image_file_name(scene_number: u32) -> String {
    format!("scene_{:03}.png", scene_number)
}

/// Ids are single path components made of ASCII letters, digits, `-` and `_`.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn read_record(path: &Path) -> Result<Storyboard, AppError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

impl StoryboardStore for FilesystemStoryboardStore {
    fn save(&self, storyboard: &Storyboard) -> Result<(), AppError> {
        let _guard = write_lock();
        self.write(storyboard)
    }

    fn load(&self, id: &str) -> Result<Storyboard, AppError> {
        let dir = self.checked_dir(id)?;
        let record = dir.join(RECORD_FILE);
        if !record.exists() {
            return Err(AppError::StoryboardNotFound(id.to_string()));
        }

        let mut storyboard = read_record(&record)?;
        for frame in &mut storyboard.frames {
            if !frame.image.is_rendered() {
                continue;
            }
            let path = dir.join(image_file_name(frame.scene_number));
            frame.image = match fs::read(&path) {
                Ok(bytes) => FrameImage::Rendered { bytes },
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "image file unreadable");
                    FrameImage::Failed { reason: format!("Image file unreadable: {}", err) }
                }
            };
        }
        Ok(storyboard)
    }

    fn list(&self) -> Result<Vec<StoryboardSummary>, AppError> {
        let base = self.root.join(STORYBOARDS_DIR);
        if !base.exists() {
            return Ok(Vec::new());
        }

        let mut summaries = Vec::new();
        for entry in fs::read_dir(&base)? {
            let record = entry?.path().join(RECORD_FILE);
            if !record.is_file() {
                continue;
            }
            match read_record(&record) {
                Ok(storyboard) => summaries.push(storyboard.summary()),
                Err(err) => warn!(path = %record.display(), error = %err, "skipping unreadable storyboard"),
            }
        }

        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(summaries)
    }

    fn update(
        &self,
        id: &str,
        apply: &mut dyn FnMut(&mut Storyboard) -> Result<(), AppError>,
    ) -> Result<Storyboard, AppError> {
        let _guard = write_lock();
        let mut storyboard = self.load(id)?;
        apply(&mut storyboard)?;
        self.write(&storyboard)?;
        Ok(storyboard)
    }

    fn delete(&self, id: &str) -> Result<(), AppError> {
        let _guard = write_lock();
        let dir = self.checked_dir(id)?;
        if !dir.join(RECORD_FILE).exists() {
            return Err(AppError::StoryboardNotFound(id.to_string()));
        }
        fs::remove_dir_all(&dir)?;
        debug!(id, "deleted storyboard");
        Ok(())
    }
}
