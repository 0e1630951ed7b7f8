use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::domain::{AppError, Storyboard, StoryboardSummary};
use crate::ports::StoryboardStore;

/// In-memory storyboard store for testing.
#[derive(Default)]
pub struct MemoryStoryboardStore {
    pub storyboards: Mutex<BTreeMap<String, Storyboard>>,
}

impl MemoryStoryboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Storyboard> {
        self.storyboards.lock().unwrap().get(id).cloned()
    }
}

impl StoryboardStore for MemoryStoryboardStore {
    fn save(&self, storyboard: &Storyboard) -> Result<(), AppError> {
        self.storyboards.lock().unwrap().insert(storyboard.id.clone(), storyboard.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Storyboard, AppError> {
        self.get(id).ok_or_else(|| AppError::StoryboardNotFound(id.to_string()))
    }

    fn list(&self) -> Result<Vec<StoryboardSummary>, AppError> {
        let mut summaries: Vec<StoryboardSummary> =
            self.storyboards.lock().unwrap().values().map(Storyboard::summary).collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }

    fn update(
        &self,
        id: &str,
        apply: &mut dyn FnMut(&mut Storyboard) -> Result<(), AppError>,
    ) -> Result<Storyboard, AppError> {
        let mut storyboards = self.storyboards.lock().unwrap();
        let mut storyboard = storyboards
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::StoryboardNotFound(id.to_string()))?;
        apply(&mut storyboard)?;
        storyboards.insert(storyboard.id.clone(), storyboard.clone());
        Ok(storyboard)
    }

    fn delete(&self, id: &str) -> Result<(), AppError> {
        self.storyboards
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::StoryboardNotFound(id.to_string()))
    }
}
