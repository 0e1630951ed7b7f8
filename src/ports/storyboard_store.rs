use crate::domain::{AppError, Storyboard, StoryboardSummary};

/// Port for storyboard persistence.
pub trait StoryboardStore {
    /// Write a storyboard, replacing any previous version with the same id.
    fn save(&self, storyboard: &Storyboard) -> Result<(), AppError>;

    /// Read a storyboard with its rendered image bytes.
    fn load(&self, id: &str) -> Result<Storyboard, AppError>;

    /// Summaries of all stored storyboards, newest first.
    fn list(&self) -> Result<Vec<StoryboardSummary>, AppError>;

    fn delete(&self, id: &str) -> Result<(), AppError>;

    /// Load, modify and write back one storyboard as a single step.
    ///
    /// Concurrent updates through the same store are serialized, so a change made by one caller
    /// is visible to the next. Nothing is written when `apply` fails.
    fn update(
        &self,
        id: &str,
        apply: &mut dyn FnMut(&mut Storyboard) -> Result<(), AppError>,
    ) -> Result<Storyboard, AppError>;
}

impl<T: StoryboardStore + ?Sized> StoryboardStore for &T {
    fn save(&self, storyboard: &Storyboard) -> Result<(), AppError> {
        (**self).save(storyboard)
    }

    fn load(&self, id: &str) -> Result<Storyboard, AppError> {
        (**self).load(id)
    }

    fn list(&self) -> Result<Vec<StoryboardSummary>, AppError> {
        (**self).list()
    }

    fn delete(&self, id: &str) -> Result<(), AppError> {
        (**self).delete(id)
    }

    fn update(
        &self,
        id: &str,
        apply: &mut dyn FnMut(&mut Storyboard) -> Result<(), AppError>,
    ) -> Result<Storyboard, AppError> {
        (**self).update(id, apply)
    }
}
