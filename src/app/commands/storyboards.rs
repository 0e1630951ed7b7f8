use tracing::info;

use crate::domain::{AppError, Storyboard, StoryboardSummary};
use crate::ports::StoryboardStore;

/// Saved storyboards, newest first.
pub fn list<S: StoryboardStore>(store: &S) -> Result<Vec<StoryboardSummary>, AppError> {
    store.list()
}

pub fn show<S: StoryboardStore>(store: &S, id: &str) -> Result<Storyboard, AppError> {
    store.load(id)
}

pub fn delete<S: StoryboardStore>(store: &S, id: &str) -> Result<(), AppError> {
    store.delete(id)?;
    info!(%id, "storyboard deleted");
    Ok(())
}
