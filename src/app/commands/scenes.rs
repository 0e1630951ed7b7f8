use crate::domain::script::split_bytes;
use crate::domain::{AppError, Scene};

/// Split raw script bytes into scenes with their detected cues.
pub fn execute(script: &[u8]) -> Result<Vec<Scene>, AppError> {
    split_bytes(script)
}
