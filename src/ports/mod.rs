mod image_generator;
mod storyboard_store;

pub use image_generator::{ImageGenerator, MockImageGenerator, PLACEHOLDER_PNG};
pub use storyboard_store::StoryboardStore;
