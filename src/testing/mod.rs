mod fake_image_generator;
mod memory_storyboard_store;

pub use fake_image_generator::FakeImageGenerator;
pub use memory_storyboard_store::MemoryStoryboardStore;
