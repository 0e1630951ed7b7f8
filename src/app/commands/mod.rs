pub mod export;
pub mod generate;
pub mod init;
pub mod regenerate;
mod render;
pub mod retry;
pub mod scenes;
pub mod storyboards;
pub mod translate;
