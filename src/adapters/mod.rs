pub mod embedded_assets;
pub mod http_image_client;
pub mod shot_list;
pub mod storyboard_filesystem;

pub use http_image_client::HttpImageClient;
pub use shot_list::render_shot_list;
pub use storyboard_filesystem::FilesystemStoryboardStore;
