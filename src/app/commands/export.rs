use std::fs;
use std::path::Path;

use tracing::info;

use crate::adapters::render_shot_list;
use crate::domain::AppError;
use crate::ports::StoryboardStore;

/// Render a storyboard as a Markdown shot list.
///
/// `image_dir` is where frame images live, used for image links. When
/// `output` is given the document is also written there.
pub fn execute<S: StoryboardStore>(
    store: &S,
    id: &str,
    image_dir: Option<&Path>,
    output: Option<&Path>,
) -> Result<String, AppError> {
    let storyboard = store.load(id)?;
    let document = render_shot_list(&storyboard, image_dir)?;

    if let Some(path) = output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &document)?;
        info!(path = %path.display(), "shot list written");
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppContext;
    use crate::app::commands::generate::{self, GenerateOptions};
    use crate::domain::StudioConfig;
    use crate::testing::{FakeImageGenerator, MemoryStoryboardStore};
    use tempfile::TempDir;

    #[test]
    fn writes_shot_list_to_output_file() {
        let ctx = AppContext::new(
            FakeImageGenerator::new(),
            MemoryStoryboardStore::new(),
            StudioConfig::default(),
        );
        let options = GenerateOptions { name: Some("Heist".into()), ..Default::default() };
        let storyboard = generate::execute(
            &ctx,
            b"INT. VAULT - NIGHT\n\nLow angle on the safe door.",
            &options,
        )
        .unwrap();

        let dir = TempDir::new().unwrap();
        let output = dir.path().join("docs/heist.md");
        let document = execute(ctx.store(), &storyboard.id, None, Some(&output)).unwrap();

        assert!(document.starts_with("# Heist"));
        assert!(document.contains("## Scene 1: VAULT - NIGHT"));
        assert_eq!(fs::read_to_string(&output).unwrap(), document);
    }

    #[test]
    fn unknown_storyboard_is_reported() {
        let store = MemoryStoryboardStore::new();
        let result = execute(&store, "nope", None, None);
        assert!(matches!(result, Err(AppError::StoryboardNotFound(_))));
    }
}
