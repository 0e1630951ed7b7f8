use crate::domain::StudioConfig;
use crate::ports::{ImageGenerator, StoryboardStore};

/// Application context holding dependencies for command execution.
pub struct AppContext<G: ImageGenerator, S: StoryboardStore> {
    generator: G,
    store: S,
    config: StudioConfig,
}

impl<G: ImageGenerator, S: StoryboardStore> AppContext<G, S> {
    pub fn new(generator: G, store: S, config: StudioConfig) -> Self {
        Self { generator, store, config }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }
}
