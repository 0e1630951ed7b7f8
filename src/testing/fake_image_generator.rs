use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::domain::{AppError, GenerationRequest};
use crate::ports::ImageGenerator;

/// Records every request and fails those whose prompt contains `fail_marker`.
///
/// With `delay` set, each call sleeps first to stand in for a slow service.
#[derive(Clone, Default)]
pub struct FakeImageGenerator {
    pub requests: Arc<Mutex<Vec<GenerationRequest>>>,
    pub fail_marker: Option<String>,
    pub delay: Option<Duration>,
}

impl FakeImageGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(marker: impl Into<String>) -> Self {
        Self { fail_marker: Some(marker.into()), ..Self::default() }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay: Some(delay), ..Self::default() }
    }

    pub fn get_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Bytes returned for a prompt, distinct per prompt.
    pub fn image_for(prompt: &str) -> Vec<u8> {
        prompt.as_bytes().iter().take(8).copied().collect()
    }
}

impl ImageGenerator for FakeImageGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<u8>, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        if self.fail_marker.as_deref().is_some_and(|marker| request.prompt.contains(marker)) {
            return Err(AppError::ImageGeneration {
                message: "simulated outage".into(),
                status: Some(503),
            });
        }
        Ok(Self::image_for(&request.prompt))
    }
}
