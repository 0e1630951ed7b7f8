//! Image generation port definition.

use tracing::debug;

use crate::domain::{AppError, GenerationRequest};

/// Port for the external text-to-image service.
pub trait ImageGenerator: Send + Sync {
    /// Produce encoded image bytes for one request.
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<u8>, AppError>;
}

impl<T: ImageGenerator + ?Sized> ImageGenerator for Box<T> {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<u8>, AppError> {
        (**self).generate(request)
    }
}

/// 1x1 transparent PNG returned in mock mode.
pub const PLACEHOLDER_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4,
    0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae,
    0x42, 0x60, 0x82,
];

/// Offline generator for working without API calls.
#[derive(Debug, Clone, Default)]
pub struct MockImageGenerator;

impl ImageGenerator for MockImageGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<u8>, AppError> {
        debug!(
            width = request.width,
            height = request.height,
            prompt_len = request.prompt.len(),
            "mock image generation"
        );
        Ok(PLACEHOLDER_PNG.to_vec())
    }
}
