use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::warn;

use crate::domain::{AppError, FrameImage, GenerationRequest};
use crate::ports::ImageGenerator;

/// Issue image requests on a pool of at most `max_concurrent` workers.
///
/// Failures become `FrameImage::Failed`; results keep request order.
pub(crate) fn render_images<G: ImageGenerator>(
    generator: &G,
    requests: &[GenerationRequest],
    max_concurrent: usize,
) -> Result<Vec<FrameImage>, AppError> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(max_concurrent.clamp(1, requests.len().max(1)))
        .build()
        .map_err(|e| AppError::config_error(format!("Failed to start image worker pool: {}", e)))?;

    Ok(pool.install(|| {
        requests
            .par_iter()
            .enumerate()
            .map(|(index, request)| {
                let result = generator.generate(request);
                if let Err(err) = &result {
                    warn!(frame = index + 1, error = %err, "image generation failed");
                }
                FrameImage::from(result)
            })
            .collect()
    }))
}
