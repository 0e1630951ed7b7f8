//! Text-to-image client implementation using reqwest.

use std::thread;
use std::time::{Duration, Instant};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::domain::config::API_TOKEN_ENV;
use crate::domain::{AppError, GenerationConfig, GenerationRequest};
use crate::ports::ImageGenerator;

const API_TOKEN_HEADER: &str = "api_token";
const DEFAULT_STATUS_MESSAGE: &str = "Image service request failed";

/// HTTP transport for the image generation service.
///
/// One submission per call. Asynchronous submissions are polled until they finish or the
/// configured wait elapses. There is no retry.
#[derive(Clone)]
pub struct HttpImageClient {
    api_token: String,
    api_url: Url,
    status_url: Url,
    model_id: Option<String>,
    poll_interval: Duration,
    max_wait: Duration,
    client: Client,
}

impl std::fmt::Debug for HttpImageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageClient")
            .field("api_url", &self.api_url)
            .field("status_url", &self.status_url)
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

impl HttpImageClient {
    pub fn new(api_token: String, config: &GenerationConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| failure(format!("Failed to create HTTP client: {}", e), None))?;

        Ok(Self {
            api_token,
            api_url: config.api_url.clone(),
            status_url: config.status_url.clone(),
            model_id: config.model_id.clone(),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            max_wait: Duration::from_secs(config.max_wait_secs),
            client,
        })
    }

    /// Create with the token from `STORYFRAME_API_TOKEN`.
    pub fn from_env_with_config(config: &GenerationConfig) -> Result<Self, AppError> {
        let api_token = std::env::var(API_TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| AppError::EnvironmentVariableMissing(API_TOKEN_ENV.into()))?;

        Self::new(api_token, config)
    }

    fn submit(&self, request: &GenerationRequest) -> Result<ApiResponse, AppError> {
        let payload = ApiRequest {
            prompt: &request.prompt,
            negative_prompt: Some(request.negative_prompt.as_str()).filter(|n| !n.is_empty()),
            width: request.width,
            height: request.height,
            num_images: 1,
            sync: true,
            model_id: self.model_id.as_deref(),
        };

        debug!(url = %self.api_url, width = request.width, height = request.height, "submitting image request");
        let response = self
            .client
            .post(self.api_url.clone())
            .header(API_TOKEN_HEADER, &self.api_token)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .map_err(|e| failure(format!("HTTP request failed: {}", e), None))?;

        parse_json(response)
    }

    fn check_status(&self, request_id: &str) -> Result<StatusResponse, AppError> {
        let url = format!("{}/{}", self.status_url.as_str().trim_end_matches('/'), request_id);
        let response = self
            .client
            .get(&url)
            .header(API_TOKEN_HEADER, &self.api_token)
            .send()
            .map_err(|e| failure(format!("Status check failed: {}", e), None))?;

        parse_json(response)
    }

    fn wait_for_completion(&self, request_id: &str) -> Result<ImagePayload, AppError> {
        let started = Instant::now();
        while started.elapsed() < self.max_wait {
            let status = self.check_status(request_id)?;
            match status.status.as_deref() {
                Some("COMPLETED") => {
                    info!(request_id, "image request completed");
                    return Ok(status.result.unwrap_or_default());
                }
                Some("ERROR") => {
                    let message = status
                        .error
                        .and_then(|error| error.message)
                        .unwrap_or_else(|| "Unknown error".to_string());
                    return Err(failure(message, None));
                }
                Some("UNKNOWN") => {
                    return Err(failure(format!("Unknown status for request {}", request_id), None));
                }
                other => debug!(request_id, status = ?other, "image request pending"),
            }
            thread::sleep(self.poll_interval);
        }

        Err(failure(
            format!(
                "Request {} did not complete within {} seconds",
                request_id,
                self.max_wait.as_secs()
            ),
            None,
        ))
    }

    fn download(&self, image_url: &str) -> Result<Vec<u8>, AppError> {
        let response = self
            .client
            .get(image_url)
            .send()
            .map_err(|e| failure(format!("Failed to download image: {}", e), None))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failure("Failed to download image", Some(status.as_u16())));
        }
        let bytes = response
            .bytes()
            .map_err(|e| failure(format!("Failed to read image body: {}", e), None))?;
        Ok(bytes.to_vec())
    }

    fn materialize(&self, payload: ImagePayload) -> Result<Option<Vec<u8>>, AppError> {
        if let Some(url) = payload.image_url {
            return self.download(&url).map(Some);
        }
        if let Some(encoded) = payload.image.or(payload.data) {
            return decode_base64_image(&encoded).map(Some);
        }
        Ok(None)
    }
}

impl ImageGenerator for HttpImageClient {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<u8>, AppError> {
        let response = self.submit(request)?;

        if let Some(bytes) = self.materialize(response.image)? {
            return Ok(bytes);
        }
        if let Some(bytes) = self.materialize(response.result.unwrap_or_default())? {
            return Ok(bytes);
        }

        let request_id = response
            .request_id
            .ok_or_else(|| failure("Response contained neither an image nor a request_id", None))?;
        info!(request_id = %request_id, "image request queued, polling for result");

        let result = self.wait_for_completion(&request_id)?;
        self.materialize(result)?
            .ok_or_else(|| failure(format!("No image in result for request {}", request_id), None))
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<&'a str>,
    width: u32,
    height: u32,
    num_images: u32,
    sync: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_id: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
struct ImagePayload {
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(flatten)]
    image: ImagePayload,
    #[serde(default)]
    result: Option<ImagePayload>,
    #[serde(default)]
    request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    result: Option<ImagePayload>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

fn failure(message: impl Into<String>, status: Option<u16>) -> AppError {
    AppError::ImageGeneration { message: message.into(), status }
}

fn parse_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::blocking::Response,
) -> Result<T, AppError> {
    let status = response.status();
    let body_text = response.text().unwrap_or_default();

    if status.is_success() {
        return serde_json::from_str(&body_text).map_err(|e| {
            failure(format!("Failed to parse response: {}", e), Some(status.as_u16()))
        });
    }

    let message = extract_error_message(&body_text).unwrap_or_else(|| {
        if !body_text.trim().is_empty() {
            body_text.clone()
        } else if status.as_u16() == 429 {
            "Rate limited".to_string()
        } else if status.is_server_error() {
            "Server error".to_string()
        } else {
            DEFAULT_STATUS_MESSAGE.to_string()
        }
    });

    Err(failure(message, Some(status.as_u16())))
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    ["message", "detail"]
        .iter()
        .find_map(|key| parsed.get(*key).and_then(|value| value.as_str()))
        .map(ToOwned::to_owned)
}

/// Decode a bare base64 payload or a `data:image/...;base64,` URI.
fn decode_base64_image(encoded: &str) -> Result<Vec<u8>, AppError> {
    let payload = match encoded.split_once(',') {
        Some((_, data)) => data,
        None => encoded,
    };
    STANDARD
        .decode(payload.trim())
        .map_err(|e| failure(format!("Failed to decode base64 image: {}", e), None))
}
