//! Submission & inference client
//!
//! Turns an encoded drawing into a Messages request, posts it once, and
//! reports the result as an [`InferenceOutcome`]. There is no retry and no
//! cancellation; the caller decides whether to display or log the outcome.

pub mod transport;
pub mod wire;

pub use transport::{HttpRequest, HttpResponse, Transport};
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use wire::{ContentBlock, ImageSource, Message, MessagesRequest, MessagesResponse};

use crate::{Error, PageConfig, Result};
use log::{debug, info};

/// Instruction sent alongside every drawing.
pub const FLAG_PROMPT: &str = "This drawing is the flag of a country, which country is it? Answer with only the name of a country and no other text.";

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20240620";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceOutcome {
    /// `content[0].text` of a well-formed response, verbatim.
    Answer(String),
    /// Why the submission produced nothing to show.
    Failed(String),
}

impl InferenceOutcome {
    pub fn answer(&self) -> Option<&str> {
        match self {
            InferenceOutcome::Answer(text) => Some(text),
            InferenceOutcome::Failed(_) => None,
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, InferenceOutcome::Answer(_))
    }
}

impl From<Result<String>> for InferenceOutcome {
    fn from(res: Result<String>) -> Self {
        match res {
            Ok(text) => InferenceOutcome::Answer(text),
            Err(e) => InferenceOutcome::Failed(e.to_string()),
        }
    }
}

pub struct InferenceClient {
    config: PageConfig,
    transport: Box<dyn Transport>,
}

impl InferenceClient {
    /// Client over the default `reqwest` transport.
    #[cfg(feature = "http")]
    pub fn new(config: PageConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout_ms)?;
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: PageConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Box::new(transport),
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Request body for one drawing (`image_b64` is bare base64 PNG).
    pub fn build_request(&self, image_b64: &str) -> MessagesRequest {
        MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![
                    ContentBlock::Image {
                        source: ImageSource::png_base64(image_b64),
                    },
                    ContentBlock::Text {
                        text: self.config.prompt.clone(),
                    },
                ],
            }],
        }
    }

    /// Headers sent with every request. Operator-supplied extras come last
    /// and may override the fixed ones.
    pub fn request_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("content-type".to_string(), "application/json".to_string()),
            ("x-api-key".to_string(), self.config.api_key.clone()),
            (
                "anthropic-version".to_string(),
                self.config.api_version.clone(),
            ),
            (
                "anthropic-dangerous-direct-browser-access".to_string(),
                "true".to_string(),
            ),
        ];
        for (name, value) in &self.config.headers {
            let lower = name.to_ascii_lowercase();
            headers.retain(|(n, _)| *n != lower);
            headers.push((lower, value.clone()));
        }
        headers
    }

    /// Submit one drawing and wait for the answer. Every error is folded
    /// into `InferenceOutcome::Failed`.
    pub fn infer(&self, image_b64: &str) -> InferenceOutcome {
        self.try_infer(image_b64).into()
    }

    fn try_infer(&self, image_b64: &str) -> Result<String> {
        let request = self.build_request(image_b64);
        let body = serde_json::to_vec(&request)
            .map_err(|e| Error::Other(format!("Failed to serialize request: {}", e)))?;
        debug!(
            "POST {} model={} max_tokens={} image_bytes={}",
            self.config.endpoint,
            request.model,
            request.max_tokens,
            image_b64.len()
        );

        let response = self.transport.post(&HttpRequest {
            url: self.config.endpoint.clone(),
            headers: self.request_headers(),
            body,
        })?;
        info!("inference endpoint answered {}", response.status);
        extract_answer(&response)
    }
}

/// Pull `content[0].text` out of a response.
pub fn extract_answer(response: &HttpResponse) -> Result<String> {
    if !response.is_success() {
        let detail = serde_json::from_slice::<wire::ErrorResponse>(&response.body)
            .map(|e| format!(": {} ({})", e.error.message, e.error.kind))
            .unwrap_or_else(|_| {
                format!(": {}", String::from_utf8_lossy(&response.body).trim())
            });
        return Err(Error::ResponseError(format!(
            "status {}{}",
            response.status, detail
        )));
    }

    let value: serde_json::Value = serde_json::from_slice(&response.body).map_err(|e| {
        Error::ResponseError(format!("status {}, body is not JSON: {}", response.status, e))
    })?;
    debug!("Response: {}", value);

    let parsed: MessagesResponse = serde_json::from_value(value)
        .map_err(|e| Error::ResponseError(format!("unexpected shape: {}", e)))?;
    parsed
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
        .ok_or_else(|| Error::ResponseError("missing content[0].text".to_string()))
}
