//! Outbound HTTP seam for the inference client

use crate::Result;
#[cfg(feature = "http")]
use crate::Error;

/// A fully-built outbound request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Status and body of a completed exchange. Non-2xx statuses are still a
/// completed exchange; interpreting them is the client's job.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can POST a request and hand back the raw response.
///
/// Implementations must be shareable across the worker threads used for
/// fire-and-forget submissions.
pub trait Transport: Send + Sync {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Blocking `reqwest` transport over rustls.
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// `timeout_ms = None` leaves the request unbounded.
    pub fn new(timeout_ms: Option<u64>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout_ms.map(std::time::Duration::from_millis))
            .build()
            .map_err(|e| {
                Error::ConfigError(format!("Failed to build HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }
}

#[cfg(feature = "http")]
impl Transport for HttpTransport {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let res = builder
            .body(request.body.clone())
            .send()
            .map_err(|e| Error::NetworkError(format!("POST {} failed: {}", request.url, e)))?;

        let status = res.status().as_u16();
        let body = res
            .bytes()
            .map_err(|e| Error::NetworkError(format!("Failed to read response body: {}", e)))?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
