//! Flag drawing page
//!
//! A headless model of a small page: the user triggers a country selector,
//! freehand-draws the country's flag on a canvas, and submits the drawing to
//! a vision-capable model that guesses the country.
//!
//! # Features
//!
//! - **Explicit state**: page, stroke and brush state live on values owned
//!   by the [`page::Page`]; host events are method calls
//! - **Software raster**: strokes are rasterised into an RGBA buffer and
//!   encoded as PNG for submission
//! - **Swappable transport**: the inference client posts through the
//!   [`inference::Transport`] trait (`reqwest` by default)
//!
//! # Example
//!
//! ```no_run
//! use flagdraw::drawing::{PaletteColor, Point};
//! use flagdraw::inference::InferenceClient;
//! use flagdraw::page::Page;
//! use flagdraw::PageConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PageConfig {
//!     api_key: "sk-...".to_string(),
//!     ..Default::default()
//! };
//! let client = InferenceClient::new(config.clone())?;
//!
//! let mut page = Page::new(config);
//! page.activate_selector();
//! let surface = page.surface_mut()?;
//! surface.select_color(PaletteColor::Red);
//! surface.pointer_down();
//! surface.pointer_move(Point::new(10.0, 10.0));
//! surface.pointer_move(Point::new(200.0, 10.0));
//! surface.pointer_up();
//!
//! page.submit(&client)?;
//! println!("Guess: {}", page.response_text());
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

pub mod error;
pub use error::{Error, Result};

pub mod async_api;
pub mod drawing;
pub mod inference;
pub mod page;
pub mod script;

pub use async_api::{Completion, SubmissionDispatcher, SubmissionId};
pub use inference::{InferenceClient, InferenceOutcome};
pub use page::{Page, PageState};

/// Configuration for the page and its inference client
///
/// The defaults match the shipped page: a 500×300 canvas and the public
/// Messages endpoint with a blank API key that the operator must fill in.
/// No request timeout is applied unless `timeout_ms` is set.
///
/// # Examples
///
/// ```
/// let cfg = flagdraw::PageConfig::default();
/// assert!(cfg.api_key.is_empty());
/// assert_eq!(cfg.canvas.width, 500);
/// ```
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Drawing surface dimensions
    pub canvas: CanvasSize,
    /// Messages endpoint URL
    pub endpoint: String,
    /// Value of the `x-api-key` header
    pub api_key: String,
    /// Value of the `anthropic-version` header
    pub api_version: String,
    /// Model identifier placed in the request body
    pub model: String,
    /// Maximum response length budget
    pub max_tokens: u32,
    /// Instruction sent next to the drawing
    pub prompt: String,
    /// Optional request timeout in milliseconds
    pub timeout_ms: Option<u64>,
    /// Extra HTTP headers, applied after the fixed ones
    pub headers: HashMap<String, String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            endpoint: inference::DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            api_version: inference::DEFAULT_API_VERSION.to_string(),
            model: inference::DEFAULT_MODEL.to_string(),
            max_tokens: inference::DEFAULT_MAX_TOKENS,
            prompt: inference::FLAG_PROMPT.to_string(),
            timeout_ms: None,
            headers: HashMap::new(),
        }
    }
}

impl PageConfig {
    /// Check the values that would otherwise only fail at submit time.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.endpoint)
            .map_err(|e| Error::ConfigError(format!("endpoint {:?}: {}", self.endpoint, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::ConfigError(format!(
                "endpoint must be http(s), got {:?}",
                url.scheme()
            )));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(Error::ConfigError("canvas must not be empty".into()));
        }
        if self.max_tokens == 0 {
            return Err(Error::ConfigError("max_tokens must be positive".into()));
        }
        Ok(())
    }
}

/// Canvas dimensions in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 500,
            height: 300,
        }
    }
}
