//! Viewer configuration.
//!
//! The host supplies these values; [`ViewerOptions`] deserializes from the
//! same JSON shape the host stores them in.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Per-request options for [`crate::Viewer::process`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    /// Notebook URL
    pub url: String,

    /// Base URL prepended to image file names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images_url: Option<String>,

    /// Text marking the first cell to keep
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_tag: Option<String>,

    /// Text marking the first cell to drop at the end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_tag: Option<String>,

    /// HTTP client settings
    pub fetch: FetchOptions,
}

/// HTTP client settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    /// Request timeout in seconds; the client default applies when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// User-Agent header value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Ignore proxies configured in the environment
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub no_proxy: bool,
}

impl ViewerOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn images_url(mut self, images_url: impl Into<String>) -> Self {
        self.images_url = Some(images_url.into());
        self
    }

    pub fn start_tag(mut self, tag: impl Into<String>) -> Self {
        self.start_tag = Some(tag.into());
        self
    }

    pub fn end_tag(mut self, tag: impl Into<String>) -> Self {
        self.end_tag = Some(tag.into());
        self
    }

    pub fn with_fetch(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }

    /// Parse options from a JSON document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl FetchOptions {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
