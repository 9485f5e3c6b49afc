//! Renderer and pipeline configuration
//!
//! Configuration is process-wide and read-only while a page is being
//! transformed. Both structs carry sensible defaults so callers only set
//! what differs from them.
//!
//! # Examples
//!
//! ```rust
//! use doc_page_renderer::config::{PipelineOptions, RendererConfig};
//! use std::time::Duration;
//!
//! let config = RendererConfig {
//!     timeout: Duration::from_secs(3),
//!     ..Default::default()
//! };
//! assert_eq!(config.endpoint, "https://api.github.com/markdown/raw");
//!
//! let options = PipelineOptions::default();
//! assert_eq!(options.anchor_prefix, "user-content-");
//! ```

use std::env;
use std::time::Duration;

/// Default remote raw-markdown endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/markdown/raw";

/// Prefix the remote renderer puts in front of user-provided anchor names
pub const DEFAULT_ANCHOR_PREFIX: &str = "user-content-";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const ENV_ENDPOINT: &str = "DOC_PAGE_RENDERER_ENDPOINT";
const ENV_TIMEOUT_SECS: &str = "DOC_PAGE_RENDERER_TIMEOUT_SECS";
const ENV_TOKEN: &str = "DOC_PAGE_RENDERER_TOKEN";

/// Remote markdown service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    /// Endpoint accepting raw markdown and answering with HTML
    pub endpoint: String,
    /// Transport timeout for the single remote attempt
    pub timeout: Duration,
    /// Optional bearer token
    pub token: Option<String>,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            token: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl RendererConfig {
    /// Build a configuration from defaults overridden by environment variables
    ///
    /// - `DOC_PAGE_RENDERER_ENDPOINT` replaces the endpoint
    /// - `DOC_PAGE_RENDERER_TIMEOUT_SECS` replaces the timeout (ignored if not a number)
    /// - `DOC_PAGE_RENDERER_TOKEN` sets the bearer token
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            config.endpoint = endpoint.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(_) => log::warn!("ignoring invalid {ENV_TIMEOUT_SECS} value {raw:?}"),
            }
        }

        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.is_empty()) {
            config.token = Some(token);
        }

        config
    }
}

/// Options for the annotation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Prefix stripped from anchor identifiers
    pub anchor_prefix: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            anchor_prefix: DEFAULT_ANCHOR_PREFIX.to_string(),
        }
    }
}
