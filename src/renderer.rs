//! Markdown to HTML rendering with remote-then-local fallback
//!
//! The renderer makes a single best-effort call to a remote markdown service
//! and falls back to the local pulldown-cmark renderer on any failure:
//! transport errors, timeouts, non-success status codes and unreadable
//! bodies all collapse to local rendering. No retry or caching happens here.
//!
//! The result records which renderer produced the HTML. That provenance is
//! diagnostic output, never used for control flow.
//!
//! # Examples
//!
//! ```rust
//! use doc_page_renderer::renderer::{
//!     Generator, MarkdownRenderer, OfflineService, PulldownRenderer,
//! };
//!
//! let renderer = MarkdownRenderer::new(OfflineService, PulldownRenderer::new());
//! let result = renderer.render("# Hello");
//! assert_eq!(result.generator(), Generator::Local);
//! assert_eq!(result.html(), "<h1>Hello</h1>\n");
//! ```

use pulldown_cmark::{Options, Parser, html};
use std::fmt;
use std::io::Read;

use crate::config::RendererConfig;
use crate::error::RenderError;

/// Which renderer produced a piece of HTML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generator {
    Remote,
    Local,
}

impl Generator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Generator::Remote => "remote",
            Generator::Local => "local",
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendered HTML tagged with its provenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderResult {
    Remote(String),
    Local(String),
}

impl RenderResult {
    pub fn html(&self) -> &str {
        match self {
            RenderResult::Remote(html) | RenderResult::Local(html) => html,
        }
    }

    pub fn into_html(self) -> String {
        match self {
            RenderResult::Remote(html) | RenderResult::Local(html) => html,
        }
    }

    pub fn generator(&self) -> Generator {
        match self {
            RenderResult::Remote(_) => Generator::Remote,
            RenderResult::Local(_) => Generator::Local,
        }
    }
}

/// A remote markdown rendering service
///
/// Implementations make one attempt per call and report every failure as
/// `RenderError::Remote`.
pub trait RemoteMarkdownService {
    fn render_raw_markdown(&self, markdown: &str) -> Result<String, RenderError>;
}

/// A local, deterministic markdown renderer
pub trait LocalMarkdownRenderer {
    fn transform(&self, markdown: &str) -> String;
}

/// Remote service speaking the GitHub `POST /markdown/raw` protocol
///
/// The markdown is sent as a `text/plain` body and the response body is the
/// rendered HTML.
pub struct GitHubMarkdownService {
    agent: ureq::Agent,
    config: RendererConfig,
}

impl GitHubMarkdownService {
    pub fn new(config: RendererConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build()
            .into();
        Self { agent, config }
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

impl Default for GitHubMarkdownService {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

impl RemoteMarkdownService for GitHubMarkdownService {
    fn render_raw_markdown(&self, markdown: &str) -> Result<String, RenderError> {
        let mut request = self
            .agent
            .post(self.config.endpoint.as_str())
            .header("Content-Type", "text/plain; charset=utf-8")
            .header("Accept", "text/html")
            .header("User-Agent", self.config.user_agent.as_str());
        if let Some(token) = &self.config.token {
            request = request.header("Authorization", format!("Bearer {token}").as_str());
        }

        let mut response = request.send(markdown).map_err(|err| match err {
            ureq::Error::StatusCode(status) => RenderError::Remote(format!(
                "{} answered with status {}",
                self.config.endpoint, status
            )),
            err => RenderError::Remote(format!(
                "Failed to reach {}: {}",
                self.config.endpoint, err
            )),
        })?;

        let mut body = String::new();
        response
            .body_mut()
            .as_reader()
            .read_to_string(&mut body)
            .map_err(|err| {
                RenderError::Remote(format!(
                    "Failed to read response from {}: {}",
                    self.config.endpoint, err
                ))
            })?;

        Ok(body)
    }
}

/// Remote service used when remote rendering is disabled
///
/// Always fails, so every render uses the local renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineService;

impl RemoteMarkdownService for OfflineService {
    fn render_raw_markdown(&self, _markdown: &str) -> Result<String, RenderError> {
        Err(RenderError::Remote("remote rendering disabled".to_string()))
    }
}

/// Local renderer backed by pulldown-cmark
///
/// Tables, strikethrough, task lists and footnotes are enabled.
#[derive(Debug, Clone, Copy)]
pub struct PulldownRenderer {
    options: Options,
}

impl PulldownRenderer {
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES,
        }
    }
}

impl Default for PulldownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalMarkdownRenderer for PulldownRenderer {
    fn transform(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, parser);
        html_output
    }
}

/// Two-tier markdown renderer
pub struct MarkdownRenderer<R, L> {
    remote: R,
    local: L,
}

impl<R: RemoteMarkdownService, L: LocalMarkdownRenderer> MarkdownRenderer<R, L> {
    pub fn new(remote: R, local: L) -> Self {
        Self { remote, local }
    }

    /// Render markdown, preferring the remote service
    ///
    /// Never fails: any remote failure is logged and answered by the local
    /// renderer.
    pub fn render(&self, markdown: &str) -> RenderResult {
        match self.remote.render_raw_markdown(markdown) {
            Ok(html) => {
                log::debug!("remote renderer produced {} bytes", html.len());
                RenderResult::Remote(html)
            }
            Err(err) => {
                log::warn!("falling back to local markdown renderer: {err}");
                RenderResult::Local(self.local.transform(markdown))
            }
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn local(&self) -> &L {
        &self.local
    }
}

impl MarkdownRenderer<GitHubMarkdownService, PulldownRenderer> {
    /// Renderer using the configured remote service and pulldown-cmark fallback
    pub fn from_config(config: RendererConfig) -> Self {
        Self::new(GitHubMarkdownService::new(config), PulldownRenderer::new())
    }
}
