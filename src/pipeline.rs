//! Page rendering pipeline
//!
//! Sequences the stages of one page render:
//!
//! 1. Render markdown to HTML (remote service, local fallback)
//! 2. Parse the HTML into a mutable tree
//! 3. Annotate headings in a single walk: anchors, outline, section plan
//! 4. Apply the section plan
//! 5. Serialize the body back to an HTML fragment
//!
//! Each call owns its tree from parse to serialization; nothing is shared
//! between calls except the read-only configuration.
//!
//! # Examples
//!
//! ```rust
//! use doc_page_renderer::config::PipelineOptions;
//! use doc_page_renderer::pipeline::PagePipeline;
//!
//! let pipeline = PagePipeline::offline(PipelineOptions::default());
//! let page = pipeline.transform("# Intro\n\nHello\n").expect("render failed");
//!
//! assert_eq!(page.generator.as_str(), "local");
//! assert_eq!(page.title(), Some("Intro"));
//! assert!(page.html.starts_with("<div class=\"topic\"><h1><a name=\"intro\"></a>Intro</h1>"));
//! ```

use crate::annotator::HeadingAnnotator;
use crate::charset::decode_source;
use crate::config::{PipelineOptions, RendererConfig};
use crate::error::RenderError;
use crate::etag_generator::ETagGenerator;
use crate::headings::Outline;
use crate::parser::{parse_fragment, serialize_body};
use crate::renderer::{
    Generator, GitHubMarkdownService, LocalMarkdownRenderer, MarkdownRenderer, OfflineService,
    PulldownRenderer, RemoteMarkdownService,
};

/// Final output of a page render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Annotated HTML fragment, to be emitted verbatim
    pub html: String,
    /// Headings in document order
    pub outline: Outline,
    /// Renderer that produced the HTML
    pub generator: Generator,
    /// Strong ETag of `html`
    pub etag: String,
}

impl RenderedPage {
    /// Text of the first level-1 heading
    pub fn title(&self) -> Option<&str> {
        self.outline.title().map(|h| h.text.as_str())
    }
}

/// Annotate rendered HTML: anchors, outline and section containers
///
/// This is the post-processing half of the pipeline, usable on HTML that was
/// rendered elsewhere.
///
/// # Errors
///
/// - `RenderError::ParseError` if the HTML cannot be parsed into a document
/// - `RenderError::InternalError` if section containers overlap
pub fn annotate_html(
    html: &str,
    options: &PipelineOptions,
) -> Result<(String, Outline), RenderError> {
    let dom = parse_fragment(html)?;
    let (outline, wrapped) = HeadingAnnotator::new(options).annotate_and_wrap(&dom)?;
    let output = serialize_body(&dom)?;

    log::debug!(
        "annotated {} headings, wrapped {} sections",
        outline.len(),
        wrapped
    );

    Ok((output, outline))
}

/// Markdown page pipeline
pub struct PagePipeline<R, L> {
    renderer: MarkdownRenderer<R, L>,
    options: PipelineOptions,
    etags: ETagGenerator,
}

impl<R: RemoteMarkdownService, L: LocalMarkdownRenderer> PagePipeline<R, L> {
    pub fn new(renderer: MarkdownRenderer<R, L>, options: PipelineOptions) -> Self {
        Self {
            renderer,
            options,
            etags: ETagGenerator::new(),
        }
    }

    pub fn renderer(&self) -> &MarkdownRenderer<R, L> {
        &self.renderer
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Render a markdown page
    ///
    /// Remote rendering failures are never surfaced; they show up only as
    /// `generator == Generator::Local`.
    ///
    /// # Errors
    ///
    /// See [`annotate_html`].
    pub fn transform(&self, markdown: &str) -> Result<RenderedPage, RenderError> {
        let rendered = self.renderer.render(markdown);
        let generator = rendered.generator();

        let (html, outline) = annotate_html(rendered.html(), &self.options)?;
        let etag = self.etags.generate(html.as_bytes());

        log::debug!("rendered page with {} generator, etag {}", generator, etag);

        Ok(RenderedPage {
            html,
            outline,
            generator,
            etag,
        })
    }

    /// Decode a raw markdown source and render it
    ///
    /// # Errors
    ///
    /// - `RenderError::EncodingError` if the source cannot be decoded
    /// - everything [`transform`](Self::transform) can return
    pub fn transform_source(
        &self,
        source: &[u8],
        content_type: Option<&str>,
    ) -> Result<RenderedPage, RenderError> {
        let markdown = decode_source(source, content_type)?;
        self.transform(&markdown)
    }
}

impl PagePipeline<GitHubMarkdownService, PulldownRenderer> {
    /// Pipeline with the configured remote service and pulldown-cmark fallback
    pub fn from_config(config: RendererConfig, options: PipelineOptions) -> Self {
        Self::new(MarkdownRenderer::from_config(config), options)
    }
}

impl PagePipeline<OfflineService, PulldownRenderer> {
    /// Pipeline that only renders locally
    pub fn offline(options: PipelineOptions) -> Self {
        Self::new(
            MarkdownRenderer::new(OfflineService, PulldownRenderer::new()),
            options,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline() -> PagePipeline<OfflineService, PulldownRenderer> {
        PagePipeline::offline(PipelineOptions::default())
    }

    #[test]
    fn test_transform_wraps_and_anchors() {
        let page = offline()
            .transform("# Intro\n\nx\n\n## Sub\n\ny\n")
            .expect("Transform failed");

        assert_eq!(
            page.html,
            "<div class=\"topic\"><h1><a name=\"intro\"></a>Intro</h1>\n<p>x</p>\n</div>\
             <div class=\"sub-topic\"><h2><a name=\"sub\"></a>Sub</h2>\n<p>y</p>\n</div>"
        );
        assert_eq!(page.outline.len(), 2);
        assert_eq!(page.generator, Generator::Local);
    }

    #[test]
    fn test_transform_empty_markdown() {
        let page = offline().transform("").expect("Transform failed");
        assert_eq!(page.html, "");
        assert!(page.outline.is_empty());
        assert_eq!(page.title(), None);
    }

    #[test]
    fn test_etag_matches_html() {
        let page = offline().transform("# A\n").expect("Transform failed");
        assert_eq!(page.etag, ETagGenerator::new().generate(page.html.as_bytes()));
    }

    #[test]
    fn test_transform_is_deterministic() {
        let pipeline = offline();
        let markdown = "# A\n\n### B\n\ntext\n\n## C\n";
        let first = pipeline.transform(markdown).expect("Transform failed");
        let second = pipeline.transform(markdown).expect("Transform failed");
        assert_eq!(first, second);
    }

    #[test]
    fn test_transform_source_decodes() {
        let page = offline()
            .transform_source(b"# Caf\xE9\n", Some("text/markdown; charset=ISO-8859-1"))
            .expect("Transform failed");
        assert_eq!(page.title(), Some("Café"));
        assert_eq!(page.outline.headings()[0].id, "café");
    }

    #[test]
    fn test_transform_source_rejects_invalid_bytes() {
        let result = offline().transform_source(b"# \xFF\n", None);
        assert!(matches!(result, Err(RenderError::EncodingError(_))));
    }

    #[test]
    fn test_annotate_html_without_headings() {
        let (html, outline) =
            annotate_html("<p>plain</p>", &PipelineOptions::default()).expect("Annotate failed");
        assert_eq!(html, "<p>plain</p>");
        assert!(outline.is_empty());
    }
}
