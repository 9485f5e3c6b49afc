//! Documentation Page Renderer
//!
//! This library renders a markdown documentation page into annotated,
//! navigable HTML: every heading gets a stable anchor, the headings form an
//! outline for the table of contents, and level-1 and level-2 headings are
//! wrapped with their content in section containers.
//!
//! # Architecture
//!
//! The library is structured into several modules:
//! - `renderer`: Markdown to HTML, remote service first, pulldown-cmark fallback
//! - `parser`: HTML5 parsing and serialization using html5ever
//! - `headings`: Heading classification and the outline
//! - `anchor`: Anchor identifier assignment
//! - `sections`: Deferred section containers
//! - `annotator`: Single-pass annotation walk
//! - `pipeline`: Orchestration of one page render
//! - `charset`: Markdown source decoding
//! - `etag_generator`: ETags using BLAKE3
//! - `config`: Renderer and pipeline configuration
//!
//! # Example
//!
//! ```rust
//! use doc_page_renderer::{PagePipeline, PipelineOptions};
//!
//! let pipeline = PagePipeline::offline(PipelineOptions::default());
//! let page = pipeline.transform("# Guide\n\n## Install\n").unwrap();
//!
//! let ids: Vec<_> = page.outline.iter().map(|h| h.id.as_str()).collect();
//! assert_eq!(ids, ["guide", "install"]);
//! ```

// Module declarations
pub mod anchor;
pub mod annotator;
pub mod charset;
pub mod config;
pub mod dom;
pub mod error;
pub mod etag_generator;
pub mod headings;
pub mod parser;
pub mod pipeline;
pub mod renderer;
pub mod sections;

// Re-export main types for convenience
pub use config::{PipelineOptions, RendererConfig};
pub use error::RenderError;
pub use headings::{Heading, Outline};
pub use pipeline::{PagePipeline, RenderedPage, annotate_html};
pub use renderer::{Generator, MarkdownRenderer, RenderResult};
