//! Basic rendering example for the documentation page renderer
//!
//! Renders locally by default. Set `DOC_PAGE_RENDERER_REMOTE=1` to try the
//! configured remote service first (see `RendererConfig::from_env`).

use doc_page_renderer::pipeline::annotate_html;
use doc_page_renderer::{PagePipeline, PipelineOptions, RenderedPage, RendererConfig};

const GUIDE: &str = "\
# Getting Started

A short guide.

## Install

Run the installer.

### From Source

Build it yourself.

## Configure

Edit the config file.
";

fn main() {
    println!("=== Documentation Page Renderer - Basic Examples ===\n");

    // Example 1: Full page render
    example_1();

    // Example 2: Annotating HTML rendered elsewhere
    example_2();
}

fn example_1() {
    println!("Example 1: Full page render");
    println!("Input Markdown:");
    println!("{}", GUIDE);

    let page = if std::env::var_os("DOC_PAGE_RENDERER_REMOTE").is_some() {
        PagePipeline::from_config(RendererConfig::from_env(), PipelineOptions::default())
            .transform(GUIDE)
    } else {
        PagePipeline::offline(PipelineOptions::default()).transform(GUIDE)
    }
    .expect("Render failed");

    print_page(&page);
    println!("---\n");
}

fn example_2() {
    println!("Example 2: Annotating remote-style HTML");
    let html = "<h1><a id=\"user-content-api\" class=\"anchor\" href=\"#api\"></a>API</h1>\
                <p>Reference.</p><h2>Errors</h2><p>Codes.</p>";
    println!("Input HTML:");
    println!("{}\n", html);

    let (output, outline) =
        annotate_html(html, &PipelineOptions::default()).expect("Annotate failed");

    println!("Output HTML:");
    println!("{}\n", output);
    println!("Outline:");
    for heading in &outline {
        println!("  h{} #{} {}", heading.level, heading.id, heading.text);
    }
    println!("---\n");
}

fn print_page(page: &RenderedPage) {
    println!("Generator: {}", page.generator);
    println!("Title: {}", page.title().unwrap_or("(none)"));
    println!("ETag: {}", page.etag);
    println!("Outline:");
    for heading in &page.outline {
        let indent = "  ".repeat(heading.level as usize);
        println!("{}#{} {}", indent, heading.id, heading.text);
    }
    println!("Output HTML:");
    println!("{}", page.html);
}
