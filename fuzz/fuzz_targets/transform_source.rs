#![no_main]

use doc_page_renderer::{Generator, PagePipeline, PipelineOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let pipeline = PagePipeline::offline(PipelineOptions::default());
    if let Ok(page) = pipeline.transform_source(data, None) {
        assert_eq!(page.generator, Generator::Local);
        assert!(page.outline.iter().all(|h| !h.id.is_empty()));
    }
});
