#![no_main]

use doc_page_renderer::pipeline::annotate_html;
use doc_page_renderer::{PipelineOptions, RenderError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(html) = std::str::from_utf8(data) else {
        return;
    };

    let options = PipelineOptions::default();
    match annotate_html(html, &options) {
        Ok((output, outline)) => {
            assert!(outline.iter().all(|h| !h.id.is_empty() && (1..=9).contains(&h.level)));
            let again = annotate_html(&output, &options);
            assert!(!matches!(again, Err(RenderError::InternalError(_))));
        }
        Err(err) => panic!("unexpected error: {err}"),
    }
});
