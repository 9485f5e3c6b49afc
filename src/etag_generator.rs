//! ETag generation using BLAKE3 hashing
//!
//! Rendered pages carry a strong ETag of their final HTML for conditional
//! requests.
//!
//! # Algorithm
//!
//! 1. Hash the bytes using BLAKE3
//! 2. Take the first 128 bits (16 bytes) of the hash
//! 3. Encode as hexadecimal string
//! 4. Wrap in double quotes per HTTP specification (RFC 9110)
//!
//! # Example
//!
//! ```
//! use doc_page_renderer::etag_generator::ETagGenerator;
//!
//! let generator = ETagGenerator::new();
//! let html = b"<div class=\"topic\"><h1><a name=\"hello\"></a>Hello</h1></div>";
//! let etag = generator.generate(html);
//!
//! assert!(etag.starts_with('"'));
//! assert!(etag.ends_with('"'));
//! assert_eq!(etag.len(), 34); // 32 hex chars + 2 quotes
//! assert_eq!(etag, generator.generate(html));
//! ```

/// ETag generator using BLAKE3 hash
pub struct ETagGenerator;

impl ETagGenerator {
    /// Create a new ETag generator
    pub fn new() -> Self {
        Self
    }

    /// Generate a strong ETag: first 128 bits of BLAKE3 as quoted hex
    pub fn generate(&self, content: &[u8]) -> String {
        let hash = blake3::hash(content);
        format!("\"{}\"", hex::encode(&hash.as_bytes()[..16]))
    }
}

impl Default for ETagGenerator {
    fn default() -> Self {
        Self::new()
    }
}
