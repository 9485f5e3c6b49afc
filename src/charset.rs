//! Character encoding detection and decoding for markdown sources
//!
//! The source provider hands the pipeline a raw byte stream. Before the
//! markdown can be rendered it has to be decoded to UTF-8.
//!
//! # Detection Cascade
//!
//! 1. **Content-Type**: `charset` parameter of the content type reported by the source provider
//! 2. **Byte Order Mark**: UTF-8, UTF-16LE or UTF-16BE BOM at the start of the stream
//! 3. **Default to UTF-8**
//!
//! # Examples
//!
//! ```rust
//! use doc_page_renderer::charset::{decode_source, detect_charset};
//!
//! let charset = detect_charset(Some("text/markdown; charset=ISO-8859-1"), b"# Title");
//! assert_eq!(charset, "ISO-8859-1");
//!
//! let charset = detect_charset(None, b"\xEF\xBB\xBF# Title");
//! assert_eq!(charset, "UTF-8");
//!
//! let text = decode_source(b"\xEF\xBB\xBF# Title", None).unwrap();
//! assert_eq!(text, "# Title");
//! ```

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

use crate::error::RenderError;

/// Default charset when detection fails
const DEFAULT_CHARSET: &str = "UTF-8";

/// Detect the character encoding of a markdown source
///
/// Always returns a charset name, defaulting to "UTF-8". Names taken from the
/// content type are upper-cased; names derived from a BOM use the canonical
/// encoding name.
pub fn detect_charset(content_type: Option<&str>, source: &[u8]) -> String {
    if let Some(ct) = content_type
        && let Some(charset) = extract_charset_from_content_type(ct)
    {
        return normalize_charset(&charset);
    }

    if let Some((encoding, _)) = Encoding::for_bom(source) {
        return normalize_charset(encoding.name());
    }

    DEFAULT_CHARSET.to_string()
}

/// Extract charset from a Content-Type value
///
/// # Supported Formats
///
/// - `text/markdown; charset=UTF-8`
/// - `text/markdown; charset="UTF-8"`
/// - `text/markdown;charset=UTF-8` (no space)
/// - `text/markdown; charset=UTF-8; variant=GFM` (multiple parameters)
///
/// # Examples
///
/// ```rust
/// use doc_page_renderer::charset::extract_charset_from_content_type;
///
/// assert_eq!(
///     extract_charset_from_content_type("text/markdown; charset=\"ISO-8859-1\""),
///     Some("ISO-8859-1".to_string())
/// );
/// assert_eq!(extract_charset_from_content_type("text/markdown"), None);
/// ```
pub fn extract_charset_from_content_type(content_type: &str) -> Option<String> {
    static CHARSET_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let regex =
        CHARSET_REGEX.get_or_init(|| Regex::new(r#"(?i)charset\s*=\s*"?([^";,\s]+)"?"#).ok());
    let regex = regex.as_ref()?;

    regex
        .captures(content_type)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Normalize charset name to uppercase
pub fn normalize_charset(charset: &str) -> String {
    charset.to_uppercase()
}

/// Decode a markdown source to UTF-8 text
///
/// A byte order mark matching the detected encoding is dropped. UTF-8 input
/// without a BOM is borrowed, everything else is transcoded.
///
/// # Errors
///
/// - `RenderError::EncodingError` if the charset is unknown or the bytes are
///   invalid for it
pub fn decode_source<'a>(
    source: &'a [u8],
    content_type: Option<&str>,
) -> Result<Cow<'a, str>, RenderError> {
    let charset = detect_charset(content_type, source);

    let encoding = Encoding::for_label(charset.as_bytes()).ok_or_else(|| {
        RenderError::EncodingError(format!("Unsupported charset '{}' for markdown source", charset))
    })?;

    let payload = match Encoding::for_bom(source) {
        Some((bom_encoding, bom_len)) if bom_encoding == encoding => &source[bom_len..],
        _ => source,
    };

    if encoding == UTF_8 {
        return std::str::from_utf8(payload).map(Cow::Borrowed).map_err(|e| {
            RenderError::EncodingError(format!(
                "Invalid UTF-8 at byte position {}: {} (detected charset: {})",
                e.valid_up_to(),
                e,
                charset
            ))
        });
    }

    encoding
        .decode_without_bom_handling_and_without_replacement(payload)
        .ok_or_else(|| {
            RenderError::EncodingError(format!("Invalid byte sequence for charset '{}'", charset))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract_charset_from_content_type_basic() {
        assert_eq!(
            extract_charset_from_content_type("text/markdown; charset=UTF-8"),
            Some("UTF-8".to_string())
        );
    }

    #[test]
    fn test_extract_charset_from_content_type_no_space() {
        assert_eq!(
            extract_charset_from_content_type("text/markdown;charset=windows-1252"),
            Some("windows-1252".to_string())
        );
    }

    #[test]
    fn test_extract_charset_from_content_type_multiple_params() {
        assert_eq!(
            extract_charset_from_content_type("text/markdown; charset=UTF-8; variant=GFM"),
            Some("UTF-8".to_string())
        );
    }

    #[test]
    fn test_extract_charset_from_content_type_case_insensitive() {
        assert_eq!(
            extract_charset_from_content_type("text/markdown; CHARSET=utf-8"),
            Some("utf-8".to_string())
        );
    }

    #[test]
    fn test_extract_charset_from_content_type_missing() {
        assert_eq!(extract_charset_from_content_type("text/markdown"), None);
        assert_eq!(extract_charset_from_content_type(""), None);
    }

    #[test]
    fn test_detect_charset_content_type_wins_over_bom() {
        let charset = detect_charset(Some("text/markdown; charset=utf-8"), b"\xFF\xFEx\x00");
        assert_eq!(charset, "UTF-8");
    }

    #[test]
    fn test_detect_charset_from_utf16_bom() {
        assert_eq!(detect_charset(None, b"\xFF\xFE#\x00"), "UTF-16LE");
        assert_eq!(detect_charset(None, b"\xFE\xFF\x00#"), "UTF-16BE");
    }

    #[test]
    fn test_detect_charset_default() {
        assert_eq!(detect_charset(None, b"# Plain"), "UTF-8");
        assert_eq!(detect_charset(Some("text/plain"), b""), "UTF-8");
    }

    #[test]
    fn test_decode_utf8_is_borrowed() {
        let decoded = decode_source(b"# Hello", None).expect("valid UTF-8");
        assert!(matches!(decoded, Cow::Borrowed("# Hello")));
    }

    #[test]
    fn test_decode_strips_utf8_bom() {
        let decoded = decode_source(b"\xEF\xBB\xBF# Hello", None).expect("valid UTF-8");
        assert_eq!(decoded, "# Hello");
    }

    #[test]
    fn test_decode_utf16le_with_bom() {
        let decoded = decode_source(b"\xFF\xFE#\x00 \x00A\x00", None).expect("valid UTF-16LE");
        assert_eq!(decoded, "# A");
    }

    #[test]
    fn test_decode_iso_8859_1_from_content_type() {
        let decoded = decode_source(b"# Caf\xE9", Some("text/markdown; charset=ISO-8859-1"))
            .expect("transcodes ISO-8859-1");
        assert_eq!(decoded, "# Café");
    }

    #[test]
    fn test_decode_invalid_utf8() {
        match decode_source(b"# \xFF\xFF broken", Some("text/markdown; charset=utf-8")) {
            Err(RenderError::EncodingError(msg)) => assert!(msg.contains("Invalid UTF-8")),
            other => panic!("Expected EncodingError, got: {other:?}"),
        }
    }

    #[test]
    fn test_decode_unknown_charset() {
        match decode_source(b"# x", Some("text/markdown; charset=x-unknown-test")) {
            Err(RenderError::EncodingError(msg)) => assert!(msg.contains("Unsupported charset")),
            other => panic!("Expected EncodingError, got: {other:?}"),
        }
    }

    #[test]
    fn test_decode_empty_source() {
        assert_eq!(decode_source(b"", None).expect("empty is valid"), "");
    }

    proptest! {
        #[test]
        fn prop_utf8_text_decodes_unchanged(text in "\\PC{0,200}") {
            let decoded = decode_source(text.as_bytes(), None);
            prop_assert!(decoded.is_ok());
            let decoded = decoded.unwrap();
            prop_assert_eq!(decoded.as_ref(), text.as_str());
        }

        #[test]
        fn prop_content_type_charset_is_upper_cased(
            charset in prop::sample::select(
                vec!["utf-8", "iso-8859-1", "windows-1252", "shift_jis"],
            ),
        ) {
            let content_type = format!("text/markdown; charset={charset}");
            prop_assert_eq!(detect_charset(Some(&content_type), b""), charset.to_uppercase());
        }
    }
}
