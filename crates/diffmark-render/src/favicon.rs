//! Inline SVG favicon drawing a single glyph.

use std::fmt::Write as _;

/// SVG document drawing `glyph` centered in a 100x100 box. Every character of the glyph is
/// written as a hex character reference so the SVG itself stays ASCII.
pub fn favicon_svg(glyph: &str) -> String {
    let mut text = String::new();
    for ch in glyph.chars() {
        let _ = write!(&mut text, "&#x{:x};", u32::from(ch));
    }
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><text x="50%" y="50%" style="dominant-baseline:central;text-anchor:middle;font-size:90px;">{text}</text></svg>"#
    )
}

/// `data:` URI for a `<link rel="icon">`. The SVG is percent-encoded so the URI contains no
/// characters that need attribute escaping.
pub fn favicon_data_uri(glyph: &str) -> String {
    format!("data:image/svg+xml,{}", urlencoding::encode(&favicon_svg(glyph)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memo_glyph_is_written_as_hex_reference() {
        let svg = favicon_svg("\u{1F4DD}");
        assert!(svg.contains(">&#x1f4dd;</text>"));
        assert!(svg.is_ascii());
    }

    #[test]
    fn data_uri_is_percent_encoded() {
        let uri = favicon_data_uri("\u{1F4DD}");
        assert!(uri.starts_with("data:image/svg+xml,%3Csvg%20xmlns%3D%22http"));
        assert!(uri.contains("%26%23x1f4dd%3B"));
        assert!(!uri.contains('<'));
        assert!(!uri.contains('"'));
        assert!(!uri.contains(' '));
    }

    #[test]
    fn data_uri_decodes_back_to_svg() {
        let uri = favicon_data_uri("A");
        let encoded = uri.trim_start_matches("data:image/svg+xml,");
        let decoded = urlencoding::decode(encoded).expect("valid percent-encoding");
        assert_eq!(decoded, favicon_svg("A"));
    }
}
