/// Data-URI helpers
///
/// The generative endpoint speaks raw base64 plus a declared MIME type, while
/// the rest of the application passes self-describing `data:` URIs around.
/// This module converts between the two and sniffs MIME types from magic
/// bytes when nothing is declared.

use base64::Engine;

use crate::error::{AppError, Result};

/// MIME type assumed for outbound payloads with no declared type.
pub const DEFAULT_UPLOAD_MIME: &str = "image/jpeg";

/// MIME type assumed for response parts with no declared type.
pub const DEFAULT_RESULT_MIME: &str = "image/png";

/// Strip a `data:<mime>;base64,` prefix if present, returning the raw
/// base64 body. A string without a comma is assumed to already be raw.
pub fn strip_prefix(payload: &str) -> &str {
    match payload.split_once(',') {
        Some((_, body)) => body,
        None => payload,
    }
}

/// Extract the declared MIME type from a data URI, falling back to
/// [`DEFAULT_UPLOAD_MIME`] when the payload is raw or malformed.
pub fn declared_mime(payload: &str) -> &str {
    if let Some(rest) = payload.strip_prefix("data:") {
        if let Some((header, _)) = rest.split_once(',') {
            let mime = header.split(';').next().unwrap_or("");
            if !mime.is_empty() {
                return mime;
            }
        }
    }
    DEFAULT_UPLOAD_MIME
}

/// Compose a data URI from a MIME type and raw base64 body.
pub fn build(mime: &str, base64_body: &str) -> String {
    format!("data:{};base64,{}", mime, base64_body)
}

/// Encode raw bytes into a data URI.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    build(
        mime,
        &base64::engine::general_purpose::STANDARD.encode(bytes),
    )
}

/// Decode the byte body of a data URI (or raw base64 string).
pub fn decode_bytes(payload: &str) -> Result<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(strip_prefix(payload))
        .map_err(AppError::from)
}

/// Detect an image MIME type from magic bytes.
///
/// Recognizes the formats the endpoint is known to accept and return.
pub fn sniff_mime(data: &[u8]) -> Option<&'static str> {
    if data.len() < 12 {
        return None;
    }

    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }

    // JPEG: FF D8 FF
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }

    // WebP: RIFF....WEBP
    if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    // GIF: GIF87a / GIF89a
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }

    // BMP: BM
    if data.starts_with(b"BM") {
        return Some("image/bmp");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_prefix("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_prefix("AAAA"), "AAAA");
    }

    #[test]
    fn test_declared_mime() {
        assert_eq!(declared_mime("data:image/png;base64,AAAA"), "image/png");
        assert_eq!(declared_mime("data:image/webp;base64,BBBB"), "image/webp");
        // Raw base64 falls back to JPEG
        assert_eq!(declared_mime("AAAA"), DEFAULT_UPLOAD_MIME);
        // Malformed header falls back too
        assert_eq!(declared_mime("data:,AAAA"), DEFAULT_UPLOAD_MIME);
    }

    #[test]
    fn test_build_round_trip() {
        let uri = encode("image/jpeg", &[0xFF, 0xD8, 0xFF, 0xE0]);
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        assert_eq!(declared_mime(&uri), "image/jpeg");
        assert_eq!(decode_bytes(&uri).unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(decode_bytes("data:image/png;base64,!!!not-base64!!!").is_err());
    }

    #[test]
    fn test_sniff_mime() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert_eq!(sniff_mime(&png), Some("image/png"));

        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0];
        jpeg.resize(16, 0);
        assert_eq!(sniff_mime(&jpeg), Some("image/jpeg"));

        let mut webp = b"RIFF\x00\x00\x00\x00WEBP".to_vec();
        webp.resize(16, 0);
        assert_eq!(sniff_mime(&webp), Some("image/webp"));

        assert_eq!(sniff_mime(b"plain text, not an image"), None);
        assert_eq!(sniff_mime(&[0xFF; 4]), None);
    }
}
