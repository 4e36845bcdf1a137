//! Image payload codec
//!
//! Post images travel as base64 text inside the post's `content`
//! field. This module round-trips between image files on disk and
//! that text-safe encoding, and decodes payloads for terminal
//! rendering and sharing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::DynamicImage;

/// Read an image file and encode its bytes for the post body.
///
/// No size or type validation happens here; whatever bytes are on
/// disk are what the service receives.
pub fn encode_image_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image file {}", path.display()))?;
    Ok(STANDARD.encode(bytes))
}

/// Decode a post's payload into an image for rendering.
pub fn decode_payload(payload: &str) -> Result<DynamicImage> {
    let bytes = STANDARD
        .decode(payload.trim())
        .context("Post payload is not valid base64")?;
    image::load_from_memory(&bytes).context("Post payload is not a decodable image")
}

/// Write a post's decoded payload to a temp file and return its path.
///
/// Used by the share flow, which hands a real file to the host.
pub fn decode_to_temp_file(post_id: u64, payload: &str) -> Result<PathBuf> {
    let bytes = STANDARD
        .decode(payload.trim())
        .context("Post payload is not valid base64")?;

    let path = std::env::temp_dir().join(format!("mycircle-post-{post_id}.jpg"));
    std::fs::write(&path, bytes)
        .with_context(|| format!("Failed to write shared image to {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::tempdir;

    fn tiny_png(dir: &Path) -> PathBuf {
        let path = dir.join("tiny.png");
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(2, 3, Rgb([200u8, 100, 50]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_encode_then_decode_preserves_dimensions() {
        let dir = tempdir().unwrap();
        let file = tiny_png(dir.path());

        let payload = encode_image_file(&file).unwrap();
        let decoded = decode_payload(&payload).unwrap();
        assert_eq!(decoded.width(), 2);
        assert_eq!(decoded.height(), 3);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_payload("not!!base64").is_err());
        // Valid base64, but not an image
        assert!(decode_payload(&STANDARD.encode(b"plain text")).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = encode_image_file(Path::new("/no/such/image.png"));
        assert!(err.is_err());
    }

    #[test]
    fn test_temp_file_written() {
        let dir = tempdir().unwrap();
        let file = tiny_png(dir.path());
        let payload = encode_image_file(&file).unwrap();

        let out = decode_to_temp_file(42, &payload).unwrap();
        assert!(out.exists());
        std::fs::remove_file(out).unwrap();
    }
}
