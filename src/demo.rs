//! Canned feed data for demo mode (screenshots, UI work without a backend)

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageBuffer, Rgb};

use crate::models::Post;

/// Demo posts with generated image payloads.
pub fn demo_posts() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            username: "pierre.aronnax".to_string(),
            title: "Sunset over the reef, no filter".to_string(),
            content: demo_payload([235, 110, 75]),
        },
        Post {
            id: 2,
            username: "conseil".to_string(),
            title: "Classifying today's catch".to_string(),
            content: demo_payload([70, 130, 180]),
        },
        Post {
            id: 3,
            username: "ned.land".to_string(),
            title: "They said bring a harpoon. I brought two.".to_string(),
            content: String::new(),
        },
    ]
}

/// A small solid-color PNG, base64-encoded like a real post payload.
fn demo_payload(rgb: [u8; 3]) -> String {
    let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(64, 64, Rgb(rgb));
    let mut bytes = Vec::new();
    if DynamicImage::ImageRgb8(buffer)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .is_err()
    {
        return String::new();
    }
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_payloads_decode() {
        let posts = demo_posts();
        assert_eq!(posts.len(), 3);

        let with_image = posts.iter().filter(|p| p.has_image()).count();
        assert_eq!(with_image, 2);

        for post in posts.iter().filter(|p| p.has_image()) {
            let image = crate::media::decode_payload(&post.content).unwrap();
            assert_eq!(image.width(), 64);
        }
    }
}
