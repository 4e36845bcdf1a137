//! Post model

use serde::{Deserialize, Serialize};

/// A feed post.
///
/// The image travels inside `content` as base64 text; an empty string
/// means the post has no image attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Service-assigned identifier
    pub id: u64,
    /// Author username (the service omits it on some records)
    #[serde(default)]
    pub username: String,
    /// Caption
    #[serde(default)]
    pub title: String,
    /// Image payload, base64-encoded
    #[serde(default)]
    pub content: String,
}

impl Post {
    /// Whether this post carries an image payload.
    pub fn has_image(&self) -> bool {
        !self.content.is_empty()
    }

    /// Author name for display, falling back when the record has none.
    pub fn author(&self) -> &str {
        if self.username.is_empty() {
            "anonymous"
        } else {
            &self.username
        }
    }

    /// Get a short preview of the caption (for list display)
    pub fn preview(&self, max_len: usize) -> String {
        let title = self.title.replace('\n', " ");
        if title.len() <= max_len {
            title
        } else {
            format!("{}...", &title[..max_len.saturating_sub(3)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        // The service sometimes returns bare records
        let post: Post = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(post.id, 7);
        assert!(!post.has_image());
        assert_eq!(post.author(), "anonymous");
    }

    #[test]
    fn test_missing_id_is_a_decode_error() {
        let result = serde_json::from_str::<Post>(r#"{"title": "no id"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_preview_truncates() {
        let post = Post {
            id: 1,
            username: "nemo".to_string(),
            title: "a caption that runs on and on and on".to_string(),
            content: String::new(),
        };
        assert_eq!(post.preview(12), "a caption...");
        assert_eq!(post.preview(100), "a caption that runs on and on and on");
    }
}
