//! Share handoff to the host
//!
//! The terminal analog of a share sheet: the post's image is decoded
//! to a temp file and handed to the host's default opener along with
//! a share message. Neither outcome branch is surfaced to the user.

use anyhow::Result;

use crate::media;
use crate::models::Post;

/// What happened to a share handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The host accepted the handoff.
    Shared,
    /// The host declined or had no handler.
    Dismissed,
}

/// Share message for a post.
pub fn share_message(post: &Post) -> String {
    format!("Check out this post: {}", post.title)
}

/// Hand a post off to the host opener.
pub fn share_post(post: &Post) -> Result<ShareOutcome> {
    let message = share_message(post);

    if !post.has_image() {
        tracing::debug!("Share dismissed, post {} has no image", post.id);
        return Ok(ShareOutcome::Dismissed);
    }

    let path = media::decode_to_temp_file(post.id, &post.content)?;

    match open::that(&path) {
        Ok(()) => {
            tracing::debug!("Shared post {}: {message}", post.id);
            Ok(ShareOutcome::Shared)
        }
        Err(e) => {
            tracing::debug!("Share dismissed for post {}: {e}", post.id);
            Ok(ShareOutcome::Dismissed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_message_includes_caption() {
        let post = Post {
            id: 1,
            username: "nemo".to_string(),
            title: "sunset over the reef".to_string(),
            content: String::new(),
        };
        assert_eq!(
            share_message(&post),
            "Check out this post: sunset over the reef"
        );
    }

    #[test]
    fn test_share_without_image_is_dismissed() {
        let post = Post {
            id: 1,
            username: "nemo".to_string(),
            title: "no image".to_string(),
            content: String::new(),
        };
        assert_eq!(share_post(&post).unwrap(), ShareOutcome::Dismissed);
    }
}
