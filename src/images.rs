//! Terminal image rendering support.
//!
//! Post payloads are decoded in memory and prepared for rendering
//! with whichever graphics protocol the terminal speaks (Sixel,
//! Kitty, iTerm2), falling back to Unicode halfblocks.

use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use std::sync::OnceLock;

use crate::media;
use crate::models::Post;

/// Global picker instance (initialized once at startup)
static PICKER: OnceLock<Option<Picker>> = OnceLock::new();

/// Initialize the image picker by querying terminal capabilities.
///
/// This should be called once at startup, before entering the TUI.
/// Returns `true` if a graphics protocol is available.
pub fn init_picker() -> bool {
    let picker = PICKER.get_or_init(|| {
        // Queries the terminal for sixel/kitty/iterm2 support
        match Picker::from_query_stdio() {
            Ok(p) => {
                tracing::info!("Image support detected: {:?}", p.protocol_type());
                Some(p)
            }
            Err(e) => {
                tracing::debug!("No image protocol support: {e}");
                // Unicode halfblocks work everywhere
                Some(Picker::halfblocks())
            }
        }
    });
    picker.is_some()
}

/// Get the global picker instance.
pub fn picker() -> Option<&'static Picker> {
    PICKER.get().and_then(|p| p.as_ref())
}

/// Decode a post's payload into a render protocol for the terminal.
///
/// Returns `None` when the post has no image, the payload does not
/// decode, or the picker was never initialized.
pub fn protocol_for(post: &Post) -> Option<StatefulProtocol> {
    if !post.has_image() {
        return None;
    }

    let image = match media::decode_payload(&post.content) {
        Ok(img) => img,
        Err(e) => {
            tracing::warn!("Post {} has an undecodable payload: {e}", post.id);
            return None;
        }
    };

    picker().map(|p| p.new_resize_protocol(image))
}
