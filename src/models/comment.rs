//! Comment model

use serde::{Deserialize, Serialize};

/// Text attached to a post.
///
/// Comments have no client-local identity beyond their position in the
/// list fetched from the post-scoped endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Service-assigned identifier
    pub id: u64,
    /// Comment body
    pub text: String,
}
