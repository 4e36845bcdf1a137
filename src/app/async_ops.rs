//! Async operations for the TUI
//!
//! Uses channels to communicate between the sync TUI loop and async
//! tasks. The worker processes one command at a time, so every user
//! action maps to at most one outstanding request chain; nothing is
//! debounced or deduplicated.

use std::path::Path;

use tokio::sync::mpsc;

use crate::api::CircleClient;
use crate::auth::{self, LoginOutcome};
use crate::media;
use crate::models::{Comment, Post};

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum AsyncCommand {
    /// Attempt a login with the given credentials
    Login {
        /// Submitted email
        email: String,
        /// Submitted password
        password: String,
    },
    /// Reload the full post list
    RefreshPosts,
    /// Upload a new post
    CreatePost {
        /// Path of the image file to encode and upload
        image_path: String,
        /// Caption text
        caption: String,
    },
    /// Delete a post (confirmation already given)
    DeletePost {
        /// Id of the post to delete
        post_id: u64,
    },
    /// Load the comment list for a post
    LoadComments {
        /// Post whose comments to fetch
        post_id: u64,
    },
    /// Attach a comment to a post
    AddComment {
        /// Target post
        post_id: u64,
        /// Comment body (non-empty; empty input never reaches here)
        text: String,
    },
    /// Shutdown the worker
    Shutdown,
}

/// Results sent back from the async worker to the TUI
#[derive(Debug)]
pub enum AsyncResult {
    /// A login attempt finished
    LoginFinished {
        /// The outcome to route on
        outcome: LoginOutcome,
    },
    /// Post list reloaded
    PostsLoaded {
        /// The full, fresh list
        posts: Vec<Post>,
    },
    /// Post list reload failed
    PostsFailed {
        /// User-facing message
        message: String,
    },
    /// A post was created
    PostCreated,
    /// Creating a post failed
    PostCreateFailed,
    /// A post was deleted
    PostDeleted,
    /// Comment list loaded for a post
    CommentsLoaded {
        /// The post the comments belong to
        post_id: u64,
        /// The fresh comment list
        comments: Vec<Comment>,
    },
    /// A comment was attached
    CommentAdded {
        /// The post that was commented on
        post_id: u64,
    },
    /// Status message (for progress updates)
    Status {
        /// Text for the status bar
        message: String,
    },
}

/// Channel handles for communicating with the async worker
pub struct AsyncHandle {
    /// Send commands to the worker
    pub cmd_tx: mpsc::Sender<AsyncCommand>,
    /// Receive results from the worker
    pub result_rx: mpsc::Receiver<AsyncResult>,
}

/// Spawn the async worker and return handles
pub fn spawn_worker(api: CircleClient) -> AsyncHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<AsyncCommand>(32);
    let (result_tx, result_rx) = mpsc::channel::<AsyncResult>(32);

    // Spawn the worker task
    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                AsyncCommand::Shutdown => break,
                AsyncCommand::Login { email, password } => {
                    handle_login(&result_tx, &api, &email, &password).await;
                }
                AsyncCommand::RefreshPosts => {
                    reload_posts(&result_tx, &api).await;
                }
                AsyncCommand::CreatePost {
                    image_path,
                    caption,
                } => {
                    handle_create(&result_tx, &api, &image_path, &caption).await;
                }
                AsyncCommand::DeletePost { post_id } => {
                    handle_delete(&result_tx, &api, post_id).await;
                }
                AsyncCommand::LoadComments { post_id } => {
                    reload_comments(&result_tx, &api, post_id).await;
                }
                AsyncCommand::AddComment { post_id, text } => {
                    handle_add_comment(&result_tx, &api, post_id, &text).await;
                }
            }
        }
    });

    AsyncHandle { cmd_tx, result_rx }
}

async fn handle_login(
    result_tx: &mpsc::Sender<AsyncResult>,
    api: &CircleClient,
    email: &str,
    password: &str,
) {
    let outcome = auth::attempt_login(api, email, password).await;
    let _ = result_tx.send(AsyncResult::LoginFinished { outcome }).await;
}

async fn reload_posts(result_tx: &mpsc::Sender<AsyncResult>, api: &CircleClient) {
    match api.list_posts().await {
        Ok(posts) => {
            let _ = result_tx.send(AsyncResult::PostsLoaded { posts }).await;
        }
        Err(e) => {
            tracing::warn!("Post reload failed: {e}");
            let _ = result_tx
                .send(AsyncResult::PostsFailed {
                    message: "Error loading posts".to_string(),
                })
                .await;
        }
    }
}

/// Upload a post, then reload the list.
///
/// Failures at either step raise the error snackbar; the caption and
/// image path stay in the compose form so the user can retry.
async fn handle_create(
    result_tx: &mpsc::Sender<AsyncResult>,
    api: &CircleClient,
    image_path: &str,
    caption: &str,
) {
    let _ = result_tx
        .send(AsyncResult::Status {
            message: "Uploading...".to_string(),
        })
        .await;

    let payload = match media::encode_image_file(Path::new(image_path)) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("Could not read image for upload: {e}");
            let _ = result_tx.send(AsyncResult::PostCreateFailed).await;
            return;
        }
    };

    match api.create_post(caption, &payload).await {
        Ok(post) => {
            tracing::debug!("Created post {}", post.id);
            let _ = result_tx.send(AsyncResult::PostCreated).await;
            reload_posts(result_tx, api).await;
        }
        Err(e) => {
            tracing::warn!("Post creation failed: {e}");
            let _ = result_tx.send(AsyncResult::PostCreateFailed).await;
        }
    }
}

/// Delete a post, purge comments, then refresh comment and post lists.
///
/// The steps run in this order and each failure short-circuits the
/// rest. Apart from the posts reload, failures are logged without a
/// user-facing notification; only the full chain raises the snackbar.
async fn handle_delete(result_tx: &mpsc::Sender<AsyncResult>, api: &CircleClient, post_id: u64) {
    if let Err(e) = api.delete_post(post_id).await {
        tracing::warn!("Failed to delete post {post_id}: {e}");
        return;
    }

    if let Err(e) = api.purge_comments().await {
        tracing::warn!("Failed to purge comments after deleting post {post_id}: {e}");
        return;
    }

    match api.list_comments(post_id).await {
        Ok(comments) => {
            let _ = result_tx
                .send(AsyncResult::CommentsLoaded { post_id, comments })
                .await;
        }
        Err(e) => {
            tracing::warn!("Failed to reload comments for post {post_id}: {e}");
            return;
        }
    }

    reload_posts(result_tx, api).await;

    let _ = result_tx.send(AsyncResult::PostDeleted).await;
}

async fn reload_comments(result_tx: &mpsc::Sender<AsyncResult>, api: &CircleClient, post_id: u64) {
    match api.list_comments(post_id).await {
        Ok(comments) => {
            let _ = result_tx
                .send(AsyncResult::CommentsLoaded { post_id, comments })
                .await;
        }
        Err(e) => {
            // No user-facing notification for comment failures
            tracing::warn!("Failed to load comments for post {post_id}: {e}");
        }
    }
}

async fn handle_add_comment(
    result_tx: &mpsc::Sender<AsyncResult>,
    api: &CircleClient,
    post_id: u64,
    text: &str,
) {
    if text.is_empty() {
        tracing::debug!("Comment text is empty, nothing to post");
        return;
    }

    match api.add_comment(post_id, text).await {
        Ok(comment) => {
            tracing::debug!("Created comment {} on post {post_id}", comment.id);
            let _ = result_tx.send(AsyncResult::CommentAdded { post_id }).await;
            reload_comments(result_tx, api, post_id).await;
        }
        Err(e) => {
            // No user-facing notification for comment failures
            tracing::warn!("Failed to comment on post {post_id}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn drain(result_rx: &mut mpsc::Receiver<AsyncResult>) -> Vec<AsyncResult> {
        let mut results = Vec::new();
        while let Ok(result) = result_rx.try_recv() {
            results.push(result);
        }
        results
    }

    #[tokio::test]
    async fn test_delete_chain_order() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/1/posts/5"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/users//posts/comments"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/1/posts/5/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/1/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let api = CircleClient::new(&server.uri(), 1);
        let (result_tx, mut result_rx) = mpsc::channel(32);
        handle_delete(&result_tx, &api, 5).await;

        let results = drain(&mut result_rx).await;
        assert!(matches!(
            results[0],
            AsyncResult::CommentsLoaded { post_id: 5, .. }
        ));
        assert!(matches!(results[1], AsyncResult::PostsLoaded { .. }));
        assert!(matches!(results[2], AsyncResult::PostDeleted));
    }

    #[tokio::test]
    async fn test_failed_delete_is_silent() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/1/posts/5"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = CircleClient::new(&server.uri(), 1);
        let (result_tx, mut result_rx) = mpsc::channel(32);
        handle_delete(&result_tx, &api, 5).await;

        // Logged only: no snackbar, no reloads
        assert!(drain(&mut result_rx).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_failure_keeps_no_success_results() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/1/posts"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("pic.png");
        image::ImageBuffer::from_pixel(1, 1, image::Rgb([1u8, 2, 3]))
            .save(&image_path)
            .unwrap();

        let api = CircleClient::new(&server.uri(), 1);
        let (result_tx, mut result_rx) = mpsc::channel(32);
        handle_create(&result_tx, &api, image_path.to_str().unwrap(), "caption").await;

        let results = drain(&mut result_rx).await;
        assert!(matches!(results[0], AsyncResult::Status { .. }));
        assert!(matches!(results[1], AsyncResult::PostCreateFailed));
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_create_success_reloads_posts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/1/posts"))
            .respond_with(ResponseTemplate::new(201).set_body_json(
                json!({"id": 3, "username": "nemo", "title": "caption", "content": "eA=="}),
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/1/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!([{"id": 3, "username": "nemo", "title": "caption", "content": ""}]),
            ))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("pic.png");
        image::ImageBuffer::from_pixel(1, 1, image::Rgb([1u8, 2, 3]))
            .save(&image_path)
            .unwrap();

        let api = CircleClient::new(&server.uri(), 1);
        let (result_tx, mut result_rx) = mpsc::channel(32);
        handle_create(&result_tx, &api, image_path.to_str().unwrap(), "caption").await;

        let results = drain(&mut result_rx).await;
        assert!(matches!(results[1], AsyncResult::PostCreated));
        let AsyncResult::PostsLoaded { posts } = &results[2] else {
            panic!("expected a posts reload after create");
        };
        assert_eq!(posts[0].title, "caption");
    }

    #[tokio::test]
    async fn test_empty_comment_never_reaches_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/1/posts/5/comments"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let api = CircleClient::new(&server.uri(), 1);
        let (result_tx, mut result_rx) = mpsc::channel(32);
        handle_add_comment(&result_tx, &api, 5, "").await;

        assert!(drain(&mut result_rx).await.is_empty());
    }
}
