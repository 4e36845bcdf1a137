//! REST client for the MyCircle service
//!
//! Every operation is a single request/response cycle; there is no
//! retry, timeout tuning, or request coalescing. The client is scoped
//! to one user id for the lifetime of the session.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;

use crate::models::{Comment, Post, User};

/// Default base URL of the remote service
pub const DEFAULT_BASE_URL: &str = "https://api-mobile.herokuapp.com";

/// MyCircle API client
pub struct CircleClient {
    client: Client,
    base_url: String,
    user_id: u64,
}

impl CircleClient {
    /// Create a new client against the given base URL, scoped to a user id.
    pub fn new(base_url: &str, user_id: u64) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id,
        }
    }

    /// Build API URL
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Fetch the full user collection.
    ///
    /// The service has no lookup-by-email; callers filter locally.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let url = self.api_url("/users/");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch users")?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("MyCircle error {status} listing users");
        }

        response
            .json()
            .await
            .context("Failed to parse users response")
    }

    /// Fetch all posts for the session's user.
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let url = self.api_url(&format!("/users/{}/posts", self.user_id));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch posts")?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("MyCircle error {status} listing posts");
        }

        response
            .json()
            .await
            .context("Failed to parse posts response")
    }

    /// Create a post with a caption and a base64 image payload.
    pub async fn create_post(&self, title: &str, content: &str) -> Result<Post> {
        let url = self.api_url(&format!("/users/{}/posts", self.user_id));

        let request = NewPost {
            title: title.to_string(),
            content: content.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to create post")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("MyCircle error {status}: {body}");
        }

        response
            .json()
            .await
            .context("Failed to parse created post")
    }

    /// Delete a post by id.
    pub async fn delete_post(&self, post_id: u64) -> Result<()> {
        let url = self.api_url(&format!("/users/{}/posts/{}", self.user_id, post_id));

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .context("Failed to delete post")?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("MyCircle error {status} deleting post {post_id}");
        }

        Ok(())
    }

    /// Fetch the comments attached to a post.
    pub async fn list_comments(&self, post_id: u64) -> Result<Vec<Comment>> {
        let url = self.api_url(&format!(
            "/users/{}/posts/{}/comments",
            self.user_id, post_id
        ));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch comments")?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("MyCircle error {status} listing comments for post {post_id}");
        }

        response
            .json()
            .await
            .context("Failed to parse comments response")
    }

    /// Attach a comment to a post.
    ///
    /// Callers are expected to reject empty text before reaching the
    /// network; the service itself accepts it.
    pub async fn add_comment(&self, post_id: u64, text: &str) -> Result<Comment> {
        let url = self.api_url(&format!(
            "/users/{}/posts/{}/comments",
            self.user_id, post_id
        ));

        let request = NewComment {
            text: text.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to create comment")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("MyCircle error {status}: {body}");
        }

        response
            .json()
            .await
            .context("Failed to parse created comment")
    }

    /// Issue the service's comment purge.
    ///
    /// The purge endpoint carries no user or post id; the scope of what
    /// it removes is whatever the service decides for that bare path.
    pub async fn purge_comments(&self) -> Result<()> {
        let url = self.api_url("/users//posts/comments");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .context("Failed to purge comments")?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("MyCircle error {status} purging comments");
        }

        Ok(())
    }
}

// ==================== Request bodies ====================

#[derive(Debug, Serialize)]
struct NewPost {
    title: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct NewComment {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_posts() -> serde_json::Value {
        json!([
            {"id": 1, "username": "nemo", "title": "first", "content": ""},
            {"id": 2, "username": "ned", "title": "second", "content": ""},
        ])
    }

    #[tokio::test]
    async fn test_list_posts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/1/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_posts()))
            .mount(&server)
            .await;

        let api = CircleClient::new(&server.uri(), 1);
        let posts = api.list_posts().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "first");
    }

    #[tokio::test]
    async fn test_list_posts_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/1/posts"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = CircleClient::new(&server.uri(), 1);
        assert!(api.list_posts().await.is_err());
    }

    #[tokio::test]
    async fn test_create_post_roundtrip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/1/posts"))
            .and(body_json(json!({"title": "sunset", "content": "aGVsbG8="})))
            .respond_with(ResponseTemplate::new(201).set_body_json(
                json!({"id": 3, "username": "nemo", "title": "sunset", "content": "aGVsbG8="}),
            ))
            .mount(&server)
            .await;

        let api = CircleClient::new(&server.uri(), 1);
        let post = api.create_post("sunset", "aGVsbG8=").await.unwrap();
        assert_eq!(post.id, 3);
        assert_eq!(post.title, "sunset");
    }

    #[tokio::test]
    async fn test_create_post_failure_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/1/posts"))
            .respond_with(ResponseTemplate::new(422).set_body_string("rejected"))
            .mount(&server)
            .await;

        let api = CircleClient::new(&server.uri(), 1);
        assert!(api.create_post("bad", "").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_then_reload_excludes_post() {
        let server = MockServer::start().await;
        // First reload sees both posts, the reload after delete sees one
        Mock::given(method("GET"))
            .and(path("/users/1/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_posts()))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/1/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!([{"id": 2, "username": "ned", "title": "second", "content": ""}]),
            ))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/users/1/posts/1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let api = CircleClient::new(&server.uri(), 1);
        let before = api.list_posts().await.unwrap();
        assert!(before.iter().any(|p| p.id == 1));

        api.delete_post(1).await.unwrap();

        let after = api.list_posts().await.unwrap();
        assert!(!after.iter().any(|p| p.id == 1));
    }

    #[tokio::test]
    async fn test_comments_roundtrip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/1/posts/2/comments"))
            .and(body_json(json!({"text": "nice shot"})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"id": 9, "text": "nice shot"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/1/posts/2/comments"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": 9, "text": "nice shot"}])),
            )
            .mount(&server)
            .await;

        let api = CircleClient::new(&server.uri(), 1);
        let created = api.add_comment(2, "nice shot").await.unwrap();
        assert_eq!(created.text, "nice shot");

        let comments = api.list_comments(2).await.unwrap();
        assert_eq!(comments.len(), 1);
    }

    #[tokio::test]
    async fn test_purge_comments_hits_bare_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users//posts/comments"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let api = CircleClient::new(&server.uri(), 1);
        api.purge_comments().await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_posts_surface_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/1/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"title": "no id"}])))
            .mount(&server)
            .await;

        let api = CircleClient::new(&server.uri(), 1);
        assert!(api.list_posts().await.is_err());
    }
}
