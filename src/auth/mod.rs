//! Login flow
//!
//! The service issues no tokens and keeps no sessions. A login attempt
//! fetches the whole user collection once and compares the submitted
//! credentials against the first record, which is how the service's
//! seed data is laid out. Nothing is persisted on success.

use crate::api::CircleClient;

/// Outcome of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials matched; the caller navigates to the feed.
    Success,
    /// Credentials did not match (or the user list was empty).
    InvalidCredentials,
    /// The user list could not be fetched or decoded.
    Unavailable,
}

impl LoginOutcome {
    /// User-facing message for a failed attempt, `None` on success.
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::Success => None,
            Self::InvalidCredentials => Some("Invalid credentials. Try again."),
            Self::Unavailable => Some("Could not sign in. Try again later."),
        }
    }
}

/// Attempt a login against the remote user collection.
///
/// Exactly one unauthenticated fetch; every transport or decode
/// failure collapses into [`LoginOutcome::Unavailable`]. Only the
/// first record is consulted.
pub async fn attempt_login(api: &CircleClient, email: &str, password: &str) -> LoginOutcome {
    let users = match api.list_users().await {
        Ok(users) => users,
        Err(e) => {
            tracing::warn!("Login fetch failed: {e}");
            return LoginOutcome::Unavailable;
        }
    };

    match users.first() {
        Some(user) if user.matches(email, password) => LoginOutcome::Success,
        _ => LoginOutcome::InvalidCredentials,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_with_users(users: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_first_user_match_succeeds() {
        let server = server_with_users(json!([
            {"id": 1, "email": "nemo@circle.io", "password": "nautilus"},
            {"id": 2, "email": "ned@circle.io", "password": "harpoon"},
        ]))
        .await;

        let api = CircleClient::new(&server.uri(), 1);
        let outcome = attempt_login(&api, "nemo@circle.io", "nautilus").await;
        assert_eq!(outcome, LoginOutcome::Success);
        assert!(outcome.message().is_none());
    }

    #[tokio::test]
    async fn test_matching_non_first_user_still_fails() {
        // Only the first record is consulted, even when a later one matches
        let server = server_with_users(json!([
            {"id": 1, "email": "nemo@circle.io", "password": "nautilus"},
            {"id": 2, "email": "ned@circle.io", "password": "harpoon"},
        ]))
        .await;

        let api = CircleClient::new(&server.uri(), 1);
        let outcome = attempt_login(&api, "ned@circle.io", "harpoon").await;
        assert_eq!(outcome, LoginOutcome::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_wrong_password_fails() {
        let server = server_with_users(json!([
            {"id": 1, "email": "nemo@circle.io", "password": "nautilus"},
        ]))
        .await;

        let api = CircleClient::new(&server.uri(), 1);
        let outcome = attempt_login(&api, "nemo@circle.io", "wrong").await;
        assert_eq!(outcome, LoginOutcome::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_empty_collection_fails() {
        let server = server_with_users(json!([])).await;

        let api = CircleClient::new(&server.uri(), 1);
        let outcome = attempt_login(&api, "nemo@circle.io", "nautilus").await;
        assert_eq!(outcome, LoginOutcome::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = CircleClient::new(&server.uri(), 1);
        let outcome = attempt_login(&api, "nemo@circle.io", "nautilus").await;
        assert_eq!(outcome, LoginOutcome::Unavailable);
        assert_eq!(
            outcome.message(),
            Some("Could not sign in. Try again later.")
        );
    }
}
