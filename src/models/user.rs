//! User record as returned by the service's collection endpoint

use serde::{Deserialize, Serialize};

/// A user record from `GET /users/`.
///
/// The service returns the whole collection; credentials are compared
/// client-side, so the password field arrives in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Service-assigned identifier
    pub id: u64,
    /// Login email
    pub email: String,
    /// Login password (plaintext on the wire)
    pub password: String,
}

impl User {
    /// Check whether the given credentials match this record exactly.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}
