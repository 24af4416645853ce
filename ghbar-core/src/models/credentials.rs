//! Credentials for authenticated API queries.

use std::fmt;

/// A username/token pair.
///
/// Both halves are required: a username without a token (or the reverse)
/// is treated as no credentials at all.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name used for basic auth.
    pub username: String,
    /// Personal access token.
    pub token: String,
}

impl Credentials {
    /// Creates credentials from a username and token.
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    /// Builds credentials only when both parts are present and non-empty.
    pub fn from_parts(username: Option<String>, token: Option<String>) -> Option<Self> {
        match (username, token) {
            (Some(user), Some(token)) if !user.is_empty() && !token.is_empty() => {
                Some(Self::new(user, token))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}
