//! GitHub-provider errors.

use thiserror::Error;

use super::warnings::WarningKind;

/// GitHub-specific errors.
///
/// None of these escape a poll; they are logged and the affected metric
/// falls back to its cached value.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The payload did not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Notifications need both a username and a token.
    #[error("Username and auth token are required")]
    MissingCredentials,

    /// The configured repository does not exist or is not accessible.
    #[error("Repository not found: {0}")]
    RepoNotFound(String),
}

impl GithubError {
    /// The user-facing warning this error raises, if any.
    pub fn warning(&self) -> Option<WarningKind> {
        match self {
            Self::MalformedResponse(_) => None,
            Self::MissingCredentials => Some(WarningKind::MissingCredentials),
            Self::RepoNotFound(_) => Some(WarningKind::RepoNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_mapping() {
        assert_eq!(
            GithubError::MissingCredentials.warning(),
            Some(WarningKind::MissingCredentials)
        );
        assert_eq!(
            GithubError::RepoNotFound("acme/widgets".to_string()).warning(),
            Some(WarningKind::RepoNotFound)
        );
        assert!(GithubError::MalformedResponse("eof".to_string()).warning().is_none());
    }

    #[test]
    fn test_repo_not_found_names_repo() {
        let err = GithubError::RepoNotFound("acme/widgets".to_string());
        assert_eq!(err.to_string(), "Repository not found: acme/widgets");
    }
}
