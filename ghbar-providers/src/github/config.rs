//! GitHub provider configuration.

use ghbar_core::{CoreError, Credentials};
use ghbar_fetch::GITHUB_API_URL;
use serde::{Deserialize, Serialize};

// ============================================================================
// Notification Scope
// ============================================================================

/// Which notifications to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationScope {
    /// Every unread notification of the user.
    #[default]
    All,
    /// Only notifications for the configured repository.
    Repo,
}

// ============================================================================
// Config
// ============================================================================

/// Options recognized by the GitHub provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Repository to check, as `owner/name`. Empty disables repo scoping.
    #[serde(default = "default_repo")]
    pub repo: String,

    /// GitHub username, needed for notifications.
    #[serde(default)]
    pub username: Option<String>,

    /// Personal access token, needed for notifications.
    #[serde(default, skip_serializing)]
    pub auth_token: Option<String>,

    /// Display template. Placeholders: `{repo}`, `{issues}`,
    /// `{pull_requests}`, `{notifications}`.
    #[serde(default = "default_format")]
    pub format: String,

    /// Template for the `{notifications}` badge. Placeholder: `{count}`.
    #[serde(default = "default_format_notifications")]
    pub format_notifications: String,

    /// Which notifications to count.
    #[serde(default)]
    pub notifications: NotificationScope,

    /// Steady-state refresh interval in seconds.
    #[serde(default = "default_cache_timeout")]
    pub cache_timeout: u64,

    /// Pointer button that opens the notifications page. `0` disables.
    #[serde(default = "default_button_notifications")]
    pub button_notifications: u8,

    /// Optional display color.
    #[serde(default)]
    pub color: Option<String>,

    /// API root, overridable for GitHub Enterprise.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_repo() -> String {
    "ultrabug/py3status".to_string()
}

fn default_format() -> String {
    "{repo} {issues}/{pull_requests}{notifications}".to_string()
}

fn default_format_notifications() -> String {
    " 🔔{count}".to_string()
}

fn default_cache_timeout() -> u64 {
    60
}

fn default_button_notifications() -> u8 {
    1
}

fn default_api_base() -> String {
    GITHUB_API_URL.to_string()
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            repo: default_repo(),
            username: None,
            auth_token: None,
            format: default_format(),
            format_notifications: default_format_notifications(),
            notifications: NotificationScope::default(),
            cache_timeout: default_cache_timeout(),
            button_notifications: default_button_notifications(),
            color: None,
            api_base: default_api_base(),
        }
    }
}

impl GithubConfig {
    /// Returns the credential pair when both username and token are set.
    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(self.username.clone(), self.auth_token.clone())
    }

    /// Checks the options that would make every poll meaningless.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.format.trim().is_empty() {
            return Err(CoreError::InvalidConfig("format must not be empty".to_string()));
        }
        if self.cache_timeout == 0 {
            return Err(CoreError::InvalidConfig(
                "cache_timeout must be at least 1 second".to_string(),
            ));
        }
        if self.api_base.trim().is_empty() {
            return Err(CoreError::InvalidConfig("api_base must not be empty".to_string()));
        }
        Ok(())
    }
}
