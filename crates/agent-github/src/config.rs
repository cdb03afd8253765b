//! Configuration for the GitHub contents client

use crate::error::{GitHubError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// What the writer does when fetching the current file fails for a reason
/// other than "not found"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingFilePolicy {
    /// Surface the fetch error without attempting a write
    #[default]
    Strict,
    /// Treat the file as missing and attempt a create
    ///
    /// If the file does exist, the tokenless create is rejected by GitHub and
    /// reported as a write failure.
    TreatAsMissing,
}

/// Configuration for [`GitHubClient`](crate::GitHubClient)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// REST API base URL
    pub api_base: String,

    /// Personal access token or app token
    #[serde(skip_serializing)]
    pub token: Option<String>,

    /// User-Agent header (required by the GitHub API)
    pub user_agent: String,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Handling of non-404 errors while fetching the current file
    pub missing_file_policy: MissingFilePolicy,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: None,
            user_agent: concat!("stock-agent/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout: Duration::from_secs(30),
            missing_file_policy: MissingFilePolicy::Strict,
        }
    }
}

impl GitHubConfig {
    /// Create a new configuration builder
    pub fn builder() -> GitHubConfigBuilder {
        GitHubConfigBuilder::default()
    }

    /// Load configuration from `GITHUB_TOKEN` and `GITHUB_API_URL`
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api_base).map_err(|e| {
            GitHubError::Config(format!("Invalid API base URL '{}': {e}", self.api_base))
        })?;

        if self.request_timeout.is_zero() {
            return Err(GitHubError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(GitHubError::Config("user_agent must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Builder for GitHubConfig
#[derive(Debug, Default)]
pub struct GitHubConfigBuilder {
    api_base: Option<String>,
    token: Option<String>,
    user_agent: Option<String>,
    request_timeout: Option<Duration>,
    missing_file_policy: Option<MissingFilePolicy>,
}

impl GitHubConfigBuilder {
    /// Set the API base URL
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = Some(url.into());
        self
    }

    /// Set the access token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the User-Agent header
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the policy for non-404 fetch errors
    pub fn missing_file_policy(mut self, policy: MissingFilePolicy) -> Self {
        self.missing_file_policy = Some(policy);
        self
    }

    /// Load token and API base from the environment
    pub fn with_env(mut self) -> Self {
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.trim().is_empty() {
                self.token = Some(token);
            }
        }
        if let Ok(url) = std::env::var("GITHUB_API_URL") {
            self.api_base = Some(url);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<GitHubConfig> {
        let defaults = GitHubConfig::default();

        let config = GitHubConfig {
            api_base: self.api_base.unwrap_or(defaults.api_base),
            token: self.token,
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            missing_file_policy: self
                .missing_file_policy
                .unwrap_or(defaults.missing_file_policy),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GitHubConfig::default();
        assert_eq!(config.api_base, "https://api.github.com");
        assert_eq!(config.missing_file_policy, MissingFilePolicy::Strict);
        assert!(config.token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = GitHubConfig::builder()
            .api_base("https://github.example.com/api/v3")
            .token("ghp_test")
            .request_timeout(Duration::from_secs(5))
            .missing_file_policy(MissingFilePolicy::TreatAsMissing)
            .build()
            .unwrap();

        assert_eq!(config.api_base, "https://github.example.com/api/v3");
        assert_eq!(config.token.as_deref(), Some("ghp_test"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.missing_file_policy, MissingFilePolicy::TreatAsMissing);
    }

    #[test]
    fn test_validation_bad_url() {
        let result = GitHubConfig::builder().api_base("not a url").build();
        assert!(matches!(result, Err(GitHubError::Config(_))));
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = GitHubConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_token_not_serialized() {
        let config = GitHubConfig::builder().token("secret").build().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
