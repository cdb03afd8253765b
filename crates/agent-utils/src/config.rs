//! Process-level configuration

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
    /// Tracing filter applied when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "stock-agent".to_string(),
            environment: "development".to_string(),
            log_filter: "warn,agent_stock=info,agent_github=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `APP_ENV`, falling back to defaults
    ///
    /// Production runs only log warnings unless `RUST_LOG` says otherwise.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(env) = std::env::var("APP_ENV") {
            config = config.with_environment(env);
        }
        config
    }

    /// Set the environment name and derive the default log filter from it
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        if self.is_production() {
            self.log_filter = "warn".to_string();
        }
        self
    }

    /// Whether this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "prod" | "production")
    }
}
