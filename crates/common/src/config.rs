//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,

    /// Bearer token validation
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,

    /// Access control: fine-grained mode when true, legacy team guardian otherwise
    pub accesscontrol_enabled: bool,

    /// Logins hidden from team member listings
    pub hidden_users: Vec<String>,

    /// Licensed features, e.g. `teamgroupsync`
    pub licensed_features: Vec<String>,

    /// Presentation
    pub app_sub_url: String,
    pub disable_gravatar: bool,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,

            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?,
            jwt_issuer: env::var("JWT_ISSUER").ok(),
            jwt_audience: env::var("JWT_AUDIENCE").ok(),

            accesscontrol_enabled: parse_flag(env::var("ACCESSCONTROL_ENABLED").ok()),
            hidden_users: parse_list(&env::var("HIDDEN_USERS").unwrap_or_default()),
            licensed_features: parse_list(&env::var("LICENSED_FEATURES").unwrap_or_default()),

            app_sub_url: env::var("APP_SUB_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_default(),
            disable_gravatar: parse_flag(env::var("DISABLE_GRAVATAR").ok()),

            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "teamgate=debug".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }

    /// Check whether a licensed feature is enabled
    pub fn feature_enabled(&self, feature: &str) -> bool {
        self.licensed_features.iter().any(|f| f == feature)
    }
}

/// Parse a boolean flag, treating anything unparseable as `false`
fn parse_flag(value: Option<String>) -> bool {
    value
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// Parse a comma-separated list, dropping empty entries
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
