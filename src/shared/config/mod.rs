//! Application configuration module
//!
//! Server settings are layered: built-in defaults, then an optional TOML file
//! named by `BLOGLINE_CONFIG`, then environment variables (a `.env` file is
//! loaded first when present).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Secret used when `JWT_SECRET` is not configured. Development only.
pub const DEV_JWT_SECRET: &str = "blogline-dev-secret-change-in-production";

/// Longest accepted session lifetime in days
pub const MAX_TOKEN_TTL_DAYS: u64 = 3650;

/// Environment variable naming an optional TOML configuration file
pub const CONFIG_FILE_ENV: &str = "BLOGLINE_CONFIG";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
    /// PostgreSQL URL; the in-memory database is used when absent
    pub database_url: Option<String>,
    /// HS256 signing secret for session tokens
    pub jwt_secret: String,
    /// Lifetime of a session token in days
    pub token_ttl_days: u64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Longest accepted comment, in characters
    pub comment_max_len: usize,
    /// Accounts created with one of these emails are admins
    pub admin_emails: Vec<String>,
    /// Directory holding the built web client
    pub static_dir: Option<PathBuf>,
    /// Add the `Secure` attribute to the session cookie
    pub secure_cookies: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_days: 30,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            comment_max_len: 200,
            admin_emails: Vec::new(),
            static_dir: None,
            secure_cookies: false,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut config = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        if std::env::var("JWT_SECRET").is_err() && config.jwt_secret == DEV_JWT_SECRET {
            tracing::warn!("JWT_SECRET not set, using the development secret");
        }
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Override fields from environment-style key/value lookups
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("BIND_ADDR") {
            self.bind_addr = parse_value("BIND_ADDR", &addr)?;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.bind_addr.set_port(parse_value("SERVER_PORT", &port)?);
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            self.database_url = Some(url);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.jwt_secret = secret;
        }
        if let Some(days) = lookup("TOKEN_TTL_DAYS") {
            self.token_ttl_days = parse_value("TOKEN_TTL_DAYS", &days)?;
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            self.bcrypt_cost = parse_value("BCRYPT_COST", &cost)?;
        }
        if let Some(len) = lookup("COMMENT_MAX_LEN") {
            self.comment_max_len = parse_value("COMMENT_MAX_LEN", &len)?;
        }
        if let Some(emails) = lookup("ADMIN_EMAILS") {
            self.admin_emails = emails
                .split(',')
                .map(str::trim)
                .filter(|email| !email.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(dir) = lookup("STATIC_DIR").filter(|dir| !dir.is_empty()) {
            self.static_dir = Some(PathBuf::from(dir));
        }
        if let Some(secure) = lookup("SECURE_COOKIES") {
            self.secure_cookies = parse_value("SECURE_COOKIES", &secure)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("jwt_secret"));
        }
        if self.token_ttl_days == 0 || self.token_ttl_days > MAX_TOKEN_TTL_DAYS {
            return Err(ConfigError::invalid(
                "token_ttl_days",
                self.token_ttl_days.to_string(),
            ));
        }
        if self.comment_max_len == 0 {
            return Err(ConfigError::invalid("comment_max_len", "0"));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::invalid("bcrypt_cost", self.bcrypt_cost.to_string()));
        }
        Ok(())
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|admin| admin.eq_ignore_ascii_case(email))
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.token_ttl_days.min(MAX_TOKEN_TTL_DAYS) as i64)
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, value))
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.config.bind_addr = addr;
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    pub fn token_ttl_days(mut self, days: u64) -> Self {
        self.config.token_ttl_days = days;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    pub fn comment_max_len(mut self, len: usize) -> Self {
        self.config.comment_max_len = len;
        self
    }

    pub fn admin_email(mut self, email: impl Into<String>) -> Self {
        self.config.admin_emails.push(email.into());
        self
    }

    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.static_dir = Some(dir.into());
        self
    }

    pub fn secure_cookies(mut self, secure: bool) -> Self {
        self.config.secure_cookies = secure;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.comment_max_len, 200);
        assert_eq!(config.token_ttl_days, 30);
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .jwt_secret("s3cret")
            .bcrypt_cost(4)
            .admin_email("Boss@Example.com")
            .build()
            .unwrap();
        assert_eq!(config.jwt_secret, "s3cret");
        assert!(config.is_admin_email("boss@example.com"));
        assert!(!config.is_admin_email("reader@example.com"));
    }

    #[test]
    fn test_builder_rejects_bad_cost() {
        let result = AppConfig::builder().bcrypt_cost(2).build();
        assert_matches!(result, Err(ConfigError::InvalidValue { key: "bcrypt_cost", .. }));
    }

    #[test]
    fn test_builder_rejects_empty_secret() {
        let result = AppConfig::builder().jwt_secret("").build();
        assert_matches!(result, Err(ConfigError::MissingValue("jwt_secret")));
    }

    #[test]
    fn test_builder_bounds_token_ttl() {
        let result = AppConfig::builder().token_ttl_days(0).build();
        assert_matches!(result, Err(ConfigError::InvalidValue { key: "token_ttl_days", .. }));

        let result = AppConfig::builder().token_ttl_days(100_000_000).build();
        assert_matches!(result, Err(ConfigError::InvalidValue { key: "token_ttl_days", .. }));

        let result = AppConfig::builder().token_ttl_days(u64::MAX).build();
        assert_matches!(result, Err(ConfigError::InvalidValue { key: "token_ttl_days", .. }));

        let config = AppConfig::builder()
            .token_ttl_days(MAX_TOKEN_TTL_DAYS)
            .build()
            .unwrap();
        assert_eq!(config.token_ttl(), chrono::Duration::days(MAX_TOKEN_TTL_DAYS as i64));
    }

    #[test]
    fn test_apply_env() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SERVER_PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("ADMIN_EMAILS", "a@example.com, b@example.com,"),
            ("COMMENT_MAX_LEN", "500"),
            ("SECURE_COOKIES", "true"),
        ]);
        let mut config = AppConfig::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/blog"));
        assert_eq!(config.admin_emails, vec!["a@example.com", "b@example.com"]);
        assert_eq!(config.comment_max_len, 500);
        assert!(config.secure_cookies);
    }

    #[test]
    fn test_apply_env_rejects_garbage() {
        let mut config = AppConfig::default();
        let result = config.apply_env(|key| (key == "TOKEN_TTL_DAYS").then(|| "soon".to_string()));
        assert_matches!(result, Err(ConfigError::InvalidValue { key: "TOKEN_TTL_DAYS", .. }));
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            bind_addr = "127.0.0.1:4000"
            jwt_secret = "from-file"
            admin_emails = ["root@example.com"]
            "#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:4000".parse().unwrap());
        assert_eq!(config.jwt_secret, "from-file");
        assert_eq!(config.comment_max_len, 200);
        assert!(config.is_admin_email("root@example.com"));
    }

    #[test]
    fn test_from_toml_str_error() {
        let result = AppConfig::from_toml_str("bind_addr = 42");
        assert_matches!(result, Err(ConfigError::Toml(_)));
    }
}
