use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Placeholders shipped in `config/default.toml`; never acceptable in production.
const DEVELOPMENT_SECRETS: [&str; 2] = [
    "dev_access_secret_change_me_0123456789",
    "dev_refresh_secret_change_me_0123456789",
];

const MIN_PRODUCTION_SECRET_LENGTH: usize = 32;

/// Upper bound for either token lifetime (one year).
const MAX_TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24 * 365;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub cookie: CookieConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default)]
    pub backend: StorageBackend,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    #[serde(default = "default_access_ttl_seconds")]
    pub access_ttl_seconds: i64,
    #[serde(default = "default_refresh_ttl_seconds")]
    pub refresh_ttl_seconds: i64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    #[default]
    Lax,
    Strict,
    None,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CookieConfig {
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub same_site: SameSite,
    #[serde(default)]
    pub domain: Option<String>,
}

fn default_max_connections() -> u32 {
    5
}

fn default_access_ttl_seconds() -> i64 {
    auth::ACCESS_TOKEN_TTL_SECONDS
}

fn default_refresh_ttl_seconds() -> i64 {
    auth::REFRESH_TOKEN_TTL_SECONDS
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__ACCESS_SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__ACCESS_SECRET=... overrides jwt.access_secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate(run_mode == "production")?;

        Ok(config)
    }

    /// Reject secret and cookie settings that would weaken token security.
    pub fn validate(&self, production: bool) -> Result<(), ConfigError> {
        let secrets = [
            ("jwt.access_secret", &self.jwt.access_secret),
            ("jwt.refresh_secret", &self.jwt.refresh_secret),
        ];

        for (key, secret) in secrets {
            if secret.trim().is_empty() {
                return Err(ConfigError::Message(format!("{} must be set", key)));
            }
            if production {
                if secret.len() < MIN_PRODUCTION_SECRET_LENGTH {
                    return Err(ConfigError::Message(format!(
                        "{} must be at least {} bytes in production",
                        key, MIN_PRODUCTION_SECRET_LENGTH
                    )));
                }
                if DEVELOPMENT_SECRETS.contains(&secret.as_str()) {
                    return Err(ConfigError::Message(format!(
                        "{} still uses the development placeholder",
                        key
                    )));
                }
            }
        }

        if self.jwt.access_secret == self.jwt.refresh_secret {
            return Err(ConfigError::Message(
                "jwt.access_secret and jwt.refresh_secret must differ".to_string(),
            ));
        }

        let lifetimes = [
            ("jwt.access_ttl_seconds", self.jwt.access_ttl_seconds),
            ("jwt.refresh_ttl_seconds", self.jwt.refresh_ttl_seconds),
        ];

        for (key, seconds) in lifetimes {
            if !(1..=MAX_TOKEN_TTL_SECONDS).contains(&seconds) {
                return Err(ConfigError::Message(format!(
                    "{} must be between 1 and {} seconds",
                    key, MAX_TOKEN_TTL_SECONDS
                )));
            }
        }

        Ok(())
    }
}
