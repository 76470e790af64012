use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::Map;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub session: SessionConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Empty selects the in-memory credential store.
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub ttl_hours: i64,
    pub secure_cookie: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub cost: u32,
}

/// Profile loaded when `RUN_MODE` is unset. Local setups opt into
/// `development` explicitly.
pub const DEFAULT_RUN_MODE: &str = "production";

/// Longest session lifetime accepted, one year.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Profile config file (config/{RUN_MODE}.toml, `production` when unset)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").ok();
        Self::load_from(run_mode.as_deref(), None)
    }

    /// Load with an explicit profile and, when given, a replacement for the
    /// process environment.
    pub fn load_from(
        run_mode: Option<&str>,
        environment: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let run_mode = run_mode.unwrap_or(DEFAULT_RUN_MODE);

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // No prefix: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__").source(environment))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT__SECRET)".to_string(),
            ));
        }
        if self.session.ttl_hours <= 0 || self.session.ttl_hours > MAX_SESSION_TTL_HOURS {
            return Err(ConfigError::Message(format!(
                "session.ttl_hours must be between 1 and {}, got {}",
                MAX_SESSION_TTL_HOURS, self.session.ttl_hours
            )));
        }
        Ok(())
    }
}
