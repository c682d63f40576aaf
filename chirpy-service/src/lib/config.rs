use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub polka: PolkaConfig,
    pub platform: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub access_token_ttl_seconds: i64,
    pub refresh_token_ttl_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PolkaConfig {
    pub api_key: String,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Fails when a source cannot be parsed or `jwt.secret` is empty.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (e.g. JWT__SECRET)".to_string(),
            ));
        }
        Ok(())
    }

    /// Development platform enables destructive admin endpoints.
    pub fn is_development(&self) -> bool {
        self.platform == "dev"
    }
}
