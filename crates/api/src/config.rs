// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server configuration module
//!
//! Hierarchical configuration for the protein API server and its UniProt
//! data source. Values are validated while loading so a running server never
//! holds an out-of-range timeout or a zero port outside of tests.

use std::{
    fmt,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use anyhow::{Result, ensure};
use config::{Config, ConfigError, Environment as ConfigEnv, File};
use external_apis::{
    UniProtConfig,
    uniprot::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT},
};
use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::ToSchema;

use crate::error::{ServerError, ServerResult};

const DEFAULT_PORT: u16 = 3000;

/// A timeout in whole seconds, between 1 and 300
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeoutSeconds(Duration);

impl TimeoutSeconds {
    /// Create a new `TimeoutSeconds`, ensuring the value is within valid bounds
    ///
    /// # Errors
    ///
    /// Returns an error if timeout is 0 or greater than 300 seconds
    pub fn new(seconds: u64) -> Result<Self> {
        ensure!(seconds != 0, "timeout must be greater than 0");
        ensure!(seconds <= 300, "timeout cannot exceed 300");
        Ok(Self(Duration::from_secs(seconds)))
    }

    /// Thirty seconds
    pub const fn default_value() -> Self {
        Self(Duration::from_secs(30))
    }

    /// Five seconds
    pub const fn testing() -> Self {
        Self(Duration::from_secs(5))
    }

    /// The timeout as a duration
    pub fn value(&self) -> Duration {
        self.0
    }
}

impl<'de> Deserialize<'de> for TimeoutSeconds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = u64::deserialize(deserializer)?;
        Self::new(seconds).map_err(|e| de::Error::custom(e.to_string()))
    }
}

impl Default for TimeoutSeconds {
    fn default() -> Self {
        Self::default_value()
    }
}

/// Environment types for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production environment
    Production,
    /// Development environment
    Development,
    /// Testing environment
    Testing,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
            Environment::Testing => write!(f, "testing"),
        }
    }
}

/// Settings of the UniProt data source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniProtSettings {
    /// Base URL of the UniProt REST API
    pub base_url: String,
    /// Per-request timeout
    pub timeout_seconds: TimeoutSeconds,
    /// Retries after the first attempt
    pub max_retry_attempts: u32,
    /// Backoff base in milliseconds
    pub retry_delay_ms: u64,
    /// `User-Agent` header sent upstream
    pub user_agent: String,
}

impl Default for UniProtSettings {
    fn default() -> Self {
        let client = UniProtConfig::default();
        Self {
            base_url: client.base_url,
            timeout_seconds: TimeoutSeconds::default(),
            max_retry_attempts: client.max_retry_attempts,
            retry_delay_ms: client.retry_delay_ms,
            user_agent: client.user_agent,
        }
    }
}

impl UniProtSettings {
    /// Client configuration handed to [`external_apis::UniProtClient`]
    pub fn client_config(&self) -> UniProtConfig {
        UniProtConfig {
            base_url: self.base_url.clone(),
            timeout_seconds: self.timeout_seconds.value().as_secs(),
            max_retry_attempts: self.max_retry_attempts,
            retry_delay_ms: self.retry_delay_ms,
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Server configuration for different environments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: IpAddr,
    /// Server port; `0` is only accepted in the testing environment
    pub port: u16,
    /// Request timeout in seconds (validated range: 1-300)
    pub timeout_seconds: TimeoutSeconds,
    /// Environment type
    pub environment: Environment,
    /// UniProt data source
    pub uniprot: UniProtSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            timeout_seconds: TimeoutSeconds::default(),
            environment: Environment::Development,
            uniprot: UniProtSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Create configuration from environment variables and optional configuration files
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Config` if configuration is invalid or cannot be loaded.
    pub fn from_env() -> ServerResult<Self> {
        Self::load().map_err(|e| ServerError::Config {
            message: format!("failed to load configuration: {e}"),
        })
    }

    /// Load configuration using the config crate with hierarchical sources
    ///
    /// Later sources override earlier ones:
    /// 1. Default values
    /// 2. Configuration file (config.json)
    /// 3. Environment-specific file (config.{env}.json)
    /// 4. Environment variables prefixed with `SERVER__`, nested keys
    ///    separated by `__` (e.g. `SERVER__UNIPROT__MAX_RETRY_ATTEMPTS`)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let env_var = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let mut config_builder = Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("timeout_seconds", 30)?
            .set_default("environment", "development")?
            .set_default("uniprot.base_url", DEFAULT_BASE_URL)?
            .set_default("uniprot.timeout_seconds", 30)?
            .set_default("uniprot.max_retry_attempts", 3)?
            .set_default("uniprot.retry_delay_ms", 1000)?
            .set_default("uniprot.user_agent", DEFAULT_USER_AGENT)?
            .add_source(File::with_name("config.json").required(false))
            .add_source(
                File::with_name(&format!("config.{}.json", env_var.to_lowercase())).required(false),
            )
            .add_source(
                ConfigEnv::with_prefix("SERVER")
                    .separator("__")
                    .try_parsing(true),
            );

        if std::env::var("ENVIRONMENT").is_ok() {
            config_builder = config_builder.set_override("environment", env_var.to_lowercase())?;
        }

        let server_config: Self = config_builder.build()?.try_deserialize()?;
        server_config
            .validate()
            .map_err(|e| ConfigError::Message(format!("invalid configuration: {e}")))?;

        Ok(server_config)
    }

    /// Check cross-field constraints that serde cannot express
    ///
    /// # Errors
    ///
    /// Returns an error for port 0 outside of testing, or for UniProt
    /// settings the client would refuse
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.port != 0 || self.environment == Environment::Testing,
            "port cannot be 0 in non-testing environments"
        );
        self.uniprot.client_config().validate()?;
        Ok(())
    }

    /// Create configuration optimized for testing
    ///
    /// Binds an OS-assigned port and keeps upstream backoff short.
    pub fn for_testing() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            timeout_seconds: TimeoutSeconds::testing(),
            environment: Environment::Testing,
            uniprot: UniProtSettings {
                timeout_seconds: TimeoutSeconds::testing(),
                retry_delay_ms: 1,
                ..UniProtSettings::default()
            },
        }
    }

    /// Get socket address for binding
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
