//! TOML-based configuration for Gatehouse
//!
//! This module provides declarative configuration for the server, the
//! identity store, and the authentication strategy via a TOML file
//! (`gatehouse.toml`). Every section is optional; defaults give a working
//! in-memory service. Environment variables override the file.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Root configuration structure loaded from gatehouse.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

// ============= Database Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path; `:memory:` keeps identities in-process
    #[serde(default = "default_database_url")]
    pub url: String,
}

fn default_database_url() -> String {
    ":memory:".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

// ============= Authentication Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Which strategy gates requests
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Where session mappings live
    #[serde(default)]
    pub session_backend: SessionBackendKind,

    /// Name of the cookie carrying the session id
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,

    /// Paths the request gate lets through unauthenticated
    #[serde(default = "default_excluded_paths")]
    pub excluded_paths: Vec<String>,
}

fn default_session_cookie() -> String {
    "session_id".to_string()
}

fn default_excluded_paths() -> Vec<String> {
    ["/", "/api/status/", "/users/", "/sessions/", "/reset_password/"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            session_backend: SessionBackendKind::default(),
            session_cookie: default_session_cookie(),
            excluded_paths: default_excluded_paths(),
        }
    }
}

/// Request-authentication strategy selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// No gate; every request passes
    None,
    /// The base strategy: gate on, no scheme, every gated request rejected
    Base,
    /// HTTP Basic credentials on the Authorization header
    Basic,
    /// Opaque session-id cookie
    #[default]
    Session,
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(StrategyKind::None),
            "base" => Ok(StrategyKind::Base),
            "basic" => Ok(StrategyKind::Basic),
            "session" => Ok(StrategyKind::Session),
            other => Err(ConfigError::InvalidValue(
                "auth.strategy",
                other.to_string(),
            )),
        }
    }
}

/// Session-backend selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackendKind {
    /// Process-local map, lost on restart
    Memory,
    /// Digests on the identity row, one live session per identity
    #[default]
    Store,
}

impl FromStr for SessionBackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(SessionBackendKind::Memory),
            "store" => Ok(SessionBackendKind::Store),
            other => Err(ConfigError::InvalidValue(
                "auth.session_backend",
                other.to_string(),
            )),
        }
    }
}

// ============= Configuration Loading =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid value for {0}: '{1}'")]
    InvalidValue(&'static str, String),
}

impl Config {
    /// Load configuration and apply environment overrides.
    ///
    /// An explicit path must exist; without one, `gatehouse.toml` in the
    /// working directory is used when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.to_path_buf()));
                }
                Self::parse_file(path)?
            }
            None => {
                let default = Path::new("gatehouse.toml");
                if default.exists() {
                    Self::parse_file(default)?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_env()?;
        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Environment overrides: HOST, PORT, SESSION_NAME, AUTH_STRATEGY,
    /// SESSION_BACKEND. Database selection reads its own variables through
    /// the store provider.
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT", port.clone()))?;
        }
        if let Ok(name) = env::var("SESSION_NAME") {
            self.auth.session_cookie = name;
        }
        if let Ok(strategy) = env::var("AUTH_STRATEGY") {
            self.auth.strategy = strategy.parse()?;
        }
        if let Ok(backend) = env::var("SESSION_BACKEND") {
            self.auth.session_backend = backend.parse()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> String {
        r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"

[database]
url = "./data/gatehouse.db"

[auth]
strategy = "basic"
session_backend = "memory"
session_cookie = "sid"
excluded_paths = ["/", "/users/"]
"#
        .to_string()
    }

    #[test]
    fn test_parse_config() {
        let content = create_test_config();
        let config: Config = toml::from_str(&content).expect("Failed to parse config");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "./data/gatehouse.db");
        assert_eq!(config.auth.strategy, StrategyKind::Basic);
        assert_eq!(config.auth.session_backend, SessionBackendKind::Memory);
        assert_eq!(config.auth.session_cookie, "sid");
        assert_eq!(config.auth.excluded_paths, vec!["/", "/users/"]);
    }

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").expect("empty config should parse");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.database.url, ":memory:");
        assert_eq!(config.auth.strategy, StrategyKind::Session);
        assert_eq!(config.auth.session_backend, SessionBackendKind::Store);
        assert_eq!(config.auth.session_cookie, "session_id");
        assert!(config.auth.excluded_paths.contains(&"/sessions/".to_string()));
    }

    #[test]
    fn test_partial_section() {
        let content = r#"
[server]
port = 9000
"#;
        let config: Config = toml::from_str(content).expect("partial config should parse");

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.auth.strategy, StrategyKind::Session);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("none".parse::<StrategyKind>().unwrap(), StrategyKind::None);
        assert_eq!("base".parse::<StrategyKind>().unwrap(), StrategyKind::Base);
        assert_eq!("basic".parse::<StrategyKind>().unwrap(), StrategyKind::Basic);
        assert_eq!(
            "session".parse::<StrategyKind>().unwrap(),
            StrategyKind::Session
        );
        assert!("jwt".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_session_backend_from_str() {
        assert_eq!(
            "memory".parse::<SessionBackendKind>().unwrap(),
            SessionBackendKind::Memory
        );
        assert_eq!(
            "store".parse::<SessionBackendKind>().unwrap(),
            SessionBackendKind::Store
        );
        assert!("redis".parse::<SessionBackendKind>().is_err());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let content = r#"
[auth]
strategy = "oauth"
"#;
        let result: Result<Config, _> = toml::from_str(content);

        assert!(result.is_err(), "unknown strategy should fail to parse");
    }

    #[test]
    fn test_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/gatehouse.toml")));

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
