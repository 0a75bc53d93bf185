//! Configuration management for the PDF form-fill service

use serde::Deserialize;
use std::env;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Socket address to bind, falling back to all interfaces when the
    /// configured host does not parse
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], self.port)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Timeout for the outbound template download, in seconds
    pub timeout_secs: u64,
    /// Upper bound on the downloaded template size, in bytes
    pub max_template_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            fetch: FetchConfig {
                timeout_secs: 30,
                max_template_bytes: 50 * 1024 * 1024,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Every setting has a default, so this never fails; unparseable
    /// values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.server.port),
            },
            fetch: FetchConfig {
                timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(defaults.fetch.timeout_secs),
                max_template_bytes: env::var("MAX_TEMPLATE_BYTES")
                    .ok()
                    .and_then(|b| b.parse().ok())
                    .unwrap_or(defaults.fetch.max_template_bytes),
            },
        }
    }
}
