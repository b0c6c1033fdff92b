//! Configuration module

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, ToSocketAddrs};

/// Fallback when `API_SECRET` is not set
pub const DEFAULT_API_SECRET: &str = "default_secret";

/// Default model artifact, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "model.json";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Path of the serialized model artifact
    pub model_path: String,

    /// Secret value, displayed by `GET /` but never checked
    pub api_secret: String,

    /// Environment (development, production)
    pub environment: String,

    /// Emit JSON log lines instead of the human-readable format
    pub json_logs: bool,

    /// `HOST` value that could not be resolved; the server binds to
    /// loopback instead
    pub unresolved_host: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            model_path: DEFAULT_MODEL_PATH.to_string(),
            api_secret: DEFAULT_API_SECRET.to_string(),
            environment: "development".to_string(),
            json_logs: false,
            unresolved_host: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let (host, unresolved_host) = match env::var("HOST") {
            Ok(value) => match resolve_host(&value) {
                Some(ip) => (ip, None),
                None => (IpAddr::V4(Ipv4Addr::LOCALHOST), Some(value)),
            },
            Err(_) => (defaults.host, None),
        };

        Self {
            host,

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            model_path: env::var("MODEL_PATH")
                .unwrap_or(defaults.model_path),

            api_secret: env::var("API_SECRET")
                .unwrap_or(defaults.api_secret),

            environment: env::var("ENVIRONMENT")
                .unwrap_or(defaults.environment),

            json_logs: env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.json_logs),

            unresolved_host,
        }
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether the secret came from the environment rather than the fallback
    pub fn has_custom_secret(&self) -> bool {
        self.api_secret != DEFAULT_API_SECRET
    }
}

/// Resolve `HOST` as an IP literal or a host name (`localhost`)
fn resolve_host(value: &str) -> Option<IpAddr> {
    let value = value.trim();
    if let Ok(ip) = value.parse() {
        return Some(ip);
    }
    (value, 0)
        .to_socket_addrs()
        .ok()?
        .map(|addr| addr.ip())
        .min_by_key(|ip| ip.is_ipv6())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.model_path, "model.json");
        assert_eq!(config.api_secret, "default_secret");
        assert!(!config.has_custom_secret());
        assert!(!config.is_production());
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8000");
        assert!(config.unresolved_host.is_none());
    }

    #[test]
    fn test_resolve_host() {
        assert_eq!(resolve_host("127.0.0.1"), Some(IpAddr::V4(Ipv4Addr::LOCALHOST)));
        assert_eq!(resolve_host("::1").map(|ip| ip.is_loopback()), Some(true));
        assert!(resolve_host("localhost").is_some_and(|ip| ip.is_loopback()));
        assert!(resolve_host("not a host name").is_none());
    }

    const VARS: [&str; 6] = ["HOST", "PORT", "MODEL_PATH", "API_SECRET", "ENVIRONMENT", "LOG_FORMAT"];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    // One test fn: the process environment is shared between test threads
    #[test]
    fn test_from_env() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(config.model_path, DEFAULT_MODEL_PATH);
        assert_eq!(config.api_secret, DEFAULT_API_SECRET);
        assert!(!config.json_logs);

        env::set_var("HOST", "localhost");
        env::set_var("PORT", "9100");
        env::set_var("MODEL_PATH", "/models/diabetes.json");
        env::set_var("API_SECRET", "s3cret");
        env::set_var("ENVIRONMENT", "production");
        env::set_var("LOG_FORMAT", "JSON");
        let config = Config::from_env();
        assert!(config.host.is_loopback());
        assert!(config.unresolved_host.is_none());
        assert_eq!(config.port, 9100);
        assert_eq!(config.model_path, "/models/diabetes.json");
        assert!(config.has_custom_secret());
        assert!(config.is_production());
        assert!(config.json_logs);

        env::set_var("HOST", "not a host name");
        env::set_var("PORT", "eighty");
        env::set_var("LOG_FORMAT", "text");
        let config = Config::from_env();
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.unresolved_host.as_deref(), Some("not a host name"));
        assert_eq!(config.port, 8000);
        assert!(!config.json_logs);

        clear_env();
    }
}
