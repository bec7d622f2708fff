// Configuration module entry point
// Manages startup configuration and shared application state

mod state;
mod types;

use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig};

impl Config {
    /// Load configuration with defaults, an optional `gzserve.toml` file
    /// and `GZSERVE_*` environment overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("gzserve")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("GZSERVE"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Resolve the server root directory.
    ///
    /// Uses `server.root` when configured, otherwise the directory
    /// containing the executable.
    pub fn resolve_root(&self) -> io::Result<PathBuf> {
        if let Some(root) = &self.server.root {
            return Path::new(root).canonicalize();
        }

        let exe = std::env::current_exe()?;
        let dir = exe.parent().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "executable has no parent directory",
            )
        })?;
        dir.canonicalize()
    }
}

/// Parse the optional positional port argument.
///
/// An absent argument keeps the configured port; a non-numeric one is a
/// startup error surfaced to the user before anything binds.
pub fn port_from_arg(arg: Option<&str>) -> Result<Option<u16>, String> {
    match arg {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u16>()
            .map(Some)
            .map_err(|_| "Port must be an integer".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8000);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "common");
        assert!(cfg.server.root.is_none());
    }

    #[test]
    fn test_port_argument() {
        assert_eq!(port_from_arg(None), Ok(None));
        assert_eq!(port_from_arg(Some("8080")), Ok(Some(8080)));
    }

    #[test]
    fn test_invalid_port_argument() {
        assert_eq!(
            port_from_arg(Some("eight thousand")),
            Err("Port must be an integer".to_string())
        );
        assert!(port_from_arg(Some("")).is_err());
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.server.port = 9000;
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 9000);
        assert!(addr.ip().is_unspecified());
    }
}
