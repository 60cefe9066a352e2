use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default bus host the PUSH socket binds to.
pub const DEFAULT_BUS_HOST: &str = "127.0.0.1";

/// Default bus port the PUSH socket binds to.
pub const DEFAULT_BUS_PORT: u16 = 50001;

/// Downstream message bus settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusConfig {
    /// Host or interface address to bind on.
    #[serde(default = "default_bus_host")]
    pub host: String,

    /// TCP port to bind on.
    #[serde(default = "default_bus_port")]
    pub port: u16,
}

fn default_bus_host() -> String {
    DEFAULT_BUS_HOST.to_string()
}

fn default_bus_port() -> u16 {
    DEFAULT_BUS_PORT
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            host: default_bus_host(),
            port: default_bus_port(),
        }
    }
}

impl BusConfig {
    /// ZeroMQ endpoint string, e.g. `tcp://127.0.0.1:50001`.
    pub fn endpoint(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("tcp://[{}]:{}", self.host, self.port)
        } else {
            format!("tcp://{}:{}", self.host, self.port)
        }
    }

    /// Reject settings the bus cannot bind with.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::Config("bus host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(Error::Config("bus port must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(Error::Config(format!(
                "Invalid log format: '{}'. Expected 'text' or 'json'",
                other
            ))),
        }
    }
}

/// Common logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bus_endpoint() {
        let bus = BusConfig::default();
        assert_eq!(bus.endpoint(), "tcp://127.0.0.1:50001");
    }

    #[test]
    fn test_ipv6_bus_endpoint() {
        let bus = BusConfig {
            host: "::1".to_string(),
            port: 6000,
        };
        assert_eq!(bus.endpoint(), "tcp://[::1]:6000");
    }

    #[test]
    fn test_bus_validation() {
        assert!(BusConfig::default().validate().is_ok());

        let empty_host = BusConfig {
            host: " ".to_string(),
            port: 50001,
        };
        assert!(matches!(empty_host.validate(), Err(Error::Config(_))));

        let zero_port = BusConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        assert!(zero_port.validate().is_err());
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("TEXT".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_logging_defaults() {
        let logging = LoggingConfig::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Text);

        let parsed: LoggingConfig = serde_json::from_str(r#"{"format": "json"}"#).unwrap();
        assert_eq!(parsed.level, "info");
        assert_eq!(parsed.format, LogFormat::Json);
    }
}
