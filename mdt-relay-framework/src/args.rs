//! CLI argument parsing for bridges.

use std::time::Duration;

use clap::Args;

use mdt_relay_common::{BusConfig, DEFAULT_BUS_HOST, DEFAULT_BUS_PORT, LogFormat, LoggingConfig};

/// Common CLI arguments for all bridges.
///
/// Flatten into a bridge's own parser with `#[command(flatten)]`.
#[derive(Args, Debug, Clone)]
pub struct BridgeArgs {
    /// Set the ZeroMQ host for output.
    #[arg(short = 'Z', long = "zmq-host", default_value = DEFAULT_BUS_HOST)]
    pub zmq_host: String,

    /// Set the ZeroMQ port for output.
    #[arg(short = 'z', long = "zmq-port", default_value_t = DEFAULT_BUS_PORT)]
    pub zmq_port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log output format (text, json).
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Seconds between stats log lines (0 disables).
    #[arg(long, default_value_t = 60)]
    pub stats_interval_secs: u64,
}

impl Default for BridgeArgs {
    fn default() -> Self {
        Self {
            zmq_host: DEFAULT_BUS_HOST.to_string(),
            zmq_port: DEFAULT_BUS_PORT,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            stats_interval_secs: 60,
        }
    }
}

impl BridgeArgs {
    /// Bus settings from the `--zmq-*` flags.
    pub fn bus(&self) -> BusConfig {
        BusConfig {
            host: self.zmq_host.clone(),
            port: self.zmq_port,
        }
    }

    /// Logging settings from the `--log-*` flags.
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format,
        }
    }

    /// Stats reporting interval, `None` when disabled.
    pub fn stats_interval(&self) -> Option<Duration> {
        (self.stats_interval_secs > 0).then(|| Duration::from_secs(self.stats_interval_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        bridge: BridgeArgs,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::try_parse_from(["bridge"]).unwrap();
        assert_eq!(cli.bridge.bus(), BusConfig::default());
        assert_eq!(cli.bridge.logging().level, "info");
        assert_eq!(cli.bridge.logging().format, LogFormat::Text);
        assert_eq!(cli.bridge.stats_interval(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_short_and_long_flags() {
        let cli = TestCli::try_parse_from([
            "bridge",
            "-Z",
            "0.0.0.0",
            "--zmq-port",
            "6000",
            "--log-format",
            "json",
            "--stats-interval-secs",
            "0",
        ])
        .unwrap();

        assert_eq!(cli.bridge.bus().endpoint(), "tcp://0.0.0.0:6000");
        assert_eq!(cli.bridge.logging().format, LogFormat::Json);
        assert_eq!(cli.bridge.stats_interval(), None);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(TestCli::try_parse_from(["bridge", "-z", "notaport"]).is_err());
        assert!(TestCli::try_parse_from(["bridge", "-z", "70000"]).is_err());
    }

    #[test]
    fn test_invalid_log_format_is_rejected() {
        assert!(TestCli::try_parse_from(["bridge", "--log-format", "xml"]).is_err());
    }
}
