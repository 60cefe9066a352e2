//! Bridge runner for lifecycle management.

use std::future::Future;
use std::sync::Arc;

use tokio::signal;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::publisher::Publisher;
use crate::stats::{BridgeStats, StatsSnapshot};

/// Bridge runner that manages the lifecycle of a protocol bridge.
///
/// Lifecycle:
/// - [`start`](Self::start): validate config, bind the bus publisher
/// - [`run`](Self::run): keep spawned workers alive until Ctrl+C
/// - stop (end of `run`): signal shutdown, abort workers, close the publisher
///
/// There is no drain period: in-flight work is abandoned on shutdown.
///
/// # Example
///
/// ```ignore
/// use mdt_relay_framework::BridgeRunner;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let mut runner = BridgeRunner::start("mybridge", config)?;
///
///     let publisher = runner.publisher();
///     let shutdown = runner.shutdown_signal();
///     runner.spawn(async move {
///         // Worker logic here
///     });
///
///     runner.run().await?;
///     Ok(())
/// }
/// ```
pub struct BridgeRunner<C: BridgeConfig> {
    /// Bridge name for logging and stats.
    name: String,
    /// The validated configuration.
    config: Arc<C>,
    /// Publisher shared by all workers.
    publisher: Publisher,
    /// Session and decode counters.
    stats: Arc<BridgeStats>,
    /// Flipped to `true` when the bridge stops.
    shutdown: watch::Sender<bool>,
    /// Spawned tasks.
    tasks: Vec<JoinHandle<()>>,
}

impl<C: BridgeConfig> BridgeRunner<C> {
    /// Validate the configuration and bind the bus publisher.
    pub fn start(name: impl Into<String>, config: C) -> Result<Self> {
        let name = name.into();
        let version = env!("CARGO_PKG_VERSION");

        config.validate()?;

        tracing::info!(bridge = %name, version = %version, "Starting bridge");

        let publisher = Publisher::bind(&config.bus().endpoint())?;
        let (shutdown, _) = watch::channel(false);

        Ok(Self {
            name,
            config: Arc::new(config),
            publisher,
            stats: Arc::new(BridgeStats::new()),
            shutdown,
            tasks: Vec::new(),
        })
    }

    /// Get a clone of the publisher.
    pub fn publisher(&self) -> Publisher {
        self.publisher.clone()
    }

    /// Get the shared counters.
    pub fn stats(&self) -> Arc<BridgeStats> {
        self.stats.clone()
    }

    /// Current counters, including the publisher's.
    pub fn snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot(&self.name, self.publisher.stats())
    }

    /// Get a handle that resolves when the bridge stops.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            receiver: self.shutdown.subscribe(),
        }
    }

    /// Spawn a worker task.
    ///
    /// The task will be tracked and aborted on shutdown.
    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        self.tasks.push(handle);
    }

    /// Spawn a worker task that returns a Result.
    ///
    /// Errors are logged automatically.
    pub fn spawn_with_error<F, E>(&mut self, name: String, future: F)
    where
        F: Future<Output = std::result::Result<(), E>> + Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            if let Err(e) = future.await {
                tracing::error!(worker = %name, error = %e, "Worker failed");
            }
        });
        self.tasks.push(handle);
    }

    /// Run the bridge until Ctrl+C is received.
    pub async fn run(self) -> Result<()> {
        self.run_until(async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            }
        })
        .await
    }

    /// Run the bridge until `signal` resolves, then stop it.
    pub async fn run_until<S>(mut self, signal: S) -> Result<()>
    where
        S: Future<Output = ()>,
    {
        if let Some(interval) = self.config.stats_interval() {
            let stats = self.stats.clone();
            let publisher = self.publisher.clone();
            let name = self.name.clone();
            self.spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                // The first tick completes immediately
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    stats.snapshot(&name, publisher.stats()).log();
                }
            });
        }

        tracing::info!(
            bridge = %self.name,
            tasks = self.tasks.len(),
            "Bridge running. Press Ctrl+C to stop."
        );

        signal.await;

        tracing::info!(bridge = %self.name, "Received shutdown signal");

        self.stop();
        Ok(())
    }

    fn stop(self) {
        self.shutdown.send_replace(true);

        for task in &self.tasks {
            task.abort();
        }

        self.publisher.close();
        self.snapshot().log();

        tracing::info!(bridge = %self.name, "Goodbye!");
    }
}

/// Resolves once the owning [`BridgeRunner`] stops.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Whether shutdown has already been signalled.
    pub fn is_shutdown(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Wait until shutdown is signalled or the runner is dropped.
    pub async fn wait(&mut self) {
        let _ = self.receiver.wait_for(|stopped| *stopped).await;
    }
}
