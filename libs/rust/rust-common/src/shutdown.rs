//! Graceful shutdown.
//!
//! A [`ShutdownController`] fans a single shutdown trigger out to any
//! number of [`ShutdownSignal`]s. Servers stop accepting work when their
//! signal fires and get a bounded drain period before being dropped.

use std::future::Future;
use std::time::Duration;

use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Shutdown trigger shared by a process.
#[derive(Debug)]
pub struct ShutdownController {
    sender: watch::Sender<bool>,
}

impl ShutdownController {
    /// Creates a new controller in the running state.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    /// Gets a shutdown receiver.
    #[must_use]
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            receiver: self.sender.subscribe(),
        }
    }

    /// Initiates shutdown. Idempotent.
    pub fn trigger(&self) {
        self.sender.send_replace(true);
    }

    /// Whether shutdown has been initiated.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.sender.borrow()
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

/// Shutdown signal receiver.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Waits for the shutdown trigger.
    ///
    /// Resolves immediately if shutdown was already triggered, and also
    /// when the controller is dropped.
    pub async fn recv(mut self) {
        // Err means the controller is gone, which is as final as a trigger
        let _ = self.receiver.wait_for(|triggered| *triggered).await;
    }
}

/// Waits for SIGTERM or SIGINT.
pub async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating shutdown");
        }
    }
}

/// Runs a server future until it finishes or shutdown has been triggered
/// and `drain_timeout` has elapsed since.
///
/// The server itself is expected to observe a [`ShutdownSignal`] and stop
/// accepting work; the timeout bounds how long in-flight work may run.
///
/// # Errors
///
/// Returns the server's own error if it fails before the drain timeout.
pub async fn run_with_graceful_shutdown<F, E>(
    server: F,
    controller: &ShutdownController,
    drain_timeout: Duration,
) -> Result<(), E>
where
    F: Future<Output = Result<(), E>>,
{
    let drained = controller.subscribe();
    let deadline = async move {
        drained.recv().await;
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        result = server => {
            match &result {
                Ok(()) => info!("Server stopped normally"),
                Err(_) => error!("Server stopped with an error"),
            }
            result
        }
        () = deadline => {
            warn!(timeout = ?drain_timeout, "Shutdown timeout reached, dropping in-flight requests");
            Ok(())
        }
    }
}
