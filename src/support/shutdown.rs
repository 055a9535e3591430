//! Coordinated shutdown for the HTTP server and background tasks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

/// Cloneable handle that lets any task request or await shutdown.
///
/// The broadcast channel wakes tasks already waiting; the flag covers
/// tasks that only start waiting after the signal has fired.
#[derive(Clone)]
pub struct ShutdownSignal {
    notify: broadcast::Sender<()>,
    fired: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel(1);
        Self {
            notify,
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request shutdown. Idempotent; only the first call notifies.
    pub fn trigger(&self) {
        if !self.fired.swap(true, Ordering::SeqCst) {
            info!("🛑 Shutdown requested");
            let _ = self.notify.send(());
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Resolve once shutdown has been requested, even if that happened
    /// before this call.
    pub async fn wait(&self) {
        let mut rx = self.notify.subscribe();
        if self.is_triggered() {
            return;
        }
        let _ = rx.recv().await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate OS termination signals into a [`ShutdownSignal`] trigger.
pub async fn listen_for_shutdown_signals(shutdown: ShutdownSignal) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
        let mut sigint = signal(SignalKind::interrupt()).expect("Failed to install SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => info!("📡 Caught SIGTERM"),
            _ = sigint.recv() => info!("📡 Caught SIGINT"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("📡 Caught Ctrl+C");
    }

    shutdown.trigger();
}
