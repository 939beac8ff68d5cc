//! Shutdown coordination and per-request cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

struct ShutdownState {
    triggered: AtomicBool,
    tx: broadcast::Sender<()>,
}

/// Coordinator for graceful shutdown.
///
/// Hands out [`Cancellation`] handles that in-flight dispatches and the
/// server's graceful shutdown wait on. Clones share the same signal.
#[derive(Clone)]
pub struct Shutdown {
    state: Arc<ShutdownState>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            state: Arc::new(ShutdownState {
                triggered: AtomicBool::new(false),
                tx,
            }),
        }
    }

    /// Cancellation handle tied to this coordinator.
    pub fn cancellation(&self) -> Cancellation {
        Cancellation {
            state: Some(self.state.clone()),
        }
    }

    /// Trigger the shutdown signal. Idempotent.
    pub fn trigger(&self) {
        if !self.state.triggered.swap(true, Ordering::SeqCst) {
            let _ = self.state.tx.send(());
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancellation signal handed to handlers.
///
/// Handlers doing long work can poll [`Cancellation::is_cancelled`] or
/// await [`Cancellation::cancelled`]; the dispatcher also races every
/// handler future against it.
#[derive(Clone, Default)]
pub struct Cancellation {
    state: Option<Arc<ShutdownState>>,
}

impl Cancellation {
    /// A handle that never fires.
    pub fn none() -> Self {
        Self { state: None }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| state.triggered.load(Ordering::SeqCst))
    }

    /// Resolves once shutdown has been triggered; pending forever otherwise.
    pub async fn cancelled(&self) {
        let Some(state) = &self.state else {
            return std::future::pending().await;
        };
        // Subscribe before checking the flag so a trigger in between is not lost.
        let mut rx = state.tx.subscribe();
        if state.triggered.load(Ordering::SeqCst) {
            return;
        }
        let _ = rx.recv().await;
    }
}

impl std::fmt::Debug for Cancellation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cancellation")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
