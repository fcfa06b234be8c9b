//! Caller-supplied cancellation and deadline for one logical operation.
//!
//! The layer never imposes a timeout of its own. Whatever the caller put into the
//! [`CallContext`] is honoured by every native call, and pagination loops stop at
//! the next await point once it fires.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::{ProviderError, Result};

/// Handle used by the caller to cancel every operation sharing its [`CallContext`].
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Cancellation signal and optional deadline propagated into provider calls.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

impl CallContext {
    /// A context that never cancels.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context plus the handle that cancels it.
    pub fn cancellable() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        (
            Self {
                cancel: Some(rx),
                deadline: None,
            },
            CancelHandle { tx },
        )
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Whether cancellation was already signalled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Run one provider call, aborting it if the context fires first.
    pub async fn run<T, F>(&self, provider: &str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(aborted(provider, "cancelled"));
        }
        if self.is_expired() {
            return Err(aborted(provider, "deadline exceeded"));
        }

        tokio::select! {
            biased;
            () = self.cancelled() => Err(aborted(provider, "cancelled")),
            () = self.expired() => Err(aborted(provider, "deadline exceeded")),
            result = call => result,
        }
    }

    async fn cancelled(&self) {
        match &self.cancel {
            Some(rx) => {
                let mut rx = rx.clone();
                // 发送端被丢弃意味着永远不会再取消
                if rx.wait_for(|cancelled| *cancelled).await.is_err() {
                    std::future::pending::<()>().await;
                }
            }
            None => std::future::pending::<()>().await,
        }
    }

    async fn expired(&self) {
        match self.deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending::<()>().await,
        }
    }
}

fn aborted(provider: &str, reason: &str) -> ProviderError {
    log::debug!("[{provider}] call aborted: {reason}");
    ProviderError::Cancelled {
        provider: provider.to_string(),
        reason: reason.to_string(),
    }
}
