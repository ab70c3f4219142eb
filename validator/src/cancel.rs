//! Cooperative cancellation and run deadlines.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{ValidationError, ValidationResult};

/// A shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every run observing this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// The cancellation state of one validation run.
#[derive(Debug, Clone)]
pub(crate) struct RunGuard {
    token: CancellationToken,
    started: Instant,
    timeout: Option<Duration>,
}

impl RunGuard {
    pub(crate) fn start(token: CancellationToken, timeout: Option<Duration>) -> Self {
        Self {
            token,
            started: Instant::now(),
            timeout,
        }
    }

    /// Fail if the run was cancelled or has exceeded its timeout.
    pub(crate) fn check(&self) -> ValidationResult<()> {
        if self.token.is_cancelled() {
            return Err(ValidationError::Cancelled);
        }
        match self.timeout {
            Some(timeout) if self.started.elapsed() >= timeout => Err(ValidationError::TimedOut),
            _ => Ok(()),
        }
    }
}
