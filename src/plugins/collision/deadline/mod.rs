//! Cooperative per-tick budget.
//!
//! The pass is synchronous; "cancellation" is a check-and-bail against a monotonic clock and
//! an optional caller-owned flag. Nothing is preempted.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use bevy::prelude::*;

use super::error::CollisionError;

/// Caller-side cancel switch, shared with every deadline it is attached to.
#[derive(Resource, Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Re-arm after a cancelled tick.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone)]
pub struct Deadline {
    started: Instant,
    expires_at: Instant,
    cancel: Option<CancelToken>,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        let now = Instant::now();
        Self {
            started: now,
            expires_at: now + budget,
            cancel: None,
        }
    }

    pub fn at(expires_at: Instant) -> Self {
        Self {
            started: Instant::now(),
            expires_at,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Caller cancellation wins over expiry when both apply.
    #[inline]
    pub fn check(&self) -> Result<(), CollisionError> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(CollisionError::Cancelled);
        }
        let now = Instant::now();
        if now >= self.expires_at {
            return Err(CollisionError::DeadlineExceeded {
                elapsed: now.saturating_duration_since(self.started),
            });
        }
        Ok(())
    }
}

/// Share of one fixed step a collision pass may use.
pub fn frame_budget(timestep: Duration, fraction: f32) -> Duration {
    timestep.mul_f32(fraction.clamp(0.0, 1.0))
}
