use std::time::Duration;

use thiserror::Error;

/// Why a collision pass stopped early.
///
/// Responses applied before the stop stay applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollisionError {
    /// The per-tick budget ran out.
    #[error("collision pass exceeded its deadline after {elapsed:?}")]
    DeadlineExceeded { elapsed: Duration },

    /// The caller tripped the cancel token.
    #[error("collision pass cancelled by caller")]
    Cancelled,
}

impl CollisionError {
    #[inline]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::DeadlineExceeded { .. } | Self::Cancelled)
    }
}

/// Failure to publish a gameplay notification. Logged, never propagated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("event queue saturated ({pending} pending, capacity {capacity})")]
    QueueSaturated { pending: usize, capacity: usize },

    #[error("message type `{0}` is not registered")]
    Unregistered(&'static str),
}
