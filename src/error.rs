//! Errors surfaced by `publish`.

use crate::types::BoxError;
use thiserror::Error;

/// # Errors produced while publishing an event.
///
/// Delivery is fail-fast: the first failing callback aborts the remaining callbacks
/// of that `publish` call and its error is handed back to the publisher.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PublishError {
    /// A callback registered with `try_subscribe` returned an error.
    #[error("subscriber {position} of `{event}` failed: {source}")]
    Handler {
        /// Dispatch name of the event being published.
        event: &'static str,
        /// Zero-based registration position of the failing callback.
        position: usize,
        /// The callback's error.
        #[source]
        source: BoxError,
    },
}

impl PublishError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            PublishError::Handler { .. } => "publish_handler_failed",
        }
    }

    /// Dispatch name of the event whose delivery failed.
    pub fn event(&self) -> &'static str {
        match self {
            PublishError::Handler { event, .. } => *event,
        }
    }
}
