//! Error types

use thiserror::Error;

/// Insert rejected because the buffer already holds `N` entries.
///
/// Carries the rejected value back to the caller so it can be retried,
/// dropped, or routed elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("ring buffer is full")]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Take back the value that did not fit.
    pub fn into_inner(self) -> T {
        self.0
    }
}
