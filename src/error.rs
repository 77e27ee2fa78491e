//! Error types for the ordered list and the demo driver.
//!
//! ## Kinds
//!
//! - [`ListError::Allocation`]: storage for a cell (or the list) could not be obtained
//! - [`ListError::NotFound`]: nothing to remove at the requested position
//! - [`ListError::UseAfterDestroy`]: the list was already torn down
//!
//! `NotFound` is an ordinary outcome of [`remove_at`], not a failure of the list.
//!
//! [`remove_at`]: crate::list::OrderedConcurrentList::remove_at

/// Errors returned by list operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// A new cell or the list's backing storage could not be obtained.
    #[error("Allocation failed: {reason}")]
    Allocation {
        /// What could not be allocated
        reason: String,
    },

    /// No cell at the requested position. `len` is the list length observed at the time
    /// (0 when the list was done and empty).
    #[error("No element at position {position} (list length {len})")]
    NotFound { position: usize, len: usize },

    /// The list was destroyed before this call.
    #[error("List used after destroy")]
    UseAfterDestroy,
}

impl ListError {
    /// Check if this is a `NotFound` outcome
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ListError::NotFound { .. })
    }
}

/// Errors returned by the demo driver.
#[derive(thiserror::Error, Debug)]
pub enum DemoError {
    /// A list operation failed.
    #[error(transparent)]
    List(#[from] ListError),

    /// A worker thread could not be created.
    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// A worker thread panicked before reporting its result.
    #[error("A {role} worker panicked")]
    WorkerPanicked { role: &'static str },
}
