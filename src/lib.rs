//! # Ordered Waitlist
//!
//! A sorted list of integers shared between threads.
//!
//! ## Architecture
//!
//! - **List**: slab-backed singly linked chain behind one mutex and one condvar
//! - **Config**: storage limits and demo parameters
//! - **Demo**: multi-threaded driver exercising insert / remove / done
//!
//! ## Semantics
//!
//! 1. **Ordering**: values are kept ascending; equal values go before existing ones
//! 2. **Blocking removal**: `remove_at` waits while the list is empty and not done
//! 3. **Done**: `mark_done` wakes every waiter; empty-and-done removal is `NotFound`
//!
//! ## Example
//!
//! ```
//! use ordered_waitlist::{ListError, OrderedConcurrentList};
//!
//! let list = OrderedConcurrentList::new();
//! list.insert(3).unwrap();
//! list.insert(1).unwrap();
//! list.insert(2).unwrap();
//! assert_eq!(list.snapshot().unwrap(), vec![1, 2, 3]);
//!
//! assert_eq!(list.remove_at(0), Ok(1));
//! assert!(matches!(list.remove_at(5), Err(ListError::NotFound { .. })));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// List and demo configuration
pub mod config;

/// Sorted list: cells, chain, concurrent wrapper
pub mod list;

/// Multi-threaded demo driver
pub mod demo;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::{DemoConfig, ListConfig};
pub use error::{DemoError, ListError};
pub use list::{ListHandle, OrderedConcurrentList, SortedChain};
