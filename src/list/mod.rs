//! Sorted list module.
//!
//! ## Components
//!
//! - [`ListCell`]: one value plus the slab key of the next cell
//! - [`SortedChain`]: single-threaded ascending chain on a slab arena
//! - [`OrderedConcurrentList`]: the chain behind a mutex, with blocking removal
//!
//! ## Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Insert (smaller than head / larger than tail) | O(1) |
//! | Insert (middle) | O(n) |
//! | Remove at position p | O(p) |
//! | Snapshot | O(n) |
//!
//! All operations on [`OrderedConcurrentList`] hold a single lock for their
//! whole duration, except while a remover is waiting.

pub mod cell;
pub mod chain;
pub mod concurrent;

pub use cell::ListCell;
pub use chain::SortedChain;
pub use concurrent::{ListHandle, OrderedConcurrentList};
