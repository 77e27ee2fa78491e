//! Thread-safe sorted list with blocking removal.
//!
//! ## Locking
//!
//! One [`Mutex`] guards the whole list (chain, `done` flag, `destroyed` flag).
//! One [`Condvar`] is signalled when the list becomes non-empty, is marked
//! done, or is destroyed:
//!
//! | Operation | Notification |
//! |-----------|--------------|
//! | `insert` | `notify_one` |
//! | `mark_done` | `notify_all` |
//! | `destroy` | `notify_all` |
//!
//! Notifications are sent after the guard is dropped. Waiters re-check their
//! predicate in a loop, so spurious wakeups are harmless.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use ordered_waitlist::OrderedConcurrentList;
//!
//! let list = Arc::new(OrderedConcurrentList::new());
//!
//! let remover = {
//!     let list = Arc::clone(&list);
//!     thread::spawn(move || list.remove_at(0))
//! };
//!
//! list.insert(42).unwrap();
//! assert_eq!(remover.join().unwrap(), Ok(42));
//! ```

use std::fmt;
use std::sync::Arc;

use log::{debug, trace, warn};
use parking_lot::{Condvar, Mutex};

use crate::config::ListConfig;
use crate::error::ListError;
use crate::list::SortedChain;

/// Shared handle to a list, as passed to worker threads.
pub type ListHandle = Arc<OrderedConcurrentList>;

/// Everything the lock protects.
#[derive(Debug, Default)]
struct ListState {
    chain: SortedChain,

    /// No more inserts will happen; never reset
    done: bool,

    /// Torn down by `destroy`; never reset
    destroyed: bool,
}

impl ListState {
    #[inline]
    fn check_alive(&self) -> Result<(), ListError> {
        if self.destroyed {
            warn!("operation on destroyed list");
            Err(ListError::UseAfterDestroy)
        } else {
            Ok(())
        }
    }
}

/// Sorted list of integers shared between threads.
///
/// See the [module documentation](self) for the locking scheme.
#[derive(Debug, Default)]
pub struct OrderedConcurrentList {
    state: Mutex<ListState>,
    ready: Condvar,
}

impl OrderedConcurrentList {
    /// Create a new empty, unbounded list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty list with the given storage settings
    ///
    /// # Errors
    ///
    /// [`ListError::Allocation`] if the settings are unusable
    /// (see [`ListConfig::validate`]). No list is created in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use ordered_waitlist::{ListConfig, ListError, OrderedConcurrentList};
    ///
    /// let list = OrderedConcurrentList::with_config(ListConfig::default().with_max_cells(1)).unwrap();
    /// list.insert(1).unwrap();
    /// assert!(matches!(list.insert(2), Err(ListError::Allocation { .. })));
    /// ```
    pub fn with_config(config: ListConfig) -> Result<Self, ListError> {
        config.validate()?;
        debug!(
            "creating list (capacity {}, max cells {:?})",
            config.initial_capacity, config.max_cells
        );

        Ok(Self {
            state: Mutex::new(ListState {
                chain: SortedChain::with_limit(config.initial_capacity, config.max_cells),
                done: false,
                destroyed: false,
            }),
            ready: Condvar::new(),
        })
    }

    // ========================================================================
    // Insert / Remove
    // ========================================================================

    /// Insert `value` at its sorted position and wake one blocked remover
    ///
    /// Equal values go in front of the first existing equal value.
    ///
    /// # Errors
    ///
    /// - [`ListError::Allocation`] if the cell limit is reached (list unchanged)
    /// - [`ListError::UseAfterDestroy`] if the list was destroyed
    pub fn insert(&self, value: i64) -> Result<(), ListError> {
        {
            let mut state = self.state.lock();
            state.check_alive()?;
            if let Err(err) = state.chain.insert(value) {
                warn!("insert of {} refused: {}", value, err);
                return Err(err);
            }
            trace!("inserted {} (len {})", value, state.chain.len());
        }

        self.ready.notify_one();
        Ok(())
    }

    /// Remove and return the value `position` steps from the head
    ///
    /// Blocks while the list is empty and not marked done. Once woken:
    ///
    /// - empty and done: `NotFound`
    /// - `position >= len`: `NotFound`, list unchanged
    /// - otherwise the value at `position`
    ///
    /// # Errors
    ///
    /// - [`ListError::NotFound`] as described above
    /// - [`ListError::UseAfterDestroy`] if the list was (or gets) destroyed
    pub fn remove_at(&self, position: usize) -> Result<i64, ListError> {
        let mut state = self.state.lock();
        state.check_alive()?;

        let mut waited = false;
        while state.chain.is_empty() && !state.done && !state.destroyed {
            if !waited {
                debug!("remove_at({}) waiting for an element", position);
            }
            waited = true;
            self.ready.wait(&mut state);
        }
        if waited {
            debug!(
                "remove_at({}) woke (len {}, done {})",
                position,
                state.chain.len(),
                state.done
            );
        }
        state.check_alive()?;

        let len = state.chain.len();
        match state.chain.remove_at(position) {
            Some(value) => {
                trace!("removed {} at position {} (len {})", value, position, len - 1);
                Ok(value)
            }
            None => {
                drop(state);
                // This waiter may have consumed an insert's notify_one without
                // taking anything; hand it on to the next blocked remover.
                if waited && len > 0 {
                    self.ready.notify_one();
                }
                Err(ListError::NotFound { position, len })
            }
        }
    }

    /// Mark the list done and wake every blocked remover
    ///
    /// Removers on an empty list then return `NotFound`; removal from a
    /// non-empty list keeps working. Calling this twice is harmless.
    pub fn mark_done(&self) -> Result<(), ListError> {
        {
            let mut state = self.state.lock();
            state.check_alive()?;
            state.done = true;
            debug!("list marked done (len {})", state.chain.len());
        }

        self.ready.notify_all();
        Ok(())
    }

    /// Tear the list down
    ///
    /// Drops all remaining cells and wakes every blocked remover; they return
    /// [`ListError::UseAfterDestroy`]. Every later call does the same.
    ///
    /// # Returns
    ///
    /// The values that were still in the list, in order
    pub fn destroy(&self) -> Result<Vec<i64>, ListError> {
        let remaining = {
            let mut state = self.state.lock();
            state.check_alive()?;
            state.destroyed = true;
            state.chain.clear()
        };
        debug!("list destroyed ({} values dropped)", remaining.len());

        self.ready.notify_all();
        Ok(remaining)
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// Copy all values from head to tail
    pub fn snapshot(&self) -> Result<Vec<i64>, ListError> {
        let state = self.state.lock();
        state.check_alive()?;
        Ok(state.chain.values())
    }

    /// Call `f` on each value from head to tail
    ///
    /// The lock is held for the whole walk: `f` must not call back into this list.
    pub fn for_each<F>(&self, mut f: F) -> Result<(), ListError>
    where
        F: FnMut(i64),
    {
        let state = self.state.lock();
        state.check_alive()?;
        state.chain.iter().for_each(&mut f);
        Ok(())
    }

    /// Number of values currently in the list (0 once destroyed)
    pub fn len(&self) -> usize {
        self.state.lock().chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if `mark_done` has been called (true once destroyed)
    pub fn is_done(&self) -> bool {
        let state = self.state.lock();
        state.done || state.destroyed
    }
}

impl fmt::Display for OrderedConcurrentList {
    /// Renders `1 -> 2 -> 3`; an empty list renders as nothing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = match self.snapshot() {
            Ok(values) => values,
            Err(_) => return f.write_str("<destroyed>"),
        };

        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
