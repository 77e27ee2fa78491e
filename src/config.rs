//! Configuration for the list and the demo driver.
//!
//! Both structs use plain `Default` values plus `with_*` builder methods.
//!
//! ```
//! use ordered_waitlist::config::ListConfig;
//!
//! let config = ListConfig::default().with_initial_capacity(64).with_max_cells(1_000);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::ListError;

/// Storage settings for an [`OrderedConcurrentList`](crate::OrderedConcurrentList).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListConfig {
    /// Arena slots pre-allocated at creation
    pub initial_capacity: usize,

    /// Hard limit on linked cells; `None` means unbounded.
    /// An insert into a full list fails with [`ListError::Allocation`].
    pub max_cells: Option<usize>,
}

impl ListConfig {
    /// Set the number of pre-allocated arena slots
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Limit the number of cells the list may hold
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = Some(max_cells);
        self
    }

    /// Check that the backing storage can be set up with these settings
    ///
    /// # Errors
    ///
    /// [`ListError::Allocation`] if `max_cells` is zero or smaller than
    /// `initial_capacity`.
    pub fn validate(&self) -> Result<(), ListError> {
        match self.max_cells {
            Some(0) => Err(ListError::Allocation {
                reason: "max_cells must be at least 1".to_string(),
            }),
            Some(max) if self.initial_capacity > max => Err(ListError::Allocation {
                reason: format!(
                    "initial capacity {} exceeds max_cells {}",
                    self.initial_capacity, max
                ),
            }),
            _ => Ok(()),
        }
    }
}

/// Parameters of the demo workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoConfig {
    /// Worker threads per phase (inserters, removers, late inserters)
    pub threads: usize,

    /// Removers pick a position in `0..max_position`
    pub max_position: usize,

    /// Late inserters pick a value in `0..value_range`
    pub value_range: i64,

    /// Seed for the position/value generator
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            threads: 4,
            max_position: 5,
            value_range: 25,
            seed: 0,
        }
    }
}

impl DemoConfig {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
