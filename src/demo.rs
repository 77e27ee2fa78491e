//! Multi-threaded demo driver.
//!
//! Runs the reference workload against one [`OrderedConcurrentList`]:
//!
//! 1. `threads` inserters insert `0..threads` concurrently
//! 2. `threads` removers start at random positions in `0..max_position`
//!    (they block while the list is empty)
//! 3. `threads` more inserters insert random values in `0..value_range`
//! 4. once those inserters finish the list is marked done and the removers
//!    are joined
//!
//! The driver only uses the list's public operations.
//!
//! ```
//! use ordered_waitlist::{demo, DemoConfig};
//!
//! let report = demo::run(&DemoConfig::default()).unwrap();
//! assert_eq!(report.initial, vec![0, 1, 2, 3]);
//! ```

use std::thread::{self, Scope, ScopedJoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::DemoConfig;
use crate::error::{DemoError, ListError};
use crate::list::OrderedConcurrentList;

/// Outcome of one demo run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    /// List contents after the first insert phase
    pub initial: Vec<i64>,

    /// Positions requested by the removers, one per remover
    pub positions: Vec<usize>,

    /// Values inserted by the late inserters
    pub late_values: Vec<i64>,

    /// What each remover got; `None` for `NotFound`
    pub removed: Vec<Option<i64>>,

    /// List contents after all workers finished
    pub remaining: Vec<i64>,

    /// Wall time of both phases
    pub elapsed: Duration,
}

impl DemoReport {
    /// Number of removers that actually removed a value
    pub fn removed_count(&self) -> usize {
        self.removed.iter().filter(|r| r.is_some()).count()
    }
}

/// Run the demo workload
///
/// # Errors
///
/// - [`DemoError::Spawn`] if a worker thread cannot be created
/// - [`DemoError::WorkerPanicked`] if a worker panics
/// - [`DemoError::List`] for list failures other than `NotFound`
pub fn run(config: &DemoConfig) -> Result<DemoReport, DemoError> {
    let list = OrderedConcurrentList::new();
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let max_position = config.max_position.max(1);
    let value_range = config.value_range.max(1);
    let positions: Vec<usize> = (0..config.threads)
        .map(|_| rng.gen_range(0..max_position))
        .collect();
    let late_values: Vec<i64> = (0..config.threads)
        .map(|_| rng.gen_range(0..value_range))
        .collect();

    let start = Instant::now();

    // Phase 1: concurrent inserts of 0..threads
    let first_values: Vec<i64> = (0..config.threads as i64).collect();
    thread::scope(|s| -> Result<(), DemoError> {
        let inserters = spawn_inserters(s, &list, &first_values)?;
        join_all(inserters, "inserter")?
            .into_iter()
            .collect::<Result<(), ListError>>()?;
        Ok(())
    })?;

    let initial = list.snapshot()?;
    info!("after first insert phase: {}", list);

    // Phase 2: removers and late inserters race; done once inserters finish
    let removed = thread::scope(|s| -> Result<Vec<Option<i64>>, DemoError> {
        let removers = match spawn_removers(s, &list, &positions) {
            Ok(handles) => handles,
            Err(err) => {
                // Already-started removers may be blocked; release them
                list.mark_done()?;
                return Err(err);
            }
        };

        let inserted = spawn_inserters(s, &list, &late_values)
            .and_then(|handles| join_all(handles, "inserter"));
        list.mark_done()?;
        debug!("late inserters finished, list marked done");

        let results = join_all(removers, "remover")?;
        inserted?.into_iter().collect::<Result<(), ListError>>()?;

        results
            .into_iter()
            .map(|result| match result {
                Ok(value) => Ok(Some(value)),
                Err(ListError::NotFound { .. }) => Ok(None),
                Err(err) => Err(DemoError::List(err)),
            })
            .collect()
    })?;

    let elapsed = start.elapsed();
    let remaining = list.snapshot()?;
    info!("after concurrent phase: {}", list);

    Ok(DemoReport {
        initial,
        positions,
        late_values,
        removed,
        remaining,
        elapsed,
    })
}

fn spawn_inserters<'scope, 'env>(
    scope: &'scope Scope<'scope, 'env>,
    list: &'env OrderedConcurrentList,
    values: &[i64],
) -> Result<Vec<ScopedJoinHandle<'scope, Result<(), ListError>>>, DemoError> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            thread::Builder::new()
                .name(format!("inserter-{}", i))
                .spawn_scoped(scope, move || list.insert(value))
                .map_err(DemoError::from)
        })
        .collect()
}

fn spawn_removers<'scope, 'env>(
    scope: &'scope Scope<'scope, 'env>,
    list: &'env OrderedConcurrentList,
    positions: &[usize],
) -> Result<Vec<ScopedJoinHandle<'scope, Result<i64, ListError>>>, DemoError> {
    positions
        .iter()
        .enumerate()
        .map(|(i, &position)| {
            thread::Builder::new()
                .name(format!("remover-{}", i))
                .spawn_scoped(scope, move || list.remove_at(position))
                .map_err(DemoError::from)
        })
        .collect()
}

fn join_all<T>(
    handles: Vec<ScopedJoinHandle<'_, T>>,
    role: &'static str,
) -> Result<Vec<T>, DemoError> {
    handles
        .into_iter()
        .map(|handle| handle.join().map_err(|_| DemoError::WorkerPanicked { role }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_default_run_accounts_for_every_value() {
        let report = run(&DemoConfig::default()).unwrap();

        assert_eq!(report.initial, vec![0, 1, 2, 3]);
        assert_eq!(report.positions.len(), 4);
        assert_eq!(report.late_values.len(), 4);
        assert_eq!(report.removed.len(), 4);

        // Every inserted value is either removed or still in the list
        let mut all: Vec<i64> = report.initial.clone();
        all.extend(&report.late_values);
        all.sort_unstable();

        let mut seen: Vec<i64> = report.removed.iter().flatten().copied().collect();
        seen.extend(&report.remaining);
        seen.sort_unstable();

        assert_eq!(all, seen);
        assert!(report.remaining.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_positions_within_range() {
        let config = DemoConfig::default().with_threads(16).with_seed(99);
        let report = run(&config).unwrap();

        assert!(report.positions.iter().all(|&p| p < config.max_position));
        assert!(report.late_values.iter().all(|&v| (0..config.value_range).contains(&v)));
        assert_eq!(
            report.removed_count() + report.remaining.len(),
            2 * config.threads
        );
    }

    #[test]
    fn test_same_seed_same_workload() {
        let config = DemoConfig::default().with_seed(1234);
        let first = run(&config).unwrap();
        let second = run(&config).unwrap();

        assert_eq!(first.positions, second.positions);
        assert_eq!(first.late_values, second.late_values);
    }

    #[test]
    fn test_zero_threads() {
        let report = run(&DemoConfig::default().with_threads(0)).unwrap();

        assert!(report.initial.is_empty());
        assert!(report.removed.is_empty());
        assert!(report.remaining.is_empty());
    }
}
