//! Sorted singly linked chain on a slab arena.
//!
//! ## Design
//!
//! `SortedChain` is the single-threaded core of the list. Cells live in a
//! [`Slab`]; links are slab keys, so unlinking a cell never frees memory by
//! hand and keys are reused after removal.
//!
//! ```text
//! head (smallest) -> cell -> cell -> tail (largest)
//! ```
//!
//! - Values are kept in non-decreasing order
//! - Equal values are inserted before the first existing equal value
//! - `head` is `None` iff `len == 0` iff `tail` is `None`

use slab::Slab;

use crate::error::ListError;
use crate::list::ListCell;

/// Ascending chain of integer cells backed by a slab.
#[derive(Debug, Clone, Default)]
pub struct SortedChain {
    /// Cell storage
    cells: Slab<ListCell>,

    /// First (smallest) cell, slab key
    head: Option<usize>,

    /// Last (largest) cell, slab key
    tail: Option<usize>,

    /// Number of linked cells
    len: usize,

    /// Hard limit on linked cells
    max_cells: Option<usize>,
}

impl SortedChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chain with pre-allocated arena slots
    ///
    /// # Example
    ///
    /// ```
    /// use ordered_waitlist::list::SortedChain;
    ///
    /// let chain = SortedChain::with_capacity(128);
    /// assert!(chain.capacity() >= 128);
    /// assert!(chain.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Slab::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Create a chain that refuses inserts once it holds `max_cells` cells
    pub fn with_limit(capacity: usize, max_cells: Option<usize>) -> Self {
        Self {
            max_cells,
            ..Self::with_capacity(capacity)
        }
    }

    // ========================================================================
    // Size
    // ========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pre-allocated arena slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cells.capacity()
    }

    #[inline]
    pub fn max_cells(&self) -> Option<usize> {
        self.max_cells
    }

    /// Smallest value, if any
    #[inline]
    pub fn head_value(&self) -> Option<i64> {
        self.head.map(|key| self.cells[key].value)
    }

    /// Largest value, if any
    #[inline]
    pub fn tail_value(&self) -> Option<i64> {
        self.tail.map(|key| self.cells[key].value)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert `value` at its sorted position
    ///
    /// # Returns
    ///
    /// The slab key of the new cell
    ///
    /// # Errors
    ///
    /// [`ListError::Allocation`] if the chain already holds `max_cells` cells.
    /// The chain is left untouched in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use ordered_waitlist::list::SortedChain;
    ///
    /// let mut chain = SortedChain::new();
    /// chain.insert(3).unwrap();
    /// chain.insert(1).unwrap();
    /// chain.insert(2).unwrap();
    ///
    /// assert_eq!(chain.values(), vec![1, 2, 3]);
    /// ```
    pub fn insert(&mut self, value: i64) -> Result<usize, ListError> {
        if let Some(max) = self.max_cells {
            if self.len >= max {
                return Err(ListError::Allocation {
                    reason: format!("cell limit of {} reached", max),
                });
            }
        }

        let key = self.cells.insert(ListCell::new(value));

        match (self.head, self.tail) {
            (Some(head), Some(tail)) => {
                if value < self.cells[head].value {
                    self.cells[key].next = Some(head);
                    self.head = Some(key);
                } else if value > self.cells[tail].value {
                    self.cells[tail].next = Some(key);
                    self.tail = Some(key);
                } else {
                    self.splice_sorted(key, value);
                }
            }
            _ => {
                self.head = Some(key);
                self.tail = Some(key);
            }
        }

        self.len += 1;
        Ok(key)
    }

    /// Link `key` in front of the first cell whose value is >= `value`
    fn splice_sorted(&mut self, key: usize, value: i64) {
        let mut prev: Option<usize> = None;
        let mut cursor = self.head;

        while let Some(current) = cursor {
            if self.cells[current].value >= value {
                break;
            }
            prev = Some(current);
            cursor = self.cells[current].next;
        }

        self.cells[key].next = cursor;
        match prev {
            Some(prev) => self.cells[prev].next = Some(key),
            None => self.head = Some(key),
        }
        if cursor.is_none() {
            self.tail = Some(key);
        }
    }

    /// Unlink and drop the cell `position` steps from the head
    ///
    /// # Returns
    ///
    /// The removed value, or None if `position >= len`
    pub fn remove_at(&mut self, position: usize) -> Option<i64> {
        if position >= self.len {
            return None;
        }

        let mut prev: Option<usize> = None;
        let mut current = self.head?;
        for _ in 0..position {
            prev = Some(current);
            current = self.cells[current].next?;
        }

        let cell = self.cells.remove(current);
        match prev {
            Some(prev) => self.cells[prev].next = cell.next,
            None => self.head = cell.next,
        }
        if self.tail == Some(current) {
            self.tail = prev;
        }

        self.len -= 1;
        Some(cell.value)
    }

    /// Drop every cell
    ///
    /// # Returns
    ///
    /// The values that were linked, in order
    pub fn clear(&mut self) -> Vec<i64> {
        let values = self.values();
        self.cells.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
        values
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Iterate over values from head to tail
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            cells: &self.cells,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Copy all values from head to tail
    pub fn values(&self) -> Vec<i64> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a SortedChain {
    type Item = i64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Head-to-tail iterator over a [`SortedChain`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    cells: &'a Slab<ListCell>,
    cursor: Option<usize>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = &self.cells[self.cursor?];
        self.cursor = cell.next;
        self.remaining -= 1;
        Some(cell.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Walk the links and check them against head/tail/len
    fn assert_consistent(chain: &SortedChain) {
        let mut count = 0;
        let mut last = None;
        let mut cursor = chain.head;
        while let Some(key) = cursor {
            count += 1;
            last = Some(key);
            cursor = chain.cells[key].next;
        }

        assert_eq!(count, chain.len, "len must match reachable cells");
        assert_eq!(chain.cells.len(), chain.len, "no orphaned cells");
        assert_eq!(last, chain.tail, "tail must be the last reachable cell");
        assert_eq!(chain.head.is_none(), chain.len == 0);
        assert_eq!(chain.tail.is_none(), chain.len == 0);

        let values = chain.values();
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "unsorted: {:?}", values);
    }

    fn chain_of(values: &[i64]) -> SortedChain {
        let mut chain = SortedChain::new();
        for &value in values {
            chain.insert(value).unwrap();
        }
        chain
    }

    #[test]
    fn test_chain_new() {
        let chain = SortedChain::new();

        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
        assert!(chain.head_value().is_none());
        assert!(chain.tail_value().is_none());
        assert!(chain.values().is_empty());
        assert_consistent(&chain);
    }

    #[test]
    fn test_insert_single() {
        let mut chain = SortedChain::new();
        let key = chain.insert(5).unwrap();

        assert_eq!(chain.head, Some(key));
        assert_eq!(chain.tail, Some(key));
        assert_eq!(chain.len(), 1);
        assert_consistent(&chain);
    }

    #[test]
    fn test_insert_head_and_tail_fast_paths() {
        let mut chain = chain_of(&[10]);

        let low = chain.insert(1).unwrap();
        assert_eq!(chain.head, Some(low));

        let high = chain.insert(20).unwrap();
        assert_eq!(chain.tail, Some(high));

        assert_eq!(chain.values(), vec![1, 10, 20]);
        assert_eq!(chain.head_value(), Some(1));
        assert_eq!(chain.tail_value(), Some(20));
        assert_consistent(&chain);
    }

    #[test]
    fn test_insert_middle() {
        let chain = chain_of(&[3, 1, 2]);
        assert_eq!(chain.values(), vec![1, 2, 3]);
        assert_consistent(&chain);

        let chain = chain_of(&[0, 100, 50, 25, 75]);
        assert_eq!(chain.values(), vec![0, 25, 50, 75, 100]);
        assert_consistent(&chain);
    }

    #[test]
    fn test_insert_equal_to_head_goes_first() {
        let mut chain = chain_of(&[4, 8]);
        let head_before = chain.head;

        let key = chain.insert(4).unwrap();

        assert_eq!(chain.head, Some(key));
        assert_eq!(chain.cells[key].next, head_before);
        assert_eq!(chain.values(), vec![4, 4, 8]);
        assert_consistent(&chain);
    }

    #[test]
    fn test_insert_equal_to_tail_goes_before_it() {
        let mut chain = chain_of(&[1, 9]);
        let tail_before = chain.tail;

        let key = chain.insert(9).unwrap();

        assert_eq!(chain.tail, tail_before);
        assert_eq!(chain.cells[key].next, tail_before);
        assert_eq!(chain.values(), vec![1, 9, 9]);
        assert_consistent(&chain);
    }

    #[test]
    fn test_duplicates_preserved() {
        let chain = chain_of(&[2, 2, 1, 2, 1, 3, 3]);
        assert_eq!(chain.values(), vec![1, 1, 2, 2, 2, 3, 3]);
        assert_consistent(&chain);
    }

    #[test]
    fn test_remove_head() {
        let mut chain = chain_of(&[1, 2, 3]);

        assert_eq!(chain.remove_at(0), Some(1));
        assert_eq!(chain.values(), vec![2, 3]);
        assert_consistent(&chain);
    }

    #[test]
    fn test_remove_middle() {
        let mut chain = chain_of(&[1, 2, 3]);

        assert_eq!(chain.remove_at(1), Some(2));
        assert_eq!(chain.values(), vec![1, 3]);
        assert_consistent(&chain);
    }

    #[test]
    fn test_remove_tail_updates_tail() {
        let mut chain = chain_of(&[1, 2, 3]);

        assert_eq!(chain.remove_at(2), Some(3));
        assert_eq!(chain.tail_value(), Some(2));
        assert_consistent(&chain);

        // Tail insert after tail removal must link from the new tail
        chain.insert(10).unwrap();
        assert_eq!(chain.values(), vec![1, 2, 10]);
        assert_consistent(&chain);
    }

    #[test]
    fn test_remove_only() {
        let mut chain = chain_of(&[42]);

        assert_eq!(chain.remove_at(0), Some(42));
        assert!(chain.is_empty());
        assert!(chain.head.is_none());
        assert!(chain.tail.is_none());
        assert_consistent(&chain);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut chain = chain_of(&[1, 2]);

        assert_eq!(chain.remove_at(2), None);
        assert_eq!(chain.remove_at(usize::MAX), None);
        assert_eq!(chain.len(), 2);
        assert_consistent(&chain);

        let mut empty = SortedChain::new();
        assert_eq!(empty.remove_at(0), None);
    }

    #[test]
    fn test_slab_keys_reused() {
        let mut chain = chain_of(&[1, 2, 3]);
        chain.remove_at(1);
        chain.insert(7).unwrap();

        assert_eq!(chain.cells.len(), 3);
        assert_eq!(chain.values(), vec![1, 3, 7]);
        assert_consistent(&chain);
    }

    #[test]
    fn test_limit_refuses_insert() {
        let mut chain = SortedChain::with_limit(0, Some(2));
        chain.insert(1).unwrap();
        chain.insert(2).unwrap();

        let err = chain.insert(3).unwrap_err();
        assert!(matches!(err, ListError::Allocation { .. }));
        assert_eq!(chain.values(), vec![1, 2]);
        assert_consistent(&chain);

        // Room again after a removal
        chain.remove_at(0);
        chain.insert(3).unwrap();
        assert_eq!(chain.values(), vec![2, 3]);
    }

    #[test]
    fn test_clear_returns_values() {
        let mut chain = chain_of(&[5, 1, 3]);

        assert_eq!(chain.clear(), vec![1, 3, 5]);
        assert!(chain.is_empty());
        assert_consistent(&chain);
    }

    #[test]
    fn test_iter_exact_size() {
        let chain = chain_of(&[4, 2, 6]);
        let iter = chain.iter();

        assert_eq!(iter.len(), 3);
        assert_eq!((&chain).into_iter().sum::<i64>(), 12);
    }
}
