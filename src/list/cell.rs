//! List cell for slab-based storage.
//!
//! ## Design
//!
//! `ListCell` holds one value and the slab key of its successor. The slab
//! owns every cell; a cell is dropped when it is removed from the slab.
//!
//! ```text
//! ListCell {
//!     value: i64
//!     next: Option<usize>   (slab key, None for the tail)
//! }
//! ```

/// A single cell of a [`SortedChain`](crate::list::SortedChain).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCell {
    /// Stored value
    pub(crate) value: i64,

    /// Next cell in the chain (slab key).
    /// None if this is the tail.
    pub(crate) next: Option<usize>,
}

impl ListCell {
    /// Create a new unlinked cell
    ///
    /// # Example
    ///
    /// ```
    /// use ordered_waitlist::list::ListCell;
    ///
    /// let cell = ListCell::new(7);
    /// assert_eq!(cell.value(), 7);
    /// assert!(cell.is_last());
    /// ```
    #[inline]
    pub fn new(value: i64) -> Self {
        Self { value, next: None }
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Slab key of the successor
    #[inline]
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    /// Check if no cell follows this one
    #[inline]
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_new() {
        let cell = ListCell::new(-3);

        assert_eq!(cell.value(), -3);
        assert!(cell.next().is_none());
        assert!(cell.is_last());
    }

    #[test]
    fn test_cell_linking() {
        let mut cell = ListCell::new(1);

        cell.next = Some(4);
        assert_eq!(cell.next(), Some(4));
        assert!(!cell.is_last());

        cell.next = None;
        assert!(cell.is_last());
    }
}
