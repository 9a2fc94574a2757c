//! Visible range reported by the rendering collaborator

use std::ops::Range;

/// Slice of visible content currently on screen.
///
/// Indices are into the visible subsequence, not the full item sequence.
/// Both ends are inclusive, matching the `(first, last)` pair a virtualizer
/// reports.
///
/// # Invariants
/// - `first <= last` for ranges produced by [`VisibleRange::new`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRange {
    /// Index of first on-screen item (inclusive).
    pub first: usize,
    /// Index of last on-screen item (inclusive).
    pub last: usize,
}

impl VisibleRange {
    /// Create a new range. Reversed bounds are swapped.
    pub fn new(first: usize, last: usize) -> Self {
        if first <= last {
            Self { first, last }
        } else {
            Self {
                first: last,
                last: first,
            }
        }
    }

    /// Bounds of this range within a sequence of `len` items.
    ///
    /// Out-of-range ends are clamped, so the result can always index a slice.
    pub fn clamp_to(&self, len: usize) -> Range<usize> {
        let start = self.first.min(len);
        let end = self.last.saturating_add(1).min(len);
        start..end.max(start)
    }

    /// Whether `index` is within the range.
    pub fn contains(&self, index: usize) -> bool {
        (self.first..=self.last).contains(&index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn new_keeps_ordered_bounds() {
            let range = VisibleRange::new(5, 10);
            assert_eq!((range.first, range.last), (5, 10));
        }

        #[test]
        fn new_swaps_reversed_bounds() {
            let range = VisibleRange::new(10, 5);
            assert_eq!((range.first, range.last), (5, 10));
        }

        #[test]
        fn default_is_zero_zero() {
            assert_eq!(VisibleRange::default(), VisibleRange::new(0, 0));
        }
    }

    mod clamping {
        use super::*;

        #[test]
        fn inclusive_range_within_bounds() {
            assert_eq!(VisibleRange::new(2, 4).clamp_to(10), 2..5);
        }

        #[test]
        fn last_beyond_len_is_clamped() {
            assert_eq!(VisibleRange::new(2, 40).clamp_to(10), 2..10);
        }

        #[test]
        fn first_beyond_len_gives_empty_range() {
            assert!(VisibleRange::new(12, 14).clamp_to(10).is_empty());
        }

        #[test]
        fn empty_content_gives_empty_range() {
            assert!(VisibleRange::default().clamp_to(0).is_empty());
        }

        #[test]
        fn single_item_range() {
            assert_eq!(VisibleRange::new(0, 0).clamp_to(1), 0..1);
        }
    }

    mod contains {
        use super::*;

        #[test]
        fn includes_both_ends() {
            let range = VisibleRange::new(5, 10);
            assert!(range.contains(5));
            assert!(range.contains(10));
        }

        #[test]
        fn excludes_outside() {
            let range = VisibleRange::new(5, 10);
            assert!(!range.contains(4));
            assert!(!range.contains(11));
        }
    }
}
