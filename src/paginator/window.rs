//! The page-number window shown between the navigation arrows.
//!
//! When there are more pages than fit in the bar, only a contiguous run of
//! `max_window` page numbers is shown. The run is centered on the current page
//! and right-aligned once it would run past the last page.
//!
//! ```rust
//! use userpager::paginator::window::page_window;
//!
//! assert_eq!(page_window(1, 25, 10), 1..=10);
//! assert_eq!(page_window(13, 25, 10), 8..=17);
//! assert_eq!(page_window(25, 25, 10), 16..=25);
//! assert!(page_window(1, 0, 10).is_empty());
//! ```

use std::ops::RangeInclusive;

/// Default number of page buttons shown at once.
pub const DEFAULT_MAX_WINDOW: usize = 10;

/// Computes the run of page numbers to display.
///
/// `current` is 1-indexed. Out-of-range `current` is clamped into
/// `1..=total`, and a `max_window` of zero is treated as one. The result is
/// empty only when `total` is zero; otherwise it has
/// `min(total, max_window)` entries.
pub fn page_window(current: usize, total: usize, max_window: usize) -> RangeInclusive<usize> {
    let max_window = max_window.max(1);

    if total <= max_window {
        return 1..=total;
    }

    let current = current.clamp(1, total);
    let half = max_window / 2;

    let mut start = current.saturating_sub(half).max(1);
    let end = (start + max_window - 1).min(total);
    if end == total {
        // total > max_window here, so this cannot underflow
        start = end + 1 - max_window;
    }

    start..=end
}

type WindowKey = (usize, usize, usize);

/// Single-entry cache for [`page_window`], keyed on its inputs.
///
/// The window only changes when the current page, the page count or the
/// window size changes; every render in between reuses the stored range.
#[derive(Debug, Clone)]
pub struct WindowCache {
    key: Option<WindowKey>,
    window: RangeInclusive<usize>,
}

impl WindowCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            key: None,
            window: 1..=0,
        }
    }

    /// Returns the window for the given inputs, recomputing only on a key change.
    pub fn get(&mut self, current: usize, total: usize, max_window: usize) -> RangeInclusive<usize> {
        let key = (current, total, max_window);
        if self.key != Some(key) {
            self.window = page_window(current, total, max_window);
            self.key = Some(key);
        }
        self.window.clone()
    }

    /// The most recently computed window (empty before the first `get`).
    pub fn last(&self) -> RangeInclusive<usize> {
        self.window.clone()
    }

    /// Whether a window has been computed for exactly these inputs.
    pub fn is_fresh(&self, current: usize, total: usize, max_window: usize) -> bool {
        self.key == Some((current, total, max_window))
    }

    /// Forgets the stored window.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for WindowCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pages(r: RangeInclusive<usize>) -> Vec<usize> {
        r.collect()
    }

    #[test]
    fn test_fewer_pages_than_window() {
        assert_eq!(pages(page_window(1, 3, 10)), vec![1, 2, 3]);
        assert_eq!(pages(page_window(3, 3, 10)), vec![1, 2, 3]);
        assert_eq!(pages(page_window(7, 10, 10)), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_no_pages() {
        assert!(page_window(1, 0, 10).is_empty());
        assert!(page_window(1, 0, 0).is_empty());
    }

    #[test]
    fn test_first_page_of_many() {
        assert_eq!(page_window(1, 25, 10), 1..=10);
    }

    #[test]
    fn test_centered_on_middle_page() {
        assert_eq!(page_window(13, 25, 10), 8..=17);
    }

    #[test]
    fn test_near_the_end() {
        // natural window 15..=24 still fits
        assert_eq!(page_window(20, 25, 10), 15..=24);
        // one page later it reaches the end and gets right-aligned
        assert_eq!(page_window(21, 25, 10), 16..=25);
        assert_eq!(page_window(25, 25, 10), 16..=25);
    }

    #[test]
    fn test_left_boundary_clamps() {
        assert_eq!(page_window(3, 25, 10), 1..=10);
        assert_eq!(page_window(6, 25, 10), 1..=10);
        assert_eq!(page_window(7, 25, 10), 2..=11);
    }

    #[test]
    fn test_odd_window() {
        assert_eq!(page_window(10, 20, 5), 8..=12);
        assert_eq!(page_window(20, 20, 5), 16..=20);
    }

    #[test]
    fn test_single_button_window() {
        assert_eq!(page_window(4, 9, 1), 4..=4);
        assert_eq!(page_window(4, 9, 0), 4..=4);
    }

    #[test]
    fn test_out_of_range_current_is_clamped() {
        assert_eq!(page_window(0, 25, 10), 1..=10);
        assert_eq!(page_window(99, 25, 10), 16..=25);
    }

    #[test]
    fn test_cache_recomputes_on_key_change() {
        let mut cache = WindowCache::new();
        assert!(cache.last().is_empty());
        assert_eq!(cache.get(1, 25, 10), 1..=10);
        assert!(cache.is_fresh(1, 25, 10));
        assert!(!cache.is_fresh(2, 25, 10));
        assert_eq!(cache.get(13, 25, 10), 8..=17);
        assert_eq!(cache.last(), 8..=17);
        cache.clear();
        assert!(!cache.is_fresh(13, 25, 10));
    }

    proptest! {
        #[test]
        fn small_totals_show_every_page(total in 0usize..=20, extra in 0usize..10, current in 1usize..=20) {
            let max_window = total.max(1) + extra;
            prop_assert_eq!(page_window(current, total, max_window), 1..=total);
        }

        #[test]
        fn large_totals_fill_the_window(max_window in 1usize..=15, over in 1usize..100, seed in 0usize..1000) {
            let total = max_window + over;
            let current = seed % total + 1;
            let w = pages(page_window(current, total, max_window));

            prop_assert_eq!(w.len(), max_window);
            prop_assert!(w.windows(2).all(|p| p[1] == p[0] + 1));
            prop_assert!(w[0] >= 1);
            prop_assert!(*w.last().unwrap() <= total);
            prop_assert!(w.contains(&current));
        }
    }
}
