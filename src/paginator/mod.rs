//! A windowed pagination bar.
//!
//! The paginator owns the current page of a listing and renders a row of
//! controls: first, previous, a window of numbered pages with the current one
//! highlighted, next and last. Navigation never fails. Every request is clamped
//! to a valid page, so the current page always satisfies
//! `1 <= page <= max(total_pages, 1)`.
//!
//! The paginator does not render the records themselves. Use
//! [`Model::page_slice`] to take the visible part of your data.
//!
//! ```rust
//! use userpager::paginator::{Model, NavAction};
//!
//! let mut paginator = Model::new().with_per_page(20).with_total_items(45);
//! assert_eq!(paginator.total_pages(), 3);
//!
//! paginator.apply(NavAction::Last);
//! let users: Vec<u32> = (1..=45).collect();
//! assert_eq!(paginator.page_slice(&users).len(), 5);
//! ```

mod keys;
pub mod window;

pub use keys::PaginatorKeyMap;
pub use window::{page_window, WindowCache, DEFAULT_MAX_WINDOW};

use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use std::ops::RangeInclusive;
use tracing::debug;

/// Default number of records per page.
pub const DEFAULT_PER_PAGE: usize = 20;

// Nine digits always fit in a usize, even on 32-bit targets.
const MAX_JUMP_DIGITS: usize = 9;

const FIRST: &str = "«";
const PREV: &str = "‹";
const NEXT: &str = "›";
const LAST: &str = "»";

/// A navigation request applied to the paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Go to page 1.
    First,
    /// Go back one page, stopping at page 1.
    Previous,
    /// Go forward one page, stopping at the last page.
    Next,
    /// Go to the last page.
    Last,
    /// Go to a specific page, clamped into range.
    GoTo(usize),
}

/// Styles for the pagination bar.
#[derive(Debug, Clone)]
pub struct PaginatorStyles {
    /// First/previous/next/last arrows.
    pub control: Style,
    /// Arrows that would not move the page.
    pub disabled_control: Style,
    /// Page numbers other than the current one.
    pub page: Style,
    /// The current page number.
    pub active_page: Style,
    /// The "go to" prompt shown while a page number is being typed.
    pub prompt: Style,
}

impl Default for PaginatorStyles {
    fn default() -> Self {
        let subdued = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };
        let very_subdued = AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        };

        Self {
            control: Style::new().foreground(AdaptiveColor {
                Light: "#1a1a1a",
                Dark: "#dddddd",
            }),
            disabled_control: Style::new().foreground(very_subdued),
            page: Style::new().foreground(subdued),
            active_page: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#EE6FF8",
                    Dark: "#EE6FF8",
                })
                .bold(true),
            prompt: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
        }
    }
}

/// Pagination state and its control bar.
///
/// Pages are 1-indexed. The page count is derived from the item count and the
/// page size, and the current page is only changed through the navigation
/// methods, [`Model::apply`] or [`Model::update`].
///
/// ```rust
/// use userpager::paginator::Model;
///
/// let mut paginator = Model::new().with_per_page(10).with_total_items(250);
/// assert_eq!(paginator.total_pages(), 25);
/// assert_eq!(paginator.window(), 1..=10);
///
/// paginator.go_to_page(13);
/// assert_eq!(paginator.window(), 8..=17);
///
/// // out-of-range requests are clamped, not rejected
/// assert_eq!(paginator.go_to_page(400), 25);
/// assert_eq!(paginator.go_to_page(0), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    page: usize,
    per_page: usize,
    total_items: usize,
    total_pages: usize,
    max_window: usize,
    jump: String,
    window: WindowCache,

    /// Key bindings.
    pub keymap: PaginatorKeyMap,
    /// Styles for the control bar.
    pub styles: PaginatorStyles,
}

impl Default for Model {
    /// Page 1 of an empty listing, 20 records per page, 10 page buttons.
    fn default() -> Self {
        let mut model = Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            total_items: 0,
            total_pages: 0,
            max_window: DEFAULT_MAX_WINDOW,
            jump: String::new(),
            window: WindowCache::new(),
            keymap: PaginatorKeyMap::default(),
            styles: PaginatorStyles::default(),
        };
        model.refresh();
        model
    }
}

impl Model {
    /// Creates a paginator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size (builder pattern). Values below 1 become 1.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.set_per_page(per_page);
        self
    }

    /// Sets the item count (builder pattern).
    pub fn with_total_items(mut self, items: usize) -> Self {
        self.set_total_items(items);
        self
    }

    /// Sets how many page buttons are shown at once (builder pattern).
    /// Values below 1 become 1.
    pub fn with_max_window(mut self, max_window: usize) -> Self {
        self.set_max_window(max_window);
        self
    }

    /// Sets the page size and re-derives the page count.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
        self.set_total_items(self.total_items);
    }

    /// Sets the item count, re-derives the page count and pulls the current
    /// page back into range if the listing shrank.
    ///
    /// ```rust
    /// use userpager::paginator::Model;
    ///
    /// let mut paginator = Model::new().with_per_page(10).with_total_items(95);
    /// assert_eq!(paginator.total_pages(), 10);
    ///
    /// paginator.go_to_page(10);
    /// paginator.set_total_items(30);
    /// assert_eq!(paginator.page(), 3);
    ///
    /// paginator.set_total_items(0);
    /// assert_eq!(paginator.total_pages(), 0);
    /// assert_eq!(paginator.page(), 1);
    /// ```
    pub fn set_total_items(&mut self, items: usize) {
        self.total_items = items;
        self.total_pages = items.div_ceil(self.per_page);
        self.page = self.clamp(self.page);
        self.refresh();
    }

    /// Sets how many page buttons are shown at once.
    pub fn set_max_window(&mut self, max_window: usize) {
        self.max_window = max_window.max(1);
        self.refresh();
    }

    /// The current page, 1-indexed.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Records per page.
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Number of records being paginated.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages; zero for an empty listing.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Maximum number of page buttons shown at once.
    pub fn max_window(&self) -> usize {
        self.max_window
    }

    /// The page number being typed, if any.
    pub fn pending_jump(&self) -> Option<&str> {
        (!self.jump.is_empty()).then_some(self.jump.as_str())
    }

    /// Goes to page 1.
    pub fn first_page(&mut self) -> usize {
        self.set_page(1)
    }

    /// Goes to the last page (page 1 when there are no pages).
    pub fn last_page(&mut self) -> usize {
        self.set_page(self.total_pages)
    }

    /// Goes forward one page. No effect on the last page.
    pub fn next_page(&mut self) -> usize {
        self.set_page(self.page.saturating_add(1))
    }

    /// Goes back one page. No effect on page 1.
    pub fn prev_page(&mut self) -> usize {
        self.set_page(self.page.saturating_sub(1))
    }

    /// Goes to page `n`, clamped into `1..=total_pages`.
    pub fn go_to_page(&mut self, n: usize) -> usize {
        self.set_page(n)
    }

    /// Applies a navigation request and returns the new page.
    pub fn apply(&mut self, action: NavAction) -> usize {
        let page = match action {
            NavAction::First => self.first_page(),
            NavAction::Previous => self.prev_page(),
            NavAction::Next => self.next_page(),
            NavAction::Last => self.last_page(),
            NavAction::GoTo(n) => self.go_to_page(n),
        };
        debug!(?action, page, total_pages = self.total_pages, "navigated");
        page
    }

    /// Whether the current page is the first one.
    pub fn on_first_page(&self) -> bool {
        self.page == 1
    }

    /// Whether the current page is the last one (always true with no pages).
    pub fn on_last_page(&self) -> bool {
        self.page >= self.total_pages
    }

    /// The page numbers to show as buttons.
    pub fn window(&self) -> RangeInclusive<usize> {
        debug_assert!(self.window.is_fresh(self.page, self.total_pages, self.max_window));
        self.window.last()
    }

    /// Start (inclusive) and end (exclusive) indices of the current page in a
    /// collection of `length` items.
    ///
    /// ```rust
    /// use userpager::paginator::Model;
    ///
    /// let mut paginator = Model::new().with_per_page(20).with_total_items(45);
    /// assert_eq!(paginator.slice_bounds(45), (0, 20));
    /// paginator.last_page();
    /// assert_eq!(paginator.slice_bounds(45), (40, 45));
    /// ```
    pub fn slice_bounds(&self, length: usize) -> (usize, usize) {
        let start = ((self.page - 1) * self.per_page).min(length);
        let end = (start + self.per_page).min(length);
        (start, end)
    }

    /// The records on the current page.
    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let (start, end) = self.slice_bounds(items.len());
        &items[start..end]
    }

    /// Number of records on the current page.
    pub fn items_on_page(&self, length: usize) -> usize {
        let (start, end) = self.slice_bounds(length);
        end - start
    }

    /// Handles pagination key presses.
    ///
    /// Returns the navigation that was applied, if any. Digits are collected
    /// into a pending page number instead of navigating immediately; Enter
    /// applies it as [`NavAction::GoTo`].
    pub fn update(&mut self, msg: &Msg) -> Option<NavAction> {
        let key_msg = msg.downcast_ref::<KeyMsg>()?;

        if self.keymap.jump_digit.matches(key_msg) {
            if let KeyCode::Char(digit) = key_msg.key {
                if self.jump.len() < MAX_JUMP_DIGITS {
                    self.jump.push(digit);
                }
            }
            return None;
        }

        if !self.jump.is_empty() {
            if self.keymap.jump_confirm.matches(key_msg) {
                let target = self.jump.parse::<usize>().ok();
                self.jump.clear();
                let action = NavAction::GoTo(target?);
                self.apply(action);
                return Some(action);
            } else if self.keymap.jump_delete.matches(key_msg) {
                self.jump.pop();
                return None;
            } else if self.keymap.jump_cancel.matches(key_msg) {
                self.jump.clear();
                return None;
            }
        }

        let action = if self.keymap.first_page.matches(key_msg) {
            NavAction::First
        } else if self.keymap.prev_page.matches(key_msg) {
            NavAction::Previous
        } else if self.keymap.next_page.matches(key_msg) {
            NavAction::Next
        } else if self.keymap.last_page.matches(key_msg) {
            NavAction::Last
        } else {
            return None;
        };

        self.jump.clear();
        self.apply(action);
        Some(action)
    }

    /// Renders the control bar, e.g. `« ‹ 1 2 [3] 4 › »`.
    ///
    /// ```rust
    /// use userpager::paginator::Model;
    ///
    /// let mut paginator = Model::new().with_per_page(10).with_total_items(40);
    /// paginator.go_to_page(3);
    /// let view = paginator.view();
    /// assert!(view.contains("[3]"));
    /// ```
    pub fn view(&self) -> String {
        let arrow = |label: &str, disabled: bool| {
            if disabled {
                self.styles.disabled_control.render(label)
            } else {
                self.styles.control.render(label)
            }
        };

        let mut parts = vec![
            arrow(FIRST, self.on_first_page()),
            arrow(PREV, self.on_first_page()),
        ];

        for n in self.window() {
            if n == self.page {
                parts.push(self.styles.active_page.render(&format!("[{}]", n)));
            } else {
                parts.push(self.styles.page.render(&n.to_string()));
            }
        }

        parts.push(arrow(NEXT, self.on_last_page()));
        parts.push(arrow(LAST, self.on_last_page()));

        let mut out = parts.join(" ");
        if let Some(jump) = self.pending_jump() {
            out.push_str("   ");
            out.push_str(&self.styles.prompt.render(&format!("go to: {}_", jump)));
        }
        out
    }

    fn clamp(&self, n: usize) -> usize {
        n.clamp(1, self.total_pages.max(1))
    }

    fn set_page(&mut self, n: usize) -> usize {
        self.page = self.clamp(n);
        self.refresh();
        self.page
    }

    fn refresh(&mut self) {
        self.window.get(self.page, self.total_pages, self.max_window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }) as Msg
    }

    fn plain(s: &str) -> String {
        strip_ansi_escapes::strip_str(s)
    }

    fn paginator(items: usize, per_page: usize) -> Model {
        Model::new().with_per_page(per_page).with_total_items(items)
    }

    #[test]
    fn test_defaults() {
        let p = Model::new();
        assert_eq!(p.page(), 1);
        assert_eq!(p.per_page(), DEFAULT_PER_PAGE);
        assert_eq!(p.max_window(), DEFAULT_MAX_WINDOW);
        assert_eq!(p.total_pages(), 0);
        assert!(p.window().is_empty());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(paginator(45, 20).total_pages(), 3);
        assert_eq!(paginator(40, 20).total_pages(), 2);
        assert_eq!(paginator(1, 20).total_pages(), 1);
        assert_eq!(paginator(0, 20).total_pages(), 0);
    }

    #[test]
    fn test_per_page_clamped_to_one() {
        let p = paginator(5, 0);
        assert_eq!(p.per_page(), 1);
        assert_eq!(p.total_pages(), 5);
    }

    #[test]
    fn test_last_page_slice() {
        let records: Vec<usize> = (0..45).collect();
        let mut p = paginator(45, 20);
        assert_eq!(p.last_page(), 3);
        assert_eq!(p.page_slice(&records), &records[40..45]);
        assert_eq!(p.items_on_page(records.len()), 5);
    }

    #[test]
    fn test_next_on_last_page_is_noop() {
        let mut p = paginator(45, 20);
        p.last_page();
        assert_eq!(p.next_page(), 3);
        assert!(p.on_last_page());
    }

    #[test]
    fn test_prev_on_first_page_is_noop() {
        let mut p = paginator(45, 20);
        assert_eq!(p.prev_page(), 1);
        assert!(p.on_first_page());
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut p = paginator(45, 20);
        assert_eq!(p.go_to_page(0), 1);
        assert_eq!(p.go_to_page(2), 2);
        assert_eq!(p.go_to_page(99), 3);
    }

    #[test]
    fn test_first_page_idempotent() {
        let mut p = paginator(100, 10);
        p.go_to_page(7);
        assert_eq!(p.first_page(), 1);
        assert_eq!(p.first_page(), 1);
        assert_eq!(p.window(), 1..=10);
    }

    #[test]
    fn test_empty_listing_navigation() {
        let mut p = paginator(0, 20);
        assert_eq!(p.next_page(), 1);
        assert_eq!(p.last_page(), 1);
        assert_eq!(p.go_to_page(5), 1);
        assert!(p.on_first_page() && p.on_last_page());
        assert_eq!(p.slice_bounds(0), (0, 0));
    }

    #[test]
    fn test_apply_dispatches() {
        let mut p = paginator(250, 10);
        assert_eq!(p.apply(NavAction::Last), 25);
        assert_eq!(p.apply(NavAction::Previous), 24);
        assert_eq!(p.apply(NavAction::First), 1);
        assert_eq!(p.apply(NavAction::Next), 2);
        assert_eq!(p.apply(NavAction::GoTo(13)), 13);
        assert_eq!(p.window(), 8..=17);
    }

    #[test]
    fn test_window_follows_page() {
        let mut p = paginator(250, 10);
        assert_eq!(p.window(), 1..=10);
        p.go_to_page(20);
        assert_eq!(p.window(), 15..=24);
        p.last_page();
        assert_eq!(p.window(), 16..=25);
    }

    #[test]
    fn test_shrinking_listing_clamps_page() {
        let mut p = paginator(250, 10);
        p.go_to_page(25);
        p.set_total_items(45);
        assert_eq!(p.page(), 5);
        assert_eq!(p.window(), 1..=5);
    }

    #[test]
    fn test_update_arrow_keys() {
        let mut p = paginator(100, 10);
        assert_eq!(p.update(&key(KeyCode::Right)), Some(NavAction::Next));
        assert_eq!(p.page(), 2);
        assert_eq!(p.update(&key(KeyCode::Char('l'))), Some(NavAction::Next));
        assert_eq!(p.update(&key(KeyCode::Left)), Some(NavAction::Previous));
        assert_eq!(p.page(), 2);
        assert_eq!(p.update(&key(KeyCode::End)), Some(NavAction::Last));
        assert_eq!(p.page(), 10);
        assert_eq!(p.update(&key(KeyCode::Home)), Some(NavAction::First));
        assert_eq!(p.page(), 1);
        assert_eq!(p.update(&key(KeyCode::Up)), None);
    }

    #[test]
    fn test_update_ignores_other_messages() {
        let mut p = paginator(100, 10);
        let msg: Msg = Box::new("not a key");
        assert_eq!(p.update(&msg), None);
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn test_jump_by_typing_digits() {
        let mut p = paginator(250, 10);
        assert_eq!(p.update(&key(KeyCode::Char('1'))), None);
        assert_eq!(p.update(&key(KeyCode::Char('3'))), None);
        assert_eq!(p.pending_jump(), Some("13"));
        assert_eq!(p.page(), 1);

        assert_eq!(p.update(&key(KeyCode::Enter)), Some(NavAction::GoTo(13)));
        assert_eq!(p.page(), 13);
        assert_eq!(p.pending_jump(), None);
    }

    #[test]
    fn test_jump_is_clamped() {
        let mut p = paginator(45, 20);
        for c in "999".chars() {
            p.update(&key(KeyCode::Char(c)));
        }
        p.update(&key(KeyCode::Enter));
        assert_eq!(p.page(), 3);

        p.update(&key(KeyCode::Char('0')));
        p.update(&key(KeyCode::Enter));
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn test_jump_edit_and_cancel() {
        let mut p = paginator(250, 10);
        p.update(&key(KeyCode::Char('4')));
        p.update(&key(KeyCode::Char('2')));
        p.update(&key(KeyCode::Backspace));
        assert_eq!(p.pending_jump(), Some("4"));
        p.update(&key(KeyCode::Esc));
        assert_eq!(p.pending_jump(), None);
        assert_eq!(p.update(&key(KeyCode::Enter)), None);
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn test_jump_digits_are_bounded() {
        let mut p = paginator(250, 10);
        for _ in 0..20 {
            p.update(&key(KeyCode::Char('9')));
        }
        assert_eq!(p.pending_jump().map(str::len), Some(MAX_JUMP_DIGITS));
        p.update(&key(KeyCode::Enter));
        assert_eq!(p.page(), 25);
    }

    #[test]
    fn test_view_marks_current_page() {
        let mut p = paginator(50, 10);
        p.go_to_page(3);
        assert_eq!(plain(&p.view()), "« ‹ 1 2 [3] 4 5 › »");
    }

    #[test]
    fn test_view_shows_only_the_window() {
        let mut p = paginator(250, 10);
        p.go_to_page(13);
        assert_eq!(
            plain(&p.view()),
            "« ‹ 8 9 10 11 12 [13] 14 15 16 17 › »"
        );
    }

    #[test]
    fn test_view_empty_listing() {
        assert_eq!(plain(&paginator(0, 10).view()), "« ‹ › »");
    }

    #[test]
    fn test_view_shows_jump_prompt() {
        let mut p = paginator(50, 10);
        p.update(&key(KeyCode::Char('4')));
        assert_eq!(plain(&p.view()), "« ‹ [1] 2 3 4 5 › »   go to: 4_");
    }
}
