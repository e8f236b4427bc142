use crate::key::{self, Binding};
use crossterm::event::KeyCode;

/// Key bindings for the pagination bar.
///
/// Defaults:
/// - **First page**: Home, `g`
/// - **Previous page**: Left Arrow, `h`, PageUp
/// - **Next page**: Right Arrow, `l`, PageDown
/// - **Last page**: End, `G`
/// - **Jump**: digits type a page number, Enter jumps, Backspace edits, Esc cancels
///
/// ```rust
/// use userpager::paginator::PaginatorKeyMap;
/// use userpager::key::KeyMap;
///
/// let keymap = PaginatorKeyMap::default();
/// assert_eq!(keymap.short_help().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    /// Jump to the first page.
    pub first_page: Binding,
    /// Go back one page.
    pub prev_page: Binding,
    /// Go forward one page.
    pub next_page: Binding,
    /// Jump to the last page.
    pub last_page: Binding,
    /// Digits accumulated into a page number.
    pub jump_digit: Binding,
    /// Confirm a typed page number.
    pub jump_confirm: Binding,
    /// Delete the last typed digit.
    pub jump_delete: Binding,
    /// Discard a typed page number.
    pub jump_cancel: Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            first_page: Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("g/home", "first page"),
            prev_page: Binding::new(vec![KeyCode::Left, KeyCode::Char('h'), KeyCode::PageUp])
                .with_help("←/h", "prev page"),
            next_page: Binding::new(vec![KeyCode::Right, KeyCode::Char('l'), KeyCode::PageDown])
                .with_help("→/l", "next page"),
            last_page: Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("G/end", "last page"),
            jump_digit: Binding::new(('0'..='9').map(KeyCode::Char).collect::<Vec<KeyCode>>())
                .with_help("0-9 ⏎", "go to page"),
            jump_confirm: Binding::new(vec![KeyCode::Enter]).with_help("enter", "go to page"),
            jump_delete: Binding::new(vec![KeyCode::Backspace]).with_help("backspace", "delete digit"),
            jump_cancel: Binding::new(vec![KeyCode::Esc]).with_help("esc", "cancel"),
        }
    }
}

impl key::KeyMap for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.prev_page, &self.next_page, &self.jump_digit]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![
                &self.first_page,
                &self.prev_page,
                &self.next_page,
                &self.last_page,
            ],
            vec![&self.jump_digit, &self.jump_cancel],
        ]
    }
}
