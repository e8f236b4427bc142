//! A help bar generated from key bindings.
//!
//! The short view is one line, `←/h prev page • →/l next page • q quit`. The
//! full view lays each group of bindings out as a column. When a width is
//! set, whatever does not fit is replaced by an ellipsis.

use crate::key::{self, KeyMap};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles for the help bar.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Marker shown when bindings were cut off.
    pub ellipsis: Style,
    /// Keys in the short view.
    pub short_key: Style,
    /// Descriptions in the short view.
    pub short_desc: Style,
    /// Separator between bindings in the short view.
    pub short_separator: Style,
    /// Keys in the full view.
    pub full_key: Style,
    /// Descriptions in the full view.
    pub full_desc: Style,
    /// Gap between columns in the full view.
    pub full_separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let key_style = Style::new().foreground(AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        });
        let desc_style = Style::new().foreground(AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        });
        let sep_style = Style::new().foreground(AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        });

        Self {
            ellipsis: sep_style.clone(),
            short_key: key_style.clone(),
            short_desc: desc_style.clone(),
            short_separator: sep_style.clone(),
            full_key: key_style,
            full_desc: desc_style,
            full_separator: sep_style,
        }
    }
}

/// The help bar.
///
/// ```rust
/// use userpager::help::Model;
/// use userpager::key::{Binding, KeyMap};
/// use crossterm::event::KeyCode;
///
/// struct Keys {
///     quit: Binding,
/// }
///
/// impl KeyMap for Keys {
///     fn short_help(&self) -> Vec<&Binding> {
///         vec![&self.quit]
///     }
///     fn full_help(&self) -> Vec<Vec<&Binding>> {
///         vec![vec![&self.quit]]
///     }
/// }
///
/// let keys = Keys { quit: Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit") };
/// let help = Model::new();
/// assert!(help.view(&keys).contains("quit"));
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// Show the full, multi-column view instead of the single line.
    pub show_all: bool,
    /// Maximum width in terminal cells; 0 means unlimited.
    pub width: usize,
    /// Separator between bindings in the short view.
    pub short_separator: String,
    /// Gap between columns in the full view.
    pub full_separator: String,
    /// Marker shown when bindings were cut off.
    pub ellipsis: String,
    /// Styles.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            show_all: false,
            width: 0,
            short_separator: " • ".to_string(),
            full_separator: "    ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a help bar with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum width (builder pattern).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders the short or full view of `keymap`.
    pub fn view<K: KeyMap + ?Sized>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_help_view(keymap.full_help())
        } else {
            self.short_help_view(keymap.short_help())
        }
    }

    /// Renders bindings on one line. Disabled bindings are skipped.
    pub fn short_help_view(&self, bindings: Vec<&key::Binding>) -> String {
        let separator = self.styles.short_separator.render(&self.short_separator);
        let mut builder = String::new();
        let mut total_width = 0;

        for binding in bindings.iter().filter(|b| b.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };
            let help = binding.help();
            let item = format!(
                "{}{} {}",
                sep,
                self.styles.short_key.render(&help.key),
                self.styles.short_desc.render(&help.desc)
            );
            let item_width = lipgloss::width_visible(&item);

            if let Some(tail) = self.overflow_tail(total_width, item_width) {
                builder.push_str(&tail);
                break;
            }

            total_width += item_width;
            builder.push_str(&item);
        }
        builder
    }

    /// Renders each group as a column, keys aligned within the column.
    pub fn full_help_view(&self, groups: Vec<Vec<&key::Binding>>) -> String {
        let separator = self.styles.full_separator.render(&self.full_separator);
        let separator_width = lipgloss::width_visible(&separator);
        let mut columns: Vec<String> = Vec::new();
        let mut total_width = 0;

        for group in &groups {
            let enabled: Vec<&key::Help> = group
                .iter()
                .filter(|b| b.enabled())
                .map(|b| b.help())
                .collect();
            if enabled.is_empty() {
                continue;
            }

            let key_width = enabled
                .iter()
                .map(|h| lipgloss::width_visible(&h.key))
                .max()
                .unwrap_or(0);
            let column = enabled
                .iter()
                .map(|h| {
                    let fill = key_width - lipgloss::width_visible(&h.key);
                    format!(
                        "{}{} {}",
                        self.styles.full_key.render(&h.key),
                        " ".repeat(fill),
                        self.styles.full_desc.render(&h.desc)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");

            let gap = if columns.is_empty() { 0 } else { separator_width };
            let column_width = column
                .lines()
                .map(lipgloss::width_visible)
                .max()
                .unwrap_or(0);

            if let Some(tail) = self.overflow_tail(total_width, gap + column_width) {
                if !tail.is_empty() {
                    columns.push(tail);
                }
                break;
            }

            total_width += gap + column_width;
            columns.push(column);
        }

        let mut parts: Vec<&str> = Vec::new();
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                parts.push(separator.as_str());
            }
            parts.push(column.as_str());
        }
        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }

    // Some(tail) when an item of `item_width` no longer fits; the tail is an
    // ellipsis if there is room for one.
    fn overflow_tail(&self, total_width: usize, item_width: usize) -> Option<String> {
        if self.width == 0 || total_width + item_width <= self.width {
            return None;
        }
        let tail = format!(" {}", self.styles.ellipsis.render(&self.ellipsis));
        if total_width + lipgloss::width_visible(&tail) <= self.width {
            Some(tail)
        } else {
            Some(String::new())
        }
    }
}
