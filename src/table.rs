//! A table of text cells with a movable row cursor.
//!
//! Column widths fit their content, optionally capped per column. Cells
//! wider than their column are cut at a grapheme boundary and end in `…`.
//! Widths are measured in terminal cells, so wide characters line up.
//!
//! ```rust
//! use userpager::table::{Column, Model, Row};
//!
//! let table = Model::new(vec![Column::new("ID"), Column::new("Name").with_width(6)])
//!     .with_rows(vec![
//!         Row::new(vec!["1".into(), "Alice".into()]),
//!         Row::new(vec!["22".into(), "Bartholomew".into()]),
//!     ]);
//!
//! assert_eq!(table.column_widths(), vec![2, 6]);
//! ```

use crate::key::{self, Binding};
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Marks a truncated cell.
pub const ELLIPSIS: &str = "…";

const CELL_GAP: &str = "  ";
const CURSOR: &str = "> ";
const NO_CURSOR: &str = "  ";

/// A table column.
#[derive(Debug, Clone)]
pub struct Column {
    /// Header text.
    pub title: String,
    /// Maximum width in terminal cells; `None` fits the widest cell.
    pub width: Option<usize>,
}

impl Column {
    /// Creates a column that fits its content.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: None,
        }
    }

    /// Caps the column width (builder pattern).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }
}

/// A table row; cells line up with the columns by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Cell text, one per column. Missing cells render empty.
    pub cells: Vec<String>,
}

impl Row {
    /// Creates a row from its cells.
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }
}

/// Key bindings for moving the row cursor.
#[derive(Debug, Clone)]
pub struct TableKeyMap {
    /// Move the cursor up one row.
    pub row_up: Binding,
    /// Move the cursor down one row.
    pub row_down: Binding,
}

impl Default for TableKeyMap {
    fn default() -> Self {
        Self {
            row_up: Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            row_down: Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
        }
    }
}

impl key::KeyMap for TableKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.row_up, &self.row_down]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![&self.row_up, &self.row_down]]
    }
}

/// Styles for the table.
#[derive(Debug, Clone)]
pub struct TableStyles {
    /// Header row.
    pub header: Style,
    /// Rule under the header.
    pub separator: Style,
    /// Ordinary rows.
    pub cell: Style,
    /// The row under the cursor.
    pub selected: Style,
    /// Message shown when there are no rows.
    pub empty: Style,
}

impl Default for TableStyles {
    fn default() -> Self {
        Self {
            header: Style::new().bold(true),
            separator: Style::new().foreground(AdaptiveColor {
                Light: "#DDDADA",
                Dark: "#3C3C3C",
            }),
            cell: Style::new(),
            selected: Style::new().foreground(AdaptiveColor {
                Light: "#EE6FF8",
                Dark: "#EE6FF8",
            }),
            empty: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
        }
    }
}

/// A table component.
#[derive(Debug, Clone)]
pub struct Model {
    columns: Vec<Column>,
    rows: Vec<Row>,
    cursor: usize,

    /// Key bindings.
    pub keymap: TableKeyMap,
    /// Styles.
    pub styles: TableStyles,
    /// Shown in place of rows when the table is empty.
    pub empty_message: String,
}

impl Model {
    /// Creates an empty table with the given columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            cursor: 0,
            keymap: TableKeyMap::default(),
            styles: TableStyles::default(),
            empty_message: "No rows.".to_string(),
        }
    }

    /// Sets the rows (builder pattern).
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Sets the empty-table message (builder pattern).
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Replaces the rows and moves the cursor back to the top.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.cursor = 0;
    }

    /// The columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Index of the row under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The row under the cursor, if any.
    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.cursor)
    }

    /// Moves the cursor down, wrapping to the top.
    pub fn select_next(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = (self.cursor + 1) % self.rows.len();
        }
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn select_prev(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = if self.cursor == 0 {
                self.rows.len() - 1
            } else {
                self.cursor - 1
            };
        }
    }

    /// Handles cursor keys. Returns whether the message was consumed.
    pub fn update(&mut self, msg: &Msg) -> bool {
        let Some(key_msg) = msg.downcast_ref::<KeyMsg>() else {
            return false;
        };
        if self.keymap.row_up.matches(key_msg) {
            self.select_prev();
            true
        } else if self.keymap.row_down.matches(key_msg) {
            self.select_next();
            true
        } else {
            false
        }
    }

    /// Rendered width of every column.
    pub fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let natural = self
                    .rows
                    .iter()
                    .filter_map(|row| row.cells.get(i))
                    .map(|cell| cell.width())
                    .fold(column.title.width(), usize::max);
                column.width.map_or(natural, |cap| natural.min(cap))
            })
            .collect()
    }

    /// Renders the header, a rule and one line per row.
    pub fn view(&self) -> String {
        let widths = self.column_widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        let titles: Vec<&str> = self.columns.iter().map(|c| c.title.as_str()).collect();
        lines.push(format!(
            "{}{}",
            NO_CURSOR,
            self.styles.header.render(&render_cells(&titles, &widths))
        ));

        let rule = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join(CELL_GAP);
        lines.push(format!("{}{}", NO_CURSOR, self.styles.separator.render(&rule)));

        if self.rows.is_empty() {
            lines.push(format!(
                "{}{}",
                NO_CURSOR,
                self.styles.empty.render(&self.empty_message)
            ));
        }

        for (index, row) in self.rows.iter().enumerate() {
            let cells: Vec<&str> = (0..self.columns.len())
                .map(|i| row.cells.get(i).map_or("", String::as_str))
                .collect();
            let text = render_cells(&cells, &widths);
            if index == self.cursor {
                lines.push(format!("{}{}", CURSOR, self.styles.selected.render(&text)));
            } else {
                lines.push(format!("{}{}", NO_CURSOR, self.styles.cell.render(&text)));
            }
        }

        lines.join("\n")
    }
}

fn render_cells(cells: &[&str], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            let cell = truncate(cell, *width);
            // no trailing padding after the last column
            if i == last {
                cell
            } else {
                pad(&cell, *width)
            }
        })
        .collect::<Vec<_>>()
        .join(CELL_GAP)
}

/// Cuts `s` to at most `width` terminal cells, ending in `…` when cut.
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - ELLIPSIS.width();
    let mut out = String::new();
    let mut used = 0;
    for grapheme in s.graphemes(true) {
        let w = grapheme.width();
        if used + w > budget {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.push_str(ELLIPSIS);
    out
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}
