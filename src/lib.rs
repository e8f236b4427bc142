#![warn(missing_docs)]

//! # userpager
//!
//! A terminal browser for user records, built on
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs). Records are loaded
//! once from an HTTP endpoint (or a JSON file) and shown as a table, one page
//! at a time, under a windowed pagination bar:
//!
//! ```text
//!  Users
//!
//!   ID  First name  Last name  Phone     Email              Updated at
//!   ──  ──────────  ─────────  ────────  ─────────────────  ────────────────────────
//! > 21  First21     Last21     555-0021  user21@example.com 2024-05-01T12:00:00.000Z
//!   ...
//!
//! « ‹ 1 [2] 3 › »
//! Showing 21–40 of 45 users
//! ```
//!
//! ## Components
//!
//! Each component follows the Elm Architecture used by bubbletea-rs: state in
//! a `Model`, `update(&Msg)` for input and `view()` for rendering.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`paginator`] | Current page, navigation and the windowed page bar |
//! | [`table`] | Column/row table with a row cursor |
//! | [`help`] | Help bar generated from key bindings |
//! | [`app`] | The application model wiring them together |
//!
//! ## Pagination
//!
//! ```rust
//! use userpager::paginator::{page_window, Model, NavAction};
//!
//! // 25 pages, 10 buttons: the window follows the current page
//! assert_eq!(page_window(13, 25, 10), 8..=17);
//!
//! let mut paginator = Model::new().with_per_page(20).with_total_items(45);
//! assert_eq!(paginator.apply(NavAction::Next), 2);
//! assert_eq!(paginator.apply(NavAction::GoTo(10)), 3); // clamped
//! ```
//!
//! ## Data sources
//!
//! [`source::HttpSource`] performs `GET` on the configured URL and expects a
//! JSON array of [`user::User`]; [`source::FileSource`] reads the same format
//! from disk. Failures collapse to one status code, which the app shows in
//! place of the table.

pub mod app;
pub mod config;
pub mod help;
pub mod key;
pub mod paginator;
pub mod source;
pub mod table;
pub mod user;

pub use app::{App, Browser, Startup};
pub use config::{Config, ConfigError};
pub use help::Model as Help;
pub use key::{Binding, KeyMap, KeyPress};
pub use paginator::{page_window, Model as Paginator, NavAction, PaginatorKeyMap};
pub use source::{FetchError, FileSource, HttpSource, UserSource};
pub use table::Model as Table;
pub use user::{Listing, User};

/// Prelude module for convenient imports.
///
/// ```rust
/// use userpager::prelude::*;
///
/// let mut paginator = Paginator::new().with_total_items(100);
/// paginator.apply(NavAction::Last);
/// assert_eq!(paginator.page(), 5);
/// ```
pub mod prelude {
    pub use crate::app::{App, Browser, Startup};
    pub use crate::help::Model as Help;
    pub use crate::key::{Binding, KeyMap};
    pub use crate::paginator::{page_window, Model as Paginator, NavAction};
    pub use crate::source::{FetchError, UserSource};
    pub use crate::table::{Column, Model as Table, Row};
    pub use crate::user::{Listing, User};
}
