//! The user browser application.
//!
//! [`App`] is a bubbletea-rs model. The listing is fetched before the program
//! starts and handed over with [`install`], because `Model::init` takes no
//! arguments. A failed fetch shows only an error line; otherwise the screen
//! shows the users on the current page, the pagination bar, a status line and
//! the help bar.

use crate::help;
use crate::key::{Binding, KeyMap};
use crate::paginator::{self, NavAction};
use crate::source::{FetchError, INTERNAL_ERROR_STATUS};
use crate::table;
use crate::user::{Listing, User};
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use once_cell::sync::OnceCell;
use tracing::{debug, info, warn};

static STARTUP: OnceCell<Startup> = OnceCell::new();

/// Everything the app needs before its first frame.
#[derive(Debug, Clone)]
pub struct Startup {
    /// The loaded listing, or the status code of the failed fetch.
    pub outcome: Result<Listing, u16>,
    /// Records per page.
    pub per_page: usize,
    /// Page buttons shown at once.
    pub max_window: usize,
}

impl Startup {
    /// Builds the startup state from a fetch result.
    pub fn new(fetched: Result<Listing, FetchError>, per_page: usize, max_window: usize) -> Self {
        let outcome = match fetched {
            Ok(listing) => {
                info!(count = listing.item_count, "listing loaded");
                Ok(listing)
            }
            Err(err) => {
                warn!(error = %err, status = err.status_code(), "failed to load users");
                Err(err.status_code())
            }
        };
        Self {
            outcome,
            per_page,
            max_window,
        }
    }
}

/// Hands the startup state to [`App::init`]. Returns `false` if it was
/// already installed.
pub fn install(startup: Startup) -> bool {
    STARTUP.set(startup).is_ok()
}

/// Application-level key bindings.
#[derive(Debug, Clone)]
pub struct AppKeyMap {
    /// Toggle the full help.
    pub help: Binding,
    /// Quit.
    pub quit: Binding,
}

impl Default for AppKeyMap {
    fn default() -> Self {
        Self {
            help: Binding::new(vec![KeyCode::Char('?')]).with_help("?", "more"),
            quit: Binding::new(vec![
                (KeyCode::Char('q'), KeyModifiers::NONE),
                (KeyCode::Char('c'), KeyModifiers::CONTROL),
            ])
            .with_help("q", "quit"),
        }
    }
}

/// Styles for the application chrome.
#[derive(Debug, Clone)]
pub struct AppStyles {
    /// The heading.
    pub title: Style,
    /// The fetch error line.
    pub error: Style,
    /// The "Showing a–b of n" line.
    pub status: Style,
}

impl Default for AppStyles {
    fn default() -> Self {
        Self {
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            error: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#D70000",
                    Dark: "#FF5F87",
                })
                .bold(true),
            status: Style::new().foreground(AdaptiveColor {
                Light: "#A49FA5",
                Dark: "#777777",
            }),
        }
    }
}

/// The users, the pagination state and the table showing the current page.
#[derive(Debug, Clone)]
pub struct Browser {
    users: Vec<User>,
    paginator: paginator::Model,
    table: table::Model,
}

impl Browser {
    /// Starts on page 1 of `listing`.
    pub fn new(listing: Listing, per_page: usize, max_window: usize) -> Self {
        let paginator = paginator::Model::new()
            .with_per_page(per_page)
            .with_max_window(max_window)
            .with_total_items(listing.item_count);
        let table = table::Model::new(User::columns()).with_empty_message("No users.");

        let mut browser = Self {
            users: listing.records,
            paginator,
            table,
        };
        browser.sync_rows();
        browser
    }

    /// The pagination state.
    pub fn paginator(&self) -> &paginator::Model {
        &self.paginator
    }

    /// The table.
    pub fn table(&self) -> &table::Model {
        &self.table
    }

    /// The users on the current page.
    pub fn visible(&self) -> &[User] {
        self.paginator.page_slice(&self.users)
    }

    /// Applies a navigation request directly.
    pub fn navigate(&mut self, action: NavAction) -> usize {
        let before = self.paginator.page();
        let page = self.paginator.apply(action);
        if page != before {
            self.sync_rows();
        }
        page
    }

    /// Routes a message to the paginator, then the table. Returns whether it
    /// was handled.
    pub fn update(&mut self, msg: &Msg) -> bool {
        let before = self.paginator.page();
        if self.paginator.update(msg).is_some() {
            if self.paginator.page() != before {
                self.sync_rows();
            }
            return true;
        }
        if self.paginator.pending_jump().is_some() {
            // digits and jump edits were consumed without navigating
            return true;
        }
        self.table.update(msg)
    }

    /// The status line, e.g. `Showing 41–45 of 45 users`.
    pub fn status(&self) -> String {
        let total = self.users.len();
        if total == 0 {
            return "No users".to_string();
        }
        let (start, end) = self.paginator.slice_bounds(total);
        format!("Showing {}–{} of {} users", start + 1, end, total)
    }

    fn sync_rows(&mut self) {
        let rows = self.visible().iter().map(User::to_row).collect();
        self.table.set_rows(rows);
        debug!(
            page = self.paginator.page(),
            rows = self.table.rows().len(),
            "page rendered"
        );
    }
}

#[derive(Debug, Clone)]
enum Screen {
    Browse(Browser),
    Failed(u16),
}

/// The bubbletea-rs model.
#[derive(Debug, Clone)]
pub struct App {
    screen: Screen,
    help: help::Model,
    /// Application-level key bindings.
    pub keymap: AppKeyMap,
    /// Application styles.
    pub styles: AppStyles,
}

impl App {
    /// Builds the app from startup state.
    pub fn new(startup: &Startup) -> Self {
        match &startup.outcome {
            Ok(listing) => Self::with_screen(Screen::Browse(Browser::new(
                listing.clone(),
                startup.per_page,
                startup.max_window,
            ))),
            Err(status) => Self::failed(*status),
        }
    }

    /// An app that only shows a fetch error.
    pub fn failed(status: u16) -> Self {
        Self::with_screen(Screen::Failed(status))
    }

    fn with_screen(screen: Screen) -> Self {
        Self {
            screen,
            help: help::Model::new(),
            keymap: AppKeyMap::default(),
            styles: AppStyles::default(),
        }
    }

    /// The browser, unless the fetch failed.
    pub fn browser(&self) -> Option<&Browser> {
        match &self.screen {
            Screen::Browse(browser) => Some(browser),
            Screen::Failed(_) => None,
        }
    }

    /// The fetch status code, if the fetch failed.
    pub fn error_status(&self) -> Option<u16> {
        match self.screen {
            Screen::Failed(status) => Some(status),
            Screen::Browse(_) => None,
        }
    }

    fn handle(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.help.width = size.width as usize;
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.quit.matches(key_msg) {
                return Some(bubbletea_rs::quit());
            }
            if self.keymap.help.matches(key_msg) {
                self.help.show_all = !self.help.show_all;
                return None;
            }
        }

        if let Screen::Browse(browser) = &mut self.screen {
            browser.update(msg);
        }
        None
    }
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let app = match STARTUP.get() {
            Some(startup) => App::new(startup),
            None => {
                warn!("app started without a listing");
                App::failed(INTERNAL_ERROR_STATUS)
            }
        };
        (app, None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.handle(&msg)
    }

    fn view(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.styles.title.render("Users"));
        out.push_str("\n\n");

        match &self.screen {
            Screen::Failed(status) => {
                out.push_str(
                    &self
                        .styles
                        .error
                        .render(&format!("Error {} while loading data", status)),
                );
            }
            Screen::Browse(browser) => {
                out.push_str(&browser.table.view());
                out.push_str("\n\n");
                out.push_str(&browser.paginator.view());
                out.push('\n');
                out.push_str(&self.styles.status.render(&browser.status()));
            }
        }

        out.push_str("\n\n");
        out.push_str(&self.help.view(self));
        out
    }
}

impl KeyMap for App {
    fn short_help(&self) -> Vec<&Binding> {
        match &self.screen {
            Screen::Browse(browser) => {
                let mut bindings = browser.paginator.keymap.short_help();
                bindings.extend(browser.table.keymap.short_help());
                bindings.push(&self.keymap.help);
                bindings.push(&self.keymap.quit);
                bindings
            }
            Screen::Failed(_) => vec![&self.keymap.quit],
        }
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        match &self.screen {
            Screen::Browse(browser) => {
                let mut groups = browser.paginator.keymap.full_help();
                groups.extend(browser.table.keymap.full_help());
                groups.push(vec![&self.keymap.help, &self.keymap.quit]);
                groups
            }
            Screen::Failed(_) => vec![vec![&self.keymap.quit]],
        }
    }
}
