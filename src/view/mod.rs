//! Terminal presentation of the table controller.
//!
//! The view never computes results itself: it forwards key presses to
//! [`TableStateController`] setters and redraws whenever the controller
//! publishes a page or flips its loading flag.

pub mod styles;
pub mod table;

pub use styles::{ColorConfig, TableStyles};
pub use table::{footer_line, page_count, table_lines, TableSnapshot, TableView};

use crate::config::KeyBindings;
use crate::format::SharedFormat;
use crate::model::{Column, Country, KeyAction};
use crate::state::{SortDirection, TableStateController};
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, trace};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    controller: TableStateController,
    format: SharedFormat,
    styles: TableStyles,
    key_bindings: KeyBindings,
    items: watch::Receiver<Vec<Country>>,
    total: watch::Receiver<usize>,
    loading: watch::Receiver<bool>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Put the terminal in raw mode with an alternate screen.
    pub fn setup(
        controller: TableStateController,
        format: SharedFormat,
        styles: TableStyles,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::new(terminal, controller, format, styles))
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Wrap an existing terminal.
    pub fn new(
        terminal: Terminal<B>,
        controller: TableStateController,
        format: SharedFormat,
        styles: TableStyles,
    ) -> Self {
        let items = controller.items();
        let total = controller.total();
        let loading = controller.loading();
        Self {
            terminal,
            controller,
            format,
            styles,
            key_bindings: KeyBindings::default(),
            items,
            total,
            loading,
        }
    }

    /// The controller driven by this view.
    pub fn controller(&self) -> &TableStateController {
        &self.controller
    }

    /// The terminal, for inspecting a test backend.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Current view state together with the last published page.
    pub fn snapshot(&self) -> TableSnapshot {
        // One borrow at a time: publication holds the loading lock while it
        // sends items and total.
        let loading = *self.loading.borrow();
        let items = self.items.borrow().clone();
        let total = *self.total.borrow();
        TableSnapshot {
            view: self.controller.view_state(),
            items,
            total,
            loading,
        }
    }

    /// Render one frame.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let snapshot = self.snapshot();
        let format = self.format.as_ref();
        let styles = self.styles;
        self.terminal.draw(|frame| {
            frame.render_widget(TableView::new(&snapshot, format, styles), frame.area());
        })?;
        Ok(())
    }

    /// Run the event loop until the user quits.
    ///
    /// Redraws after every key press and every controller publication or
    /// loading change.
    pub async fn run(&mut self) -> Result<(), TuiError> {
        let mut events = EventStream::new();
        self.draw()?;

        loop {
            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Some(Ok(Event::Resize(width, height))) => {
                        trace!(width, height, "Terminal resized");
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(()),
                },
                changed = self.items.changed() => {
                    if changed.is_err() {
                        return Ok(());
                    }
                }
                changed = self.loading.changed() => {
                    if changed.is_err() {
                        return Ok(());
                    }
                }
            }
            self.draw()?;
        }
    }

    /// Apply a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let Some(action) = self.key_bindings.get(key) {
            trace!(?key, ?action, "Mapped key");
            return self.handle_action(action);
        }

        // Unbound printable characters edit the search term.
        if let KeyCode::Char(c) = key.code {
            if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
                let mut term = self.controller.search_term();
                term.push(c);
                self.search(term);
            }
        }
        false
    }

    fn handle_action(&mut self, action: KeyAction) -> bool {
        let ctrl = &self.controller;
        let page = ctrl.page();
        let pages = page_count(*self.total.borrow(), ctrl.page_size());

        match action {
            KeyAction::NextPage if page < pages => ctrl.set_page(page + 1),
            KeyAction::PrevPage if page > 1 => ctrl.set_page(page - 1),
            KeyAction::FirstPage if page != 1 => ctrl.set_page(1),
            KeyAction::LastPage if page != pages => ctrl.set_page(pages),
            KeyAction::GrowPageSize => ctrl.set_page_size(ctrl.page_size() + 1),
            KeyAction::ShrinkPageSize if ctrl.page_size() > 1 => {
                ctrl.set_page_size(ctrl.page_size() - 1)
            }
            KeyAction::RotateSort(column) => self.rotate_sort(column),
            KeyAction::DeleteSearchChar => {
                let mut term = ctrl.search_term();
                if term.pop().is_some() {
                    self.search(term);
                }
            }
            KeyAction::ClearSearch => {
                if !ctrl.search_term().is_empty() {
                    self.search(String::new());
                }
            }
            KeyAction::Quit => {
                debug!("Quit requested");
                return true;
            }
            _ => {}
        }
        false
    }

    /// Header toggle: same column rotates, a new column starts ascending.
    fn rotate_sort(&self, column: Column) {
        let view = self.controller.view_state();
        let direction = if view.sort_column() == Some(column) {
            view.sort_direction().rotate()
        } else {
            SortDirection::Ascending
        };
        debug!(%column, %direction, "Sort toggled");
        self.controller.set_sort(Some(column), direction);
    }

    /// A new term starts from the first page.
    fn search(&self, term: String) {
        self.controller.set_search_term(term);
        if self.controller.page() != 1 {
            self.controller.set_page(1);
        }
    }
}

/// Run the table view on the real terminal until the user quits.
///
/// Note: Logging must be initialized by caller before calling this function.
pub async fn run(
    controller: TableStateController,
    format: SharedFormat,
    styles: TableStyles,
) -> Result<(), TuiError> {
    let mut app = TuiApp::setup(controller, format, styles)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run().await;

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
