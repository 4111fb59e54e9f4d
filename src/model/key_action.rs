//! Domain-level keyboard actions independent of key bindings.

use crate::model::Column;

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// Printable characters that are not bound go to the search term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Pagination
    /// Go to the next page. Default: →/Page Down
    NextPage,
    /// Go to the previous page. Default: ←/Page Up
    PrevPage,
    /// Jump to the first page. Default: Home
    FirstPage,
    /// Jump to the last page. Default: End
    LastPage,
    /// Show one more row per page. Default: Ctrl+↓
    GrowPageSize,
    /// Show one less row per page. Default: Ctrl+↑
    ShrinkPageSize,

    // Sorting
    /// Rotate the sort direction of a column (asc → desc → none). Default: F1/F2/F3
    RotateSort(Column),

    // Search
    /// Delete the last character of the search term. Default: Backspace
    DeleteSearchChar,
    /// Clear the search term. Default: Esc
    ClearSearch,

    // Application
    /// Quit. Default: Ctrl+c
    Quit,
}
