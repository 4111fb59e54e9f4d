//! View parameters driving which slice of the dataset is shown.

use crate::model::Column;
use std::fmt;

/// Rows per page before configuration is applied.
pub const DEFAULT_PAGE_SIZE: usize = 4;

// ===== SortDirection =====

/// Sort direction of the active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
    /// Dataset order.
    #[default]
    None,
}

impl SortDirection {
    /// Next direction for the header toggle: asc → desc → none → asc.
    pub fn rotate(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::None,
            SortDirection::None => SortDirection::Ascending,
        }
    }

    /// Parse the textual form (`"asc"`, `"desc"`, `""`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(SortDirection::Ascending),
            "desc" => Some(SortDirection::Descending),
            "" => Some(SortDirection::None),
            _ => None,
        }
    }

    /// Textual form, the inverse of [`SortDirection::parse`].
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
            SortDirection::None => "",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== ViewState =====

/// The mutable view parameters owned by the controller.
///
/// `page` and `page_size` are always at least 1; the setters clamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    page: usize,
    page_size: usize,
    search_term: String,
    sort_column: Option<Column>,
    sort_direction: SortDirection,
}

impl ViewState {
    /// Defaults with a custom page size (clamped to 1).
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    /// 1-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current search term, matched as a substring.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Column to sort by, if any.
    pub fn sort_column(&self) -> Option<Column> {
        self.sort_column
    }

    /// Direction of the sort.
    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Active sort, or `None` when the view is in dataset order.
    pub fn active_sort(&self) -> Option<(Column, SortDirection)> {
        match (self.sort_column, self.sort_direction) {
            (_, SortDirection::None) | (None, _) => None,
            (Some(column), direction) => Some((column, direction)),
        }
    }

    /// Set the page, clamping 0 to 1.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Set the page size, clamping 0 to 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    /// Replace the search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Replace the sort column.
    pub fn set_sort_column(&mut self, column: Option<Column>) {
        self.sort_column = column;
    }

    /// Replace the sort direction.
    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.sort_direction = direction;
    }

    /// Index range of the current page within the filtered records.
    ///
    /// The range is not clamped; callers clamp against the record count.
    pub fn page_bounds(&self) -> (usize, usize) {
        let start = (self.page - 1).saturating_mul(self.page_size);
        (start, start.saturating_add(self.page_size))
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search_term: String::new(),
            sort_column: None,
            sort_direction: SortDirection::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_state_matches_initial_parameters() {
        let state = ViewState::default();
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), 4);
        assert_eq!(state.search_term(), "");
        assert_eq!(state.sort_column(), None);
        assert_eq!(state.sort_direction(), SortDirection::None);
    }

    #[test]
    fn rotate_cycles_asc_desc_none() {
        let d = SortDirection::None;
        assert_eq!(d.rotate(), SortDirection::Ascending);
        assert_eq!(d.rotate().rotate(), SortDirection::Descending);
        assert_eq!(d.rotate().rotate().rotate(), SortDirection::None);
    }

    #[test]
    fn direction_parse_roundtrips() {
        for d in [
            SortDirection::Ascending,
            SortDirection::Descending,
            SortDirection::None,
        ] {
            assert_eq!(SortDirection::parse(d.as_str()), Some(d));
        }
        assert_eq!(SortDirection::parse("up"), None);
    }

    #[test]
    fn zero_page_and_page_size_clamp_to_one() {
        let mut state = ViewState::with_page_size(0);
        assert_eq!(state.page_size(), 1);

        state.set_page(0);
        state.set_page_size(0);
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), 1);
    }

    #[test]
    fn page_bounds_cover_one_page() {
        let mut state = ViewState::default();
        assert_eq!(state.page_bounds(), (0, 4));

        state.set_page(3);
        state.set_page_size(5);
        assert_eq!(state.page_bounds(), (10, 15));
    }

    #[test]
    fn page_bounds_saturate_on_huge_page() {
        let mut state = ViewState::default();
        state.set_page(usize::MAX);
        let (start, end) = state.page_bounds();
        assert_eq!(start, usize::MAX);
        assert_eq!(end, usize::MAX);
    }

    #[test]
    fn active_sort_requires_column_and_direction() {
        let mut state = ViewState::default();
        assert_eq!(state.active_sort(), None);

        state.set_sort_column(Some(Column::Area));
        assert_eq!(state.active_sort(), None, "direction none means dataset order");

        state.set_sort_direction(SortDirection::Descending);
        assert_eq!(
            state.active_sort(),
            Some((Column::Area, SortDirection::Descending))
        );

        state.set_sort_column(None);
        assert_eq!(state.active_sort(), None);
    }
}
