//! Table recomputation: sort, filter, paginate.
//!
//! Pure functions over the dataset. The controller runs
//! [`execute_search`] once per settled [`ViewState`].

use crate::format::NumberFormat;
use crate::model::{Column, Country};
use crate::state::view_state::{SortDirection, ViewState};
use std::cmp::Ordering;

// ===== SearchResult =====

/// One page of matching records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Records on the current page, in display order.
    pub items: Vec<Country>,
    /// Number of matching records before pagination.
    pub total: usize,
}

// ===== Sort =====

/// Three-way comparison of two records on one column.
pub fn compare(a: &Country, b: &Country, column: Column) -> Ordering {
    a.field(column).cmp(&b.field(column))
}

/// Stable sort of record references.
///
/// `SortDirection::None` leaves the input order untouched.
pub fn sort_records(records: &mut [&Country], column: Column, direction: SortDirection) {
    match direction {
        SortDirection::None => {}
        SortDirection::Ascending => records.sort_by(|a, b| compare(a, b, column)),
        SortDirection::Descending => records.sort_by(|a, b| compare(a, b, column).reverse()),
    }
}

// ===== Filter =====

/// Whether a record matches the search term.
///
/// Name is matched case-insensitively; area and population are matched
/// against their formatted text. `term_lower` must already be lowercase.
pub fn matches(country: &Country, term: &str, term_lower: &str, format: &dyn NumberFormat) -> bool {
    country.name.to_lowercase().contains(term_lower)
        || format.format(country.area).contains(term)
        || format.format(country.population).contains(term)
}

// ===== Search Execution =====

/// Run sort, filter and pagination for one view state.
///
/// Never fails: an empty dataset, an unmatched term or a page past the end
/// all produce an empty page.
pub fn execute_search(
    dataset: &[Country],
    state: &ViewState,
    format: &dyn NumberFormat,
) -> SearchResult {
    // 1. sort
    let mut records: Vec<&Country> = dataset.iter().collect();
    if let Some((column, direction)) = state.active_sort() {
        sort_records(&mut records, column, direction);
    }

    // 2. filter
    let term = state.search_term();
    if !term.is_empty() {
        let term_lower = term.to_lowercase();
        records.retain(|c| matches(c, term, &term_lower, format));
    }
    let total = records.len();

    // 3. paginate
    let (start, end) = state.page_bounds();
    let start = start.min(total);
    let end = end.min(total);
    let items = records[start..end].iter().map(|c| (*c).clone()).collect();

    SearchResult { items, total }
}
