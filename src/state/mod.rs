//! Table view state.
//!
//! `view_state` and `search` are pure and testable without a runtime;
//! `controller` wires them into the debounced recompute pipeline.

pub mod controller;
pub mod search;
pub mod view_state;

// Re-export for convenience
pub use controller::{PipelineConfig, Publication, TableStateController};
pub use search::{execute_search, SearchResult};
pub use view_state::{SortDirection, ViewState, DEFAULT_PAGE_SIZE};
