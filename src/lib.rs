//! tabview
//!
//! Searchable, sortable, paginated table over a small static country
//! dataset. The core is [`state::TableStateController`]: setters patch the
//! view state, a debounced pipeline recomputes the page, and the result is
//! published on `watch` channels for the terminal view to render.

pub mod config;
pub mod dataset;
pub mod format;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;

#[cfg(test)]
mod tests;
