//! Table state controller and its recompute pipeline.
//!
//! The controller owns the [`ViewState`]. Every setter patches it and
//! signals the pipeline task, which:
//!
//! 1. waits for a quiet period (each new signal restarts the wait),
//! 2. runs [`execute_search`] against the state as it is *now*,
//! 3. waits a simulated latency,
//! 4. publishes items and total, then clears the loading flag.
//!
//! A signal that arrives during the latency wait, or between the wait and
//! publication on another worker thread, abandons that result, so a stale
//! page is never published. The loading flag is raised synchronously inside
//! the setter, before any waiting happens.

use crate::dataset::Dataset;
use crate::format::SharedFormat;
use crate::model::{Column, Country};
use crate::state::search::{execute_search, SearchResult};
use crate::state::view_state::{SortDirection, ViewState, DEFAULT_PAGE_SIZE};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Quiet period before a burst of changes is recomputed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(120);

/// Simulated latency between computing and publishing a result.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(120);

// ===== PipelineConfig =====

/// Timing and initial page size for a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Quiet period that coalesces rapid changes.
    pub debounce: Duration,
    /// Delay applied after computing, before publishing.
    pub latency: Duration,
    /// Initial rows per page.
    pub page_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            latency: DEFAULT_LATENCY,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// ===== Publication =====

/// A published result tagged with the request it answers.
///
/// `request` is the number of the state change the result was computed for;
/// `sequence` counts publications, starting at 1 for the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Publication {
    /// State-change number this result answers.
    pub request: u64,
    /// Running count of publications.
    pub sequence: u64,
    /// The published page and match count.
    pub result: SearchResult,
}

// ===== Signal =====

/// Current view state plus the number of the change that produced it.
#[derive(Debug, Clone)]
struct Signal {
    state: ViewState,
    request: u64,
}

// ===== TableStateController =====

/// Owns the view state and publishes derived table pages.
///
/// Must be created inside a tokio runtime; construction spawns the pipeline
/// task and schedules the first recomputation. Dropping the controller stops
/// the task.
#[derive(Debug)]
pub struct TableStateController {
    state: watch::Sender<Signal>,
    loading: Arc<watch::Sender<bool>>,
    items: watch::Receiver<Vec<Country>>,
    total: watch::Receiver<usize>,
    publications: watch::Receiver<Publication>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TableStateController {
    /// Create a controller over `dataset` and start its pipeline.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn new(dataset: Dataset, format: SharedFormat, config: PipelineConfig) -> Self {
        // Construction is request #1; publications start at request 0.
        let (state_tx, state_rx) = watch::channel(Signal {
            state: ViewState::with_page_size(config.page_size),
            request: 1,
        });
        let (loading_tx, _) = watch::channel(true);
        let loading = Arc::new(loading_tx);
        let (items_tx, items_rx) = watch::channel(Vec::new());
        let (total_tx, total_rx) = watch::channel(0);
        let (publications_tx, publications_rx) = watch::channel(Publication::default());
        let cancel = CancellationToken::new();

        let pipeline = Pipeline {
            dataset,
            format,
            config,
            state: state_rx,
            loading: Arc::clone(&loading),
            items: items_tx,
            total: total_tx,
            publications: publications_tx,
            cancel: cancel.clone(),
            sequence: 0,
        };
        let task = tokio::spawn(pipeline.run());

        debug!(?config, "Table state controller started");

        Self {
            state: state_tx,
            loading,
            items: items_rx,
            total: total_rx,
            publications: publications_rx,
            cancel,
            task: Some(task),
        }
    }

    // ----- getters -----

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.state.borrow().state.page()
    }

    /// Current rows per page.
    pub fn page_size(&self) -> usize {
        self.state.borrow().state.page_size()
    }

    /// Current search term.
    pub fn search_term(&self) -> String {
        self.state.borrow().state.search_term().to_string()
    }

    /// Snapshot of the whole view state.
    pub fn view_state(&self) -> ViewState {
        self.state.borrow().state.clone()
    }

    /// Number of the most recent state change.
    pub fn request(&self) -> u64 {
        self.state.borrow().request
    }

    // ----- setters -----

    /// Go to `page` (0 clamps to 1).
    pub fn set_page(&self, page: usize) {
        self.patch(|s| s.set_page(page));
    }

    /// Show `page_size` rows per page (0 clamps to 1).
    pub fn set_page_size(&self, page_size: usize) {
        self.patch(|s| s.set_page_size(page_size));
    }

    /// Replace the search term.
    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.patch(|s| s.set_search_term(term));
    }

    /// Replace the sort column; `None` means dataset order.
    pub fn set_sort_column(&self, column: Option<Column>) {
        self.patch(|s| s.set_sort_column(column));
    }

    /// Replace the sort direction.
    pub fn set_sort_direction(&self, direction: SortDirection) {
        self.patch(|s| s.set_sort_direction(direction));
    }

    /// Replace column and direction as a single change.
    pub fn set_sort(&self, column: Option<Column>, direction: SortDirection) {
        self.patch(|s| {
            s.set_sort_column(column);
            s.set_sort_direction(direction);
        });
    }

    /// Sort by a record field name, as a single change.
    ///
    /// A name that is not a field of [`Country`] clears the sort column, so
    /// the view falls back to dataset order.
    pub fn set_sort_field(&self, field: &str, direction: SortDirection) {
        let column = Column::parse(field);
        if column.is_none() {
            debug!(field, "Unknown sort field, using dataset order");
        }
        self.set_sort(column, direction);
    }

    // ----- streams -----

    /// Records on the current page.
    pub fn items(&self) -> watch::Receiver<Vec<Country>> {
        self.items.clone()
    }

    /// Match count before pagination.
    pub fn total(&self) -> watch::Receiver<usize> {
        self.total.clone()
    }

    /// `true` from a state change until its result is published.
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Tagged publications, for consumers that must tell results apart.
    pub fn publications(&self) -> watch::Receiver<Publication> {
        self.publications.clone()
    }

    /// Wait until the most recent state change has been published.
    ///
    /// Returns the last publication if the pipeline has stopped.
    pub async fn settled(&self) -> Publication {
        let target = self.request();
        let mut rx = self.publications.clone();
        let settled = match rx.wait_for(|p| p.request >= target).await {
            Ok(publication) => Some(publication.clone()),
            Err(_) => None,
        };
        settled.unwrap_or_else(|| rx.borrow().clone())
    }

    /// Stop the pipeline and wait for it to exit.
    ///
    /// Pending work is abandoned, not published.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                debug!(error = %e, "Pipeline task ended abnormally");
            }
        }
    }

    fn patch(&self, f: impl FnOnce(&mut ViewState)) {
        self.state.send_modify(|signal| {
            f(&mut signal.state);
            signal.request += 1;
            trace!(request = signal.request, state = ?signal.state, "View state changed");
        });
        self.loading.send_replace(true);
    }
}

impl Drop for TableStateController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ===== Pipeline =====

/// Outcome of one settle cycle.
enum Step {
    /// A result was published; wait for the next signal.
    Idle,
    /// The controller is gone or was shut down.
    Stop,
}

/// The single consumer of state-change signals.
struct Pipeline {
    dataset: Dataset,
    format: SharedFormat,
    config: PipelineConfig,
    state: watch::Receiver<Signal>,
    loading: Arc<watch::Sender<bool>>,
    items: watch::Sender<Vec<Country>>,
    total: watch::Sender<usize>,
    publications: watch::Sender<Publication>,
    cancel: CancellationToken,
    sequence: u64,
}

impl Pipeline {
    async fn run(mut self) {
        // Construction counts as the first signal.
        let mut signalled = true;

        loop {
            if !signalled {
                tokio::select! {
                    _ = self.cancel.cancelled() => break,
                    changed = self.state.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
            signalled = false;

            match self.settle().await {
                Step::Idle => {}
                Step::Stop => break,
            }
        }

        debug!("Table state pipeline stopped");
    }

    /// Debounce, compute, delay, publish. Restarts on every new signal.
    async fn settle(&mut self) -> Step {
        loop {
            // Quiet period
            loop {
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => return Step::Stop,
                    changed = self.state.changed() => {
                        if changed.is_err() {
                            return Step::Stop;
                        }
                        trace!("Signal during quiet period, restarting debounce");
                    }
                    _ = tokio::time::sleep(self.config.debounce) => break,
                }
            }

            // Read the state at execution time, not signal time.
            let (state, request) = {
                let signal = self.state.borrow_and_update();
                (signal.state.clone(), signal.request)
            };
            let result = execute_search(&self.dataset, &state, self.format.as_ref());
            trace!(request, total = result.total, "Recomputed table page");

            // Simulated latency; a newer signal supersedes this result.
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Step::Stop,
                changed = self.state.changed() => {
                    if changed.is_err() {
                        return Step::Stop;
                    }
                    debug!(request, "Result superseded before publication");
                    continue;
                }
                _ = tokio::time::sleep(self.config.latency) => {}
            }

            if !self.publish(request, result) {
                debug!(request, "Result superseded at publication");
                continue;
            }
            return Step::Idle;
        }
    }

    /// Publish `result` if `request` is still the latest change.
    ///
    /// Runs under the loading flag's write lock. A setter raises the flag
    /// only after bumping the request, so it either makes this call back off
    /// or raises the flag again after it is cleared. Items, total and the
    /// publication are sent before the flag clears.
    fn publish(&mut self, request: u64, result: SearchResult) -> bool {
        let Self {
            state,
            loading,
            items,
            total,
            publications,
            sequence,
            ..
        } = self;

        loading.send_if_modified(|flag| {
            if state.borrow().request != request {
                return false;
            }

            *sequence += 1;
            debug!(
                request,
                sequence = *sequence,
                total = result.total,
                items = result.items.len(),
                "Publishing table page"
            );

            items.send_replace(result.items.clone());
            total.send_replace(result.total);
            publications.send_replace(Publication {
                request,
                sequence: *sequence,
                result,
            });
            *flag = false;
            true
        })
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
