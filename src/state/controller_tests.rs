//! Tests for the table state controller pipeline.
//!
//! All tests run on a paused clock: sleeping in the test lets the runtime
//! auto-advance to the next timer, so debounce and latency are exact.

use super::*;
use crate::dataset;
use crate::format::DecimalFormat;
use tokio::time::{sleep, Instant};

fn controller_with(records: Vec<Country>, page_size: usize) -> TableStateController {
    TableStateController::new(
        records.into(),
        DecimalFormat::default().shared(),
        PipelineConfig {
            page_size,
            ..PipelineConfig::default()
        },
    )
}

fn builtin_controller() -> TableStateController {
    controller_with(dataset::builtin(), DEFAULT_PAGE_SIZE)
}

fn names(publication: &Publication) -> Vec<&str> {
    publication
        .result
        .items
        .iter()
        .map(|c| c.name.as_str())
        .collect()
}

// ===== Construction =====

#[tokio::test(start_paused = true)]
async fn construction_triggers_one_recomputation() {
    let ctrl = builtin_controller();
    assert!(*ctrl.loading().borrow(), "loading starts true");

    let publication = ctrl.settled().await;

    assert_eq!(publication.sequence, 1);
    assert_eq!(publication.request, 1);
    assert_eq!(publication.result.total, 13);
    assert_eq!(
        names(&publication),
        vec!["Russia", "France", "Germany", "Portugal"]
    );
    assert!(!*ctrl.loading().borrow());
}

#[tokio::test(start_paused = true)]
async fn default_view_state_is_first_page_of_four() {
    let ctrl = builtin_controller();
    assert_eq!(ctrl.page(), 1);
    assert_eq!(ctrl.page_size(), 4);
    assert_eq!(ctrl.search_term(), "");
    assert_eq!(ctrl.view_state().active_sort(), None);
}

#[tokio::test(start_paused = true)]
async fn publishes_after_debounce_plus_latency() {
    let start = Instant::now();
    let ctrl = builtin_controller();

    ctrl.settled().await;

    let elapsed = start.elapsed();
    assert!(
        elapsed >= Duration::from_millis(240) && elapsed < Duration::from_millis(260),
        "expected ~240ms, got {:?}",
        elapsed
    );
}

// ===== Streams =====

#[tokio::test(start_paused = true)]
async fn items_and_total_streams_follow_publication() {
    let ctrl = builtin_controller();
    let items = ctrl.items();
    let total = ctrl.total();

    ctrl.set_search_term("in");
    let publication = ctrl.settled().await;

    assert_eq!(*items.borrow(), publication.result.items);
    assert_eq!(*total.borrow(), publication.result.total);
}

#[tokio::test(start_paused = true)]
async fn loading_is_raised_synchronously_on_change() {
    let ctrl = builtin_controller();
    ctrl.settled().await;
    let loading = ctrl.loading();
    assert!(!*loading.borrow());

    ctrl.set_page(2);

    // No await between the setter and the check.
    assert!(*loading.borrow());
}

#[tokio::test(start_paused = true)]
async fn loading_stays_true_through_debounce_and_latency() {
    let ctrl = builtin_controller();
    ctrl.settled().await;
    let loading = ctrl.loading();

    ctrl.set_search_term("ger");
    sleep(Duration::from_millis(60)).await;
    assert!(*loading.borrow(), "still debouncing");
    sleep(Duration::from_millis(120)).await;
    assert!(*loading.borrow(), "still in simulated latency");
    sleep(Duration::from_millis(100)).await;
    assert!(!*loading.borrow(), "published");
}

// ===== Supersession =====

#[tokio::test(start_paused = true)]
async fn rapid_updates_publish_once_for_latest_term() {
    let ctrl = builtin_controller();
    ctrl.settled().await;

    ctrl.set_search_term("Ger");
    ctrl.set_search_term("Germ");
    let publication = ctrl.settled().await;

    assert_eq!(publication.sequence, 2, "exactly one new publication");
    assert_eq!(publication.request, ctrl.request());
    assert_eq!(publication.result.total, 1);
    assert_eq!(names(&publication), vec!["Germany"]);
}

#[tokio::test(start_paused = true)]
async fn signal_during_quiet_period_restarts_debounce() {
    let ctrl = builtin_controller();
    ctrl.settled().await;
    let publications = ctrl.publications();

    let start = Instant::now();
    ctrl.set_search_term("a");
    sleep(Duration::from_millis(100)).await;
    ctrl.set_search_term("ar");
    sleep(Duration::from_millis(100)).await;
    assert_eq!(
        publications.borrow().sequence,
        1,
        "nothing published while typing"
    );

    let publication = ctrl.settled().await;
    let elapsed = start.elapsed();

    assert_eq!(publication.sequence, 2);
    assert_eq!(publication.request, ctrl.request());
    assert!(
        elapsed >= Duration::from_millis(340),
        "debounce restarted at 100ms, got {:?}",
        elapsed
    );
}

#[tokio::test(start_paused = true)]
async fn signal_during_latency_supersedes_pending_result() {
    let ctrl = builtin_controller();
    ctrl.settled().await;
    let loading = ctrl.loading();

    ctrl.set_search_term("ru");
    // Past the quiet period: the "ru" page is computed and waiting.
    sleep(Duration::from_millis(130)).await;
    assert!(*loading.borrow());

    ctrl.set_search_term("can");
    let publication = ctrl.settled().await;

    assert_eq!(publication.sequence, 2, "the 'ru' page was never published");
    assert_eq!(names(&publication), vec!["Canada"]);
}

#[tokio::test(start_paused = true)]
async fn state_is_read_at_execution_time() {
    let ctrl = builtin_controller();
    ctrl.settled().await;

    ctrl.set_page_size(2);
    ctrl.set_page(2);
    ctrl.set_sort(Some(Column::Name), SortDirection::Ascending);
    let publication = ctrl.settled().await;

    assert_eq!(publication.sequence, 2);
    assert_eq!(names(&publication), vec!["China", "France"]);
}

// ===== Setters =====

#[tokio::test(start_paused = true)]
async fn same_term_twice_yields_same_result() {
    let ctrl = builtin_controller();

    ctrl.set_search_term("ia");
    let first = ctrl.settled().await;
    ctrl.set_search_term("ia");
    let second = ctrl.settled().await;

    assert_eq!(first.result, second.result);
    assert!(second.sequence > first.sequence, "unchanged value still republishes");
}

#[tokio::test(start_paused = true)]
async fn zero_page_and_size_clamp_to_one() {
    let ctrl = builtin_controller();

    ctrl.set_page(0);
    ctrl.set_page_size(0);

    assert_eq!(ctrl.page(), 1);
    assert_eq!(ctrl.page_size(), 1);
    let publication = ctrl.settled().await;
    assert_eq!(names(&publication), vec!["Russia"]);
}

#[tokio::test(start_paused = true)]
async fn out_of_range_page_publishes_empty_page() {
    let ctrl = builtin_controller();

    ctrl.set_page(50);
    let publication = ctrl.settled().await;

    assert_eq!(publication.result.total, 13);
    assert!(publication.result.items.is_empty());
}

#[tokio::test(start_paused = true)]
async fn separate_sort_setters_combine() {
    let ctrl = builtin_controller();

    ctrl.set_sort_column(Some(Column::Population));
    ctrl.set_sort_direction(SortDirection::Descending);
    let publication = ctrl.settled().await;

    assert_eq!(
        names(&publication),
        vec!["China", "India", "United States", "Indonesia"]
    );
}

#[tokio::test(start_paused = true)]
async fn clearing_sort_restores_dataset_order() {
    let ctrl = builtin_controller();
    ctrl.set_sort(Some(Column::Area), SortDirection::Ascending);
    ctrl.settled().await;

    ctrl.set_sort_direction(SortDirection::None);
    let publication = ctrl.settled().await;

    assert_eq!(
        names(&publication),
        vec!["Russia", "France", "Germany", "Portugal"]
    );
}

#[tokio::test(start_paused = true)]
async fn two_record_example_first_page() {
    let ctrl = controller_with(
        vec![
            Country::new("Algeria", "dz", 2_381_741, 40_400_000),
            Country::new("Germany", "de", 357_022, 82_800_000),
        ],
        1,
    );

    let publication = ctrl.settled().await;
    assert_eq!(publication.result.total, 2);
    assert_eq!(names(&publication), vec!["Algeria"]);

    ctrl.set_search_term("2,381,741");
    let publication = ctrl.settled().await;
    assert_eq!(publication.result.total, 1);
    assert_eq!(names(&publication), vec!["Algeria"]);
}

#[tokio::test(start_paused = true)]
async fn empty_dataset_publishes_empty_result() {
    let ctrl = controller_with(Vec::new(), 4);

    let publication = ctrl.settled().await;

    assert_eq!(publication.result, SearchResult::default());
    assert_eq!(publication.sequence, 1);
}

// ===== Lifecycle =====

#[tokio::test(start_paused = true)]
async fn shutdown_abandons_pending_work() {
    let ctrl = builtin_controller();
    ctrl.settled().await;
    let publications = ctrl.publications();
    let loading = ctrl.loading();

    ctrl.set_search_term("x");
    ctrl.shutdown().await;
    sleep(Duration::from_secs(1)).await;

    assert_eq!(publications.borrow().sequence, 1);
    assert!(*loading.borrow(), "abandoned change never completes");
}

#[tokio::test(start_paused = true)]
async fn drop_stops_pipeline() {
    let ctrl = builtin_controller();
    let mut publications = ctrl.publications();

    drop(ctrl);

    assert!(
        publications.changed().await.is_err(),
        "publication sender closes when the pipeline exits"
    );
}

#[tokio::test(start_paused = true)]
async fn sort_field_by_name_sorts_that_column() {
    let ctrl = builtin_controller();

    ctrl.set_sort_field("population", SortDirection::Descending);
    let publication = ctrl.settled().await;

    assert_eq!(
        ctrl.view_state().active_sort(),
        Some((Column::Population, SortDirection::Descending))
    );
    assert_eq!(names(&publication)[0], "China");
}

#[tokio::test(start_paused = true)]
async fn unknown_sort_field_keeps_dataset_order() {
    let ctrl = builtin_controller();
    ctrl.set_sort(Some(Column::Area), SortDirection::Ascending);
    ctrl.settled().await;

    ctrl.set_sort_field("flag", SortDirection::Ascending);
    let publication = ctrl.settled().await;

    assert_eq!(ctrl.view_state().sort_column(), None);
    assert_eq!(
        names(&publication),
        vec!["Russia", "France", "Germany", "Portugal"]
    );
}

// ===== Publication =====

fn bare_pipeline(
    state: watch::Receiver<Signal>,
) -> (
    Pipeline,
    Arc<watch::Sender<bool>>,
    watch::Receiver<Vec<Country>>,
    watch::Receiver<Publication>,
) {
    let loading = Arc::new(watch::channel(true).0);
    let (items_tx, items_rx) = watch::channel(Vec::new());
    let (total_tx, _) = watch::channel(0);
    let (publications_tx, publications_rx) = watch::channel(Publication::default());
    let pipeline = Pipeline {
        dataset: Vec::new().into(),
        format: DecimalFormat::default().shared(),
        config: PipelineConfig::default(),
        state,
        loading: Arc::clone(&loading),
        items: items_tx,
        total: total_tx,
        publications: publications_tx,
        cancel: CancellationToken::new(),
        sequence: 0,
    };
    (pipeline, loading, items_rx, publications_rx)
}

fn algeria_page() -> SearchResult {
    SearchResult {
        items: vec![Country::new("Algeria", "dz", 2_381_741, 40_400_000)],
        total: 1,
    }
}

#[test]
fn publish_backs_off_when_a_newer_change_arrived() {
    let (state_tx, state_rx) = watch::channel(Signal {
        state: ViewState::default(),
        request: 1,
    });
    let (mut pipeline, loading, items, publications) = bare_pipeline(state_rx);

    // A setter on another thread lands after request 1 was computed.
    state_tx.send_modify(|signal| signal.request += 1);

    assert!(!pipeline.publish(1, algeria_page()));
    assert!(*loading.borrow(), "the newer change still owns the flag");
    assert!(items.borrow().is_empty());
    assert_eq!(publications.borrow().sequence, 0);
    assert_eq!(pipeline.sequence, 0);
}

#[test]
fn publish_sends_page_before_clearing_loading() {
    let (_state_tx, state_rx) = watch::channel(Signal {
        state: ViewState::default(),
        request: 1,
    });
    let (mut pipeline, loading, items, publications) = bare_pipeline(state_rx);
    let mut loading_rx = loading.subscribe();

    assert!(pipeline.publish(1, algeria_page()));

    assert!(loading_rx.has_changed().unwrap());
    assert!(!*loading_rx.borrow_and_update());
    assert_eq!(*items.borrow(), algeria_page().items);
    let publication = publications.borrow().clone();
    assert_eq!(publication.request, 1);
    assert_eq!(publication.sequence, 1);
    assert_eq!(publication.result, algeria_page());
}
