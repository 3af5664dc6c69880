mod common;

use common::{CONTROL, FakePage};
use std::time::Duration;
use untappd_sync::service::pagination::{PaginationDriver, StopReason};

fn driver(settle: Duration) -> PaginationDriver<'static> {
    PaginationDriver::new(".beer-item", "Show More", settle)
}

#[tokio::test]
async fn page_without_control_stops_after_one_check() {
    let page = FakePage::with_growth(25, &[], Some(0));

    let outcome = driver(Duration::ZERO).expand_all(&page).await.unwrap();

    assert_eq!(outcome.stop, StopReason::NoControl);
    assert_eq!(outcome.checks, 1);
    assert_eq!(outcome.expansions, 0);
    assert_eq!(outcome.items, 25);
    assert_eq!(page.inspect(|s| s.clicks), 0);
}

#[tokio::test]
async fn growing_content_runs_until_control_disappears() {
    let page = FakePage::with_growth(10, &[10, 10, 10], Some(3));

    let outcome = driver(Duration::ZERO).expand_all(&page).await.unwrap();

    assert_eq!(outcome.stop, StopReason::NoControl);
    assert_eq!(outcome.checks, 4);
    assert_eq!(outcome.expansions, 3);
    assert_eq!(outcome.items, 40);
    page.inspect(|s| {
        assert_eq!(s.clicks, 3);
        assert_eq!(s.scrolls_into_view, 3);
    });
}

#[tokio::test]
async fn stuck_control_stops_on_plateau() {
    // Control never disappears; the second click loads nothing.
    let page = FakePage::with_growth(0, &[5], None);

    let outcome = driver(Duration::ZERO).expand_all(&page).await.unwrap();

    assert_eq!(outcome.stop, StopReason::Stalled);
    assert_eq!(outcome.checks, 2);
    assert_eq!(outcome.expansions, 2);
    assert_eq!(outcome.items, 5);
}

#[tokio::test]
async fn first_expansion_loading_nothing_on_empty_list_is_a_plateau() {
    let page = FakePage::with_growth(0, &[], None);

    let outcome = driver(Duration::ZERO).expand_all(&page).await.unwrap();

    assert_eq!(outcome.stop, StopReason::Stalled);
    assert_eq!(outcome.expansions, 1);
    assert_eq!(outcome.items, 0);
}

#[tokio::test]
async fn long_growth_is_never_cut_short() {
    let growth = vec![1; 50];
    let page = FakePage::with_growth(0, &growth, Some(50));

    let outcome = driver(Duration::ZERO).expand_all(&page).await.unwrap();

    assert_eq!(outcome.stop, StopReason::NoControl);
    assert_eq!(outcome.expansions, 50);
    assert_eq!(outcome.items, 50);
}

#[tokio::test]
async fn control_text_is_a_substring_match() {
    assert!(CONTROL.contains("Show More") && CONTROL != "Show More");
    let page = FakePage::with_growth(0, &[3], Some(1));

    let outcome = driver(Duration::ZERO).expand_all(&page).await.unwrap();

    assert_eq!(outcome.expansions, 1);
    assert_eq!(outcome.items, 3);
}

#[tokio::test(start_paused = true)]
async fn settle_interval_is_applied_three_times_per_expansion() {
    let page = FakePage::with_growth(0, &[4], Some(1));
    let started = tokio::time::Instant::now();

    driver(Duration::from_secs(1))
        .expand_all(&page)
        .await
        .unwrap();

    // Expansion round: after scroll, after scroll-into-view, after click.
    // Final round: after scroll.
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(4), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_secs(5), "elapsed {elapsed:?}");
}
