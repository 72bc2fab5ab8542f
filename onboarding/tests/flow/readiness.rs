//! Prefetch policies observed through the service.

use std::sync::Arc;
use std::time::Duration;

use onboarding::{
    AssetsPrefetchMode, Collaborators, FlowPhase, MockPrefetchService, PrefetchCall,
    PresentationCall, RunConfiguration, ViewHandle,
};
use tokio::time::Instant;

use crate::common::{awaiting, linear_graph, start, wait_until};

fn screen_to_load(ms: u64) -> RunConfiguration {
    RunConfiguration::default().with_prefetch_mode(AssetsPrefetchMode::WaitForScreenToLoad {
        timeout: Duration::from_millis(ms),
    })
}

/// **Scenario**: Timeout 0.5s, readiness at 0.6s ⇒ the next screen appears at 0.5s; the late signal changes nothing.
#[tokio::test(start_paused = true)]
async fn timeout_presents_before_late_readiness() {
    let prefetch = MockPrefetchService::immediate().screen_latency("name", Duration::from_millis(600));
    let run = start(
        Collaborators::default().with_prefetch(Arc::new(prefetch)),
        linear_graph(),
        screen_to_load(500),
    )
    .await;
    wait_until(&run.flow, awaiting("welcome")).await;

    let started = Instant::now();
    run.complete("welcome", None, "continue");
    let prefetching = run.flow.snapshot().await.unwrap();
    assert_eq!(prefetching.phase, FlowPhase::Prefetching);
    assert_eq!(prefetching.current_screen_id.as_deref(), Some("welcome"));

    wait_until(&run.flow, awaiting("name")).await;
    let elapsed = started.elapsed();
    assert!(
        elapsed >= Duration::from_millis(500) && elapsed < Duration::from_millis(520),
        "presented after {:?}",
        elapsed
    );

    tokio::time::sleep(Duration::from_millis(300)).await;
    let snapshot = run.flow.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, FlowPhase::AwaitingScreenCompletion("name".into()));
    assert_eq!(run.presenter.presented_screens(), vec!["welcome", "name"]);
}

/// **Scenario**: WaitForAllDone keeps the loading root until everything is prefetched, then sets the launch screen.
#[tokio::test(start_paused = true)]
async fn all_done_shows_loading_until_prefetched() {
    let prefetch = Arc::new(MockPrefetchService::immediate().all_done_latency(Duration::from_secs(2)));
    let run = start(
        Collaborators::default().with_prefetch(prefetch.clone()),
        linear_graph(),
        RunConfiguration::default().with_prefetch_mode(AssetsPrefetchMode::WaitForAllDone),
    )
    .await;

    let loading = run.flow.snapshot().await.unwrap();
    assert!(loading.pending_loading_overlay);
    assert_eq!(loading.phase, FlowPhase::Prefetching);

    let started = Instant::now();
    wait_until(&run.flow, awaiting("welcome")).await;
    assert!(started.elapsed() >= Duration::from_secs(2));
    assert!(matches!(
        run.presenter.calls().as_slice(),
        [
            PresentationCall::SetRoot(ViewHandle::Loading { custom_view: None }, _),
            PresentationCall::SetRoot(ViewHandle::Screen { .. }, _),
        ]
    ));

    run.complete("welcome", None, "continue");
    wait_until(&run.flow, awaiting("name")).await;
    assert_eq!(prefetch.calls(), vec![PrefetchCall::PrefetchAll]);
}

/// **Scenario**: WaitForFirstDone waits for the launch screen without timeout, then never waits again.
#[tokio::test(start_paused = true)]
async fn first_done_waits_for_launch_only() {
    let prefetch = Arc::new(
        MockPrefetchService::immediate()
            .screen_latency("welcome", Duration::from_secs(5))
            .screen_latency("name", Duration::from_secs(5)),
    );
    let run = start(
        Collaborators::default().with_prefetch(prefetch.clone()),
        linear_graph(),
        RunConfiguration::default().with_prefetch_mode(AssetsPrefetchMode::WaitForFirstDone),
    )
    .await;

    let started = Instant::now();
    wait_until(&run.flow, awaiting("welcome")).await;
    assert!(started.elapsed() >= Duration::from_secs(5));

    let before_next = Instant::now();
    run.complete("welcome", None, "continue");
    wait_until(&run.flow, awaiting("name")).await;
    assert!(before_next.elapsed() < Duration::from_millis(10));
    assert_eq!(
        prefetch.calls(),
        vec![
            PrefetchCall::StartLazy,
            PrefetchCall::ScreenReady("welcome".into())
        ]
    );
}

/// **Scenario**: A failing prefetch does not block the flow.
#[tokio::test(start_paused = true)]
async fn failing_prefetch_still_presents() {
    let prefetch = MockPrefetchService::immediate().failing_screen("welcome");
    let run = start(
        Collaborators::default().with_prefetch(Arc::new(prefetch)),
        linear_graph(),
        screen_to_load(500),
    )
    .await;
    let snapshot = wait_until(&run.flow, awaiting("welcome")).await;
    assert!(!snapshot.pending_loading_overlay);
}
