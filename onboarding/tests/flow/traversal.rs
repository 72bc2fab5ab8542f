//! End-to-end traversal: conditional edges, JSON graphs, start guards.

use std::io::Write;
use std::sync::Arc;

use onboarding::{
    AssetsPrefetchMode, Collaborators, FlowPhase, GraphIssue, OnboardingService, PresentationCall,
    RecordingPresenter, RunConfiguration, ScreenGraph, StartOutcome, TransitionKind, ViewHandle,
};
use serde_json::json;

use crate::common::{awaiting, linear_graph, start, start_on, wait_until};

const BRANCHING_GRAPH: &str = r#"{
    "launch_screen_id": "A",
    "screens": {
        "A": {
            "id": "A",
            "name": "Question",
            "actions": {
                "answer": {
                    "edges": [
                        {
                            "rule": [{"screen_id": "A", "path": "x", "comparison": "equals", "value": 1}],
                            "next_screen_id": "B"
                        },
                        {"next_screen_id": "C", "transition_kind": "modal"}
                    ]
                }
            }
        },
        "B": {"id": "B", "name": "Matched", "actions": {"close": {"edges": [{}]}}},
        "C": {"id": "C", "name": "Other", "actions": {"close": {"edges": [{}]}}}
    }
}"#;

fn load_branching() -> ScreenGraph {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(BRANCHING_GRAPH.as_bytes()).unwrap();
    ScreenGraph::from_path(file.path()).unwrap()
}

fn first_done() -> RunConfiguration {
    RunConfiguration::default().with_prefetch_mode(AssetsPrefetchMode::WaitForFirstDone)
}

/// **Scenario**: {A→[x==1]→B, A→[]→C} with {A:{x:2}} ⇒ C (unconditioned, modal).
#[tokio::test]
async fn unmatched_condition_takes_unconditioned_edge() {
    let graph = load_branching();
    assert!(graph.validate().is_empty());
    let run = start(Collaborators::default(), graph, first_done()).await;
    wait_until(&run.flow, awaiting("A")).await;

    run.complete("A", Some(json!({"x": 2})), "answer");
    wait_until(&run.flow, awaiting("C")).await;
    assert_eq!(
        run.presenter.calls().last(),
        Some(&PresentationCall::PresentModal(ViewHandle::Screen {
            screen_id: "C".into(),
            transition_kind: TransitionKind::Modal,
        }))
    );
}

/// **Scenario**: {A→[x==1]→B} with {A:{x:1}} ⇒ B; completing B ends the flow with the data.
#[tokio::test]
async fn matched_condition_takes_conditioned_edge() {
    let run = start(Collaborators::default(), load_branching(), first_done()).await;
    wait_until(&run.flow, awaiting("A")).await;

    run.complete("A", Some(json!({"x": 1})), "answer");
    wait_until(&run.flow, awaiting("B")).await;
    run.complete("B", None, "close");

    let data = run.done.await.unwrap().unwrap();
    assert_eq!(data["A"], json!({"x": 1}));
    assert_eq!(run.presenter.presented_screens(), vec!["A", "B"]);
    assert_eq!(run.presenter.calls().last(), Some(&PresentationCall::DismissToRoot));
}

/// **Scenario**: Linear walk collects every value and ends in Finished.
#[tokio::test]
async fn linear_walk_collects_values() {
    let run = start(Collaborators::default(), linear_graph(), RunConfiguration::default()).await;
    assert_eq!(run.outcome, StartOutcome::Started);
    wait_until(&run.flow, awaiting("welcome")).await;
    run.complete("welcome", None, "continue");
    wait_until(&run.flow, awaiting("name")).await;
    run.complete("name", Some(json!("Ada")), "continue");
    wait_until(&run.flow, awaiting("done")).await;
    run.complete("done", Some(json!(true)), "close");

    let data = run.done.await.unwrap().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data["name"], json!("Ada"));
    let snapshot = run.flow.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, FlowPhase::Finished);
    assert!(!snapshot.is_running);
    assert!(snapshot.user_data.is_empty());
}

/// **Scenario**: Missing launch screen ⇒ MissingLaunchScreen, nothing presented, callback never runs.
#[tokio::test]
async fn missing_launch_screen_presents_nothing() {
    let graph = ScreenGraph::new("nowhere").with_screen(onboarding::Screen::standard("a", "A"));
    assert_eq!(
        graph.validate(),
        vec![GraphIssue::MissingLaunchScreen("nowhere".into())]
    );
    let run = start(Collaborators::default(), graph, RunConfiguration::default()).await;
    assert_eq!(run.outcome, StartOutcome::MissingLaunchScreen);
    assert!(run.presenter.calls().is_empty());
    assert_eq!(run.flow.snapshot().await.unwrap().phase, FlowPhase::Idle);
    // The callback was dropped unused.
    assert!(run.done.await.is_err());
}

/// **Scenario**: A second start while running is rejected; after finishing, the same service starts again.
#[tokio::test]
async fn restart_after_finish() {
    let first = start(Collaborators::default(), linear_graph(), first_done()).await;
    let second = start_on(first.flow.clone(), linear_graph(), first_done()).await;
    assert_eq!(second.outcome, StartOutcome::AlreadyRunning);

    wait_until(&first.flow, awaiting("welcome")).await;
    first.complete("welcome", None, "continue");
    first.complete("name", None, "continue");
    first.complete("done", None, "close");
    first.done.await.unwrap().unwrap();

    let third = start_on(first.flow.clone(), linear_graph(), first_done()).await;
    assert_eq!(third.outcome, StartOutcome::Started);
    wait_until(&third.flow, awaiting("welcome")).await;
}

/// **Scenario**: A panicking completion callback does not take the service down; the next start is accepted.
#[tokio::test]
async fn service_survives_panicking_callback() {
    let flow = OnboardingService::spawn(Collaborators::default());
    let presenter = Arc::new(RecordingPresenter::new());
    let graph = Arc::new(linear_graph());
    let outcome = flow
        .start(graph.clone(), first_done(), presenter.clone(), |_| {
            panic!("host callback failed")
        })
        .await
        .unwrap();
    assert_eq!(outcome, StartOutcome::Started);
    wait_until(&flow, awaiting("welcome")).await;

    for (id, action) in [("welcome", "continue"), ("name", "continue"), ("done", "close")] {
        let screen = graph.screen(id).cloned().unwrap();
        let action = screen.action(action).cloned();
        flow.screen_completed(screen, None, action).unwrap();
    }
    let finished = wait_until(&flow, |s| s.phase == FlowPhase::Finished).await;
    assert!(!finished.is_running);
    assert_eq!(presenter.calls().last(), Some(&PresentationCall::DismissToRoot));

    let again = start_on(flow.clone(), linear_graph(), first_done()).await;
    assert_eq!(again.outcome, StartOutcome::Started);
    wait_until(&again.flow, awaiting("welcome")).await;
}
