//! Custom screens: hand-off to the host and re-entry through `FlowHandle`.

use std::sync::{Arc, Mutex};

use onboarding::{
    AssetsPrefetchMode, ChildContainer, Collaborators, CustomScreenHandler, CustomScreenPayload,
    FlowHandle, FlowPhase, PresentationCall, RunConfiguration, Screen, ScreenGraph, ViewHandle,
};
use serde_json::{json, Map};

use crate::common::{awaiting, finish, next, start, wait_until};

/// intro → paywall(custom, callback → outro) → outro(end).
fn graph_with_custom() -> ScreenGraph {
    let mut labels = Map::new();
    labels.insert("headline".into(), json!("Go premium"));
    ScreenGraph::new("intro")
        .with_screen(Screen::standard("intro", "Intro").with_action("continue", next("paywall")))
        .with_screen(Screen::custom(
            "paywall",
            "Paywall",
            CustomScreenPayload {
                callback_action: Some(next("outro")),
                values: labels,
            },
        ))
        .with_screen(Screen::standard("outro", "Outro").with_action("close", finish()))
}

fn config() -> RunConfiguration {
    RunConfiguration::default().with_prefetch_mode(AssetsPrefetchMode::WaitForFirstDone)
}

/// **Scenario**: Custom screen with no handler ⇒ finish with collected data; callback once with Ok.
#[tokio::test]
async fn no_handler_finishes_with_collected_data() {
    let run = start(Collaborators::default(), graph_with_custom(), config()).await;
    wait_until(&run.flow, awaiting("intro")).await;
    run.complete("intro", Some(json!("hello")), "continue");

    let data = run.done.await.unwrap().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data["intro"], json!("hello"));
    assert_eq!(run.presenter.presented_screens(), vec!["intro"]);
    assert_eq!(run.flow.snapshot().await.unwrap().phase, FlowPhase::Finished);
}

/// **Scenario**: The handler gets a container and a handle; reporting back resumes with the callback action.
#[tokio::test]
async fn handler_round_trip_resumes_flow() {
    let containers = Arc::new(Mutex::new(Vec::new()));
    let seen = containers.clone();
    let handler: Arc<dyn CustomScreenHandler> = Arc::new(
        move |screen: &Screen, container: ChildContainer, flow: FlowHandle| {
            seen.lock().unwrap().push(container);
            flow.custom_flow_finished(screen.clone(), Some(json!({"plan": "yearly"})))
                .unwrap();
        },
    );
    let run = start(
        Collaborators::default().with_custom_screen_handler(handler),
        graph_with_custom(),
        config(),
    )
    .await;
    wait_until(&run.flow, awaiting("intro")).await;
    run.complete("intro", None, "continue");

    wait_until(&run.flow, awaiting("outro")).await;
    let container = containers.lock().unwrap()[0].clone();
    assert_eq!(container.screen_id, "paywall");
    assert!(run
        .presenter
        .calls()
        .contains(&PresentationCall::Push(ViewHandle::CustomContainer(container), true)));

    run.complete("outro", None, "close");
    let data = run.done.await.unwrap().unwrap();
    assert_eq!(data["paywall"], json!({"plan": "yearly"}));
}

/// **Scenario**: While the host owns the custom screen the phase is CustomFlowActive with the labels recorded.
#[tokio::test]
async fn custom_flow_active_until_host_reports() {
    let pending = Arc::new(Mutex::new(None));
    let slot = pending.clone();
    let handler: Arc<dyn CustomScreenHandler> = Arc::new(
        move |screen: &Screen, _: ChildContainer, flow: FlowHandle| {
            *slot.lock().unwrap() = Some((screen.clone(), flow));
        },
    );
    let run = start(
        Collaborators::default().with_custom_screen_handler(handler),
        graph_with_custom(),
        config(),
    )
    .await;
    wait_until(&run.flow, awaiting("intro")).await;
    run.complete("intro", None, "continue");

    let snapshot = wait_until(&run.flow, |s| {
        s.phase == FlowPhase::CustomFlowActive("paywall".into())
    })
    .await;
    assert_eq!(snapshot.user_data["paywall"], json!({"headline": "Go premium"}));

    let (screen, flow) = pending.lock().unwrap().take().unwrap();
    flow.custom_flow_finished(screen, None).unwrap();
    wait_until(&run.flow, awaiting("outro")).await;
}
