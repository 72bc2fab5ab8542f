//! Analytics and diagnostics as seen by a `ChannelEventSink`.

use std::sync::Arc;

use onboarding::{
    AssetsPrefetchMode, ChannelEventSink, Collaborators, Comparison, Condition, ConditionedAction,
    EmittedEvent, FlowEvent, RunConfiguration, Screen, ScreenGraph, SystemEvent,
};
use serde_json::json;
use tokio_stream::StreamExt;

use crate::common::{awaiting, start, wait_until};

/// **Scenario**: A run emits screen_disappeared per completion, a diagnostic per resolution, and onboarding_finished last.
#[tokio::test]
async fn run_emits_ordered_events() {
    let (sink, mut stream) = ChannelEventSink::stream();
    let age_gate = onboarding::Action::new(vec![
        ConditionedAction::to("adult").when(Condition::new(
            "age",
            None,
            Comparison::GreaterOrEqual,
            18,
        )),
    ]);
    let graph = ScreenGraph::new("age")
        .with_screen(Screen::standard("age", "Age").with_action("submit", age_gate))
        .with_screen(Screen::standard("adult", "Adult"));
    let run = start(
        Collaborators::default().with_events(Arc::new(sink)),
        graph,
        RunConfiguration::default().with_prefetch_mode(AssetsPrefetchMode::WaitForFirstDone),
    )
    .await;
    wait_until(&run.flow, awaiting("age")).await;

    let age = run.screen("age");
    run.flow.value_updated(age.clone(), json!(1)).unwrap();
    // 12 fails the only (conditioned) edge: resolution falls back to it anyway.
    run.complete("age", Some(json!(12)), "submit");
    wait_until(&run.flow, awaiting("adult")).await;
    run.flow
        .screen_completed(run.screen("adult"), None, None)
        .unwrap();
    run.done.await.unwrap().unwrap();

    let mut events = Vec::new();
    while let Some(event) = stream.next().await {
        let last = matches!(&event, EmittedEvent::User(FlowEvent::OnboardingFinished { .. }));
        events.push(event);
        if last {
            break;
        }
    }

    assert!(matches!(
        &events[0],
        EmittedEvent::User(FlowEvent::UserUpdatedValue { user_input_value, .. }) if user_input_value == &json!(1)
    ));
    assert!(matches!(
        &events[1],
        EmittedEvent::System(SystemEvent::EdgeWrongConditions { edge }) if edge.next_screen_id.as_deref() == Some("adult")
    ));
    assert!(matches!(
        &events[2],
        EmittedEvent::User(FlowEvent::ScreenDisappeared { next_screen_id: Some(next), user_input_value, .. })
            if next == "adult" && user_input_value == &json!(12)
    ));
    assert!(matches!(
        &events[3],
        EmittedEvent::User(FlowEvent::ScreenDisappeared { next_screen_id: None, user_input_value, .. })
            if user_input_value.is_null()
    ));
    match &events[4] {
        EmittedEvent::User(FlowEvent::OnboardingFinished { user_data }) => {
            assert_eq!(user_data["age"], json!(12));
        }
        other => panic!("expected onboarding_finished, got {:?}", other),
    }
}
