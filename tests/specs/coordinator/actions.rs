// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control actions and the force-poll window that follows them.

use crate::prelude::*;

#[tokio::test(start_paused = true)]
async fn stop_then_resume_is_reflected_immediately() {
    let world = World::new();
    let id = BatchId::new("b-1");
    let seen = Seen::default();
    world.progress("b-1", "processing", 2, 10);
    let _sub = world.coordinator.subscribe("b-1", seen.listener());
    settle().await;

    world.progress("b-1", "stopped", 3, 10);
    let stopped = world.coordinator.run_action(&id, BatchAction::Stop).await.unwrap();
    assert_eq!(stopped.map(|s| s.status), Some(BatchStatus::Stopped));

    world.progress("b-1", "processing", 3, 10);
    let resumed = world.coordinator.run_action(&id, BatchAction::Resume).await.unwrap();
    assert_eq!(resumed.map(|s| s.status), Some(BatchStatus::Processing));

    assert_eq!(
        seen.statuses(),
        vec![BatchStatus::Processing, BatchStatus::Stopped, BatchStatus::Processing]
    );
}

#[tokio::test(start_paused = true)]
async fn retry_of_a_failed_batch_is_polled_through_the_force_window() {
    let world = World::with(CoordinatorConfig::default().force_window(Duration::from_secs(10)));
    let id = BatchId::new("b-1");
    let seen = Seen::default();
    world.progress("b-1", "failed", 5, 10);
    let _sub = world.coordinator.subscribe("b-1", seen.listener());
    settle().await;
    assert!(world.coordinator.is_batch_terminal(&id));

    // The server has not picked up the retry yet
    world.coordinator.run_action(&id, BatchAction::Retry).await.unwrap();
    assert_eq!(world.coordinator.force_window_remaining(&id), Some(Duration::from_secs(10)));

    world.progress("b-1", "processing", 0, 10);
    world.clock.advance(Duration::from_secs(3));
    world.coordinator.poll_all().await;
    assert_eq!(seen.statuses().last(), Some(&BatchStatus::Processing));
    assert!(world.coordinator.force_window_remaining(&id).is_some());
}

#[tokio::test(start_paused = true)]
async fn rejected_action_leaves_state_untouched() {
    let world = World::new();
    let id = BatchId::new("b-1");
    world.progress("b-1", "completed", 10, 10);
    let _sub = world.coordinator.subscribe("b-1", |_: &ProgressSnapshot| {});
    settle().await;
    world.adapter.fail_control(AdapterError::Api { code: 40001, msg: "not allowed".to_string() });

    let err = world.coordinator.run_action(&id, BatchAction::Resume).await.unwrap_err();
    assert_eq!(err.to_string(), "resume of batch b-1 failed");
    assert!(world.coordinator.is_batch_terminal(&id));
    assert_eq!(world.coordinator.force_window_remaining(&id), None);
    assert_eq!(
        world.adapter.calls(),
        vec![ProgressCall::Query(id.clone()), ProgressCall::Control(id, BatchAction::Resume)]
    );
}
