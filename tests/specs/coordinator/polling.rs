// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared polling behavior seen through the public coordinator API.

use crate::prelude::*;

const TICK: Duration = Duration::from_millis(3000);

#[tokio::test(start_paused = true)]
async fn batch_is_followed_to_completion_then_left_alone() {
    let world = World::new();
    let id = BatchId::new("b-1");
    let seen = Seen::default();
    world.progress("b-1", "pending", 0, 4);
    let _sub = world.coordinator.subscribe("b-1", seen.listener());
    settle().await;

    for (status, processed) in [("processing", 2), ("completed", 4)] {
        world.progress("b-1", status, processed, 4);
        tokio::time::advance(TICK).await;
        settle().await;
    }
    for _ in 0..5 {
        tokio::time::advance(TICK).await;
        settle().await;
    }

    assert_eq!(
        seen.statuses(),
        vec![BatchStatus::Pending, BatchStatus::Processing, BatchStatus::Completed]
    );
    assert_eq!(world.adapter.query_count(&id), 3);
    assert!(world.coordinator.is_polling());
}

#[tokio::test(start_paused = true)]
async fn many_watchers_of_many_batches_share_one_timer() {
    let world = World::new();
    let ids: Vec<String> = (0..12).map(|n| format!("job-{n}")).collect();
    let mut subs: Vec<Subscription> = Vec::new();
    for id in &ids {
        world.progress(id, "processing", 1, 3);
        for _ in 0..3 {
            subs.push(world.coordinator.subscribe(id.as_str(), |_: &ProgressSnapshot| {}));
        }
    }

    // Two chunks with one 100ms pause
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(world.adapter.total_queries(), 12);
    assert_eq!(world.coordinator.subscribed_batch_count(), 12);

    subs.clear();
    assert!(!world.coordinator.is_polling());
    assert_eq!(world.coordinator.subscribed_batch_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn background_watching_slows_down_and_resumes_on_return() {
    let world = World::new();
    let id = BatchId::new("b-1");
    world.progress("b-1", "processing", 1, 10);
    let _sub = world.coordinator.subscribe("b-1", |_: &ProgressSnapshot| {});
    settle().await;

    world.coordinator.set_visibility(Visibility::Hidden).await;
    settle().await;
    let hidden = world.adapter.query_count(&id);
    tokio::time::advance(Duration::from_millis(14_000)).await;
    settle().await;
    assert_eq!(world.adapter.query_count(&id), hidden);
    tokio::time::advance(Duration::from_millis(1_000)).await;
    settle().await;
    assert_eq!(world.adapter.query_count(&id), hidden + 1);

    world.coordinator.set_visibility(Visibility::Visible).await;
    settle().await;
    assert_eq!(world.adapter.query_count(&id), hidden + 2);
    assert_eq!(world.coordinator.polling_interval(), TICK);
}

#[tokio::test(start_paused = true)]
async fn malformed_payload_still_reaches_listeners() {
    let world = World::new();
    let seen = Seen::default();
    world.adapter.set_payload(
        "b-1",
        json!({ "status": "exploded", "total_rows": -4, "processed_rows": "7", "error": "" }),
    );
    let _sub = world.coordinator.subscribe("b-1", seen.listener());
    settle().await;

    let snapshot = world.coordinator.cached_snapshot(&BatchId::new("b-1")).unwrap();
    assert_eq!(snapshot.status, BatchStatus::Pending);
    assert_eq!((snapshot.total_rows, snapshot.processed_rows), (0, 7));
    assert_eq!(snapshot.progress, 0.0);
    assert_eq!(snapshot.error, None);
    assert_eq!(seen.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn outage_is_survived_without_notifications() {
    let world = World::new();
    let id = BatchId::new("b-1");
    let seen = Seen::default();
    world.progress("b-1", "processing", 1, 10);
    let _sub = world.coordinator.subscribe("b-1", seen.listener());
    settle().await;

    world.adapter.fail("b-1");
    for _ in 0..3 {
        tokio::time::advance(TICK).await;
        settle().await;
    }
    assert_eq!(seen.len(), 1);

    world.adapter.recover(&id);
    world.progress("b-1", "completed", 10, 10);
    tokio::time::advance(TICK).await;
    settle().await;
    assert_eq!(seen.statuses(), vec![BatchStatus::Processing, BatchStatus::Completed]);
}
