/*
 *
 *  * Copyright (c) 2025 Couchbase, Inc.
 *  *
 *  * Licensed under the Apache License, Version 2.0 (the "License");
 *  * you may not use this file except in compliance with the License.
 *  * You may obtain a copy of the License at
 *  *
 *  *    http://www.apache.org/licenses/LICENSE-2.0
 *  *
 *  * Unless required by applicable law or agreed to in writing, software
 *  * distributed under the License is distributed on an "AS IS" BASIS,
 *  * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  * See the License for the specific language governing permissions and
 *  * limitations under the License.
 *
 */

use crate::common::{scripted_manager, TEST_COLLECTION, TEST_INDEX};
use atlas_vector_index::error::ErrorKind;
use atlas_vector_index::error_context::Operation;
use atlas_vector_index::management::search::poller::{
    DesiredState, IndexPoller, PollState,
};
use atlas_vector_index::management::search::IndexCommand;
use atlas_vector_index::options::search_index_mgmt_options::PollOptions;
use serde_json::json;
use std::time::Duration;

mod common;

fn assert_elapsed(expected: Duration, actual: Duration) {
    assert!(
        actual >= expected && actual < expected + Duration::from_millis(50),
        "expected roughly {expected:?} to elapse, got {actual:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn drop_is_confirmed_once_the_name_disappears() {
    let (executor, manager) = scripted_manager();
    executor
        .push_listing(vec![json!({"name": TEST_INDEX})])
        .push_listing(vec![json!({"name": TEST_INDEX})])
        .push_listing(vec![json!({})]);

    let summary = manager.wait_until_deleted(TEST_INDEX, None).await.unwrap();

    assert_eq!(3, summary.attempts);
    assert_eq!(2, summary.waits);
    assert_eq!(
        vec![
            PollState::Checking,
            PollState::FoundWaiting,
            PollState::Checking,
            PollState::FoundWaiting,
            PollState::Checking,
            PollState::ConfirmedDeleted,
        ],
        summary.transitions
    );
    assert_eq!(Some(PollState::ConfirmedDeleted), summary.final_state());
    assert_elapsed(Duration::from_millis(1000), summary.elapsed);

    assert_eq!(vec![IndexCommand::List; 3], executor.commands());
}

#[tokio::test(start_paused = true)]
async fn empty_listing_confirms_without_waiting() {
    let (executor, manager) = scripted_manager();
    executor.push_listing(vec![]);

    let summary = manager.wait_until_deleted(TEST_INDEX, None).await.unwrap();

    assert_eq!(1, summary.attempts);
    assert_eq!(0, summary.waits);
    assert_eq!(
        vec![PollState::Checking, PollState::ConfirmedDeleted],
        summary.transitions
    );
    assert_eq!(Duration::ZERO, summary.elapsed);
}

#[tokio::test(start_paused = true)]
async fn target_listed_after_other_indexes_is_still_found() {
    let (executor, manager) = scripted_manager();
    executor
        .push_listing(vec![
            json!({"name": "default", "type": "search"}),
            json!({"name": TEST_INDEX, "type": "vectorSearch"}),
        ])
        .push_listing(vec![json!({"name": "default", "type": "search"})]);

    let summary = manager.wait_until_deleted(TEST_INDEX, None).await.unwrap();

    assert_eq!(2, summary.attempts);
    assert_eq!(1, summary.waits);
    assert_eq!(Some(PollState::ConfirmedDeleted), summary.final_state());
}

#[tokio::test(start_paused = true)]
async fn list_errors_end_the_poll() {
    let (executor, manager) = scripted_manager();
    executor
        .push_listing(vec![json!({"name": TEST_INDEX})])
        .push_error(ErrorKind::ConnectionFailure("connection reset".to_string()));

    let err = manager
        .wait_until_deleted(TEST_INDEX, None)
        .await
        .unwrap_err();

    assert_eq!(
        &ErrorKind::ConnectionFailure("connection reset".to_string()),
        err.kind()
    );
    assert_eq!(
        Operation::ListSearchIndexes,
        err.context().unwrap().operation()
    );
    assert_eq!(0, executor.remaining());
}

#[tokio::test(start_paused = true)]
async fn read_errors_before_the_target_are_not_a_confirmation() {
    let (executor, manager) = scripted_manager();
    executor.push_broken_listing(
        vec![json!({"name": "default"})],
        atlas_vector_index::error::Error::new(ErrorKind::ConnectionFailure(
            "cursor killed".to_string(),
        )),
    );

    let err = manager
        .wait_until_deleted(TEST_INDEX, None)
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), ErrorKind::ConnectionFailure(_)));

    let context = err.context().unwrap();
    assert_eq!(Operation::ListSearchIndexes, context.operation());
    assert_eq!(TEST_COLLECTION, context.collection_name());
}

#[tokio::test(start_paused = true)]
async fn attempt_cap_produces_a_timeout() {
    let (executor, manager) = scripted_manager();
    for _ in 0..3 {
        executor.push_listing(vec![json!({"name": TEST_INDEX})]);
    }

    let err = manager
        .wait_until_deleted(TEST_INDEX, PollOptions::for_deletion().max_attempts(3))
        .await
        .unwrap_err();

    match err.kind() {
        ErrorKind::PollTimeout(timeout) => {
            assert_eq!(TEST_INDEX, timeout.index_name);
            assert_eq!(3, timeout.attempts);
        }
        other => panic!("unexpected error kind {other:?}"),
    }

    let context = err.context().unwrap();
    assert_eq!(Operation::PollSearchIndex, context.operation());
    assert_eq!(Some(&TEST_INDEX.to_string()), context.index_name());
    assert_eq!(0, executor.remaining());
}

#[tokio::test(start_paused = true)]
async fn deadline_produces_a_timeout() {
    let (executor, manager) = scripted_manager();
    for _ in 0..3 {
        executor.push_listing(vec![json!({"name": TEST_INDEX})]);
    }

    let opts = PollOptions::for_deletion().deadline(Duration::from_millis(1200));
    let err = manager
        .wait_until_deleted(TEST_INDEX, opts)
        .await
        .unwrap_err();

    match err.kind() {
        ErrorKind::PollTimeout(timeout) => assert_eq!(3, timeout.attempts),
        other => panic!("unexpected error kind {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn queryable_waits_for_the_index_to_appear_and_become_queryable() {
    let (executor, manager) = scripted_manager();
    executor
        .push_listing(vec![])
        .push_listing(vec![json!({"name": TEST_INDEX, "queryable": false})])
        .push_listing(vec![json!({"name": TEST_INDEX, "queryable": true})]);

    let summary = manager
        .wait_until_queryable(TEST_INDEX, None)
        .await
        .unwrap();

    assert_eq!(
        vec![
            PollState::Checking,
            PollState::AbsentWaiting,
            PollState::Checking,
            PollState::FoundWaiting,
            PollState::Checking,
            PollState::ConfirmedQueryable,
        ],
        summary.transitions
    );
    assert_elapsed(Duration::from_secs(10), summary.elapsed);
}

#[tokio::test(start_paused = true)]
async fn failed_build_ends_the_queryable_wait() {
    let (executor, manager) = scripted_manager();
    executor
        .push_listing(vec![json!({"name": TEST_INDEX, "status": "BUILDING", "queryable": false})])
        .push_listing(vec![json!({"name": TEST_INDEX, "status": "FAILED", "queryable": false})])
        .push_listing(vec![json!({"name": TEST_INDEX, "status": "FAILED", "queryable": false})]);

    let err = manager
        .wait_until_queryable(TEST_INDEX, None)
        .await
        .unwrap_err();

    assert_eq!(&ErrorKind::IndexBuildFailed(TEST_INDEX.to_string()), err.kind());
    assert!(err.is_command_failure());
    assert_eq!(
        Operation::PollSearchIndex,
        err.context().unwrap().operation()
    );
    assert_eq!(vec![IndexCommand::List; 2], executor.commands());
    assert_eq!(1, executor.remaining());
}

#[tokio::test(start_paused = true)]
async fn failed_status_does_not_block_deletion() {
    let (executor, manager) = scripted_manager();
    executor
        .push_listing(vec![json!({"name": TEST_INDEX, "status": "FAILED"})])
        .push_listing(vec![]);

    let summary = manager.wait_until_deleted(TEST_INDEX, None).await.unwrap();

    assert_eq!(2, summary.attempts);
    assert_eq!(Some(PollState::ConfirmedDeleted), summary.final_state());
}

#[tokio::test(start_paused = true)]
async fn poller_can_be_driven_directly() {
    let (executor, manager) = scripted_manager();
    executor
        .push_listing(vec![json!({"name": TEST_INDEX})])
        .push_listing(vec![]);

    let poller = IndexPoller::new(
        &manager,
        TEST_INDEX,
        DesiredState::Deleted,
        PollOptions::new(Duration::from_millis(100)),
    );
    assert_eq!(PollState::Checking, poller.state());

    let summary = poller.poll().await.unwrap();
    assert_eq!(2, summary.attempts);
    assert_elapsed(Duration::from_millis(100), summary.elapsed);
}
