//! Copy command tests
//!
//! ## Scenarios Covered
//!
//! 1. A copy is committed through the session and reported in the receipt
//! 2. Invalid sources and a missing session fail before any write
//! 3. Session failures propagate unchanged and nothing becomes durable
//! 4. Cancellation before submit prevents the write
//! 5. Concurrent copies of the same source are identity-disjoint

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{model, DroppingSession, FailingSession};
use modelcopy_core::copy::CopyOptions;
use modelcopy_core::errors::ExErrorKind;
use modelcopy_core::model::ClassKind;
use modelcopy_engine::{
    apply_engine_command, copy_element_definition, EngineCommand, EngineCommandResult,
    MemorySession, Session,
};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_copy_commits_through_session() {
    let (snapshot, ids) = model();
    let session = MemorySession::new(snapshot.clone());

    let receipt = copy_element_definition(
        &snapshot,
        Some(ids.battery),
        &CopyOptions::with_usages(),
        Some(&session),
        None,
    )
    .await
    .unwrap();

    assert_eq!(receipt.created.len(), 10);
    assert_eq!(receipt.created[0].kind, ClassKind::ElementDefinition);
    let committed = session.snapshot().unwrap();
    assert_eq!(committed.len(), snapshot.len() + 10);
    let copy = committed.element_definition(&receipt.created[0].id).unwrap();
    assert_eq!(copy.name, "Battery - Copy");
    assert_eq!(session.write_count(), 1);
}

#[tokio::test]
async fn test_invalid_source_fails_before_write() {
    let (snapshot, ids) = model();
    let session = FailingSession::new();
    let options = CopyOptions::default();

    let err = copy_element_definition(&snapshot, None, &options, Some(&session), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(err.parameter(), Some("source"));

    let err = copy_element_definition(&snapshot, Some(ids.owner.id), &options, Some(&session), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);

    assert_eq!(session.calls(), 0);
}

#[tokio::test]
async fn test_missing_session_is_invalid_argument() {
    let (snapshot, ids) = model();

    let err = copy_element_definition(&snapshot, Some(ids.battery), &CopyOptions::default(), None, None)
        .await
        .unwrap_err();

    assert_eq!(err.parameter(), Some("session"));
}

#[tokio::test]
async fn test_session_failure_is_returned_unchanged() {
    let (snapshot, ids) = model();
    let session = FailingSession::new();

    let err = copy_element_definition(
        &snapshot,
        Some(ids.battery),
        &CopyOptions::with_usages(),
        Some(&session),
        None,
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), session.error.to_string());
    assert_eq!(err.kind(), ExErrorKind::ExternalService);
    assert_eq!(session.calls(), 1);
}

#[tokio::test]
async fn test_session_failure_leaves_nothing_durable() {
    let (snapshot, ids) = model();
    let session = DroppingSession::new(snapshot.clone());
    let options = CopyOptions::with_usages();

    let err = copy_element_definition(&snapshot, Some(ids.battery), &options, Some(&session), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::ExternalService);
    assert_eq!(session.store.write_count(), 0);
    assert_eq!(session.store.snapshot().unwrap(), snapshot);

    // a retry commits exactly one copy
    let receipt = copy_element_definition(&snapshot, Some(ids.battery), &options, Some(&session), None)
        .await
        .unwrap();
    let stored = session.store.snapshot().unwrap();
    assert_eq!(session.store.write_count(), 1);
    assert_eq!(stored.len(), snapshot.len() + receipt.created.len());
}

#[tokio::test]
async fn test_rejected_write_keeps_committed_state() {
    let (snapshot, _) = model();
    let session = MemorySession::new(snapshot.clone());

    // a link between definitions the session's store does not hold
    let (other, other_ids) = model();
    let container = other.element_definition(&other_ids.satellite).unwrap();
    let target = other.element_definition(&other_ids.battery).unwrap();
    let err = modelcopy_engine::create_element_usage(
        Some(container),
        Some(target),
        Some(&other_ids.owner),
        Some(&session),
        None,
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
    assert_eq!(err.op(), Some("session_write"));
    assert_eq!(session.write_count(), 0);
    assert_eq!(session.snapshot().unwrap(), snapshot);
}

#[tokio::test]
async fn test_cancelled_before_submit() {
    let (snapshot, ids) = model();
    let session = MemorySession::new(snapshot.clone());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = copy_element_definition(
        &snapshot,
        Some(ids.battery),
        &CopyOptions::default(),
        Some(&session),
        Some(&cancel),
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Cancelled);
    assert_eq!(session.write_count(), 0);
    assert_eq!(session.snapshot().unwrap(), snapshot);
}

#[tokio::test]
async fn test_uncancelled_token_does_not_interfere() {
    let (snapshot, ids) = model();
    let session = MemorySession::new(snapshot.clone());
    let cancel = CancellationToken::new();

    let receipt = copy_element_definition(
        &snapshot,
        Some(ids.battery),
        &CopyOptions::default(),
        Some(&session),
        Some(&cancel),
    )
    .await
    .unwrap();

    assert_eq!(receipt.created.len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_copies_are_disjoint() {
    let (snapshot, ids) = model();
    let snapshot = Arc::new(snapshot);
    let session = Arc::new(MemorySession::new((*snapshot).clone()));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let snapshot = snapshot.clone();
            let session = session.clone();
            tokio::spawn(async move {
                let session: &dyn Session = session.as_ref();
                copy_element_definition(
                    &snapshot,
                    Some(ids.battery),
                    &CopyOptions::with_usages(),
                    Some(session),
                    None,
                )
                .await
            })
        })
        .collect();

    let receipts: Vec<_> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    let mut seen = HashSet::new();
    for receipt in &receipts {
        for created in &receipt.created {
            assert!(seen.insert(created.id), "identity {} reused", created.id);
        }
    }
    assert_eq!(seen.len(), 80);
    assert_eq!(session.write_count(), 8);
    assert_eq!(session.snapshot().unwrap().len(), snapshot.len() + 80);
}

#[tokio::test]
async fn test_engine_command_dispatch() {
    let (snapshot, ids) = model();
    let session = MemorySession::new(snapshot.clone());

    let copied = apply_engine_command(
        EngineCommand::CopyElementDefinition {
            source: Some(ids.cell),
            options: CopyOptions::default(),
        },
        &snapshot,
        &session,
        None,
    )
    .await
    .unwrap();
    assert!(matches!(copied, EngineCommandResult::Copied(_)));
    assert_eq!(copied.receipt().created.len(), 3);

    let linked = apply_engine_command(
        EngineCommand::CreateElementUsage {
            container: Some(ids.satellite),
            target: Some(ids.battery),
            owner: Some(ids.owner),
        },
        &snapshot,
        &session,
        None,
    )
    .await
    .unwrap();
    assert!(matches!(linked, EngineCommandResult::Linked(_)));
    assert_eq!(session.write_count(), 2);
}
