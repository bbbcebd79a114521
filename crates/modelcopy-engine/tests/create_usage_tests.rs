//! Usage-link command tests
//!
//! ## Scenarios Covered
//!
//! 1. Each missing argument fails with an invalid-input error naming it
//! 2. Argument checks run in order and before any write
//! 3. A valid link is committed as a single entity
//! 4. Session failures reach the caller unchanged

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{model, FailingSession};
use modelcopy_core::errors::ExErrorKind;
use modelcopy_core::model::{fresh_id, ClassKind, EntityRef};
use modelcopy_engine::{create_element_usage, MemorySession, Session};

#[tokio::test]
async fn test_each_missing_argument_is_named() {
    let (snapshot, ids) = model();
    let a = snapshot.element_definition(&ids.satellite).unwrap();
    let b = snapshot.element_definition(&ids.battery).unwrap();
    let d = ids.owner;
    let session = MemorySession::new(snapshot.clone());
    let s: &dyn Session = &session;

    let cases = [
        (create_element_usage(None, Some(b), Some(&d), Some(s), None).await, "container"),
        (create_element_usage(Some(a), None, Some(&d), Some(s), None).await, "target"),
        (create_element_usage(Some(a), Some(b), None, Some(s), None).await, "owner"),
        (create_element_usage(Some(a), Some(b), Some(&d), None, None).await, "session"),
    ];

    for (result, parameter) in cases {
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(err.parameter(), Some(parameter));
        assert_eq!(err.op(), Some("create_element_usage"));
    }
    assert_eq!(session.write_count(), 0);
}

#[tokio::test]
async fn test_first_missing_argument_wins() {
    let err = create_element_usage(None, None, None, None, None)
        .await
        .unwrap_err();
    assert_eq!(err.parameter(), Some("container"));
}

#[tokio::test]
async fn test_owner_must_be_domain_of_expertise() {
    let (snapshot, ids) = model();
    let a = snapshot.element_definition(&ids.satellite).unwrap();
    let b = snapshot.element_definition(&ids.battery).unwrap();
    let not_a_domain = EntityRef::new(fresh_id(), ClassKind::Iteration);
    let session = FailingSession::new();

    let err = create_element_usage(Some(a), Some(b), Some(&not_a_domain), Some(&session), None)
        .await
        .unwrap_err();

    assert_eq!(err.parameter(), Some("owner"));
    assert_eq!(session.calls(), 0);
}

#[tokio::test]
async fn test_link_commits_single_usage() {
    let (snapshot, ids) = model();
    let a = snapshot.element_definition(&ids.satellite).unwrap();
    let b = snapshot.element_definition(&ids.battery).unwrap();
    let session = MemorySession::new(snapshot.clone());

    let receipt = create_element_usage(Some(a), Some(b), Some(&ids.owner), Some(&session), None)
        .await
        .unwrap();

    assert_eq!(receipt.created.len(), 1);
    assert_eq!(receipt.created[0].kind, ClassKind::ElementUsage);

    let committed = session.snapshot().unwrap();
    let usage = committed.element_usage(&receipt.created[0].id).unwrap();
    assert_eq!(usage.element_definition.id, ids.battery);
    assert_eq!(usage.name, "Battery");
    assert_eq!(usage.container.id, ids.satellite);
    assert!(committed
        .element_definition(&ids.satellite)
        .unwrap()
        .contained_elements
        .contains(&usage.id));
}

#[tokio::test]
async fn test_self_link_is_rejected_before_write() {
    let (snapshot, ids) = model();
    let a = snapshot.element_definition(&ids.battery).unwrap();
    let session = FailingSession::new();

    let err = create_element_usage(Some(a), Some(a), Some(&ids.owner), Some(&session), None)
        .await
        .unwrap_err();

    assert_eq!(err.parameter(), Some("target"));
    assert_eq!(session.calls(), 0);
}

#[tokio::test]
async fn test_session_failure_propagates_unchanged() {
    let (snapshot, ids) = model();
    let a = snapshot.element_definition(&ids.satellite).unwrap();
    let b = snapshot.element_definition(&ids.battery).unwrap();
    let session = FailingSession::new();

    let err = create_element_usage(Some(a), Some(b), Some(&ids.owner), Some(&session), None)
        .await
        .unwrap_err();

    assert_eq!(session.calls(), 1);
    assert_eq!(err.kind(), session.error.kind());
    assert_eq!(err.op(), session.error.op());
    assert_eq!(err.entity_id(), Some("tx-42"));
    assert_eq!(err.to_string(), session.error.to_string());
}
