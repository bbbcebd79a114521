use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use modelcopy_core::errors::{ExError, ExErrorKind};
use modelcopy_core::model::{fresh_id, ClassKind, EntityRef, Id, ValueSetValues};
use modelcopy_core::{ChangeSet, Snapshot, SnapshotBuilder};
use modelcopy_engine::{MemorySession, Result, Session, WriteReceipt};

/// Ids of the nodes built by [`model`]
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub struct Model {
    pub owner: EntityRef,
    pub satellite: Id,
    pub battery: Id,
    pub cell: Id,
}

/// Satellite, plus a Battery with one subscribed parameter that uses a Cell
/// whose parameter it overrides
#[allow(dead_code)]
pub fn model() -> (Snapshot, Model) {
    let owner = EntityRef::new(fresh_id(), ClassKind::DomainOfExpertise);
    let subscriber = EntityRef::new(fresh_id(), ClassKind::DomainOfExpertise);
    let mut b = SnapshotBuilder::new(fresh_id());

    let satellite = b.element_definition("Satellite", "SAT", owner).unwrap();
    let battery = b.element_definition("Battery", "BAT", owner).unwrap();
    let p = b.parameter(battery, owner, fresh_id()).unwrap();
    let vs = b.value_set(p, ValueSetValues::default()).unwrap();
    let s = b.subscription(p, subscriber).unwrap();
    b.subscription_value_set(s, vs).unwrap();

    let cell = b.element_definition("Cell", "CEL", owner).unwrap();
    let cp = b.parameter(cell, owner, fresh_id()).unwrap();
    let cvs = b.value_set(cp, ValueSetValues::default()).unwrap();
    let u = b.element_usage(battery, cell, owner).unwrap();
    let o = b.parameter_override(u, cp, owner).unwrap();
    let ovs = b.override_value_set(o, cvs, ValueSetValues::default()).unwrap();
    let os = b.subscription(o, subscriber).unwrap();
    b.subscription_value_set(os, ovs).unwrap();

    (
        b.build(),
        Model {
            owner,
            satellite,
            battery,
            cell,
        },
    )
}

/// Session that fails every write with the same error
#[allow(dead_code)]
pub struct FailingSession {
    pub error: ExError,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl FailingSession {
    pub fn new() -> Self {
        Self {
            error: ExError::new(ExErrorKind::ExternalService)
                .with_op("remote_write")
                .with_entity_id("tx-42")
                .with_message("connection reset by peer"),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Session for FailingSession {
    async fn write(&self, _change_set: ChangeSet) -> Result<WriteReceipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

/// In-memory store whose transport drops the first write
#[allow(dead_code)]
pub struct DroppingSession {
    pub store: MemorySession,
    dropped: AtomicBool,
}

#[allow(dead_code)]
impl DroppingSession {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            store: MemorySession::new(snapshot),
            dropped: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Session for DroppingSession {
    async fn write(&self, change_set: ChangeSet) -> Result<WriteReceipt> {
        if !self.dropped.swap(true, Ordering::SeqCst) {
            return Err(ExError::new(ExErrorKind::ExternalService)
                .with_op("remote_write")
                .with_message("connection reset by peer"));
        }
        self.store.write(change_set).await
    }
}
