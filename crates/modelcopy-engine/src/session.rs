//! Submit boundary
//!
//! A [`Session`] is the single effectful collaborator of the engine: it takes
//! a fully built change-set and makes it durable, or fails as a whole.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use modelcopy_core::errors::{ExError, ExErrorKind};
use modelcopy_core::model::{EntityRef, Id};
use modelcopy_core::{apply, ChangeSet, Snapshot};
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// What a session reports back for a committed change-set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteReceipt {
    pub change_set_id: Id,
    /// Created entities, in change-set order
    pub created: Vec<EntityRef>,
}

impl WriteReceipt {
    pub fn for_change_set(change_set: &ChangeSet) -> Self {
        Self {
            change_set_id: change_set.id(),
            created: change_set.created(),
        }
    }
}

/// Transport to the store that owns the model
///
/// Implementations commit the whole change-set or nothing. Errors are
/// handed to the caller of the engine command unchanged.
#[async_trait]
pub trait Session: Send + Sync {
    /// Submit one change-set
    ///
    /// # Errors
    ///
    /// Any failure of the store or the transport; the change-set has then
    /// not been committed.
    async fn write(&self, change_set: ChangeSet) -> Result<WriteReceipt>;
}

/// In-process session over a snapshot
///
/// Each write validates and applies the change-set to a copy of the current
/// snapshot and swaps it in only on success.
#[derive(Debug, Default)]
pub struct MemorySession {
    snapshot: Mutex<Snapshot>,
    writes: AtomicUsize,
}

impl MemorySession {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            writes: AtomicUsize::new(0),
        }
    }

    /// Copy of the committed state
    ///
    /// # Errors
    ///
    /// Returns `Internal` if a writer panicked while holding the lock.
    pub fn snapshot(&self) -> Result<Snapshot> {
        self.snapshot
            .lock()
            .map(|s| s.clone())
            .map_err(|_| poisoned())
    }

    /// Number of committed change-sets
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn write(&self, change_set: ChangeSet) -> Result<WriteReceipt> {
        let mut current = self.snapshot.lock().map_err(|_| poisoned())?;

        let next = apply(current.clone(), &change_set).map_err(|e| {
            let cause = ExError::from(e);
            ExError::new(cause.kind())
                .with_op("session_write")
                .with_message(format!(
                    "change-set {} rejected: {}",
                    change_set.id(),
                    cause.message()
                ))
                .with_source(cause)
        })?;
        *current = next;
        self.writes.fetch_add(1, Ordering::SeqCst);

        tracing::debug!(
            change_set_id = %change_set.id(),
            entry_count = change_set.len(),
            "committed change-set"
        );
        Ok(WriteReceipt::for_change_set(&change_set))
    }
}

fn poisoned() -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("session_write")
        .with_message("session state lock poisoned")
}
