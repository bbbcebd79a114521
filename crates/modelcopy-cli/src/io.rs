//! Snapshot files and the recording session used by every command

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use modelcopy_core::{ChangeSet, Snapshot};
use modelcopy_engine::{MemorySession, Result as EngineResult, Session, WriteReceipt};

pub fn read_snapshot(path: &Path) -> Result<Snapshot, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read snapshot {}: {}", path.display(), e))?;
    Ok(Snapshot::from_json(&text)?)
}

pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, snapshot.to_json()?)
        .map_err(|e| format!("cannot write snapshot {}: {}", path.display(), e))?;
    Ok(())
}

/// Memory session that keeps the last change-set it was handed
pub struct RecordingSession {
    inner: MemorySession,
    last: Mutex<Option<ChangeSet>>,
}

impl RecordingSession {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: MemorySession::new(snapshot),
            last: Mutex::new(None),
        }
    }

    pub fn last_change_set(&self) -> Option<ChangeSet> {
        self.last.lock().ok().and_then(|last| last.clone())
    }

    pub fn snapshot(&self) -> EngineResult<Snapshot> {
        self.inner.snapshot()
    }
}

#[async_trait]
impl Session for RecordingSession {
    async fn write(&self, change_set: ChangeSet) -> EngineResult<WriteReceipt> {
        if let Ok(mut last) = self.last.lock() {
            *last = Some(change_set.clone());
        }
        self.inner.write(change_set).await
    }
}

/// Print the submitted change-set and optionally save the resulting snapshot
pub fn report(
    session: &RecordingSession,
    out: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let change_set = session
        .last_change_set()
        .ok_or("no change-set was submitted")?;
    println!("{}", change_set.to_json()?);

    if let Some(out) = out {
        write_snapshot(out, &session.snapshot()?)?;
    }
    Ok(())
}
