//! Engine-level commands resolved against a snapshot

use modelcopy_core::copy::CopyOptions;
use modelcopy_core::errors::CopyError;
use modelcopy_core::model::{ElementDefinition, EntityRef, Id};
use modelcopy_core::Snapshot;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::errors::Result;
use crate::session::{Session, WriteReceipt};

/// Commands addressed by identity, as they arrive from a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EngineCommand {
    /// Copy an element definition
    CopyElementDefinition {
        source: Option<Id>,
        #[serde(default)]
        options: CopyOptions,
    },
    /// Link `target` into `container` as a usage
    CreateElementUsage {
        container: Option<Id>,
        target: Option<Id>,
        owner: Option<EntityRef>,
    },
}

/// Result of applying an engine command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum EngineCommandResult {
    Copied(WriteReceipt),
    Linked(WriteReceipt),
}

impl EngineCommandResult {
    pub fn receipt(&self) -> &WriteReceipt {
        match self {
            EngineCommandResult::Copied(r) | EngineCommandResult::Linked(r) => r,
        }
    }
}

/// Resolve a command's ids in `snapshot` and run it against `session`
///
/// # Errors
///
/// `ERR_NOT_FOUND` / `ERR_INVALID_TARGET_KIND` if a usage id does not name
/// an element definition; otherwise whatever the command handler returns.
pub async fn apply_engine_command(
    cmd: EngineCommand,
    snapshot: &Snapshot,
    session: &dyn Session,
    cancel: Option<&CancellationToken>,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::CopyElementDefinition { source, options } => {
            let receipt =
                super::copy_element_definition(snapshot, source, &options, Some(session), cancel)
                    .await?;
            Ok(EngineCommandResult::Copied(receipt))
        }
        EngineCommand::CreateElementUsage {
            container,
            target,
            owner,
        } => {
            let container = definition(snapshot, container)?;
            let target = definition(snapshot, target)?;
            let receipt = super::create_element_usage(
                container,
                target,
                owner.as_ref(),
                Some(session),
                cancel,
            )
            .await?;
            Ok(EngineCommandResult::Linked(receipt))
        }
    }
}

fn definition(snapshot: &Snapshot, id: Option<Id>) -> Result<Option<&ElementDefinition>> {
    match id.filter(|id| !id.is_nil()) {
        None => Ok(None),
        Some(id) => snapshot
            .element_definition(&id)
            .map(Some)
            .map_err(|e: CopyError| e.into()),
    }
}
