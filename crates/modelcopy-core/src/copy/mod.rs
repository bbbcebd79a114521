//! Element definition copy
//!
//! A copy runs in three synchronous steps over a read-only snapshot:
//! [`plan`] walks the source subtree and clones every owned node under a
//! fresh identity, rebuilding subscriptions so they stay inside the clone;
//! [`assemble`] orders the clones into one immutable [`ChangeSet`].
//! Nothing here touches the store.

mod assembler;
mod options;
mod planner;
mod remapper;
mod subscriptions;

pub use assembler::assemble;
pub use options::{CopyOptions, PublishedValuePolicy, DEFAULT_NAME_SUFFIX};
pub use planner::{plan, PlannedGraph};
pub use remapper::IdentityRemapper;

use crate::change_set::ChangeSet;
use crate::errors::Result;
use crate::model::Id;
use crate::snapshot::Snapshot;

/// Plan and assemble the copy of element definition `source`
///
/// # Errors
///
/// Any error from [`plan`].
pub fn copy_change_set(
    snapshot: &Snapshot,
    source: Option<Id>,
    options: &CopyOptions,
) -> Result<ChangeSet> {
    Ok(assemble(plan(snapshot, source, options)?))
}
