//! Functional-boundary apply
//!
//! `apply()` is the only way a change-set becomes part of a snapshot.
//!
//! ## Atomicity Contract
//!
//! - **All-or-nothing**: either every entry is inserted and a new snapshot is
//!   returned, or an error is returned and nothing is inserted
//! - **No panics**: invalid change-sets return typed errors
//! - **Validation first**: the whole change-set is checked before any insert
//!
//! ```
//! use modelcopy_core::{apply, copy::{copy_change_set, CopyOptions}};
//! use modelcopy_core::model::{fresh_id, ClassKind, EntityRef};
//! use modelcopy_core::snapshot::SnapshotBuilder;
//!
//! let owner = EntityRef::new(fresh_id(), ClassKind::DomainOfExpertise);
//! let mut builder = SnapshotBuilder::new(fresh_id());
//! let source = builder.element_definition("Battery", "BAT", owner).unwrap();
//! let snapshot = builder.build();
//!
//! let change_set = copy_change_set(&snapshot, Some(source), &CopyOptions::default()).unwrap();
//! let next = apply(snapshot, &change_set).unwrap();
//! assert_eq!(next.len(), 2);
//! ```

use crate::change_set::ChangeSet;
use crate::errors::Result;
use crate::rules::validation;
use crate::snapshot::Snapshot;

/// Apply a change-set to a snapshot, returning the new snapshot
///
/// Takes ownership of the current state. Each created node is linked into
/// its container's child list. If this returns `Err`, the input has been
/// consumed without effect; callers that need the old state keep a clone.
///
/// # Errors
///
/// Returns the first violation reported by
/// [`validate_change_set`](crate::rules::validate_change_set).
pub fn apply(snapshot: Snapshot, change_set: &ChangeSet) -> Result<Snapshot> {
    validation::validate_change_set(&snapshot, change_set)?;

    let mut next = snapshot;
    for entry in change_set {
        next.insert_contained(entry.payload().clone())?;
    }

    tracing::debug!(
        change_set_id = %change_set.id(),
        entry_count = change_set.len(),
        snapshot_len = next.len(),
        "applied change-set"
    );
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy::{copy_change_set, CopyOptions};
    use crate::errors::CopyError;
    use crate::model::{fresh_id, ClassKind, EntityRef, ValueSetValues};
    use crate::snapshot::SnapshotBuilder;

    #[test]
    fn test_apply_links_clone_into_snapshot() {
        let owner = EntityRef::new(fresh_id(), ClassKind::DomainOfExpertise);
        let mut b = SnapshotBuilder::new(fresh_id());
        let def = b.element_definition("Battery", "BAT", owner).unwrap();
        let param = b.parameter(def, owner, fresh_id()).unwrap();
        b.value_set(param, ValueSetValues::default()).unwrap();
        let snapshot = b.build();

        let cs = copy_change_set(&snapshot, Some(def), &CopyOptions::default()).unwrap();
        let next = apply(snapshot, &cs).unwrap();

        assert_eq!(next.len(), 6);
        let root = cs.entries()[0].id();
        let copied = next.element_definition(&root).unwrap();
        assert_eq!(copied.parameters.len(), 1);
        assert_ne!(copied.parameters[0], param);
    }

    #[test]
    fn test_applying_twice_collides() {
        let owner = EntityRef::new(fresh_id(), ClassKind::DomainOfExpertise);
        let mut b = SnapshotBuilder::new(fresh_id());
        let def = b.element_definition("Battery", "BAT", owner).unwrap();
        let snapshot = b.build();

        let cs = copy_change_set(&snapshot, Some(def), &CopyOptions::default()).unwrap();
        let once = apply(snapshot, &cs).unwrap();
        let before = once.clone();

        let err = apply(once, &cs).unwrap_err();
        assert_eq!(err, CopyError::IdentityCollision { id: cs.entries()[0].id() });
        assert_eq!(before.len(), 2);
    }
}
