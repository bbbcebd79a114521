use crate::change_set::ChangeSet;
use crate::errors::{CopyError, Result};
use crate::snapshot::Snapshot;

use super::invariants;

/// Validate a change-set against the snapshot it will be applied to
///
/// Checks, in order:
///
/// 1. No identity appears twice in the change-set
/// 2. No identity already exists in the snapshot
/// 3. Every container precedes its content or exists in the snapshot
/// 4. Every container is of a class that can hold the entry
/// 5. Every subscription value set points at a sibling value set created by
///    the same change-set
///
/// # Errors
///
/// Returns the first violation found. Call the individual invariant
/// functions for exhaustive reporting.
pub fn validate_change_set(snapshot: &Snapshot, change_set: &ChangeSet) -> Result<()> {
    if let Some(id) = invariants::find_duplicate_ids(change_set).first() {
        return Err(CopyError::DuplicateIdentity { id: *id });
    }

    if let Some(id) = invariants::find_identity_collisions(snapshot, change_set).first() {
        return Err(CopyError::IdentityCollision { id: *id });
    }

    if let Some((id, container_id)) = invariants::find_missing_containers(snapshot, change_set).first() {
        return Err(CopyError::ContainerMissing {
            id: *id,
            container_id: *container_id,
        });
    }

    if let Some((id, kind, container_kind)) =
        invariants::find_illegal_containments(snapshot, change_set).first()
    {
        return Err(CopyError::IllegalContainment {
            id: *id,
            kind: *kind,
            container_kind: *container_kind,
        });
    }

    if let Some((sub_vs, subscribed)) = invariants::find_subscription_escapes(change_set).first() {
        return Err(CopyError::SubscriptionOutsideSubtree {
            subscription_value_set_id: *sub_vs,
            subscribed_value_set_id: *subscribed,
        });
    }

    Ok(())
}
