use std::collections::{HashMap, HashSet};

use crate::change_set::{ChangeSet, CreateEntry};
use crate::model::{ClassKind, DomainNode, Id};
use crate::snapshot::Snapshot;

/// Find identities that appear more than once in the change-set
pub fn find_duplicate_ids(change_set: &ChangeSet) -> Vec<Id> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for id in change_set.ids() {
        if !seen.insert(id) && !duplicates.contains(&id) {
            duplicates.push(id);
        }
    }

    duplicates
}

/// Find entries whose identity already exists in the snapshot
pub fn find_identity_collisions(snapshot: &Snapshot, change_set: &ChangeSet) -> Vec<Id> {
    change_set.ids().filter(|id| snapshot.contains(id)).collect()
}

/// Find entries whose container neither precedes them nor exists in the snapshot
///
/// Iterations live outside the snapshot and always count as present.
///
/// Returns list of (entry_id, container_id) tuples
pub fn find_missing_containers(snapshot: &Snapshot, change_set: &ChangeSet) -> Vec<(Id, Id)> {
    let mut created = HashSet::new();
    let mut missing = Vec::new();

    for entry in change_set {
        let container = entry.container();
        let present = container.kind == ClassKind::Iteration
            || created.contains(&container.id)
            || snapshot.contains(&container.id);
        if !present {
            missing.push((entry.id(), container.id));
        }
        created.insert(entry.id());
    }

    missing
}

/// Find entries placed in a container of a class that cannot hold them
///
/// The container's class is taken from the change-set or snapshot when the
/// container is known there, otherwise from the entry's reference.
///
/// Returns list of (entry_id, entry_kind, container_kind) tuples
pub fn find_illegal_containments(
    snapshot: &Snapshot,
    change_set: &ChangeSet,
) -> Vec<(Id, ClassKind, ClassKind)> {
    let kinds: HashMap<Id, ClassKind> = change_set.iter().map(|e| (e.id(), e.kind())).collect();
    let mut illegal = Vec::new();

    for entry in change_set {
        let declared = entry.container();
        let actual = kinds
            .get(&declared.id)
            .copied()
            .or_else(|| snapshot.get(&declared.id).ok().map(DomainNode::kind))
            .unwrap_or(declared.kind);

        if actual != declared.kind || !entry.kind().can_be_contained_by(actual) {
            illegal.push((entry.id(), entry.kind(), actual));
        }
    }

    illegal
}

/// Find subscription value sets that do not point at a sibling value set
///
/// The subscribed value set must be created by the same change-set, and
/// when the subscription is created there too, the value set must share
/// its container.
///
/// Returns list of (subscription_value_set_id, subscribed_value_set_id) tuples
pub fn find_subscription_escapes(change_set: &ChangeSet) -> Vec<(Id, Id)> {
    let mut entries: HashMap<Id, &CreateEntry> = HashMap::with_capacity(change_set.len());
    for entry in change_set {
        entries.entry(entry.id()).or_insert(entry);
    }
    let mut escapes = Vec::new();

    for entry in change_set.of_kind(ClassKind::ParameterSubscriptionValueSet) {
        let DomainNode::ParameterSubscriptionValueSet(sub_vs) = entry.payload() else {
            continue;
        };
        let subscribed = sub_vs.subscribed_value_set.id;

        let Some(target) = entries
            .get(&subscribed)
            .filter(|e| e.kind().is_subscribable_value_set())
        else {
            escapes.push((sub_vs.id, subscribed));
            continue;
        };

        if let Some(subscription) = entries.get(&sub_vs.container.id) {
            if subscription.container().id != target.container().id {
                escapes.push((sub_vs.id, subscribed));
            }
        }
    }

    escapes
}
