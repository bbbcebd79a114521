use std::collections::HashMap;

use crate::change_set::{ChangeSet, CreateEntry};
use crate::model::{DomainNode, Id};

use super::planner::PlannedGraph;

/// Package a planned graph as one change-set, containers before content
///
/// Entries are emitted in pre-order from the cloned definition, following
/// each node's child lists. Nodes no child list reaches keep their planned
/// order at the end.
pub fn assemble(planned: PlannedGraph) -> ChangeSet {
    let (root, nodes) = planned.into_nodes();
    let order: Vec<Id> = nodes.iter().map(DomainNode::id).collect();
    let mut pending: HashMap<Id, DomainNode> = nodes.into_iter().map(|n| (n.id(), n)).collect();

    let mut entries = Vec::with_capacity(order.len());
    let mut stack = vec![root.id];
    while let Some(id) = stack.pop() {
        let Some(node) = pending.remove(&id) else {
            continue;
        };
        stack.extend(node.children().into_iter().rev());
        entries.push(CreateEntry::from_node(node));
    }

    for id in order {
        if let Some(node) = pending.remove(&id) {
            entries.push(CreateEntry::from_node(node));
        }
    }

    let change_set = ChangeSet::from_entries(entries);
    tracing::debug!(
        change_set_id = %change_set.id(),
        entry_count = change_set.len(),
        "assembled change-set"
    );
    change_set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy::{plan, CopyOptions};
    use crate::model::{fresh_id, ClassKind, EntityRef, ValueSetValues};
    use crate::snapshot::SnapshotBuilder;

    #[test]
    fn test_containers_precede_content() {
        let owner = EntityRef::new(fresh_id(), ClassKind::DomainOfExpertise);
        let mut b = SnapshotBuilder::new(fresh_id());
        let def = b.element_definition("Battery", "BAT", owner).unwrap();
        for _ in 0..3 {
            let p = b.parameter(def, owner, fresh_id()).unwrap();
            let vs = b.value_set(p, ValueSetValues::default()).unwrap();
            let s = b.subscription(p, owner).unwrap();
            b.subscription_value_set(s, vs).unwrap();
        }
        let snapshot = b.build();

        let cs = assemble(plan(&snapshot, Some(def), &CopyOptions::default()).unwrap());

        assert_eq!(cs.len(), 13);
        assert_eq!(cs.entries()[0].kind(), ClassKind::ElementDefinition);
        for (i, entry) in cs.iter().enumerate().skip(1) {
            let container = cs.position(&entry.container().id).expect("container in change-set");
            assert!(container < i, "{} placed before its container", entry.kind());
        }
    }
}
