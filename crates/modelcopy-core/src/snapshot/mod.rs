//! Read-only object snapshot keyed by identity
//!
//! The copy engine receives a `Snapshot` explicitly and only ever reads it.
//! Mutation is limited to crate-internal insertion used by `apply()` and the
//! `SnapshotBuilder`.

pub mod builder;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CopyError, Result};
use crate::model::{
    ClassKind, DomainNode, ElementDefinition, ElementUsage, Id, Parameter,
    ParameterOverride, ParameterOverrideValueSet, ParameterSubscription,
    ParameterSubscriptionValueSet, ParameterValueSet,
};

pub use builder::SnapshotBuilder;

/// Identity-keyed view of the domain graph
///
/// Serialized as a flat list of nodes; deserialization rejects duplicate
/// identities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<DomainNode>", try_from = "Vec<DomainNode>")]
pub struct Snapshot {
    things: BTreeMap<Id, DomainNode>,
}

impl Snapshot {
    /// Create a new empty Snapshot
    pub fn new() -> Self {
        Self {
            things: BTreeMap::new(),
        }
    }

    /// Build a snapshot from nodes, rejecting duplicate identities
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIdentity` if two nodes share an id.
    pub fn from_nodes(nodes: impl IntoIterator<Item = DomainNode>) -> Result<Self> {
        let mut snapshot = Self::new();
        for node in nodes {
            let id = node.id();
            if snapshot.things.insert(id, node).is_some() {
                return Err(CopyError::DuplicateIdentity { id });
            }
        }
        Ok(snapshot)
    }

    /// Parse a snapshot from its JSON node list
    ///
    /// # Errors
    ///
    /// Returns `Serialization` on malformed JSON or duplicate identities.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the snapshot as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get any node by identity
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is not in the snapshot.
    pub fn get(&self, id: &Id) -> Result<&DomainNode> {
        self.things.get(id).ok_or(CopyError::NotFound { id: *id })
    }

    /// Get an element definition by identity
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, `WrongKind` if the node is another class.
    pub fn element_definition(&self, id: &Id) -> Result<&ElementDefinition> {
        match self.get(id)? {
            DomainNode::ElementDefinition(n) => Ok(n),
            other => Err(wrong_kind(id, ClassKind::ElementDefinition, other)),
        }
    }

    /// Get a parameter by identity
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, `WrongKind` if the node is another class.
    pub fn parameter(&self, id: &Id) -> Result<&Parameter> {
        match self.get(id)? {
            DomainNode::Parameter(n) => Ok(n),
            other => Err(wrong_kind(id, ClassKind::Parameter, other)),
        }
    }

    /// Get a parameter value set by identity
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, `WrongKind` if the node is another class.
    pub fn parameter_value_set(&self, id: &Id) -> Result<&ParameterValueSet> {
        match self.get(id)? {
            DomainNode::ParameterValueSet(n) => Ok(n),
            other => Err(wrong_kind(id, ClassKind::ParameterValueSet, other)),
        }
    }

    /// Get an element usage by identity
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, `WrongKind` if the node is another class.
    pub fn element_usage(&self, id: &Id) -> Result<&ElementUsage> {
        match self.get(id)? {
            DomainNode::ElementUsage(n) => Ok(n),
            other => Err(wrong_kind(id, ClassKind::ElementUsage, other)),
        }
    }

    /// Get a parameter override by identity
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, `WrongKind` if the node is another class.
    pub fn parameter_override(&self, id: &Id) -> Result<&ParameterOverride> {
        match self.get(id)? {
            DomainNode::ParameterOverride(n) => Ok(n),
            other => Err(wrong_kind(id, ClassKind::ParameterOverride, other)),
        }
    }

    /// Get a parameter override value set by identity
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, `WrongKind` if the node is another class.
    pub fn parameter_override_value_set(&self, id: &Id) -> Result<&ParameterOverrideValueSet> {
        match self.get(id)? {
            DomainNode::ParameterOverrideValueSet(n) => Ok(n),
            other => Err(wrong_kind(id, ClassKind::ParameterOverrideValueSet, other)),
        }
    }

    /// Get a parameter subscription by identity
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, `WrongKind` if the node is another class.
    pub fn parameter_subscription(&self, id: &Id) -> Result<&ParameterSubscription> {
        match self.get(id)? {
            DomainNode::ParameterSubscription(n) => Ok(n),
            other => Err(wrong_kind(id, ClassKind::ParameterSubscription, other)),
        }
    }

    /// Get a parameter subscription value set by identity
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, `WrongKind` if the node is another class.
    pub fn parameter_subscription_value_set(
        &self,
        id: &Id,
    ) -> Result<&ParameterSubscriptionValueSet> {
        match self.get(id)? {
            DomainNode::ParameterSubscriptionValueSet(n) => Ok(n),
            other => Err(wrong_kind(id, ClassKind::ParameterSubscriptionValueSet, other)),
        }
    }

    /// Check if an identity is present
    pub fn contains(&self, id: &Id) -> bool {
        self.things.contains_key(id)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.things.len()
    }

    pub fn is_empty(&self) -> bool {
        self.things.is_empty()
    }

    /// Iterate over all nodes in identity order
    pub fn iter(&self) -> impl Iterator<Item = &DomainNode> {
        self.things.values()
    }

    /// Count nodes of one class
    pub fn count_of_kind(&self, kind: ClassKind) -> usize {
        self.iter().filter(|n| n.kind() == kind).count()
    }

    /// Insert a node and record it in its container's child list
    ///
    /// Containers of class `Iteration` sit outside the snapshot and are not
    /// looked up. The caller is responsible for having validated the node.
    ///
    /// # Errors
    ///
    /// Returns `IdentityCollision` if the id is taken, `ContainerMissing` if
    /// the container is not in the snapshot, and `IllegalContainment` if the
    /// container cannot hold a node of this class.
    pub(crate) fn insert_contained(&mut self, node: DomainNode) -> Result<()> {
        let id = node.id();
        if self.things.contains_key(&id) {
            return Err(CopyError::IdentityCollision { id });
        }

        let child = node.entity_ref();
        let container = node.container();
        if container.kind != ClassKind::Iteration {
            let parent = self
                .things
                .get_mut(&container.id)
                .ok_or(CopyError::ContainerMissing {
                    id,
                    container_id: container.id,
                })?;
            if !parent.attach_child(child) {
                return Err(CopyError::IllegalContainment {
                    id,
                    kind: child.kind,
                    container_kind: parent.kind(),
                });
            }
        }

        self.things.insert(id, node);
        Ok(())
    }
}

fn wrong_kind(id: &Id, expected: ClassKind, actual: &DomainNode) -> CopyError {
    CopyError::WrongKind {
        id: *id,
        expected,
        actual: actual.kind(),
    }
}

impl From<Snapshot> for Vec<DomainNode> {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.things.into_values().collect()
    }
}

impl TryFrom<Vec<DomainNode>> for Snapshot {
    type Error = CopyError;

    fn try_from(nodes: Vec<DomainNode>) -> Result<Self> {
        Snapshot::from_nodes(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{fresh_id, EntityRef, ValueSetValues};

    fn owner() -> EntityRef {
        EntityRef::new(fresh_id(), ClassKind::DomainOfExpertise)
    }

    fn definition() -> ElementDefinition {
        ElementDefinition::new(
            fresh_id(),
            EntityRef::new(fresh_id(), ClassKind::Iteration),
            owner(),
            "Battery".to_string(),
            "BAT".to_string(),
        )
    }

    #[test]
    fn test_new_snapshot() {
        let snapshot = Snapshot::new();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
    }

    #[test]
    fn test_get_nonexistent() {
        let snapshot = Snapshot::new();
        let id = fresh_id();
        assert!(matches!(
            snapshot.get(&id),
            Err(CopyError::NotFound { id: missing }) if missing == id
        ));
    }

    #[test]
    fn test_typed_getter_wrong_kind() {
        let def = definition();
        let id = def.id;
        let snapshot = Snapshot::from_nodes([DomainNode::ElementDefinition(def)]).unwrap();

        assert!(snapshot.element_definition(&id).is_ok());
        assert!(matches!(
            snapshot.parameter(&id),
            Err(CopyError::WrongKind {
                expected: ClassKind::Parameter,
                actual: ClassKind::ElementDefinition,
                ..
            })
        ));
    }

    #[test]
    fn test_from_nodes_rejects_duplicates() {
        let def = definition();
        let result = Snapshot::from_nodes([
            DomainNode::ElementDefinition(def.clone()),
            DomainNode::ElementDefinition(def),
        ]);
        assert!(matches!(result, Err(CopyError::DuplicateIdentity { .. })));
    }

    #[test]
    fn test_insert_contained_links_parent() {
        let def = definition();
        let def_ref = def.entity_ref();
        let mut snapshot = Snapshot::from_nodes([DomainNode::ElementDefinition(def)]).unwrap();

        let param = Parameter::new(fresh_id(), def_ref, owner(), fresh_id());
        let param_id = param.id;
        snapshot
            .insert_contained(DomainNode::Parameter(param))
            .unwrap();

        let def = snapshot.element_definition(&def_ref.id).unwrap();
        assert_eq!(def.parameters, vec![param_id]);
    }

    #[test]
    fn test_insert_contained_rejects_illegal_container() {
        let def = definition();
        let def_ref = def.entity_ref();
        let mut snapshot = Snapshot::from_nodes([DomainNode::ElementDefinition(def)]).unwrap();

        let vs = ParameterValueSet::new(fresh_id(), def_ref, ValueSetValues::default());
        let result = snapshot.insert_contained(DomainNode::ParameterValueSet(vs));

        assert!(matches!(
            result,
            Err(CopyError::IllegalContainment {
                container_kind: ClassKind::ElementDefinition,
                ..
            })
        ));
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_json_round_trip() {
        let def = definition();
        let snapshot = Snapshot::from_nodes([DomainNode::ElementDefinition(def)]).unwrap();

        let json = snapshot.to_json().unwrap();
        let back = Snapshot::from_json(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
