use serde::{Deserialize, Serialize};

use super::element_definition::ElementDefinition;
use super::parameter::{Parameter, ParameterValueSet};
use super::refs::{ClassKind, EntityRef, Id};
use super::subscription::{ParameterSubscription, ParameterSubscriptionValueSet};
use super::usage::{ElementUsage, ParameterOverride, ParameterOverrideValueSet};

/// Closed set of entity kinds the copy engine reads and produces
///
/// Every consumer matches exhaustively, so adding a kind is a compile error
/// everywhere a decision about it has to be made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "classKind")]
pub enum DomainNode {
    ElementDefinition(ElementDefinition),
    Parameter(Parameter),
    ParameterValueSet(ParameterValueSet),
    ElementUsage(ElementUsage),
    ParameterOverride(ParameterOverride),
    ParameterOverrideValueSet(ParameterOverrideValueSet),
    ParameterSubscription(ParameterSubscription),
    ParameterSubscriptionValueSet(ParameterSubscriptionValueSet),
}

impl DomainNode {
    pub fn id(&self) -> Id {
        match self {
            DomainNode::ElementDefinition(n) => n.id,
            DomainNode::Parameter(n) => n.id,
            DomainNode::ParameterValueSet(n) => n.id,
            DomainNode::ElementUsage(n) => n.id,
            DomainNode::ParameterOverride(n) => n.id,
            DomainNode::ParameterOverrideValueSet(n) => n.id,
            DomainNode::ParameterSubscription(n) => n.id,
            DomainNode::ParameterSubscriptionValueSet(n) => n.id,
        }
    }

    pub fn kind(&self) -> ClassKind {
        match self {
            DomainNode::ElementDefinition(_) => ClassKind::ElementDefinition,
            DomainNode::Parameter(_) => ClassKind::Parameter,
            DomainNode::ParameterValueSet(_) => ClassKind::ParameterValueSet,
            DomainNode::ElementUsage(_) => ClassKind::ElementUsage,
            DomainNode::ParameterOverride(_) => ClassKind::ParameterOverride,
            DomainNode::ParameterOverrideValueSet(_) => ClassKind::ParameterOverrideValueSet,
            DomainNode::ParameterSubscription(_) => ClassKind::ParameterSubscription,
            DomainNode::ParameterSubscriptionValueSet(_) => {
                ClassKind::ParameterSubscriptionValueSet
            }
        }
    }

    /// The entity this node is contained by
    pub fn container(&self) -> EntityRef {
        match self {
            DomainNode::ElementDefinition(n) => n.container,
            DomainNode::Parameter(n) => n.container,
            DomainNode::ParameterValueSet(n) => n.container,
            DomainNode::ElementUsage(n) => n.container,
            DomainNode::ParameterOverride(n) => n.container,
            DomainNode::ParameterOverrideValueSet(n) => n.container,
            DomainNode::ParameterSubscription(n) => n.container,
            DomainNode::ParameterSubscriptionValueSet(n) => n.container,
        }
    }

    /// Reference to this node
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.id(), self.kind())
    }

    /// Identities of the nodes this node contains, in model order
    pub fn children(&self) -> Vec<Id> {
        match self {
            DomainNode::ElementDefinition(n) => n
                .parameters
                .iter()
                .chain(n.contained_elements.iter())
                .copied()
                .collect(),
            DomainNode::Parameter(n) => n
                .value_sets
                .iter()
                .chain(n.subscriptions.iter())
                .copied()
                .collect(),
            DomainNode::ElementUsage(n) => n.parameter_overrides.clone(),
            DomainNode::ParameterOverride(n) => n
                .value_sets
                .iter()
                .chain(n.subscriptions.iter())
                .copied()
                .collect(),
            DomainNode::ParameterSubscription(n) => n.value_sets.clone(),
            DomainNode::ParameterValueSet(_)
            | DomainNode::ParameterOverrideValueSet(_)
            | DomainNode::ParameterSubscriptionValueSet(_) => Vec::new(),
        }
    }

    /// Record `child` in the matching child list of this node
    ///
    /// Already-listed children are left alone. Returns `false` if a child of
    /// that class cannot live in this node.
    pub fn attach_child(&mut self, child: EntityRef) -> bool {
        let list = match (self, child.kind) {
            (DomainNode::ElementDefinition(n), ClassKind::Parameter) => &mut n.parameters,
            (DomainNode::ElementDefinition(n), ClassKind::ElementUsage) => {
                &mut n.contained_elements
            }
            (DomainNode::Parameter(n), ClassKind::ParameterValueSet) => &mut n.value_sets,
            (DomainNode::Parameter(n), ClassKind::ParameterSubscription) => &mut n.subscriptions,
            (DomainNode::ElementUsage(n), ClassKind::ParameterOverride) => {
                &mut n.parameter_overrides
            }
            (DomainNode::ParameterOverride(n), ClassKind::ParameterOverrideValueSet) => {
                &mut n.value_sets
            }
            (DomainNode::ParameterOverride(n), ClassKind::ParameterSubscription) => {
                &mut n.subscriptions
            }
            (DomainNode::ParameterSubscription(n), ClassKind::ParameterSubscriptionValueSet) => {
                &mut n.value_sets
            }
            _ => return false,
        };

        if !list.contains(&child.id) {
            list.push(child.id);
        }
        true
    }
}
