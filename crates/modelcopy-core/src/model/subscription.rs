use serde::{Deserialize, Serialize};

use super::refs::{ClassKind, EntityRef, Id};
use super::values::ParameterSwitchKind;

/// Parameter Subscription - a secondary domain's view onto a parameter or override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSubscription {
    pub id: Id,

    /// Parameter or parameter override the subscription decorates
    pub container: EntityRef,

    /// Subscribing domain of expertise
    pub owner: EntityRef,

    pub value_sets: Vec<Id>,
}

impl ParameterSubscription {
    pub fn new(id: Id, container: EntityRef, owner: EntityRef) -> Self {
        Self {
            id,
            container,
            owner,
            value_sets: Vec::new(),
        }
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.id, ClassKind::ParameterSubscription)
    }
}

/// Value set of a subscription
///
/// `subscribed_value_set` must name a value set of the same parameter or
/// override that contains the owning subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSubscriptionValueSet {
    pub id: Id,
    pub container: EntityRef,
    pub subscribed_value_set: EntityRef,
    pub switch_kind: ParameterSwitchKind,
    pub manual: Vec<String>,
}

impl ParameterSubscriptionValueSet {
    pub fn new(id: Id, container: EntityRef, subscribed_value_set: EntityRef) -> Self {
        Self {
            id,
            container,
            subscribed_value_set,
            switch_kind: ParameterSwitchKind::Computed,
            manual: Vec::new(),
        }
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.id, ClassKind::ParameterSubscriptionValueSet)
    }
}
