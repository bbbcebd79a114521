use serde::{Deserialize, Serialize};

use super::refs::{ClassKind, EntityRef, Id};
use super::values::ValueSetValues;

/// Element Usage - one element definition used inside another
///
/// `element_definition` is the used definition. It lives outside whatever
/// subtree contains the usage and is never cloned along with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementUsage {
    pub id: Id,

    /// Element definition the usage is contained by
    pub container: EntityRef,

    pub owner: EntityRef,

    /// The definition being used
    pub element_definition: EntityRef,

    pub name: String,
    pub short_name: String,

    pub parameter_overrides: Vec<Id>,
}

impl ElementUsage {
    pub fn new(
        id: Id,
        container: EntityRef,
        owner: EntityRef,
        element_definition: EntityRef,
        name: String,
        short_name: String,
    ) -> Self {
        Self {
            id,
            container,
            owner,
            element_definition,
            name,
            short_name,
            parameter_overrides: Vec::new(),
        }
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.id, ClassKind::ElementUsage)
    }
}

/// Parameter Override - the overridden value of a used definition's parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterOverride {
    pub id: Id,

    /// Element usage the override is contained by
    pub container: EntityRef,

    pub owner: EntityRef,

    /// Parameter of the used definition being overridden
    pub parameter: EntityRef,

    pub value_sets: Vec<Id>,
    pub subscriptions: Vec<Id>,
}

impl ParameterOverride {
    pub fn new(id: Id, container: EntityRef, owner: EntityRef, parameter: EntityRef) -> Self {
        Self {
            id,
            container,
            owner,
            parameter,
            value_sets: Vec::new(),
            subscriptions: Vec::new(),
        }
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.id, ClassKind::ParameterOverride)
    }
}

/// Value set of a parameter override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterOverrideValueSet {
    pub id: Id,
    pub container: EntityRef,

    /// Value set of the overridden parameter this one shadows
    pub parameter_value_set: EntityRef,

    pub values: ValueSetValues,
}

impl ParameterOverrideValueSet {
    pub fn new(
        id: Id,
        container: EntityRef,
        parameter_value_set: EntityRef,
        values: ValueSetValues,
    ) -> Self {
        Self {
            id,
            container,
            parameter_value_set,
            values,
        }
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.id, ClassKind::ParameterOverrideValueSet)
    }
}
