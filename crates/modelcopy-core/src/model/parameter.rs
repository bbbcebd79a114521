use serde::{Deserialize, Serialize};

use super::refs::{ClassKind, EntityRef, Id};
use super::values::ValueSetValues;

/// Parameter - a property of an element definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: Id,

    /// Element definition owning this parameter
    pub container: EntityRef,

    /// Owning domain of expertise
    pub owner: EntityRef,

    /// Parameter type from the reference data library (never cloned)
    pub parameter_type: Id,

    /// Measurement scale from the reference data library (never cloned)
    pub scale: Option<Id>,

    pub value_sets: Vec<Id>,

    /// Subscriptions other domains hold on this parameter
    pub subscriptions: Vec<Id>,
}

impl Parameter {
    pub fn new(id: Id, container: EntityRef, owner: EntityRef, parameter_type: Id) -> Self {
        Self {
            id,
            container,
            owner,
            parameter_type,
            scale: None,
            value_sets: Vec::new(),
            subscriptions: Vec::new(),
        }
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.id, ClassKind::Parameter)
    }
}

/// Value set of a parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterValueSet {
    pub id: Id,
    pub container: EntityRef,
    pub values: ValueSetValues,
}

impl ParameterValueSet {
    pub fn new(id: Id, container: EntityRef, values: ValueSetValues) -> Self {
        Self {
            id,
            container,
            values,
        }
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.id, ClassKind::ParameterValueSet)
    }
}
