use serde::{Deserialize, Serialize};

use super::refs::{ClassKind, EntityRef, Id};

/// Element Definition - a reusable definition of a system element
///
/// Owns parameters and the element usages through which other definitions
/// are used inside it. Child lists hold identities; the nodes themselves
/// live in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDefinition {
    /// Unique identifier
    pub id: Id,

    /// Iteration the definition lives in
    pub container: EntityRef,

    /// Owning domain of expertise
    pub owner: EntityRef,

    /// Human-readable name
    pub name: String,

    /// Short name, unique per iteration in the source model
    pub short_name: String,

    /// Parameters owned by this definition
    pub parameters: Vec<Id>,

    /// Element usages contained by this definition
    pub contained_elements: Vec<Id>,
}

impl ElementDefinition {
    pub fn new(
        id: Id,
        container: EntityRef,
        owner: EntityRef,
        name: String,
        short_name: String,
    ) -> Self {
        Self {
            id,
            container,
            owner,
            name,
            short_name,
            parameters: Vec::new(),
            contained_elements: Vec::new(),
        }
    }

    /// Reference to this definition
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.id, ClassKind::ElementDefinition)
    }

    /// Check if this definition uses other definitions
    pub fn has_usages(&self) -> bool {
        !self.contained_elements.is_empty()
    }
}
