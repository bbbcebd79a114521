//! Immutable, ordered batch of create entries
//!
//! A `ChangeSet` is what crosses the submit boundary. It is built once by
//! the transaction assembler or the usage-link builder and never changed
//! afterwards: there are no mutating methods.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{fresh_id, ClassKind, DomainNode, EntityRef, Id};

/// One "create" operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateEntry {
    kind: ClassKind,
    id: Id,
    container: EntityRef,
    payload: DomainNode,
}

impl CreateEntry {
    pub(crate) fn from_node(payload: DomainNode) -> Self {
        Self {
            kind: payload.kind(),
            id: payload.id(),
            container: payload.container(),
            payload,
        }
    }

    /// Class of the created entity
    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    /// Fresh identity of the created entity
    pub fn id(&self) -> Id {
        self.id
    }

    /// Container the entity is created in
    pub fn container(&self) -> EntityRef {
        self.container
    }

    /// Full field payload
    pub fn payload(&self) -> &DomainNode {
        &self.payload
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.id, self.kind)
    }
}

/// Ordered list of create entries, containers before their content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeSet {
    id: Id,
    entries: Vec<CreateEntry>,
}

impl ChangeSet {
    pub(crate) fn from_entries(entries: Vec<CreateEntry>) -> Self {
        Self {
            id: fresh_id(),
            entries,
        }
    }

    /// Correlation identity of this change-set
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn entries(&self) -> &[CreateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CreateEntry> {
        self.entries.iter()
    }

    /// Identities created by this change-set, in order
    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.entries.iter().map(CreateEntry::id)
    }

    /// Identities created by this change-set, as a set
    pub fn id_set(&self) -> HashSet<Id> {
        self.ids().collect()
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.entries.iter().any(|e| e.id == *id)
    }

    pub fn get(&self, id: &Id) -> Option<&CreateEntry> {
        self.entries.iter().find(|e| e.id == *id)
    }

    /// Position of an entry, used to check container-before-content order
    pub fn position(&self, id: &Id) -> Option<usize> {
        self.entries.iter().position(|e| e.id == *id)
    }

    /// Entries creating entities of one class
    pub fn of_kind(&self, kind: ClassKind) -> impl Iterator<Item = &CreateEntry> + '_ {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    pub fn count_of_kind(&self, kind: ClassKind) -> usize {
        self.of_kind(kind).count()
    }

    /// References of every created entity
    pub fn created(&self) -> Vec<EntityRef> {
        self.entries.iter().map(CreateEntry::entity_ref).collect()
    }

    /// Render as pretty JSON for inspection
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_json(&self) -> crate::errors::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a CreateEntry;
    type IntoIter = std::slice::Iter<'a, CreateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
