use std::collections::HashMap;

use crate::model::{fresh_id, EntityRef, Id};

/// Old-to-new identity mapping for a single copy call
///
/// Every owned node gets exactly one fresh identity, no matter how many
/// times it is reached. Anything never passed to `new_id` is foreign and
/// resolves to itself.
#[derive(Debug, Default)]
pub struct IdentityRemapper {
    mapping: HashMap<Id, Id>,
}

impl IdentityRemapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh identity for `old`, allocated on first use
    pub fn new_id(&mut self, old: Id) -> Id {
        *self.mapping.entry(old).or_insert_with(fresh_id)
    }

    /// New identity of `old` if it was remapped in this call, else `old`
    pub fn resolve(&self, old: Id) -> Id {
        self.mapping.get(&old).copied().unwrap_or(old)
    }

    /// `resolve` applied to a reference, keeping its class
    pub fn resolve_ref(&self, old: EntityRef) -> EntityRef {
        EntityRef::new(self.resolve(old.id), old.kind)
    }

    pub fn is_remapped(&self, old: &Id) -> bool {
        self.mapping.contains_key(old)
    }

    /// Map a child list, allocating fresh identities
    pub(crate) fn new_ids(&mut self, old: &[Id]) -> Vec<Id> {
        old.iter().map(|id| self.new_id(*id)).collect()
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}
