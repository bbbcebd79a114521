//! Incremental construction of consistent snapshots
//!
//! Every method inserts one node with a fresh identity and links it into its
//! container, so child lists and container references always agree.

use crate::errors::Result;
use crate::model::{
    fresh_id, ClassKind, DomainNode, ElementDefinition, ElementUsage, EntityRef, Id, Parameter,
    ParameterOverride, ParameterOverrideValueSet, ParameterSubscription,
    ParameterSubscriptionValueSet, ParameterValueSet, ValueSetValues,
};

use super::Snapshot;

/// Builder for a snapshot scoped to one iteration
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    iteration: EntityRef,
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    /// Start an empty snapshot for the given iteration
    pub fn new(iteration: Id) -> Self {
        Self {
            iteration: EntityRef::new(iteration, ClassKind::Iteration),
            snapshot: Snapshot::new(),
        }
    }

    /// The iteration every element definition is placed in
    pub fn iteration(&self) -> EntityRef {
        self.iteration
    }

    /// Add an element definition
    ///
    /// # Errors
    ///
    /// Returns `IdentityCollision` if the generated identity is already taken.
    pub fn element_definition(
        &mut self,
        name: &str,
        short_name: &str,
        owner: EntityRef,
    ) -> Result<Id> {
        let node = ElementDefinition::new(
            fresh_id(),
            self.iteration,
            owner,
            name.to_string(),
            short_name.to_string(),
        );
        self.insert(DomainNode::ElementDefinition(node))
    }

    /// Add a parameter to an element definition
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`WrongKind` if `definition` is not an element definition.
    pub fn parameter(&mut self, definition: Id, owner: EntityRef, parameter_type: Id) -> Result<Id> {
        let container = self.snapshot.element_definition(&definition)?.entity_ref();
        let node = Parameter::new(fresh_id(), container, owner, parameter_type);
        self.insert(DomainNode::Parameter(node))
    }

    /// Add a value set to a parameter
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`WrongKind` if `parameter` is not a parameter.
    pub fn value_set(&mut self, parameter: Id, values: ValueSetValues) -> Result<Id> {
        let container = self.snapshot.parameter(&parameter)?.entity_ref();
        let node = ParameterValueSet::new(fresh_id(), container, values);
        self.insert(DomainNode::ParameterValueSet(node))
    }

    /// Add a subscription to a parameter or parameter override
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, `WrongKind` if `subscribed` is neither a
    /// parameter nor a parameter override.
    pub fn subscription(&mut self, subscribed: Id, owner: EntityRef) -> Result<Id> {
        let container = match self.snapshot.get(&subscribed)? {
            DomainNode::Parameter(p) => p.entity_ref(),
            _ => self.snapshot.parameter_override(&subscribed)?.entity_ref(),
        };
        let node = ParameterSubscription::new(fresh_id(), container, owner);
        self.insert(DomainNode::ParameterSubscription(node))
    }

    /// Add a subscription value set pointing at `subscribed_value_set`
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`WrongKind` if `subscription` is not a subscription
    /// or `subscribed_value_set` is not a parameter or override value set.
    pub fn subscription_value_set(
        &mut self,
        subscription: Id,
        subscribed_value_set: Id,
    ) -> Result<Id> {
        let container = self
            .snapshot
            .parameter_subscription(&subscription)?
            .entity_ref();
        let subscribed = match self.snapshot.get(&subscribed_value_set)? {
            DomainNode::ParameterValueSet(vs) => vs.entity_ref(),
            _ => self
                .snapshot
                .parameter_override_value_set(&subscribed_value_set)?
                .entity_ref(),
        };
        let node = ParameterSubscriptionValueSet::new(fresh_id(), container, subscribed);
        self.insert(DomainNode::ParameterSubscriptionValueSet(node))
    }

    /// Add a usage of `target` inside `container`
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`WrongKind` if either id is not an element definition.
    pub fn element_usage(&mut self, container: Id, target: Id, owner: EntityRef) -> Result<Id> {
        let container = self.snapshot.element_definition(&container)?.entity_ref();
        let target = self.snapshot.element_definition(&target)?;
        let node = ElementUsage::new(
            fresh_id(),
            container,
            owner,
            target.entity_ref(),
            target.name.clone(),
            target.short_name.clone(),
        );
        self.insert(DomainNode::ElementUsage(node))
    }

    /// Override `parameter` on `usage`
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`WrongKind` if the ids are not a usage and a parameter.
    pub fn parameter_override(&mut self, usage: Id, parameter: Id, owner: EntityRef) -> Result<Id> {
        let container = self.snapshot.element_usage(&usage)?.entity_ref();
        let parameter = self.snapshot.parameter(&parameter)?.entity_ref();
        let node = ParameterOverride::new(fresh_id(), container, owner, parameter);
        self.insert(DomainNode::ParameterOverride(node))
    }

    /// Add a value set to an override, shadowing `parameter_value_set`
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`WrongKind` if the ids are not an override and a
    /// parameter value set.
    pub fn override_value_set(
        &mut self,
        parameter_override: Id,
        parameter_value_set: Id,
        values: ValueSetValues,
    ) -> Result<Id> {
        let container = self
            .snapshot
            .parameter_override(&parameter_override)?
            .entity_ref();
        let shadowed = self
            .snapshot
            .parameter_value_set(&parameter_value_set)?
            .entity_ref();
        let node = ParameterOverrideValueSet::new(fresh_id(), container, shadowed, values);
        self.insert(DomainNode::ParameterOverrideValueSet(node))
    }

    /// Finish building
    pub fn build(self) -> Snapshot {
        self.snapshot
    }

    fn insert(&mut self, node: DomainNode) -> Result<Id> {
        let id = node.id();
        self.snapshot.insert_contained(node)?;
        Ok(id)
    }
}
