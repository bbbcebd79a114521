//! Element usage link construction
//!
//! Builds the single-entry change-set that places a usage of one element
//! definition inside another.

use crate::change_set::{ChangeSet, CreateEntry};
use crate::errors::{CopyError, Result};
use crate::model::{fresh_id, ClassKind, DomainNode, ElementDefinition, ElementUsage, EntityRef};

/// Validated arguments of a usage link
#[derive(Debug, Clone)]
pub struct UsageLinkRequest {
    container: ElementDefinition,
    target: ElementDefinition,
    owner: EntityRef,
}

impl UsageLinkRequest {
    /// Check the arguments, in order `container`, `target`, `owner`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` naming the first missing argument, or
    /// `owner` if it is not a domain of expertise.
    pub fn new(
        container: Option<&ElementDefinition>,
        target: Option<&ElementDefinition>,
        owner: Option<&EntityRef>,
    ) -> Result<Self> {
        let container = container
            .ok_or_else(|| CopyError::invalid_argument("container", "an element definition is required"))?;
        let target = target
            .ok_or_else(|| CopyError::invalid_argument("target", "an element definition is required"))?;
        let owner = owner
            .ok_or_else(|| CopyError::invalid_argument("owner", "a domain of expertise is required"))?;

        if owner.is_unset() {
            return Err(CopyError::invalid_argument("owner", "a domain of expertise is required"));
        }
        if owner.kind != ClassKind::DomainOfExpertise {
            return Err(CopyError::invalid_argument(
                "owner",
                format!("expected a DomainOfExpertise, got a {}", owner.kind),
            ));
        }

        Ok(Self {
            container: container.clone(),
            target: target.clone(),
            owner: *owner,
        })
    }

    pub fn container(&self) -> &ElementDefinition {
        &self.container
    }

    pub fn target(&self) -> &ElementDefinition {
        &self.target
    }

    pub fn owner(&self) -> EntityRef {
        self.owner
    }

    /// Build the one-entry change-set creating the usage
    ///
    /// The usage takes its names from the target and refers to it without
    /// cloning it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` (parameter `target`) if the target is the
    /// container itself. Only direct self-use is caught; a request sees two
    /// definitions, not the usages already in the store, so longer cycles
    /// are not detected here.
    pub fn build(&self) -> Result<ChangeSet> {
        if self.target.id == self.container.id {
            return Err(CopyError::invalid_argument(
                "target",
                "an element definition cannot use itself",
            ));
        }

        let usage = ElementUsage::new(
            fresh_id(),
            self.container.entity_ref(),
            self.owner,
            self.target.entity_ref(),
            self.target.name.clone(),
            self.target.short_name.clone(),
        );
        tracing::debug!(
            usage_id = %usage.id,
            container_id = %self.container.id,
            target_id = %self.target.id,
            "built element usage"
        );

        Ok(ChangeSet::from_entries(vec![CreateEntry::from_node(
            DomainNode::ElementUsage(usage),
        )]))
    }
}
