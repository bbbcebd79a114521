use std::collections::HashSet;

use crate::errors::{CopyError, Result};
use crate::model::{
    DomainNode, ElementDefinition, ElementUsage, EntityRef, Id, Parameter, ParameterOverride,
    ParameterOverrideValueSet, ParameterValueSet,
};
use crate::snapshot::Snapshot;

use super::options::CopyOptions;
use super::remapper::IdentityRemapper;
use super::subscriptions::SubscriptionReconstructor;

/// Cloned nodes of one copy call, in traversal order, with their mapping
#[derive(Debug)]
pub struct PlannedGraph {
    root: EntityRef,
    nodes: Vec<DomainNode>,
    remapper: IdentityRemapper,
}

impl PlannedGraph {
    /// The cloned element definition
    pub fn root(&self) -> EntityRef {
        self.root
    }

    pub fn nodes(&self) -> &[DomainNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn remapper(&self) -> &IdentityRemapper {
        &self.remapper
    }

    pub(crate) fn into_nodes(self) -> (EntityRef, Vec<DomainNode>) {
        (self.root, self.nodes)
    }
}

/// Plan the clone of the element definition `source`
///
/// Walks the definition, its parameters, their value sets and
/// subscriptions, and (with `include_usages`) its usages and their
/// overrides. Usage targets, overridden parameters, shadowed value sets,
/// owners, parameter types and scales stay foreign.
///
/// # Errors
///
/// - `InvalidArgument` (parameter `source`) if `source` is `None` or nil
/// - `NotFound` / `WrongKind` if `source` or a child id does not resolve
/// - `SubscriptionOutsideSubtree` if a subscription points outside its branch
/// - `MisplacedChild` if a child list names a node contained elsewhere
/// - `DuplicateIdentity` if a node is reached through more than one child list entry
pub fn plan(snapshot: &Snapshot, source: Option<Id>, options: &CopyOptions) -> Result<PlannedGraph> {
    let source = match source {
        Some(id) if !id.is_nil() => id,
        _ => {
            return Err(CopyError::invalid_argument(
                "source",
                "an element definition id is required",
            ))
        }
    };
    let definition = snapshot.element_definition(&source)?;

    let mut planner = Planner {
        snapshot,
        options,
        remapper: IdentityRemapper::new(),
        claimed: HashSet::new(),
        nodes: Vec::new(),
    };
    let root = planner.element_definition(definition)?;

    tracing::debug!(
        source_id = %source,
        root_id = %root.id,
        node_count = planner.nodes.len(),
        include_usages = options.include_usages,
        "planned element definition copy"
    );

    Ok(PlannedGraph {
        root,
        nodes: planner.nodes,
        remapper: planner.remapper,
    })
}

struct Planner<'a> {
    snapshot: &'a Snapshot,
    options: &'a CopyOptions,
    remapper: IdentityRemapper,
    claimed: HashSet<Id>,
    nodes: Vec<DomainNode>,
}

/// Record `id` as cloned through the child list of `listed_by`
///
/// A node is cloned once, and only from the list of its own container.
pub(super) fn claim_child(
    claimed: &mut HashSet<Id>,
    id: Id,
    container: EntityRef,
    listed_by: Id,
) -> Result<()> {
    if container.id != listed_by {
        return Err(CopyError::MisplacedChild {
            id,
            listed_by,
            container_id: container.id,
        });
    }
    if !claimed.insert(id) {
        return Err(CopyError::DuplicateIdentity { id });
    }
    Ok(())
}

impl Planner<'_> {
    fn element_definition(&mut self, old: &ElementDefinition) -> Result<EntityRef> {
        self.claimed.insert(old.id);
        let mut clone = ElementDefinition::new(
            self.remapper.new_id(old.id),
            old.container,
            old.owner,
            self.options.copied_name(&old.name),
            old.short_name.clone(),
        );
        clone.parameters = self.remapper.new_ids(&old.parameters);
        if self.options.include_usages {
            clone.contained_elements = self.remapper.new_ids(&old.contained_elements);
        }
        let container = clone.entity_ref();
        self.nodes.push(DomainNode::ElementDefinition(clone));

        for id in &old.parameters {
            self.parameter(id, old.id, container)?;
        }
        if self.options.include_usages {
            for id in &old.contained_elements {
                self.element_usage(id, old.id, container)?;
            }
        }
        Ok(container)
    }

    fn parameter(&mut self, old_id: &Id, listed_by: Id, container: EntityRef) -> Result<()> {
        let old = self.snapshot.parameter(old_id)?;
        claim_child(&mut self.claimed, old.id, old.container, listed_by)?;
        let mut clone = Parameter::new(
            self.remapper.new_id(old.id),
            container,
            old.owner,
            old.parameter_type,
        );
        clone.scale = old.scale;
        clone.value_sets = self.remapper.new_ids(&old.value_sets);
        clone.subscriptions = self.remapper.new_ids(&old.subscriptions);
        let branch = clone.entity_ref();
        let siblings = clone.value_sets.clone();
        self.nodes.push(DomainNode::Parameter(clone));

        for vs_id in &old.value_sets {
            let vs = self.snapshot.parameter_value_set(vs_id)?;
            claim_child(&mut self.claimed, vs.id, vs.container, old.id)?;
            let values = self.options.published_values.apply(&vs.values);
            let clone = ParameterValueSet::new(self.remapper.new_id(vs.id), branch, values);
            self.nodes.push(DomainNode::ParameterValueSet(clone));
        }

        let rebuilt = SubscriptionReconstructor::new(self.snapshot, old.id, branch, &siblings)
            .reconstruct(&mut self.remapper, &mut self.claimed, &old.subscriptions)?;
        self.nodes.extend(rebuilt);
        Ok(())
    }

    fn element_usage(&mut self, old_id: &Id, listed_by: Id, container: EntityRef) -> Result<()> {
        let old = self.snapshot.element_usage(old_id)?;
        claim_child(&mut self.claimed, old.id, old.container, listed_by)?;
        let mut clone = ElementUsage::new(
            self.remapper.new_id(old.id),
            container,
            old.owner,
            old.element_definition,
            old.name.clone(),
            old.short_name.clone(),
        );
        clone.parameter_overrides = self.remapper.new_ids(&old.parameter_overrides);
        let usage = clone.entity_ref();
        self.nodes.push(DomainNode::ElementUsage(clone));

        for id in &old.parameter_overrides {
            self.parameter_override(id, old.id, usage)?;
        }
        Ok(())
    }

    fn parameter_override(&mut self, old_id: &Id, listed_by: Id, container: EntityRef) -> Result<()> {
        let old = self.snapshot.parameter_override(old_id)?;
        claim_child(&mut self.claimed, old.id, old.container, listed_by)?;
        let mut clone = ParameterOverride::new(
            self.remapper.new_id(old.id),
            container,
            old.owner,
            old.parameter,
        );
        clone.value_sets = self.remapper.new_ids(&old.value_sets);
        clone.subscriptions = self.remapper.new_ids(&old.subscriptions);
        let branch = clone.entity_ref();
        let siblings = clone.value_sets.clone();
        self.nodes.push(DomainNode::ParameterOverride(clone));

        for vs_id in &old.value_sets {
            let vs = self.snapshot.parameter_override_value_set(vs_id)?;
            claim_child(&mut self.claimed, vs.id, vs.container, old.id)?;
            let clone = ParameterOverrideValueSet::new(
                self.remapper.new_id(vs.id),
                branch,
                vs.parameter_value_set,
                self.options.published_values.apply(&vs.values),
            );
            self.nodes.push(DomainNode::ParameterOverrideValueSet(clone));
        }

        let rebuilt = SubscriptionReconstructor::new(self.snapshot, old.id, branch, &siblings)
            .reconstruct(&mut self.remapper, &mut self.claimed, &old.subscriptions)?;
        self.nodes.extend(rebuilt);
        Ok(())
    }
}
