use std::collections::HashSet;

use crate::errors::{CopyError, Result};
use crate::model::{
    DomainNode, EntityRef, Id, ParameterSubscription, ParameterSubscriptionValueSet,
};
use crate::snapshot::Snapshot;

use super::planner::claim_child;
use super::remapper::IdentityRemapper;

/// Rebuilds the subscriptions of one cloned parameter or override
///
/// `source` is the parameter/override being copied, `branch` its clone,
/// `siblings` the new identities of
/// the value sets cloned for it. Every rebuilt subscription value set must
/// point at one of those siblings.
pub(crate) struct SubscriptionReconstructor<'a> {
    snapshot: &'a Snapshot,
    source: Id,
    branch: EntityRef,
    siblings: HashSet<Id>,
}

impl<'a> SubscriptionReconstructor<'a> {
    pub(crate) fn new(snapshot: &'a Snapshot, source: Id, branch: EntityRef, siblings: &[Id]) -> Self {
        Self {
            snapshot,
            source,
            branch,
            siblings: siblings.iter().copied().collect(),
        }
    }

    /// Clone `subscriptions` and their value sets, in traversal order
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`WrongKind` for dangling child ids,
    /// `MisplacedChild`/`DuplicateIdentity` for child lists that disagree
    /// with containment, and `SubscriptionOutsideSubtree` if a subscribed
    /// value set is not a sibling clone.
    pub(crate) fn reconstruct(
        &self,
        remapper: &mut IdentityRemapper,
        claimed: &mut HashSet<Id>,
        subscriptions: &[Id],
    ) -> Result<Vec<DomainNode>> {
        let mut out = Vec::new();
        for old_id in subscriptions {
            let old = self.snapshot.parameter_subscription(old_id)?;
            claim_child(claimed, old.id, old.container, self.source)?;
            let mut clone = ParameterSubscription::new(remapper.new_id(old.id), self.branch, old.owner);
            clone.value_sets = remapper.new_ids(&old.value_sets);
            let container = clone.entity_ref();
            out.push(DomainNode::ParameterSubscription(clone));

            for vs_id in &old.value_sets {
                let vs = self.snapshot.parameter_subscription_value_set(vs_id)?;
                claim_child(claimed, vs.id, vs.container, old.id)?;
                out.push(self.value_set(remapper, vs, container)?);
            }
        }
        Ok(out)
    }

    fn value_set(
        &self,
        remapper: &mut IdentityRemapper,
        old: &ParameterSubscriptionValueSet,
        container: EntityRef,
    ) -> Result<DomainNode> {
        let new_id = remapper.new_id(old.id);
        let subscribed = remapper.resolve_ref(old.subscribed_value_set);

        if !self.siblings.contains(&subscribed.id) {
            return Err(CopyError::SubscriptionOutsideSubtree {
                subscription_value_set_id: old.id,
                subscribed_value_set_id: old.subscribed_value_set.id,
            });
        }

        let mut clone = ParameterSubscriptionValueSet::new(new_id, container, subscribed);
        clone.switch_kind = old.switch_kind;
        clone.manual = old.manual.clone();
        Ok(DomainNode::ParameterSubscriptionValueSet(clone))
    }
}
