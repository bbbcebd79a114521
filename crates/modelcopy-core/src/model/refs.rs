use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a domain entity
pub type Id = Uuid;

/// Generate a fresh identity (UUID v7, time ordered)
pub fn fresh_id() -> Id {
    Uuid::now_v7()
}

/// Class tag carried by every reference and every create entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClassKind {
    Iteration,
    DomainOfExpertise,
    ElementDefinition,
    Parameter,
    ParameterValueSet,
    ElementUsage,
    ParameterOverride,
    ParameterOverrideValueSet,
    ParameterSubscription,
    ParameterSubscriptionValueSet,
}

impl ClassKind {
    /// Stable name of the class
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassKind::Iteration => "Iteration",
            ClassKind::DomainOfExpertise => "DomainOfExpertise",
            ClassKind::ElementDefinition => "ElementDefinition",
            ClassKind::Parameter => "Parameter",
            ClassKind::ParameterValueSet => "ParameterValueSet",
            ClassKind::ElementUsage => "ElementUsage",
            ClassKind::ParameterOverride => "ParameterOverride",
            ClassKind::ParameterOverrideValueSet => "ParameterOverrideValueSet",
            ClassKind::ParameterSubscription => "ParameterSubscription",
            ClassKind::ParameterSubscriptionValueSet => "ParameterSubscriptionValueSet",
        }
    }

    /// Classes an entity of this class may be contained by
    ///
    /// Iterations and domains are roots of the model and have no container.
    pub fn allowed_containers(&self) -> &'static [ClassKind] {
        match self {
            ClassKind::Iteration | ClassKind::DomainOfExpertise => &[],
            ClassKind::ElementDefinition => &[ClassKind::Iteration],
            ClassKind::Parameter | ClassKind::ElementUsage => &[ClassKind::ElementDefinition],
            ClassKind::ParameterValueSet => &[ClassKind::Parameter],
            ClassKind::ParameterOverride => &[ClassKind::ElementUsage],
            ClassKind::ParameterOverrideValueSet => &[ClassKind::ParameterOverride],
            ClassKind::ParameterSubscription => {
                &[ClassKind::Parameter, ClassKind::ParameterOverride]
            }
            ClassKind::ParameterSubscriptionValueSet => &[ClassKind::ParameterSubscription],
        }
    }

    /// Check whether `container` is a legal container class for this class
    pub fn can_be_contained_by(&self, container: ClassKind) -> bool {
        self.allowed_containers().contains(&container)
    }

    /// Whether entities of this class carry a value set a subscription may point at
    pub fn is_subscribable_value_set(&self) -> bool {
        matches!(
            self,
            ClassKind::ParameterValueSet | ClassKind::ParameterOverrideValueSet
        )
    }
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity plus class tag, the unit of reference between entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: Id,
    pub kind: ClassKind,
}

impl EntityRef {
    pub fn new(id: Id, kind: ClassKind) -> Self {
        Self { id, kind }
    }

    /// A reference whose identity was never assigned
    pub fn is_unset(&self) -> bool {
        self.id.is_nil()
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_unique() {
        assert_ne!(fresh_id(), fresh_id());
        assert!(!fresh_id().is_nil());
    }

    #[test]
    fn test_subscription_containers() {
        let kind = ClassKind::ParameterSubscription;
        assert!(kind.can_be_contained_by(ClassKind::Parameter));
        assert!(kind.can_be_contained_by(ClassKind::ParameterOverride));
        assert!(!kind.can_be_contained_by(ClassKind::ElementUsage));
    }

    #[test]
    fn test_roots_have_no_container() {
        assert!(ClassKind::Iteration.allowed_containers().is_empty());
        assert!(ClassKind::DomainOfExpertise.allowed_containers().is_empty());
    }

    #[test]
    fn test_entity_ref_display() {
        let r = EntityRef::new(Uuid::nil(), ClassKind::Parameter);
        assert!(r.is_unset());
        assert_eq!(
            r.to_string(),
            "Parameter:00000000-0000-0000-0000-000000000000"
        );
    }
}
