use modelcopy_core::model::{fresh_id, ClassKind, EntityRef, Id, ValueSetValues};
use modelcopy_core::{Snapshot, SnapshotBuilder};

/// Ids of the nodes built by [`scenario`]
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub owner: EntityRef,
    pub subscriber: EntityRef,
    pub source: Id,
    pub parameter: Id,
    pub value_set: Id,
    pub subscription: Id,
    pub subscription_value_set: Id,
    pub target: Option<Target>,
}

/// The used definition and the usage branch of the source
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub definition: Id,
    pub parameter: Id,
    pub value_set: Id,
    pub usage: Id,
    pub parameter_override: Id,
    pub override_value_set: Id,
    pub override_subscription: Id,
    pub override_subscription_value_set: Id,
}

#[allow(dead_code)]
pub fn domain() -> EntityRef {
    EntityRef::new(fresh_id(), ClassKind::DomainOfExpertise)
}

/// Published values distinct from the other arrays
#[allow(dead_code)]
pub fn published_values() -> ValueSetValues {
    let mut values = ValueSetValues::with_len(1);
    values.manual = vec!["12.5".to_string()];
    values.published = vec!["11.0".to_string()];
    values
}

/// Definition with one parameter, one value set, one subscription and one
/// subscription value set; with `with_usage`, also a usage of a second
/// definition with one override carrying the same shape
#[allow(dead_code)]
pub fn scenario(with_usage: bool) -> (Snapshot, Scenario) {
    let owner = domain();
    let subscriber = domain();
    let mut b = SnapshotBuilder::new(fresh_id());

    let source = b.element_definition("Battery", "BAT", owner).unwrap();
    let parameter = b.parameter(source, owner, fresh_id()).unwrap();
    let value_set = b.value_set(parameter, published_values()).unwrap();
    let subscription = b.subscription(parameter, subscriber).unwrap();
    let subscription_value_set = b.subscription_value_set(subscription, value_set).unwrap();

    let target = with_usage.then(|| {
        let definition = b.element_definition("Cell", "CEL", owner).unwrap();
        let target_parameter = b.parameter(definition, owner, fresh_id()).unwrap();
        let target_value_set = b.value_set(target_parameter, published_values()).unwrap();
        let usage = b.element_usage(source, definition, owner).unwrap();
        let parameter_override = b.parameter_override(usage, target_parameter, owner).unwrap();
        let override_value_set = b
            .override_value_set(parameter_override, target_value_set, published_values())
            .unwrap();
        let override_subscription = b.subscription(parameter_override, subscriber).unwrap();
        let override_subscription_value_set = b
            .subscription_value_set(override_subscription, override_value_set)
            .unwrap();
        Target {
            definition,
            parameter: target_parameter,
            value_set: target_value_set,
            usage,
            parameter_override,
            override_value_set,
            override_subscription,
            override_subscription_value_set,
        }
    });

    let ids = Scenario {
        owner,
        subscriber,
        source,
        parameter,
        value_set,
        subscription,
        subscription_value_set,
        target,
    };
    (b.build(), ids)
}
