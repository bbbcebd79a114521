pub mod element_definition;
pub mod node;
pub mod parameter;
pub mod refs;
pub mod subscription;
pub mod usage;
pub mod values;

pub use element_definition::ElementDefinition;
pub use node::DomainNode;
pub use parameter::{Parameter, ParameterValueSet};
pub use refs::{fresh_id, ClassKind, EntityRef, Id};
pub use subscription::{ParameterSubscription, ParameterSubscriptionValueSet};
pub use usage::{ElementUsage, ParameterOverride, ParameterOverrideValueSet};
pub use values::{ParameterSwitchKind, ValueSetValues, DEFAULT_VALUE};
