//! ModelCopy Core - subtree copy and usage linking over a domain-object graph
//!
//! This crate provides:
//! - The closed domain node model and read-only snapshots
//! - The copy pipeline: identity remapping, planning, subscription
//!   reconstruction and change-set assembly
//! - Usage-link change-sets
//! - Change-set validation and the functional `apply` boundary
//! - The structured error and logging facilities shared with the engine
//!
//! Nothing in this crate performs I/O; submitting a change-set is the
//! engine's concern.

pub mod apply;
pub mod change_set;
pub mod copy;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;
pub mod snapshot;
pub mod usage_link;

pub use modelcopy_core_types::schema;

// Re-export commonly used types
pub use apply::apply;
pub use change_set::{ChangeSet, CreateEntry};
pub use copy::{copy_change_set, CopyOptions, PublishedValuePolicy};
pub use errors::{CopyError, ExError, ExErrorKind, Result};
pub use model::{ClassKind, DomainNode, EntityRef, Id};
pub use rules::validate_change_set;
pub use snapshot::{Snapshot, SnapshotBuilder};
pub use usage_link::UsageLinkRequest;
