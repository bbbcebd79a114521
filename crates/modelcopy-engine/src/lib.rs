//! ModelCopy Engine - command boundary
//!
//! Runs the core's synchronous copy and usage-link builders and submits the
//! resulting change-set through a [`Session`]. This is the only layer that
//! awaits, and the only one that owns lifecycle logging.

pub mod commands;
pub mod errors;
pub mod session;

pub use commands::{
    apply_engine_command, copy_element_definition, create_element_usage, EngineCommand,
    EngineCommandResult,
};
pub use errors::Result;
pub use session::{MemorySession, Session, WriteReceipt};
