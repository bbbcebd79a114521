//! Command handlers
//!
//! Each handler checks its arguments, builds a change-set with the core and
//! submits it through a session, emitting one start and one end/error event.

pub mod copy;
pub mod engine_command;
pub mod usage;

pub use copy::copy_element_definition;
pub use engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use usage::create_element_usage;
