//! Canonical schema constants for structured logging and events
//!
//! The lifecycle macros emit these keys; log readers and test captures look
//! fields up by them.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers
pub const FIELD_SOURCE_ID: &str = "source_id";
pub const FIELD_CONTAINER_ID: &str = "container_id";
pub const FIELD_TARGET_ID: &str = "target_id";
pub const FIELD_CHANGE_SET_ID: &str = "change_set_id";

// Collection sizes
pub const FIELD_ENTRY_COUNT: &str = "entry_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";
pub const FIELD_ERR_PARAMETER: &str = "err_parameter";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
