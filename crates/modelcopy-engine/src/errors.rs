use modelcopy_core::errors::{ExError, ExErrorKind};
use modelcopy_core_types::RequestId;

/// Result type of every engine operation
pub type Result<T> = std::result::Result<T, ExError>;

/// A required argument was not supplied
pub fn missing_argument(op: &str, parameter: &str, request_id: &RequestId) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op(op)
        .with_parameter(parameter)
        .with_request_id(request_id.clone())
        .with_message(format!("Invalid argument '{}': a value is required", parameter))
}

/// The caller cancelled before the change-set was handed to the session
pub fn cancelled(op: &str, request_id: &RequestId) -> ExError {
    ExError::new(ExErrorKind::Cancelled)
        .with_op(op)
        .with_request_id(request_id.clone())
        .with_message("cancelled before submit")
}

/// Attach operation context to a core error
pub fn precondition(op: &str, request_id: &RequestId, err: modelcopy_core::CopyError) -> ExError {
    ExError::from(err)
        .with_op(op)
        .with_request_id(request_id.clone())
}
