use modelcopy_core_types::RequestId;
use thiserror::Error;

use crate::model::{ClassKind, Id};

/// Result type alias using CopyError
pub type Result<T> = std::result::Result<T, CopyError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on without
/// depending on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Precondition
    InvalidInput,
    NotFound,
    InvalidTargetKind,

    // Change-set integrity
    AlreadyExists,
    ConstraintViolation,
    InvariantViolation,

    // Boundary
    ExternalService,
    Cancelled,

    // Integration
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidTargetKind => "ERR_INVALID_TARGET_KIND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Cancelled => "ERR_CANCELLED",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus optional context. This is the error type
/// that crosses the engine boundary and the one a `Session` reports remote
/// failures with.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    parameter: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            parameter: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Name the argument that failed a precondition
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the offending argument name, if any
    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(parameter) = &self.parameter {
            write!(f, " (parameter: {})", parameter)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for planning, assembling and applying change-sets
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CopyError {
    // ===== Precondition Errors =====
    /// A required argument was missing or unusable
    #[error("Invalid argument '{parameter}': {reason}")]
    InvalidArgument { parameter: String, reason: String },

    /// Entity is not present in the snapshot
    #[error("Entity not found: {id}")]
    NotFound { id: Id },

    /// Entity exists but is not of the requested class
    #[error("Entity {id} is a {actual}, expected {expected}")]
    WrongKind {
        id: Id,
        expected: ClassKind,
        actual: ClassKind,
    },

    // ===== Planning Errors =====
    /// A subscription value set would keep pointing outside the cloned branch
    #[error("Subscription value set {subscription_value_set_id} subscribes to {subscribed_value_set_id}, which is not a value set of the cloned branch")]
    SubscriptionOutsideSubtree {
        subscription_value_set_id: Id,
        subscribed_value_set_id: Id,
    },

    /// A child list names a node whose container is some other node
    #[error("Entity {id} is listed by {listed_by} but contained by {container_id}")]
    MisplacedChild {
        id: Id,
        listed_by: Id,
        container_id: Id,
    },

    // ===== Change-set Integrity Errors =====
    /// The same identity appears twice in one change-set
    #[error("Duplicate identity in change-set: {id}")]
    DuplicateIdentity { id: Id },

    /// A create entry reuses an identity that already exists in the store
    #[error("Identity already exists in store: {id}")]
    IdentityCollision { id: Id },

    /// A create entry names a container that is neither earlier in the change-set nor in the store
    #[error("Entry {id} is contained by {container_id}, which does not precede it and is not in the store")]
    ContainerMissing { id: Id, container_id: Id },

    /// A create entry is placed in a container of the wrong class
    #[error("A {kind} ({id}) cannot be contained by a {container_kind}")]
    IllegalContainment {
        id: Id,
        kind: ClassKind,
        container_kind: ClassKind,
    },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl CopyError {
    /// Shorthand for an `InvalidArgument` naming `parameter`
    pub fn invalid_argument(parameter: &str, reason: impl Into<String>) -> Self {
        CopyError::InvalidArgument {
            parameter: parameter.to_string(),
            reason: reason.into(),
        }
    }
}

/// Conversion from CopyError to ExError
impl From<CopyError> for ExError {
    fn from(err: CopyError) -> Self {
        match err {
            CopyError::InvalidArgument { parameter, reason } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_parameter(parameter.clone())
                    .with_message(format!("Invalid argument '{}': {}", parameter, reason))
            }

            CopyError::NotFound { id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(id.to_string())
                .with_message("Entity not found"),

            CopyError::WrongKind {
                id,
                expected,
                actual,
            } => ExError::new(ExErrorKind::InvalidTargetKind)
                .with_entity_id(id.to_string())
                .with_message(format!("Expected {}, found {}", expected, actual)),

            CopyError::SubscriptionOutsideSubtree {
                subscription_value_set_id,
                subscribed_value_set_id,
            } => ExError::new(ExErrorKind::InvariantViolation)
                .with_op("plan_copy")
                .with_entity_id(subscription_value_set_id.to_string())
                .with_message(format!(
                    "Subscribed value set {} is outside the cloned branch",
                    subscribed_value_set_id
                )),

            CopyError::MisplacedChild {
                id,
                listed_by,
                container_id,
            } => ExError::new(ExErrorKind::ConstraintViolation)
                .with_op("plan_copy")
                .with_entity_id(id.to_string())
                .with_message(format!(
                    "Listed by {} but contained by {}",
                    listed_by, container_id
                )),

            CopyError::DuplicateIdentity { id } => ExError::new(ExErrorKind::InvariantViolation)
                .with_entity_id(id.to_string())
                .with_message("Duplicate identity in change-set"),

            CopyError::IdentityCollision { id } => ExError::new(ExErrorKind::AlreadyExists)
                .with_entity_id(id.to_string())
                .with_message("Identity already exists in store"),

            CopyError::ContainerMissing { id, container_id } => {
                ExError::new(ExErrorKind::ConstraintViolation)
                    .with_entity_id(id.to_string())
                    .with_message(format!("Container {} is not available", container_id))
            }

            CopyError::IllegalContainment {
                id,
                kind,
                container_kind,
            } => ExError::new(ExErrorKind::ConstraintViolation)
                .with_entity_id(id.to_string())
                .with_message(format!(
                    "A {} cannot be contained by a {}",
                    kind, container_kind
                )),

            CopyError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to CopyError
impl From<serde_json::Error> for CopyError {
    fn from(err: serde_json::Error) -> Self {
        CopyError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_boundary_error_kind_codes() {
        let cases = [
            (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
            (ExErrorKind::ExternalService, "ERR_EXTERNAL_SERVICE"),
            (ExErrorKind::Cancelled, "ERR_CANCELLED"),
            (ExErrorKind::InvariantViolation, "ERR_INVARIANT_VIOLATION"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_invalid_argument_names_parameter() {
        let ex: ExError = CopyError::invalid_argument("target", "must be set").into();
        assert_eq!(ex.kind(), ExErrorKind::InvalidInput);
        assert_eq!(ex.parameter(), Some("target"));
        assert!(ex.to_string().contains("(parameter: target)"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        let inner = ExError::new(ExErrorKind::ExternalService).with_message("socket closed");
        let outer = ExError::new(ExErrorKind::ConstraintViolation).with_source(inner);
        let source = std::error::Error::source(&outer).expect("source should be Some");
        assert!(source.to_string().contains("socket closed"));
    }

    #[test]
    fn test_wrong_kind_message() {
        let err = CopyError::WrongKind {
            id: Uuid::nil(),
            expected: ClassKind::ElementDefinition,
            actual: ClassKind::Parameter,
        };
        assert!(err.to_string().contains("expected ElementDefinition"));
    }
}
