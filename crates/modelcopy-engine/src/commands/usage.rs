//! Link an element definition into another as a usage

use std::time::Instant;

use modelcopy_core::model::{ElementDefinition, EntityRef};
use modelcopy_core::UsageLinkRequest;
use modelcopy_core_types::RequestId;
use tokio_util::sync::CancellationToken;

use crate::errors::{self, Result};
use crate::session::{Session, WriteReceipt};

const OP: &str = "create_element_usage";

/// Create a usage of `target` inside `container`, owned by `owner`
///
/// Arguments are checked in the order `container`, `target`, `owner`,
/// `session`, before anything is built or sent.
///
/// # Errors
///
/// - `ERR_INVALID_INPUT` naming the first missing argument, `owner` if it is
///   not a domain of expertise, or `target` if it equals `container`
/// - `ERR_CANCELLED` if `cancel` fired before the submit
/// - whatever the session returns, unchanged
pub async fn create_element_usage(
    container: Option<&ElementDefinition>,
    target: Option<&ElementDefinition>,
    owner: Option<&EntityRef>,
    session: Option<&dyn Session>,
    cancel: Option<&CancellationToken>,
) -> Result<WriteReceipt> {
    let request_id = RequestId::new();
    let start = Instant::now();
    let container_label = container.map(|c| c.id.to_string()).unwrap_or_default();
    let target_label = target.map(|t| t.id.to_string()).unwrap_or_default();
    modelcopy_core::log_op_start!(
        OP,
        request_id = request_id.as_str(),
        container_id = container_label.as_str(),
        target_id = target_label.as_str()
    );

    let result = run(container, target, owner, session, cancel, &request_id).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(receipt) => {
            modelcopy_core::log_op_end!(
                OP,
                duration_ms = duration_ms,
                request_id = request_id.as_str(),
                change_set_id = %receipt.change_set_id
            );
        }
        Err(e) => {
            modelcopy_core::log_op_error!(
                OP,
                e.clone(),
                duration_ms = duration_ms,
                request_id = request_id.as_str()
            );
        }
    }
    result
}

async fn run(
    container: Option<&ElementDefinition>,
    target: Option<&ElementDefinition>,
    owner: Option<&EntityRef>,
    session: Option<&dyn Session>,
    cancel: Option<&CancellationToken>,
    request_id: &RequestId,
) -> Result<WriteReceipt> {
    let request = UsageLinkRequest::new(container, target, owner)
        .map_err(|e| errors::precondition(OP, request_id, e))?;
    let session = session.ok_or_else(|| errors::missing_argument(OP, "session", request_id))?;

    let change_set = request
        .build()
        .map_err(|e| errors::precondition(OP, request_id, e))?;

    if cancel.is_some_and(CancellationToken::is_cancelled) {
        return Err(errors::cancelled(OP, request_id));
    }
    session.write(change_set).await
}
