//! Copy an element definition and submit the clone

use std::time::Instant;

use modelcopy_core::copy::{copy_change_set, CopyOptions};
use modelcopy_core::errors::CopyError;
use modelcopy_core::model::Id;
use modelcopy_core::Snapshot;
use modelcopy_core_types::RequestId;
use tokio_util::sync::CancellationToken;

use crate::errors::{self, Result};
use crate::session::{Session, WriteReceipt};

const OP: &str = "copy_element_definition";

/// Copy `source` with its parameters (and, per `options`, its usages) and
/// submit the result as one change-set
///
/// Arguments are checked in the order `source`, `session` before the
/// snapshot is read. `cancel` is honoured only up to the submit; once the
/// change-set is handed over the write runs to completion.
///
/// # Errors
///
/// - `ERR_INVALID_INPUT` naming `source` or `session`
/// - `ERR_NOT_FOUND` / `ERR_INVALID_TARGET_KIND` if `source` is not a definition
/// - `ERR_INVARIANT_VIOLATION` if a subscription cannot be kept inside the copy
/// - `ERR_CANCELLED` if `cancel` fired before the submit
/// - whatever the session returns, unchanged
pub async fn copy_element_definition(
    snapshot: &Snapshot,
    source: Option<Id>,
    options: &CopyOptions,
    session: Option<&dyn Session>,
    cancel: Option<&CancellationToken>,
) -> Result<WriteReceipt> {
    let request_id = RequestId::new();
    let start = Instant::now();
    let source_label = source.map(|id| id.to_string()).unwrap_or_default();
    modelcopy_core::log_op_start!(
        OP,
        request_id = request_id.as_str(),
        source_id = source_label.as_str(),
        include_usages = options.include_usages
    );

    let result = run(snapshot, source, options, session, cancel, &request_id).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(receipt) => {
            modelcopy_core::log_op_end!(
                OP,
                duration_ms = duration_ms,
                request_id = request_id.as_str(),
                change_set_id = %receipt.change_set_id,
                entry_count = receipt.created.len()
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
    snapshot: &Snapshot,
    source: Option<Id>,
    options: &CopyOptions,
    session: Option<&dyn Session>,
    cancel: Option<&CancellationToken>,
    request_id: &RequestId,
) -> Result<WriteReceipt> {
    let source = source.filter(|id| !id.is_nil()).ok_or_else(|| {
        errors::precondition(
            OP,
            request_id,
            CopyError::invalid_argument("source", "an element definition id is required"),
        )
    })?;
    let session = session.ok_or_else(|| errors::missing_argument(OP, "session", request_id))?;

    let change_set = copy_change_set(snapshot, Some(source), options)
        .map_err(|e| errors::precondition(OP, request_id, e))?;

    if cancel.is_some_and(CancellationToken::is_cancelled) {
        return Err(errors::cancelled(OP, request_id));
    }
    session.write(change_set).await
}
