use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::primitives::prelude::*;
use tracing::error;

use crate::context::HooksStoreContext;
use crate::types::ack::error_acknowledgement;
use crate::types::error::HooksError;
use crate::types::events::ErrorAcknowledgementEvent;

/// Builds the error acknowledgement for `err` after emitting an
/// `ibc-acknowledgement-error` event that carries the error and its contexts.
pub fn emit_error_acknowledgement(
    store: &mut impl HooksStoreContext,
    err: HooksError,
    contexts: &[&str],
) -> Acknowledgement {
    for context in contexts {
        error!(target: "ibchooks", error_context = %context, "ibc-acknowledgement-error");
        store.log_message(format!("error-context: {context}"));
    }
    store.emit_event(
        ErrorAcknowledgementEvent {
            error: err.to_string(),
            contexts: contexts.iter().map(ToString::to_string).collect(),
        }
        .into(),
    );
    error_acknowledgement(&err)
}
