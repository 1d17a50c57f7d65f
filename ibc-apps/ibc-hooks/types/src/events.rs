//! Defines all events emitted by the hooks middleware
use derive_more::Display;
use ibc_core::host::types::identifiers::{ChannelId, Sequence};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use ibc_core::router::types::event::{ModuleEvent, ModuleEventAttribute};

use crate::MODULE_ID_STR;

const EVENT_TYPE_ACK_ERROR: &str = "ibc-acknowledgement-error";
const EVENT_TYPE_ACK_CALLBACK_ERROR: &str = "ibc-ack-callback-error";
const EVENT_TYPE_TIMEOUT_CALLBACK_ERROR: &str = "ibc-timeout-callback-error";
const EVENT_TYPE_PARAMS_UPDATED: &str = "params-updated";
const EVENT_TYPE_ASYNC_ACK: &str = "ibc-async-ack-emitted";

/// Emitted whenever the middleware answers a packet with an error acknowledgement.
pub struct ErrorAcknowledgementEvent {
    pub error: String,
    pub contexts: Vec<String>,
}

impl From<ErrorAcknowledgementEvent> for ModuleEvent {
    fn from(ev: ErrorAcknowledgementEvent) -> Self {
        let ErrorAcknowledgementEvent { error, contexts } = ev;
        let mut attributes: Vec<ModuleEventAttribute> = vec![("error", error).into()];
        attributes.extend(contexts.into_iter().map(|c| ("error-context", c).into()));
        Self {
            kind: EVENT_TYPE_ACK_ERROR.to_string(),
            attributes,
        }
    }
}

/// Which lifecycle notification failed to reach its contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum CallbackKind {
    #[display(fmt = "ack")]
    Ack,
    #[display(fmt = "timeout")]
    Timeout,
}

/// Emitted when a callback contract rejects its lifecycle notification. The
/// packet outcome stands regardless.
pub struct CallbackErrorEvent {
    pub kind: CallbackKind,
    pub contract: Signer,
    pub message: String,
    pub error: String,
}

impl From<CallbackErrorEvent> for ModuleEvent {
    fn from(ev: CallbackErrorEvent) -> Self {
        let CallbackErrorEvent {
            kind,
            contract,
            message,
            error,
        } = ev;
        let kind = match kind {
            CallbackKind::Ack => EVENT_TYPE_ACK_CALLBACK_ERROR,
            CallbackKind::Timeout => EVENT_TYPE_TIMEOUT_CALLBACK_ERROR,
        };
        Self {
            kind: kind.to_string(),
            attributes: vec![
                ("contract", contract).into(),
                ("message", message).into(),
                ("error", error).into(),
            ],
        }
    }
}

pub struct ParamsUpdatedEvent {
    pub allowed_async_ack_contracts: Vec<Signer>,
}

impl From<ParamsUpdatedEvent> for ModuleEvent {
    fn from(ev: ParamsUpdatedEvent) -> Self {
        let contracts = ev
            .allowed_async_ack_contracts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Self {
            kind: EVENT_TYPE_PARAMS_UPDATED.to_string(),
            attributes: vec![
                ("module", MODULE_ID_STR).into(),
                ("allowed_async_ack_contracts", contracts).into(),
            ],
        }
    }
}

pub struct AsyncAckEmittedEvent {
    pub contract: Signer,
    pub channel: ChannelId,
    pub sequence: Sequence,
    pub success: bool,
}

impl From<AsyncAckEmittedEvent> for ModuleEvent {
    fn from(ev: AsyncAckEmittedEvent) -> Self {
        let AsyncAckEmittedEvent {
            contract,
            channel,
            sequence,
            success,
        } = ev;
        Self {
            kind: EVENT_TYPE_ASYNC_ACK.to_string(),
            attributes: vec![
                ("module", MODULE_ID_STR).into(),
                ("contract", contract).into(),
                ("channel", channel).into(),
                ("sequence", sequence).into(),
                ("success", success).into(),
            ],
        }
    }
}
