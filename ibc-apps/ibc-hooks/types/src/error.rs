//! Defines the hooks middleware error type
use displaydoc::Display;
use ibc_app_transfer_types::error::TokenTransferError;
use ibc_core::channel::types::acknowledgement::StatusValue;
use ibc_core::host::types::identifiers::{ChannelId, Sequence};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;

#[derive(Display, Debug)]
pub enum HooksError {
    /// error in wasm metadata format `{memo}`: `{reason}`
    BadMetadataFormat { memo: String, reason: String },
    /// invalid address `{address}`: `{reason}`
    InvalidAddress { address: String, reason: String },
    /// marshaling error: `{reason}`
    Marshaling { reason: String },
    /// invalid packet data: `{reason}`
    InvalidPacket { reason: String },
    /// error executing contract: `{description}`
    WasmError { description: String },
    /// contract execution panicked: `{description}`
    ContractPanic { description: String },
    /// contract `{contract}` is not allowed to send async acknowledgements
    AsyncAckNotAllowed { contract: Signer },
    /// bad contract response: `{reason}`
    BadResponse { reason: String },
    /// unauthorized params update: expected authority `{expected}`, got `{actual}`; proposal rejected
    UnauthorizedParamsUpdate { expected: Signer, actual: Signer },
    /// no async ack actor registered for channel `{channel}` and sequence `{sequence}`
    AckActorNotFound {
        channel: ChannelId,
        sequence: Sequence,
    },
    /// sender `{sender}` is not the async ack actor `{actor}`
    UnauthorizedAckActor { sender: Signer, actor: Signer },
    /// no received packet stored for channel `{channel}` and sequence `{sequence}`
    ReceivedPacketNotFound {
        channel: ChannelId,
        sequence: Sequence,
    },
    /// marker transfer authority grant failed: `{description}`
    MarkerGrant { description: String },
    /// invalid acknowledgement: `{reason}`
    InvalidAcknowledgement { reason: String },
    /// application error: `{description}`
    App { description: String },
    /// channel error: `{description}`
    Channel { description: String },
    /// other error: `{0}`
    Other(String),
}

#[cfg(feature = "std")]
impl std::error::Error for HooksError {}

impl From<TokenTransferError> for HooksError {
    fn from(err: TokenTransferError) -> Self {
        Self::InvalidPacket {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for HooksError {
    fn from(err: serde_json::Error) -> Self {
        Self::Marshaling {
            reason: err.to_string(),
        }
    }
}

impl From<HooksError> for StatusValue {
    fn from(err: HooksError) -> Self {
        StatusValue::new(err.to_string()).expect("error message must not be empty")
    }
}
