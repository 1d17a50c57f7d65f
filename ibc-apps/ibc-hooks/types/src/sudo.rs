//! Messages exchanged with contracts through their privileged `sudo` entry point,
//! and the contract responses the middleware understands.
use ibc_core::host::types::identifiers::{ChannelId, Sequence};
use ibc_core::primitives::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ack::{base64_bytes, ContractAck};
use crate::error::HooksError;

/// Outcome of an outbound packet, delivered to the contract that asked for a
/// callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IbcLifecycleComplete {
    IbcAck {
        channel: String,
        sequence: u64,
        /// Raw acknowledgement bytes, base64 encoded.
        #[serde(with = "base64_bytes")]
        ack: Vec<u8>,
        success: bool,
    },
    IbcTimeout {
        channel: String,
        sequence: u64,
    },
}

impl IbcLifecycleComplete {
    pub fn ack(channel: &ChannelId, sequence: Sequence, ack: &[u8], success: bool) -> Self {
        Self::IbcAck {
            channel: channel.to_string(),
            sequence: sequence.value(),
            ack: ack.to_vec(),
            success,
        }
    }

    pub fn timeout(channel: &ChannelId, sequence: Sequence) -> Self {
        Self::IbcTimeout {
            channel: channel.to_string(),
            sequence: sequence.value(),
        }
    }
}

/// `{"ibc_lifecycle_complete": ...}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbcLifecycleCompleteMsg {
    pub ibc_lifecycle_complete: IbcLifecycleComplete,
}

impl From<IbcLifecycleComplete> for IbcLifecycleCompleteMsg {
    fn from(ibc_lifecycle_complete: IbcLifecycleComplete) -> Self {
        Self {
            ibc_lifecycle_complete,
        }
    }
}

/// Asks the async ack actor of a received packet for its acknowledgement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IbcAsync {
    RequestAck {
        packet_sequence: u64,
        source_channel: String,
    },
}

/// `{"ibc_async": ...}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbcAsyncMsg {
    pub ibc_async: IbcAsync,
}

impl IbcAsyncMsg {
    pub fn request_ack(channel: &ChannelId, sequence: Sequence) -> Self {
        Self {
            ibc_async: IbcAsync::RequestAck {
                packet_sequence: sequence.value(),
                source_channel: channel.to_string(),
            },
        }
    }
}

/// The acknowledgement a contract hands back when asked for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AsyncAckResponse {
    AckResponse {
        contract_ack: ContractAck,
    },
    AckError {
        error_description: String,
        #[serde(default)]
        error_response: String,
    },
}

impl AsyncAckResponse {
    pub fn from_slice(response: &[u8]) -> Result<Self, HooksError> {
        serde_json::from_slice(response).map_err(|e| HooksError::BadResponse {
            reason: format!("cannot parse async ack response: {e}"),
        })
    }
}

/// Shape of an execute response that defers the acknowledgement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnRecvPacketAsyncAckResponse {
    #[serde(default)]
    pub is_async_ack: bool,
}

impl OnRecvPacketAsyncAckResponse {
    /// Whether a contract response requests a deferred acknowledgement.
    /// Responses that are not JSON objects never do.
    pub fn requested(response: &[u8]) -> bool {
        serde_json::from_slice::<Self>(response)
            .map(|r| r.is_async_ack)
            .unwrap_or(false)
    }
}

/// Serializes a sudo or execute message.
pub fn to_json_bytes<T: Serialize>(msg: &T) -> Result<Vec<u8>, HooksError> {
    Ok(serde_json::to_vec(msg)?)
}
