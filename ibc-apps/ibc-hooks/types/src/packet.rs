//! Contains the ICS-20 packet payload as seen by the hooks middleware

use ibc_core::primitives::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::HooksError;

/// The JSON payload of an ICS-20 fungible token transfer packet.
///
/// The amount is kept as the decimal string found on the wire, and `memo` is
/// omitted when empty so that the re-serialized payload stays readable by
/// counterparties that predate the memo field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPacketData {
    pub denom: String,
    pub amount: String,
    pub sender: String,
    pub receiver: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memo: String,
}

impl TransferPacketData {
    pub fn to_bytes(&self) -> Result<Vec<u8>, HooksError> {
        serde_json::to_vec(self).map_err(|e| HooksError::Marshaling {
            reason: format!("ics20 packet data: {e}"),
        })
    }
}

/// Interprets packet bytes as an ICS-20 transfer payload.
///
/// Never fails: anything that does not decode, or carries a blank denom, is
/// simply not a transfer packet and is left for the default application.
pub fn is_transfer_packet(data: &[u8]) -> Option<TransferPacketData> {
    let data: TransferPacketData = serde_json::from_slice(data).ok()?;
    if data.denom.trim().is_empty() {
        return None;
    }
    Some(data)
}
