//! Defines the messages and query responses of the hooks middleware

use ibc_core::host::types::identifiers::{ChannelId, Sequence};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use serde::{Deserialize, Serialize};

use crate::address::validate_address;
use crate::error::HooksError;
use crate::params::Params;

/// Replaces the module parameters. Only the configured authority may send it.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateParams {
    pub authority: Signer,
    pub params: Params,
}

impl MsgUpdateParams {
    pub fn new(allowed_async_ack_contracts: Vec<Signer>, authority: Signer) -> Self {
        Self {
            authority,
            params: Params::new(allowed_async_ack_contracts),
        }
    }

    /// Stateless checks: the authority and every allow-listed contract must be
    /// local addresses.
    pub fn validate_basic(&self, bech32_prefix: &str) -> Result<(), HooksError> {
        validate_address(self.authority.as_ref(), bech32_prefix)?;
        for contract in &self.params.allowed_async_ack_contracts {
            validate_address(contract.as_ref(), bech32_prefix)?;
        }
        Ok(())
    }
}

/// Asks the async ack actor of a received packet for its acknowledgement and
/// writes it to the channel.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgEmitIbcAck {
    /// Must be the contract registered as the packet's async ack actor.
    pub sender: Signer,
    pub packet_sequence: u64,
    /// The local channel the packet was received on.
    pub channel: ChannelId,
}

impl MsgEmitIbcAck {
    pub fn new(sender: Signer, channel: ChannelId, packet_sequence: Sequence) -> Self {
        Self {
            sender,
            packet_sequence: packet_sequence.value(),
            channel,
        }
    }

    pub fn sequence(&self) -> Sequence {
        Sequence::from(self.packet_sequence)
    }

    pub fn validate_basic(&self, bech32_prefix: &str) -> Result<(), HooksError> {
        validate_address(self.sender.as_ref(), bech32_prefix)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgEmitIbcAckResponse {
    /// Result payload of the written acknowledgement, empty on an error ack.
    pub contract_result: String,
    /// The acknowledgement bytes written to the channel.
    pub ibc_ack: Vec<u8>,
}

#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParamsResponse {
    pub params: Params,
}
