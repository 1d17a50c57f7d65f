//! Governance-controlled parameters of the hooks middleware.
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use serde::{Deserialize, Serialize};

use crate::error::HooksError;

#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Contracts allowed to defer the acknowledgement of the packets they receive.
    #[serde(default)]
    pub allowed_async_ack_contracts: Vec<Signer>,
}

impl Params {
    pub fn new(allowed_async_ack_contracts: Vec<Signer>) -> Self {
        Self {
            allowed_async_ack_contracts,
        }
    }

    pub fn is_allowed(&self, contract: &Signer) -> bool {
        self.allowed_async_ack_contracts.contains(contract)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, HooksError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, HooksError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
