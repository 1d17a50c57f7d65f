use ibc_core::host::types::identifiers::ChannelId;
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use sha2::{Digest, Sha256};
use subtle_encoding::bech32;

use crate::error::HooksError;
use crate::SENDER_PREFIX;

/// Decodes a bech32 account address and checks it carries the chain's
/// human-readable prefix. Returns the raw address bytes.
pub fn validate_address(address: &str, bech32_prefix: &str) -> Result<Vec<u8>, HooksError> {
    let (hrp, bytes) = bech32::decode(address).map_err(|e| HooksError::InvalidAddress {
        address: address.to_string(),
        reason: format!("{e:?}"),
    })?;
    if hrp != bech32_prefix {
        return Err(HooksError::InvalidAddress {
            address: address.to_string(),
            reason: format!("expected prefix `{bech32_prefix}`, got `{hrp}`"),
        });
    }
    if bytes.is_empty() {
        return Err(HooksError::InvalidAddress {
            address: address.to_string(),
            reason: "empty address bytes".to_string(),
        });
    }
    Ok(bytes)
}

/// Derives the local custodial address that receives the funds of a
/// wasm-routed transfer before the contract is called.
///
/// The address is `sha256(sha256(SENDER_PREFIX) || "{channel}/{sender}")`,
/// bech32-encoded with the chain prefix. It depends only on its inputs, so the
/// same remote sender on the same channel always maps to the same account,
/// while a contract never sees itself credited funds it was not sent.
pub fn derive_intermediate_sender(
    channel_id: &ChannelId,
    original_sender: &str,
    bech32_prefix: &str,
) -> Signer {
    let type_hash = Sha256::digest(SENDER_PREFIX.as_bytes());

    let mut hasher = Sha256::new();
    hasher.update(type_hash);
    hasher.update(format!("{channel_id}/{original_sender}").as_bytes());
    let address = hasher.finalize();

    bech32::encode(bech32_prefix, address).into()
}
