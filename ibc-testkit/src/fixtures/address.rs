use ibc_app_hooks::types::config::DEFAULT_BECH32_PREFIX;
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use sha2::{Digest, Sha256};
use subtle_encoding::bech32;

/// Returns a valid 20-byte account address derived from `seed`, for testing
/// purposes only!
pub fn dummy_account(seed: &str) -> Signer {
    bech32::encode(DEFAULT_BECH32_PREFIX, &Sha256::digest(seed.as_bytes())[..20]).into()
}

/// Returns a valid 32-byte contract address derived from `seed`, for testing
/// purposes only!
pub fn dummy_contract(seed: &str) -> Signer {
    let mut hasher = Sha256::new();
    hasher.update(b"contract");
    hasher.update(seed.as_bytes());
    bech32::encode(DEFAULT_BECH32_PREFIX, hasher.finalize()).into()
}

/// The account delivering packets in tests.
pub fn dummy_relayer() -> Signer {
    dummy_account("relayer")
}

/// A bech32 address of another chain.
pub fn dummy_remote_account(seed: &str) -> String {
    bech32::encode("osmo", &Sha256::digest(seed.as_bytes())[..20])
}
