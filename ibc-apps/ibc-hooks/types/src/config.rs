//! Static configuration of the hooks middleware.
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle_encoding::bech32;

use crate::IBC_CALLBACK_KEY;

/// Account address prefix used when none is configured.
pub const DEFAULT_BECH32_PREFIX: &str = "cosmos";

/// Name of the governance module, whose account is the default authority.
pub const GOV_MODULE_NAME: &str = "gov";

/// Returns the account address of a module: the first 20 bytes of
/// `sha256(name)`, bech32 encoded.
pub fn module_address(name: &str, bech32_prefix: &str) -> Signer {
    bech32::encode(bech32_prefix, &Sha256::digest(name.as_bytes())[..20]).into()
}

/// When `authority` is omitted it defaults to the governance module account
/// under the configured prefix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawHooksConfig")]
pub struct HooksConfig {
    /// Human-readable part of local account addresses.
    pub bech32_prefix: String,
    /// Memo key under which an outbound transfer names its callback contract.
    pub callback_key: String,
    /// The only account allowed to update the module parameters.
    pub authority: Signer,
}

impl HooksConfig {
    pub fn new(bech32_prefix: impl Into<String>) -> Self {
        let bech32_prefix = bech32_prefix.into();
        let authority = module_address(GOV_MODULE_NAME, &bech32_prefix);
        Self {
            bech32_prefix,
            callback_key: IBC_CALLBACK_KEY.to_string(),
            authority,
        }
    }

    pub fn with_authority(mut self, authority: Signer) -> Self {
        self.authority = authority;
        self
    }

    pub fn with_callback_key(mut self, callback_key: impl Into<String>) -> Self {
        self.callback_key = callback_key.into();
        self
    }
}

#[derive(Deserialize)]
struct RawHooksConfig {
    #[serde(default = "default_bech32_prefix")]
    bech32_prefix: String,
    #[serde(default = "default_callback_key")]
    callback_key: String,
    #[serde(default)]
    authority: Option<Signer>,
}

fn default_bech32_prefix() -> String {
    DEFAULT_BECH32_PREFIX.to_string()
}

fn default_callback_key() -> String {
    IBC_CALLBACK_KEY.to_string()
}

impl From<RawHooksConfig> for HooksConfig {
    fn from(raw: RawHooksConfig) -> Self {
        let config = Self::new(raw.bech32_prefix).with_callback_key(raw.callback_key);
        match raw.authority {
            Some(authority) => config.with_authority(authority),
            None => config,
        }
    }
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BECH32_PREFIX)
    }
}
