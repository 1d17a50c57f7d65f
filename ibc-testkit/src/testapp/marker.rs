use alloc::sync::Arc;

use ibc_app_hooks::context::MarkerKeeper;
use ibc_app_hooks::types::error::HooksError;
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use parking_lot::Mutex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerGrant {
    pub denom: String,
    pub transfer_auths: Vec<Signer>,
    pub allow_force_transfer: bool,
}

/// Records the transfer authorities granted to markers.
#[derive(Clone, Debug, Default)]
pub struct MockMarkerKeeper {
    pub grants: Arc<Mutex<Vec<MarkerGrant>>>,
    /// Makes every grant fail.
    pub fail: bool,
}

impl MockMarkerKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn grants(&self) -> Vec<MarkerGrant> {
        self.grants.lock().clone()
    }
}

impl MarkerKeeper for MockMarkerKeeper {
    fn grant_transfer_authorities(
        &mut self,
        denom: &str,
        transfer_auths: &[Signer],
        allow_force_transfer: bool,
    ) -> Result<(), HooksError> {
        if self.fail {
            return Err(HooksError::Other(format!("marker for {denom} not found")));
        }
        self.grants.lock().push(MarkerGrant {
            denom: denom.to_string(),
            transfer_auths: transfer_auths.to_vec(),
            allow_force_transfer,
        });
        Ok(())
    }
}
