use alloc::collections::BTreeMap;
use alloc::sync::Arc;

use ibc_app_hooks::types::error::HooksError;
use ibc_core::primitives::prelude::*;
use parking_lot::Mutex;

/// Balances keyed by `(address, denom)`.
#[derive(Clone, Debug, Default)]
pub struct MockBank {
    pub balances: Arc<Mutex<BTreeMap<(String, String), u128>>>,
}

impl MockBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, address: &str, denom: &str) -> u128 {
        self.balances
            .lock()
            .get(&(address.to_string(), denom.to_string()))
            .copied()
            .unwrap_or_default()
    }

    pub fn mint(&self, address: &str, denom: &str, amount: u128) {
        *self
            .balances
            .lock()
            .entry((address.to_string(), denom.to_string()))
            .or_default() += amount;
    }

    pub fn burn(&self, address: &str, denom: &str, amount: u128) -> Result<(), HooksError> {
        let mut balances = self.balances.lock();
        let balance = balances
            .entry((address.to_string(), denom.to_string()))
            .or_default();
        *balance = balance
            .checked_sub(amount)
            .ok_or_else(|| HooksError::App {
                description: format!("insufficient funds: {address} holds less than {amount}{denom}"),
            })?;
        Ok(())
    }

    pub fn send(&self, from: &str, to: &str, denom: &str, amount: u128) -> Result<(), HooksError> {
        self.burn(from, denom, amount)?;
        self.mint(to, denom, amount);
        Ok(())
    }
}
