mod callbacks;
mod params;
mod recv;
mod routing;

use base64::prelude::*;
use ibc_app_hooks::types::ack::ContractAck;
use ibc_app_hooks::types::config::HooksConfig;
use ibc_app_hooks::types::derive_intermediate_sender;
use ibc_app_hooks::types::ibc_denom;
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::host::types::identifiers::ChannelId;
use ibc_core::primitives::Signer;
use ibc_hooks_testkit::fixtures::address::{dummy_contract, dummy_remote_account};
use ibc_hooks_testkit::testapp::{
    ContractBehavior, MockBank, MockContractKeeper, MockHooksMiddleware, MockHooksStore,
    MockMarkerKeeper, MockStackConfig,
};
use serde_json::Value;

/// A fully wired middleware together with handles on its shared state.
pub struct Chain {
    pub stack: MockHooksMiddleware,
    pub bank: MockBank,
    pub store: MockHooksStore,
    pub contracts: MockContractKeeper,
    pub markers: MockMarkerKeeper,
}

impl Chain {
    pub fn new() -> Self {
        Self::with_markers(MockMarkerKeeper::new())
    }

    pub fn with_markers(markers: MockMarkerKeeper) -> Self {
        let bank = MockBank::new();
        let store = MockHooksStore::new();
        let contracts = MockContractKeeper::new(bank.clone())
            .with_contract(&echo_contract(), ContractBehavior::Echo);
        let stack = MockStackConfig::builder()
            .config(HooksConfig::default())
            .store(store.clone())
            .bank(bank.clone())
            .contracts(contracts.clone())
            .markers(markers.clone())
            .build();
        Self {
            stack,
            bank,
            store,
            contracts,
            markers,
        }
    }

    pub fn deploy(&self, contract: &Signer, behavior: ContractBehavior) {
        self.contracts.deploy(contract, behavior);
    }
}

pub fn echo_contract() -> Signer {
    dummy_contract("echo")
}

pub fn remote_sender() -> String {
    dummy_remote_account("sender")
}

/// Voucher of `stake` arriving on the default receiving channel.
pub fn voucher() -> String {
    ibc_denom("transfer/channel-0/stake")
}

pub fn intermediary() -> Signer {
    derive_intermediate_sender(&ChannelId::new(0), &remote_sender(), "cosmos")
}

pub fn wasm_memo(contract: &Signer, msg: Value) -> String {
    serde_json::json!({ "wasm": { "contract": contract.to_string(), "msg": msg } }).to_string()
}

/// Unwraps the contract acknowledgement carried in the result of `ack`.
pub fn decode_contract_ack(ack: &Acknowledgement) -> ContractAck {
    let envelope: Value = serde_json::from_slice(ack.as_bytes()).expect("json ack");
    let result = envelope["result"].as_str().expect("success ack");
    let bytes = BASE64_STANDARD.decode(result).expect("base64 result");
    serde_json::from_slice(&bytes).expect("contract ack")
}

pub fn ack_error(ack: &Acknowledgement) -> Option<String> {
    let envelope: Value = serde_json::from_slice(ack.as_bytes()).ok()?;
    envelope["error"].as_str().map(ToString::to_string)
}
