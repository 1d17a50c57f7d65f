use ibc_app_hooks::aggregator::HooksAggregator;
use ibc_app_hooks::dispatch::IbcHooksMiddleware;
use ibc_app_hooks::keeper::HooksKeeper;
use ibc_app_hooks::marker::MarkerHooks;
use ibc_app_hooks::types::config::HooksConfig;
use ibc_app_hooks::wasm::WasmHooks;
use typed_builder::TypedBuilder;

use super::bank::MockBank;
use super::channel::MockChannel;
use super::contracts::MockContractKeeper;
use super::marker::MockMarkerKeeper;
use super::store::MockHooksStore;
use super::transfer::MockTransferApp;

pub type MockHooks = HooksAggregator<MockHooksStore, MockContractKeeper, MockMarkerKeeper>;

/// The transfer application wrapped by the hooks middleware, as wired on a
/// chain with both the contract engine and the marker module.
pub type MockHooksMiddleware = IbcHooksMiddleware<MockTransferApp, MockChannel, MockHooks>;

/// Configuration of a [`MockHooksMiddleware`]. Leaving out the contract engine
/// or the marker keeper leaves the matching hook unconfigured.
///
/// The store, bank and keepers share their state with their clones, so a
/// test keeps a handle on each before building the stack.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = MockHooksMiddleware))]
pub struct MockStackConfig {
    #[builder(default)]
    config: HooksConfig,
    #[builder(default)]
    store: MockHooksStore,
    #[builder(default)]
    bank: MockBank,
    #[builder(default, setter(strip_option))]
    contracts: Option<MockContractKeeper>,
    #[builder(default, setter(strip_option))]
    markers: Option<MockMarkerKeeper>,
}

impl From<MockStackConfig> for MockHooksMiddleware {
    fn from(stack: MockStackConfig) -> Self {
        let marker = MarkerHooks::new(stack.markers, stack.config.bech32_prefix.clone());
        let wasm = match stack.contracts {
            Some(contracts) => WasmHooks::configured(stack.config, stack.store, contracts),
            None => {
                let keeper = HooksKeeper::new(stack.store, stack.config.authority.clone());
                WasmHooks::new(stack.config, Some(keeper), None)
            }
        };
        IbcHooksMiddleware::new(
            MockTransferApp::new(stack.bank),
            MockChannel::default(),
            HooksAggregator::new(wasm, marker),
        )
    }
}
