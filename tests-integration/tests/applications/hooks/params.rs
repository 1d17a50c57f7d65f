use ibc_app_hooks::handler::update_params;
use ibc_app_hooks::query;
use ibc_app_hooks::types::config::{module_address, GOV_MODULE_NAME};
use ibc_app_hooks::types::error::HooksError;
use ibc_app_hooks::types::msgs::MsgUpdateParams;
use ibc_app_hooks::types::params::Params;
use ibc_hooks_testkit::fixtures::address::dummy_account;

use super::*;

#[test_log::test]
fn authority_updates_params() {
    let mut chain = Chain::new();
    let wasm = &mut chain.stack.hooks.wasm;
    let authority = wasm.config().authority.clone();
    let keeper = wasm.keeper_mut().expect("configured");

    assert_eq!(query::params(keeper).expect("readable").params, Params::default());

    let allowed = vec![dummy_contract("a"), dummy_contract("b")];
    update_params(keeper, "cosmos", MsgUpdateParams::new(allowed.clone(), authority))
        .expect("updated");

    assert_eq!(
        query::params(keeper).expect("readable").params,
        Params::new(allowed.clone())
    );
    assert!(keeper.is_in_allow_list(&allowed[1]));
    assert_eq!(chain.store.event_kinds(), ["params-updated"]);
}

#[test_log::test]
fn other_signers_are_rejected() {
    let mut chain = Chain::new();
    let keeper = chain.stack.hooks.wasm.keeper_mut().expect("configured");

    let result = update_params(
        keeper,
        "cosmos",
        MsgUpdateParams::new(vec![dummy_contract("a")], dummy_account("mallory")),
    );

    assert!(matches!(result, Err(HooksError::UnauthorizedParamsUpdate { .. })));
    assert_eq!(
        query::params(keeper).expect("readable").params,
        Params::default()
    );
    assert!(chain.store.events().is_empty());
}

#[test_log::test]
fn invalid_contract_addresses_are_rejected() {
    let mut chain = Chain::new();
    let wasm = &mut chain.stack.hooks.wasm;
    let authority = wasm.config().authority.clone();
    let keeper = wasm.keeper_mut().expect("configured");

    let result = update_params(
        keeper,
        "cosmos",
        MsgUpdateParams::new(vec!["not-an-address".to_string().into()], authority),
    );

    assert!(result.is_err());
    assert_eq!(
        query::params(keeper).expect("readable").params,
        Params::default()
    );
}

#[test_log::test]
fn gov_account_of_configured_prefix_is_the_default_authority() {
    let config: HooksConfig =
        serde_json::from_str(r#"{"bech32_prefix":"pb"}"#).expect("valid config");
    let bank = MockBank::new();
    let store = MockHooksStore::new();
    let mut stack: MockHooksMiddleware = MockStackConfig::builder()
        .config(config)
        .store(store.clone())
        .bank(bank.clone())
        .contracts(MockContractKeeper::new(bank))
        .build();
    let (keeper, _, config) = stack.hooks.wasm.parts_mut().expect("configured");
    let allowed = vec![module_address("contract", "pb")];

    update_params(
        keeper,
        &config.bech32_prefix,
        MsgUpdateParams::new(allowed.clone(), module_address(GOV_MODULE_NAME, "pb")),
    )
    .expect("updated");

    assert!(keeper.is_in_allow_list(&allowed[0]));
    assert_eq!(store.event_kinds(), ["params-updated"]);
}
