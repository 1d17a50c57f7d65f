use ibc_app_hooks::calls::SendPacket;
use ibc_app_hooks::context::{IbcModule, Ics4Wrapper};
use ibc_core::channel::types::channel::{Counterparty, Order};
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::Version;
use ibc_core::host::types::identifiers::{ConnectionId, PortId};
use ibc_hooks_testkit::fixtures::address::{dummy_account, dummy_relayer};
use ibc_hooks_testkit::fixtures::packet::{
    dummy_opaque_packet, dummy_success_ack, SendTransferConfig, TransferPacketConfig,
};
use ibc_hooks_testkit::testapp::MarkerGrant;
use serde_json::json;

use super::*;

fn marker_memo(auth: &Signer) -> String {
    json!({ "marker": { "transfer-auths": [auth.to_string()], "allow-force-transfer": true } })
        .to_string()
}

fn transfer_to(receiver: &Signer, memo: String) -> Packet {
    TransferPacketConfig::builder()
        .receiver(receiver.to_string())
        .memo(memo)
        .build()
}

#[test_log::test]
fn marker_directive_grants_voucher_authorities() {
    let mut chain = Chain::new();
    let receiver = dummy_account("receiver");
    let auth = dummy_account("auth");

    let ack = chain
        .stack
        .on_recv_packet(&transfer_to(&receiver, marker_memo(&auth)), &dummy_relayer())
        .expect("synchronous ack");

    assert_eq!(ack, dummy_success_ack());
    assert_eq!(
        chain.markers.grants(),
        [MarkerGrant {
            denom: voucher(),
            transfer_auths: vec![auth],
            allow_force_transfer: true,
        }]
    );
    assert_eq!(chain.bank.balance(receiver.as_ref(), &voucher()), 100);
}

#[test_log::test]
fn marker_string_payload_is_accepted() {
    let mut chain = Chain::new();
    let receiver = dummy_account("receiver");
    let auth = dummy_account("auth");
    let payload = json!({ "transfer-auths": [auth.to_string()] }).to_string();
    let memo = json!({ "marker": payload }).to_string();

    chain
        .stack
        .on_recv_packet(&transfer_to(&receiver, memo), &dummy_relayer());

    let grants = chain.markers.grants();
    assert_eq!(grants.len(), 1);
    assert!(!grants[0].allow_force_transfer);
}

#[test_log::test]
fn failed_grant_rejects_the_transfer() {
    let mut chain = Chain::with_markers(MockMarkerKeeper::failing());
    let receiver = dummy_account("receiver");

    let ack = chain
        .stack
        .on_recv_packet(
            &transfer_to(&receiver, marker_memo(&dummy_account("auth"))),
            &dummy_relayer(),
        )
        .expect("synchronous ack");

    let error = ack_error(&ack).expect("error ack");
    assert!(error.starts_with("marker transfer authority grant failed"));
    assert_eq!(chain.bank.balance(receiver.as_ref(), &voucher()), 0);
    assert_eq!(chain.store.event_kinds(), ["ibc-acknowledgement-error"]);
}

#[test_log::test]
fn invalid_marker_authority_rejects_the_transfer() {
    let mut chain = Chain::new();
    let receiver = dummy_account("receiver");
    let memo = json!({ "marker": { "transfer-auths": ["nope"] } }).to_string();

    let ack = chain
        .stack
        .on_recv_packet(&transfer_to(&receiver, memo), &dummy_relayer())
        .expect("synchronous ack");

    assert!(ack_error(&ack).is_some());
    assert!(chain.markers.grants().is_empty());
    assert_eq!(chain.store.event_kinds(), ["ibc-acknowledgement-error"]);
}

#[test_log::test]
fn wasm_hook_takes_precedence_over_marker() {
    let mut chain = Chain::new();
    let contract = echo_contract();
    let memo = json!({
        "wasm": { "contract": contract.to_string(), "msg": { "echo": {} } },
        "marker": { "transfer-auths": [dummy_account("auth").to_string()] },
    })
    .to_string();

    let ack = chain
        .stack
        .on_recv_packet(&transfer_to(&contract, memo), &dummy_relayer())
        .expect("synchronous ack");

    assert_eq!(ack_error(&ack), None);
    assert_eq!(chain.contracts.executions().len(), 1);
    assert!(chain.markers.grants().is_empty());
}

#[test_log::test]
fn empty_marker_directive_does_not_shadow_wasm() {
    let mut chain = Chain::with_markers(MockMarkerKeeper::failing());
    let contract = echo_contract();
    let memo = json!({
        "wasm": { "contract": contract.to_string(), "msg": { "echo": {} } },
        "marker": {},
    })
    .to_string();

    let ack = chain
        .stack
        .on_recv_packet(&transfer_to(&contract, memo), &dummy_relayer())
        .expect("synchronous ack");

    assert_eq!(ack_error(&ack), None);
    assert_eq!(chain.contracts.executions().len(), 1);
    assert!(chain.markers.grants().is_empty());
    assert_eq!(chain.bank.balance(contract.as_ref(), &voucher()), 100);
    assert!(chain.store.event_kinds().is_empty());
}

#[test_log::test]
fn non_transfer_packets_bypass_hooks() {
    let mut chain = Chain::new();

    let ack = chain
        .stack
        .on_recv_packet(&dummy_opaque_packet(), &dummy_relayer())
        .expect("synchronous ack");

    assert!(ack_error(&ack).is_some());
    assert!(chain.contracts.executions().is_empty());
    assert!(chain.markers.grants().is_empty());
    assert!(chain.store.events().is_empty());
}

#[test_log::test]
fn receive_needs_every_hook_configured() {
    let bank = MockBank::new();
    let contracts = MockContractKeeper::new(bank.clone())
        .with_contract(&echo_contract(), ContractBehavior::Echo);
    let mut stack: MockHooksMiddleware = MockStackConfig::builder()
        .bank(bank.clone())
        .contracts(contracts.clone())
        .build();
    let contract = echo_contract();

    let ack = stack
        .on_recv_packet(
            &transfer_to(&contract, wasm_memo(&contract, json!({"echo": {}}))),
            &dummy_relayer(),
        )
        .expect("synchronous ack");

    assert_eq!(ack, dummy_success_ack());
    assert!(contracts.executions().is_empty());
    assert_eq!(bank.balance(contract.as_ref(), &voucher()), 100);
}

#[test_log::test]
fn send_skips_unconfigured_wasm_hook() {
    let mut stack: MockHooksMiddleware = MockStackConfig::builder()
        .markers(MockMarkerKeeper::new())
        .build();
    let memo = json!({ "ibc_callback": echo_contract().to_string() }).to_string();
    let send: SendPacket = SendTransferConfig::builder().memo(memo.clone()).build();

    stack.send_packet(send).expect("sent");

    assert_eq!(stack.downstream.channel.sent_memos(), [memo]);
}

#[test_log::test]
fn handshake_reaches_the_application() {
    let mut chain = Chain::new();
    let version = Version::new("ics20-1".to_string());
    let counterparty = Counterparty::new(PortId::transfer(), None);

    let negotiated = chain
        .stack
        .on_chan_open_init(
            Order::Unordered,
            &[ConnectionId::new(0)],
            &PortId::transfer(),
            &ChannelId::new(0),
            &counterparty,
            &version,
        )
        .expect("accepted");

    assert_eq!(negotiated, version);
    assert!(chain
        .stack
        .on_chan_close_init(&PortId::transfer(), &ChannelId::new(0))
        .is_err());
    assert_eq!(
        chain
            .stack
            .get_app_version(&PortId::transfer(), &ChannelId::new(0)),
        Some(version)
    );
}
