use ibc_app_hooks::context::IbcModule;
use ibc_core::channel::types::packet::Packet;
use ibc_hooks_testkit::fixtures::address::{dummy_account, dummy_relayer};
use ibc_hooks_testkit::fixtures::packet::{dummy_success_ack, TransferPacketConfig};
use ibc_hooks_testkit::testapp::ECHO_RESPONSE;
use rstest::rstest;
use serde_json::json;

use super::*;

fn wasm_packet(receiver: &Signer, memo: String) -> Packet {
    TransferPacketConfig::builder()
        .receiver(receiver.to_string())
        .memo(memo)
        .build()
}

#[test_log::test]
fn wasm_memo_executes_contract_with_received_funds() {
    let mut chain = Chain::new();
    let contract = echo_contract();
    let packet = wasm_packet(&contract, wasm_memo(&contract, json!({"echo": {"msg": "test"}})));

    let ack = chain
        .stack
        .on_recv_packet(&packet, &dummy_relayer())
        .expect("synchronous ack");

    assert_eq!(ack_error(&ack), None);
    let contract_ack = decode_contract_ack(&ack);
    assert_eq!(contract_ack.contract_result, ECHO_RESPONSE);
    assert_eq!(contract_ack.ibc_ack, dummy_success_ack().as_bytes());

    assert_eq!(chain.bank.balance(contract.as_ref(), &voucher()), 100);
    assert_eq!(chain.bank.balance(intermediary().as_ref(), &voucher()), 0);

    let executions = chain.contracts.executions();
    assert_eq!(executions.len(), 1);
    assert_eq!(executions[0].sender, intermediary());
    assert_eq!(executions[0].msg, br#"{"echo":{"msg":"test"}}"#);
    assert_eq!(executions[0].funds[0].denom.as_str(), voucher());
}

#[test_log::test]
fn default_receive_sees_intermediary_as_receiver() {
    let mut chain = Chain::new();
    let contract = echo_contract();
    let packet = wasm_packet(&contract, wasm_memo(&contract, json!({"echo": {}})));

    chain.stack.on_recv_packet(&packet, &dummy_relayer());

    let received = &chain.stack.downstream.app.received;
    assert_eq!(received.len(), 1);
    let data = ibc_app_hooks::types::is_transfer_packet(&received[0].data).expect("transfer");
    assert_eq!(data.receiver, intermediary().to_string());
    assert_eq!(data.sender, remote_sender());
    assert_eq!(received[0].seq_on_a, packet.seq_on_a);
}

#[test_log::test]
fn rejected_execution_yields_error_ack() {
    let mut chain = Chain::new();
    let contract = echo_contract();
    let packet = wasm_packet(&contract, wasm_memo(&contract, json!({"not_echo": {"msg": "test"}})));

    let ack = chain
        .stack
        .on_recv_packet(&packet, &dummy_relayer())
        .expect("synchronous ack");

    assert!(ack_error(&ack).is_some());
    assert_eq!(chain.bank.balance(contract.as_ref(), &voucher()), 0);
    assert!(chain.contracts.executions().is_empty());
    assert_eq!(chain.store.event_kinds(), ["ibc-acknowledgement-error"]);
}

#[test_log::test]
fn panicking_contract_yields_error_ack() {
    let mut chain = Chain::new();
    let contract = dummy_contract("panics");
    chain.deploy(&contract, ContractBehavior::Panics);
    let packet = wasm_packet(&contract, wasm_memo(&contract, json!({"anything": {}})));

    let ack = chain
        .stack
        .on_recv_packet(&packet, &dummy_relayer())
        .expect("synchronous ack");

    let error = ack_error(&ack).expect("error ack");
    assert!(error.contains("panicked"), "{error}");
    assert_eq!(chain.bank.balance(contract.as_ref(), &voucher()), 0);
}

#[test_log::test]
fn receiver_must_be_the_contract() {
    let mut chain = Chain::new();
    let contract = echo_contract();
    let receiver = dummy_account("someone-else");
    let packet = wasm_packet(&receiver, wasm_memo(&contract, json!({"echo": {}})));

    let ack = chain
        .stack
        .on_recv_packet(&packet, &dummy_relayer())
        .expect("synchronous ack");

    let error = ack_error(&ack).expect("error ack");
    assert!(error.contains("receiver"), "{error}");
    assert!(chain.stack.downstream.app.received.is_empty());
    assert_eq!(chain.bank.balance(receiver.as_ref(), &voucher()), 0);
    assert_eq!(chain.bank.balance(intermediary().as_ref(), &voucher()), 0);
    assert!(chain.contracts.executions().is_empty());
}

#[rstest]
#[case::not_an_object(json!({"wasm": "echo"}))]
#[case::missing_contract(json!({"wasm": {"msg": {"echo": {}}}}))]
#[case::invalid_contract(json!({"wasm": {"contract": "not-an-address", "msg": {}}}))]
#[case::missing_msg(json!({"wasm": {"contract": echo_contract().to_string()}}))]
#[case::msg_not_an_object(json!({"wasm": {"contract": echo_contract().to_string(), "msg": "echo"}}))]
fn malformed_directive_is_rejected_before_funds_move(#[case] memo: serde_json::Value) {
    let mut chain = Chain::new();
    let packet = wasm_packet(&echo_contract(), memo.to_string());

    let ack = chain
        .stack
        .on_recv_packet(&packet, &dummy_relayer())
        .expect("synchronous ack");

    assert!(ack_error(&ack).is_some());
    assert!(chain.stack.downstream.app.received.is_empty());
    assert!(chain.contracts.executions().is_empty());
    assert_eq!(chain.store.event_kinds(), ["ibc-acknowledgement-error"]);
    assert_eq!(
        chain.store.logs().first().map(String::as_str),
        Some("error-context: invalid wasm memo")
    );
}

#[rstest]
#[case::empty("")]
#[case::not_json("just a note")]
#[case::array("[1, 2, 3]")]
#[case::other_keys(r#"{"forward": {"receiver": "x"}}"#)]
fn unrouted_memo_takes_default_path(#[case] memo: &str) {
    let mut chain = Chain::new();
    let receiver = dummy_account("receiver");
    let packet = wasm_packet(&receiver, memo.to_string());

    let ack = chain
        .stack
        .on_recv_packet(&packet, &dummy_relayer())
        .expect("synchronous ack");

    assert_eq!(ack, dummy_success_ack());
    assert_eq!(chain.bank.balance(receiver.as_ref(), &voucher()), 100);
    assert!(chain.contracts.executions().is_empty());
    assert!(chain.store.events().is_empty());
}

#[test_log::test]
fn failed_transfer_skips_contract() {
    let mut chain = Chain::new();
    let contract = echo_contract();
    let packet: Packet = TransferPacketConfig::builder()
        .receiver(contract.to_string())
        .amount("not-a-number")
        .memo(wasm_memo(&contract, json!({"echo": {}})))
        .build();

    let ack = chain
        .stack
        .on_recv_packet(&packet, &dummy_relayer())
        .expect("synchronous ack");

    assert!(ack_error(&ack).is_some());
    assert!(chain.contracts.executions().is_empty());
}

#[test_log::test]
fn returning_tokens_keep_their_native_denom() {
    let mut chain = Chain::new();
    let contract = echo_contract();
    let packet: Packet = TransferPacketConfig::builder()
        .receiver(contract.to_string())
        .denom("transfer/channel-7/ustake")
        .memo(wasm_memo(&contract, json!({"echo": {}})))
        .build();

    chain.stack.on_recv_packet(&packet, &dummy_relayer());

    assert_eq!(chain.bank.balance(contract.as_ref(), "ustake"), 100);
}
