use base64::prelude::*;
use ibc_app_hooks::calls::SendPacket;
use ibc_app_hooks::context::{IbcModule, Ics4Wrapper};
use ibc_app_hooks::types::error::HooksError;
use ibc_core::channel::types::packet::Packet;
use ibc_core::host::types::identifiers::Sequence;
use ibc_hooks_testkit::fixtures::address::dummy_relayer;
use ibc_hooks_testkit::fixtures::packet::{
    dummy_error_ack, dummy_success_ack, sent_packet, SendTransferConfig,
};
use rstest::rstest;
use serde_json::json;

use super::*;

fn callback_memo(contract: &Signer) -> String {
    json!({ "ibc_callback": contract.to_string() }).to_string()
}

/// Sends a transfer with `memo` and returns the packet as it left the chain.
fn send(chain: &mut Chain, memo: String) -> Packet {
    let send: SendPacket = SendTransferConfig::builder().memo(memo).build();
    let sequence = chain.stack.send_packet(send).expect("sent");
    let (sent_sequence, sent) = chain
        .stack
        .downstream
        .channel
        .sent
        .last()
        .cloned()
        .expect("recorded");
    assert_eq!(sent_sequence, sequence);
    sent_packet(&sent, sequence)
}

fn stored_callback(chain: &Chain, packet: &Packet) -> Option<Signer> {
    chain
        .stack
        .hooks
        .wasm
        .keeper()
        .expect("configured")
        .get_packet_callback(&packet.chan_id_on_a, packet.seq_on_a)
}

#[test_log::test]
fn callback_key_is_stripped_and_recorded() {
    let mut chain = Chain::new();
    let contract = echo_contract();

    let packet = send(&mut chain, callback_memo(&contract));

    assert_eq!(packet.seq_on_a, Sequence::from(1));
    assert_eq!(chain.stack.downstream.channel.sent_memos(), [""]);
    assert_eq!(stored_callback(&chain, &packet), Some(contract));
}

#[test_log::test]
fn other_memo_keys_survive() {
    let mut chain = Chain::new();
    let memo = json!({ "ibc_callback": echo_contract().to_string(), "note": "hi" }).to_string();

    send(&mut chain, memo);

    assert_eq!(
        chain.stack.downstream.channel.sent_memos(),
        [r#"{"note":"hi"}"#]
    );
}

#[rstest]
#[case::not_an_address(json!({"ibc_callback": "nope"}))]
#[case::not_a_string(json!({"ibc_callback": {"contract": "x"}}))]
fn unusable_callback_is_dropped(#[case] memo: serde_json::Value) {
    let mut chain = Chain::new();

    let packet = send(&mut chain, memo.to_string());

    assert_eq!(chain.stack.downstream.channel.sent_memos(), [""]);
    assert_eq!(stored_callback(&chain, &packet), None);
}

#[rstest]
#[case::empty("")]
#[case::plain_text("hello")]
#[case::unrelated_json(r#"{"note":"hi"}"#)]
fn plain_transfer_is_sent_unchanged(#[case] memo: &str) {
    let mut chain = Chain::new();

    let packet = send(&mut chain, memo.to_string());

    assert_eq!(chain.stack.downstream.channel.sent_memos(), [memo]);
    assert_eq!(stored_callback(&chain, &packet), None);
    assert!(chain.store.is_empty());
}

#[test_log::test]
fn failed_send_records_nothing() {
    let mut chain = Chain::new();
    chain.stack.downstream.channel.fail_send = true;
    let send: SendPacket = SendTransferConfig::builder()
        .memo(callback_memo(&echo_contract()))
        .build();

    let result = chain.stack.send_packet(send);

    assert!(matches!(result, Err(HooksError::Channel { .. })));
    assert!(chain.store.is_empty());
}

#[rstest]
#[case::success(dummy_success_ack(), true)]
#[case::failure(dummy_error_ack("insufficient funds"), false)]
fn acknowledgement_notifies_callback(
    #[case] ack: Acknowledgement,
    #[case] success: bool,
) {
    let mut chain = Chain::new();
    let contract = echo_contract();
    let packet = send(&mut chain, callback_memo(&contract));

    chain
        .stack
        .on_acknowledgement_packet(&packet, &ack, &dummy_relayer())
        .expect("acknowledged");

    let calls = chain.contracts.sudo_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].contract, contract);
    assert_eq!(
        calls[0].msg_json(),
        json!({
            "ibc_lifecycle_complete": {
                "ibc_ack": {
                    "channel": "channel-0",
                    "sequence": 1,
                    "ack": BASE64_STANDARD.encode(ack.as_bytes()),
                    "success": success,
                }
            }
        })
    );
    assert_eq!(chain.stack.downstream.app.acknowledged.len(), 1);
    assert_eq!(stored_callback(&chain, &packet), None);
}

#[test_log::test]
fn timeout_notifies_callback() {
    let mut chain = Chain::new();
    let contract = echo_contract();
    let packet = send(&mut chain, callback_memo(&contract));

    chain
        .stack
        .on_timeout_packet(&packet, &dummy_relayer())
        .expect("timed out");

    let calls = chain.contracts.sudo_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].msg_json(),
        json!({"ibc_lifecycle_complete": {"ibc_timeout": {"channel": "channel-0", "sequence": 1}}})
    );
    assert_eq!(chain.stack.downstream.app.timed_out.len(), 1);
    assert_eq!(stored_callback(&chain, &packet), None);
}

#[rstest]
#[case::rejects(ContractBehavior::RejectsSudo)]
#[case::panics(ContractBehavior::Panics)]
fn failing_callback_does_not_fail_the_acknowledgement(#[case] behavior: ContractBehavior) {
    let mut chain = Chain::new();
    let contract = dummy_contract("failing");
    chain.deploy(&contract, behavior);
    let packet = send(&mut chain, callback_memo(&contract));

    chain
        .stack
        .on_acknowledgement_packet(&packet, &dummy_success_ack(), &dummy_relayer())
        .expect("acknowledged");

    assert_eq!(chain.store.event_kinds(), ["ibc-ack-callback-error"]);
    assert_eq!(stored_callback(&chain, &packet), None);
}

#[test_log::test]
fn failing_timeout_callback_is_reported() {
    let mut chain = Chain::new();
    let contract = dummy_contract("failing");
    chain.deploy(&contract, ContractBehavior::RejectsSudo);
    let packet = send(&mut chain, callback_memo(&contract));

    chain
        .stack
        .on_timeout_packet(&packet, &dummy_relayer())
        .expect("timed out");

    assert_eq!(chain.store.event_kinds(), ["ibc-timeout-callback-error"]);
    assert_eq!(stored_callback(&chain, &packet), None);
}

#[test_log::test]
fn packets_without_callback_skip_contracts() {
    let mut chain = Chain::new();
    let packet = send(&mut chain, String::new());

    chain
        .stack
        .on_acknowledgement_packet(&packet, &dummy_success_ack(), &dummy_relayer())
        .expect("acknowledged");

    assert!(chain.contracts.sudo_calls().is_empty());
    assert_eq!(chain.stack.downstream.app.acknowledged.len(), 1);
}

#[test_log::test]
fn failed_default_handling_keeps_callback() {
    let mut chain = Chain::new();
    let contract = echo_contract();
    let packet = send(&mut chain, callback_memo(&contract));
    chain.stack.downstream.app.fail_callbacks = true;

    let result = chain
        .stack
        .on_acknowledgement_packet(&packet, &dummy_success_ack(), &dummy_relayer());

    assert!(matches!(result, Err(HooksError::App { .. })));
    assert!(chain.contracts.sudo_calls().is_empty());
    assert_eq!(stored_callback(&chain, &packet), Some(contract));
}
