use ibc_app_hooks::calls::SendPacket;
use ibc_app_hooks::types::ack::{error_acknowledgement, result_acknowledgement};
use ibc_app_hooks::types::error::HooksError;
use ibc_app_hooks::types::TransferPacketData;
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::packet::Packet;
use ibc_core::host::types::identifiers::{ChannelId, PortId, Sequence};
use ibc_core::primitives::prelude::*;
use ibc_proto::ibc::core::channel::v1::Packet as RawPacket;
use typed_builder::TypedBuilder;

use crate::fixtures::address::{dummy_account, dummy_remote_account};

/// Configuration of an inbound ICS-20 packet: sent by a remote chain on
/// `chan_id_on_a`, received here on `chan_id_on_b`.
#[derive(TypedBuilder, Clone, Debug)]
#[builder(build_method(into = Packet))]
pub struct TransferPacketConfig {
    #[builder(default = Sequence::from(1))]
    pub seq_on_a: Sequence,
    #[builder(default = PortId::transfer())]
    pub port_id_on_a: PortId,
    #[builder(default = ChannelId::new(7))]
    pub chan_id_on_a: ChannelId,
    #[builder(default = PortId::transfer())]
    pub port_id_on_b: PortId,
    #[builder(default = ChannelId::new(0))]
    pub chan_id_on_b: ChannelId,
    #[builder(default = "stake".to_string(), setter(into))]
    pub denom: String,
    #[builder(default = "100".to_string(), setter(into))]
    pub amount: String,
    #[builder(default = dummy_remote_account("sender"), setter(into))]
    pub sender: String,
    #[builder(default = dummy_account("receiver").to_string(), setter(into))]
    pub receiver: String,
    #[builder(default, setter(into))]
    pub memo: String,
    #[builder(default = 1_000_000)]
    pub timeout_timestamp: u64,
}

impl TransferPacketConfig {
    pub fn packet_data(&self) -> TransferPacketData {
        TransferPacketData {
            denom: self.denom.clone(),
            amount: self.amount.clone(),
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
            memo: self.memo.clone(),
        }
    }
}

impl From<TransferPacketConfig> for Packet {
    fn from(config: TransferPacketConfig) -> Self {
        let data = config
            .packet_data()
            .to_bytes()
            .expect("transfer packet data always serializes");
        Packet::try_from(RawPacket {
            sequence: config.seq_on_a.value(),
            source_port: config.port_id_on_a.to_string(),
            source_channel: config.chan_id_on_a.to_string(),
            destination_port: config.port_id_on_b.to_string(),
            destination_channel: config.chan_id_on_b.to_string(),
            data,
            timeout_height: None,
            timeout_timestamp: config.timeout_timestamp,
        })
        .expect("dummy transfer packet is valid")
    }
}

/// Configuration of an outbound ICS-20 packet sent from this chain on
/// `chan_id_on_a`.
#[derive(TypedBuilder, Clone, Debug)]
#[builder(build_method(into = SendPacket))]
pub struct SendTransferConfig {
    #[builder(default = PortId::transfer())]
    pub port_id_on_a: PortId,
    #[builder(default = ChannelId::new(0))]
    pub chan_id_on_a: ChannelId,
    #[builder(default = "stake".to_string(), setter(into))]
    pub denom: String,
    #[builder(default = "100".to_string(), setter(into))]
    pub amount: String,
    #[builder(default = dummy_account("sender").to_string(), setter(into))]
    pub sender: String,
    #[builder(default = dummy_remote_account("receiver"), setter(into))]
    pub receiver: String,
    #[builder(default, setter(into))]
    pub memo: String,
    #[builder(default = 1_000_000)]
    pub timeout_timestamp: u64,
}

impl From<SendTransferConfig> for SendPacket {
    fn from(config: SendTransferConfig) -> Self {
        let data = TransferPacketData {
            denom: config.denom,
            amount: config.amount,
            sender: config.sender,
            receiver: config.receiver,
            memo: config.memo,
        }
        .to_bytes()
        .expect("transfer packet data always serializes");
        SendPacket {
            port_id_on_a: config.port_id_on_a,
            chan_id_on_a: config.chan_id_on_a,
            timeout_height_on_b: None,
            timeout_timestamp_on_b: config.timeout_timestamp,
            data,
        }
    }
}

/// Returns a packet whose data is not an ICS-20 payload.
pub fn dummy_opaque_packet() -> Packet {
    Packet::try_from(RawPacket {
        sequence: 1,
        source_port: PortId::transfer().to_string(),
        source_channel: ChannelId::new(7).to_string(),
        destination_port: PortId::transfer().to_string(),
        destination_channel: ChannelId::new(0).to_string(),
        data: br#"{"opaque":true}"#.to_vec(),
        timeout_height: None,
        timeout_timestamp: 1_000_000,
    })
    .expect("dummy packet is valid")
}

/// The ICS-20 success acknowledgement, `{"result":"AQ=="}`.
pub fn dummy_success_ack() -> Acknowledgement {
    result_acknowledgement(&[1]).expect("success acknowledgement is never empty")
}

pub fn dummy_error_ack(message: &str) -> Acknowledgement {
    error_acknowledgement(&HooksError::Other(message.to_string()))
}

/// The packet the channel commits for `send` under `sequence`, as it comes
/// back with its acknowledgement or timeout.
pub fn sent_packet(send: &SendPacket, sequence: Sequence) -> Packet {
    Packet::try_from(RawPacket {
        sequence: sequence.value(),
        source_port: send.port_id_on_a.to_string(),
        source_channel: send.chan_id_on_a.to_string(),
        destination_port: PortId::transfer().to_string(),
        destination_channel: ChannelId::new(9).to_string(),
        data: send.data.clone(),
        timeout_height: None,
        timeout_timestamp: send.timeout_timestamp_on_b,
    })
    .expect("sent packet is valid")
}
