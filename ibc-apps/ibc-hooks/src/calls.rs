//! Arguments of each lifecycle operation routed through the middleware.
//!
//! Every operation is reified as one value so that the dispatch engine can
//! hand the same arguments to the override, before and after slots of a hook.
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::{Counterparty, Order};
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::Version;
use ibc_core::client::types::Height;
use ibc_core::host::types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;

#[derive(Clone, Debug)]
pub struct ChanOpenInit {
    pub order: Order,
    pub connection_hops: Vec<ConnectionId>,
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub counterparty: Counterparty,
    pub version: Version,
}

#[derive(Clone, Debug)]
pub struct ChanOpenTry {
    pub order: Order,
    pub connection_hops: Vec<ConnectionId>,
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub counterparty: Counterparty,
    pub counterparty_version: Version,
}

#[derive(Clone, Debug)]
pub struct ChanOpenAck {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub counterparty_channel_id: ChannelId,
    pub counterparty_version: Version,
}

/// Arguments shared by the handshake steps that only name the channel:
/// open-confirm, close-init and close-confirm.
#[derive(Clone, Debug)]
pub struct ChannelEnd {
    pub port_id: PortId,
    pub channel_id: ChannelId,
}

#[derive(Clone, Debug)]
pub struct RecvPacket {
    pub packet: Packet,
    pub relayer: Signer,
}

#[derive(Clone, Debug)]
pub struct AcknowledgePacket {
    pub packet: Packet,
    pub acknowledgement: Acknowledgement,
    pub relayer: Signer,
}

#[derive(Clone, Debug)]
pub struct TimeoutPacket {
    pub packet: Packet,
    pub relayer: Signer,
}

/// An outbound packet before the channel assigns it a sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendPacket {
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    /// `None` disables the height timeout.
    pub timeout_height_on_b: Option<Height>,
    /// Nanoseconds since the unix epoch, `0` disables the timestamp timeout.
    pub timeout_timestamp_on_b: u64,
    pub data: Vec<u8>,
}

impl SendPacket {
    /// Same destination and timeouts, different payload.
    pub fn with_data(&self, data: Vec<u8>) -> Self {
        Self {
            data,
            ..self.clone()
        }
    }
}

#[derive(Clone, Debug)]
pub struct WriteAcknowledgement {
    pub packet: Packet,
    pub acknowledgement: Acknowledgement,
}
