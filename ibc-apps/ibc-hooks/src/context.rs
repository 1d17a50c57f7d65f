//! Defines the collaborators the hooks middleware depends on.
use ibc_app_transfer_types::BaseCoin;
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::{Counterparty, Order};
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::Version;
use ibc_core::host::types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use ibc_core::router::types::event::ModuleEvent;

use crate::calls::SendPacket;
use crate::types::error::HooksError;

/// Channel and packet callbacks of an IBC application, such as the ICS-20
/// transfer module the middleware wraps.
pub trait IbcModule {
    fn on_chan_open_init(
        &mut self,
        order: Order,
        connection_hops: &[ConnectionId],
        port_id: &PortId,
        channel_id: &ChannelId,
        counterparty: &Counterparty,
        version: &Version,
    ) -> Result<Version, HooksError>;

    fn on_chan_open_try(
        &mut self,
        order: Order,
        connection_hops: &[ConnectionId],
        port_id: &PortId,
        channel_id: &ChannelId,
        counterparty: &Counterparty,
        counterparty_version: &Version,
    ) -> Result<Version, HooksError>;

    fn on_chan_open_ack(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
        counterparty_channel_id: &ChannelId,
        counterparty_version: &Version,
    ) -> Result<(), HooksError>;

    fn on_chan_open_confirm(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<(), HooksError>;

    fn on_chan_close_init(&mut self, port_id: &PortId, channel_id: &ChannelId)
        -> Result<(), HooksError>;

    fn on_chan_close_confirm(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<(), HooksError>;

    /// Returns `None` when the acknowledgement is deferred and will be written
    /// later through [`Ics4Wrapper::write_acknowledgement`].
    fn on_recv_packet(&mut self, packet: &Packet, relayer: &Signer) -> Option<Acknowledgement>;

    fn on_acknowledgement_packet(
        &mut self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        relayer: &Signer,
    ) -> Result<(), HooksError>;

    fn on_timeout_packet(&mut self, packet: &Packet, relayer: &Signer) -> Result<(), HooksError>;
}

/// The ICS-4 surface an application uses to talk to its channel.
pub trait Ics4Wrapper {
    /// Commits an outbound packet and returns the sequence it was assigned.
    fn send_packet(&mut self, packet: SendPacket) -> Result<Sequence, HooksError>;

    fn write_acknowledgement(
        &mut self,
        packet: &Packet,
        acknowledgement: Acknowledgement,
    ) -> Result<(), HooksError>;

    fn get_app_version(&mut self, port_id: &PortId, channel_id: &ChannelId) -> Option<Version>;
}

/// The smart contract engine.
pub trait ContractKeeper {
    /// Executes `msg` on `contract` on behalf of `sender`, moving `funds` from
    /// the sender to the contract. Returns the response data.
    fn execute_contract(
        &mut self,
        sender: &Signer,
        contract: &Signer,
        msg: &[u8],
        funds: &[BaseCoin],
    ) -> Result<Vec<u8>, HooksError>;

    /// Delivers a privileged message only the chain itself can send.
    fn sudo(&mut self, contract: &Signer, msg: &[u8]) -> Result<Vec<u8>, HooksError>;
}

/// The marker module owning restricted denominations.
pub trait MarkerKeeper {
    /// Replaces the access grants of the marker backing `denom` with transfer
    /// rights for `transfer_auths`.
    fn grant_transfer_authorities(
        &mut self,
        denom: &str,
        transfer_auths: &[Signer],
        allow_force_transfer: bool,
    ) -> Result<(), HooksError>;
}

/// The module-scoped key-value store and event sink of the host.
pub trait HooksStoreContext {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>);

    fn delete(&mut self, key: &[u8]);

    fn emit_event(&mut self, event: ModuleEvent);

    fn log_message(&mut self, message: String);
}
