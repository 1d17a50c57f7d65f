use ibc_app_hooks::context::IbcModule;
use ibc_app_hooks::types::ack::{error_acknowledgement, result_acknowledgement};
use ibc_app_hooks::types::config::DEFAULT_BECH32_PREFIX;
use ibc_app_hooks::types::error::HooksError;
use ibc_app_hooks::types::{is_transfer_packet, local_denom_on_recv, validate_address};
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::{Counterparty, Order};
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::Version;
use ibc_core::host::types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use tracing::debug;

use super::bank::MockBank;

/// A minimal ICS-20 application: credits the receiver of every valid inbound
/// transfer and records the outcome callbacks it is handed.
#[derive(Clone, Debug, Default)]
pub struct MockTransferApp {
    pub bank: MockBank,
    pub received: Vec<Packet>,
    pub acknowledged: Vec<(Packet, Acknowledgement)>,
    pub timed_out: Vec<Packet>,
    /// Makes the acknowledgement and timeout callbacks fail.
    pub fail_callbacks: bool,
}

impl MockTransferApp {
    pub fn new(bank: MockBank) -> Self {
        Self {
            bank,
            ..Default::default()
        }
    }

    fn receive(&mut self, packet: &Packet) -> Result<(), HooksError> {
        let data = is_transfer_packet(&packet.data).ok_or_else(|| HooksError::InvalidPacket {
            reason: "cannot unmarshal ICS-20 transfer packet data".to_string(),
        })?;
        validate_address(&data.receiver, DEFAULT_BECH32_PREFIX)?;
        let amount = data
            .amount
            .parse::<u128>()
            .ok()
            .filter(|amount| *amount > 0)
            .ok_or_else(|| HooksError::InvalidPacket {
                reason: format!("invalid amount `{}`", data.amount),
            })?;
        let denom = local_denom_on_recv(packet, &data.denom)?;

        debug!(receiver = %data.receiver, denom = %denom, amount = %amount, "crediting transfer");
        self.bank.mint(&data.receiver, &denom, amount);
        self.received.push(packet.clone());
        Ok(())
    }

    fn callback_result(&self) -> Result<(), HooksError> {
        if self.fail_callbacks {
            return Err(HooksError::App {
                description: "transfer callback failed".to_string(),
            });
        }
        Ok(())
    }
}

impl IbcModule for MockTransferApp {
    fn on_chan_open_init(
        &mut self,
        _order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        version: &Version,
    ) -> Result<Version, HooksError> {
        Ok(version.clone())
    }

    fn on_chan_open_try(
        &mut self,
        _order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        counterparty_version: &Version,
    ) -> Result<Version, HooksError> {
        Ok(counterparty_version.clone())
    }

    fn on_chan_open_ack(
        &mut self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty_channel_id: &ChannelId,
        _counterparty_version: &Version,
    ) -> Result<(), HooksError> {
        Ok(())
    }

    fn on_chan_open_confirm(
        &mut self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), HooksError> {
        Ok(())
    }

    fn on_chan_close_init(
        &mut self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), HooksError> {
        Err(HooksError::App {
            description: "transfer channels cannot be closed by users".to_string(),
        })
    }

    fn on_chan_close_confirm(
        &mut self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), HooksError> {
        Ok(())
    }

    fn on_recv_packet(&mut self, packet: &Packet, _relayer: &Signer) -> Option<Acknowledgement> {
        match self.receive(packet) {
            Ok(()) => result_acknowledgement(&[1]).ok(),
            Err(e) => Some(error_acknowledgement(&e)),
        }
    }

    fn on_acknowledgement_packet(
        &mut self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        _relayer: &Signer,
    ) -> Result<(), HooksError> {
        self.callback_result()?;
        self.acknowledged
            .push((packet.clone(), acknowledgement.clone()));
        Ok(())
    }

    fn on_timeout_packet(&mut self, packet: &Packet, _relayer: &Signer) -> Result<(), HooksError> {
        self.callback_result()?;
        self.timed_out.push(packet.clone());
        Ok(())
    }
}
