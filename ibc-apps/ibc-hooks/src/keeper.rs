//! Persistent state of the hooks middleware: packet callbacks, async ack actors
//! and module parameters.
use ibc_core::channel::types::packet::Packet;
use ibc_core::host::types::identifiers::{ChannelId, Sequence};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use ibc_proto::ibc::core::channel::v1::Packet as RawPacket;
use prost::Message;

use crate::context::HooksStoreContext;
use crate::types::error::HooksError;
use crate::types::params::Params;

pub const PARAMS_KEY: &[u8] = b"params";

/// Key of the callback contract of an outbound packet.
pub fn packet_callback_key(channel_id: &ChannelId, sequence: Sequence) -> Vec<u8> {
    format!("{channel_id}::{sequence}").into_bytes()
}

/// Key of the async ack actor of an inbound packet.
pub fn packet_ack_actor_key(channel_id: &ChannelId, sequence: Sequence) -> Vec<u8> {
    format!("{channel_id}::{sequence}::ack").into_bytes()
}

/// Key of an inbound packet awaiting its async acknowledgement.
pub fn received_packet_key(channel_id: &ChannelId, sequence: Sequence) -> Vec<u8> {
    format!("{channel_id}::{sequence}::packet").into_bytes()
}

pub struct HooksKeeper<S> {
    store: S,
    authority: Signer,
}

impl<S: HooksStoreContext> HooksKeeper<S> {
    pub fn new(store: S, authority: Signer) -> Self {
        Self { store, authority }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The account allowed to update the parameters.
    pub fn authority(&self) -> &Signer {
        &self.authority
    }

    pub fn get_params(&self) -> Result<Params, HooksError> {
        match self.store.get(PARAMS_KEY) {
            Some(bytes) => Params::from_slice(&bytes),
            None => Ok(Params::default()),
        }
    }

    pub fn set_params(&mut self, params: &Params) -> Result<(), HooksError> {
        self.store.set(PARAMS_KEY.to_vec(), params.to_bytes()?);
        Ok(())
    }

    /// Whether `contract` may defer its acknowledgements. Unreadable
    /// parameters allow nobody.
    pub fn is_in_allow_list(&self, contract: &Signer) -> bool {
        self.get_params()
            .map(|params| params.is_allowed(contract))
            .unwrap_or(false)
    }

    pub fn store_packet_callback(
        &mut self,
        channel_id: &ChannelId,
        sequence: Sequence,
        contract: &Signer,
    ) {
        self.store.set(
            packet_callback_key(channel_id, sequence),
            contract.as_ref().as_bytes().to_vec(),
        );
    }

    pub fn get_packet_callback(&self, channel_id: &ChannelId, sequence: Sequence) -> Option<Signer> {
        self.get_address(&packet_callback_key(channel_id, sequence))
    }

    pub fn delete_packet_callback(&mut self, channel_id: &ChannelId, sequence: Sequence) {
        self.store.delete(&packet_callback_key(channel_id, sequence));
    }

    /// Registers `contract` as the actor that will emit the acknowledgement of
    /// `packet`, and keeps the packet so the acknowledgement can be written later.
    pub fn store_packet_ack_actor(&mut self, packet: &Packet, contract: &Signer) {
        let channel_id = &packet.chan_id_on_b;
        let sequence = packet.seq_on_a;
        self.store.set(
            packet_ack_actor_key(channel_id, sequence),
            contract.as_ref().as_bytes().to_vec(),
        );
        self.store.set(
            received_packet_key(channel_id, sequence),
            RawPacket::from(packet.clone()).encode_to_vec(),
        );
    }

    pub fn get_packet_ack_actor(
        &self,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) -> Option<Signer> {
        self.get_address(&packet_ack_actor_key(channel_id, sequence))
    }

    pub fn get_received_packet(
        &self,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) -> Result<Option<Packet>, HooksError> {
        let Some(bytes) = self.store.get(&received_packet_key(channel_id, sequence)) else {
            return Ok(None);
        };
        let raw = RawPacket::decode(bytes.as_slice())
            .map_err(|e| HooksError::Other(format!("cannot decode stored packet: {e}")))?;
        let packet = Packet::try_from(raw)
            .map_err(|e| HooksError::Other(format!("invalid stored packet: {e}")))?;
        Ok(Some(packet))
    }

    pub fn delete_packet_ack_actor(&mut self, channel_id: &ChannelId, sequence: Sequence) {
        self.store.delete(&packet_ack_actor_key(channel_id, sequence));
        self.store.delete(&received_packet_key(channel_id, sequence));
    }

    fn get_address(&self, key: &[u8]) -> Option<Signer> {
        let bytes = self.store.get(key)?;
        let address = String::from_utf8(bytes).ok()?;
        if address.is_empty() {
            return None;
        }
        Some(address.into())
    }
}
