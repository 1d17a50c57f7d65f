use ibc_app_hooks::calls::SendPacket;
use ibc_app_hooks::context::Ics4Wrapper;
use ibc_app_hooks::types::error::HooksError;
use ibc_app_hooks::types::is_transfer_packet;
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::Version;
use ibc_core::host::types::identifiers::{ChannelId, PortId, Sequence};
use ibc_core::primitives::prelude::*;

/// A channel that assigns sequences from 1 and records everything committed
/// to it.
#[derive(Clone, Debug, Default)]
pub struct MockChannel {
    pub last_sequence: u64,
    pub sent: Vec<(Sequence, SendPacket)>,
    pub written: Vec<(Packet, Acknowledgement)>,
    /// Makes every send fail.
    pub fail_send: bool,
}

impl MockChannel {
    /// Memos of the transfers sent so far, in order.
    pub fn sent_memos(&self) -> Vec<String> {
        self.sent
            .iter()
            .filter_map(|(_, packet)| is_transfer_packet(&packet.data))
            .map(|data| data.memo)
            .collect()
    }
}

impl Ics4Wrapper for MockChannel {
    fn send_packet(&mut self, packet: SendPacket) -> Result<Sequence, HooksError> {
        if self.fail_send {
            return Err(HooksError::Channel {
                description: format!("channel {} is closed", packet.chan_id_on_a),
            });
        }
        self.last_sequence += 1;
        let sequence = Sequence::from(self.last_sequence);
        self.sent.push((sequence, packet));
        Ok(sequence)
    }

    fn write_acknowledgement(
        &mut self,
        packet: &Packet,
        acknowledgement: Acknowledgement,
    ) -> Result<(), HooksError> {
        self.written.push((packet.clone(), acknowledgement));
        Ok(())
    }

    fn get_app_version(&mut self, port_id: &PortId, _channel_id: &ChannelId) -> Option<Version> {
        (port_id == &PortId::transfer()).then(|| Version::new("ics20-1".to_string()))
    }
}
