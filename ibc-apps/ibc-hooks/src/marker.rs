//! The marker hook: applies the transfer authorities an inbound transfer asks
//! for to the marker backing its voucher.
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::primitives::prelude::*;
use tracing::debug;

use crate::calls::RecvPacket;
use crate::context::{IbcModule, MarkerKeeper};
use crate::dispatch::Downstream;
use crate::types::error::HooksError;
use crate::types::{is_transfer_packet, local_denom_on_recv, parse_marker_memo};

/// Prefix of the vouchers minted by the transfer application. Only those
/// denominations are backed by markers this hook may manage.
const VOUCHER_PREFIX: &str = "ibc/";

pub struct MarkerHooks<M> {
    markers: Option<M>,
    bech32_prefix: String,
}

impl<M> MarkerHooks<M> {
    pub fn new(markers: Option<M>, bech32_prefix: impl Into<String>) -> Self {
        Self {
            markers,
            bech32_prefix: bech32_prefix.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.markers.is_some()
    }

    pub fn markers(&self) -> Option<&M> {
        self.markers.as_ref()
    }
}

impl<M: MarkerKeeper> MarkerHooks<M> {
    /// Grants the transfer authorities named by a `marker` directive, then
    /// receives the packet the default way.
    ///
    /// A rejected directive is returned as an error without touching the
    /// default application. Turning it into an error acknowledgement is up to
    /// the caller, which owns the event sink.
    pub fn on_recv_packet_override<A, C>(
        &mut self,
        downstream: &mut Downstream<A, C>,
        call: &RecvPacket,
    ) -> Result<Option<Acknowledgement>, HooksError>
    where
        A: IbcModule,
    {
        self.process_marker_memo(call)?;
        Ok(downstream.app.on_recv_packet(&call.packet, &call.relayer))
    }

    fn process_marker_memo(&mut self, call: &RecvPacket) -> Result<(), HooksError> {
        let Some(markers) = self.markers.as_mut() else {
            return Ok(());
        };
        let Some(data) = is_transfer_packet(&call.packet.data) else {
            return Ok(());
        };
        let Some(directive) = parse_marker_memo(&data.memo, &self.bech32_prefix)? else {
            return Ok(());
        };

        let denom = local_denom_on_recv(&call.packet, &data.denom)?;
        if !denom.starts_with(VOUCHER_PREFIX) {
            debug!(target: "ibchooks", denom = %denom, "ignoring marker directive for native denom");
            return Ok(());
        }

        debug!(
            target: "ibchooks",
            denom = %denom,
            transfer_auths = directive.transfer_auths.len(),
            allow_force_transfer = directive.allow_force_transfer,
            "granting marker transfer authorities"
        );
        markers
            .grant_transfer_authorities(
                &denom,
                &directive.transfer_auths,
                directive.allow_force_transfer,
            )
            .map_err(|e| HooksError::MarkerGrant {
                description: e.to_string(),
            })
    }
}
