use core::str::FromStr;

use ibc_app_transfer_types::{is_receiver_chain_source, PrefixedDenom, TracePrefix};
use ibc_core::channel::types::packet::Packet;
use ibc_core::primitives::prelude::*;
use sha2::{Digest, Sha256};

use crate::error::HooksError;
use crate::packet::is_transfer_packet;

/// Returns the voucher denomination of a full trace path: `ibc/` followed by the
/// upper-case hex SHA-256 of the path.
pub fn ibc_denom(full_path: &str) -> String {
    format!("ibc/{}", hex::encode_upper(Sha256::digest(full_path.as_bytes())))
}

/// Computes the denomination under which the tokens of an inbound transfer are
/// credited on this chain.
///
/// When this chain is the source of the token, the sender's voucher prefix is
/// stripped and the remaining trace, if any, is hashed. Otherwise this chain's
/// destination prefix is prepended and the result is hashed.
pub fn local_denom_on_recv(packet: &Packet, denom: &str) -> Result<String, HooksError> {
    let mut denom = PrefixedDenom::from_str(denom).map_err(|e| HooksError::InvalidPacket {
        reason: format!("invalid denomination `{denom}`: {e}"),
    })?;

    if is_receiver_chain_source(
        packet.port_id_on_a.clone(),
        packet.chan_id_on_a.clone(),
        &denom,
    ) {
        let prefix = TracePrefix::new(packet.port_id_on_a.clone(), packet.chan_id_on_a.clone());
        denom.remove_trace_prefix(&prefix);
        if denom.trace_path.is_empty() {
            Ok(denom.base_denom.to_string())
        } else {
            Ok(ibc_denom(&denom.to_string()))
        }
    } else {
        let prefix = TracePrefix::new(packet.port_id_on_b.clone(), packet.chan_id_on_b.clone());
        denom.add_trace_prefix(prefix);
        Ok(ibc_denom(&denom.to_string()))
    }
}

/// Like [`local_denom_on_recv`], for a packet already known to carry ICS-20 data.
///
/// # Panics
///
/// Panics if the packet data is not a transfer payload, or if its denomination
/// cannot be parsed (for instance a trace with an empty base denomination).
/// Callers establish both before resolving denominations; use
/// [`local_denom_on_recv`] when the payload has not been checked.
pub fn must_extract_denom_from_packet_on_recv(packet: &Packet) -> String {
    let Some(data) = is_transfer_packet(&packet.data) else {
        panic!("unable to unmarshal ICS20 packet data");
    };
    match local_denom_on_recv(packet, &data.denom) {
        Ok(denom) => denom,
        Err(e) => panic!("unable to resolve the local denomination of an ICS20 packet: {e}"),
    }
}
