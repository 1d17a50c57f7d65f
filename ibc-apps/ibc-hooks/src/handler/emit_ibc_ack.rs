use base64::prelude::*;
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use tracing::info;

use crate::context::{ContractKeeper, HooksStoreContext, Ics4Wrapper};
use crate::emit_error_acknowledgement;
use crate::guard::contained;
use crate::keeper::HooksKeeper;
use crate::types::error::HooksError;
use crate::types::events::AsyncAckEmittedEvent;
use crate::types::msgs::{MsgEmitIbcAck, MsgEmitIbcAckResponse};
use crate::types::sudo::{to_json_bytes, AsyncAckResponse, IbcAsyncMsg};

/// Asks the async ack actor of a received packet for its acknowledgement and
/// writes it. Equivalent to calling [`emit_ibc_ack_validate`], followed by
/// [`emit_ibc_ack_execute`].
pub fn emit_ibc_ack<S, W, C>(
    keeper: &mut HooksKeeper<S>,
    contracts: &mut W,
    channel: &mut C,
    bech32_prefix: &str,
    msg: MsgEmitIbcAck,
) -> Result<MsgEmitIbcAckResponse, HooksError>
where
    S: HooksStoreContext,
    W: ContractKeeper,
    C: Ics4Wrapper,
{
    emit_ibc_ack_validate(keeper, bech32_prefix, &msg)?;
    emit_ibc_ack_execute(keeper, contracts, channel, msg)
}

/// Checks the sender is the contract registered as the packet's ack actor.
/// Returns that actor.
pub fn emit_ibc_ack_validate<S>(
    keeper: &HooksKeeper<S>,
    bech32_prefix: &str,
    msg: &MsgEmitIbcAck,
) -> Result<Signer, HooksError>
where
    S: HooksStoreContext,
{
    msg.validate_basic(bech32_prefix)?;

    let actor = keeper
        .get_packet_ack_actor(&msg.channel, msg.sequence())
        .ok_or_else(|| HooksError::AckActorNotFound {
            channel: msg.channel.clone(),
            sequence: msg.sequence(),
        })?;
    if actor != msg.sender {
        return Err(HooksError::UnauthorizedAckActor {
            sender: msg.sender.clone(),
            actor,
        });
    }
    Ok(actor)
}

pub fn emit_ibc_ack_execute<S, W, C>(
    keeper: &mut HooksKeeper<S>,
    contracts: &mut W,
    channel: &mut C,
    msg: MsgEmitIbcAck,
) -> Result<MsgEmitIbcAckResponse, HooksError>
where
    S: HooksStoreContext,
    W: ContractKeeper,
    C: Ics4Wrapper,
{
    let channel_id = &msg.channel;
    let sequence = msg.sequence();

    let packet = keeper
        .get_received_packet(channel_id, sequence)?
        .ok_or_else(|| HooksError::ReceivedPacketNotFound {
            channel: channel_id.clone(),
            sequence,
        })?;

    let request = to_json_bytes(&IbcAsyncMsg::request_ack(channel_id, sequence))?;
    let response = contained(|| contracts.sudo(&msg.sender, &request))?;

    let (acknowledgement, contract_result, success): (Acknowledgement, String, bool) =
        match AsyncAckResponse::from_slice(&response)? {
            AsyncAckResponse::AckResponse { contract_ack } => {
                let contract_result = BASE64_STANDARD.encode(&contract_ack.contract_result);
                (contract_ack.into_acknowledgement()?, contract_result, true)
            }
            AsyncAckResponse::AckError {
                error_description,
                error_response,
            } => {
                let ack = emit_error_acknowledgement(
                    keeper.store_mut(),
                    HooksError::WasmError {
                        description: error_description,
                    },
                    &[error_response.as_str()],
                );
                (ack, String::new(), false)
            }
        };

    let ibc_ack = acknowledgement.as_bytes().to_vec();
    channel.write_acknowledgement(&packet, acknowledgement)?;

    keeper.delete_packet_ack_actor(channel_id, sequence);
    info!(
        target: "ibchooks",
        contract = %msg.sender,
        channel = %channel_id,
        sequence = %sequence,
        success,
        "emitted async acknowledgement"
    );
    keeper.store_mut().emit_event(
        AsyncAckEmittedEvent {
            contract: msg.sender.clone(),
            channel: channel_id.clone(),
            sequence,
            success,
        }
        .into(),
    );

    Ok(MsgEmitIbcAckResponse {
        contract_result,
        ibc_ack,
    })
}
