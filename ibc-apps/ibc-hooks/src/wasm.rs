//! The wasm hook: turns ICS-20 memos into contract executions and notifies
//! contracts about the outcome of the packets they sent.
use core::str::FromStr;

use ibc_app_transfer_types::{Amount, BaseCoin, BaseDenom};
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::packet::Packet;
use ibc_core::host::types::identifiers::Sequence;
use ibc_core::primitives::prelude::*;
use tracing::{debug, warn};

use crate::calls::{AcknowledgePacket, RecvPacket, SendPacket, TimeoutPacket};
use crate::context::{ContractKeeper, HooksStoreContext, IbcModule, Ics4Wrapper};
use crate::dispatch::Downstream;
use crate::emit_error_acknowledgement;
use crate::guard::contained;
use crate::keeper::HooksKeeper;
use crate::types::ack::{is_json_ack_error, ContractAck};
use crate::types::config::HooksConfig;
use crate::types::error::HooksError;
use crate::types::events::{CallbackErrorEvent, CallbackKind};
use crate::types::sudo::{
    to_json_bytes, IbcLifecycleComplete, IbcLifecycleCompleteMsg, OnRecvPacketAsyncAckResponse,
};
use crate::types::{
    callback_address, derive_intermediate_sender, is_transfer_packet, json_string_has_key,
    must_extract_denom_from_packet_on_recv, remove_memo_key, validate_and_parse_wasm_memo,
};

/// Hooks backed by the contract engine.
///
/// The hook is configured only when both the keeper and the contract engine
/// are present. An unconfigured hook forwards every call unchanged.
pub struct WasmHooks<S, W> {
    keeper: Option<HooksKeeper<S>>,
    contracts: Option<W>,
    config: HooksConfig,
}

impl<S, W> WasmHooks<S, W> {
    pub fn new(config: HooksConfig, keeper: Option<HooksKeeper<S>>, contracts: Option<W>) -> Self {
        Self {
            keeper,
            contracts,
            config,
        }
    }

    pub fn config(&self) -> &HooksConfig {
        &self.config
    }

    pub fn keeper(&self) -> Option<&HooksKeeper<S>> {
        self.keeper.as_ref()
    }

    pub fn keeper_mut(&mut self) -> Option<&mut HooksKeeper<S>> {
        self.keeper.as_mut()
    }

    pub fn contracts(&self) -> Option<&W> {
        self.contracts.as_ref()
    }

    pub fn is_configured(&self) -> bool {
        self.keeper.is_some() && self.contracts.is_some()
    }

    /// Splits the hook into its collaborators, or `None` when unconfigured.
    pub fn parts_mut(&mut self) -> Option<(&mut HooksKeeper<S>, &mut W, &HooksConfig)> {
        match (self.keeper.as_mut(), self.contracts.as_mut()) {
            (Some(keeper), Some(contracts)) => Some((keeper, contracts, &self.config)),
            _ => None,
        }
    }
}

impl<S, W> WasmHooks<S, W>
where
    S: HooksStoreContext,
    W: ContractKeeper,
{
    /// Builds a configured hook whose keeper uses the configured authority.
    pub fn configured(config: HooksConfig, store: S, contracts: W) -> Self {
        let keeper = HooksKeeper::new(store, config.authority.clone());
        Self::new(config, Some(keeper), Some(contracts))
    }

    /// Receives a transfer whose memo carries a `wasm` directive.
    ///
    /// The funds are credited to an intermediary account derived from the
    /// sender, then forwarded to the contract along with the directive's
    /// message. Packets without a directive take the default path.
    pub fn on_recv_packet_override<A, C>(
        &mut self,
        downstream: &mut Downstream<A, C>,
        call: &RecvPacket,
    ) -> Option<Acknowledgement>
    where
        A: IbcModule,
    {
        let Some((keeper, contracts, config)) = self.parts_mut() else {
            return downstream.app.on_recv_packet(&call.packet, &call.relayer);
        };
        let Some(mut data) = is_transfer_packet(&call.packet.data) else {
            return downstream.app.on_recv_packet(&call.packet, &call.relayer);
        };

        let directive =
            match validate_and_parse_wasm_memo(&data.memo, &data.receiver, &config.bech32_prefix) {
                Ok(Some(directive)) => directive,
                Ok(None) => return downstream.app.on_recv_packet(&call.packet, &call.relayer),
                Err(e) => {
                    let context = e.to_string();
                    return Some(emit_error_acknowledgement(
                        keeper.store_mut(),
                        e,
                        &["invalid wasm memo", context.as_str()],
                    ));
                }
            };

        let channel_id = &call.packet.chan_id_on_b;
        let intermediary =
            derive_intermediate_sender(channel_id, &data.sender, &config.bech32_prefix);
        debug!(
            target: "ibchooks",
            channel = %channel_id,
            sender = %data.sender,
            intermediary = %intermediary,
            "redirecting wasm-routed transfer"
        );

        data.receiver = intermediary.to_string();
        let rewritten = match data.to_bytes() {
            Ok(bytes) => Packet {
                data: bytes,
                ..call.packet.clone()
            },
            Err(e) => {
                return Some(emit_error_acknowledgement(keeper.store_mut(), e, &[]));
            }
        };

        let ack = downstream.app.on_recv_packet(&rewritten, &call.relayer)?;
        if is_json_ack_error(ack.as_bytes()) {
            return Some(ack);
        }

        let funds = match transferred_funds(&rewritten, &data.amount) {
            Ok(funds) => funds,
            Err(e) => return Some(emit_error_acknowledgement(keeper.store_mut(), e, &[])),
        };

        let response = match contained(|| {
            contracts.execute_contract(&intermediary, &directive.contract, &directive.msg, &funds)
        }) {
            Ok(response) => response,
            Err(e) => {
                let context = e.to_string();
                return Some(emit_error_acknowledgement(
                    keeper.store_mut(),
                    HooksError::WasmError {
                        description: context.clone(),
                    },
                    &[context.as_str()],
                ));
            }
        };

        if OnRecvPacketAsyncAckResponse::requested(&response) {
            if !keeper.is_in_allow_list(&directive.contract) {
                return Some(emit_error_acknowledgement(
                    keeper.store_mut(),
                    HooksError::AsyncAckNotAllowed {
                        contract: directive.contract,
                    },
                    &[],
                ));
            }
            keeper.store_packet_ack_actor(&rewritten, &directive.contract);
            debug!(
                target: "ibchooks",
                contract = %directive.contract,
                channel = %rewritten.chan_id_on_b,
                sequence = %rewritten.seq_on_a,
                "deferring acknowledgement to contract"
            );
            return None;
        }

        let contract_ack = ContractAck {
            contract_result: response,
            ibc_ack: ack.as_bytes().to_vec(),
        };
        match contract_ack.into_acknowledgement() {
            Ok(ack) => Some(ack),
            Err(e) => Some(emit_error_acknowledgement(keeper.store_mut(), e, &[])),
        }
    }

    /// Sends a transfer whose memo names a callback contract.
    ///
    /// The callback key is stripped from the memo before the packet goes out.
    /// Once the channel accepts the packet, the contract is recorded so it can
    /// be notified of the acknowledgement or timeout.
    pub fn send_packet_override<A, C>(
        &mut self,
        downstream: &mut Downstream<A, C>,
        call: &SendPacket,
    ) -> Result<Sequence, HooksError>
    where
        C: Ics4Wrapper,
    {
        let Some((keeper, _, config)) = self.parts_mut() else {
            return downstream.channel.send_packet(call.clone());
        };
        let Some(mut data) = is_transfer_packet(&call.data) else {
            return downstream.channel.send_packet(call.clone());
        };
        let (found, metadata) = json_string_has_key(&data.memo, &config.callback_key);
        if !found {
            return downstream.channel.send_packet(call.clone());
        }

        let (callback, memo) = remove_memo_key(metadata, &config.callback_key)?;
        data.memo = memo;
        let sequence = downstream.channel.send_packet(call.with_data(data.to_bytes()?))?;

        match callback.and_then(|value| callback_address(&value, &config.bech32_prefix)) {
            Some(contract) => {
                keeper.store_packet_callback(&call.chan_id_on_a, sequence, &contract);
                debug!(
                    target: "ibchooks",
                    contract = %contract,
                    channel = %call.chan_id_on_a,
                    sequence = %sequence,
                    "stored packet callback"
                );
            }
            None => debug!(
                target: "ibchooks",
                channel = %call.chan_id_on_a,
                sequence = %sequence,
                "ignoring invalid packet callback"
            ),
        }
        Ok(sequence)
    }

    /// Runs the default acknowledgement handler, then tells the packet's
    /// callback contract, if any, how the packet fared.
    pub fn on_acknowledgement_packet_override<A, C>(
        &mut self,
        downstream: &mut Downstream<A, C>,
        call: &AcknowledgePacket,
    ) -> Result<(), HooksError>
    where
        A: IbcModule,
    {
        downstream
            .app
            .on_acknowledgement_packet(&call.packet, &call.acknowledgement, &call.relayer)?;

        let ack = call.acknowledgement.as_bytes();
        let complete = IbcLifecycleComplete::ack(
            &call.packet.chan_id_on_a,
            call.packet.seq_on_a,
            ack,
            !is_json_ack_error(ack),
        );
        self.complete_lifecycle(&call.packet, complete, CallbackKind::Ack);
        Ok(())
    }

    /// Runs the default timeout handler, then tells the packet's callback
    /// contract, if any, that the packet timed out.
    pub fn on_timeout_packet_override<A, C>(
        &mut self,
        downstream: &mut Downstream<A, C>,
        call: &TimeoutPacket,
    ) -> Result<(), HooksError>
    where
        A: IbcModule,
    {
        downstream
            .app
            .on_timeout_packet(&call.packet, &call.relayer)?;

        let complete =
            IbcLifecycleComplete::timeout(&call.packet.chan_id_on_a, call.packet.seq_on_a);
        self.complete_lifecycle(&call.packet, complete, CallbackKind::Timeout);
        Ok(())
    }

    /// Delivers the lifecycle notification of an outbound packet and forgets its
    /// callback. The packet outcome is final, so a failing contract only
    /// produces an event.
    fn complete_lifecycle(
        &mut self,
        packet: &Packet,
        complete: IbcLifecycleComplete,
        kind: CallbackKind,
    ) {
        let Some((keeper, contracts, _)) = self.parts_mut() else {
            return;
        };
        let channel_id = &packet.chan_id_on_a;
        let sequence = packet.seq_on_a;
        let Some(contract) = keeper.get_packet_callback(channel_id, sequence) else {
            return;
        };

        let msg = match to_json_bytes(&IbcLifecycleCompleteMsg::from(complete)) {
            Ok(msg) => msg,
            Err(e) => {
                warn!(target: "ibchooks", error = %e, "cannot encode lifecycle callback");
                keeper.delete_packet_callback(channel_id, sequence);
                return;
            }
        };
        if let Err(e) = contained(|| contracts.sudo(&contract, &msg)) {
            warn!(
                target: "ibchooks",
                kind = %kind,
                contract = %contract,
                channel = %channel_id,
                sequence = %sequence,
                error = %e,
                "lifecycle callback failed"
            );
            keeper.store_mut().emit_event(
                CallbackErrorEvent {
                    kind,
                    contract: contract.clone(),
                    message: String::from_utf8_lossy(&msg).into_owned(),
                    error: e.to_string(),
                }
                .into(),
            );
        }

        keeper.delete_packet_callback(channel_id, sequence);
    }
}

/// The coins credited by the default receive, in their local denomination.
fn transferred_funds(packet: &Packet, amount: &str) -> Result<Vec<BaseCoin>, HooksError> {
    let amount = Amount::from_str(amount).map_err(|e| HooksError::InvalidPacket {
        reason: format!("amount is not an int: {e}"),
    })?;
    let denom = must_extract_denom_from_packet_on_recv(packet);
    let denom = BaseDenom::from_str(&denom).map_err(|e| HooksError::InvalidPacket {
        reason: format!("invalid local denomination `{denom}`: {e}"),
    })?;
    Ok(vec![BaseCoin { denom, amount }])
}
