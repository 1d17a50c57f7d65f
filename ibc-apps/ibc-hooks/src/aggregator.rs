//! Composes the wasm and marker hooks into the single hook table installed on
//! the middleware.
//!
//! Each hook acts as a packet classifier. For every packet operation the
//! classifiers are asked in order whether they handle the packet. The first
//! one that does produces the result; if none does, the default path runs.
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::host::types::identifiers::Sequence;
use ibc_core::primitives::prelude::*;
use tracing::error;

use crate::calls::{AcknowledgePacket, RecvPacket, SendPacket, TimeoutPacket};
use crate::context::{ContractKeeper, HooksStoreContext, IbcModule, Ics4Wrapper, MarkerKeeper};
use crate::dispatch::{Downstream, Hook, HookTable, Hooks};
use crate::emit_error_acknowledgement;
use crate::marker::MarkerHooks;
use crate::types::ack::error_acknowledgement;
use crate::types::error::HooksError;
use crate::types::{is_transfer_packet, json_string_has_key, WASM_KEY};
use crate::wasm::WasmHooks;

/// Outcome of offering a packet to a classifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Routing<T> {
    /// The classifier handled the packet and produced this result.
    Handled(T),
    /// The packet is not for this classifier.
    Pass,
}

/// A hook that decides, packet by packet, whether it takes over an operation.
pub trait PacketClassifier<A, C> {
    fn is_configured(&self) -> bool;

    /// An `Err` is a rejected packet; the aggregator acknowledges it with an
    /// error.
    fn classify_recv(
        &mut self,
        _downstream: &mut Downstream<A, C>,
        _call: &RecvPacket,
    ) -> Routing<Result<Option<Acknowledgement>, HooksError>> {
        Routing::Pass
    }

    fn classify_send(
        &mut self,
        _downstream: &mut Downstream<A, C>,
        _call: &SendPacket,
    ) -> Routing<Result<Sequence, HooksError>> {
        Routing::Pass
    }

    fn classify_ack(
        &mut self,
        _downstream: &mut Downstream<A, C>,
        _call: &AcknowledgePacket,
    ) -> Routing<Result<(), HooksError>> {
        Routing::Pass
    }

    fn classify_timeout(
        &mut self,
        _downstream: &mut Downstream<A, C>,
        _call: &TimeoutPacket,
    ) -> Routing<Result<(), HooksError>> {
        Routing::Pass
    }
}

impl<S, W, A, C> PacketClassifier<A, C> for WasmHooks<S, W>
where
    S: HooksStoreContext,
    W: ContractKeeper,
    A: IbcModule,
    C: Ics4Wrapper,
{
    fn is_configured(&self) -> bool {
        WasmHooks::is_configured(self)
    }

    /// Transfers whose memo carries a `wasm` key.
    fn classify_recv(
        &mut self,
        downstream: &mut Downstream<A, C>,
        call: &RecvPacket,
    ) -> Routing<Result<Option<Acknowledgement>, HooksError>> {
        match is_transfer_packet(&call.packet.data) {
            Some(data) if json_string_has_key(&data.memo, WASM_KEY).0 => {
                Routing::Handled(Ok(self.on_recv_packet_override(downstream, call)))
            }
            _ => Routing::Pass,
        }
    }

    /// Transfers whose memo names a callback contract.
    fn classify_send(
        &mut self,
        downstream: &mut Downstream<A, C>,
        call: &SendPacket,
    ) -> Routing<Result<Sequence, HooksError>> {
        match is_transfer_packet(&call.data) {
            Some(data) if json_string_has_key(&data.memo, &self.config().callback_key).0 => {
                Routing::Handled(self.send_packet_override(downstream, call))
            }
            _ => Routing::Pass,
        }
    }

    fn classify_ack(
        &mut self,
        downstream: &mut Downstream<A, C>,
        call: &AcknowledgePacket,
    ) -> Routing<Result<(), HooksError>> {
        Routing::Handled(self.on_acknowledgement_packet_override(downstream, call))
    }

    fn classify_timeout(
        &mut self,
        downstream: &mut Downstream<A, C>,
        call: &TimeoutPacket,
    ) -> Routing<Result<(), HooksError>> {
        Routing::Handled(self.on_timeout_packet_override(downstream, call))
    }
}

impl<M, A, C> PacketClassifier<A, C> for MarkerHooks<M>
where
    M: MarkerKeeper,
    A: IbcModule,
{
    fn is_configured(&self) -> bool {
        MarkerHooks::is_configured(self)
    }

    /// Every transfer the wasm hook passed on.
    fn classify_recv(
        &mut self,
        downstream: &mut Downstream<A, C>,
        call: &RecvPacket,
    ) -> Routing<Result<Option<Acknowledgement>, HooksError>> {
        Routing::Handled(self.on_recv_packet_override(downstream, call))
    }
}

/// The wasm hook followed by the marker hook.
pub struct HooksAggregator<S, W, M> {
    pub wasm: WasmHooks<S, W>,
    pub marker: MarkerHooks<M>,
}

impl<S, W, M> HooksAggregator<S, W, M> {
    pub fn new(wasm: WasmHooks<S, W>, marker: MarkerHooks<M>) -> Self {
        Self { wasm, marker }
    }
}

impl<S, W, M> HooksAggregator<S, W, M>
where
    S: HooksStoreContext,
    W: ContractKeeper,
    M: MarkerKeeper,
{
    fn classifiers<A, C>(&mut self) -> [&mut dyn PacketClassifier<A, C>; 2]
    where
        A: IbcModule,
        C: Ics4Wrapper,
    {
        [&mut self.wasm, &mut self.marker]
    }

    /// Both hooks must be configured and the packet must be a transfer for
    /// any hook to see it.
    pub fn on_recv_packet_override<A, C>(
        &mut self,
        downstream: &mut Downstream<A, C>,
        call: &RecvPacket,
    ) -> Option<Acknowledgement>
    where
        A: IbcModule,
        C: Ics4Wrapper,
    {
        let mut classifiers = self.classifiers::<A, C>();
        let routable = classifiers.iter().all(|c| c.is_configured())
            && is_transfer_packet(&call.packet.data).is_some();
        let routed = if routable {
            classifiers
                .iter_mut()
                .find_map(|classifier| match classifier.classify_recv(downstream, call) {
                    Routing::Handled(result) => Some(result),
                    Routing::Pass => None,
                })
        } else {
            None
        };

        match routed {
            Some(Ok(ack)) => ack,
            Some(Err(e)) => Some(self.reject_recv(e)),
            None => downstream.app.on_recv_packet(&call.packet, &call.relayer),
        }
    }

    fn reject_recv(&mut self, err: HooksError) -> Acknowledgement {
        error!(target: "ibchooks", error = %err, "rejecting inbound transfer");
        match self.wasm.keeper_mut() {
            Some(keeper) => {
                let context = err.to_string();
                emit_error_acknowledgement(
                    keeper.store_mut(),
                    err,
                    &["marker directive rejected", context.as_str()],
                )
            }
            None => error_acknowledgement(&err),
        }
    }

    pub fn send_packet_override<A, C>(
        &mut self,
        downstream: &mut Downstream<A, C>,
        call: &SendPacket,
    ) -> Result<Sequence, HooksError>
    where
        A: IbcModule,
        C: Ics4Wrapper,
    {
        if is_transfer_packet(&call.data).is_some() {
            for classifier in self.classifiers::<A, C>() {
                if !classifier.is_configured() {
                    continue;
                }
                if let Routing::Handled(result) = classifier.classify_send(downstream, call) {
                    return result;
                }
            }
        }
        downstream.channel.send_packet(call.clone())
    }

    pub fn on_acknowledgement_packet_override<A, C>(
        &mut self,
        downstream: &mut Downstream<A, C>,
        call: &AcknowledgePacket,
    ) -> Result<(), HooksError>
    where
        A: IbcModule,
        C: Ics4Wrapper,
    {
        for classifier in self.classifiers::<A, C>() {
            if !classifier.is_configured() {
                continue;
            }
            if let Routing::Handled(result) = classifier.classify_ack(downstream, call) {
                return result;
            }
        }
        downstream
            .app
            .on_acknowledgement_packet(&call.packet, &call.acknowledgement, &call.relayer)
    }

    pub fn on_timeout_packet_override<A, C>(
        &mut self,
        downstream: &mut Downstream<A, C>,
        call: &TimeoutPacket,
    ) -> Result<(), HooksError>
    where
        A: IbcModule,
        C: Ics4Wrapper,
    {
        for classifier in self.classifiers::<A, C>() {
            if !classifier.is_configured() {
                continue;
            }
            if let Routing::Handled(result) = classifier.classify_timeout(downstream, call) {
                return result;
            }
        }
        downstream.app.on_timeout_packet(&call.packet, &call.relayer)
    }
}

impl<S, W, M, A, C> Hooks<A, C> for HooksAggregator<S, W, M>
where
    S: HooksStoreContext,
    W: ContractKeeper,
    M: MarkerKeeper,
    A: IbcModule,
    C: Ics4Wrapper,
{
    fn hook_table(&self) -> HookTable<Self, Downstream<A, C>> {
        HookTable {
            recv_packet: Hook::new().with_override(Self::on_recv_packet_override::<A, C>),
            send_packet: Hook::new().with_override(Self::send_packet_override::<A, C>),
            acknowledgement_packet: Hook::new()
                .with_override(Self::on_acknowledgement_packet_override::<A, C>),
            timeout_packet: Hook::new().with_override(Self::on_timeout_packet_override::<A, C>),
            ..HookTable::default()
        }
    }
}
