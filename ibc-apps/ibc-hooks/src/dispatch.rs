//! The hook dispatch engine.
//!
//! Each lifecycle operation owns one [`Hook`] slot in a [`HookTable`]. A slot
//! holds up to three plain function pointers:
//!
//! - `override`: replaces the default call entirely. It receives the
//!   [`Downstream`] so it can still reach the default application or channel.
//! - `before`: observes the arguments before the default call.
//! - `after`: observes the arguments and the default's result.
//!
//! When an override is present neither observer runs. Nothing rolls back an
//! observer's side effects when the default call fails, so an `after` hook
//! that should only act on success must inspect the result it is given.
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::{Counterparty, Order};
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::Version;
use ibc_core::host::types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;

use crate::calls::{
    AcknowledgePacket, ChanOpenAck, ChanOpenInit, ChanOpenTry, ChannelEnd, RecvPacket, SendPacket,
    TimeoutPacket, WriteAcknowledgement,
};
use crate::context::{IbcModule, Ics4Wrapper};
use crate::types::error::HooksError;

/// The default path of the middleware: the wrapped application and the
/// channel it sends through.
pub struct Downstream<A, C> {
    pub app: A,
    pub channel: C,
}

pub type OverrideFn<H, D, I, R> = fn(&mut H, &mut D, &I) -> R;
pub type BeforeFn<H, I> = fn(&mut H, &I);
pub type AfterFn<H, I, R> = fn(&mut H, &I, &R);

/// The override/before/after slots of one lifecycle operation taking `I` and
/// returning `R`, for hooks state `H` over a default path `D`.
pub struct Hook<H, D, I, R> {
    pub override_fn: Option<OverrideFn<H, D, I, R>>,
    pub before_fn: Option<BeforeFn<H, I>>,
    pub after_fn: Option<AfterFn<H, I, R>>,
}

impl<H, D, I, R> Hook<H, D, I, R> {
    pub const fn new() -> Self {
        Self {
            override_fn: None,
            before_fn: None,
            after_fn: None,
        }
    }

    pub fn with_override(mut self, f: OverrideFn<H, D, I, R>) -> Self {
        self.override_fn = Some(f);
        self
    }

    pub fn with_before(mut self, f: BeforeFn<H, I>) -> Self {
        self.before_fn = Some(f);
        self
    }

    pub fn with_after(mut self, f: AfterFn<H, I, R>) -> Self {
        self.after_fn = Some(f);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.override_fn.is_none() && self.before_fn.is_none() && self.after_fn.is_none()
    }

    /// Routes one call through this slot, falling back to `default`.
    pub fn dispatch(
        &self,
        hooks: &mut H,
        downstream: &mut D,
        call: &I,
        default: impl FnOnce(&mut D, &I) -> R,
    ) -> R {
        if let Some(override_fn) = self.override_fn {
            return override_fn(hooks, downstream, call);
        }
        if let Some(before_fn) = self.before_fn {
            before_fn(hooks, call);
        }
        let result = default(downstream, call);
        if let Some(after_fn) = self.after_fn {
            after_fn(hooks, call, &result);
        }
        result
    }
}

impl<H, D, I, R> Clone for Hook<H, D, I, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H, D, I, R> Copy for Hook<H, D, I, R> {}

impl<H, D, I, R> Default for Hook<H, D, I, R> {
    fn default() -> Self {
        Self::new()
    }
}

/// One [`Hook`] slot per lifecycle operation.
pub struct HookTable<H, D> {
    pub chan_open_init: Hook<H, D, ChanOpenInit, Result<Version, HooksError>>,
    pub chan_open_try: Hook<H, D, ChanOpenTry, Result<Version, HooksError>>,
    pub chan_open_ack: Hook<H, D, ChanOpenAck, Result<(), HooksError>>,
    pub chan_open_confirm: Hook<H, D, ChannelEnd, Result<(), HooksError>>,
    pub chan_close_init: Hook<H, D, ChannelEnd, Result<(), HooksError>>,
    pub chan_close_confirm: Hook<H, D, ChannelEnd, Result<(), HooksError>>,
    pub recv_packet: Hook<H, D, RecvPacket, Option<Acknowledgement>>,
    pub acknowledgement_packet: Hook<H, D, AcknowledgePacket, Result<(), HooksError>>,
    pub timeout_packet: Hook<H, D, TimeoutPacket, Result<(), HooksError>>,
    pub send_packet: Hook<H, D, SendPacket, Result<Sequence, HooksError>>,
    pub write_acknowledgement: Hook<H, D, WriteAcknowledgement, Result<(), HooksError>>,
    pub get_app_version: Hook<H, D, ChannelEnd, Option<Version>>,
}

impl<H, D> Default for HookTable<H, D> {
    fn default() -> Self {
        Self {
            chan_open_init: Hook::new(),
            chan_open_try: Hook::new(),
            chan_open_ack: Hook::new(),
            chan_open_confirm: Hook::new(),
            chan_close_init: Hook::new(),
            chan_close_confirm: Hook::new(),
            recv_packet: Hook::new(),
            acknowledgement_packet: Hook::new(),
            timeout_packet: Hook::new(),
            send_packet: Hook::new(),
            write_acknowledgement: Hook::new(),
            get_app_version: Hook::new(),
        }
    }
}

/// A hooks object that knows which slots it fills.
pub trait Hooks<A, C>: Sized {
    fn hook_table(&self) -> HookTable<Self, Downstream<A, C>>;
}

/// Hooks that fill no slot: the middleware behaves exactly like its downstream.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl<A, C> Hooks<A, C> for NoHooks {
    fn hook_table(&self) -> HookTable<Self, Downstream<A, C>> {
        HookTable::default()
    }
}

/// The IBC middleware wrapping application `A` and channel `C` with hooks `H`.
pub struct IbcHooksMiddleware<A, C, H> {
    pub downstream: Downstream<A, C>,
    pub hooks: H,
    table: HookTable<H, Downstream<A, C>>,
}

impl<A, C, H> IbcHooksMiddleware<A, C, H>
where
    H: Hooks<A, C>,
{
    pub fn new(app: A, channel: C, hooks: H) -> Self {
        let table = hooks.hook_table();
        Self::with_table(app, channel, hooks, table)
    }
}

impl<A, C, H> IbcHooksMiddleware<A, C, H> {
    pub fn with_table(app: A, channel: C, hooks: H, table: HookTable<H, Downstream<A, C>>) -> Self {
        Self {
            downstream: Downstream { app, channel },
            hooks,
            table,
        }
    }
}

impl<A, C, H> IbcModule for IbcHooksMiddleware<A, C, H>
where
    A: IbcModule,
    C: Ics4Wrapper,
{
    fn on_chan_open_init(
        &mut self,
        order: Order,
        connection_hops: &[ConnectionId],
        port_id: &PortId,
        channel_id: &ChannelId,
        counterparty: &Counterparty,
        version: &Version,
    ) -> Result<Version, HooksError> {
        let call = ChanOpenInit {
            order,
            connection_hops: connection_hops.to_vec(),
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            counterparty: counterparty.clone(),
            version: version.clone(),
        };
        self.table
            .chan_open_init
            .dispatch(&mut self.hooks, &mut self.downstream, &call, |d, c| {
                d.app.on_chan_open_init(
                    c.order,
                    &c.connection_hops,
                    &c.port_id,
                    &c.channel_id,
                    &c.counterparty,
                    &c.version,
                )
            })
    }

    fn on_chan_open_try(
        &mut self,
        order: Order,
        connection_hops: &[ConnectionId],
        port_id: &PortId,
        channel_id: &ChannelId,
        counterparty: &Counterparty,
        counterparty_version: &Version,
    ) -> Result<Version, HooksError> {
        let call = ChanOpenTry {
            order,
            connection_hops: connection_hops.to_vec(),
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            counterparty: counterparty.clone(),
            counterparty_version: counterparty_version.clone(),
        };
        self.table
            .chan_open_try
            .dispatch(&mut self.hooks, &mut self.downstream, &call, |d, c| {
                d.app.on_chan_open_try(
                    c.order,
                    &c.connection_hops,
                    &c.port_id,
                    &c.channel_id,
                    &c.counterparty,
                    &c.counterparty_version,
                )
            })
    }

    fn on_chan_open_ack(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
        counterparty_channel_id: &ChannelId,
        counterparty_version: &Version,
    ) -> Result<(), HooksError> {
        let call = ChanOpenAck {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            counterparty_channel_id: counterparty_channel_id.clone(),
            counterparty_version: counterparty_version.clone(),
        };
        self.table
            .chan_open_ack
            .dispatch(&mut self.hooks, &mut self.downstream, &call, |d, c| {
                d.app.on_chan_open_ack(
                    &c.port_id,
                    &c.channel_id,
                    &c.counterparty_channel_id,
                    &c.counterparty_version,
                )
            })
    }

    fn on_chan_open_confirm(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<(), HooksError> {
        let call = channel_end(port_id, channel_id);
        self.table
            .chan_open_confirm
            .dispatch(&mut self.hooks, &mut self.downstream, &call, |d, c| {
                d.app.on_chan_open_confirm(&c.port_id, &c.channel_id)
            })
    }

    fn on_chan_close_init(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<(), HooksError> {
        let call = channel_end(port_id, channel_id);
        self.table
            .chan_close_init
            .dispatch(&mut self.hooks, &mut self.downstream, &call, |d, c| {
                d.app.on_chan_close_init(&c.port_id, &c.channel_id)
            })
    }

    fn on_chan_close_confirm(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<(), HooksError> {
        let call = channel_end(port_id, channel_id);
        self.table
            .chan_close_confirm
            .dispatch(&mut self.hooks, &mut self.downstream, &call, |d, c| {
                d.app.on_chan_close_confirm(&c.port_id, &c.channel_id)
            })
    }

    fn on_recv_packet(&mut self, packet: &Packet, relayer: &Signer) -> Option<Acknowledgement> {
        let call = RecvPacket {
            packet: packet.clone(),
            relayer: relayer.clone(),
        };
        self.table
            .recv_packet
            .dispatch(&mut self.hooks, &mut self.downstream, &call, |d, c| {
                d.app.on_recv_packet(&c.packet, &c.relayer)
            })
    }

    fn on_acknowledgement_packet(
        &mut self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        relayer: &Signer,
    ) -> Result<(), HooksError> {
        let call = AcknowledgePacket {
            packet: packet.clone(),
            acknowledgement: acknowledgement.clone(),
            relayer: relayer.clone(),
        };
        self.table.acknowledgement_packet.dispatch(
            &mut self.hooks,
            &mut self.downstream,
            &call,
            |d, c| {
                d.app
                    .on_acknowledgement_packet(&c.packet, &c.acknowledgement, &c.relayer)
            },
        )
    }

    fn on_timeout_packet(&mut self, packet: &Packet, relayer: &Signer) -> Result<(), HooksError> {
        let call = TimeoutPacket {
            packet: packet.clone(),
            relayer: relayer.clone(),
        };
        self.table
            .timeout_packet
            .dispatch(&mut self.hooks, &mut self.downstream, &call, |d, c| {
                d.app.on_timeout_packet(&c.packet, &c.relayer)
            })
    }
}

impl<A, C, H> Ics4Wrapper for IbcHooksMiddleware<A, C, H>
where
    C: Ics4Wrapper,
{
    fn send_packet(&mut self, packet: SendPacket) -> Result<Sequence, HooksError> {
        self.table
            .send_packet
            .dispatch(&mut self.hooks, &mut self.downstream, &packet, |d, c| {
                d.channel.send_packet(c.clone())
            })
    }

    fn write_acknowledgement(
        &mut self,
        packet: &Packet,
        acknowledgement: Acknowledgement,
    ) -> Result<(), HooksError> {
        let call = WriteAcknowledgement {
            packet: packet.clone(),
            acknowledgement,
        };
        self.table.write_acknowledgement.dispatch(
            &mut self.hooks,
            &mut self.downstream,
            &call,
            |d, c| {
                d.channel
                    .write_acknowledgement(&c.packet, c.acknowledgement.clone())
            },
        )
    }

    fn get_app_version(&mut self, port_id: &PortId, channel_id: &ChannelId) -> Option<Version> {
        let call = channel_end(port_id, channel_id);
        self.table
            .get_app_version
            .dispatch(&mut self.hooks, &mut self.downstream, &call, |d, c| {
                d.channel.get_app_version(&c.port_id, &c.channel_id)
            })
    }
}

fn channel_end(port_id: &PortId, channel_id: &ChannelId) -> ChannelEnd {
    ChannelEnd {
        port_id: port_id.clone(),
        channel_id: channel_id.clone(),
    }
}
