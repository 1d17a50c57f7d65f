//! IBC hooks middleware.
//!
//! [`IbcHooksMiddleware`](dispatch::IbcHooksMiddleware) sits between the core
//! channel and the default transfer application. Every channel handshake step,
//! packet callback and ICS-4 call is routed through a [`HookTable`](dispatch::HookTable)
//! whose slots may override the default behavior or observe it before and after.
//!
//! The [`HooksAggregator`](aggregator::HooksAggregator) fills that table with the
//! wasm hook, which turns ICS-20 memos into contract executions and ack/timeout
//! callbacks, and the marker hook, which applies transfer authority directives.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]

#[cfg(test)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod aggregator;
pub mod calls;
pub mod context;
pub mod dispatch;
pub mod handler;
pub mod keeper;
pub mod marker;
pub mod query;
pub mod wasm;

mod ack;
mod guard;

pub use ack::emit_error_acknowledgement;

/// Re-exports the data structures of the hooks middleware.
pub mod types {
    #[doc(inline)]
    pub use ibc_app_hooks_types::*;
}
