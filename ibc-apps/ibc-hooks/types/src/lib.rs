//! Data structures of the IBC hooks middleware, which lets token transfer packets trigger
//! smart contract calls and lifecycle notifications through directives carried in the
//! ICS-20 memo field.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]

#[cfg(any(test, feature = "std"))]
extern crate std;

mod address;
mod denom;
mod memo;
mod packet;

pub use address::*;
pub use denom::*;
pub use memo::*;
pub use packet::*;
pub mod ack;
pub mod config;
pub mod error;
pub mod events;
pub mod msgs;
pub mod params;
pub mod sudo;

/// Module identifier of the hooks middleware.
pub const MODULE_ID_STR: &str = "ibchooks";

/// Memo key routing an inbound transfer to a contract execution.
pub const WASM_KEY: &str = "wasm";

/// Memo key requesting an ack/timeout notification for an outbound transfer.
pub const IBC_CALLBACK_KEY: &str = "ibc_callback";

/// Memo key carrying transfer authority directives for IBC vouchers.
pub const MARKER_KEY: &str = "marker";

/// Domain tag hashed into every intermediary sender address.
pub const SENDER_PREFIX: &str = "ibc-wasm-hook-intermediary";
