//! Implements the messages of the hooks middleware.
mod emit_ibc_ack;
mod update_params;

pub use emit_ibc_ack::*;
pub use update_params::*;
