//! In-memory collaborators of the hooks middleware.
mod bank;
mod channel;
mod contracts;
mod marker;
mod stack;
mod store;
mod transfer;

pub use bank::*;
pub use channel::*;
pub use contracts::*;
pub use marker::*;
pub use stack::*;
pub use store::*;
pub use transfer::*;
