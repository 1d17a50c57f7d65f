//! Contains contract panics so they surface as ordinary errors.
use ibc_core::primitives::prelude::*;

use crate::types::error::HooksError;

/// Runs a contract call, converting a panic inside it into
/// [`HooksError::ContractPanic`].
#[cfg(feature = "std")]
pub(crate) fn contained<T>(call: impl FnOnce() -> Result<T, HooksError>) -> Result<T, HooksError> {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    catch_unwind(AssertUnwindSafe(call)).unwrap_or_else(|payload| {
        let description = if let Some(message) = payload.downcast_ref::<&str>() {
            message.to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "unknown panic".to_string()
        };
        Err(HooksError::ContractPanic { description })
    })
}

/// Without unwinding support a panic aborts the host anyway.
#[cfg(not(feature = "std"))]
pub(crate) fn contained<T>(call: impl FnOnce() -> Result<T, HooksError>) -> Result<T, HooksError> {
    call()
}
