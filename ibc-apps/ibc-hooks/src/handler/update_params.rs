use ibc_core::primitives::prelude::*;
use tracing::info;

use crate::context::HooksStoreContext;
use crate::keeper::HooksKeeper;
use crate::types::error::HooksError;
use crate::types::events::ParamsUpdatedEvent;
use crate::types::msgs::MsgUpdateParams;

/// Replaces the module parameters. Equivalent to calling
/// [`update_params_validate`], followed by [`update_params_execute`].
pub fn update_params<S>(
    keeper: &mut HooksKeeper<S>,
    bech32_prefix: &str,
    msg: MsgUpdateParams,
) -> Result<(), HooksError>
where
    S: HooksStoreContext,
{
    update_params_validate(keeper, bech32_prefix, &msg)?;
    update_params_execute(keeper, msg)
}

/// Checks the message is well formed and signed by the module authority.
pub fn update_params_validate<S>(
    keeper: &HooksKeeper<S>,
    bech32_prefix: &str,
    msg: &MsgUpdateParams,
) -> Result<(), HooksError>
where
    S: HooksStoreContext,
{
    if &msg.authority != keeper.authority() {
        return Err(HooksError::UnauthorizedParamsUpdate {
            expected: keeper.authority().clone(),
            actual: msg.authority.clone(),
        });
    }
    msg.validate_basic(bech32_prefix)
}

/// Stores the new allow-list wholesale.
pub fn update_params_execute<S>(
    keeper: &mut HooksKeeper<S>,
    msg: MsgUpdateParams,
) -> Result<(), HooksError>
where
    S: HooksStoreContext,
{
    keeper.set_params(&msg.params)?;

    let allowed = msg.params.allowed_async_ack_contracts;
    info!(
        target: "ibchooks",
        allowed_async_ack_contracts = allowed.len(),
        "updated params"
    );
    let store = keeper.store_mut();
    store.log_message(format!(
        "ibchooks params updated: {} allowed async ack contracts",
        allowed.len()
    ));
    store.emit_event(
        ParamsUpdatedEvent {
            allowed_async_ack_contracts: allowed,
        }
        .into(),
    );
    Ok(())
}
