//! Read-only queries of the hooks middleware.
use crate::context::HooksStoreContext;
use crate::keeper::HooksKeeper;
use crate::types::error::HooksError;
use crate::types::msgs::QueryParamsResponse;

/// Returns the current module parameters.
pub fn params<S>(keeper: &HooksKeeper<S>) -> Result<QueryParamsResponse, HooksError>
where
    S: HooksStoreContext,
{
    Ok(QueryParamsResponse {
        params: keeper.get_params()?,
    })
}
