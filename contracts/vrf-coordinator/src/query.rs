use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdResult};
use cw_storage_plus::Bound;

use crate::state::{CONFIG, COUNTERS, FULFILLMENTS, PENDING_REQUESTS, SUBSCRIPTIONS};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_subscription(deps: Deps, subscription_id: u64) -> StdResult<Binary> {
    let sub = SUBSCRIPTIONS.may_load(deps.storage, subscription_id)?;
    to_json_binary(&sub)
}

pub fn query_request(deps: Deps, request_id: u64) -> StdResult<Binary> {
    let request = PENDING_REQUESTS.may_load(deps.storage, request_id)?;
    to_json_binary(&request)
}

/// Pending requests in id order. Operators poll this to find work.
pub fn query_pending_requests(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(30).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let requests: Vec<_> = PENDING_REQUESTS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(_, request)| request)
        .collect();

    to_json_binary(&requests)
}

pub fn query_fulfillment(deps: Deps, request_id: u64) -> StdResult<Binary> {
    let fulfillment = FULFILLMENTS.may_load(deps.storage, request_id)?;
    to_json_binary(&fulfillment)
}

pub fn query_next_request_id(deps: Deps) -> StdResult<Binary> {
    let counters = COUNTERS.load(deps.storage)?;
    to_json_binary(&counters.next_request_id)
}

pub fn query_collected_fees(deps: Deps) -> StdResult<Binary> {
    let counters = COUNTERS.load(deps.storage)?;
    to_json_binary(&counters.collected_fees)
}
