use cosmwasm_std::{to_json_binary, Binary, Deps, Env, Order, StdResult};
use cw_storage_plus::Bound;
use raffle_common::{NUM_WORDS, REQUEST_CONFIRMATIONS};

use crate::execute::check_upkeep;
use crate::msg::RoundHistoryResponse;
use crate::state::{CONFIG, PARTICIPANTS, ROUND, ROUNDS};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_round_info(deps: Deps) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    to_json_binary(&round)
}

pub fn query_entry_fee(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config.entry_fee)
}

pub fn query_interval(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config.interval_seconds)
}

pub fn query_key_hash(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config.key_hash)
}

pub fn query_callback_gas_limit(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config.callback_gas_limit)
}

pub fn query_request_confirmations() -> StdResult<Binary> {
    to_json_binary(&REQUEST_CONFIRMATIONS)
}

pub fn query_num_words() -> StdResult<Binary> {
    to_json_binary(&NUM_WORDS)
}

pub fn query_raffle_state(deps: Deps) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    to_json_binary(&round.state)
}

pub fn query_number_of_participants(deps: Deps) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    to_json_binary(&round.participant_count)
}

/// Participant at `index` in the current round. Errors if out of range.
pub fn query_participant(deps: Deps, index: u32) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    let participant = PARTICIPANTS.load(deps.storage, (round.round_id, index))?;
    to_json_binary(&participant)
}

pub fn query_pool_balance(deps: Deps) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    to_json_binary(&round.pool_balance)
}

pub fn query_last_timestamp(deps: Deps) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    to_json_binary(&round.last_timestamp)
}

pub fn query_recent_winner(deps: Deps) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    to_json_binary(&round.recent_winner)
}

pub fn query_outstanding_request(deps: Deps) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    to_json_binary(&round.outstanding_request)
}

pub fn query_upkeep_needed(deps: Deps, env: Env) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let round = ROUND.load(deps.storage)?;
    to_json_binary(&check_upkeep(&config, &round, env.block.time))
}

pub fn query_round(deps: Deps, round_id: u64) -> StdResult<Binary> {
    let result = ROUNDS.may_load(deps.storage, round_id)?;
    to_json_binary(&result)
}

pub fn query_round_history(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let rounds: Vec<_> = ROUNDS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(_, round)| round)
        .collect();

    to_json_binary(&RoundHistoryResponse { rounds })
}
