use cosmwasm_std::{
    coins, from_json, to_json_binary, BankMsg, Deps, DepsMut, Env, Event, MessageInfo,
    QueryRequest, Reply, Response, SubMsg, SubMsgResult, Timestamp, Uint128, Uint256, WasmMsg,
    WasmQuery,
};
use raffle_common::{winner_index, word_hex, RaffleState, NUM_WORDS, REQUEST_CONFIRMATIONS};

use crate::error::ContractError;
use crate::msg::{
    CoordinatorExecuteMsg, CoordinatorQueryMsg, PayoutPayload, UpdateConfigParams, UpkeepResponse,
};
use crate::state::{
    OutstandingRequest, RaffleConfig, RoundInfo, RoundResult, CONFIG, PARTICIPANTS, ROUND, ROUNDS,
};

pub const PAYOUT_REPLY_ID: u64 = 1;

pub const MIN_INTERVAL_SECONDS: u64 = 1;
/// One year
pub const MAX_INTERVAL_SECONDS: u64 = 365 * 24 * 60 * 60;

pub const MIN_FULFILLMENT_TIMEOUT_SECONDS: u64 = 300;
/// One week
pub const MAX_FULFILLMENT_TIMEOUT_SECONDS: u64 = 7 * 24 * 60 * 60;

pub const MIN_CALLBACK_GAS_LIMIT: u64 = 100_000;
pub const MAX_CALLBACK_GAS_LIMIT: u64 = 2_500_000;

// ─── Config validation ───

pub fn validate_entry_fee(entry_fee: Uint128) -> Result<(), ContractError> {
    if entry_fee.is_zero() {
        return Err(ContractError::InvalidEntryFee);
    }
    Ok(())
}

pub fn validate_interval(seconds: u64) -> Result<(), ContractError> {
    if !(MIN_INTERVAL_SECONDS..=MAX_INTERVAL_SECONDS).contains(&seconds) {
        return Err(ContractError::InvalidInterval {
            value: seconds,
            min: MIN_INTERVAL_SECONDS,
            max: MAX_INTERVAL_SECONDS,
        });
    }
    Ok(())
}

pub fn validate_fulfillment_timeout(seconds: u64) -> Result<(), ContractError> {
    if !(MIN_FULFILLMENT_TIMEOUT_SECONDS..=MAX_FULFILLMENT_TIMEOUT_SECONDS).contains(&seconds) {
        return Err(ContractError::InvalidFulfillmentTimeout {
            value: seconds,
            min: MIN_FULFILLMENT_TIMEOUT_SECONDS,
            max: MAX_FULFILLMENT_TIMEOUT_SECONDS,
        });
    }
    Ok(())
}

pub fn validate_callback_gas_limit(gas: u64) -> Result<(), ContractError> {
    if !(MIN_CALLBACK_GAS_LIMIT..=MAX_CALLBACK_GAS_LIMIT).contains(&gas) {
        return Err(ContractError::InvalidCallbackGasLimit {
            value: gas,
            min: MIN_CALLBACK_GAS_LIMIT,
            max: MAX_CALLBACK_GAS_LIMIT,
        });
    }
    Ok(())
}

/// Key hash must be exactly 32 bytes, hex-encoded.
pub fn validate_key_hash(key_hash: &str) -> Result<(), ContractError> {
    let bytes = hex::decode(key_hash).map_err(|_| ContractError::InvalidKeyHash {
        reason: "not valid hex".to_string(),
    })?;
    if bytes.len() != 32 {
        return Err(ContractError::InvalidKeyHash {
            reason: format!("expected 32 bytes, got {}", bytes.len()),
        });
    }
    Ok(())
}

// ─── Upkeep predicate ───

/// Pure upkeep check. True iff the raffle is open, the interval has elapsed
/// since the round anchor, and there is at least one entry and a non-zero pool.
pub fn check_upkeep(config: &RaffleConfig, round: &RoundInfo, now: Timestamp) -> UpkeepResponse {
    let elapsed_seconds = round.elapsed_seconds(now);
    let is_open = round.state == RaffleState::Open;
    let time_passed = elapsed_seconds >= config.interval_seconds;
    let has_participants = round.participant_count > 0;
    let has_balance = !round.pool_balance.is_zero();

    UpkeepResponse {
        upkeep_needed: is_open && time_passed && has_participants && has_balance,
        state: round.state,
        elapsed_seconds,
        interval_seconds: config.interval_seconds,
        participant_count: round.participant_count,
        pool_balance: round.pool_balance,
    }
}

// ─── Entry ───

/// Amount of the raffle denom attached to the call. No coin at all counts as zero.
fn paid_amount(info: &MessageInfo, denom: &str) -> Result<Uint128, ContractError> {
    match info.funds.as_slice() {
        [] => Ok(Uint128::zero()),
        [coin] if coin.denom == denom => Ok(coin.amount),
        [coin] => Err(ContractError::WrongDenom {
            expected: denom.to_string(),
            denom: coin.denom.clone(),
        }),
        _ => Err(ContractError::InvalidFunds {
            denom: denom.to_string(),
        }),
    }
}

/// Enter the current round. The full attached amount goes into the pool.
pub fn enter(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let amount = paid_amount(&info, &config.denom)?;
    if amount < config.entry_fee {
        return Err(ContractError::InsufficientPayment {
            sent: amount,
            required: config.entry_fee,
        });
    }

    let mut round = ROUND.load(deps.storage)?;
    if round.state != RaffleState::Open {
        return Err(ContractError::RoundNotOpen { state: round.state });
    }

    let entry_index = round.participant_count;
    PARTICIPANTS.save(deps.storage, (round.round_id, entry_index), &info.sender)?;
    round.participant_count += 1;
    round.pool_balance = round.pool_balance.checked_add(amount)?;
    ROUND.save(deps.storage, &round)?;

    Ok(Response::new()
        .add_attribute("action", "enter")
        .add_attribute("participant", info.sender.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("raffle_entered")
                .add_attribute("participant", info.sender.to_string())
                .add_attribute("round_id", round.round_id.to_string())
                .add_attribute("entry_index", entry_index.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("pool_balance", round.pool_balance.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

// ─── Round start ───

/// Close entries and request randomness. Anyone can call once upkeep is needed.
pub fn start_round(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut round = ROUND.load(deps.storage)?;

    let upkeep = check_upkeep(&config, &round, env.block.time);
    if !upkeep.upkeep_needed {
        return Err(ContractError::UpkeepNotNeeded {
            state: upkeep.state,
            elapsed_seconds: upkeep.elapsed_seconds,
            participant_count: upkeep.participant_count,
            pool_balance: upkeep.pool_balance,
        });
    }

    round.state = RaffleState::Calculating;
    let (request_id, request_msg) = request_randomness(deps.as_ref(), &config)?;
    round.outstanding_request = Some(OutstandingRequest {
        request_id,
        requested_at: env.block.time,
    });
    ROUND.save(deps.storage, &round)?;

    Ok(Response::new()
        .add_message(request_msg)
        .set_data(to_json_binary(&request_id)?)
        .add_attribute("action", "start_round")
        .add_attribute("round_id", round.round_id.to_string())
        .add_attribute("request_id", request_id.to_string())
        .add_event(
            Event::new("raffle_round_requested")
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("round_id", round.round_id.to_string())
                .add_attribute("participant_count", round.participant_count.to_string())
                .add_attribute("pool_balance", round.pool_balance.to_string())
                .add_attribute("key_hash", config.key_hash.clone())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Build the coordinator request for this round.
///
/// The coordinator assigns ids sequentially and our request message is the
/// next thing it executes, so the id it reports via `NextRequestId` is the id
/// the request will carry.
fn request_randomness(
    deps: Deps,
    config: &RaffleConfig,
) -> Result<(u64, WasmMsg), ContractError> {
    let next_id_query = QueryRequest::Wasm(WasmQuery::Smart {
        contract_addr: config.vrf_coordinator.to_string(),
        msg: to_json_binary(&CoordinatorQueryMsg::NextRequestId {})?,
    });
    let request_id: u64 = deps.querier.query(&next_id_query)?;

    let msg = WasmMsg::Execute {
        contract_addr: config.vrf_coordinator.to_string(),
        msg: to_json_binary(&CoordinatorExecuteMsg::RequestRandomWords {
            key_hash: config.key_hash.clone(),
            subscription_id: config.subscription_id,
            request_confirmations: REQUEST_CONFIRMATIONS,
            callback_gas_limit: config.callback_gas_limit,
            num_words: NUM_WORDS,
        })?,
        funds: vec![],
    };

    Ok((request_id, msg))
}

// ─── Fulfillment ───

/// Randomness callback from the coordinator. Picks the winner, resets the
/// ledger and pays out the whole pool.
///
/// Every write happens before the payout message is emitted. A failed transfer
/// comes back through [`handle_payout_reply`] as `PayoutFailed`, which reverts
/// the whole call and leaves the round `Calculating` with the pool intact.
pub fn fulfill_random_words(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
    random_words: Vec<Uint256>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if info.sender != config.vrf_coordinator {
        deps.api.debug(&format!(
            "raffle: rejected fulfillment of request {} from non-coordinator {}",
            request_id, info.sender
        ));
        return Err(ContractError::Unauthorized {
            reason: "only the VRF coordinator can fulfill requests".to_string(),
        });
    }

    let mut round = ROUND.load(deps.storage)?;
    let outstanding = match &round.outstanding_request {
        Some(req) if req.request_id == request_id && round.state == RaffleState::Calculating => {
            req.clone()
        }
        _ => {
            deps.api.debug(&format!(
                "raffle: rejected fulfillment of unknown request {}",
                request_id
            ));
            return Err(ContractError::UnknownRequest { request_id });
        }
    };

    let random_word = *random_words.first().ok_or(ContractError::NoRandomWords)?;
    let round_id = round.round_id;
    let participant_count = round.participant_count;
    let index = winner_index(random_word, participant_count).ok_or(
        ContractError::ParticipantNotFound { round_id, index: 0 },
    )?;
    let winner = PARTICIPANTS
        .may_load(deps.storage, (round_id, index))?
        .ok_or(ContractError::ParticipantNotFound { round_id, index })?;
    let payout = round.pool_balance;

    // Reset the ledger and reopen before paying out
    round.round_id += 1;
    round.participant_count = 0;
    round.pool_balance = Uint128::zero();
    round.outstanding_request = None;
    round.last_timestamp = env.block.time;
    round.state = RaffleState::Open;
    round.recent_winner = Some(winner.clone());
    round.total_rounds_completed += 1;
    round.total_paid_out = round.total_paid_out.checked_add(payout)?;
    ROUND.save(deps.storage, &round)?;

    let result = RoundResult {
        round_id,
        request_id: outstanding.request_id,
        winner: winner.clone(),
        payout,
        random_word,
        winner_index: index,
        participant_count,
        completed_at: env.block.time,
    };
    ROUNDS.save(deps.storage, round_id, &result)?;

    let send_msg = BankMsg::Send {
        to_address: winner.to_string(),
        amount: coins(payout.u128(), &config.denom),
    };
    let payload = PayoutPayload {
        winner: winner.clone(),
        amount: payout,
    };
    let payout_msg =
        SubMsg::reply_on_error(send_msg, PAYOUT_REPLY_ID).with_payload(to_json_binary(&payload)?);

    Ok(Response::new()
        .add_submessage(payout_msg)
        .add_attribute("action", "fulfill_random_words")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("winner", winner.to_string())
        .add_attribute("payout", payout.to_string())
        .add_event(
            Event::new("raffle_winner_picked")
                .add_attribute("winner", winner.to_string())
                .add_attribute("round_id", round_id.to_string())
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("payout", payout.to_string())
                .add_attribute("denom", config.denom)
                .add_attribute("winner_index", index.to_string())
                .add_attribute("participant_count", participant_count.to_string())
                .add_attribute("random_word", word_hex(&random_word))
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Turn a failed payout transfer into `PayoutFailed`. Returning the error
/// rolls back the fulfillment that emitted the transfer.
pub fn handle_payout_reply(
    deps: DepsMut,
    _env: Env,
    msg: Reply,
) -> Result<Response, ContractError> {
    let payload: PayoutPayload = from_json(&msg.payload)?;
    match msg.result {
        SubMsgResult::Ok(_) => Ok(Response::new()),
        SubMsgResult::Err(reason) => {
            deps.api.debug(&format!(
                "raffle: payout of {} to {} failed: {}",
                payload.amount, payload.winner, reason
            ));
            Err(ContractError::PayoutFailed {
                winner: payload.winner.to_string(),
                amount: payload.amount,
                reason,
            })
        }
    }
}

// ─── Recovery ───

/// Reopen a round whose randomness request was never answered.
/// Anyone can call after the fulfillment timeout. Participants and pool stay
/// in place so the same round can be requested again.
pub fn expire_round(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut round = ROUND.load(deps.storage)?;

    if round.state != RaffleState::Calculating {
        return Err(ContractError::NoOutstandingRequest);
    }
    let outstanding = round
        .outstanding_request
        .clone()
        .ok_or(ContractError::NoOutstandingRequest)?;

    let deadline = outstanding
        .requested_at
        .plus_seconds(config.fulfillment_timeout_seconds);
    if env.block.time <= deadline {
        return Err(ContractError::RequestNotExpired {
            request_id: outstanding.request_id,
            deadline: deadline.seconds(),
        });
    }

    round.outstanding_request = None;
    round.state = RaffleState::Open;
    ROUND.save(deps.storage, &round)?;

    Ok(Response::new()
        .add_attribute("action", "expire_round")
        .add_attribute("request_id", outstanding.request_id.to_string())
        .add_event(
            Event::new("raffle_round_expired")
                .add_attribute("request_id", outstanding.request_id.to_string())
                .add_attribute("round_id", round.round_id.to_string())
                .add_attribute("participant_count", round.participant_count.to_string())
                .add_attribute("pool_balance", round.pool_balance.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

// ─── Admin ───

/// Update configuration. Admin only, rejected while a request is in flight.
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    params: UpdateConfigParams,
) -> Result<Response, ContractError> {
    let UpdateConfigParams {
        entry_fee,
        key_hash,
        subscription_id,
        callback_gas_limit,
        interval_seconds,
        fulfillment_timeout_seconds,
    } = params;

    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    let round = ROUND.load(deps.storage)?;
    if round.state != RaffleState::Open {
        return Err(ContractError::RoundNotOpen { state: round.state });
    }

    if let Some(fee) = entry_fee {
        validate_entry_fee(fee)?;
        config.entry_fee = fee;
    }
    if let Some(hash) = key_hash {
        validate_key_hash(&hash)?;
        config.key_hash = hash;
    }
    if let Some(id) = subscription_id {
        config.subscription_id = id;
    }
    if let Some(gas) = callback_gas_limit {
        validate_callback_gas_limit(gas)?;
        config.callback_gas_limit = gas;
    }
    if let Some(interval) = interval_seconds {
        validate_interval(interval)?;
        config.interval_seconds = interval;
    }
    if let Some(timeout) = fulfillment_timeout_seconds {
        validate_fulfillment_timeout(timeout)?;
        config.fulfillment_timeout_seconds = timeout;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}
