use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, UpdateConfigParams};
use crate::query;
use crate::state::{RaffleConfig, RoundInfo, CONFIG, ROUND};

const CONTRACT_NAME: &str = "crates.io:chance-raffle";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    execute::validate_entry_fee(msg.entry_fee)?;
    execute::validate_interval(msg.interval_seconds)?;
    execute::validate_fulfillment_timeout(msg.fulfillment_timeout_seconds)?;
    execute::validate_callback_gas_limit(msg.callback_gas_limit)?;
    execute::validate_key_hash(&msg.key_hash)?;
    if msg.denom.is_empty() {
        return Err(ContractError::InvalidDenom);
    }

    let config = RaffleConfig {
        admin: info.sender.clone(),
        vrf_coordinator: deps.api.addr_validate(&msg.vrf_coordinator)?,
        entry_fee: msg.entry_fee,
        denom: msg.denom,
        key_hash: msg.key_hash,
        subscription_id: msg.subscription_id,
        callback_gas_limit: msg.callback_gas_limit,
        interval_seconds: msg.interval_seconds,
        fulfillment_timeout_seconds: msg.fulfillment_timeout_seconds,
    };
    CONFIG.save(deps.storage, &config)?;

    // Round anchor starts at instantiation
    ROUND.save(deps.storage, &RoundInfo::new(env.block.time))?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "raffle")
        .add_attribute("admin", info.sender.to_string())
        .add_attribute("entry_fee", config.entry_fee.to_string())
        .add_attribute("interval_seconds", config.interval_seconds.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Enter {} => execute::enter(deps, env, info),
        ExecuteMsg::StartRound {} => execute::start_round(deps, env, info),
        ExecuteMsg::FulfillRandomWords {
            request_id,
            random_words,
        } => execute::fulfill_random_words(deps, env, info, request_id, random_words),
        ExecuteMsg::ExpireRound {} => execute::expire_round(deps, env, info),
        ExecuteMsg::UpdateConfig {
            entry_fee,
            key_hash,
            subscription_id,
            callback_gas_limit,
            interval_seconds,
            fulfillment_timeout_seconds,
        } => execute::update_config(
            deps,
            env,
            info,
            UpdateConfigParams {
                entry_fee,
                key_hash,
                subscription_id,
                callback_gas_limit,
                interval_seconds,
                fulfillment_timeout_seconds,
            },
        ),
    }
}

#[entry_point]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        execute::PAYOUT_REPLY_ID => execute::handle_payout_reply(deps, env, msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::RoundInfo {} => query::query_round_info(deps),
        QueryMsg::EntryFee {} => query::query_entry_fee(deps),
        QueryMsg::Interval {} => query::query_interval(deps),
        QueryMsg::KeyHash {} => query::query_key_hash(deps),
        QueryMsg::CallbackGasLimit {} => query::query_callback_gas_limit(deps),
        QueryMsg::RequestConfirmations {} => query::query_request_confirmations(),
        QueryMsg::NumWords {} => query::query_num_words(),
        QueryMsg::RaffleState {} => query::query_raffle_state(deps),
        QueryMsg::NumberOfParticipants {} => query::query_number_of_participants(deps),
        QueryMsg::Participant { index } => query::query_participant(deps, index),
        QueryMsg::PoolBalance {} => query::query_pool_balance(deps),
        QueryMsg::LastTimestamp {} => query::query_last_timestamp(deps),
        QueryMsg::RecentWinner {} => query::query_recent_winner(deps),
        QueryMsg::OutstandingRequest {} => query::query_outstanding_request(deps),
        QueryMsg::UpkeepNeeded {} => query::query_upkeep_needed(deps, env),
        QueryMsg::Round { round_id } => query::query_round(deps, round_id),
        QueryMsg::RoundHistory { start_after, limit } => {
            query::query_round_history(deps, start_after, limit)
        }
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "Cannot migrate from different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
