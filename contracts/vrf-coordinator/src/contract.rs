use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdResult, Uint128,
};
use cw2::{get_contract_version, set_contract_version};
use raffle_common::MAX_REQUEST_CONFIRMATIONS;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{CoordinatorConfig, Counters, CONFIG, COUNTERS};

const CONTRACT_NAME: &str = "crates.io:chance-vrf-coordinator";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.fee_denom.is_empty() {
        return Err(ContractError::InvalidConfig {
            reason: "fee_denom must not be empty".to_string(),
        });
    }
    if msg.min_request_confirmations > MAX_REQUEST_CONFIRMATIONS {
        return Err(ContractError::InvalidConfig {
            reason: format!(
                "min_request_confirmations must be at most {}",
                MAX_REQUEST_CONFIRMATIONS
            ),
        });
    }
    if msg.max_num_words == 0 {
        return Err(ContractError::InvalidConfig {
            reason: "max_num_words must be positive".to_string(),
        });
    }
    if msg.max_gas_limit == 0 {
        return Err(ContractError::InvalidConfig {
            reason: "max_gas_limit must be positive".to_string(),
        });
    }

    // Validate operator addresses
    let mut operators = Vec::new();
    for op in &msg.operators {
        operators.push(deps.api.addr_validate(op)?);
    }

    let config = CoordinatorConfig {
        admin: info.sender.clone(),
        operators,
        fee_denom: msg.fee_denom,
        base_fee: msg.base_fee,
        fee_per_gas: msg.fee_per_gas,
        min_request_confirmations: msg.min_request_confirmations,
        max_num_words: msg.max_num_words,
        max_gas_limit: msg.max_gas_limit,
    };
    CONFIG.save(deps.storage, &config)?;

    COUNTERS.save(
        deps.storage,
        &Counters {
            next_request_id: 1,
            next_subscription_id: 1,
            collected_fees: Uint128::zero(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "vrf-coordinator")
        .add_attribute("admin", info.sender.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateSubscription {} => execute::create_subscription(deps, env, info),
        ExecuteMsg::FundSubscription { subscription_id } => {
            execute::fund_subscription(deps, env, info, subscription_id)
        }
        ExecuteMsg::AddConsumer {
            subscription_id,
            consumer,
        } => execute::add_consumer(deps, env, info, subscription_id, consumer),
        ExecuteMsg::RemoveConsumer {
            subscription_id,
            consumer,
        } => execute::remove_consumer(deps, env, info, subscription_id, consumer),
        ExecuteMsg::CancelSubscription {
            subscription_id,
            to,
        } => execute::cancel_subscription(deps, env, info, subscription_id, to),
        ExecuteMsg::RequestRandomWords {
            key_hash,
            subscription_id,
            request_confirmations,
            callback_gas_limit,
            num_words,
        } => execute::request_random_words(
            deps,
            env,
            info,
            key_hash,
            subscription_id,
            request_confirmations,
            callback_gas_limit,
            num_words,
        ),
        ExecuteMsg::FulfillRandomWords {
            request_id,
            random_words,
        } => execute::fulfill_random_words(deps, env, info, request_id, random_words),
        ExecuteMsg::WithdrawFees { to } => execute::withdraw_fees(deps, env, info, to),
        ExecuteMsg::UpdateOperators { add, remove } => {
            execute::update_operators(deps, env, info, add, remove)
        }
    }
}

#[entry_point]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        execute::CALLBACK_REPLY_ID => execute::handle_callback_reply(deps, env, msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Subscription { subscription_id } => {
            query::query_subscription(deps, subscription_id)
        }
        QueryMsg::Request { request_id } => query::query_request(deps, request_id),
        QueryMsg::PendingRequests { start_after, limit } => {
            query::query_pending_requests(deps, start_after, limit)
        }
        QueryMsg::Fulfillment { request_id } => query::query_fulfillment(deps, request_id),
        QueryMsg::NextRequestId {} => query::query_next_request_id(deps),
        QueryMsg::CollectedFees {} => query::query_collected_fees(deps),
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
