use cosmwasm_std::{
    from_json, to_json_binary, BankMsg, Coin, DepsMut, Env, Event, MessageInfo, Reply, Response,
    Storage, SubMsg, SubMsgResult, Uint128, Uint256, WasmMsg,
};
use raffle_common::{derive_random_words, word_hex, MAX_REQUEST_CONFIRMATIONS};

use crate::error::ContractError;
use crate::msg::ConsumerExecuteMsg;
use crate::state::{
    CoordinatorConfig, Fulfillment, RandomnessRequest, Subscription, CONFIG, COUNTERS,
    FULFILLMENTS, PENDING_REQUESTS, SUBSCRIPTIONS,
};

pub const CALLBACK_REPLY_ID: u64 = 1;
pub const MAX_CONSUMERS: usize = 100;

/// Worst-case price of a request, charged on fulfillment.
pub fn request_fee(
    config: &CoordinatorConfig,
    callback_gas_limit: u64,
) -> Result<Uint128, ContractError> {
    let gas_fee = config
        .fee_per_gas
        .checked_mul(Uint128::from(callback_gas_limit))?;
    Ok(config.base_fee.checked_add(gas_fee)?)
}

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

fn load_owned_subscription(
    storage: &dyn Storage,
    info: &MessageInfo,
    subscription_id: u64,
) -> Result<Subscription, ContractError> {
    let sub = SUBSCRIPTIONS
        .may_load(storage, subscription_id)?
        .ok_or(ContractError::SubscriptionNotFound { subscription_id })?;
    if sub.owner != info.sender {
        return Err(ContractError::Unauthorized {
            reason: "only the subscription owner can do this".to_string(),
        });
    }
    Ok(sub)
}

pub fn create_subscription(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let mut counters = COUNTERS.load(deps.storage)?;
    let subscription_id = counters.next_subscription_id;
    counters.next_subscription_id += 1;
    COUNTERS.save(deps.storage, &counters)?;

    let sub = Subscription {
        id: subscription_id,
        owner: info.sender.clone(),
        balance: Uint128::zero(),
        consumers: vec![],
        req_count: 0,
        pending_requests: 0,
    };
    SUBSCRIPTIONS.save(deps.storage, subscription_id, &sub)?;

    Ok(Response::new()
        .add_attribute("action", "create_subscription")
        .add_attribute("subscription_id", subscription_id.to_string())
        .set_data(to_json_binary(&subscription_id)?)
        .add_event(
            Event::new("vrf_subscription_created")
                .add_attribute("subscription_id", subscription_id.to_string())
                .add_attribute("owner", info.sender.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Top up a subscription. Anyone may fund any subscription.
pub fn fund_subscription(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    subscription_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let amount = match info.funds.as_slice() {
        [] => {
            return Err(ContractError::NoFundsSent {
                denom: config.fee_denom,
            })
        }
        [coin] if coin.denom == config.fee_denom => coin.amount,
        [coin] => {
            return Err(ContractError::WrongDenom {
                expected: config.fee_denom,
                denom: coin.denom.clone(),
            })
        }
        _ => {
            return Err(ContractError::InvalidFunds {
                denom: config.fee_denom,
            })
        }
    };
    if amount.is_zero() {
        return Err(ContractError::NoFundsSent {
            denom: config.fee_denom,
        });
    }

    let mut sub = SUBSCRIPTIONS
        .may_load(deps.storage, subscription_id)?
        .ok_or(ContractError::SubscriptionNotFound { subscription_id })?;
    let old_balance = sub.balance;
    sub.balance = sub.balance.checked_add(amount)?;
    SUBSCRIPTIONS.save(deps.storage, subscription_id, &sub)?;

    Ok(Response::new()
        .add_attribute("action", "fund_subscription")
        .add_attribute("subscription_id", subscription_id.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("vrf_subscription_funded")
                .add_attribute("subscription_id", subscription_id.to_string())
                .add_attribute("old_balance", old_balance.to_string())
                .add_attribute("new_balance", sub.balance.to_string())
                .add_attribute("funder", info.sender.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

pub fn add_consumer(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    subscription_id: u64,
    consumer: String,
) -> Result<Response, ContractError> {
    let mut sub = load_owned_subscription(deps.storage, &info, subscription_id)?;
    let consumer = deps.api.addr_validate(&consumer)?;

    // Re-adding is a no-op
    if !sub.consumers.contains(&consumer) {
        if sub.consumers.len() >= MAX_CONSUMERS {
            return Err(ContractError::TooManyConsumers {
                subscription_id,
                max: MAX_CONSUMERS,
            });
        }
        sub.consumers.push(consumer.clone());
        SUBSCRIPTIONS.save(deps.storage, subscription_id, &sub)?;
    }

    Ok(Response::new()
        .add_attribute("action", "add_consumer")
        .add_attribute("subscription_id", subscription_id.to_string())
        .add_attribute("consumer", consumer.to_string()))
}

pub fn remove_consumer(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    subscription_id: u64,
    consumer: String,
) -> Result<Response, ContractError> {
    let mut sub = load_owned_subscription(deps.storage, &info, subscription_id)?;
    let consumer = deps.api.addr_validate(&consumer)?;

    if !sub.consumers.contains(&consumer) {
        return Err(ContractError::InvalidConsumer {
            subscription_id,
            consumer: consumer.to_string(),
        });
    }
    sub.consumers.retain(|c| c != &consumer);
    SUBSCRIPTIONS.save(deps.storage, subscription_id, &sub)?;

    Ok(Response::new()
        .add_attribute("action", "remove_consumer")
        .add_attribute("subscription_id", subscription_id.to_string())
        .add_attribute("consumer", consumer.to_string()))
}

/// Close a subscription and refund whatever balance is left.
pub fn cancel_subscription(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    subscription_id: u64,
    to: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let sub = load_owned_subscription(deps.storage, &info, subscription_id)?;
    let to = deps.api.addr_validate(&to)?;

    if sub.pending_requests > 0 {
        return Err(ContractError::PendingRequestExists {
            subscription_id,
            pending: sub.pending_requests,
        });
    }

    SUBSCRIPTIONS.remove(deps.storage, subscription_id);

    let mut resp = Response::new()
        .add_attribute("action", "cancel_subscription")
        .add_attribute("subscription_id", subscription_id.to_string())
        .add_attribute("refund", sub.balance.to_string())
        .add_attribute("to", to.to_string());

    if !sub.balance.is_zero() {
        resp = resp.add_message(BankMsg::Send {
            to_address: to.to_string(),
            amount: vec![Coin {
                denom: config.fee_denom,
                amount: sub.balance,
            }],
        });
    }

    Ok(resp)
}

/// Register a randomness request from a consumer contract.
///
/// The assigned id is returned both in the response data and in the
/// `vrf_random_words_requested` event. Ids are sequential, so a consumer may
/// also learn its id beforehand through the `NextRequestId` query.
#[allow(clippy::too_many_arguments)]
pub fn request_random_words(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    key_hash: String,
    subscription_id: u64,
    request_confirmations: u16,
    callback_gas_limit: u64,
    num_words: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let mut sub = SUBSCRIPTIONS
        .may_load(deps.storage, subscription_id)?
        .ok_or(ContractError::SubscriptionNotFound { subscription_id })?;
    if !sub.consumers.contains(&info.sender) {
        return Err(ContractError::InvalidConsumer {
            subscription_id,
            consumer: info.sender.to_string(),
        });
    }

    if request_confirmations < config.min_request_confirmations
        || request_confirmations > MAX_REQUEST_CONFIRMATIONS
    {
        return Err(ContractError::InvalidRequestConfirmations {
            have: request_confirmations,
            min: config.min_request_confirmations,
            max: MAX_REQUEST_CONFIRMATIONS,
        });
    }
    if callback_gas_limit > config.max_gas_limit {
        return Err(ContractError::GasLimitTooBig {
            have: callback_gas_limit,
            max: config.max_gas_limit,
        });
    }
    if num_words == 0 || num_words > config.max_num_words {
        return Err(ContractError::InvalidNumWords {
            have: num_words,
            max: config.max_num_words,
        });
    }
    validate_key_hash(&key_hash)?;

    let fee = request_fee(&config, callback_gas_limit)?;
    if sub.balance < fee {
        return Err(ContractError::InsufficientBalance {
            needed: fee,
            available: sub.balance,
        });
    }

    let mut counters = COUNTERS.load(deps.storage)?;
    let request_id = counters.next_request_id;
    counters.next_request_id += 1;
    COUNTERS.save(deps.storage, &counters)?;

    sub.req_count += 1;
    sub.pending_requests += 1;
    SUBSCRIPTIONS.save(deps.storage, subscription_id, &sub)?;

    let request = RandomnessRequest {
        request_id,
        subscription_id,
        consumer: info.sender.clone(),
        key_hash: key_hash.clone(),
        request_confirmations,
        callback_gas_limit,
        num_words,
        request_height: env.block.height,
        requested_at: env.block.time,
    };
    PENDING_REQUESTS.save(deps.storage, request_id, &request)?;

    Ok(Response::new()
        .add_attribute("action", "request_random_words")
        .add_attribute("request_id", request_id.to_string())
        .set_data(to_json_binary(&request_id)?)
        .add_event(
            Event::new("vrf_random_words_requested")
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("subscription_id", subscription_id.to_string())
                .add_attribute("consumer", info.sender.to_string())
                .add_attribute("key_hash", key_hash)
                .add_attribute("request_confirmations", request_confirmations.to_string())
                .add_attribute("callback_gas_limit", callback_gas_limit.to_string())
                .add_attribute("num_words", num_words.to_string())
                .add_attribute("ready_at_height", request.ready_at_height().to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Deliver randomness to the consumer of a pending request. Operators only.
///
/// The request is consumed and the fee charged here. The consumer callback runs
/// as a gas-limited sub-message; its outcome is recorded by [`handle_callback_reply`]
/// and never reverts this transaction.
pub fn fulfill_random_words(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
    random_words: Option<Vec<Uint256>>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if !config.operators.contains(&info.sender) {
        return Err(ContractError::Unauthorized {
            reason: "only operators can fulfill requests".to_string(),
        });
    }

    let request = PENDING_REQUESTS
        .may_load(deps.storage, request_id)?
        .ok_or(ContractError::RequestNotFound { request_id })?;

    let ready_at = request.ready_at_height();
    if env.block.height < ready_at {
        return Err(ContractError::NotEnoughConfirmations {
            request_id,
            ready_at,
            current: env.block.height,
        });
    }

    let random_words = match random_words {
        Some(words) => {
            if words.len() != request.num_words as usize {
                return Err(ContractError::WrongNumberOfWords {
                    expected: request.num_words,
                    got: words.len(),
                });
            }
            words
        }
        None => derive_random_words(request_id, env.block.height, request.num_words),
    };

    // Charge the subscription
    let payment = request_fee(&config, request.callback_gas_limit)?;
    let mut sub = SUBSCRIPTIONS
        .may_load(deps.storage, request.subscription_id)?
        .ok_or(ContractError::SubscriptionNotFound {
            subscription_id: request.subscription_id,
        })?;
    if sub.balance < payment {
        return Err(ContractError::InsufficientBalance {
            needed: payment,
            available: sub.balance,
        });
    }
    sub.balance = sub.balance.checked_sub(payment)?;
    sub.pending_requests = sub.pending_requests.saturating_sub(1);
    SUBSCRIPTIONS.save(deps.storage, request.subscription_id, &sub)?;

    let mut counters = COUNTERS.load(deps.storage)?;
    counters.collected_fees = counters.collected_fees.checked_add(payment)?;
    COUNTERS.save(deps.storage, &counters)?;

    PENDING_REQUESTS.remove(deps.storage, request_id);

    let fulfillment = Fulfillment {
        request_id,
        consumer: request.consumer.clone(),
        random_words: random_words.clone(),
        payment,
        fulfilled_height: env.block.height,
        fulfilled_at: env.block.time,
        fulfilled_by: info.sender.clone(),
        callback_success: None,
        callback_error: None,
    };
    FULFILLMENTS.save(deps.storage, request_id, &fulfillment)?;

    let words_hex: Vec<String> = random_words.iter().map(word_hex).collect();

    let callback = WasmMsg::Execute {
        contract_addr: request.consumer.to_string(),
        msg: to_json_binary(&ConsumerExecuteMsg::FulfillRandomWords {
            request_id,
            random_words,
        })?,
        funds: vec![],
    };
    let sub_msg = SubMsg::reply_always(callback, CALLBACK_REPLY_ID)
        .with_gas_limit(request.callback_gas_limit)
        .with_payload(to_json_binary(&request_id)?);

    Ok(Response::new()
        .add_attribute("action", "fulfill_random_words")
        .add_attribute("request_id", request_id.to_string())
        .add_submessage(sub_msg)
        .add_event(
            Event::new("vrf_random_words_fulfilled")
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("subscription_id", request.subscription_id.to_string())
                .add_attribute("consumer", request.consumer.to_string())
                .add_attribute("random_words", words_hex.join(","))
                .add_attribute("payment", payment.to_string())
                .add_attribute("fulfilled_by", info.sender.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Record the outcome of a consumer callback.
pub fn handle_callback_reply(
    deps: DepsMut,
    env: Env,
    msg: Reply,
) -> Result<Response, ContractError> {
    let request_id: u64 = from_json(&msg.payload)?;
    let mut fulfillment = FULFILLMENTS.load(deps.storage, request_id)?;

    let (success, error) = match msg.result {
        SubMsgResult::Ok(_) => (true, None),
        SubMsgResult::Err(err) => {
            deps.api.debug(&format!(
                "vrf: callback for request {} to {} failed: {}",
                request_id, fulfillment.consumer, err
            ));
            (false, Some(err))
        }
    };
    fulfillment.callback_success = Some(success);
    fulfillment.callback_error = error.clone();
    FULFILLMENTS.save(deps.storage, request_id, &fulfillment)?;

    Ok(Response::new()
        .add_attribute("action", "callback_result")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("success", success.to_string())
        .add_event(
            Event::new("vrf_callback_result")
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("consumer", fulfillment.consumer.to_string())
                .add_attribute("success", success.to_string())
                .add_attribute("error", error.unwrap_or_default())
                .add_attribute("gas_used", msg.gas_used.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Send accumulated fees out of the contract. Admin only.
pub fn withdraw_fees(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    to: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can withdraw fees".to_string(),
        });
    }
    let to = deps.api.addr_validate(&to)?;

    let mut counters = COUNTERS.load(deps.storage)?;
    let amount = counters.collected_fees;
    if amount.is_zero() {
        return Err(ContractError::NoFeesToWithdraw);
    }
    counters.collected_fees = Uint128::zero();
    COUNTERS.save(deps.storage, &counters)?;

    Ok(Response::new()
        .add_attribute("action", "withdraw_fees")
        .add_attribute("amount", amount.to_string())
        .add_attribute("to", to.to_string())
        .add_message(BankMsg::Send {
            to_address: to.to_string(),
            amount: vec![Coin {
                denom: config.fee_denom,
                amount,
            }],
        }))
}

/// Update the operator list. Admin only.
pub fn update_operators(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    add: Vec<String>,
    remove: Vec<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update operators".to_string(),
        });
    }

    for addr_str in &remove {
        let addr = deps.api.addr_validate(addr_str)?;
        config.operators.retain(|a| a != &addr);
    }
    for addr_str in &add {
        let addr = deps.api.addr_validate(addr_str)?;
        if !config.operators.contains(&addr) {
            config.operators.push(addr);
        }
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_operators")
        .add_attribute("added", add.join(","))
        .add_attribute("removed", remove.join(","))
        .add_attribute("operator_count", config.operators.len().to_string()))
}
