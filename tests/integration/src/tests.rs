//! Integration tests for the raffle and its VRF coordinator.
//!
//! Both contracts are driven through their `instantiate` / `execute` /
//! `query` / `reply` entry points using `cosmwasm_std::testing` mocks, each
//! with its own storage. Messages one contract emits for the other are
//! decoded and delivered by hand with the emitting contract as sender.
//!
//! The raffle's `NextRequestId` smart query is answered from the
//! coordinator's real state through `MockQuerier::update_wasm`.
//!
//! Run:
//! ```bash
//! cargo test -p raffle-integration-tests
//! ```

use chance_raffle::msg::{ExecuteMsg as RaffleExecuteMsg, QueryMsg as RaffleQueryMsg};
use chance_raffle::state::{RoundInfo, RoundResult};
use chance_vrf_coordinator::msg::{
    ExecuteMsg as CoordinatorExecuteMsg, QueryMsg as CoordinatorQueryMsg,
};
use chance_vrf_coordinator::state::{Fulfillment, Subscription};
use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{
    coins, from_json, to_json_binary, Addr, BankMsg, ContractResult, CosmosMsg, Env,
    MemoryStorage, Order, OwnedDeps, Reply, Response, Storage, SubMsgResponse, SubMsgResult,
    SystemError, SystemResult, Uint128, Uint256, WasmMsg, WasmQuery,
};
use raffle_common::{derive_random_words, winner_index, RaffleState, REQUEST_CONFIRMATIONS};

type TestDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

// ─── Constants ───

const DENOM: &str = "inj";
/// 0.1 INJ
const ENTRY_FEE: u128 = 100_000_000_000_000_000;
const INTERVAL: u64 = 30;
const FULFILLMENT_TIMEOUT: u64 = 3600;
const CALLBACK_GAS_LIMIT: u64 = 500_000;
const KEY_HASH: &str = "474e34a077df58807dbe9c96d3c009b23b3c6d0cce433e59bbf5b34f823bc56c";
const SUBSCRIPTION_FUNDING: u128 = 10_000_000;
const BASE_FEE: u128 = 1_000;
const FEE_PER_GAS: u128 = 1;

// ─── Harness ───

/// Two contracts side by side. The raffle sits at the mock contract address.
struct Chain {
    raffle: TestDeps,
    coordinator: TestDeps,
    raffle_addr: Addr,
    coordinator_addr: Addr,
    subscription_id: u64,
}

fn env_at(seconds_after: u64, blocks_after: u64) -> Env {
    let mut env = mock_env();
    env.block.time = env.block.time.plus_seconds(seconds_after);
    env.block.height += blocks_after;
    env
}

fn addr(name: &str) -> Addr {
    MockApi::default().addr_make(name)
}

/// Raw copy of a contract's storage, used to model a reverted transaction.
fn snapshot(storage: &dyn Storage) -> Vec<(Vec<u8>, Vec<u8>)> {
    storage.range(None, None, Order::Ascending).collect()
}

fn restore(storage: &mut dyn Storage, records: Vec<(Vec<u8>, Vec<u8>)>) {
    let keys: Vec<Vec<u8>> = storage
        .range(None, None, Order::Ascending)
        .map(|(k, _)| k)
        .collect();
    for key in keys {
        storage.remove(&key);
    }
    for (key, value) in records {
        storage.set(&key, &value);
    }
}

fn setup_chain() -> Chain {
    let mut raffle = mock_dependencies();
    let mut coordinator = mock_dependencies();
    let raffle_addr = mock_env().contract.address;
    let coordinator_addr = addr("coordinator");

    // Coordinator
    let admin = addr("admin");
    chance_vrf_coordinator::contract::instantiate(
        coordinator.as_mut(),
        mock_env(),
        message_info(&admin, &[]),
        chance_vrf_coordinator::msg::InstantiateMsg {
            operators: vec![addr("operator").to_string()],
            fee_denom: DENOM.to_string(),
            base_fee: Uint128::new(BASE_FEE),
            fee_per_gas: Uint128::new(FEE_PER_GAS),
            min_request_confirmations: REQUEST_CONFIRMATIONS,
            max_num_words: 10,
            max_gas_limit: 2_500_000,
        },
    )
    .unwrap();

    // Subscription: create, fund, register the raffle
    let owner = addr("sub_owner");
    let res = chance_vrf_coordinator::contract::execute(
        coordinator.as_mut(),
        mock_env(),
        message_info(&owner, &[]),
        CoordinatorExecuteMsg::CreateSubscription {},
    )
    .unwrap();
    let subscription_id: u64 = from_json(res.data.unwrap()).unwrap();

    chance_vrf_coordinator::contract::execute(
        coordinator.as_mut(),
        mock_env(),
        message_info(&owner, &coins(SUBSCRIPTION_FUNDING, DENOM)),
        CoordinatorExecuteMsg::FundSubscription { subscription_id },
    )
    .unwrap();
    chance_vrf_coordinator::contract::execute(
        coordinator.as_mut(),
        mock_env(),
        message_info(&owner, &[]),
        CoordinatorExecuteMsg::AddConsumer {
            subscription_id,
            consumer: raffle_addr.to_string(),
        },
    )
    .unwrap();

    // Raffle
    let deployer = addr("deployer");
    chance_raffle::contract::instantiate(
        raffle.as_mut(),
        mock_env(),
        message_info(&deployer, &[]),
        chance_raffle::msg::InstantiateMsg {
            vrf_coordinator: coordinator_addr.to_string(),
            entry_fee: Uint128::new(ENTRY_FEE),
            denom: DENOM.to_string(),
            key_hash: KEY_HASH.to_string(),
            subscription_id,
            callback_gas_limit: CALLBACK_GAS_LIMIT,
            interval_seconds: INTERVAL,
            fulfillment_timeout_seconds: FULFILLMENT_TIMEOUT,
        },
    )
    .unwrap();

    Chain {
        raffle,
        coordinator,
        raffle_addr,
        coordinator_addr,
        subscription_id,
    }
}

impl Chain {
    fn enter(&mut self, name: &str, amount: u128) -> Addr {
        let player = addr(name);
        chance_raffle::contract::execute(
            self.raffle.as_mut(),
            mock_env(),
            message_info(&player, &coins(amount, DENOM)),
            RaffleExecuteMsg::Enter {},
        )
        .unwrap();
        player
    }

    /// Point the raffle's querier at the coordinator's current request counter.
    fn sync_coordinator_queries(&mut self) {
        let next_id: u64 = from_json(
            chance_vrf_coordinator::contract::query(
                self.coordinator.as_ref(),
                mock_env(),
                CoordinatorQueryMsg::NextRequestId {},
            )
            .unwrap(),
        )
        .unwrap();
        let coordinator_addr = self.coordinator_addr.to_string();
        self.raffle.querier.update_wasm(move |query| match query {
            WasmQuery::Smart { contract_addr, .. } if *contract_addr == coordinator_addr => {
                SystemResult::Ok(ContractResult::Ok(to_json_binary(&next_id).unwrap()))
            }
            _ => SystemResult::Err(SystemError::InvalidRequest {
                error: "unexpected query".to_string(),
                request: Default::default(),
            }),
        });
    }

    /// Close entries on the raffle and relay its request into the coordinator.
    /// Returns the id the coordinator assigned.
    fn start_round(&mut self, env: Env) -> u64 {
        self.sync_coordinator_queries();
        let res = chance_raffle::contract::execute(
            self.raffle.as_mut(),
            env.clone(),
            message_info(&addr("keeper"), &[]),
            RaffleExecuteMsg::StartRound {},
        )
        .unwrap();
        let expected_id: u64 = from_json(res.data.clone().unwrap()).unwrap();

        assert_eq!(res.messages.len(), 1);
        let request = match &res.messages[0].msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr, msg, ..
            }) => {
                assert_eq!(contract_addr, self.coordinator_addr.as_str());
                from_json::<CoordinatorExecuteMsg>(msg).unwrap()
            }
            m => panic!("unexpected message: {:?}", m),
        };

        let res = chance_vrf_coordinator::contract::execute(
            self.coordinator.as_mut(),
            env,
            message_info(&self.raffle_addr, &[]),
            request,
        )
        .unwrap();
        let assigned_id: u64 = from_json(res.data.unwrap()).unwrap();
        assert_eq!(assigned_id, expected_id);
        assigned_id
    }

    /// Operator fulfillment on the coordinator. Returns the callback message
    /// bound for the raffle.
    fn operator_fulfill(
        &mut self,
        env: Env,
        request_id: u64,
        words: Option<Vec<Uint256>>,
    ) -> RaffleExecuteMsg {
        let res = chance_vrf_coordinator::contract::execute(
            self.coordinator.as_mut(),
            env,
            message_info(&addr("operator"), &[]),
            CoordinatorExecuteMsg::FulfillRandomWords {
                request_id,
                random_words: words,
            },
        )
        .unwrap();

        assert_eq!(res.messages.len(), 1);
        let sub_msg = &res.messages[0];
        assert_eq!(sub_msg.gas_limit, Some(CALLBACK_GAS_LIMIT));
        match &sub_msg.msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr, msg, ..
            }) => {
                assert_eq!(contract_addr, self.raffle_addr.as_str());
                from_json(msg).unwrap()
            }
            m => panic!("unexpected message: {:?}", m),
        }
    }

    /// Run the callback on the raffle and feed its outcome back to the
    /// coordinator's reply handler, as the chain would.
    fn deliver_callback(
        &mut self,
        env: Env,
        request_id: u64,
        callback: RaffleExecuteMsg,
    ) -> Result<Response, chance_raffle::ContractError> {
        let outcome = chance_raffle::contract::execute(
            self.raffle.as_mut(),
            env.clone(),
            message_info(&self.coordinator_addr, &[]),
            callback,
        );

        #[allow(deprecated)]
        let result = match &outcome {
            Ok(_) => SubMsgResult::Ok(SubMsgResponse {
                events: vec![],
                data: None,
                msg_responses: vec![],
            }),
            Err(err) => SubMsgResult::Err(err.to_string()),
        };
        chance_vrf_coordinator::contract::reply(
            self.coordinator.as_mut(),
            env,
            Reply {
                id: chance_vrf_coordinator::execute::CALLBACK_REPLY_ID,
                payload: to_json_binary(&request_id).unwrap(),
                gas_used: 100_000,
                result,
            },
        )
        .unwrap();

        outcome
    }

    /// Run the callback on the raffle with the winner's transfer failing.
    ///
    /// The raffle's payout reply errors, which reverts its whole callback on
    /// chain. That revert is applied to the raffle's storage here, and the
    /// error is reported to the coordinator's reply handler.
    fn deliver_callback_with_failed_payout(
        &mut self,
        env: Env,
        request_id: u64,
        callback: RaffleExecuteMsg,
    ) -> chance_raffle::ContractError {
        let before = snapshot(&self.raffle.storage);

        let res = chance_raffle::contract::execute(
            self.raffle.as_mut(),
            env.clone(),
            message_info(&self.coordinator_addr, &[]),
            callback,
        )
        .unwrap();
        let payout = &res.messages[0];
        let err = chance_raffle::contract::reply(
            self.raffle.as_mut(),
            env.clone(),
            Reply {
                id: payout.id,
                payload: payout.payload.clone(),
                gas_used: 0,
                result: SubMsgResult::Err("insufficient funds".to_string()),
            },
        )
        .unwrap_err();

        restore(&mut self.raffle.storage, before);

        chance_vrf_coordinator::contract::reply(
            self.coordinator.as_mut(),
            env,
            Reply {
                id: chance_vrf_coordinator::execute::CALLBACK_REPLY_ID,
                payload: to_json_binary(&request_id).unwrap(),
                gas_used: 100_000,
                result: SubMsgResult::Err(err.to_string()),
            },
        )
        .unwrap();

        err
    }

    fn round_info(&self) -> RoundInfo {
        from_json(
            chance_raffle::contract::query(
                self.raffle.as_ref(),
                mock_env(),
                RaffleQueryMsg::RoundInfo {},
            )
            .unwrap(),
        )
        .unwrap()
    }

    fn fulfillment(&self, request_id: u64) -> Fulfillment {
        let res = chance_vrf_coordinator::contract::query(
            self.coordinator.as_ref(),
            mock_env(),
            CoordinatorQueryMsg::Fulfillment { request_id },
        )
        .unwrap();
        let fulfillment: Option<Fulfillment> = serde_json::from_slice(&res).unwrap();
        fulfillment.unwrap()
    }

    fn subscription(&self) -> Subscription {
        let res = chance_vrf_coordinator::contract::query(
            self.coordinator.as_ref(),
            mock_env(),
            CoordinatorQueryMsg::Subscription {
                subscription_id: self.subscription_id,
            },
        )
        .unwrap();
        let sub: Option<Subscription> = serde_json::from_slice(&res).unwrap();
        sub.unwrap()
    }
}

fn expected_fee() -> Uint128 {
    Uint128::new(BASE_FEE + FEE_PER_GAS * CALLBACK_GAS_LIMIT as u128)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_full_round_pays_second_entrant() {
    let mut chain = setup_chain();

    let _alice = chain.enter("alice", ENTRY_FEE);
    let bob = chain.enter("bob", ENTRY_FEE);
    let _carol = chain.enter("carol", ENTRY_FEE);
    assert_eq!(chain.round_info().pool_balance, Uint128::new(ENTRY_FEE * 3));

    let request_id = chain.start_round(env_at(INTERVAL + 1, 1));
    assert_eq!(request_id, 1);
    let round = chain.round_info();
    assert_eq!(round.state, RaffleState::Calculating);
    assert_eq!(round.outstanding_request.unwrap().request_id, request_id);

    // Too early: confirmations not reached
    let err = chance_vrf_coordinator::contract::execute(
        chain.coordinator.as_mut(),
        env_at(INTERVAL + 2, 2),
        message_info(&addr("operator"), &[]),
        CoordinatorExecuteMsg::FulfillRandomWords {
            request_id,
            random_words: Some(vec![Uint256::from(7u128)]),
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        chance_vrf_coordinator::ContractError::NotEnoughConfirmations { .. }
    ));

    let fulfill_env = env_at(INTERVAL + 20, 1 + REQUEST_CONFIRMATIONS as u64);
    let callback = chain.operator_fulfill(
        fulfill_env.clone(),
        request_id,
        Some(vec![Uint256::from(7u128)]),
    );
    let res = chain
        .deliver_callback(fulfill_env.clone(), request_id, callback)
        .unwrap();

    // 7 mod 3 = 1: bob takes the whole 0.3 pool
    assert_eq!(
        res.messages[0].msg,
        CosmosMsg::Bank(BankMsg::Send {
            to_address: bob.to_string(),
            amount: coins(ENTRY_FEE * 3, DENOM),
        })
    );
    let picked = res
        .events
        .iter()
        .find(|e| e.ty == "raffle_winner_picked")
        .unwrap();
    assert!(picked
        .attributes
        .iter()
        .any(|a| a.key == "winner" && a.value == bob.as_str()));

    let round = chain.round_info();
    assert_eq!(round.state, RaffleState::Open);
    assert_eq!(round.participant_count, 0);
    assert!(round.pool_balance.is_zero());
    assert_eq!(round.recent_winner, Some(bob));
    assert_eq!(round.last_timestamp, fulfill_env.block.time);
    assert!(round.outstanding_request.is_none());

    // Coordinator side: consumed, charged, callback recorded as delivered
    let fulfillment = chain.fulfillment(request_id);
    assert_eq!(fulfillment.callback_success, Some(true));
    assert_eq!(fulfillment.payment, expected_fee());
    let sub = chain.subscription();
    assert_eq!(sub.pending_requests, 0);
    assert_eq!(sub.balance, Uint128::new(SUBSCRIPTION_FUNDING) - expected_fee());
}

#[test]
fn test_late_fulfillment_after_expiry_is_recorded_as_failed() {
    let mut chain = setup_chain();
    chain.enter("alice", ENTRY_FEE);
    chain.enter("bob", ENTRY_FEE);

    let request_id = chain.start_round(env_at(INTERVAL + 1, 1));

    // Nobody answers in time; anyone reopens the round
    let expire_env = env_at(INTERVAL + 1 + FULFILLMENT_TIMEOUT + 1, 100);
    chance_raffle::contract::execute(
        chain.raffle.as_mut(),
        expire_env.clone(),
        message_info(&addr("keeper"), &[]),
        RaffleExecuteMsg::ExpireRound {},
    )
    .unwrap();
    let round = chain.round_info();
    assert_eq!(round.state, RaffleState::Open);
    assert_eq!(round.participant_count, 2);
    assert_eq!(round.pool_balance, Uint128::new(ENTRY_FEE * 2));

    // The stale answer arrives; the raffle rejects it, the coordinator records it
    let late_env = env_at(INTERVAL + 1 + FULFILLMENT_TIMEOUT + 10, 110);
    let callback = chain.operator_fulfill(late_env.clone(), request_id, None);
    let err = chain
        .deliver_callback(late_env, request_id, callback)
        .unwrap_err();
    assert!(matches!(
        err,
        chance_raffle::ContractError::UnknownRequest { .. }
    ));

    let fulfillment = chain.fulfillment(request_id);
    assert_eq!(fulfillment.callback_success, Some(false));
    assert!(fulfillment.callback_error.is_some());

    // Funds still in the pool; the next draw uses a fresh request id
    assert_eq!(chain.round_info().pool_balance, Uint128::new(ENTRY_FEE * 2));
    let retry_env = env_at(INTERVAL + 1 + FULFILLMENT_TIMEOUT + 20, 120);
    let retry_id = chain.start_round(retry_env);
    assert_eq!(retry_id, request_id + 1);
}

#[test]
fn test_failed_payout_keeps_round_and_expiry_recovers_it() {
    let mut chain = setup_chain();
    chain.enter("alice", ENTRY_FEE);
    let bob = chain.enter("bob", ENTRY_FEE);
    chain.enter("carol", ENTRY_FEE);

    let request_id = chain.start_round(env_at(INTERVAL + 1, 1));
    let fulfill_env = env_at(INTERVAL + 20, 10);
    let callback = chain.operator_fulfill(
        fulfill_env.clone(),
        request_id,
        Some(vec![Uint256::from(7u128)]),
    );
    let err = chain.deliver_callback_with_failed_payout(fulfill_env, request_id, callback);
    match &err {
        chance_raffle::ContractError::PayoutFailed { winner, amount, .. } => {
            assert_eq!(winner, bob.as_str());
            assert_eq!(*amount, Uint128::new(ENTRY_FEE * 3));
        }
        e => panic!("unexpected error: {:?}", e),
    }

    // Every reset rolled back: still calculating, funds and entries intact
    let round = chain.round_info();
    assert_eq!(round.state, RaffleState::Calculating);
    assert_eq!(round.pool_balance, Uint128::new(ENTRY_FEE * 3));
    assert_eq!(round.participant_count, 3);
    assert_eq!(round.round_id, 0);
    assert_eq!(round.outstanding_request.unwrap().request_id, request_id);
    assert!(round.recent_winner.is_none());

    // The coordinator consumed the request and recorded the failure
    let fulfillment = chain.fulfillment(request_id);
    assert_eq!(fulfillment.callback_success, Some(false));
    assert_eq!(fulfillment.callback_error, Some(err.to_string()));
    assert_eq!(chain.subscription().pending_requests, 0);

    // Timeout passes; the round reopens with the same pool
    let expire_env = env_at(INTERVAL + 1 + FULFILLMENT_TIMEOUT + 1, 200);
    chance_raffle::contract::execute(
        chain.raffle.as_mut(),
        expire_env,
        message_info(&addr("keeper"), &[]),
        RaffleExecuteMsg::ExpireRound {},
    )
    .unwrap();
    let round = chain.round_info();
    assert_eq!(round.state, RaffleState::Open);
    assert_eq!(round.pool_balance, Uint128::new(ENTRY_FEE * 3));
    assert_eq!(round.participant_count, 3);

    // Next attempt pays out normally
    let retry_id = chain.start_round(env_at(INTERVAL + 1 + FULFILLMENT_TIMEOUT + 2, 201));
    assert_eq!(retry_id, request_id + 1);
    let env = env_at(INTERVAL + 1 + FULFILLMENT_TIMEOUT + 10, 210);
    let word = Uint256::from(7u128);
    let callback = chain.operator_fulfill(env.clone(), retry_id, Some(vec![word]));
    let res = chain.deliver_callback(env, retry_id, callback).unwrap();
    assert_eq!(
        res.messages[0].msg,
        CosmosMsg::Bank(BankMsg::Send {
            to_address: bob.to_string(),
            amount: coins(ENTRY_FEE * 3, DENOM),
        })
    );
}

#[test]
fn test_derived_words_pick_matching_participant() {
    let mut chain = setup_chain();
    let players = vec![
        chain.enter("alice", ENTRY_FEE),
        chain.enter("bob", ENTRY_FEE),
        chain.enter("carol", ENTRY_FEE),
        chain.enter("dave", ENTRY_FEE * 2),
    ];

    let request_id = chain.start_round(env_at(INTERVAL + 1, 1));
    let fulfill_env = env_at(INTERVAL + 30, 10);
    let callback = chain.operator_fulfill(fulfill_env.clone(), request_id, None);
    let res = chain
        .deliver_callback(fulfill_env.clone(), request_id, callback)
        .unwrap();

    let word = derive_random_words(request_id, fulfill_env.block.height, 1)[0];
    let index = winner_index(word, 4).unwrap();
    let winner = players[index as usize].clone();

    assert_eq!(
        res.messages[0].msg,
        CosmosMsg::Bank(BankMsg::Send {
            to_address: winner.to_string(),
            amount: coins(ENTRY_FEE * 5, DENOM),
        })
    );

    let result: Option<RoundResult> = from_json(
        chance_raffle::contract::query(
            chain.raffle.as_ref(),
            mock_env(),
            RaffleQueryMsg::Round { round_id: 0 },
        )
        .unwrap(),
    )
    .unwrap();
    let result = result.unwrap();
    assert_eq!(result.winner, winner);
    assert_eq!(result.winner_index, index);
    assert_eq!(result.random_word, word);
    assert_eq!(result.request_id, request_id);
}

#[test]
fn test_consecutive_rounds_share_subscription() {
    let mut chain = setup_chain();

    let mut elapsed = 0;
    for round_no in 0..3u64 {
        chain.enter("alice", ENTRY_FEE);
        chain.enter("bob", ENTRY_FEE);

        elapsed += INTERVAL + 1;
        let request_id = chain.start_round(env_at(elapsed, elapsed));
        assert_eq!(request_id, round_no + 1);

        elapsed += 5;
        let env = env_at(elapsed, elapsed);
        let word = Uint256::from(round_no as u128);
        let callback = chain.operator_fulfill(env.clone(), request_id, Some(vec![word]));
        chain.deliver_callback(env, request_id, callback).unwrap();
    }

    let round = chain.round_info();
    assert_eq!(round.round_id, 3);
    assert_eq!(round.total_rounds_completed, 3);
    assert_eq!(round.total_paid_out, Uint128::new(ENTRY_FEE * 6));

    let sub = chain.subscription();
    assert_eq!(sub.req_count, 3);
    assert_eq!(
        sub.balance,
        Uint128::new(SUBSCRIPTION_FUNDING) - expected_fee() * Uint128::new(3)
    );

    // Round winners alternate with the word parity: alice, bob, alice
    let history: chance_raffle::msg::RoundHistoryResponse = from_json(
        chance_raffle::contract::query(
            chain.raffle.as_ref(),
            mock_env(),
            RaffleQueryMsg::RoundHistory {
                start_after: None,
                limit: None,
            },
        )
        .unwrap(),
    )
    .unwrap();
    let winners: Vec<Addr> = history.rounds.into_iter().map(|r| r.winner).collect();
    assert_eq!(winners, vec![addr("alice"), addr("bob"), addr("alice")]);
}

#[test]
fn test_unregistered_raffle_cannot_start_round() {
    let mut chain = setup_chain();
    chain.enter("alice", ENTRY_FEE);

    chance_vrf_coordinator::contract::execute(
        chain.coordinator.as_mut(),
        mock_env(),
        message_info(&addr("sub_owner"), &[]),
        CoordinatorExecuteMsg::RemoveConsumer {
            subscription_id: chain.subscription_id,
            consumer: chain.raffle_addr.to_string(),
        },
    )
    .unwrap();

    // The raffle emits the request; the coordinator refuses it, which reverts
    // the whole transaction on chain and leaves the raffle open.
    chain.sync_coordinator_queries();
    let env = env_at(INTERVAL + 1, 1);
    let res = chance_raffle::contract::execute(
        chain.raffle.as_mut(),
        env.clone(),
        message_info(&addr("keeper"), &[]),
        RaffleExecuteMsg::StartRound {},
    )
    .unwrap();
    let request = match &res.messages[0].msg {
        CosmosMsg::Wasm(WasmMsg::Execute { msg, .. }) => {
            from_json::<CoordinatorExecuteMsg>(msg).unwrap()
        }
        m => panic!("unexpected message: {:?}", m),
    };
    let err = chance_vrf_coordinator::contract::execute(
        chain.coordinator.as_mut(),
        env,
        message_info(&chain.raffle_addr, &[]),
        request,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        chance_vrf_coordinator::ContractError::InvalidConsumer { .. }
    ));
}
