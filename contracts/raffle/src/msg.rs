use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Timestamp, Uint128, Uint256};
use raffle_common::RaffleState;

use crate::state::{OutstandingRequest, RaffleConfig, RoundInfo, RoundResult};

#[cw_serde]
pub struct InstantiateMsg {
    pub vrf_coordinator: String,
    pub entry_fee: Uint128,
    pub denom: String,
    /// Coordinator gas lane, 32 bytes hex-encoded
    pub key_hash: String,
    pub subscription_id: u64,
    pub callback_gas_limit: u64,
    pub interval_seconds: u64,
    pub fulfillment_timeout_seconds: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Enter the current round. Send at least the entry fee in `info.funds`.
    Enter {},
    /// Close entries and request randomness once upkeep is needed. Anyone can call.
    StartRound {},
    /// Randomness delivery. Only the configured VRF coordinator may call.
    FulfillRandomWords {
        request_id: u64,
        random_words: Vec<Uint256>,
    },
    /// Reopen a round whose request was never answered. Anyone can call once
    /// the fulfillment timeout has passed. Entries and pool are kept.
    ExpireRound {},
    /// Update configuration. Admin only, and only while the raffle is open.
    UpdateConfig {
        entry_fee: Option<Uint128>,
        key_hash: Option<String>,
        subscription_id: Option<u64>,
        callback_gas_limit: Option<u64>,
        interval_seconds: Option<u64>,
        fulfillment_timeout_seconds: Option<u64>,
    },
}

pub struct UpdateConfigParams {
    pub entry_fee: Option<Uint128>,
    pub key_hash: Option<String>,
    pub subscription_id: Option<u64>,
    pub callback_gas_limit: Option<u64>,
    pub interval_seconds: Option<u64>,
    pub fulfillment_timeout_seconds: Option<u64>,
}

#[cw_serde]
pub struct MigrateMsg {}

/// Carried on the payout sub-message so a failed transfer can be reported.
#[cw_serde]
pub struct PayoutPayload {
    pub winner: Addr,
    pub amount: Uint128,
}

/// Execute messages understood by the VRF coordinator.
#[cw_serde]
pub enum CoordinatorExecuteMsg {
    RequestRandomWords {
        key_hash: String,
        subscription_id: u64,
        request_confirmations: u16,
        callback_gas_limit: u64,
        num_words: u32,
    },
}

/// Query messages understood by the VRF coordinator.
#[cw_serde]
pub enum CoordinatorQueryMsg {
    NextRequestId {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(RaffleConfig)]
    Config {},
    #[returns(RoundInfo)]
    RoundInfo {},
    #[returns(Uint128)]
    EntryFee {},
    #[returns(u64)]
    Interval {},
    #[returns(String)]
    KeyHash {},
    #[returns(u64)]
    CallbackGasLimit {},
    #[returns(u16)]
    RequestConfirmations {},
    #[returns(u32)]
    NumWords {},
    #[returns(RaffleState)]
    RaffleState {},
    #[returns(u32)]
    NumberOfParticipants {},
    #[returns(Addr)]
    Participant { index: u32 },
    #[returns(Uint128)]
    PoolBalance {},
    #[returns(Timestamp)]
    LastTimestamp {},
    #[returns(Option<Addr>)]
    RecentWinner {},
    #[returns(Option<OutstandingRequest>)]
    OutstandingRequest {},
    #[returns(UpkeepResponse)]
    UpkeepNeeded {},
    #[returns(Option<RoundResult>)]
    Round { round_id: u64 },
    #[returns(RoundHistoryResponse)]
    RoundHistory {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
}

/// Result of the upkeep predicate together with the inputs it was computed from.
#[cw_serde]
pub struct UpkeepResponse {
    pub upkeep_needed: bool,
    pub state: RaffleState,
    pub elapsed_seconds: u64,
    pub interval_seconds: u64,
    pub participant_count: u32,
    pub pool_balance: Uint128,
}

#[cw_serde]
pub struct RoundHistoryResponse {
    pub rounds: Vec<RoundResult>,
}
