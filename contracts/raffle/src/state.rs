use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128, Uint256};
use cw_storage_plus::{Item, Map};
use raffle_common::RaffleState;

pub const CONFIG: Item<RaffleConfig> = Item::new("config");
pub const ROUND: Item<RoundInfo> = Item::new("round");

/// Participant list keyed by `(round_id, entry_index)`.
/// Advancing `round_id` clears the list without touching old keys.
pub const PARTICIPANTS: Map<(u64, u32), Addr> = Map::new("participants");

/// Completed rounds, keyed by round id.
pub const ROUNDS: Map<u64, RoundResult> = Map::new("rounds");

#[cw_serde]
pub struct RaffleConfig {
    pub admin: Addr,
    pub vrf_coordinator: Addr,
    /// Minimum amount of `denom` a single entry must carry
    pub entry_fee: Uint128,
    pub denom: String,
    /// Coordinator routing key (gas lane), 32 bytes hex-encoded
    pub key_hash: String,
    pub subscription_id: u64,
    /// Gas budget the coordinator grants the fulfillment callback
    pub callback_gas_limit: u64,
    /// Minimum seconds between the round anchor and the next request
    pub interval_seconds: u64,
    /// Seconds after which an unanswered request may be expired by anyone
    pub fulfillment_timeout_seconds: u64,
}

#[cw_serde]
pub struct RoundInfo {
    pub round_id: u64,
    pub state: RaffleState,
    pub participant_count: u32,
    /// Sum of all entry amounts since the last payout
    pub pool_balance: Uint128,
    /// Time of the last payout, or of instantiation
    pub last_timestamp: Timestamp,
    pub outstanding_request: Option<OutstandingRequest>,
    pub recent_winner: Option<Addr>,
    pub total_rounds_completed: u64,
    pub total_paid_out: Uint128,
}

#[cw_serde]
pub struct OutstandingRequest {
    pub request_id: u64,
    pub requested_at: Timestamp,
}

#[cw_serde]
pub struct RoundResult {
    pub round_id: u64,
    pub request_id: u64,
    pub winner: Addr,
    pub payout: Uint128,
    pub random_word: Uint256,
    pub winner_index: u32,
    pub participant_count: u32,
    pub completed_at: Timestamp,
}

impl RoundInfo {
    pub fn new(anchor: Timestamp) -> Self {
        RoundInfo {
            round_id: 0,
            state: RaffleState::Open,
            participant_count: 0,
            pool_balance: Uint128::zero(),
            last_timestamp: anchor,
            outstanding_request: None,
            recent_winner: None,
            total_rounds_completed: 0,
            total_paid_out: Uint128::zero(),
        }
    }

    /// Seconds elapsed since the round anchor. Saturates at zero.
    pub fn elapsed_seconds(&self, now: Timestamp) -> u64 {
        now.seconds().saturating_sub(self.last_timestamp.seconds())
    }
}
