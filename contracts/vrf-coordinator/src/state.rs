use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128, Uint256};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<CoordinatorConfig> = Item::new("config");
pub const COUNTERS: Item<Counters> = Item::new("counters");
pub const SUBSCRIPTIONS: Map<u64, Subscription> = Map::new("subscriptions");
/// Requests awaiting fulfillment. Removed when fulfilled.
pub const PENDING_REQUESTS: Map<u64, RandomnessRequest> = Map::new("pending_requests");
/// Delivery record for every fulfilled request.
pub const FULFILLMENTS: Map<u64, Fulfillment> = Map::new("fulfillments");

#[cw_serde]
pub struct CoordinatorConfig {
    pub admin: Addr,
    /// Off-chain oracle keys allowed to deliver randomness
    pub operators: Vec<Addr>,
    pub fee_denom: String,
    /// Flat fee charged per fulfilled request
    pub base_fee: Uint128,
    /// Fee per unit of callback gas budget
    pub fee_per_gas: Uint128,
    pub min_request_confirmations: u16,
    pub max_num_words: u32,
    pub max_gas_limit: u64,
}

#[cw_serde]
pub struct Counters {
    pub next_request_id: u64,
    pub next_subscription_id: u64,
    /// Fees charged to subscriptions and not yet withdrawn
    pub collected_fees: Uint128,
}

#[cw_serde]
pub struct Subscription {
    pub id: u64,
    pub owner: Addr,
    pub balance: Uint128,
    pub consumers: Vec<Addr>,
    /// Total requests ever made through this subscription
    pub req_count: u64,
    pub pending_requests: u32,
}

#[cw_serde]
pub struct RandomnessRequest {
    pub request_id: u64,
    pub subscription_id: u64,
    pub consumer: Addr,
    pub key_hash: String,
    pub request_confirmations: u16,
    pub callback_gas_limit: u64,
    pub num_words: u32,
    pub request_height: u64,
    pub requested_at: Timestamp,
}

impl RandomnessRequest {
    /// First block height at which the request may be fulfilled.
    pub fn ready_at_height(&self) -> u64 {
        self.request_height + self.request_confirmations as u64
    }
}

#[cw_serde]
pub struct Fulfillment {
    pub request_id: u64,
    pub consumer: Addr,
    pub random_words: Vec<Uint256>,
    pub payment: Uint128,
    pub fulfilled_height: u64,
    pub fulfilled_at: Timestamp,
    pub fulfilled_by: Addr,
    /// `None` until the consumer callback reply is processed
    pub callback_success: Option<bool>,
    pub callback_error: Option<String>,
}
