use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Uint128, Uint256};

use crate::state::{CoordinatorConfig, Fulfillment, RandomnessRequest, Subscription};

#[cw_serde]
pub struct InstantiateMsg {
    pub operators: Vec<String>,
    pub fee_denom: String,
    pub base_fee: Uint128,
    pub fee_per_gas: Uint128,
    pub min_request_confirmations: u16,
    pub max_num_words: u32,
    pub max_gas_limit: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Open a new subscription owned by the sender.
    CreateSubscription {},
    /// Top up a subscription. Send `fee_denom` in `info.funds`. Anyone can fund.
    FundSubscription { subscription_id: u64 },
    /// Allow a contract to request randomness against the subscription. Owner only.
    AddConsumer {
        subscription_id: u64,
        consumer: String,
    },
    /// Owner only.
    RemoveConsumer {
        subscription_id: u64,
        consumer: String,
    },
    /// Close a subscription and refund its balance to `to`. Owner only.
    CancelSubscription { subscription_id: u64, to: String },
    /// Request random words. Caller must be a registered consumer.
    RequestRandomWords {
        /// Gas lane, 32 bytes hex-encoded
        key_hash: String,
        subscription_id: u64,
        request_confirmations: u16,
        callback_gas_limit: u64,
        num_words: u32,
    },
    /// Deliver randomness for a pending request. Operators only.
    /// Words are derived on-chain when `random_words` is `None`. Derived words
    /// are predictable and only suitable for test deployments.
    FulfillRandomWords {
        request_id: u64,
        random_words: Option<Vec<Uint256>>,
    },
    /// Send collected fees to `to`. Admin only.
    WithdrawFees { to: String },
    /// Update operator list (admin only).
    UpdateOperators {
        add: Vec<String>,
        remove: Vec<String>,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

/// Callback delivered to the requesting consumer contract.
#[cw_serde]
pub enum ConsumerExecuteMsg {
    FulfillRandomWords {
        request_id: u64,
        random_words: Vec<Uint256>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(CoordinatorConfig)]
    Config {},

    #[returns(Option<Subscription>)]
    Subscription { subscription_id: u64 },

    #[returns(Option<RandomnessRequest>)]
    Request { request_id: u64 },

    #[returns(Vec<RandomnessRequest>)]
    PendingRequests {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(Option<Fulfillment>)]
    Fulfillment { request_id: u64 },

    /// Id the next accepted request will be assigned.
    #[returns(u64)]
    NextRequestId {},

    #[returns(Uint128)]
    CollectedFees {},
}
