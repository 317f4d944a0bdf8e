use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("subscription {subscription_id} not found")]
    SubscriptionNotFound { subscription_id: u64 },

    #[error("{consumer} is not a consumer of subscription {subscription_id}")]
    InvalidConsumer {
        subscription_id: u64,
        consumer: String,
    },

    #[error("subscription {subscription_id} already has the maximum of {max} consumers")]
    TooManyConsumers { subscription_id: u64, max: usize },

    #[error("subscription {subscription_id} has {pending} pending requests")]
    PendingRequestExists { subscription_id: u64, pending: u32 },

    #[error("insufficient subscription balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Uint128, available: Uint128 },

    #[error("no {denom} sent")]
    NoFundsSent { denom: String },

    #[error("must send exactly one coin ({denom})")]
    InvalidFunds { denom: String },

    #[error("must send {expected} denom, got {denom}")]
    WrongDenom { expected: String, denom: String },

    #[error("invalid request confirmations {have} (must be between {min} and {max})")]
    InvalidRequestConfirmations { have: u16, min: u16, max: u16 },

    #[error("invalid number of words {have} (must be between 1 and {max})")]
    InvalidNumWords { have: u32, max: u32 },

    #[error("callback gas limit {have} exceeds maximum {max}")]
    GasLimitTooBig { have: u64, max: u64 },

    #[error("invalid key hash: {reason}")]
    InvalidKeyHash { reason: String },

    #[error("request {request_id} not found or already fulfilled")]
    RequestNotFound { request_id: u64 },

    #[error("request {request_id} needs more confirmations (ready at height {ready_at}, current {current})")]
    NotEnoughConfirmations {
        request_id: u64,
        ready_at: u64,
        current: u64,
    },

    #[error("wrong number of random words: expected {expected}, got {got}")]
    WrongNumberOfWords { expected: u32, got: usize },

    #[error("no fees to withdraw")]
    NoFeesToWithdraw,

    #[error("unknown reply id {id}")]
    UnknownReplyId { id: u64 },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },
}
