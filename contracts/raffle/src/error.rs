use cosmwasm_std::{OverflowError, StdError, Uint128};
use raffle_common::RaffleState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("insufficient payment: sent {sent}, entry fee is {required}")]
    InsufficientPayment { sent: Uint128, required: Uint128 },

    #[error("must send exactly one coin ({denom})")]
    InvalidFunds { denom: String },

    #[error("must send {expected} denom, got {denom}")]
    WrongDenom { expected: String, denom: String },

    #[error("raffle is not open (state: {state})")]
    RoundNotOpen { state: RaffleState },

    #[error(
        "upkeep not needed: state={state}, elapsed={elapsed_seconds}s, \
         participants={participant_count}, pool={pool_balance}"
    )]
    UpkeepNotNeeded {
        state: RaffleState,
        elapsed_seconds: u64,
        participant_count: u32,
        pool_balance: Uint128,
    },

    #[error("unknown randomness request {request_id}")]
    UnknownRequest { request_id: u64 },

    #[error("fulfillment carried no random words")]
    NoRandomWords,

    #[error("no participant at index {index} in round {round_id}")]
    ParticipantNotFound { round_id: u64, index: u32 },

    #[error("round is not awaiting randomness")]
    NoOutstandingRequest,

    #[error("payout of {amount} to {winner} failed: {reason}")]
    PayoutFailed {
        winner: String,
        amount: Uint128,
        reason: String,
    },

    #[error("unknown reply id {id}")]
    UnknownReplyId { id: u64 },

    #[error("request {request_id} has not timed out yet (deadline: {deadline})")]
    RequestNotExpired { request_id: u64, deadline: u64 },

    #[error("invalid entry fee: must be greater than zero")]
    InvalidEntryFee,

    #[error("invalid interval: {value}s (must be between {min}s and {max}s)")]
    InvalidInterval { value: u64, min: u64, max: u64 },

    #[error("invalid fulfillment timeout: {value}s (must be between {min}s and {max}s)")]
    InvalidFulfillmentTimeout { value: u64, min: u64, max: u64 },

    #[error("invalid callback gas limit: {value} (must be between {min} and {max})")]
    InvalidCallbackGasLimit { value: u64, min: u64, max: u64 },

    #[error("invalid key hash: {reason}")]
    InvalidKeyHash { reason: String },

    #[error("invalid denom: must not be empty")]
    InvalidDenom,
}
