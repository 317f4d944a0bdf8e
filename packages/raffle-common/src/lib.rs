pub mod randomness;
pub mod types;

pub use randomness::{derive_random_words, winner_index, word_hex};
pub use types::RaffleState;

/// Confirmation depth every raffle request asks the coordinator to wait for.
pub const REQUEST_CONFIRMATIONS: u16 = 3;

/// Random words requested per round. Only the first one is consumed.
pub const NUM_WORDS: u32 = 1;

/// Upper bound on the confirmation depth a coordinator will accept.
pub const MAX_REQUEST_CONFIRMATIONS: u16 = 200;
