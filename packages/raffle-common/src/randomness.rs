use cosmwasm_std::{Uint128, Uint256};
use sha2::{Digest, Sha256};

/// Map a random word onto a participant slot.
///
/// `index = random_word mod participant_count`. Slightly biased toward low
/// indices when the count does not divide 2^256, which is negligible at this
/// range. Returns `None` for an empty participant list.
pub fn winner_index(random_word: Uint256, participant_count: u32) -> Option<u32> {
    let count = Uint256::from(participant_count as u128);
    let rem = random_word.checked_rem(count).ok()?;
    let rem = Uint128::try_from(rem).ok()?;
    u32::try_from(rem.u128()).ok()
}

/// Derive `num_words` pseudo-random words for a request.
///
/// `word_i = sha256( request_id_u64_be || height_u64_be || i_u32_be )`
///
/// Used by the coordinator when an operator fulfills without supplying words.
/// The output is predictable from public data and the operator picks the
/// fulfillment height, so this fallback is for test and mock deployments only.
/// Production operators must supply verifiable words.
pub fn derive_random_words(request_id: u64, height: u64, num_words: u32) -> Vec<Uint256> {
    (0..num_words)
        .map(|i| {
            let mut hasher = Sha256::new();
            hasher.update(request_id.to_be_bytes());
            hasher.update(height.to_be_bytes());
            hasher.update(i.to_be_bytes());
            let digest: [u8; 32] = hasher.finalize().into();
            Uint256::from_be_bytes(digest)
        })
        .collect()
}

/// Hex encoding of a word's big-endian bytes, for event attributes.
pub fn word_hex(word: &Uint256) -> String {
    hex::encode(word.to_be_bytes())
}
