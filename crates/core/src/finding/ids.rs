//! Random identifier generation.

use rand::Rng;

/// URL-safe alphabet used for finding ids and attachment name suffixes.
pub const ID_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Length of a generated finding id.
pub const FINDING_ID_LEN: usize = 12;

/// Build a random token of `len` characters from [`ID_ALPHABET`].
pub fn random_token<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Generate a new finding id using the thread-local RNG.
pub fn generate_finding_id() -> String {
    random_token(&mut rand::rng(), FINDING_ID_LEN)
}
