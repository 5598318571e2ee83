//! Seeded pseudo-randomness for provably fair games.
//!
//! The seed is the bet transaction's signature, so anyone holding it can
//! replay a round. Outputs must match the deployed resolver bit for bit:
//!
//! ```text
//! hash = 0
//! for unit in utf16(seed ++ decimal(index)):
//!     hash = i32(hash * 31 + unit)        // wrapping, as (hash << 5) - hash
//! draw = (|hash| mod 1_000_000) / 1_000_000
//! ```
//!
//! Hashing runs over UTF-16 code units. For the Base58 seeds seen in
//! practice those are the same values as the UTF-8 bytes.

/// Rolling 31-multiplier string hash with 32-bit wraparound.
pub fn seed_hash(input: &str) -> i32 {
    input.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Deterministic draw in `[0, 1)` with six decimal digits of resolution.
pub fn seeded_random(seed: &str, index: u32) -> f64 {
    let hash = seed_hash(&format!("{seed}{index}"));
    (i64::from(hash).abs() % 1_000_000) as f64 / 1_000_000.0
}
