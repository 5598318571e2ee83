//! Timed lottery rounds.
//!
//! A round lasts five minutes starting from [`EPOCH_START_MS`]. When it closes
//! the winner is picked from the canonical seed
//! `round-<n>-<address>:<tickets>|<address>:<tickets>|...` by a 32-bit FNV-1a
//! hash reduced modulo the total ticket count, then walking entries in
//! purchase order until the cumulative ticket count exceeds the roll.

use serde::{Deserialize, Serialize};
use tracing::info;

pub const EPOCH_START_MS: u64 = 1_740_441_600_000;
pub const DRAW_INTERVAL_MS: u64 = 5 * 60 * 1000;
pub const WINNER_SHARE: f64 = 0.95;
pub const TREASURY_SHARE: f64 = 0.05;
pub const MAX_TICKETS_PER_PURCHASE: u32 = 100;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketEntry {
    pub address: String,
    pub tickets: u32,
}

impl TicketEntry {
    pub fn new(address: impl Into<String>, tickets: u32) -> Self {
        Self {
            address: address.into(),
            tickets,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawResult {
    pub round: u64,
    pub seed: String,
    pub roll: u32,
    #[serde(rename = "address")]
    pub winner: String,
    #[serde(rename = "amount", serialize_with = "crate::number::serialize")]
    pub winner_prize: f64,
    #[serde(rename = "treasury", serialize_with = "crate::number::serialize")]
    pub treasury_cut: f64,
    #[serde(serialize_with = "crate::number::serialize")]
    pub total_pool: f64,
}

/// Round that is open at `now_ms` (unix milliseconds). Round 1 starts at the epoch.
pub fn current_round(now_ms: u64) -> u64 {
    now_ms.saturating_sub(EPOCH_START_MS) / DRAW_INTERVAL_MS + 1
}

/// Unix millisecond timestamp at which `round` closes.
pub fn round_end_ms(round: u64) -> u64 {
    EPOCH_START_MS.saturating_add(round.saturating_mul(DRAW_INTERVAL_MS))
}

/// 32-bit FNV-1a over the UTF-16 code units of `input`.
pub fn fnv1a(input: &str) -> u32 {
    input.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

pub fn round_seed(round: u64, entries: &[TicketEntry]) -> String {
    let players = entries
        .iter()
        .map(|e| format!("{}:{}", e.address, e.tickets))
        .collect::<Vec<_>>()
        .join("|");
    format!("round-{round}-{players}")
}

/// Round to four decimals from the exact binary value, halves away from zero.
///
/// Scaling by 10^4 first would round `0.00095` (really 0.000949999...) up to
/// `0.001`. Exact halves at the fourth decimal are odd multiples of 1/32, where
/// the scaled value is exact and `round` breaks the tie the right way.
fn round_to_4dp(value: f64) -> f64 {
    let thirty_seconds = value * 32.0;
    if thirty_seconds.fract() == 0.0 && thirty_seconds % 2.0 != 0.0 {
        return (value * 10_000.0).round() / 10_000.0;
    }
    format!("{value:.4}").parse().unwrap_or(value)
}

/// Draw the winner of `round`. Returns `None` when nobody bought a ticket.
pub fn draw_round(round: u64, entries: &[TicketEntry], ticket_price: f64) -> Option<DrawResult> {
    let last = entries.last()?;
    let total: u64 = entries.iter().map(|e| u64::from(e.tickets)).sum();
    let seed = round_seed(round, entries);
    let hash = fnv1a(&seed);
    let roll = if total == 0 {
        0
    } else {
        (u64::from(hash) % total) as u32
    };

    let mut cumulative = 0u64;
    let winner = entries
        .iter()
        .find(|e| {
            cumulative += u64::from(e.tickets);
            u64::from(roll) < cumulative
        })
        .unwrap_or(last);

    let total_pool = total as f64 * ticket_price;
    let result = DrawResult {
        round,
        seed,
        roll,
        winner: winner.address.clone(),
        winner_prize: round_to_4dp(total_pool * WINNER_SHARE),
        treasury_cut: round_to_4dp(total_pool * TREASURY_SHARE),
        total_pool,
    };
    info!(
        round,
        winner = %result.winner,
        prize = result.winner_prize,
        "lottery round drawn"
    );
    Some(result)
}
