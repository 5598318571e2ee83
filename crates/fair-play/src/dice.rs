//! Six-sided dice.
//!
//! | bet     | wins when     | multiplier |
//! |---------|---------------|------------|
//! | exact n | roll == n     | 5          |
//! | high    | roll >= 4     | 1.9        |
//! | low     | roll <= 3     | 1.9        |
//! | odd     | roll is odd   | 1.9        |
//! | even    | roll is even  | 1.9        |
//!
//! The paid-out multiplier is `floor(multiplier)`, so even-money wins return
//! 1x rather than 1.9x. Existing bet histories were settled that way and must
//! replay identically.
//!
//! Any other bet, including `exact` without a face, is accepted and loses.

use serde::Serialize;
use tracing::debug;

use crate::rng::seeded_random;

pub const EXACT_MULTIPLIER: f64 = 5.0;
pub const EVEN_MONEY_MULTIPLIER: f64 = 1.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceBet {
    Exact(i64),
    High,
    Low,
    Odd,
    Even,
    /// Anything the table does not offer. Rolls like any other bet, never wins.
    Unmatched,
}

impl DiceBet {
    pub fn parse(bet_type: Option<&str>, bet_value: Option<i64>) -> Self {
        match (bet_type, bet_value) {
            (Some("exact"), Some(face)) => DiceBet::Exact(face),
            (Some("high"), _) => DiceBet::High,
            (Some("low"), _) => DiceBet::Low,
            (Some("odd"), _) => DiceBet::Odd,
            (Some("even"), _) => DiceBet::Even,
            (other, value) => {
                debug!(bet_type = ?other, bet_value = ?value, "unmatched dice bet");
                DiceBet::Unmatched
            }
        }
    }

    fn multiplier_for(self, roll: u8) -> Option<f64> {
        let won = match self {
            DiceBet::Exact(face) => i64::from(roll) == face,
            DiceBet::High => roll >= 4,
            DiceBet::Low => roll <= 3,
            DiceBet::Odd => roll % 2 != 0,
            DiceBet::Even => roll % 2 == 0,
            DiceBet::Unmatched => false,
        };
        match (won, self) {
            (false, _) => None,
            (true, DiceBet::Exact(_)) => Some(EXACT_MULTIPLIER),
            (true, _) => Some(EVEN_MONEY_MULTIPLIER),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiceOutcome {
    pub roll: u8,
    pub win: bool,
    #[serde(serialize_with = "crate::number::serialize")]
    pub multiplier: f64,
    pub payout: u64,
}

pub fn roll_die(seed: &str) -> u8 {
    (seeded_random(seed, 0) * 6.0).floor() as u8 + 1
}

pub fn resolve_dice(seed: &str, bet: DiceBet) -> DiceOutcome {
    let roll = roll_die(seed);
    match bet.multiplier_for(roll) {
        Some(multiplier) => DiceOutcome {
            roll,
            win: true,
            multiplier,
            payout: multiplier.floor() as u64,
        },
        None => DiceOutcome {
            roll,
            win: false,
            multiplier: 0.0,
            payout: 0,
        },
    }
}
