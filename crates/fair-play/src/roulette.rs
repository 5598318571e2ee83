//! Single-zero European roulette.
//!
//! A straight-up number pays 35:1, every outside bet pays 1:1, and zero loses
//! all outside bets. `payout` includes the returned stake. A bet the table
//! does not offer still spins and loses.

use serde::Serialize;
use tracing::debug;

use crate::rng::seeded_random;

pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

pub const STRAIGHT_UP_MULTIPLIER: u32 = 35;
pub const OUTSIDE_MULTIPLIER: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouletteBet {
    Number(i64),
    Red,
    Black,
    Even,
    Odd,
    Low,
    High,
    Unmatched,
}

impl RouletteBet {
    pub fn parse(bet_type: Option<&str>, bet_value: Option<i64>) -> Self {
        match (bet_type, bet_value) {
            (Some("number"), Some(pocket)) => RouletteBet::Number(pocket),
            (Some("red"), _) => RouletteBet::Red,
            (Some("black"), _) => RouletteBet::Black,
            (Some("even"), _) => RouletteBet::Even,
            (Some("odd"), _) => RouletteBet::Odd,
            (Some("low"), _) => RouletteBet::Low,
            (Some("high"), _) => RouletteBet::High,
            (other, value) => {
                debug!(bet_type = ?other, bet_value = ?value, "unmatched roulette bet");
                RouletteBet::Unmatched
            }
        }
    }

    fn wins(self, pocket: u8) -> bool {
        let outside = pocket != 0;
        match self {
            RouletteBet::Number(n) => i64::from(pocket) == n,
            RouletteBet::Red => outside && is_red(pocket),
            RouletteBet::Black => outside && !is_red(pocket),
            RouletteBet::Even => outside && pocket % 2 == 0,
            RouletteBet::Odd => outside && pocket % 2 != 0,
            RouletteBet::Low => (1..=18).contains(&pocket),
            RouletteBet::High => (19..=36).contains(&pocket),
            RouletteBet::Unmatched => false,
        }
    }

    fn multiplier(self) -> u32 {
        match self {
            RouletteBet::Number(_) => STRAIGHT_UP_MULTIPLIER,
            _ => OUTSIDE_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouletteOutcome {
    pub roll: u8,
    pub win: bool,
    pub multiplier: u32,
    pub payout: u32,
}

pub fn is_red(pocket: u8) -> bool {
    RED_NUMBERS.contains(&pocket)
}

pub fn spin_wheel(seed: &str) -> u8 {
    (seeded_random(seed, 0) * 37.0).floor() as u8
}

pub fn resolve_roulette(seed: &str, bet: RouletteBet) -> RouletteOutcome {
    let roll = spin_wheel(seed);
    if bet.wins(roll) {
        let multiplier = bet.multiplier();
        RouletteOutcome {
            roll,
            win: true,
            multiplier,
            payout: multiplier + 1,
        }
    } else {
        RouletteOutcome {
            roll,
            win: false,
            multiplier: 0,
            payout: 0,
        }
    }
}
