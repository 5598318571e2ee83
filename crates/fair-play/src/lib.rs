//! Provably fair game resolution.
//!
//! Every game is a pure function of a seed string (in practice the signature
//! of the bet transaction) and the player's bet. Nothing here touches the
//! ledger or keeps state, so any outcome can be recomputed by a third party.
//! Once the game is known nothing here fails: an unrecognised bet still
//! produces a verifiable losing outcome.

pub mod blackjack;
pub mod crash;
pub mod dice;
pub mod error;
pub mod lottery;
mod number;
pub mod rng;
pub mod roulette;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

pub use blackjack::{resolve_blackjack, BlackjackOutcome, Card, HandResult, Rank, Suit};
pub use crash::{resolve_crash, CrashOutcome};
pub use dice::{resolve_dice, DiceBet, DiceOutcome};
pub use error::GameError;
pub use lottery::{draw_round, DrawResult, TicketEntry};
pub use rng::{seed_hash, seeded_random};
pub use roulette::{resolve_roulette, RouletteBet, RouletteOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Game {
    Dice,
    Crash,
    Roulette,
    Blackjack,
}

impl Game {
    pub fn as_str(self) -> &'static str {
        match self {
            Game::Dice => "dice",
            Game::Crash => "crash",
            Game::Roulette => "roulette",
            Game::Blackjack => "blackjack",
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Game {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dice" => Ok(Game::Dice),
            "crash" => Ok(Game::Crash),
            "roulette" => Ok(Game::Roulette),
            "blackjack" => Ok(Game::Blackjack),
            other => Err(GameError::UnknownGame(other.to_string())),
        }
    }
}

/// A typed bet. Crash and blackjack take no wager choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bet {
    Dice(DiceBet),
    Crash,
    Roulette(RouletteBet),
    Blackjack,
}

impl Bet {
    pub fn game(&self) -> Game {
        match self {
            Bet::Dice(_) => Game::Dice,
            Bet::Crash => Game::Crash,
            Bet::Roulette(_) => Game::Roulette,
            Bet::Blackjack => Game::Blackjack,
        }
    }

    /// Build a bet from the loosely typed request fields. Crash and
    /// blackjack ignore both fields.
    pub fn parse(game: Game, bet_type: Option<&str>, bet_value: Option<i64>) -> Self {
        match game {
            Game::Dice => Bet::Dice(DiceBet::parse(bet_type, bet_value)),
            Game::Crash => Bet::Crash,
            Game::Roulette => Bet::Roulette(RouletteBet::parse(bet_type, bet_value)),
            Game::Blackjack => Bet::Blackjack,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GameOutcome {
    Dice(DiceOutcome),
    Crash(CrashOutcome),
    Roulette(RouletteOutcome),
    Blackjack(BlackjackOutcome),
}

impl GameOutcome {
    /// Stake multiple owed to the player.
    ///
    /// Uses `payout` where the game reports one, else `multiplier`. Crash
    /// reports neither and settles at 0: cash-out is handled client side.
    pub fn payout_multiplier(&self) -> f64 {
        let (numerator, denominator) = self.payout_ratio();
        numerator as f64 / denominator as f64
    }

    /// [`payout_multiplier`](Self::payout_multiplier) as an exact
    /// `(numerator, denominator)` pair for integer settlement.
    pub fn payout_ratio(&self) -> (u64, u64) {
        match self {
            GameOutcome::Dice(out) => (out.payout, 1),
            GameOutcome::Roulette(out) => (u64::from(out.payout), 1),
            GameOutcome::Blackjack(out) => out.result.payout_ratio(),
            GameOutcome::Crash(_) => (0, 1),
        }
    }

    pub fn is_win(&self) -> bool {
        self.payout_multiplier() > 0.0
    }
}

pub fn resolve(seed: &str, bet: &Bet) -> GameOutcome {
    match *bet {
        Bet::Dice(bet) => GameOutcome::Dice(resolve_dice(seed, bet)),
        Bet::Crash => GameOutcome::Crash(resolve_crash(seed)),
        Bet::Roulette(bet) => GameOutcome::Roulette(resolve_roulette(seed, bet)),
        Bet::Blackjack => GameOutcome::Blackjack(resolve_blackjack(seed)),
    }
}

pub fn resolve_game(
    game: Game,
    seed: &str,
    bet_type: Option<&str>,
    bet_value: Option<i64>,
) -> GameOutcome {
    resolve(seed, &Bet::parse(game, bet_type, bet_value))
}
