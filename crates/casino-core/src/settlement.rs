//! Turning a confirmed bet transaction into a game result and a payout.
//!
//! The bet transaction's signature is the seed, so the player can replay the
//! round with `fair_play` alone. Building and submitting the payout transfer
//! stays with the caller; [`payout_instruction`] only encodes it.
//!
//! Payouts are computed in integer lamports. Stakes and payouts above
//! [`MAX_SAFE_LAMPORTS`](chain_xrs::MAX_SAFE_LAMPORTS) are refused rather
//! than rounded.

use std::str::FromStr;
use std::thread;
use std::time::Duration;

use chain_xrs::{encode_native_transfer, normalize_public_key, scale_lamports};
use fair_play::{resolve_game, Game};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::CasinoConfig;
use crate::error::CasinoError;

/// Looks up a transaction on the node. `Ok(None)` means not yet confirmed.
pub trait TransactionLookup {
    fn get_transaction(&self, signature: &str) -> Result<Option<Value>, CasinoError>;
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct BetRequest {
    pub player_address: String,
    pub bet_tx_signature: String,
    /// Stake in lamports.
    pub bet_amount: u64,
    pub game: String,
    pub bet_type: Option<String>,
    pub bet_value: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct BetSettlement {
    pub game: String,
    pub seed: String,
    pub player_address: String,
    /// Game outcome as the JSON object players verify against.
    pub result_json: String,
    pub payout_multiplier: f64,
    pub bet_amount: u64,
    pub payout_amount: u64,
    pub bet_tx_signature: String,
    pub explorer_base: String,
    pub bet_verify_url: String,
}

impl BetSettlement {
    pub fn is_win(&self) -> bool {
        self.payout_amount > 0
    }
}

/// Resolve the bet's game and compute what the house owes.
#[uniffi::export]
pub fn settle_bet(
    config: CasinoConfig,
    request: BetRequest,
) -> Result<BetSettlement, CasinoError> {
    if request.bet_tx_signature.is_empty() {
        return Err(CasinoError::InvalidBet("missing bet transaction signature".into()));
    }
    if request.bet_amount == 0 {
        return Err(CasinoError::InvalidBet("bet amount is zero".into()));
    }
    normalize_public_key(&request.player_address)?;

    let game = Game::from_str(&request.game)?;
    let seed = request.bet_tx_signature.clone();
    let outcome = resolve_game(game, &seed, request.bet_type.as_deref(), request.bet_value);

    let (numerator, denominator) = outcome.payout_ratio();
    let payout_amount = scale_lamports(request.bet_amount, numerator, denominator)?;

    info!(
        game = %game,
        player = %request.player_address,
        bet_amount = request.bet_amount,
        payout_amount,
        "bet settled"
    );

    Ok(BetSettlement {
        game: game.to_string(),
        result_json: serde_json::to_string(&outcome)?,
        payout_multiplier: outcome.payout_multiplier(),
        bet_amount: request.bet_amount,
        payout_amount,
        explorer_base: config.explorer_tx_base(),
        bet_verify_url: config.explorer_tx_url(&seed),
        player_address: request.player_address,
        bet_tx_signature: request.bet_tx_signature,
        seed,
    })
}

/// Native transfer paying a winning settlement out of the treasury.
/// `None` for a losing bet.
pub fn payout_instruction(config: &CasinoConfig, settlement: &BetSettlement) -> Option<Vec<u8>> {
    settlement.is_win().then(|| {
        encode_native_transfer(
            &config.treasury_address,
            &settlement.player_address,
            settlement.payout_amount,
        )
    })
}

/// Poll `lookup` until the bet transaction shows up, sleeping
/// `confirm_interval_ms` between at most `confirm_attempts` tries.
pub fn confirm_bet_transaction<L>(
    config: &CasinoConfig,
    lookup: &L,
    signature: &str,
) -> Result<Value, CasinoError>
where
    L: TransactionLookup + ?Sized,
{
    let interval = Duration::from_millis(config.confirm_interval_ms);
    for attempt in 1..=config.confirm_attempts {
        match lookup.get_transaction(signature)? {
            Some(tx) if !tx.is_null() => {
                debug!(signature, attempt, "bet transaction confirmed");
                return Ok(tx);
            }
            _ if attempt < config.confirm_attempts => thread::sleep(interval),
            _ => {}
        }
    }
    warn!(signature, attempts = config.confirm_attempts, "bet transaction not found");
    Err(CasinoError::BetNotConfirmed(format!(
        "{signature} not found after {} attempts",
        config.confirm_attempts
    )))
}

/// Wait for the bet transaction to confirm, then settle it.
pub fn settle_confirmed_bet<L>(
    config: &CasinoConfig,
    lookup: &L,
    request: BetRequest,
) -> Result<BetSettlement, CasinoError>
where
    L: TransactionLookup + ?Sized,
{
    confirm_bet_transaction(config, lookup, &request.bet_tx_signature)?;
    settle_bet(config.clone(), request)
}
