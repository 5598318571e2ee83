pub mod config;
pub mod error;
pub mod settlement;

use chain_xrs::{BLOCKHASH_LEN, WalletResponse};
use config::CasinoConfig;
use error::CasinoError;
use fair_play::lottery::{self, TicketEntry};
use fair_play::Game;
use serde_json::Value;

pub use settlement::{
    confirm_bet_transaction, payout_instruction, settle_bet, settle_confirmed_bet, BetRequest,
    BetSettlement, TransactionLookup,
};

uniffi::setup_scaffolding!();

// ─── UniFFI-exported types ───────────────────────────────────────────

/// One player's tickets in a lottery round.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct LotteryTicket {
    pub address: String,
    pub tickets: u32,
}

/// A drawn round. Amounts are in XRS, rounded to four decimals.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct LotteryDraw {
    pub round: u64,
    pub seed: String,
    pub roll: u32,
    pub winner: String,
    pub winner_prize: f64,
    pub treasury_cut: f64,
    pub total_pool: f64,
}

// ─── UniFFI-exported functions ───────────────────────────────────────
// UniFFI passes owned String/Vec<u8> across FFI, so every function here
// takes owned arguments and borrows them for the inner crates.

/// Built-in node and treasury settings, before any overrides.
#[uniffi::export]
pub fn default_config() -> CasinoConfig {
    CasinoConfig::default()
}

/// Settings from a JSON object; missing fields keep their defaults.
#[uniffi::export]
pub fn config_from_json(json: String) -> Result<CasinoConfig, CasinoError> {
    CasinoConfig::from_json(&json)
}

/// Whether `address` decodes to a 32-byte public key.
#[uniffi::export]
pub fn validate_address(address: String) -> bool {
    chain_xrs::normalize_public_key(&address).is_ok()
}

/// Decode a base58 address to its 32 public-key bytes.
#[uniffi::export]
pub fn normalize_public_key(address: String) -> Result<Vec<u8>, CasinoError> {
    Ok(chain_xrs::normalize_public_key(&address)?.to_vec())
}

/// Decimal XRS to lamports, rounded to the nearest lamport.
#[uniffi::export]
pub fn xrs_to_lamports(xrs: f64) -> Result<u64, CasinoError> {
    Ok(chain_xrs::xrs_to_lamports(xrs)?)
}

/// Lamports to decimal XRS, for display only.
#[uniffi::export]
pub fn lamports_to_xrs(lamports: u64) -> f64 {
    chain_xrs::lamports_to_xrs(lamports)
}

/// Instruction data moving `amount` lamports from `from` to `to`.
#[uniffi::export]
pub fn encode_native_transfer(from: String, to: String, amount: u64) -> Vec<u8> {
    chain_xrs::encode_native_transfer(&from, &to, amount)
}

/// Instruction data moving `amount` base units of `token_id`.
#[uniffi::export]
pub fn encode_token_transfer(token_id: String, from: String, to: String, amount: u64) -> Vec<u8> {
    chain_xrs::encode_token_transfer(&token_id, &from, &to, amount)
}

/// Instruction data registering a new token with its full supply.
#[uniffi::export]
pub fn encode_token_create(
    token_id: String,
    name: String,
    symbol: String,
    decimals: u8,
    supply: u64,
    mint_authority: String,
) -> Vec<u8> {
    chain_xrs::encode_token_create(&token_id, &name, &symbol, decimals, supply, &mint_authority)
}

/// Instruction data minting `amount` of `token_id` to `to`.
#[uniffi::export]
pub fn encode_token_mint(token_id: String, to: String, amount: u64) -> Vec<u8> {
    chain_xrs::encode_token_mint(&token_id, &to, amount)
}

/// Parse a blockhash reply, either the proxied `{blockhash, format}` shape or
/// the node's own `{result: {value: {blockhash}}}`.
#[uniffi::export]
pub fn parse_blockhash_json(reply_json: String) -> Result<Vec<u8>, CasinoError> {
    let reply: Value = serde_json::from_str(&reply_json)?;
    let blockhash = if reply.get("result").is_some() {
        chain_xrs::parse_node_blockhash(&reply)?
    } else {
        chain_xrs::parse_blockhash(&reply)?
    };
    Ok(blockhash.to_vec())
}

/// Message bytes for `payer` carrying `instruction_data`.
#[uniffi::export]
pub fn build_message(
    payer_address: String,
    instruction_data: Vec<u8>,
    recent_blockhash: Vec<u8>,
) -> Result<Vec<u8>, CasinoError> {
    let payer = chain_xrs::normalize_public_key(&payer_address)?;
    let blockhash: [u8; BLOCKHASH_LEN] = recent_blockhash.try_into().map_err(|v: Vec<u8>| {
        CasinoError::EncodingFailed(format!("blockhash must be 32 bytes, got {}", v.len()))
    })?;
    Ok(chain_xrs::build_message(&payer, &instruction_data, &blockhash))
}

/// `message` behind a single zeroed signature slot, ready for a wallet.
#[uniffi::export]
pub fn build_unsigned_transaction(message: Vec<u8>) -> Vec<u8> {
    chain_xrs::build_unsigned_transaction(&message)
}

/// The 64-byte signature from a wallet reply, given as JSON.
#[uniffi::export]
pub fn extract_signature_json(response_json: String) -> Result<Vec<u8>, CasinoError> {
    let value: Value = serde_json::from_str(&response_json)?;
    let response = WalletResponse::from_json(&value)?;
    Ok(chain_xrs::extract_signature(&response)?.to_vec())
}

/// Base64 signed transaction for `message` from a wallet reply given as JSON.
#[uniffi::export]
pub fn signed_transaction_base64(
    response_json: String,
    message: Vec<u8>,
) -> Result<String, CasinoError> {
    let value: Value = serde_json::from_str(&response_json)?;
    let response = WalletResponse::from_json(&value)?;
    Ok(chain_xrs::resolve_signed_transaction(&response, &message)?)
}

/// The `index`-th draw in `[0, 1)` for `seed`.
#[uniffi::export]
pub fn seeded_random(seed: String, index: u32) -> f64 {
    fair_play::seeded_random(&seed, index)
}

/// Resolve one round and return the outcome JSON. Only an unknown game
/// fails; an unrecognised bet comes back as a loss.
#[uniffi::export]
pub fn resolve_game_json(
    game: String,
    seed: String,
    bet_type: Option<String>,
    bet_value: Option<i64>,
) -> Result<String, CasinoError> {
    let game: Game = game.parse()?;
    let outcome = fair_play::resolve_game(game, &seed, bet_type.as_deref(), bet_value);
    Ok(serde_json::to_string(&outcome)?)
}

/// Lottery round open at `now_ms` (Unix milliseconds).
#[uniffi::export]
pub fn current_lottery_round(now_ms: u64) -> u64 {
    lottery::current_round(now_ms)
}

/// When `round` closes, in Unix milliseconds.
#[uniffi::export]
pub fn lottery_round_end_ms(round: u64) -> u64 {
    lottery::round_end_ms(round)
}

/// Pick the winner of `round`. `None` when no tickets were sold.
#[uniffi::export]
pub fn draw_lottery_round(
    round: u64,
    entries: Vec<LotteryTicket>,
    ticket_price: f64,
) -> Option<LotteryDraw> {
    let entries: Vec<TicketEntry> = entries
        .into_iter()
        .map(|t| TicketEntry::new(t.address, t.tickets))
        .collect();
    lottery::draw_round(round, &entries, ticket_price).map(|draw| LotteryDraw {
        round: draw.round,
        seed: draw.seed,
        roll: draw.roll,
        winner: draw.winner,
        winner_prize: draw.winner_prize,
        treasury_cut: draw.treasury_cut,
        total_pool: draw.total_pool,
    })
}
