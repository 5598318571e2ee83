//! Xeris ledger transaction codec.
//!
//! This crate builds Xeris transactions by hand: opcode-tagged instruction
//! payloads, the single-payer message layout, and the signature envelope.
//! Signing is never done here. An external wallet signs the unsigned
//! envelope and [`signature::extract_signature`] normalises whatever shape
//! it answers with.
//!
//! Base58 goes through `bs58`, Base64 through `base64`.

pub mod address;
pub mod encoding;
pub mod error;
pub mod instruction;
pub mod pipeline;
pub mod rpc;
pub mod signature;
pub mod transaction;

// Re-export key public types for ergonomic imports.
pub use address::{
    base58_decode, base58_encode, base64_decode, base64_encode, normalize_public_key, Address,
};
pub use encoding::{
    decode_compact_length, encode_compact_length, encode_string, encode_u32, encode_u64, encode_u8,
};
pub use error::XrsError;
pub use instruction::{
    checked_lamports, encode_native_transfer, encode_token_create, encode_token_mint,
    encode_token_transfer, lamports_to_xrs, scale_lamports, xrs_to_lamports, Instruction,
    LAMPORTS_PER_XRS, MAX_SAFE_LAMPORTS,
};
pub use pipeline::{resolve_signed_transaction, send_native, sign_and_submit};
pub use rpc::{
    balance_request, blockhash_request, parse_balance, parse_blockhash, parse_node_blockhash,
    parse_submit_response, transaction_request, BlockhashSource, JsonRpcRequest, SubmitReceipt,
    SubmitRequest, TransactionSigner, TransactionSubmitter,
};
pub use signature::{extract_signature, SignedTransactionField, WalletResponse};
pub use transaction::{
    assemble_signed_transaction, build_message, build_unsigned_transaction, parse_message,
    split_transaction, ParsedMessage, BLOCKHASH_LEN, SIGNATURE_LEN,
};
