//! Build, sign and submit a single-instruction transaction.
//!
//! ```text
//! blockhash source ──► build_message ──► unsigned envelope ──► wallet
//!                                                               │
//! submitter ◄── base64(signed envelope) ◄── extract_signature ◄─┘
//! ```

use tracing::{debug, info};

use crate::address::{base64_encode, normalize_public_key};
use crate::error::XrsError;
use crate::instruction::{encode_native_transfer, xrs_to_lamports};
use crate::rpc::{
    parse_submit_response, BlockhashSource, SubmitReceipt, SubmitRequest, TransactionSigner,
    TransactionSubmitter,
};
use crate::signature::{extract_signature, WalletResponse};
use crate::transaction::{assemble_signed_transaction, build_message, build_unsigned_transaction};

/// Turn a wallet's reply into the Base64 signed transaction for `message`.
pub fn resolve_signed_transaction(
    response: &WalletResponse,
    message: &[u8],
) -> Result<String, XrsError> {
    let signature = extract_signature(response)?;
    let signed = assemble_signed_transaction(&signature, message)?;
    Ok(base64_encode(&signed))
}

/// Wrap `instruction_data` for `payer_address`, have it signed, and submit it.
pub fn sign_and_submit<B, S, T>(
    blockhash_source: &B,
    signer: &S,
    submitter: &T,
    instruction_data: &[u8],
    payer_address: &str,
) -> Result<SubmitReceipt, XrsError>
where
    B: BlockhashSource + ?Sized,
    S: TransactionSigner + ?Sized,
    T: TransactionSubmitter + ?Sized,
{
    let blockhash = blockhash_source.recent_blockhash()?;
    let payer = normalize_public_key(payer_address)?;
    let message = build_message(&payer, instruction_data, &blockhash);
    let unsigned = build_unsigned_transaction(&message);
    debug!(
        payer = payer_address,
        message_len = message.len(),
        "requesting wallet signature"
    );

    let response = signer.sign_transaction(&unsigned)?;
    let tx_base64 = resolve_signed_transaction(&response, &message)?;

    let reply = submitter.submit(&SubmitRequest { tx_base64 })?;
    let receipt = parse_submit_response(reply)?;
    info!(payer = payer_address, id = ?receipt.id, "transaction submitted");
    Ok(receipt)
}

/// Send `xrs` native tokens from `from` to `to`, with `from` paying.
pub fn send_native<B, S, T>(
    blockhash_source: &B,
    signer: &S,
    submitter: &T,
    from: &str,
    to: &str,
    xrs: f64,
) -> Result<SubmitReceipt, XrsError>
where
    B: BlockhashSource + ?Sized,
    S: TransactionSigner + ?Sized,
    T: TransactionSubmitter + ?Sized,
{
    let lamports = xrs_to_lamports(xrs)?;
    let data = encode_native_transfer(from, to, lamports);
    sign_and_submit(blockhash_source, signer, submitter, &data, from)
}
