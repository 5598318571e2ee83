//! Shapes exchanged with the node and the wallet, and the collaborator traits
//! the pipeline talks through.
//!
//! The codec performs no I/O itself. Fetching a blockhash, asking a wallet to
//! sign, and posting the signed transaction are delegated to implementations
//! of [`BlockhashSource`], [`TransactionSigner`] and [`TransactionSubmitter`].
//! Timeouts, retries and cancellation belong to those implementations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::XrsError;
use crate::signature::WalletResponse;
use crate::transaction::BLOCKHASH_LEN;

/// JSON-RPC method the node answers with its latest blockhash.
pub const RECENT_BLOCKHASH_METHOD: &str = "getRecentBlockhash";
pub const GET_TRANSACTION_METHOD: &str = "getTransaction";
pub const GET_BALANCE_METHOD: &str = "getBalance";

/// Something that can hand out a recent blockhash.
pub trait BlockhashSource {
    fn recent_blockhash(&self) -> Result<[u8; BLOCKHASH_LEN], XrsError>;
}

/// An external wallet able to sign an unsigned transaction envelope.
pub trait TransactionSigner {
    fn sign_transaction(&self, unsigned_tx: &[u8]) -> Result<WalletResponse, XrsError>;
}

/// Posts a signed transaction and returns the node's JSON reply.
pub trait TransactionSubmitter {
    fn submit(&self, request: &SubmitRequest) -> Result<Value, XrsError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Vec<Value>,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(method: &'a str, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        }
    }
}

/// Request body for the node's `getRecentBlockhash` call.
pub fn blockhash_request() -> JsonRpcRequest<'static> {
    JsonRpcRequest::new(RECENT_BLOCKHASH_METHOD, Vec::new())
}

/// Request body looking up a transaction by signature. The node answers
/// `{"result": null}` until the transaction is confirmed.
pub fn transaction_request(signature: &str) -> JsonRpcRequest<'static> {
    JsonRpcRequest::new(GET_TRANSACTION_METHOD, vec![Value::from(signature)])
}

pub fn balance_request(address: &str) -> JsonRpcRequest<'static> {
    JsonRpcRequest::new(GET_BALANCE_METHOD, vec![Value::from(address)])
}

/// Lamport balance from a `getBalance` reply.
///
/// The node answers either `{"result": {"value": n}}` or `{"result": n}`.
/// A missing or null result reads as an empty account.
pub fn parse_balance(reply: &Value) -> u64 {
    let Some(result) = reply.get("result") else {
        return 0;
    };
    result
        .get("value")
        .unwrap_or(result)
        .as_u64()
        .unwrap_or(0)
}

/// Parse a blockhash reply.
///
/// Accepted shapes:
///   `{"blockhash": "<64 hex chars>", "format": "hex"}`
///   `{"blockhash": [32 numbers]}`
pub fn parse_blockhash(reply: &Value) -> Result<[u8; BLOCKHASH_LEN], XrsError> {
    let field = reply
        .get("blockhash")
        .ok_or_else(|| XrsError::BadBlockhashFormat("missing blockhash field".into()))?;

    match field {
        Value::String(text) if reply.get("format").and_then(Value::as_str) == Some("hex") => {
            decode_hex_blockhash(text)
        }
        Value::Array(items) if items.len() == BLOCKHASH_LEN => {
            let mut out = [0u8; BLOCKHASH_LEN];
            for (slot, item) in out.iter_mut().zip(items) {
                *slot = item
                    .as_u64()
                    .and_then(|n| u8::try_from(n).ok())
                    .ok_or_else(|| {
                        XrsError::BadBlockhashFormat(format!("{item} is not a byte"))
                    })?;
            }
            Ok(out)
        }
        other => Err(XrsError::BadBlockhashFormat(format!(
            "unsupported blockhash value: {other}"
        ))),
    }
}

/// Parse the node's own JSON-RPC reply: `{"result":{"value":{"blockhash":"<hex>"}}}`.
pub fn parse_node_blockhash(reply: &Value) -> Result<[u8; BLOCKHASH_LEN], XrsError> {
    let text = reply
        .pointer("/result/value/blockhash")
        .and_then(Value::as_str)
        .ok_or_else(|| XrsError::BadBlockhashFormat("node reply has no blockhash".into()))?;
    decode_hex_blockhash(text)
}

fn decode_hex_blockhash(text: &str) -> Result<[u8; BLOCKHASH_LEN], XrsError> {
    let bytes = hex::decode(text).map_err(|e| XrsError::BadBlockhashFormat(e.to_string()))?;
    bytes.try_into().map_err(|v: Vec<u8>| {
        XrsError::BadBlockhashFormat(format!("expected 32 bytes, got {}", v.len()))
    })
}

/// Body posted to the node's `/submit` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub tx_base64: String,
}

/// A successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReceipt {
    /// Transaction identifier from `signature`, `result` or `id`, in that order.
    pub id: Option<String>,
    pub body: Value,
}

/// Interpret the node's reply to a submission.
pub fn parse_submit_response(body: Value) -> Result<SubmitReceipt, XrsError> {
    match body.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => {}
        Some(Value::String(msg)) if msg.is_empty() => {}
        Some(Value::String(msg)) => return Err(XrsError::SubmissionFailed(msg.clone())),
        Some(other) => return Err(XrsError::SubmissionFailed(other.to_string())),
    }

    let id = ["signature", "result", "id"]
        .iter()
        .filter_map(|key| body.get(*key))
        .find(|v| !v.is_null())
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });

    Ok(SubmitReceipt { id, body })
}
