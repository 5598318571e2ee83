//! Signature extraction from external wallet responses.
//!
//! Wallets answer `signTransaction` in several shapes. [`WalletResponse`] is
//! the tagged form of those shapes and [`extract_signature`] reduces any of
//! them to the canonical 64-byte Ed25519 signature.
//!
//! Resolution order is fixed:
//!
//! 1. An object's `signature` field, if it holds exactly 64 bytes.
//! 2. An object's `signedTransaction` field (Base64 text or raw bytes),
//!    unwrapped with the framing detectors below.
//! 3. A bare Base64 string, unwrapped with the framing detectors.
//! 4. Raw bytes: exactly 64 bytes is the signature; more is a transaction
//!    unwrapped with the framing detectors.
//!
//! Two transaction framings are recognised, tried in this order:
//!
//! ```text
//! fixed-count:  u64 LE count (= 1) | signature(64) | message     (>= 72 bytes)
//! compact:      compact count (>= 1, at most 2 bytes) | signature(64) | message
//! ```
//!
//! The fixed-count detector only fires when bytes 1..8 are all zero, which
//! is what separates it from a compact count of 1 followed by a signature.

use serde_json::{Map, Value};
use tracing::debug;

use crate::address::base64_decode;
use crate::error::XrsError;
use crate::transaction::SIGNATURE_LEN;

/// The `signedTransaction` field of a wallet response object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignedTransactionField {
    Base64(String),
    Bytes(Vec<u8>),
}

/// A wallet's reply to `signTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletResponse {
    Object {
        signature: Option<Vec<u8>>,
        signed_transaction: Option<SignedTransactionField>,
    },
    Base64(String),
    Bytes(Vec<u8>),
}

impl WalletResponse {
    /// Map a JSON wallet reply onto the tagged shape.
    ///
    /// Byte sequences may arrive as number arrays or as typed-array objects
    /// keyed `"0"`, `"1"`, ... (the JSON form of a `Uint8Array`).
    pub fn from_json(value: &Value) -> Result<Self, XrsError> {
        match value {
            Value::String(s) => Ok(WalletResponse::Base64(s.clone())),
            Value::Array(_) => json_bytes(value).map(WalletResponse::Bytes).ok_or_else(|| {
                XrsError::UnextractableSignature("array is not a byte sequence".into())
            }),
            Value::Object(map) => {
                if let Some(bytes) = typed_array_bytes(map) {
                    return Ok(WalletResponse::Bytes(bytes));
                }
                let signature = map.get("signature").and_then(json_bytes);
                let signed_transaction = match map.get("signedTransaction") {
                    Some(Value::String(s)) if !s.is_empty() => {
                        Some(SignedTransactionField::Base64(s.clone()))
                    }
                    Some(other) => json_bytes(other).map(SignedTransactionField::Bytes),
                    None => None,
                };
                Ok(WalletResponse::Object {
                    signature,
                    signed_transaction,
                })
            }
            other => Err(XrsError::UnextractableSignature(format!(
                "unsupported wallet response: {other}"
            ))),
        }
    }
}

/// Reduce a wallet response to its 64-byte signature.
pub fn extract_signature(response: &WalletResponse) -> Result<[u8; SIGNATURE_LEN], XrsError> {
    match response {
        WalletResponse::Object {
            signature,
            signed_transaction,
        } => {
            if let Some(sig) = signature.as_deref().and_then(as_signature) {
                debug!("signature taken from wallet response field");
                return Ok(sig);
            }
            match signed_transaction {
                Some(SignedTransactionField::Base64(text)) => {
                    signature_from_transaction(&decode_wallet_base64(text)?)
                }
                Some(SignedTransactionField::Bytes(bytes)) => signature_from_transaction(bytes),
                None => Err(XrsError::UnextractableSignature(
                    "response has neither a 64-byte signature nor a signed transaction".into(),
                )),
            }
        }
        WalletResponse::Base64(text) => signature_from_transaction(&decode_wallet_base64(text)?),
        WalletResponse::Bytes(bytes) => {
            if let Some(sig) = as_signature(bytes) {
                return Ok(sig);
            }
            if bytes.len() > SIGNATURE_LEN {
                return signature_from_transaction(bytes);
            }
            Err(XrsError::UnextractableSignature(format!(
                "bad wallet response: {} bytes",
                bytes.len()
            )))
        }
    }
}

type FramingDetector = fn(&[u8]) -> Option<[u8; SIGNATURE_LEN]>;

const FRAMING_DETECTORS: [(&str, FramingDetector); 2] = [
    ("fixed-count", detect_fixed_count_framing),
    ("compact", detect_compact_framing),
];

/// Strip transaction framing and return the first signature.
pub fn signature_from_transaction(tx: &[u8]) -> Result<[u8; SIGNATURE_LEN], XrsError> {
    for (name, detect) in FRAMING_DETECTORS {
        if let Some(sig) = detect(tx) {
            debug!(framing = name, tx_len = tx.len(), "signature extracted");
            return Ok(sig);
        }
    }
    Err(XrsError::UnextractableSignature(format!(
        "no recognised framing in {} bytes",
        tx.len()
    )))
}

/// `01 00 00 00 00 00 00 00 | sig(64) | ...`
fn detect_fixed_count_framing(tx: &[u8]) -> Option<[u8; SIGNATURE_LEN]> {
    const COUNT_LEN: usize = 8;
    if tx.len() < COUNT_LEN + SIGNATURE_LEN || tx[0] != 1 {
        return None;
    }
    if tx[1..COUNT_LEN].iter().any(|b| *b != 0) {
        return None;
    }
    as_signature(&tx[COUNT_LEN..COUNT_LEN + SIGNATURE_LEN])
}

/// Compact count of at least one, read from at most two bytes.
fn detect_compact_framing(tx: &[u8]) -> Option<[u8; SIGNATURE_LEN]> {
    let first = *tx.first()?;
    let mut count = u16::from(first & 0x7f);
    let mut offset = 1;
    if first & 0x80 != 0 {
        count |= u16::from(tx.get(1)? & 0x7f) << 7;
        offset = 2;
    }
    if count == 0 {
        return None;
    }
    tx.get(offset..offset + SIGNATURE_LEN).and_then(as_signature)
}

fn as_signature(bytes: &[u8]) -> Option<[u8; SIGNATURE_LEN]> {
    bytes.try_into().ok()
}

fn decode_wallet_base64(text: &str) -> Result<Vec<u8>, XrsError> {
    base64_decode(text).map_err(|e| XrsError::UnextractableSignature(e.to_string()))
}

fn json_bytes(value: &Value) -> Option<Vec<u8>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
            .collect(),
        Value::Object(map) => typed_array_bytes(map),
        _ => None,
    }
}

/// `{"0": 12, "1": 200, ...}` with contiguous indices from zero.
fn typed_array_bytes(map: &Map<String, Value>) -> Option<Vec<u8>> {
    if map.is_empty() {
        return None;
    }
    let mut out = vec![0u8; map.len()];
    for (key, value) in map {
        let index: usize = key.parse().ok()?;
        let byte = value.as_u64().and_then(|n| u8::try_from(n).ok())?;
        *out.get_mut(index)? = byte;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::base64_encode;
    use crate::transaction::{assemble_signed_transaction, build_message};
    use proptest::prelude::*;
    use serde_json::json;

    fn message() -> Vec<u8> {
        build_message(&[0x11; 32], &[11, 0, 0, 0], &[0x22; 32])
    }

    fn sig() -> [u8; 64] {
        let mut s = [0u8; 64];
        for (i, b) in s.iter_mut().enumerate() {
            *b = i as u8 + 1;
        }
        s
    }

    fn fixed_count_tx(sig: &[u8; 64], msg: &[u8]) -> Vec<u8> {
        let mut tx = 1u64.to_le_bytes().to_vec();
        tx.extend_from_slice(sig);
        tx.extend_from_slice(msg);
        tx
    }

    // -- structured fields ---------------------------------------------------

    #[test]
    fn object_signature_field_wins() {
        let response = WalletResponse::Object {
            signature: Some(sig().to_vec()),
            signed_transaction: Some(SignedTransactionField::Bytes(vec![0; 10])),
        };
        assert_eq!(extract_signature(&response).unwrap(), sig());
    }

    #[test]
    fn wrong_length_signature_falls_back_to_transaction() {
        let tx = assemble_signed_transaction(&sig(), &message()).unwrap();
        let response = WalletResponse::Object {
            signature: Some(vec![9; 63]),
            signed_transaction: Some(SignedTransactionField::Base64(base64_encode(&tx))),
        };
        assert_eq!(extract_signature(&response).unwrap(), sig());
    }

    #[test]
    fn signed_transaction_bytes_field() {
        let tx = fixed_count_tx(&sig(), &message());
        let response = WalletResponse::Object {
            signature: None,
            signed_transaction: Some(SignedTransactionField::Bytes(tx)),
        };
        assert_eq!(extract_signature(&response).unwrap(), sig());
    }

    #[test]
    fn empty_object_is_unextractable() {
        let response = WalletResponse::Object {
            signature: None,
            signed_transaction: None,
        };
        assert!(matches!(
            extract_signature(&response),
            Err(XrsError::UnextractableSignature(_))
        ));
    }

    // -- strings and raw bytes -----------------------------------------------

    #[test]
    fn base64_string_of_transaction() {
        let tx = assemble_signed_transaction(&sig(), &message()).unwrap();
        let response = WalletResponse::Base64(base64_encode(&tx));
        assert_eq!(extract_signature(&response).unwrap(), sig());
    }

    #[test]
    fn base64_string_of_bare_signature_is_unextractable() {
        let response = WalletResponse::Base64(base64_encode(&sig()));
        assert!(extract_signature(&response).is_err());
    }

    #[test]
    fn invalid_base64_is_unextractable() {
        let response = WalletResponse::Base64("%%%".into());
        assert!(matches!(
            extract_signature(&response),
            Err(XrsError::UnextractableSignature(_))
        ));
    }

    #[test]
    fn raw_64_bytes_are_the_signature() {
        let response = WalletResponse::Bytes(sig().to_vec());
        assert_eq!(extract_signature(&response).unwrap(), sig());
    }

    #[test]
    fn raw_transaction_bytes() {
        let tx = assemble_signed_transaction(&sig(), &message()).unwrap();
        assert_eq!(extract_signature(&WalletResponse::Bytes(tx)).unwrap(), sig());
    }

    #[test]
    fn short_raw_bytes_fail() {
        let err = extract_signature(&WalletResponse::Bytes(vec![1; 40])).unwrap_err();
        assert!(err.to_string().contains("40 bytes"));
    }

    // -- framing detectors ---------------------------------------------------

    #[test]
    fn fixed_count_takes_priority() {
        // Also a valid compact frame (count 1), which would read bytes 1..65.
        let tx = fixed_count_tx(&sig(), &message());
        let extracted = signature_from_transaction(&tx).unwrap();
        assert_eq!(extracted, sig());
        assert_ne!(&extracted[..], &tx[1..65]);
    }

    #[test]
    fn short_fixed_count_frame_falls_back_to_compact() {
        // 1 + 7 zeros + 60 bytes: too short for fixed-count, compact reads 1..65.
        let mut tx = vec![1u8, 0, 0, 0, 0, 0, 0, 0];
        tx.extend_from_slice(&[7u8; 60]);
        let extracted = signature_from_transaction(&tx).unwrap();
        assert_eq!(&extracted[..], &tx[1..65]);
    }

    #[test]
    fn two_byte_compact_count() {
        let mut tx = vec![0x80, 0x01];
        tx.extend_from_slice(&sig());
        assert_eq!(signature_from_transaction(&tx).unwrap(), sig());
    }

    #[test]
    fn zero_count_is_rejected() {
        let mut tx = vec![0x00];
        tx.extend_from_slice(&sig());
        assert!(signature_from_transaction(&tx).is_err());
    }

    #[test]
    fn empty_transaction_is_rejected() {
        assert!(signature_from_transaction(&[]).is_err());
    }

    // -- JSON shapes ---------------------------------------------------------

    #[test]
    fn json_string_is_base64() {
        let parsed = WalletResponse::from_json(&json!("AQID")).unwrap();
        assert_eq!(parsed, WalletResponse::Base64("AQID".into()));
    }

    #[test]
    fn json_array_is_bytes() {
        let parsed = WalletResponse::from_json(&json!([1, 2, 255])).unwrap();
        assert_eq!(parsed, WalletResponse::Bytes(vec![1, 2, 255]));
    }

    #[test]
    fn json_array_with_non_bytes_fails() {
        assert!(WalletResponse::from_json(&json!([1, 256])).is_err());
        assert!(WalletResponse::from_json(&json!(["a"])).is_err());
    }

    #[test]
    fn json_typed_array_object_is_bytes() {
        let parsed = WalletResponse::from_json(&json!({"0": 5, "1": 6, "2": 7})).unwrap();
        assert_eq!(parsed, WalletResponse::Bytes(vec![5, 6, 7]));
    }

    #[test]
    fn json_typed_array_with_gap_is_not_bytes() {
        let parsed = WalletResponse::from_json(&json!({"0": 5, "2": 7})).unwrap();
        assert!(matches!(parsed, WalletResponse::Object { .. }));
    }

    #[test]
    fn json_object_fields() {
        let value = json!({
            "signature": sig().to_vec(),
            "signedTransaction": "AAAA",
        });
        let parsed = WalletResponse::from_json(&value).unwrap();
        assert_eq!(
            parsed,
            WalletResponse::Object {
                signature: Some(sig().to_vec()),
                signed_transaction: Some(SignedTransactionField::Base64("AAAA".into())),
            }
        );
    }

    #[test]
    fn json_signature_as_typed_array_object() {
        let mut map = serde_json::Map::new();
        for (i, b) in sig().iter().enumerate() {
            map.insert(i.to_string(), json!(b));
        }
        let value = json!({ "signature": Value::Object(map) });
        let parsed = WalletResponse::from_json(&value).unwrap();
        assert_eq!(extract_signature(&parsed).unwrap(), sig());
    }

    #[test]
    fn json_null_fails() {
        assert!(WalletResponse::from_json(&Value::Null).is_err());
        assert!(WalletResponse::from_json(&json!(42)).is_err());
    }

    proptest! {
        #[test]
        fn compact_framed_signature_survives(
            sig in proptest::collection::vec(any::<u8>(), 64),
            data in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            // Seven leading zero bytes would read as a fixed-count frame.
            prop_assume!(sig[..7].iter().any(|b| *b != 0));
            let msg = build_message(&[3u8; 32], &data, &[4u8; 32]);
            let tx = assemble_signed_transaction(&sig, &msg).unwrap();
            let extracted = extract_signature(&WalletResponse::Bytes(tx)).unwrap();
            prop_assert_eq!(&extracted[..], &sig[..]);
        }
    }
}
