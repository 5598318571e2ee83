//! Xeris address handling and text codecs.
//!
//! A Xeris address is the Base58 encoding of a 32-byte Ed25519 public key,
//! using the Bitcoin alphabet. Leading `'1'` characters stand for leading zero
//! bytes, so short decodings are left-padded back to 32 bytes.
//!
//! Signed transactions travel to the node as standard (padded, non URL-safe)
//! Base64.

use std::fmt;
use std::str::FromStr;

use base64::{prelude::BASE64_STANDARD, Engine};

use crate::error::XrsError;

/// The Base58 alphabet (Bitcoin ordering, no `0`, `O`, `I`, `l`).
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Public keys are always 32 bytes on the wire.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Decode a Base58 string into its big-endian byte sequence.
///
/// Each leading `'1'` yields a leading zero byte. Any character outside
/// [`BASE58_ALPHABET`] fails with [`XrsError::InvalidCharacter`].
pub fn base58_decode(input: &str) -> Result<Vec<u8>, XrsError> {
    bs58::decode(input).into_vec().map_err(|e| match e {
        bs58::decode::Error::InvalidCharacter { character, index } => {
            XrsError::InvalidCharacter(format!("{character:?} at index {index}"))
        }
        bs58::decode::Error::NonAsciiCharacter { index } => {
            XrsError::InvalidCharacter(format!("non-ascii character at index {index}"))
        }
        other => XrsError::InvalidCharacter(other.to_string()),
    })
}

/// Encode bytes as Base58, one leading `'1'` per leading zero byte.
pub fn base58_encode(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

pub fn base64_encode(bytes: &[u8]) -> String {
    BASE64_STANDARD.encode(bytes)
}

pub fn base64_decode(input: &str) -> Result<Vec<u8>, XrsError> {
    BASE64_STANDARD
        .decode(input)
        .map_err(|e| XrsError::InvalidBase64(e.to_string()))
}

/// Decode an address string into a fixed 32-byte public key.
///
/// Decodings shorter than 32 bytes are left-padded with zeros. Decodings
/// longer than 32 bytes are rejected rather than truncated.
pub fn normalize_public_key(address: &str) -> Result<[u8; PUBLIC_KEY_LEN], XrsError> {
    let decoded = base58_decode(address)?;
    if decoded.len() > PUBLIC_KEY_LEN {
        return Err(XrsError::InvalidPublicKeyLength(decoded.len()));
    }

    let mut key = [0u8; PUBLIC_KEY_LEN];
    key[PUBLIC_KEY_LEN - decoded.len()..].copy_from_slice(&decoded);
    Ok(key)
}

/// A 32-byte Xeris public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; PUBLIC_KEY_LEN]);

impl Address {
    pub const fn new(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    pub fn to_base58(&self) -> String {
        base58_encode(&self.0)
    }
}

impl From<[u8; PUBLIC_KEY_LEN]> for Address {
    fn from(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Address {
    type Err = XrsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_public_key(s).map(Self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}
