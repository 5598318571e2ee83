//! Xeris message and transaction envelope wire format.
//!
//! Every message built here has one signer (the payer) and one read-only
//! placeholder program account, and carries exactly one instruction that
//! references only the payer. This is a structural constraint of the format
//! the casino submits, not a general-purpose message compiler.
//!
//! ```text
//! Transaction:
//!   num_signatures          compact (always 1)
//!   signature               64 bytes (zeros while unsigned)
//!   message:
//!     num_required_sigs     u8  = 1
//!     num_readonly_signed   u8  = 0
//!     num_readonly_unsigned u8  = 1
//!     num_accounts          compact = 2
//!     payer                 32 bytes
//!     program_id            32 zero bytes
//!     recent_blockhash      32 bytes
//!     num_instructions      compact = 1
//!     program_id_index      u8  = 1
//!     num_account_indices   compact = 1
//!     account_indices       [0]
//!     data_len              compact
//!     data                  opcode-tagged instruction payload
//! ```

use crate::address::PUBLIC_KEY_LEN;
use crate::encoding::{decode_compact_length, encode_compact_length};
use crate::error::XrsError;

pub const SIGNATURE_LEN: usize = 64;
pub const BLOCKHASH_LEN: usize = 32;

/// Placeholder program account: 32 zero bytes.
pub const PROGRAM_ID: [u8; PUBLIC_KEY_LEN] = [0u8; PUBLIC_KEY_LEN];

/// Index of [`PROGRAM_ID`] in the account list.
const PROGRAM_ID_INDEX: u8 = 1;

/// Index of the payer in the account list.
const PAYER_INDEX: u8 = 0;

/// The three header counts that open every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub num_required_signatures: u8,
    pub num_readonly_signed: u8,
    pub num_readonly_unsigned: u8,
}

impl MessageHeader {
    /// One writable signer, one read-only non-signer.
    pub const SINGLE_PAYER: MessageHeader = MessageHeader {
        num_required_signatures: 1,
        num_readonly_signed: 0,
        num_readonly_unsigned: 1,
    };

    fn to_bytes(self) -> [u8; 3] {
        [
            self.num_required_signatures,
            self.num_readonly_signed,
            self.num_readonly_unsigned,
        ]
    }
}

/// A message decoded back into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    pub header: MessageHeader,
    pub account_keys: Vec<[u8; PUBLIC_KEY_LEN]>,
    pub recent_blockhash: [u8; BLOCKHASH_LEN],
    pub program_id_index: u8,
    pub account_indices: Vec<u8>,
    pub data: Vec<u8>,
}

impl ParsedMessage {
    /// The fee payer: always the first account key.
    pub fn payer(&self) -> Option<&[u8; PUBLIC_KEY_LEN]> {
        self.account_keys.first()
    }
}

/// Assemble the message bytes that the payer signs.
pub fn build_message(
    payer: &[u8; PUBLIC_KEY_LEN],
    instruction_data: &[u8],
    recent_blockhash: &[u8; BLOCKHASH_LEN],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(3 + 1 + 3 * 32 + 6 + instruction_data.len());

    buf.extend_from_slice(&MessageHeader::SINGLE_PAYER.to_bytes());

    // Account keys: payer, program placeholder.
    buf.extend_from_slice(&encode_compact_length(2));
    buf.extend_from_slice(payer);
    buf.extend_from_slice(&PROGRAM_ID);

    buf.extend_from_slice(recent_blockhash);

    // Single instruction touching only the payer.
    buf.extend_from_slice(&encode_compact_length(1));
    buf.push(PROGRAM_ID_INDEX);
    buf.extend_from_slice(&encode_compact_length(1));
    buf.push(PAYER_INDEX);
    buf.extend_from_slice(&encode_compact_length(instruction_data.len() as u64));
    buf.extend_from_slice(instruction_data);

    buf
}

/// Wrap a message with one zero-filled signature slot, ready for a signer.
pub fn build_unsigned_transaction(message: &[u8]) -> Vec<u8> {
    wrap(&[0u8; SIGNATURE_LEN], message)
}

/// Wrap a message with its 64-byte signature.
pub fn assemble_signed_transaction(signature: &[u8], message: &[u8]) -> Result<Vec<u8>, XrsError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(XrsError::InvalidSignatureLength(signature.len()));
    }
    Ok(wrap(signature, message))
}

fn wrap(signature: &[u8], message: &[u8]) -> Vec<u8> {
    let mut wire = Vec::with_capacity(1 + SIGNATURE_LEN + message.len());
    wire.extend_from_slice(&encode_compact_length(1));
    wire.extend_from_slice(signature);
    wire.extend_from_slice(message);
    wire
}

/// Split a transaction into its signature slots and message bytes.
pub fn split_transaction(tx: &[u8]) -> Result<(Vec<[u8; SIGNATURE_LEN]>, &[u8]), XrsError> {
    let (num_sigs, prefix) = decode_compact_length(tx)?;
    let sigs_len = usize::try_from(num_sigs)
        .ok()
        .and_then(|n| n.checked_mul(SIGNATURE_LEN))
        .ok_or_else(|| XrsError::SerializationError("signature count too large".into()))?;
    let body = &tx[prefix..];
    if body.len() < sigs_len {
        return Err(XrsError::SerializationError(
            "transaction too short: signature slots exceed length".into(),
        ));
    }

    let (sig_bytes, message) = body.split_at(sigs_len);
    let signatures = sig_bytes
        .chunks_exact(SIGNATURE_LEN)
        .map(|chunk| {
            let mut sig = [0u8; SIGNATURE_LEN];
            sig.copy_from_slice(chunk);
            sig
        })
        .collect();

    Ok((signatures, message))
}

/// Decode a single-instruction message built by [`build_message`] or a
/// compatible producer.
pub fn parse_message(message: &[u8]) -> Result<ParsedMessage, XrsError> {
    let mut cursor = Cursor::new(message);

    let header_bytes = cursor.take(3)?;
    let header = MessageHeader {
        num_required_signatures: header_bytes[0],
        num_readonly_signed: header_bytes[1],
        num_readonly_unsigned: header_bytes[2],
    };

    let num_accounts = cursor.compact()?;
    let mut account_keys = Vec::new();
    for _ in 0..num_accounts {
        account_keys.push(cursor.array::<PUBLIC_KEY_LEN>()?);
    }

    let recent_blockhash = cursor.array::<BLOCKHASH_LEN>()?;

    let num_instructions = cursor.compact()?;
    if num_instructions != 1 {
        return Err(XrsError::SerializationError(format!(
            "expected exactly 1 instruction, found {num_instructions}"
        )));
    }

    let program_id_index = cursor.take(1)?[0];
    let num_indices = cursor.compact()?;
    let account_indices = cursor.take(num_indices)?.to_vec();
    let data_len = cursor.compact()?;
    let data = cursor.take(data_len)?.to_vec();

    if !cursor.is_empty() {
        return Err(XrsError::SerializationError(
            "trailing bytes after instruction data".into(),
        ));
    }

    Ok(ParsedMessage {
        header,
        account_keys,
        recent_blockhash,
        program_id_index,
        account_indices,
        data,
    })
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take<L: TryInto<usize>>(&mut self, len: L) -> Result<&'a [u8], XrsError> {
        let len = len
            .try_into()
            .map_err(|_| XrsError::SerializationError("length does not fit in memory".into()))?;
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| XrsError::SerializationError("message truncated".into()))?;
        let out = &self.data[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], XrsError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn compact(&mut self) -> Result<u64, XrsError> {
        let (value, consumed) = decode_compact_length(&self.data[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::encode_native_transfer;

    fn sample_message() -> (Vec<u8>, [u8; 32], Vec<u8>, [u8; 32]) {
        let payer = [0x11u8; 32];
        let data = encode_native_transfer("from", "to", 1_000);
        let blockhash = [0xBBu8; 32];
        (build_message(&payer, &data, &blockhash), payer, data, blockhash)
    }

    // -- message -------------------------------------------------------------

    #[test]
    fn message_exact_layout() {
        let payer = [1u8; 32];
        let blockhash = [2u8; 32];
        let msg = build_message(&payer, &[0xAA, 0xBB], &blockhash);

        let mut expected = vec![1, 0, 1, 2];
        expected.extend_from_slice(&payer);
        expected.extend_from_slice(&[0u8; 32]);
        expected.extend_from_slice(&blockhash);
        expected.extend_from_slice(&[1, 1, 1, 0, 2, 0xAA, 0xBB]);
        assert_eq!(msg, expected);
        assert_eq!(msg.len(), 107);
    }

    #[test]
    fn message_long_data_uses_two_byte_length() {
        let data = vec![7u8; 200];
        let msg = build_message(&[1u8; 32], &data, &[2u8; 32]);
        // data_len compact(200) = [0xc8, 0x01] sits just before the data.
        let len_off = msg.len() - 200 - 2;
        assert_eq!(&msg[len_off..len_off + 2], &[0xc8, 0x01]);
    }

    #[test]
    fn parse_message_roundtrip() {
        let (msg, payer, data, blockhash) = sample_message();
        let parsed = parse_message(&msg).unwrap();

        assert_eq!(parsed.header, MessageHeader::SINGLE_PAYER);
        assert_eq!(parsed.account_keys, vec![payer, PROGRAM_ID]);
        assert_eq!(parsed.payer(), Some(&payer));
        assert_eq!(parsed.recent_blockhash, blockhash);
        assert_eq!(parsed.program_id_index, 1);
        assert_eq!(parsed.account_indices, vec![0]);
        assert_eq!(parsed.data, data);
    }

    #[test]
    fn parse_message_truncated_fails() {
        let (msg, ..) = sample_message();
        for cut in [0, 2, 10, 70, 100, msg.len() - 1] {
            assert!(parse_message(&msg[..cut]).is_err(), "cut at {cut}");
        }
    }

    #[test]
    fn parse_message_trailing_bytes_fail() {
        let (mut msg, ..) = sample_message();
        msg.push(0);
        assert!(parse_message(&msg).is_err());
    }

    // -- envelopes -----------------------------------------------------------

    #[test]
    fn unsigned_transaction_has_zero_slot() {
        let (msg, ..) = sample_message();
        let tx = build_unsigned_transaction(&msg);
        assert_eq!(tx[0], 0x01);
        assert!(tx[1..65].iter().all(|b| *b == 0));
        assert_eq!(&tx[65..], &msg[..]);
    }

    #[test]
    fn signed_transaction_layout() {
        let (msg, ..) = sample_message();
        let sig = [0x5Au8; 64];
        let tx = assemble_signed_transaction(&sig, &msg).unwrap();
        assert_eq!(tx[0], 0x01);
        assert_eq!(&tx[1..65], &sig);
        assert_eq!(&tx[65..], &msg[..]);
    }

    #[test]
    fn signed_transaction_rejects_bad_lengths() {
        let (msg, ..) = sample_message();
        for len in [0usize, 63, 65, 128] {
            let err = assemble_signed_transaction(&vec![1u8; len], &msg).unwrap_err();
            assert!(matches!(err, XrsError::InvalidSignatureLength(n) if n == len));
        }
    }

    #[test]
    fn split_transaction_recovers_parts() {
        let (msg, ..) = sample_message();
        let sig = [0x33u8; 64];
        let tx = assemble_signed_transaction(&sig, &msg).unwrap();
        let (sigs, message) = split_transaction(&tx).unwrap();
        assert_eq!(sigs, vec![sig]);
        assert_eq!(message, &msg[..]);
    }

    #[test]
    fn split_transaction_short_input_fails() {
        assert!(split_transaction(&[]).is_err());
        assert!(split_transaction(&[0x01, 0x00]).is_err());
    }
}
