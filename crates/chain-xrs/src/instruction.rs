//! Xeris instruction payloads.
//!
//! Every instruction is a little-endian `u32` opcode followed by its fields in
//! a fixed order. Addresses and token identifiers are carried as
//! length-prefixed strings (see [`encode_string`]), amounts as `u64` LE.
//!
//! ```text
//! NativeTransfer (11):  from | to | amount
//! TokenTransfer  (1):   token_id | from | to | amount
//! TokenCreate    (3):   token_id | name | symbol | decimals(u8) | supply | mint_authority
//! TokenMint      (0):   token_id | to | amount
//! ```

use crate::encoding::{encode_string, encode_u32, encode_u64, encode_u8};
use crate::error::XrsError;

pub const NATIVE_TRANSFER_OPCODE: u32 = 11;
pub const TOKEN_TRANSFER_OPCODE: u32 = 1;
pub const TOKEN_CREATE_OPCODE: u32 = 3;
pub const TOKEN_MINT_OPCODE: u32 = 0;

/// Smallest native unit: 1 XRS = 10^9 lamports.
pub const LAMPORTS_PER_XRS: u64 = 1_000_000_000;

/// Largest lamport amount an `f64` holds exactly (2^53 - 1). Wallets and
/// explorers read amounts as JSON numbers, so nothing above this is encoded.
pub const MAX_SAFE_LAMPORTS: u64 = (1 << 53) - 1;

/// A ledger instruction prior to encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    NativeTransfer {
        from: String,
        to: String,
        amount: u64,
    },
    TokenTransfer {
        token_id: String,
        from: String,
        to: String,
        amount: u64,
    },
    TokenCreate {
        token_id: String,
        name: String,
        symbol: String,
        decimals: u8,
        supply: u64,
        mint_authority: String,
    },
    TokenMint {
        token_id: String,
        to: String,
        amount: u64,
    },
}

impl Instruction {
    pub fn opcode(&self) -> u32 {
        match self {
            Instruction::NativeTransfer { .. } => NATIVE_TRANSFER_OPCODE,
            Instruction::TokenTransfer { .. } => TOKEN_TRANSFER_OPCODE,
            Instruction::TokenCreate { .. } => TOKEN_CREATE_OPCODE,
            Instruction::TokenMint { .. } => TOKEN_MINT_OPCODE,
        }
    }

    /// Serialize into the opcode-tagged payload carried by a message.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Instruction::NativeTransfer { from, to, amount } => {
                encode_native_transfer(from, to, *amount)
            }
            Instruction::TokenTransfer {
                token_id,
                from,
                to,
                amount,
            } => encode_token_transfer(token_id, from, to, *amount),
            Instruction::TokenCreate {
                token_id,
                name,
                symbol,
                decimals,
                supply,
                mint_authority,
            } => encode_token_create(token_id, name, symbol, *decimals, *supply, mint_authority),
            Instruction::TokenMint {
                token_id,
                to,
                amount,
            } => encode_token_mint(token_id, to, *amount),
        }
    }
}

pub fn encode_native_transfer(from: &str, to: &str, amount: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + 16 + from.len() + to.len() + 8);
    data.extend_from_slice(&encode_u32(NATIVE_TRANSFER_OPCODE));
    data.extend_from_slice(&encode_string(from));
    data.extend_from_slice(&encode_string(to));
    data.extend_from_slice(&encode_u64(amount));
    data
}

pub fn encode_token_transfer(token_id: &str, from: &str, to: &str, amount: u64) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&encode_u32(TOKEN_TRANSFER_OPCODE));
    data.extend_from_slice(&encode_string(token_id));
    data.extend_from_slice(&encode_string(from));
    data.extend_from_slice(&encode_string(to));
    data.extend_from_slice(&encode_u64(amount));
    data
}

pub fn encode_token_create(
    token_id: &str,
    name: &str,
    symbol: &str,
    decimals: u8,
    supply: u64,
    mint_authority: &str,
) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&encode_u32(TOKEN_CREATE_OPCODE));
    data.extend_from_slice(&encode_string(token_id));
    data.extend_from_slice(&encode_string(name));
    data.extend_from_slice(&encode_string(symbol));
    data.extend_from_slice(&encode_u8(decimals));
    data.extend_from_slice(&encode_u64(supply));
    data.extend_from_slice(&encode_string(mint_authority));
    data
}

pub fn encode_token_mint(token_id: &str, to: &str, amount: u64) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&encode_u32(TOKEN_MINT_OPCODE));
    data.extend_from_slice(&encode_string(token_id));
    data.extend_from_slice(&encode_string(to));
    data.extend_from_slice(&encode_u64(amount));
    data
}

/// Convert a decimal XRS amount to lamports, rounding to the nearest lamport.
///
/// Amounts that are negative, not finite, or whose lamport value exceeds the
/// exact-integer range of an `f64` fail with [`XrsError::ArithmeticOverflow`].
/// Callers holding an exact lamport count should skip this and pass the `u64`
/// straight to the encoders.
pub fn xrs_to_lamports(xrs: f64) -> Result<u64, XrsError> {
    let lamports = (xrs * LAMPORTS_PER_XRS as f64).round();
    if !lamports.is_finite() || lamports < 0.0 || lamports > MAX_SAFE_LAMPORTS as f64 {
        return Err(XrsError::ArithmeticOverflow(format!(
            "{xrs} XRS is not representable in lamports"
        )));
    }
    Ok(lamports as u64)
}

/// Pass `lamports` through if it is within [`MAX_SAFE_LAMPORTS`].
pub fn checked_lamports(lamports: u64) -> Result<u64, XrsError> {
    if lamports > MAX_SAFE_LAMPORTS {
        return Err(XrsError::ArithmeticOverflow(format!(
            "{lamports} lamports exceeds 2^53 - 1"
        )));
    }
    Ok(lamports)
}

/// `floor(lamports * numerator / denominator)` in integer arithmetic.
///
/// Both the input and the result must stay within [`MAX_SAFE_LAMPORTS`].
pub fn scale_lamports(lamports: u64, numerator: u64, denominator: u64) -> Result<u64, XrsError> {
    checked_lamports(lamports)?;
    if denominator == 0 {
        return Err(XrsError::ArithmeticOverflow("zero denominator".into()));
    }
    let product = lamports.checked_mul(numerator).ok_or_else(|| {
        XrsError::ArithmeticOverflow(format!("{lamports} * {numerator} overflows"))
    })?;
    checked_lamports(product / denominator)
}

pub fn lamports_to_xrs(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_XRS as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const FROM: &str = "6G4GroMrVsGjd3xhywxfzXDg7vPn1V2Mky4B3qsXVGHo";
    const TO: &str = "11111111111111111111111111111111";

    fn read_u64(data: &[u8], offset: usize) -> u64 {
        u64::from_le_bytes(data[offset..offset + 8].try_into().unwrap())
    }

    // -- native transfer -----------------------------------------------------

    #[test]
    fn native_transfer_layout() {
        let data = encode_native_transfer(FROM, TO, 1_500_000_000);

        assert_eq!(&data[..4], &[11, 0, 0, 0]);
        assert_eq!(read_u64(&data, 4), FROM.len() as u64);
        let to_off = 12 + FROM.len();
        assert_eq!(&data[12..to_off], FROM.as_bytes());
        assert_eq!(read_u64(&data, to_off), TO.len() as u64);
        let amount_off = to_off + 8 + TO.len();
        assert_eq!(read_u64(&data, amount_off), 1_500_000_000);
        assert_eq!(data.len(), amount_off + 8);
    }

    #[test]
    fn native_transfer_exact_amount_above_2_pow_53() {
        let amount = (1u64 << 53) + 1;
        let data = encode_native_transfer("a", "b", amount);
        assert_eq!(read_u64(&data, data.len() - 8), amount);
    }

    // -- token instructions --------------------------------------------------

    #[test]
    fn token_transfer_layout() {
        let data = encode_token_transfer("GOLD", "a", "bc", 7);
        let mut expected = vec![1, 0, 0, 0];
        expected.extend_from_slice(&[4, 0, 0, 0, 0, 0, 0, 0]);
        expected.extend_from_slice(b"GOLD");
        expected.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0]);
        expected.extend_from_slice(b"a");
        expected.extend_from_slice(&[2, 0, 0, 0, 0, 0, 0, 0]);
        expected.extend_from_slice(b"bc");
        expected.extend_from_slice(&[7, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(data, expected);
    }

    #[test]
    fn token_create_layout() {
        let data = encode_token_create("T", "Tok", "TK", 9, 1000, "auth");
        let mut expected = vec![3, 0, 0, 0];
        expected.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0]);
        expected.extend_from_slice(b"T");
        expected.extend_from_slice(&[3, 0, 0, 0, 0, 0, 0, 0]);
        expected.extend_from_slice(b"Tok");
        expected.extend_from_slice(&[2, 0, 0, 0, 0, 0, 0, 0]);
        expected.extend_from_slice(b"TK");
        expected.push(9);
        expected.extend_from_slice(&1000u64.to_le_bytes());
        expected.extend_from_slice(&[4, 0, 0, 0, 0, 0, 0, 0]);
        expected.extend_from_slice(b"auth");
        assert_eq!(data, expected);
    }

    #[test]
    fn token_mint_layout() {
        let data = encode_token_mint("T", "to", u64::MAX);
        assert_eq!(&data[..4], &[0, 0, 0, 0]);
        assert_eq!(data.len(), 4 + 9 + 10 + 8);
        assert_eq!(&data[data.len() - 8..], &[0xff; 8]);
    }

    // -- enum ----------------------------------------------------------------

    #[test]
    fn enum_opcodes() {
        let ix = Instruction::NativeTransfer {
            from: "a".into(),
            to: "b".into(),
            amount: 1,
        };
        assert_eq!(ix.opcode(), 11);
        let ix = Instruction::TokenMint {
            token_id: "t".into(),
            to: "b".into(),
            amount: 1,
        };
        assert_eq!(ix.opcode(), 0);
    }

    #[test]
    fn enum_encode_matches_free_functions() {
        let ix = Instruction::TokenCreate {
            token_id: "T".into(),
            name: "Tok".into(),
            symbol: "TK".into(),
            decimals: 6,
            supply: 42,
            mint_authority: FROM.into(),
        };
        assert_eq!(ix.encode(), encode_token_create("T", "Tok", "TK", 6, 42, FROM));

        let ix = Instruction::TokenTransfer {
            token_id: "T".into(),
            from: FROM.into(),
            to: TO.into(),
            amount: 5,
        };
        assert_eq!(ix.encode(), encode_token_transfer("T", FROM, TO, 5));
    }

    // -- amounts -------------------------------------------------------------

    #[test]
    fn xrs_to_lamports_rounds() {
        assert_eq!(xrs_to_lamports(1.0).unwrap(), 1_000_000_000);
        assert_eq!(xrs_to_lamports(0.1).unwrap(), 100_000_000);
        assert_eq!(xrs_to_lamports(2.5).unwrap(), 2_500_000_000);
        assert_eq!(xrs_to_lamports(0.0000000004).unwrap(), 0);
    }

    #[test]
    fn xrs_to_lamports_rejects_negative() {
        assert!(matches!(
            xrs_to_lamports(-1.0),
            Err(XrsError::ArithmeticOverflow(_))
        ));
    }

    #[test]
    fn xrs_to_lamports_rejects_non_finite() {
        assert!(xrs_to_lamports(f64::NAN).is_err());
        assert!(xrs_to_lamports(f64::INFINITY).is_err());
    }

    #[test]
    fn xrs_to_lamports_rejects_beyond_exact_range() {
        // 10^7 XRS = 10^16 lamports > 2^53.
        assert!(xrs_to_lamports(10_000_000.0).is_err());
        assert!(xrs_to_lamports(9_000_000.0).is_ok());
    }

    #[test]
    fn checked_lamports_bounds() {
        assert_eq!(checked_lamports(MAX_SAFE_LAMPORTS).unwrap(), MAX_SAFE_LAMPORTS);
        assert!(matches!(
            checked_lamports(MAX_SAFE_LAMPORTS + 1),
            Err(XrsError::ArithmeticOverflow(_))
        ));
    }

    #[test]
    fn scale_lamports_is_exact_and_floors() {
        let stake = (1u64 << 52) - 1;
        assert_eq!(scale_lamports(stake, 2, 1).unwrap(), MAX_SAFE_LAMPORTS - 1);
        assert_eq!(scale_lamports(MAX_SAFE_LAMPORTS, 1, 1).unwrap(), MAX_SAFE_LAMPORTS);
        assert_eq!(scale_lamports(3, 5, 2).unwrap(), 7);
        assert_eq!(scale_lamports(1_000_000_001, 5, 2).unwrap(), 2_500_000_002);
        assert_eq!(scale_lamports(42, 0, 1).unwrap(), 0);
    }

    #[test]
    fn scale_lamports_rejects_out_of_range() {
        assert!(scale_lamports(MAX_SAFE_LAMPORTS + 2, 2, 1).is_err());
        assert!(scale_lamports(1 << 63, 2, 1).is_err());
        assert!(scale_lamports(MAX_SAFE_LAMPORTS, 2, 1).is_err());
        assert!(scale_lamports(1, 1, 0).is_err());
    }

    #[test]
    fn lamports_to_xrs_divides() {
        assert_eq!(lamports_to_xrs(2_500_000_000), 2.5);
    }
}
