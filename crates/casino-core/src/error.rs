use chain_xrs::XrsError;
use fair_play::GameError;
use thiserror::Error;

#[derive(Debug, Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum CasinoError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Signature unavailable: {0}")]
    SignatureFailed(String),

    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    #[error("Invalid bet: {0}")]
    InvalidBet(String),

    #[error("Bet not confirmed: {0}")]
    BetNotConfirmed(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

impl From<XrsError> for CasinoError {
    fn from(e: XrsError) -> Self {
        match e {
            XrsError::InvalidCharacter(_) | XrsError::InvalidPublicKeyLength(_) => {
                CasinoError::InvalidAddress(e.to_string())
            }
            XrsError::InvalidBase64(_)
            | XrsError::InvalidSignatureLength(_)
            | XrsError::UnextractableSignature(_)
            | XrsError::SignerUnavailable(_) => CasinoError::SignatureFailed(e.to_string()),
            XrsError::SubmissionFailed(_) | XrsError::TransportError(_) => {
                CasinoError::SubmissionFailed(e.to_string())
            }
            XrsError::BadBlockhashFormat(_)
            | XrsError::ArithmeticOverflow(_)
            | XrsError::SerializationError(_) => CasinoError::EncodingFailed(e.to_string()),
        }
    }
}

impl From<GameError> for CasinoError {
    fn from(e: GameError) -> Self {
        CasinoError::InvalidBet(e.to_string())
    }
}

impl From<serde_json::Error> for CasinoError {
    fn from(e: serde_json::Error) -> Self {
        CasinoError::InvalidJson(e.to_string())
    }
}
