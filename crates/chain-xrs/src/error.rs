use thiserror::Error;

/// Xeris ledger codec errors.
#[derive(Debug, Error)]
pub enum XrsError {
    #[error("invalid base58 character: {0}")]
    InvalidCharacter(String),

    #[error("public key decodes to {0} bytes, expected at most 32")]
    InvalidPublicKeyLength(usize),

    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    #[error("signature must be 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    #[error("cannot extract signature: {0}")]
    UnextractableSignature(String),

    #[error("bad blockhash format: {0}")]
    BadBlockhashFormat(String),

    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    #[error("signer unavailable: {0}")]
    SignerUnavailable(String),

    #[error("transport error: {0}")]
    TransportError(String),
}
