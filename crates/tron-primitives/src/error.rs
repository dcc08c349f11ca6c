/// Unified error type for all primitives operations.
///
/// Covers errors from EC operations, encoding and mnemonic handling.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid scalar: {0}")]
    InvalidScalar(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("entropy source failed: {0}")]
    Entropy(String),

    #[error("unsupported entropy size: {0} bits")]
    InvalidEntropySize(usize),

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
