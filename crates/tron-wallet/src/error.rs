/// Error types for wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("entropy generation failed: {0}")]
    Entropy(String),
    #[error("mnemonic generation failed: {0}")]
    MnemonicGeneration(String),
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),
    #[error("invalid scalar: {0}")]
    InvalidScalar(String),
    #[error("invalid child number {0}: hardened index must be below 2^31")]
    InvalidChildNumber(u32),
}
