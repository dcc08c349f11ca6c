/// Error types for address operations.
///
/// Covers Base58 decoding failures, length and checksum validation, and
/// version byte mismatches.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    /// The string is not valid Base58.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Decoded payload does not have the 25-byte address length.
    #[error("invalid address length for '{0}'")]
    InvalidAddressLength(String),

    /// Base58Check checksum does not match.
    #[error("checksum failed")]
    ChecksumMismatch,

    /// Version byte is not the TRON mainnet prefix.
    #[error("unsupported address version 0x{0:02x}")]
    UnsupportedVersion(u8),

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] tron_primitives::PrimitivesError),
}
