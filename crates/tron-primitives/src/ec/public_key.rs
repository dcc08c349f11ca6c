//! secp256k1 public key.
//!
//! Supports SEC1 compressed/uncompressed serialization. TRON addresses and
//! non-hardened BIP-32 steps both consume the 65-byte uncompressed form
//! `0x04 || X || Y`.

use k256::ecdsa::VerifyingKey;
use std::fmt;

use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
pub const UNCOMPRESSED_LEN: usize = 65;

/// Width of a single affine coordinate in bytes.
const COORDINATE_LEN: usize = 32;

/// SEC1 tag byte of an uncompressed point.
const UNCOMPRESSED_TAG: u8 = 0x04;

/// A secp256k1 public key.
#[derive(Clone, Debug)]
pub struct PublicKey {
    /// The underlying k256 verifying key.
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a PublicKey from raw SEC1 encoded bytes.
    ///
    /// Accepts both compressed (33-byte) and uncompressed (65-byte) formats.
    ///
    /// # Arguments
    /// * `bytes` - SEC1-encoded public key bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the bytes don't represent a valid point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "pubkey bytes are empty".to_string(),
            ));
        }
        let vk = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey { inner: vk })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Create a PublicKey from big-endian affine coordinates of any length
    /// up to 32 bytes each.
    ///
    /// Coordinates are left-padded with zeros before the point is checked
    /// against the curve.
    pub fn from_coordinates(x: &[u8], y: &[u8]) -> Result<Self, PrimitivesError> {
        Self::from_bytes(&uncompressed_point(x, y)?)
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the public key in uncompressed SEC1 format (65 bytes).
    ///
    /// The first byte is 0x04, followed by the 32-byte X and 32-byte Y
    /// coordinates, each zero-padded on the left.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the public key as a lowercase hexadecimal string (compressed format).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Construct a PublicKey from a k256 `VerifyingKey`.
    pub(crate) fn from_k256_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey { inner: *vk }
    }
}

/// Build the 65-byte uncompressed encoding `0x04 || X || Y` from big-endian
/// coordinates.
///
/// A coordinate shorter than 32 bytes is left-padded with zero bytes, so the
/// value 5 encodes as 31 zero bytes followed by `0x05`. Longer coordinates
/// are rejected. No curve check is performed.
pub fn uncompressed_point(x: &[u8], y: &[u8]) -> Result<[u8; UNCOMPRESSED_LEN], PrimitivesError> {
    let mut out = [0u8; UNCOMPRESSED_LEN];
    out[0] = UNCOMPRESSED_TAG;
    for (coordinate, offset) in [(x, 1), (y, 1 + COORDINATE_LEN)] {
        if coordinate.len() > COORDINATE_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: COORDINATE_LEN,
                got: coordinate.len(),
            });
        }
        let start = offset + COORDINATE_LEN - coordinate.len();
        out[start..offset + COORDINATE_LEN].copy_from_slice(coordinate);
    }
    Ok(out)
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
