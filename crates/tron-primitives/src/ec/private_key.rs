//! secp256k1 private key.
//!
//! Wraps a k256 signing key and adds the scalar operations HD derivation
//! needs: strict decoding from 32 big-endian bytes, modular addition of a
//! tweak, and the fixed-width export forms.

use k256::ecdsa::SigningKey;
use k256::elliptic_curve::zeroize::ZeroizeOnDrop;
use k256::{FieldBytes, NonZeroScalar, Scalar};

use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
pub const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// A secp256k1 private key.
///
/// The wrapped scalar is always in `[1, n)`; construction rejects anything
/// else rather than reducing it. The scalar is wiped when the wrapped
/// signing key is dropped.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    /// The underlying k256 signing key.
    inner: SigningKey,
}

impl PrivateKey {
    /// Create a private key from a raw 32-byte big-endian scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte slice representing the private key scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid scalar on secp256k1,
    /// or an error if the length is wrong or the scalar is zero or not below
    /// the curve order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: PRIVATE_KEY_BYTES_LEN,
                got: bytes.len(),
            });
        }
        let signing_key = SigningKey::from_bytes(FieldBytes::from_slice(bytes))
            .map_err(|_| {
                PrimitivesError::InvalidPrivateKey(
                    "scalar is zero or not below the curve order".to_string(),
                )
            })?;
        Ok(PrivateKey { inner: signing_key })
    }

    /// Create a private key from a hexadecimal string.
    ///
    /// # Arguments
    /// * `hex_str` - A 64-character hex string representing the 32-byte scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error if the hex or the scalar is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the private key as a 32-byte big-endian array.
    ///
    /// Small scalars come out left-padded with zero bytes, so the result
    /// is always exactly 32 bytes.
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_BYTES_LEN] {
        let mut out = [0u8; PRIVATE_KEY_BYTES_LEN];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Serialize the private key as a lowercase hexadecimal string.
    ///
    /// # Returns
    /// A 64-character hex string representing the 32-byte scalar.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the corresponding public key for this private key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_k256_verifying_key(self.inner.verifying_key())
    }

    /// Add a 32-byte big-endian tweak to this key modulo the curve order.
    ///
    /// The tweak must itself be a valid non-zero scalar, and the sum must not
    /// be zero; both cases are reported as [`PrimitivesError::InvalidScalar`]
    /// instead of being reduced or retried.
    ///
    /// # Arguments
    /// * `tweak` - The 32-byte scalar to add.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` holding `(self + tweak) mod n`.
    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Result<PrivateKey, PrimitivesError> {
        let tweak = decode_scalar(tweak)?;
        let sum: Scalar = self.to_scalar() + *tweak.as_ref();
        let sum = Option::<NonZeroScalar>::from(NonZeroScalar::new(sum)).ok_or_else(|| {
            PrimitivesError::InvalidScalar("sum of key and tweak is zero".to_string())
        })?;
        Ok(PrivateKey {
            inner: SigningKey::from(sum),
        })
    }

    /// Convert the private key to a k256 `Scalar` for arithmetic operations.
    pub(crate) fn to_scalar(&self) -> Scalar {
        *self.inner.as_nonzero_scalar().as_ref()
    }
}

impl ZeroizeOnDrop for PrivateKey {}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

/// Decode 32 big-endian bytes as a scalar in `[1, n)`.
fn decode_scalar(bytes: &[u8; 32]) -> Result<NonZeroScalar, PrimitivesError> {
    let repr = *FieldBytes::from_slice(bytes);
    Option::<NonZeroScalar>::from(NonZeroScalar::from_repr(repr)).ok_or_else(|| {
        PrimitivesError::InvalidScalar("value is zero or not below the curve order".to_string())
    })
}
