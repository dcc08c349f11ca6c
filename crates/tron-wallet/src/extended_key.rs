//! BIP-32 extended private keys.
//!
//! An [`ExtendedKey`] is one node of the HD tree: a 32-byte private scalar
//! and a 32-byte chain code. Children are derived with HMAC-SHA512 keyed by
//! the parent chain code. The hash is reached through the [`HmacSha512`]
//! trait so callers (and tests) can substitute their own implementation.
//!
//! Non-hardened steps feed the 65-byte uncompressed public key into the
//! HMAC, not the 33-byte compressed form of stock BIP-32. Keys derived here
//! therefore match TRON wallets built on that layout and differ from
//! generic BIP-32 tooling below the first non-hardened level.

use std::fmt;

use tron_primitives::ec::private_key::PRIVATE_KEY_BYTES_LEN;
use tron_primitives::ec::public_key::UNCOMPRESSED_LEN;
use tron_primitives::ec::PrivateKey;
use tron_primitives::hash::sha512_hmac;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::WalletError;

/// HMAC key for master key generation.
pub const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Offset added to hardened child indices.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Length of a chain code in bytes.
pub const CHAIN_CODE_LEN: usize = 32;

/// HMAC-SHA512 capability used by master and child derivation.
pub trait HmacSha512 {
    /// Return HMAC-SHA512(key, data).
    fn hmac_sha512(&self, key: &[u8], data: &[u8]) -> [u8; 64];
}

/// The standard HMAC-SHA512 from `tron_primitives::hash`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sha512Hmac;

impl HmacSha512 for Sha512Hmac {
    fn hmac_sha512(&self, key: &[u8], data: &[u8]) -> [u8; 64] {
        sha512_hmac(key, data)
    }
}

impl<H: HmacSha512 + ?Sized> HmacSha512 for &H {
    fn hmac_sha512(&self, key: &[u8], data: &[u8]) -> [u8; 64] {
        (**self).hmac_sha512(key, data)
    }
}

/// Position of a child below its parent.
///
/// `Hardened(i)` is written as `i'` and hashes the parent private key;
/// `Normal(i)` hashes the parent public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChildNumber {
    /// Hardened child; the index must be below 2^31.
    Hardened(u32),
    /// Non-hardened child; any index is used as-is.
    Normal(u32),
}

impl ChildNumber {
    /// The index as written in a path, without the hardened offset.
    pub fn index(&self) -> u32 {
        match *self {
            ChildNumber::Hardened(i) | ChildNumber::Normal(i) => i,
        }
    }

    /// Returns `true` for hardened children.
    pub fn is_hardened(&self) -> bool {
        matches!(self, ChildNumber::Hardened(_))
    }

    /// The 32-bit value serialized into the HMAC data.
    ///
    /// Hardened indices get [`HARDENED_OFFSET`] added; an index that is
    /// already at or above the offset is rejected instead of wrapping.
    pub fn to_raw(&self) -> Result<u32, WalletError> {
        match *self {
            ChildNumber::Hardened(i) if i < HARDENED_OFFSET => Ok(i + HARDENED_OFFSET),
            ChildNumber::Hardened(i) => Err(WalletError::InvalidChildNumber(i)),
            ChildNumber::Normal(i) => Ok(i),
        }
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildNumber::Hardened(i) => write!(f, "{}'", i),
            ChildNumber::Normal(i) => write!(f, "{}", i),
        }
    }
}

/// A node of the HD tree: private key bytes and chain code.
///
/// The key bytes are not guaranteed to be a valid scalar; that is checked
/// whenever the node is used, so an invalid node fails its derivation
/// instead of being reduced. Both fields are wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ExtendedKey {
    key: [u8; PRIVATE_KEY_BYTES_LEN],
    chain_code: [u8; CHAIN_CODE_LEN],
}

impl ExtendedKey {
    /// Build a node from raw parts.
    pub fn new(key: [u8; PRIVATE_KEY_BYTES_LEN], chain_code: [u8; CHAIN_CODE_LEN]) -> Self {
        ExtendedKey { key, chain_code }
    }

    /// Derive the master node from a seed: `HMAC-SHA512("Bitcoin seed", seed)`,
    /// left half is the key, right half the chain code.
    pub fn master(seed: &[u8]) -> Self {
        Self::master_with(&Sha512Hmac, seed)
    }

    /// [`ExtendedKey::master`] with a caller-supplied HMAC.
    pub fn master_with<H: HmacSha512 + ?Sized>(hasher: &H, seed: &[u8]) -> Self {
        Self::from_hmac_output(hasher.hmac_sha512(MASTER_HMAC_KEY, seed))
    }

    /// Raw 32-byte key material.
    pub fn key(&self) -> &[u8; PRIVATE_KEY_BYTES_LEN] {
        &self.key
    }

    /// The 32-byte chain code.
    pub fn chain_code(&self) -> &[u8; CHAIN_CODE_LEN] {
        &self.chain_code
    }

    /// Decode the key bytes as a secp256k1 private key.
    ///
    /// Fails with [`WalletError::InvalidScalar`] when the bytes are zero or
    /// not below the curve order.
    pub fn private_key(&self) -> Result<PrivateKey, WalletError> {
        PrivateKey::from_bytes(&self.key)
            .map_err(|e| WalletError::InvalidScalar(format!("parent key: {}", e)))
    }

    /// Derive the hardened child `index'`.
    pub fn derive_hardened(&self, index: u32) -> Result<Self, WalletError> {
        self.derive_child(ChildNumber::Hardened(index))
    }

    /// Derive the non-hardened child `index`.
    pub fn derive(&self, index: u32) -> Result<Self, WalletError> {
        self.derive_child(ChildNumber::Normal(index))
    }

    /// Derive a child node with the standard HMAC-SHA512.
    pub fn derive_child(&self, child: ChildNumber) -> Result<Self, WalletError> {
        self.derive_child_with(&Sha512Hmac, child)
    }

    /// Derive a child node.
    ///
    /// HMAC data is `0x00 || key || be32(index + 2^31)` for hardened children
    /// and `uncompressed_pubkey || be32(index)` otherwise. The child key is
    /// `(parent + IL) mod n` and the child chain code is `IR`.
    ///
    /// # Arguments
    /// * `hasher` - HMAC-SHA512 implementation.
    /// * `child` - Which child to derive.
    ///
    /// # Returns
    /// The child node, or [`WalletError::InvalidScalar`] if the parent key,
    /// `IL`, or the resulting sum is not a valid non-zero scalar.
    pub fn derive_child_with<H: HmacSha512 + ?Sized>(
        &self,
        hasher: &H,
        child: ChildNumber,
    ) -> Result<Self, WalletError> {
        let raw_index = child.to_raw()?;
        let parent = self.private_key()?;

        let mut data = Vec::with_capacity(UNCOMPRESSED_LEN + 4);
        match child {
            ChildNumber::Hardened(_) => {
                data.push(0x00);
                data.extend_from_slice(&self.key);
            }
            ChildNumber::Normal(_) => {
                data.extend_from_slice(&parent.pub_key().to_uncompressed());
            }
        }
        data.extend_from_slice(&raw_index.to_be_bytes());

        let output = hasher.hmac_sha512(&self.chain_code, &data);
        data.zeroize();
        let mut node = Self::from_hmac_output(output);

        let child_key = parent
            .tweak_add(&node.key)
            .map_err(|e| WalletError::InvalidScalar(format!("child {}: {}", child, e)))?;
        node.key = child_key.to_bytes();
        Ok(node)
    }

    fn from_hmac_output(mut output: [u8; 64]) -> Self {
        let mut key = [0u8; PRIVATE_KEY_BYTES_LEN];
        let mut chain_code = [0u8; CHAIN_CODE_LEN];
        key.copy_from_slice(&output[..32]);
        chain_code.copy_from_slice(&output[32..]);
        output.zeroize();
        ExtendedKey { key, chain_code }
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("key", &"[REDACTED]")
            .field("chain_code", &hex::encode(self.chain_code))
            .finish()
    }
}
