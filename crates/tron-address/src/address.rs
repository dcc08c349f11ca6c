/// TRON account address handling.
///
/// An address is derived from the uncompressed public key: Keccak-256 of the
/// 64 coordinate bytes, last 20 bytes kept, version byte 0x41 prepended, and
/// the 21-byte payload Base58Check-encoded into 25 bytes on the wire.

use std::fmt;
use std::str::FromStr;

use tron_primitives::base58;
use tron_primitives::ec::{PrivateKey, PublicKey};
use tron_primitives::ec::public_key::UNCOMPRESSED_LEN;
use tron_primitives::hash::keccak256;

use crate::AddressError;

/// TRON mainnet address version byte (Base58 strings start with 'T').
pub const ADDRESS_VERSION: u8 = 0x41;
/// Length of the account hash carried in an address.
pub const HASH_LEN: usize = 20;
/// Length of version byte + account hash.
pub const PAYLOAD_LEN: usize = 1 + HASH_LEN;
/// Length of a decoded Base58Check address (payload + checksum).
pub const ADDRESS_LEN: usize = PAYLOAD_LEN + base58::CHECKSUM_LEN;

/// A TRON account address.
///
/// Holds the 20-byte Keccak-256 tail of the public key and its
/// Base58Check string form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    /// The human-readable Base58Check address string.
    pub address_string: String,
    /// The last 20 bytes of Keccak-256(X || Y).
    pub hash: [u8; HASH_LEN],
}

impl Address {
    /// Create an address from a public key.
    pub fn from_public_key(pub_key: &PublicKey) -> Self {
        Self::from_uncompressed(&pub_key.to_uncompressed())
    }

    /// Create the address of a private key's public key.
    pub fn from_private_key(priv_key: &PrivateKey) -> Self {
        Self::from_public_key(&priv_key.pub_key())
    }

    /// Create an address from a 65-byte uncompressed public key.
    ///
    /// The leading 0x04 tag is skipped; only `X || Y` is hashed. The bytes
    /// are not checked against the curve.
    ///
    /// # Arguments
    /// * `pub_key` - `0x04 || X(32) || Y(32)`.
    ///
    /// # Returns
    /// The encoded `Address`.
    pub fn from_uncompressed(pub_key: &[u8; UNCOMPRESSED_LEN]) -> Self {
        let digest = keccak256(&pub_key[1..]);
        let mut hash = [0u8; HASH_LEN];
        hash.copy_from_slice(&digest[digest.len() - HASH_LEN..]);
        Self::from_public_key_hash(&hash)
    }

    /// Create an address from a 20-byte account hash.
    ///
    /// # Arguments
    /// * `hash` - The last 20 bytes of the public key's Keccak-256 digest.
    ///
    /// # Returns
    /// A new `Address` with the encoded Base58Check string.
    pub fn from_public_key_hash(hash: &[u8; HASH_LEN]) -> Self {
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[0] = ADDRESS_VERSION;
        payload[1..].copy_from_slice(hash);

        Address {
            address_string: base58::check_encode(&payload),
            hash: *hash,
        }
    }

    /// Parse a Base58Check-encoded address string.
    ///
    /// Decodes the string, requires exactly 25 bytes, verifies the
    /// double-SHA-256 checksum and the 0x41 version byte.
    ///
    /// # Arguments
    /// * `addr` - The Base58Check address string.
    ///
    /// # Returns
    /// An `Address` or an error if the string is invalid.
    pub fn from_string(addr: &str) -> Result<Self, AddressError> {
        let decoded = base58::decode(addr)
            .map_err(|_| AddressError::InvalidAddress(format!("bad char for '{}'", addr)))?;

        if decoded.len() != ADDRESS_LEN {
            return Err(AddressError::InvalidAddressLength(addr.to_string()));
        }

        let (payload, checksum) = decoded.split_at(PAYLOAD_LEN);
        if checksum != base58::checksum(payload) {
            return Err(AddressError::ChecksumMismatch);
        }
        if payload[0] != ADDRESS_VERSION {
            return Err(AddressError::UnsupportedVersion(payload[0]));
        }

        let mut hash = [0u8; HASH_LEN];
        hash.copy_from_slice(&payload[1..]);

        Ok(Address {
            address_string: addr.to_string(),
            hash,
        })
    }

    /// Parse the 21-byte hex form (`41` followed by the 40-hex-char hash).
    pub fn from_hex(hex_str: &str) -> Result<Self, AddressError> {
        let bytes = hex::decode(hex_str)?;
        if bytes.len() != PAYLOAD_LEN {
            return Err(AddressError::InvalidAddressLength(hex_str.to_string()));
        }
        if bytes[0] != ADDRESS_VERSION {
            return Err(AddressError::UnsupportedVersion(bytes[0]));
        }
        let mut hash = [0u8; HASH_LEN];
        hash.copy_from_slice(&bytes[1..]);
        Ok(Self::from_public_key_hash(&hash))
    }

    /// The 21-byte payload: version byte followed by the account hash.
    pub fn to_payload(&self) -> [u8; PAYLOAD_LEN] {
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[0] = ADDRESS_VERSION;
        payload[1..].copy_from_slice(&self.hash);
        payload
    }

    /// Lowercase hex of the 21-byte payload, as used by TRON node APIs.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_payload())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl fmt::Display for Address {
    /// Display the address as its Base58Check string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}
