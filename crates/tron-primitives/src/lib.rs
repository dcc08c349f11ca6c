/// TRON SDK - Cryptographic primitives, hashing, and utilities.
///
/// This crate provides the foundational building blocks for the TRON SDK:
/// - Hash functions (SHA-256, SHA-256d, SHA-512, HMAC-SHA512, Keccak-256)
/// - Base58 and Base58Check encoding/decoding
/// - secp256k1 private/public keys with the scalar operations HD derivation needs
/// - BIP-39 mnemonic generation, validation and seed derivation

pub mod hash;
pub mod base58;
pub mod ec;
pub mod bip39;

mod error;
pub use error::PrimitivesError;
