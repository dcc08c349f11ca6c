/// Elliptic curve keys on secp256k1.
///
/// Provides the scalar capability HD derivation consumes: strict scalar
/// decoding, modular addition, and scalar-to-public-key with SEC1
/// serialization.

pub mod private_key;
pub mod public_key;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
