/// TRON SDK - Account address encoding and validation.
///
/// Turns a secp256k1 public key into the Base58Check `T...` address form
/// and parses/validates address strings and their hex form.

pub mod address;

mod error;
pub use error::AddressError;
pub use address::Address;
