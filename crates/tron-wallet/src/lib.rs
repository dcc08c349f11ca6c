/// TRON SDK - HD wallet and key derivation.
///
/// BIP-32 extended keys, the fixed BIP-44 TRON path `m/44'/195'/0'/0/i`,
/// and a mnemonic-backed wallet that derives keys and addresses on demand.

mod error;
pub use error::WalletError;

pub mod extended_key;
pub mod key_deriver;
pub mod wallet;

pub use extended_key::{ChildNumber, ExtendedKey, HmacSha512, Sha512Hmac};
pub use key_deriver::{DerivationPath, KeyDeriver};
pub use wallet::{
    private_key_to_bytes, private_key_to_hex, Bip39Source, MnemonicLength, MnemonicSource, Wallet,
};
