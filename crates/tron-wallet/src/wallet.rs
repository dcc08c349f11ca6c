//! Mnemonic-backed TRON wallet.
//!
//! A [`Wallet`] owns a BIP-39 phrase and the seed derived from it (empty
//! passphrase). Keys and addresses are recomputed from the seed on every
//! call; nothing derived is cached.

use std::fmt;

use tracing::debug;
use tron_address::Address;
use tron_primitives::bip39::{self, SEED_LEN};
use tron_primitives::ec::private_key::PRIVATE_KEY_BYTES_LEN;
use tron_primitives::ec::PrivateKey;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::WalletError;
use crate::key_deriver::KeyDeriver;

/// Number of words in a newly generated mnemonic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MnemonicLength {
    /// 12 words, 128 bits of entropy.
    #[default]
    Words12,
    /// 24 words, 256 bits of entropy.
    Words24,
}

impl MnemonicLength {
    /// Entropy size in bits.
    pub fn entropy_bits(&self) -> usize {
        match self {
            MnemonicLength::Words12 => 128,
            MnemonicLength::Words24 => 256,
        }
    }

    /// Number of words in the phrase.
    pub fn word_count(&self) -> usize {
        match self {
            MnemonicLength::Words12 => 12,
            MnemonicLength::Words24 => 24,
        }
    }
}

/// Source of entropy and mnemonic phrases for [`Wallet::new_with`].
pub trait MnemonicSource {
    /// Produce `bits / 8` bytes of entropy.
    fn entropy(&self, bits: usize) -> Result<Vec<u8>, WalletError>;

    /// Encode entropy as a mnemonic phrase.
    fn mnemonic(&self, entropy: &[u8]) -> Result<String, WalletError>;
}

/// OS randomness and the English BIP-39 word list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bip39Source;

impl MnemonicSource for Bip39Source {
    fn entropy(&self, bits: usize) -> Result<Vec<u8>, WalletError> {
        bip39::new_entropy(bits).map_err(|e| WalletError::Entropy(e.to_string()))
    }

    fn mnemonic(&self, entropy: &[u8]) -> Result<String, WalletError> {
        bip39::mnemonic_from_entropy(entropy)
            .map_err(|e| WalletError::MnemonicGeneration(e.to_string()))
    }
}

/// An HD wallet holding a mnemonic phrase and its seed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Wallet {
    mnemonic: String,
    seed: [u8; SEED_LEN],
}

impl Wallet {
    /// Generate a wallet with a fresh random mnemonic.
    pub fn new(length: MnemonicLength) -> Result<Self, WalletError> {
        Self::new_with(length, &Bip39Source)
    }

    /// Generate a wallet using a caller-supplied mnemonic source.
    ///
    /// # Arguments
    /// * `length` - 12 or 24 words.
    /// * `source` - Provides entropy and encodes it as a phrase.
    ///
    /// # Returns
    /// The new wallet, or `Entropy` / `MnemonicGeneration` if the source fails.
    pub fn new_with<S: MnemonicSource + ?Sized>(
        length: MnemonicLength,
        source: &S,
    ) -> Result<Self, WalletError> {
        let mut entropy = source.entropy(length.entropy_bits())?;
        let phrase = source.mnemonic(&entropy);
        entropy.zeroize();
        let mnemonic = phrase?;

        let seed = bip39::seed_from_mnemonic(&mnemonic, "")
            .map_err(|e| WalletError::MnemonicGeneration(e.to_string()))?;
        debug!(words = length.word_count(), "generated wallet");
        Ok(Wallet { mnemonic, seed })
    }

    /// Restore a wallet from an existing phrase.
    ///
    /// The phrase is validated against the English word list and its
    /// checksum; the stored phrase is the one supplied. The seed comes from
    /// the parsed words, so extra spaces or a trailing newline restore the
    /// same wallet as the single-spaced phrase.
    pub fn restore(mnemonic: &str) -> Result<Self, WalletError> {
        let seed = bip39::seed_from_mnemonic(mnemonic, "")
            .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;
        debug!("restored wallet");
        Ok(Wallet {
            mnemonic: mnemonic.to_string(),
            seed,
        })
    }

    /// The mnemonic phrase.
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// The 64-byte BIP-39 seed.
    pub fn seed(&self) -> &[u8; SEED_LEN] {
        &self.seed
    }

    /// Derive the private key at `m/44'/195'/0'/0/index`.
    pub fn derive(&self, index: u32) -> Result<PrivateKey, WalletError> {
        KeyDeriver::new().derive_account_key(&self.seed, index)
    }

    /// Derive the address at `m/44'/195'/0'/0/index`.
    pub fn address(&self, index: u32) -> Result<Address, WalletError> {
        Ok(Address::from_private_key(&self.derive(index)?))
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("mnemonic", &"[REDACTED]")
            .field("seed", &"[REDACTED]")
            .finish()
    }
}

/// Serialize a private key as 32 big-endian bytes, left-padded with zeros.
pub fn private_key_to_bytes(key: &PrivateKey) -> [u8; PRIVATE_KEY_BYTES_LEN] {
    key.to_bytes()
}

/// Serialize a private key as 64 lowercase hex characters.
pub fn private_key_to_hex(key: &PrivateKey) -> String {
    hex::encode(private_key_to_bytes(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extended_key::ExtendedKey;

    const ABANDON_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    struct FailingEntropy;

    impl MnemonicSource for FailingEntropy {
        fn entropy(&self, _bits: usize) -> Result<Vec<u8>, WalletError> {
            Err(WalletError::Entropy("rng unavailable".to_string()))
        }

        fn mnemonic(&self, _entropy: &[u8]) -> Result<String, WalletError> {
            unreachable!("mnemonic requested after entropy failure")
        }
    }

    struct FailingMnemonic;

    impl MnemonicSource for FailingMnemonic {
        fn entropy(&self, bits: usize) -> Result<Vec<u8>, WalletError> {
            Ok(vec![0u8; bits / 8])
        }

        fn mnemonic(&self, _entropy: &[u8]) -> Result<String, WalletError> {
            Err(WalletError::MnemonicGeneration("word list missing".to_string()))
        }
    }

    /// Deterministic entropy, real encoding.
    struct ZeroEntropy;

    impl MnemonicSource for ZeroEntropy {
        fn entropy(&self, bits: usize) -> Result<Vec<u8>, WalletError> {
            Ok(vec![0u8; bits / 8])
        }

        fn mnemonic(&self, entropy: &[u8]) -> Result<String, WalletError> {
            Bip39Source.mnemonic(entropy)
        }
    }

    /// Emits a phrase that fails its own checksum.
    struct BadPhrase;

    impl MnemonicSource for BadPhrase {
        fn entropy(&self, bits: usize) -> Result<Vec<u8>, WalletError> {
            Ok(vec![0u8; bits / 8])
        }

        fn mnemonic(&self, _entropy: &[u8]) -> Result<String, WalletError> {
            Ok("abandon ".repeat(12).trim_end().to_string())
        }
    }

    #[test]
    fn test_mnemonic_length() {
        assert_eq!(MnemonicLength::default(), MnemonicLength::Words12);
        assert_eq!(MnemonicLength::Words12.entropy_bits(), 128);
        assert_eq!(MnemonicLength::Words24.entropy_bits(), 256);
        assert_eq!(MnemonicLength::Words24.word_count(), 24);
    }

    #[test]
    fn test_new_wallet_word_counts() {
        let twelve = Wallet::new(MnemonicLength::Words12).unwrap();
        assert_eq!(twelve.mnemonic().split_whitespace().count(), 12);
        let twenty_four = Wallet::new(MnemonicLength::Words24).unwrap();
        assert_eq!(twenty_four.mnemonic().split_whitespace().count(), 24);
        assert_ne!(twelve.seed(), twenty_four.seed());
    }

    #[test]
    fn test_new_with_deterministic_source() {
        let wallet = Wallet::new_with(MnemonicLength::Words12, &ZeroEntropy).unwrap();
        assert_eq!(wallet.mnemonic(), ABANDON_MNEMONIC);
        assert_eq!(
            wallet.address(0).unwrap().address_string,
            "THGXTqdwXbeBKc73CXEF3FeHWnNJpGNHxn"
        );
    }

    #[test]
    fn test_new_with_entropy_failure() {
        assert!(matches!(
            Wallet::new_with(MnemonicLength::Words12, &FailingEntropy),
            Err(WalletError::Entropy(_))
        ));
    }

    #[test]
    fn test_new_with_mnemonic_failure() {
        assert!(matches!(
            Wallet::new_with(MnemonicLength::Words24, &FailingMnemonic),
            Err(WalletError::MnemonicGeneration(_))
        ));
        assert!(matches!(
            Wallet::new_with(MnemonicLength::Words12, &BadPhrase),
            Err(WalletError::MnemonicGeneration(_))
        ));
    }

    #[test]
    fn test_restore() {
        let wallet = Wallet::restore(ABANDON_MNEMONIC).unwrap();
        assert_eq!(wallet.mnemonic(), ABANDON_MNEMONIC);
        assert_eq!(
            hex::encode(wallet.seed()),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_restore_invalid() {
        for phrase in [
            "",
            "not a valid phrase",
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon",
        ] {
            assert!(
                matches!(Wallet::restore(phrase), Err(WalletError::InvalidMnemonic(_))),
                "{:?} should be rejected",
                phrase
            );
        }
    }

    #[test]
    fn test_restore_normalizes_whitespace() {
        let spaced = format!("  {}\n", ABANDON_MNEMONIC.replace(' ', "  "));
        let wallet = Wallet::restore(&spaced).unwrap();
        assert_eq!(wallet.mnemonic(), spaced);
        assert_eq!(wallet.seed(), Wallet::restore(ABANDON_MNEMONIC).unwrap().seed());
        assert_eq!(
            wallet.address(0).unwrap().address_string,
            "THGXTqdwXbeBKc73CXEF3FeHWnNJpGNHxn"
        );
    }

    #[test]
    fn test_mnemonic_round_trip() {
        let original = Wallet::new(MnemonicLength::Words24).unwrap();
        let restored = Wallet::restore(original.mnemonic()).unwrap();
        assert_eq!(restored.seed(), original.seed());
        assert_eq!(restored.derive(5).unwrap(), original.derive(5).unwrap());
    }

    #[test]
    fn test_derive_and_export() {
        let wallet = Wallet::restore(ABANDON_MNEMONIC).unwrap();
        let key = wallet.derive(0).unwrap();
        let bytes = private_key_to_bytes(&key);
        assert_eq!(bytes.len(), 32);
        assert_eq!(
            private_key_to_hex(&key),
            "0c55c32d0c58c11cfab0216bd12142e62c85aa2688cc23aedfbd3a22bbaaf53a"
        );
    }

    #[test]
    fn test_private_key_export_pads_small_scalar() {
        let mut raw = [0u8; 32];
        raw[31] = 5;
        let key = PrivateKey::from_bytes(&raw).unwrap();
        assert_eq!(private_key_to_bytes(&key), raw);
        let hex_str = private_key_to_hex(&key);
        assert_eq!(hex_str.len(), 64);
        assert_eq!(hex_str, format!("{}05", "0".repeat(62)));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_public_types_are_send_sync() {
        assert_send_sync::<Wallet>();
        assert_send_sync::<ExtendedKey>();
        assert_send_sync::<KeyDeriver>();
        assert_send_sync::<PrivateKey>();
        assert_send_sync::<Address>();
        assert_send_sync::<Bip39Source>();
    }

    #[test]
    fn test_concurrent_derivation_matches_sequential() {
        let wallet = Wallet::restore(ABANDON_MNEMONIC).unwrap();
        let sequential: Vec<[u8; 32]> = (0..4)
            .map(|i| private_key_to_bytes(&wallet.derive(i).unwrap()))
            .collect();

        let shared = &wallet;
        let concurrent: Vec<[u8; 32]> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|i| s.spawn(move || private_key_to_bytes(&shared.derive(i).unwrap())))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(concurrent, sequential);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let wallet = Wallet::restore(ABANDON_MNEMONIC).unwrap();
        let debug = format!("{:?}", wallet);
        assert!(!debug.contains("abandon"));
        assert!(!debug.contains("5eb00bbd"));
    }
}
