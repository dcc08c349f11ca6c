//! BIP-44 account key derivation for TRON.
//!
//! KeyDeriver walks the fixed path `m/44'/195'/0'/0/index` from a seed and
//! returns the private key at the leaf.

use std::fmt;

use tracing::{debug, warn};
use tron_primitives::ec::PrivateKey;

use crate::error::WalletError;
use crate::extended_key::{ChildNumber, ExtendedKey, HmacSha512, Sha512Hmac};

/// BIP-44 purpose level.
pub const PURPOSE: u32 = 44;
/// SLIP-44 registered coin type for TRON.
pub const COIN_TYPE: u32 = 195;
/// Account level; always the first account.
pub const ACCOUNT: u32 = 0;
/// Change level; always the external chain.
pub const CHANGE: u32 = 0;

/// The path to one TRON account key: `m/44'/195'/0'/0/address_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    /// Caller-supplied last level (non-hardened).
    pub address_index: u32,
}

impl DerivationPath {
    /// Path for the given address index.
    pub fn new(address_index: u32) -> Self {
        DerivationPath { address_index }
    }

    /// The five child steps below the master node, in order.
    pub fn steps(&self) -> [ChildNumber; 5] {
        [
            ChildNumber::Hardened(PURPOSE),
            ChildNumber::Hardened(COIN_TYPE),
            ChildNumber::Hardened(ACCOUNT),
            ChildNumber::Normal(CHANGE),
            ChildNumber::Normal(self.address_index),
        ]
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for step in self.steps() {
            write!(f, "/{}", step)?;
        }
        Ok(())
    }
}

/// Derives TRON account keys from a BIP-39 seed.
///
/// Derivation is all-or-nothing: the first step that produces an invalid
/// scalar aborts the walk and its error is returned unchanged.
#[derive(Clone, Debug, Default)]
pub struct KeyDeriver<H = Sha512Hmac> {
    hasher: H,
}

impl KeyDeriver {
    /// Create a KeyDeriver using the standard HMAC-SHA512.
    pub fn new() -> Self {
        KeyDeriver { hasher: Sha512Hmac }
    }
}

impl<H: HmacSha512> KeyDeriver<H> {
    /// Create a KeyDeriver with a caller-supplied HMAC-SHA512.
    pub fn with_hasher(hasher: H) -> Self {
        KeyDeriver { hasher }
    }

    /// The master node for a seed.
    pub fn master_key(&self, seed: &[u8]) -> ExtendedKey {
        ExtendedKey::master_with(&self.hasher, seed)
    }

    /// Derive the private key at `m/44'/195'/0'/0/index`.
    ///
    /// # Arguments
    /// * `seed` - BIP-39 seed bytes.
    /// * `index` - Address index, the last (non-hardened) path level.
    ///
    /// # Returns
    /// The leaf private key, or the error of the first failing step.
    pub fn derive_account_key(&self, seed: &[u8], index: u32) -> Result<PrivateKey, WalletError> {
        let master = self.master_key(seed);
        self.derive_from_master(&master, index)
    }

    /// Derive the account key for `index` starting from an existing master node.
    pub fn derive_from_master(
        &self,
        master: &ExtendedKey,
        index: u32,
    ) -> Result<PrivateKey, WalletError> {
        let path = DerivationPath::new(index);
        debug!(path = %path, "deriving account key");

        self.walk(master, &path)
            .inspect_err(|e| warn!(path = %path, error = %e, "account key derivation failed"))
    }

    fn walk(&self, master: &ExtendedKey, path: &DerivationPath) -> Result<PrivateKey, WalletError> {
        let mut node = master.clone();
        for step in path.steps() {
            node = node.derive_child_with(&self.hasher, step)?;
        }
        node.private_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extended_key::{HARDENED_OFFSET, MASTER_HMAC_KEY};
    use tron_address::Address;
    use tron_primitives::bip39::seed_from_mnemonic;
    use tron_primitives::hash::sha512_hmac;

    const ABANDON_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn abandon_seed() -> [u8; 64] {
        seed_from_mnemonic(ABANDON_MNEMONIC, "").unwrap()
    }

    /// Returns an invalid `IL` (all 0xff) for the child step whose serialized
    /// index equals `raw_index`; every other call is the real HMAC.
    struct FailAtIndex {
        raw_index: u32,
    }

    impl HmacSha512 for FailAtIndex {
        fn hmac_sha512(&self, key: &[u8], data: &[u8]) -> [u8; 64] {
            let mut out = sha512_hmac(key, data);
            if key != MASTER_HMAC_KEY && data.ends_with(&self.raw_index.to_be_bytes()) {
                out[..32].fill(0xff);
            }
            out
        }
    }

    /// Master derivation yields a zero key.
    struct ZeroMaster;

    impl HmacSha512 for ZeroMaster {
        fn hmac_sha512(&self, key: &[u8], data: &[u8]) -> [u8; 64] {
            let mut out = sha512_hmac(key, data);
            if key == MASTER_HMAC_KEY {
                out[..32].fill(0);
            }
            out
        }
    }

    #[test]
    fn test_derivation_path_display() {
        assert_eq!(DerivationPath::new(0).to_string(), "m/44'/195'/0'/0/0");
        assert_eq!(
            DerivationPath::new(u32::MAX).to_string(),
            "m/44'/195'/0'/0/4294967295"
        );
    }

    #[test]
    fn test_derivation_path_steps() {
        let steps = DerivationPath::new(9).steps();
        let raw: Vec<u32> = steps.iter().map(|s| s.to_raw().unwrap()).collect();
        assert_eq!(
            raw,
            vec![
                44 + HARDENED_OFFSET,
                195 + HARDENED_OFFSET,
                HARDENED_OFFSET,
                0,
                9
            ]
        );
    }

    #[test]
    fn test_master_key_for_abandon_seed() {
        let master = KeyDeriver::new().master_key(&abandon_seed());
        assert_eq!(
            hex::encode(master.key()),
            "1837c1be8e2995ec11cda2b066151be2cfb48adf9e47b151d46adab3a21cdf67"
        );
        assert_eq!(
            hex::encode(master.chain_code()),
            "7923408dadd3c7b56eed15567707ae5e5dca089de972e07f3b860450e2a3b70e"
        );
    }

    /// Intermediate nodes of the abandon path.
    #[test]
    fn test_intermediate_nodes() {
        let master = KeyDeriver::new().master_key(&abandon_seed());
        let account = master
            .derive_hardened(44)
            .and_then(|k| k.derive_hardened(195))
            .and_then(|k| k.derive_hardened(0))
            .unwrap();
        assert_eq!(
            hex::encode(account.key()),
            "57f15173e2a6f281649ddf1b932f93d31274f8f5e7b892936bf0e9fe40a5ac11"
        );
        let change = account.derive(0).unwrap();
        assert_eq!(
            hex::encode(change.key()),
            "71ef6ed1cc1fc5025a711f2de642f4eb9d6f23b7c25b12141e1134a8b7440492"
        );
    }

    #[test]
    fn test_abandon_index_zero() {
        let key = KeyDeriver::new()
            .derive_account_key(&abandon_seed(), 0)
            .unwrap();
        assert_eq!(
            key.to_hex(),
            "0c55c32d0c58c11cfab0216bd12142e62c85aa2688cc23aedfbd3a22bbaaf53a"
        );
        assert_eq!(
            Address::from_private_key(&key).address_string,
            "THGXTqdwXbeBKc73CXEF3FeHWnNJpGNHxn"
        );
    }

    #[test]
    fn test_derivation_vectors() {
        let vectors: Vec<serde_json::Value> =
            serde_json::from_str(include_str!("testdata/derivation.vectors.json")).unwrap();
        assert!(!vectors.is_empty());

        let deriver = KeyDeriver::new();
        for v in &vectors {
            let mnemonic = v["mnemonic"].as_str().unwrap();
            let index = v["index"].as_u64().unwrap() as u32;
            let seed = seed_from_mnemonic(mnemonic, "").unwrap();
            assert_eq!(hex::encode(seed), v["seed"].as_str().unwrap());
            assert_eq!(DerivationPath::new(index).to_string(), v["path"].as_str().unwrap());

            let key = deriver.derive_account_key(&seed, index).unwrap();
            assert_eq!(key.to_hex(), v["privateKey"].as_str().unwrap(), "index {}", index);
            assert_eq!(
                hex::encode(key.pub_key().to_uncompressed()),
                v["publicKey"].as_str().unwrap()
            );
            assert_eq!(
                Address::from_private_key(&key).address_string,
                v["address"].as_str().unwrap()
            );
        }
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let deriver = KeyDeriver::new();
        let seed = abandon_seed();
        let a = deriver.derive_account_key(&seed, 7).unwrap();
        let b = deriver.derive_account_key(&seed, 7).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, deriver.derive_account_key(&seed, 8).unwrap());
    }

    #[test]
    fn test_derive_from_master_matches_seed_path() {
        let deriver = KeyDeriver::new();
        let seed = abandon_seed();
        let master = deriver.master_key(&seed);
        assert_eq!(
            deriver.derive_from_master(&master, 3).unwrap(),
            deriver.derive_account_key(&seed, 3).unwrap()
        );
    }

    /// An invalid IL at any of the five steps fails the whole derivation.
    #[test]
    fn test_failure_at_each_step_propagates() {
        let seed = abandon_seed();
        let index = 12345;
        for raw_index in [
            PURPOSE + HARDENED_OFFSET,
            COIN_TYPE + HARDENED_OFFSET,
            ACCOUNT + HARDENED_OFFSET,
            CHANGE,
            index,
        ] {
            let deriver = KeyDeriver::with_hasher(FailAtIndex { raw_index });
            assert!(
                matches!(
                    deriver.derive_account_key(&seed, index),
                    Err(WalletError::InvalidScalar(_))
                ),
                "step with raw index {:#x} should fail",
                raw_index
            );
        }
    }

    #[test]
    fn test_invalid_master_key_fails() {
        let deriver = KeyDeriver::with_hasher(ZeroMaster);
        assert!(matches!(
            deriver.derive_account_key(&abandon_seed(), 0),
            Err(WalletError::InvalidScalar(_))
        ));

        let overflow = ExtendedKey::new([0xff; 32], [1u8; 32]);
        assert!(matches!(
            KeyDeriver::new().derive_from_master(&overflow, 0),
            Err(WalletError::InvalidScalar(_))
        ));
    }

    /// A hasher borrowed by reference works the same as an owned one.
    #[test]
    fn test_with_borrowed_hasher() {
        let hasher = Sha512Hmac;
        let deriver = KeyDeriver::with_hasher(&hasher);
        assert_eq!(
            deriver.derive_account_key(&abandon_seed(), 1).unwrap().to_hex(),
            "e807206d82d37772741051c99a2af8e8e0bace589c1dfcf766f07e2be2afc96c"
        );
    }
}
