//! BIP-39 mnemonic generation and seed derivation.
//!
//! Provides mnemonic phrase generation from entropy, validation,
//! and PBKDF2-based seed derivation for HD wallet compatibility.
//! Word lists and PBKDF2 come from the `bip39` crate; this module only
//! fixes the entropy sizes and maps errors.

use ::bip39::Mnemonic;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::PrimitivesError;

/// Length of a BIP-39 seed in bytes.
pub const SEED_LEN: usize = 64;

/// Entropy sizes accepted by BIP-39, in bits.
const VALID_ENTROPY_BITS: [usize; 5] = [128, 160, 192, 224, 256];

/// Read `bits` of entropy from the operating system RNG.
///
/// # Arguments
/// * `bits` - 128, 160, 192, 224 or 256.
///
/// # Returns
/// `bits / 8` random bytes, or an error for an unsupported size or an RNG failure.
pub fn new_entropy(bits: usize) -> Result<Vec<u8>, PrimitivesError> {
    if !VALID_ENTROPY_BITS.contains(&bits) {
        return Err(PrimitivesError::InvalidEntropySize(bits));
    }
    let mut entropy = vec![0u8; bits / 8];
    OsRng
        .try_fill_bytes(&mut entropy)
        .map_err(|e| PrimitivesError::Entropy(e.to_string()))?;
    Ok(entropy)
}

/// Encode entropy as an English mnemonic phrase.
///
/// # Arguments
/// * `entropy` - 16 to 32 bytes, a multiple of 4.
///
/// # Returns
/// The space-separated phrase (12 words for 16 bytes, 24 for 32).
pub fn mnemonic_from_entropy(entropy: &[u8]) -> Result<String, PrimitivesError> {
    let mnemonic = Mnemonic::from_entropy(entropy)
        .map_err(|e| PrimitivesError::InvalidMnemonic(e.to_string()))?;
    Ok(mnemonic.to_string())
}

/// Check a phrase against the English word list and its checksum.
pub fn validate_mnemonic(phrase: &str) -> Result<(), PrimitivesError> {
    parse(phrase).map(|_| ())
}

/// Returns `true` if `phrase` is a valid English BIP-39 mnemonic.
pub fn is_mnemonic_valid(phrase: &str) -> bool {
    validate_mnemonic(phrase).is_ok()
}

/// Derive the 64-byte BIP-39 seed from a phrase and passphrase.
///
/// The phrase is parsed first, so surrounding and repeated whitespace do
/// not change the seed. The passphrase is used as given and must already
/// be NFKD-normalized; an empty passphrase is always safe.
pub fn seed_from_mnemonic(phrase: &str, passphrase: &str) -> Result<[u8; SEED_LEN], PrimitivesError> {
    Ok(parse(phrase)?.to_seed_normalized(passphrase))
}

fn parse(phrase: &str) -> Result<Mnemonic, PrimitivesError> {
    Mnemonic::parse_normalized(phrase).map_err(|e| PrimitivesError::InvalidMnemonic(e.to_string()))
}
