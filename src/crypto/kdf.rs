//! Password-based key derivation.
//!
//! PBKDF2-HMAC-SHA256 stretches a low-entropy password into an AES-256 key.
//! The iteration count is part of the envelope format: changing it breaks
//! decryption of existing envelopes.

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Derives an AES-256 key from a password and salt.
///
/// Deterministic: the decryption side re-derives the same key from the salt
/// recovered out of the envelope.
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    key
}

/// Generates a fresh random salt from the OS CSPRNG.
///
/// Never derived from the obfuscation seed: salts must be unpredictable and
/// unique per encryption call, unlike the reproducible permutation seeds.
pub fn random_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}
