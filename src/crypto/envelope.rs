//! AES-256-CBC envelope encryption.
//!
//! The envelope format is `base64(salt || iv || ciphertext)`:
//! - salt: 16 bytes, random per call, feeds PBKDF2 (see [`super::kdf`])
//! - iv: 16 bytes (AES block size), random per call
//! - ciphertext: AES-256-CBC over the PKCS#7-padded plaintext
//!
//! Salt and IV are generated from the OS CSPRNG and travel inside the
//! envelope, so the AES mode needs no sidecar metadata.
//!
//! CBC offers no authentication: a wrong password either fails padding
//! validation or decrypts to garbage. Both cases (and the garbage-bytes
//! case, caught by UTF-8 validation) are reported as the same
//! constant-format [`ObfuscationError::Decryption`].

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes256;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::rngs::OsRng;
use rand::RngCore;

use super::kdf::{derive_key, random_salt, SALT_LEN};
use crate::error::ObfuscationError;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block length in bytes; also the IV length.
pub const BLOCK_LEN: usize = 16;

/// Encrypts `plaintext` under a password-derived key.
///
/// Each call draws a fresh salt and IV, so encrypting the same plaintext
/// twice produces different envelopes.
pub fn encrypt(plaintext: &str, password: &str) -> String {
    let salt = random_salt();
    let key = derive_key(password, &salt);

    let mut iv = [0u8; BLOCK_LEN];
    OsRng.fill_bytes(&mut iv);

    let ciphertext = Aes256CbcEnc::new(&key.into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    let mut combined = Vec::with_capacity(SALT_LEN + BLOCK_LEN + ciphertext.len());
    combined.extend_from_slice(&salt);
    combined.extend_from_slice(&iv);
    combined.extend_from_slice(&ciphertext);

    BASE64.encode(combined)
}

/// Decrypts an envelope produced by [`encrypt`].
///
/// Malformed base64 or a truncated envelope is [`ObfuscationError::CorruptData`];
/// padding or UTF-8 validation failure is [`ObfuscationError::Decryption`].
pub fn decrypt(envelope: &str, password: &str) -> Result<String, ObfuscationError> {
    let combined = BASE64
        .decode(envelope.trim())
        .map_err(|e| ObfuscationError::CorruptData(format!("invalid base64 envelope: {e}")))?;

    if combined.len() < SALT_LEN + BLOCK_LEN {
        return Err(ObfuscationError::CorruptData(format!(
            "envelope too short: {} bytes",
            combined.len()
        )));
    }

    let salt: [u8; SALT_LEN] = combined[..SALT_LEN]
        .try_into()
        .expect("slice length checked above");
    let iv: [u8; BLOCK_LEN] = combined[SALT_LEN..SALT_LEN + BLOCK_LEN]
        .try_into()
        .expect("slice length checked above");
    let ciphertext = &combined[SALT_LEN + BLOCK_LEN..];

    let key = derive_key(password, &salt);

    let plaintext = Aes256CbcDec::new(&key.into(), &iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| ObfuscationError::Decryption)?;

    String::from_utf8(plaintext).map_err(|_| ObfuscationError::Decryption)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let envelope = encrypt("Hello, envelope!", "passw0rd");
        assert_eq!(decrypt(&envelope, "passw0rd").unwrap(), "Hello, envelope!");
    }

    #[test]
    fn test_empty_plaintext_roundtrip() {
        let envelope = encrypt("", "key");
        assert_eq!(decrypt(&envelope, "key").unwrap(), "");
    }

    #[test]
    fn test_unicode_roundtrip() {
        let text = "\u{6df7}\u{6dc6} caf\u{e9} \u{1f512}";
        let envelope = encrypt(text, "key");
        assert_eq!(decrypt(&envelope, "key").unwrap(), text);
    }

    #[test]
    fn test_wrong_password_never_mistaken_for_success() {
        // CBC property: a wrong key usually fails padding validation, but can
        // in rare cases unpad to garbage. Either way the caller must not see
        // the original plaintext.
        let envelope = encrypt("secret", "correct");
        match decrypt(&envelope, "wrong") {
            Err(ObfuscationError::Decryption) => {}
            Ok(garbage) => assert_ne!(garbage, "secret"),
            Err(other) => panic!("unexpected error kind: {other}"),
        }
    }

    #[test]
    fn test_envelopes_differ_per_call() {
        // Random salt + IV: same inputs, different envelopes.
        assert_ne!(encrypt("same", "pass"), encrypt("same", "pass"));
    }

    #[test]
    fn test_invalid_base64_is_corrupt_data() {
        assert!(matches!(
            decrypt("not base64!!!", "pass"),
            Err(ObfuscationError::CorruptData(_))
        ));
    }

    #[test]
    fn test_truncated_envelope_is_corrupt_data() {
        let short = BASE64.encode([0u8; 8]);
        assert!(matches!(
            decrypt(&short, "pass"),
            Err(ObfuscationError::CorruptData(_))
        ));
    }
}
