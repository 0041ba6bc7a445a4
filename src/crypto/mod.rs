//! Cryptographic primitives for the AES text mode.
//!
//! This module provides:
//! - Password-based key derivation (PBKDF2-HMAC-SHA256)
//! - Envelope encryption (AES-256-CBC + PKCS#7, salt and IV framed inside)
//! - DEFLATE compression for the advanced text mode
//!
//! Randomness discipline: salts and IVs come from the OS CSPRNG and are
//! unique per call; they are never drawn from the deterministic seeded
//! generator that produces permutations and substitution maps.

pub mod compression;
pub mod envelope;
pub mod kdf;

pub use compression::{compress, decompress};
pub use envelope::{decrypt, encrypt, BLOCK_LEN};
pub use kdf::{derive_key, random_salt, KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN};
