//! # Obscura - Reversible text and image obfuscation
//!
//! Obscura scrambles text or raster images under a user-supplied key and
//! restores them bit-exactly from the scrambled output plus a small metadata
//! sidecar.
//!
//! ## Overview
//!
//! - Text modes: `basic` (substitution + permutation), `advanced`
//!   (substitution + permutation + DEFLATE + base64), `aes` (PBKDF2 +
//!   AES-256-CBC envelope)
//! - Image mode: pixel permutation + per-channel XOR masks + fixed channel
//!   rotation, driven by an integer key
//! - Permutations and substitution maps are **reproducible**: derived from
//!   the key through a seeded ChaCha20 generator, identical across processes
//!   and platforms
//! - Salts and IVs are **not**: they come from the OS CSPRNG, fresh per call
//! - Restoration either reproduces the original payload exactly or fails
//!   with a typed error, never silently returns plausible garbage
//!
//! ## Example Usage
//!
//! ```rust
//! use obscura::text::{obfuscate, restore, TextMode};
//!
//! let (scrambled, metadata) = obfuscate("Hello, World!", "seed1", TextMode::Basic).unwrap();
//! assert_ne!(scrambled, "Hello, World!");
//!
//! let original = restore(&scrambled, "seed1", &metadata).unwrap();
//! assert_eq!(original, "Hello, World!");
//! ```
//!
//! ## Modules
//!
//! - [`permute`]: deterministic seeded permutations and their inverses
//! - [`substitute`]: key-seeded alphabet substitution
//! - [`crypto`]: PBKDF2 key derivation, AES-CBC envelope, DEFLATE stage
//! - [`text`]: the three text obfuscation modes
//! - [`image`]: the pixel scrambling pipeline
//! - [`metadata`]: sidecar types consumed at restoration time

pub mod crypto;
pub mod error;
pub mod image;
pub mod metadata;
pub mod permute;
pub mod substitute;
pub mod text;

// Re-export commonly used types at the crate root
pub use error::ObfuscationError;
pub use metadata::{ImageMetadata, TextMetadata};
pub use permute::Seed;
pub use text::TextMode;
