//! Text obfuscation pipeline.
//!
//! Three mutually exclusive modes, each a fixed composition of the leaf
//! primitives:
//!
//! - `basic`: substitution, then permutation of the substituted characters.
//!   Sidecar: the permutation.
//! - `advanced`: substitution, permutation drawn from `seed + 1`, DEFLATE,
//!   base64. Sidecar: substitution map and permutation.
//! - `aes`: the PBKDF2 + AES-256-CBC envelope. No sidecar.
//!
//! Restoration mirrors each mode in exact reverse order. The `seed + 1`
//! decorrelation in `advanced` is a compatibility constant, not a security
//! boundary; none of these modes except `aes` resist cryptanalysis.

use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::crypto;
use crate::error::ObfuscationError;
use crate::metadata::TextMetadata;
use crate::permute::{self, Seed};
use crate::substitute;

/// Mode selector for the text pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    Basic,
    Advanced,
    Aes,
}

impl TextMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TextMode::Basic => "basic",
            TextMode::Advanced => "advanced",
            TextMode::Aes => "aes",
        }
    }
}

impl FromStr for TextMode {
    type Err = ObfuscationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(TextMode::Basic),
            "advanced" => Ok(TextMode::Advanced),
            "aes" => Ok(TextMode::Aes),
            other => Err(ObfuscationError::Configuration(other.to_string())),
        }
    }
}

/// Obfuscates `text` under `key`, returning the transformed payload and the
/// sidecar needed to invert it.
pub fn obfuscate(
    text: &str,
    key: &str,
    mode: TextMode,
) -> Result<(String, TextMetadata), ObfuscationError> {
    let seed = Seed::from_text(key);

    match mode {
        TextMode::Basic => {
            // Step 1: substitute characters through the seeded map.
            let alphabet = substitute::default_alphabet();
            let map = substitute::build_map(&alphabet, seed);
            let substituted = substitute::apply_map(text, &map);

            // Step 2: permute the substituted character sequence.
            let chars: Vec<char> = substituted.chars().collect();
            let permutation = permute::generate(chars.len(), seed);
            let permuted: String = permute::apply(&chars, &permutation).into_iter().collect();

            Ok((
                permuted,
                TextMetadata::Basic {
                    permutation_key: permutation,
                },
            ))
        }
        TextMode::Advanced => {
            // Step 1: substitute.
            let alphabet = substitute::default_alphabet();
            let map = substitute::build_map(&alphabet, seed);
            let substituted = substitute::apply_map(text, &map);

            // Step 2: permute with the successor seed, decorrelating this
            // draw from the substitution-map draw.
            let chars: Vec<char> = substituted.chars().collect();
            let permutation = permute::generate(chars.len(), seed.next());
            let permuted: String = permute::apply(&chars, &permutation).into_iter().collect();

            // Step 3: compress and armor.
            let compressed = crypto::compress(permuted.as_bytes())?;
            let encoded = BASE64.encode(compressed);

            Ok((
                encoded,
                TextMetadata::Advanced {
                    char_map: map,
                    permutation_key: permutation,
                },
            ))
        }
        TextMode::Aes => Ok((crypto::encrypt(text, key), TextMetadata::Aes)),
    }
}

/// Restores obfuscated text. The sidecar selects the mode; `key` must match
/// the one used at obfuscation time.
pub fn restore(
    payload: &str,
    key: &str,
    metadata: &TextMetadata,
) -> Result<String, ObfuscationError> {
    let seed = Seed::from_text(key);

    match metadata {
        TextMetadata::Basic { permutation_key } => {
            // Step 1: invert the permutation.
            let chars: Vec<char> = payload.chars().collect();
            let permutation = checked_permutation(permutation_key, chars.len())?;
            let restored: String = permute::apply(&chars, &permute::invert(permutation))
                .into_iter()
                .collect();

            // Step 2: reverse the substitution, re-deriving the map from the
            // key.
            let alphabet = substitute::default_alphabet();
            let map = substitute::build_map(&alphabet, seed);
            Ok(substitute::apply_map(&restored, &substitute::reverse_map(&map)))
        }
        TextMetadata::Advanced {
            char_map,
            permutation_key,
        } => {
            // Step 1: unarmor and decompress, before any inversion.
            let compressed = BASE64
                .decode(payload.trim())
                .map_err(|e| ObfuscationError::CorruptData(format!("invalid base64: {e}")))?;
            let decompressed = crypto::decompress(&compressed)?;
            let permuted = String::from_utf8(decompressed)
                .map_err(|e| ObfuscationError::CorruptData(format!("invalid UTF-8: {e}")))?;

            // Step 2: invert the permutation.
            let chars: Vec<char> = permuted.chars().collect();
            let permutation = checked_permutation(permutation_key, chars.len())?;
            let restored: String = permute::apply(&chars, &permute::invert(permutation))
                .into_iter()
                .collect();

            // Step 3: reverse the substitution from the sidecar map, never
            // re-derived, so restoration works from the sidecar alone.
            Ok(substitute::apply_map(
                &restored,
                &substitute::reverse_map(char_map),
            ))
        }
        TextMetadata::Aes => crypto::decrypt(payload, key),
    }
}

/// Validates a sidecar permutation against the payload length before any
/// index is trusted.
fn checked_permutation(
    permutation: &[u32],
    expected_len: usize,
) -> Result<&[u32], ObfuscationError> {
    if permutation.len() != expected_len {
        return Err(ObfuscationError::InvalidMetadata {
            field: "permutation_key",
            expected: format!("length {expected_len}"),
            actual: format!("length {}", permutation.len()),
        });
    }
    if !permute::is_permutation(permutation) {
        return Err(ObfuscationError::InvalidMetadata {
            field: "permutation_key",
            expected: format!("a bijection over 0..{expected_len}"),
            actual: "out-of-range or duplicate indices".to_string(),
        });
    }
    Ok(permutation)
}
