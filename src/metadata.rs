//! Sidecar metadata for inverting a transform.
//!
//! Obfuscation produces output that looks lossy but is fully reversible
//! given the key and the mode's sidecar. The sidecar is created once at
//! obfuscation time, consumed once at restoration time, and is otherwise
//! opaque. Serialized as JSON; field names (`permutation_key`, `char_map`)
//! are part of the on-disk format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-mode sidecar for the text pipeline.
///
/// - `basic`: the character permutation; the substitution map is re-derived
///   from the key at restore time.
/// - `advanced`: substitution map and permutation both travel in the
///   sidecar, so restoration never touches the seed path for them.
/// - `aes`: nothing; salt and IV live inside the envelope itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TextMetadata {
    Basic {
        permutation_key: Vec<u32>,
    },
    Advanced {
        char_map: BTreeMap<char, char>,
        permutation_key: Vec<u32>,
    },
    Aes,
}

impl TextMetadata {
    /// The mode name this sidecar belongs to, as written in the JSON tag.
    pub fn mode_name(&self) -> &'static str {
        match self {
            TextMetadata::Basic { .. } => "basic",
            TextMetadata::Advanced { .. } => "advanced",
            TextMetadata::Aes => "aes",
        }
    }
}

/// Sidecar for the image pipeline: the pixel permutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub permutation_key: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_metadata_json_roundtrip() {
        let meta = TextMetadata::Basic {
            permutation_key: vec![2, 0, 1],
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"mode\":\"basic\""));
        assert!(json.contains("permutation_key"));
        let reloaded: TextMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, meta);
    }

    #[test]
    fn test_advanced_metadata_json_roundtrip() {
        let meta = TextMetadata::Advanced {
            char_map: BTreeMap::from([('a', 'x'), ('b', 'y')]),
            permutation_key: vec![1, 0],
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("char_map"));
        let reloaded: TextMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, meta);
    }

    #[test]
    fn test_aes_metadata_is_bare_tag() {
        let json = serde_json::to_string(&TextMetadata::Aes).unwrap();
        assert_eq!(json, "{\"mode\":\"aes\"}");
        let reloaded: TextMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, TextMetadata::Aes);
    }

    #[test]
    fn test_image_metadata_json_roundtrip() {
        let meta = ImageMetadata {
            permutation_key: vec![3, 1, 0, 2],
        };
        let json = serde_json::to_string(&meta).unwrap();
        let reloaded: ImageMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, meta);
    }
}
