//! Alphabet substitution cipher.
//!
//! A key-seeded bijection over a fixed alphabet of printable ASCII. The map
//! is built by shuffling a copy of the alphabet with the same seeded
//! primitive as [`crate::permute`] and zipping original to shuffled, so both
//! sides of a transfer derive identical maps from the key alone.
//!
//! Characters outside the alphabet pass through unchanged, which keeps
//! `apply_map` total: it is defined for every input, including arbitrary
//! Unicode, and never fails.

use std::collections::BTreeMap;

use crate::permute::{self, Seed};

/// The substitution alphabet: ASCII lowercase, uppercase, digits, the 32
/// punctuation characters, and space. Order is part of the map derivation
/// and must not change.
pub fn default_alphabet() -> Vec<char> {
    let mut chars: Vec<char> = ('a'..='z').collect();
    chars.extend('A'..='Z');
    chars.extend('0'..='9');
    chars.extend(r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##.chars());
    chars.push(' ');
    chars
}

/// Builds the forward substitution map: each alphabet symbol maps to the
/// symbol at the same position in a seeded shuffle of the alphabet.
///
/// The result is a bijection on `alphabet` as long as `alphabet` itself has
/// no duplicate symbols.
pub fn build_map(alphabet: &[char], seed: Seed) -> BTreeMap<char, char> {
    let order = permute::generate(alphabet.len(), seed);
    let shuffled = permute::apply(alphabet, &order);
    alphabet.iter().copied().zip(shuffled).collect()
}

/// Swaps keys and values, turning a forward map into its inverse.
pub fn reverse_map(map: &BTreeMap<char, char>) -> BTreeMap<char, char> {
    map.iter().map(|(&from, &to)| (to, from)).collect()
}

/// Maps each character of `text` through `map`, passing unmapped characters
/// through unchanged.
pub fn apply_map(text: &str, map: &BTreeMap<char, char>) -> String {
    text.chars()
        .map(|c| map.get(&c).copied().unwrap_or(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_alphabet_has_no_duplicates() {
        let alphabet = default_alphabet();
        let unique: BTreeSet<char> = alphabet.iter().copied().collect();
        assert_eq!(unique.len(), alphabet.len());
        assert_eq!(alphabet.len(), 95);
    }

    #[test]
    fn test_map_is_bijective() {
        let alphabet = default_alphabet();
        let map = build_map(&alphabet, Seed::from_text("bijective"));
        assert_eq!(map.len(), alphabet.len());
        let targets: BTreeSet<char> = map.values().copied().collect();
        assert_eq!(targets.len(), alphabet.len());
    }

    #[test]
    fn test_map_deterministic() {
        let alphabet = default_alphabet();
        let a = build_map(&alphabet, Seed::from_text("same"));
        let b = build_map(&alphabet, Seed::from_text("same"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_substitution_roundtrip() {
        let alphabet = default_alphabet();
        let map = build_map(&alphabet, Seed::from_text("key"));
        let text = "Hello, World! 123";
        let substituted = apply_map(text, &map);
        assert_ne!(substituted, text);
        assert_eq!(apply_map(&substituted, &reverse_map(&map)), text);
    }

    #[test]
    fn test_non_alphabet_characters_pass_through() {
        let alphabet = default_alphabet();
        let map = build_map(&alphabet, Seed::from_text("key"));
        let text = "caf\u{e9} \u{4f60}\u{597d}\n\t";
        let substituted = apply_map(text, &map);
        // Accented and CJK characters plus control whitespace survive intact.
        for c in ['\u{e9}', '\u{4f60}', '\u{597d}', '\n', '\t'] {
            assert!(substituted.contains(c));
        }
        assert_eq!(apply_map(&substituted, &reverse_map(&map)), text);
    }

    #[test]
    fn test_roundtrip_on_disjoint_text() {
        // Text entirely outside the alphabet is a fixed point of apply_map.
        let alphabet = default_alphabet();
        let map = build_map(&alphabet, Seed::from_text("key"));
        let text = "\u{65e5}\u{672c}\u{8a9e}";
        assert_eq!(apply_map(text, &map), text);
    }
}
