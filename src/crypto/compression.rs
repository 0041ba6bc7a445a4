//! DEFLATE compression stage for the advanced text mode.
//!
//! Compression runs after substitution and permutation, so the compressor
//! sees already-scrambled text; the ratio is poor on short inputs but the
//! stage is unconditional to keep the wire format uniform.

use flate2::read::{DeflateDecoder, DeflateEncoder};
use flate2::Compression;
use std::io::Read;

use crate::error::ObfuscationError;

/// Compresses `data` with DEFLATE.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, ObfuscationError> {
    let mut encoder = DeflateEncoder::new(data, Compression::default());
    let mut compressed = Vec::new();
    encoder
        .read_to_end(&mut compressed)
        .map_err(|e| ObfuscationError::CorruptData(format!("compression failed: {e}")))?;
    Ok(compressed)
}

/// Decompresses data produced by [`compress`].
///
/// Truncated or non-DEFLATE input is [`ObfuscationError::CorruptData`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, ObfuscationError> {
    let mut decoder = DeflateDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| ObfuscationError::CorruptData(format!("decompression failed: {e}")))?;
    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_decompress_roundtrip() {
        let data = b"Hello, this is a test message that should compress well. \
                     Hello, this is a test message that should compress well.";
        let compressed = compress(data).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn test_empty_roundtrip() {
        let compressed = compress(b"").unwrap();
        assert_eq!(decompress(&compressed).unwrap(), b"");
    }

    #[test]
    fn test_repetitive_data_shrinks() {
        let data = vec![b'A'; 4096];
        let compressed = compress(&data).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn test_garbage_input_is_corrupt_data() {
        let result = decompress(&[0xff, 0xfe, 0xfd, 0xfc, 0xfb]);
        assert!(matches!(result, Err(ObfuscationError::CorruptData(_))));
    }
}
