//! Error taxonomy for obfuscation and restoration.
//!
//! Every pipeline-internal failure (bad padding, truncated base64, short
//! envelope) is caught at the mode boundary and re-raised as one of these
//! kinds, so a caller can never mistake garbled output for success.

use thiserror::Error;

/// Errors produced by the obfuscation and restoration pipelines.
#[derive(Error, Debug)]
pub enum ObfuscationError {
    /// Unknown mode or flag value.
    #[error("unknown obfuscation mode `{0}`")]
    Configuration(String),

    /// Sidecar metadata is missing, wrong-length, or of the wrong kind.
    #[error("invalid metadata in `{field}`: expected {expected}, found {actual}")]
    InvalidMetadata {
        field: &'static str,
        expected: String,
        actual: String,
    },

    /// Payload could not be decoded or decompressed.
    #[error("corrupt data: {0}")]
    CorruptData(String),

    /// Envelope decryption failed. Deliberately constant-format: the message
    /// does not reveal whether padding, UTF-8 validation, or the key check
    /// failed.
    #[error("decryption failed: wrong password or corrupted envelope")]
    Decryption,

    /// Image shape does not match the sidecar permutation.
    #[error(
        "image of {width}x{height} ({pixels} pixels) does not match permutation of length {permutation}"
    )]
    DimensionMismatch {
        width: u32,
        height: u32,
        pixels: usize,
        permutation: usize,
    },
}
