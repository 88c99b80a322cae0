//! Error types for tag-tree decoding, record processing and configuration.

use thiserror::Error;

/// Error during binary decoding of a tag stream.
///
/// Every variant is fatal to the decode call that produced it; the codec
/// never returns a partially decoded tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("invalid tag type {tag_type:#04x} in {context}")]
    InvalidTagType { tag_type: u8, context: &'static str },

    #[error("{field} has negative length {len}")]
    NegativeLength { field: &'static str, len: i32 },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("tag nesting exceeds maximum depth {max}")]
    NestingTooDeep { max: usize },

    #[error("malformed encoding: {context}")]
    MalformedEncoding { context: &'static str },

    #[error("gzip decompression failed: {0}")]
    DecompressionFailed(String),
}

/// Reason a single auction record contributed no price sample.
///
/// These never abort an aggregation run; they are counted and logged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("auction is not a BIN listing")]
    NotBin,

    #[error("item bytes are not valid base64: {0}")]
    InvalidBase64(String),

    #[error("item payload failed to decode: {0}")]
    Decode(#[from] DecodeError),

    #[error("item has no resolvable identity")]
    NoIdentity,

    #[error("item identity {0:?} is excluded from aggregation")]
    Excluded(String),
}

/// Error while reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: expected one of {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}
