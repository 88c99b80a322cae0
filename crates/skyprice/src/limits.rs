//! Security limits and wire constants for decoding untrusted payloads.

/// Gzip member header magic bytes.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Maximum nesting depth of lists and compounds.
pub const MAX_DEPTH: usize = 256;

/// Maximum size of a gzip-unwrapped payload (16 MiB).
pub const MAX_DECOMPRESSED_SIZE: usize = 16 * 1024 * 1024;

/// Upper bound on elements reserved up front for one list.
pub const MAX_LIST_PREALLOC: usize = 4096;
