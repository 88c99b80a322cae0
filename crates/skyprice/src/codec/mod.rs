//! Binary decoding for the tag-tree format.
//!
//! [`decode`] is the entry point: it accepts raw or gzip-wrapped streams and
//! returns the root [`Tag`](crate::model::Tag).

pub mod primitives;
pub mod tag;

pub use primitives::{Reader, Writer};
pub use tag::{decode, decode_uncompressed, decompress, is_gzip};
