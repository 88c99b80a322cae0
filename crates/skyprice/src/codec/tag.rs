//! Tag stream decoding.
//!
//! A stream is one unnamed root entry: a type id, a name that is read and
//! discarded, then the payload. Streams may be wrapped in gzip, which is
//! detected from the first two bytes and removed before parsing.

use std::io::Read;

use flate2::read::MultiGzDecoder;

use crate::codec::primitives::Reader;
use crate::error::DecodeError;
use crate::limits::{GZIP_MAGIC, MAX_DECOMPRESSED_SIZE, MAX_DEPTH, MAX_LIST_PREALLOC};
use crate::model::{Compound, List, Tag, TagType};

// =============================================================================
// ENVELOPE
// =============================================================================

/// Returns true if `input` starts with the gzip magic bytes.
pub fn is_gzip(input: &[u8]) -> bool {
    input.starts_with(&GZIP_MAGIC)
}

/// Removes the gzip envelope, returning the raw tag stream.
///
/// Concatenated gzip members are inflated in order into one stream.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let limit = MAX_DECOMPRESSED_SIZE as u64 + 1;
    let mut decoder = MultiGzDecoder::new(input).take(limit);

    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| DecodeError::DecompressionFailed(e.to_string()))?;

    if decompressed.len() > MAX_DECOMPRESSED_SIZE {
        return Err(DecodeError::LengthExceedsLimit {
            field: "decompressed payload",
            len: decompressed.len(),
            max: MAX_DECOMPRESSED_SIZE,
        });
    }

    Ok(decompressed)
}

/// Decodes a tag stream, unwrapping gzip if present.
///
/// Bytes after the root payload are ignored.
pub fn decode(input: &[u8]) -> Result<Tag, DecodeError> {
    if is_gzip(input) {
        let raw = decompress(input)?;
        decode_uncompressed(&raw)
    } else {
        decode_uncompressed(input)
    }
}

/// Decodes a raw (not gzip-wrapped) tag stream.
pub fn decode_uncompressed(input: &[u8]) -> Result<Tag, DecodeError> {
    TagDecoder::new(input).decode_root()
}

// =============================================================================
// DECODING
// =============================================================================

struct TagDecoder<'a> {
    reader: Reader<'a>,
    depth: usize,
}

impl<'a> TagDecoder<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(input),
            depth: 0,
        }
    }

    fn decode_root(&mut self) -> Result<Tag, DecodeError> {
        let tag_type = self.reader.read_tag_type("root type")?;
        if tag_type == TagType::End {
            return Ok(Tag::End);
        }
        self.reader.read_string("root name")?;
        self.decode_payload(tag_type)
    }

    fn decode_payload(&mut self, tag_type: TagType) -> Result<Tag, DecodeError> {
        let tag = match tag_type {
            TagType::End => {
                return Err(DecodeError::MalformedEncoding {
                    context: "END used as a value",
                });
            }
            TagType::Byte => Tag::Byte(self.reader.read_i8("byte")?),
            TagType::Short => Tag::Short(self.reader.read_i16("short")?),
            TagType::Int => Tag::Int(self.reader.read_i32("int")?),
            TagType::Long => Tag::Long(self.reader.read_i64("long")?),
            TagType::Float => Tag::Float(self.reader.read_f32("float")?),
            TagType::Double => Tag::Double(self.reader.read_f64("double")?),
            TagType::ByteArray => {
                let len = self.reader.read_length("byte_array.length")?;
                Tag::ByteArray(self.reader.read_bytes(len, "byte_array")?.to_vec())
            }
            TagType::String => Tag::String(self.reader.read_string("string")?),
            TagType::List => Tag::List(self.nested(Self::decode_list)?),
            TagType::Compound => Tag::Compound(self.nested(Self::decode_compound)?),
            TagType::IntArray => {
                let len = self.array_length(4, "int_array")?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.reader.read_i32("int_array")?);
                }
                Tag::IntArray(values)
            }
            TagType::LongArray => {
                let len = self.array_length(8, "long_array")?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.reader.read_i64("long_array")?);
                }
                Tag::LongArray(values)
            }
        };
        Ok(tag)
    }

    /// Reads an array length and checks the elements fit in the input.
    fn array_length(
        &mut self,
        elem_size: usize,
        field: &'static str,
    ) -> Result<usize, DecodeError> {
        let len = self.reader.read_length(field)?;
        match len.checked_mul(elem_size) {
            Some(bytes) if bytes <= self.reader.remaining_len() => Ok(len),
            _ => Err(DecodeError::UnexpectedEof { context: field }),
        }
    }

    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        if self.depth >= MAX_DEPTH {
            return Err(DecodeError::NestingTooDeep { max: MAX_DEPTH });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn decode_list(&mut self) -> Result<List, DecodeError> {
        let element_type = self.reader.read_tag_type("list.element_type")?;
        let count = self.reader.read_length("list.length")?;

        if element_type == TagType::End {
            if count > 0 {
                return Err(DecodeError::MalformedEncoding {
                    context: "non-empty list of END",
                });
            }
            return Ok(List::empty(TagType::End));
        }

        let capacity = list_capacity(element_type, count, self.reader.remaining_len());
        let mut values = Vec::with_capacity(capacity);
        for _ in 0..count {
            values.push(self.decode_payload(element_type)?);
        }
        Ok(List::from_decoded(element_type, values))
    }

    fn decode_compound(&mut self) -> Result<Compound, DecodeError> {
        let mut compound = Compound::new();
        loop {
            let tag_type = self.reader.read_tag_type("compound.entry_type")?;
            if tag_type == TagType::End {
                return Ok(compound);
            }
            let name = self.reader.read_string("compound.entry_name")?;
            let tag = self.decode_payload(tag_type)?;
            compound.insert(name, tag);
        }
    }
}

/// Smallest encoded size of one payload of `tag_type`.
fn min_payload_size(tag_type: TagType) -> usize {
    match tag_type {
        TagType::End => 0,
        TagType::Byte | TagType::Compound => 1,
        TagType::Short | TagType::String => 2,
        TagType::Int | TagType::Float => 4,
        TagType::ByteArray | TagType::IntArray | TagType::LongArray => 4,
        TagType::List => 5,
        TagType::Long | TagType::Double => 8,
    }
}

/// Elements to reserve for a list whose header claims `count` entries.
///
/// Bounded by what the remaining input could hold and by
/// [`MAX_LIST_PREALLOC`]; longer lists grow as elements are decoded.
fn list_capacity(element_type: TagType, count: usize, remaining: usize) -> usize {
    let fits = remaining / min_payload_size(element_type).max(1);
    count.min(fits).min(MAX_LIST_PREALLOC)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::codec::Writer;
    use crate::fixtures::{encode_root, gzip, string};

    fn diamond() -> Vec<u8> {
        let mut w = Writer::new();
        w.write_entry_header(TagType::Compound, "");
        w.write_entry_header(TagType::String, "id");
        w.write_string("DIAMOND");
        w.write_end();
        w.into_bytes()
    }

    #[test]
    fn test_decode_compound_string() {
        let root = decode(&diamond()).unwrap();
        let id = root.as_compound().and_then(|c| c.get("id")).and_then(Tag::as_string);
        assert_eq!(id, Some("DIAMOND"));
    }

    #[test]
    fn test_root_name_discarded() {
        let mut w = Writer::new();
        w.write_entry_header(TagType::Int, "ignored name");
        w.write_i32(42);
        assert_eq!(decode(w.as_bytes()).unwrap(), Tag::Int(42));
    }

    #[test]
    fn test_decode_int_list() {
        let mut w = Writer::new();
        w.write_entry_header(TagType::List, "");
        w.write_byte(TagType::Int as u8);
        w.write_i32(3);
        for v in [1, 2, 3] {
            w.write_i32(v);
        }

        let root = decode(w.as_bytes()).unwrap();
        let list = root.as_list().unwrap();
        assert_eq!(list.element_type(), TagType::Int);
        assert_eq!(list.values(), &[Tag::Int(1), Tag::Int(2), Tag::Int(3)]);
    }

    #[test]
    fn test_decode_every_kind() {
        let compound: Compound = [
            ("b", Tag::Byte(-1)),
            ("s", Tag::Short(-300)),
            ("i", Tag::Int(70_000)),
            ("l", Tag::Long(-5_000_000_000)),
            ("f", Tag::Float(0.5)),
            ("d", Tag::Double(-0.25)),
            ("ba", Tag::ByteArray(vec![0, 255, 7])),
            ("str", string("text")),
            ("ia", Tag::IntArray(vec![-1, 0, 1])),
            ("la", Tag::LongArray(vec![i64::MIN, i64::MAX])),
            ("empty", Tag::List(List::empty(TagType::End))),
            ("nested", Tag::Compound(Compound::new())),
        ]
        .into_iter()
        .collect();
        let root = Tag::Compound(compound);

        assert_eq!(decode(&encode_root(&root)).unwrap(), root);
    }

    #[test]
    fn test_gzip_detected() {
        let raw = diamond();
        let wrapped = gzip(&raw);
        assert!(is_gzip(&wrapped));
        assert!(!is_gzip(&raw));
        assert_eq!(decompress(&wrapped).unwrap(), raw);
        assert_eq!(decode(&wrapped).unwrap(), decode(&raw).unwrap());
    }

    #[test]
    fn test_corrupt_gzip() {
        let mut wrapped = gzip(&diamond());
        let len = wrapped.len();
        wrapped[len - 5] ^= 0xFF; // damage the CRC trailer
        assert!(matches!(decode(&wrapped), Err(DecodeError::DecompressionFailed(_))));

        let wrapped = gzip(&diamond());
        let truncated = &wrapped[..wrapped.len() - 1];
        assert!(decode(truncated).is_err());
    }

    #[test]
    fn test_multi_member_gzip() {
        let raw = diamond();
        let (head, tail) = raw.split_at(raw.len() / 2);
        let mut joined = gzip(head);
        joined.extend_from_slice(&gzip(tail));

        assert_eq!(decompress(&joined).unwrap(), raw);
        assert_eq!(decode(&joined).unwrap(), decode(&raw).unwrap());
    }

    #[test]
    fn test_list_capacity_bounded() {
        assert_eq!(list_capacity(TagType::Int, 3, 12), 3);
        assert_eq!(list_capacity(TagType::Long, usize::MAX, 80), 10);
        assert_eq!(list_capacity(TagType::Compound, usize::MAX, 1 << 24), MAX_LIST_PREALLOC);
        assert_eq!(list_capacity(TagType::End, 0, 100), 0);
    }

    #[test]
    fn test_huge_list_count_is_truncation() {
        let mut w = Writer::new();
        w.write_entry_header(TagType::List, "");
        w.write_byte(TagType::Compound as u8);
        w.write_i32(i32::MAX);
        for _ in 0..64 {
            w.write_end();
        }
        assert_eq!(
            decode(w.as_bytes()),
            Err(DecodeError::UnexpectedEof { context: "compound.entry_type" })
        );
    }

    #[test]
    fn test_root_end() {
        assert_eq!(decode(&[0x00]).unwrap(), Tag::End);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            decode(&[]),
            Err(DecodeError::UnexpectedEof { context: "root type" })
        );
    }

    #[test]
    fn test_unknown_tag_type() {
        let mut w = Writer::new();
        w.write_entry_header(TagType::Compound, "");
        w.write_byte(0x0D);
        w.write_string("x");
        assert_eq!(
            decode(w.as_bytes()),
            Err(DecodeError::InvalidTagType {
                tag_type: 0x0D,
                context: "compound.entry_type"
            })
        );
    }

    #[test]
    fn test_non_empty_end_list() {
        let mut w = Writer::new();
        w.write_entry_header(TagType::List, "");
        w.write_byte(TagType::End as u8);
        w.write_i32(2);
        assert!(matches!(
            decode(w.as_bytes()),
            Err(DecodeError::MalformedEncoding { .. })
        ));
    }

    #[test]
    fn test_negative_lengths() {
        for tag_type in [TagType::ByteArray, TagType::IntArray, TagType::LongArray] {
            let mut w = Writer::new();
            w.write_entry_header(tag_type, "");
            w.write_i32(-4);
            assert!(matches!(
                decode(w.as_bytes()),
                Err(DecodeError::NegativeLength { len: -4, .. })
            ));
        }
    }

    #[test]
    fn test_huge_array_length_is_truncation() {
        let mut w = Writer::new();
        w.write_entry_header(TagType::LongArray, "");
        w.write_i32(i32::MAX);
        w.write_i64(1);
        assert_eq!(
            decode(w.as_bytes()),
            Err(DecodeError::UnexpectedEof { context: "long_array" })
        );
    }

    #[test]
    fn test_nesting_limit() {
        let mut w = Writer::new();
        w.write_entry_header(TagType::List, "");
        for _ in 0..=MAX_DEPTH {
            w.write_byte(TagType::List as u8);
            w.write_i32(1);
        }
        assert_eq!(
            decode(w.as_bytes()),
            Err(DecodeError::NestingTooDeep { max: MAX_DEPTH })
        );
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut bytes = diamond();
        bytes.extend_from_slice(&[0xAB, 0xCD]);
        assert_eq!(decode(&bytes).unwrap(), decode(&diamond()).unwrap());
    }

    fn arb_leaf() -> impl Strategy<Value = Tag> {
        prop_oneof![
            any::<i8>().prop_map(Tag::Byte),
            any::<i16>().prop_map(Tag::Short),
            any::<i32>().prop_map(Tag::Int),
            any::<i64>().prop_map(Tag::Long),
            (-1.0e6f32..1.0e6f32).prop_map(Tag::Float),
            (-1.0e12f64..1.0e12f64).prop_map(Tag::Double),
            prop::collection::vec(any::<u8>(), 0..8).prop_map(Tag::ByteArray),
            "[a-zA-Z0-9 _:]{0,12}".prop_map(Tag::String),
            prop::collection::vec(any::<i32>(), 0..4).prop_map(Tag::IntArray),
            prop::collection::vec(any::<i64>(), 0..4).prop_map(Tag::LongArray),
        ]
    }

    fn arb_compound() -> impl Strategy<Value = Tag> {
        arb_leaf().prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(("[a-zA-Z]{1,8}", inner.clone()), 0..4)
                    .prop_map(|entries| Tag::Compound(entries.into_iter().collect())),
                prop::collection::vec(inner, 0..4).prop_map(|values| {
                    // Wrap each element so the list stays homogeneous.
                    let wrapped = values
                        .into_iter()
                        .map(|v| Tag::Compound([("v", v)].into_iter().collect()))
                        .collect();
                    Tag::List(List::from_decoded(TagType::Compound, wrapped))
                }),
            ]
        })
        .prop_map(|tag| Tag::Compound([("root", tag)].into_iter().collect()))
    }

    proptest! {
        #[test]
        fn prop_gzip_and_raw_decode_identically(root in arb_compound()) {
            let raw = encode_root(&root);
            let from_raw = decode(&raw).unwrap();
            let from_gzip = decode(&gzip(&raw)).unwrap();
            prop_assert_eq!(&from_raw, &root);
            prop_assert_eq!(from_gzip, from_raw);
        }

        #[test]
        fn prop_any_truncation_fails(root in arb_compound()) {
            let raw = encode_root(&root);
            for cut in 0..raw.len() {
                prop_assert!(decode(&raw[..cut]).is_err(), "prefix of {} bytes decoded", cut);
            }
        }

        #[test]
        fn prop_arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            let _ = decode(&bytes);
        }
    }
}
