//! Byte fixtures shared by unit tests.

use std::io::Write;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::write::GzEncoder;

use crate::codec::Writer;
use crate::model::{Compound, List, Tag, TagType};

/// Writes the payload of `tag` (no type id, no name).
pub fn write_payload(w: &mut Writer, tag: &Tag) {
    match tag {
        Tag::End => {}
        Tag::Byte(v) => w.write_i8(*v),
        Tag::Short(v) => w.write_i16(*v),
        Tag::Int(v) => w.write_i32(*v),
        Tag::Long(v) => w.write_i64(*v),
        Tag::Float(v) => w.write_f32(*v),
        Tag::Double(v) => w.write_f64(*v),
        Tag::ByteArray(v) => {
            w.write_i32(v.len() as i32);
            w.write_bytes(v);
        }
        Tag::String(s) => w.write_string(s),
        Tag::List(list) => {
            w.write_byte(list.element_type() as u8);
            w.write_i32(list.len() as i32);
            for value in list {
                write_payload(w, value);
            }
        }
        Tag::Compound(compound) => {
            for name in compound.names() {
                let value = compound.get(name).unwrap();
                w.write_entry_header(value.tag_type(), name);
                write_payload(w, value);
            }
            w.write_end();
        }
        Tag::IntArray(v) => {
            w.write_i32(v.len() as i32);
            for x in v {
                w.write_i32(*x);
            }
        }
        Tag::LongArray(v) => {
            w.write_i32(v.len() as i32);
            for x in v {
                w.write_i64(*x);
            }
        }
    }
}

/// Encodes `tag` as an unnamed root.
pub fn encode_root(tag: &Tag) -> Vec<u8> {
    let mut w = Writer::new();
    if matches!(tag, Tag::End) {
        w.write_end();
    } else {
        w.write_entry_header(tag.tag_type(), "");
        write_payload(&mut w, tag);
    }
    w.into_bytes()
}

pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

pub fn string(s: &str) -> Tag {
    Tag::String(s.to_string())
}

/// Builds an item compound with ExtraAttributes placed under `tag`.
pub fn item(extra: Compound, count: i8) -> Compound {
    let tag: Compound = [("ExtraAttributes", Tag::Compound(extra))].into_iter().collect();
    [
        ("id", Tag::Short(1)),
        ("Count", Tag::Byte(count)),
        ("tag", Tag::Compound(tag)),
    ]
    .into_iter()
    .collect()
}

/// Wraps an item the way auction payloads do: root `{i: [item]}`.
pub fn auction_root(item: Compound) -> Tag {
    let list = List::new(TagType::Compound, vec![Tag::Compound(item)]).unwrap();
    Tag::Compound([("i", Tag::List(list))].into_iter().collect())
}

/// Base64 of the gzip-wrapped auction payload for an item with `id`.
pub fn item_bytes(id: &str, count: i8) -> String {
    let extra: Compound = [("id", string(id))].into_iter().collect();
    STANDARD.encode(gzip(&encode_root(&auction_root(item(extra, count)))))
}

/// Base64 of the gzip-wrapped auction payload for a pet.
pub fn pet_bytes(pet_info: &str) -> String {
    let extra: Compound = [("id", string("PET")), ("petInfo", string(pet_info))]
        .into_iter()
        .collect();
    STANDARD.encode(gzip(&encode_root(&auction_root(item(extra, 1)))))
}
