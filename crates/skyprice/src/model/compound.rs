//! Compound tags: unordered name to tag maps.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::model::{List, Tag, TagType};

/// Outcome of a typed field lookup on a [`Compound`].
///
/// Keeps a missing field and a present field of the wrong kind apart
/// without raising an error for either.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// The field exists and has the expected kind.
    Present(&'a Tag),
    /// No field with that name.
    Missing,
    /// The field exists but holds another kind.
    WrongType { found: TagType },
}

impl<'a> Lookup<'a> {
    /// Returns the tag if it was present with the expected kind.
    pub fn present(self) -> Option<&'a Tag> {
        match self {
            Lookup::Present(tag) => Some(tag),
            _ => None,
        }
    }
}

/// A compound tag.
///
/// Names are unique; when a stream repeats a name, the later entry wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    entries: FxHashMap<String, Tag>,
}

impl Compound {
    /// Creates an empty compound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a named tag, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, tag: Tag) -> Option<Tag> {
        self.entries.insert(name.into(), tag)
    }

    /// Returns the tag stored under `name`.
    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.entries.get(name)
    }

    /// Returns true if a tag is stored under `name`, whatever its kind.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Looks up `name` and checks its kind in one step.
    pub fn lookup(&self, name: &str, expected: TagType) -> Lookup<'_> {
        match self.entries.get(name) {
            None => Lookup::Missing,
            Some(tag) if tag.tag_type() == expected => Lookup::Present(tag),
            Some(tag) => Lookup::WrongType {
                found: tag.tag_type(),
            },
        }
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Tag::as_string)
    }

    pub fn get_compound(&self, name: &str) -> Option<&Compound> {
        self.get(name).and_then(Tag::as_compound)
    }

    pub fn get_list(&self, name: &str) -> Option<&List> {
        self.get(name).and_then(Tag::as_list)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry names sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<S: Into<String>> FromIterator<(S, Tag)> for Compound {
    fn from_iter<I: IntoIterator<Item = (S, Tag)>>(iter: I) -> Self {
        let mut compound = Compound::new();
        for (name, tag) in iter {
            compound.insert(name, tag);
        }
        compound
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Compound{")?;
        for (i, name) in self.names().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if let Some(tag) = self.entries.get(name) {
                write!(f, "{}: {}", name, tag)?;
            }
        }
        f.write_str("}")
    }
}
