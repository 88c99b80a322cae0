//! List tags: ordered sequences of one element kind.

use std::fmt;

use crate::model::{Tag, TagType};

/// A homogeneous list tag.
///
/// The element kind is kept even when the list is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    element_type: TagType,
    values: Vec<Tag>,
}

impl List {
    /// Creates an empty list of the given element kind.
    pub fn empty(element_type: TagType) -> Self {
        Self {
            element_type,
            values: Vec::new(),
        }
    }

    /// Creates a list, checking that every value has `element_type`.
    ///
    /// Returns `None` for a mixed list or a non-empty list of END.
    pub fn new(element_type: TagType, values: Vec<Tag>) -> Option<Self> {
        if element_type == TagType::End && !values.is_empty() {
            return None;
        }
        if values.iter().any(|v| v.tag_type() != element_type) {
            return None;
        }
        Some(Self {
            element_type,
            values,
        })
    }

    /// Builds a list from values the decoder produced for `element_type`.
    pub(crate) fn from_decoded(element_type: TagType, values: Vec<Tag>) -> Self {
        debug_assert!(values.iter().all(|v| v.tag_type() == element_type));
        Self {
            element_type,
            values,
        }
    }

    pub fn element_type(&self) -> TagType {
        self.element_type
    }

    pub fn values(&self) -> &[Tag] {
        &self.values
    }

    pub fn first(&self) -> Option<&Tag> {
        self.values.first()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.values.iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "List({})[", self.element_type)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")
    }
}
