//! Descriptor: the immutable placement of a record (what a DD entry says).

use std::fmt;

use serde::Serialize;

use crate::id::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    pub id: RecordId,
    /// Absolute offset of the stored bytes (or of the special header).
    pub offset: u32,
    /// Declared length of the stored representation.
    pub length: u32,
    /// Stored bytes are a special-element header, not field data.
    pub extended: bool,
}

impl Descriptor {
    pub fn new(tag: u16, reference: u16, offset: u32, length: u32, extended: bool) -> Self {
        Self {
            id: RecordId::new(tag, reference),
            offset,
            length,
            extended,
        }
    }

    /// Build from a raw DD entry: the special bit of `tag` becomes `extended`
    /// and the stored id keeps only the base tag.
    pub fn from_dd(tag: u16, reference: u16, offset: u32, length: u32) -> Self {
        let raw = RecordId::new(tag, reference);
        Self {
            id: RecordId::new(raw.base_tag(), reference),
            offset,
            length,
            extended: raw.is_special(),
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} offset: {}, length: {}",
            self.id, self.offset, self.length
        )
    }
}
