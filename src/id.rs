//! RecordId: (tag, reference) key of a data descriptor.

use std::fmt;

use serde::Serialize;

use crate::consts::SPECIAL_TAG_BIT;

/// Uniquely names a record inside one file. Compared and hashed by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RecordId {
    pub tag: u16,
    pub reference: u16,
}

impl RecordId {
    pub const fn new(tag: u16, reference: u16) -> Self {
        Self { tag, reference }
    }

    /// True when the tag carries the special-element bit (raw DD tags only).
    #[inline]
    pub fn is_special(&self) -> bool {
        self.tag & SPECIAL_TAG_BIT != 0
    }

    /// Tag with the special-element bit cleared.
    #[inline]
    pub fn base_tag(&self) -> u16 {
        self.tag & !SPECIAL_TAG_BIT
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{}>", self.tag, self.reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn special_bit_and_base_tag() {
        let id = RecordId::new(0x4000 | 702, 7);
        assert!(id.is_special());
        assert_eq!(id.base_tag(), 702);

        let plain = RecordId::new(702, 7);
        assert!(!plain.is_special());
        assert_eq!(plain.base_tag(), 702);
    }

    #[test]
    fn equality_and_hash_by_value() {
        let mut set = HashSet::new();
        set.insert(RecordId::new(40, 1));
        assert!(set.contains(&RecordId::new(40, 1)));
        assert!(!set.contains(&RecordId::new(40, 2)));
        assert_eq!(RecordId::new(15, 3).to_string(), "<15,3>");
    }
}
