//! kinds/number_type: DFTAG_NT: [version u8][type u8][width u8][class u8].

use std::io::{self, Read};

use byteorder::ReadBytesExt;

use crate::record::DecodeFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberType {
    pub version: u8,
    /// DFNT_* code of the element type.
    pub number_type: u8,
    /// Width in bits.
    pub width: u8,
    /// Byte order / representation class.
    pub class: u8,
}

impl NumberType {
    pub fn size_in_bytes(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }
}

impl DecodeFields for NumberType {
    fn decode_fields<S: Read>(src: &mut S, len: u64) -> io::Result<Self> {
        if len < 4 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("number type needs 4 bytes, record has {}", len),
            ));
        }
        Ok(Self {
            version: src.read_u8()?,
            number_type: src.read_u8()?,
            width: src.read_u8()?,
            class: src.read_u8()?,
        })
    }
}
