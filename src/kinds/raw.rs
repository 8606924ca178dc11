use std::io::{self, Read};

use crate::record::DecodeFields;

/// Field data kept as opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawData(pub Vec<u8>);

impl RawData {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl DecodeFields for RawData {
    fn decode_fields<S: Read>(src: &mut S, len: u64) -> io::Result<Self> {
        let mut buf = Vec::new();
        src.take(len).read_to_end(&mut buf)?;
        if (buf.len() as u64) != len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("record data truncated: {} of {} bytes", buf.len(), len),
            ));
        }
        Ok(Self(buf))
    }
}
