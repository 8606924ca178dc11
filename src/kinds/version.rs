use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::record::DecodeFields;

/// DFTAG_VERSION: library version that wrote the file.
/// [major u32][minor u32][release u32][description, NUL padded].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub major: u32,
    pub minor: u32,
    pub release: u32,
    pub description: String,
}

impl DecodeFields for VersionInfo {
    fn decode_fields<S: Read>(src: &mut S, len: u64) -> io::Result<Self> {
        if len < 12 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("version record needs 12 bytes, has {}", len),
            ));
        }
        let major = src.read_u32::<BigEndian>()?;
        let minor = src.read_u32::<BigEndian>()?;
        let release = src.read_u32::<BigEndian>()?;

        let mut text = Vec::new();
        src.take(len - 12).read_to_end(&mut text)?;
        let description = String::from_utf8_lossy(&text)
            .trim_end_matches('\0')
            .to_string();

        Ok(Self {
            major,
            minor,
            release,
            description,
        })
    }
}
