//! kinds/chunk_table: table of chunk locations referenced by a chunked record.
//!
//! Layout (big-endian):
//! [rank u16][count u32] then count x ([origin i32 x rank][chunk tag u16][chunk ref u16]).

use std::fmt;
use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt};
use serde::Serialize;

use crate::id::RecordId;
use crate::record::DecodeFields;

/// Where one chunk lives: its origin in chunk coordinates and the record
/// holding its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkLocation {
    pub origin: Vec<i32>,
    pub chunk: RecordId,
}

impl fmt::Display for ChunkLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "origin {:?} -> {}", self.origin, self.chunk)
    }
}

/// Ordered, indexable collection of chunk locations.
pub trait ChunkIndex {
    fn entry_count(&self) -> usize;
    fn entry_at(&self, index: usize) -> Option<ChunkLocation>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChunkTable {
    pub rank: u16,
    pub entries: Vec<ChunkLocation>,
}

impl ChunkIndex for ChunkTable {
    fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn entry_at(&self, index: usize) -> Option<ChunkLocation> {
        self.entries.get(index).cloned()
    }
}

impl DecodeFields for ChunkTable {
    fn decode_fields<S: Read>(src: &mut S, len: u64) -> io::Result<Self> {
        let rank = src.read_u16::<BigEndian>()?;
        let count = src.read_u32::<BigEndian>()? as u64;

        let entry_len = rank as u64 * 4 + 4;
        let need = 6 + count * entry_len;
        if need > len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "chunk table: {} entries of rank {} need {} bytes, record has {}",
                    count, rank, need, len
                ),
            ));
        }

        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let mut origin = Vec::with_capacity(rank as usize);
            for _ in 0..rank {
                origin.push(src.read_i32::<BigEndian>()?);
            }
            let tag = src.read_u16::<BigEndian>()?;
            let reference = src.read_u16::<BigEndian>()?;
            entries.push(ChunkLocation {
                origin,
                chunk: RecordId::new(tag, reference),
            });
        }
        Ok(Self { rank, entries })
    }
}
