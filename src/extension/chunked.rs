//! extension/chunked: SPECIAL_CHUNKED header and chunk table discovery.
//!
//! Header after the special code (big-endian):
//! [sp_tag_head_len u32][version u8][flags u32][elem_total_len u32]
//! [chunk_size u32][nt_size u32][chunk_tbl tag u16][chunk_tbl ref u16]
//! [special_tbl tag u16][special_tbl ref u16][ndims u16]
//! ndims x [flags u32][dim_length u32][chunk_length u32]
//! [fill_len u32][fill bytes]
//!
//! Only chunk locations are collected. Chunks are not read or stitched into
//! one array.

use std::io::{self, Read, Seek};

use byteorder::{BigEndian, ReadBytesExt};
use log::debug;
use serde::Serialize;

use crate::dir::Directory;
use crate::error::{RecordError, Result};
use crate::id::RecordId;
use crate::kinds::{ChunkIndex, ChunkLocation, ChunkTable};
use crate::metrics;

const FIXED_LEN: u64 = 31;
const DIM_LEN: u64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkDimension {
    pub flags: u32,
    /// Logical length of the dimension.
    pub length: u32,
    pub chunk_length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedHeader {
    pub header_len: u32,
    pub version: u8,
    pub flags: u32,
    pub total_elements: u32,
    pub chunk_size: u32,
    pub element_size: u32,
    pub chunk_table: RecordId,
    pub special_table: RecordId,
    pub dimensions: Vec<ChunkDimension>,
    pub fill_value: Vec<u8>,
}

fn read_id<S: Read>(src: &mut S) -> io::Result<RecordId> {
    let tag = src.read_u16::<BigEndian>()?;
    let reference = src.read_u16::<BigEndian>()?;
    Ok(RecordId::new(tag, reference))
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

impl ChunkedHeader {
    /// Parse the whole header. `available` is the number of stored bytes left
    /// after the special code and bounds the dimension list and fill value.
    pub fn read<S: Read>(src: &mut S, available: u64) -> io::Result<Self> {
        let header_len = src.read_u32::<BigEndian>()?;
        let version = src.read_u8()?;
        let flags = src.read_u32::<BigEndian>()?;
        let total_elements = src.read_u32::<BigEndian>()?;
        let chunk_size = src.read_u32::<BigEndian>()?;
        let element_size = src.read_u32::<BigEndian>()?;
        let chunk_table = read_id(src)?;
        // Reserved for ghost chunks; kept, never resolved.
        let special_table = read_id(src)?;
        let ndims = src.read_u16::<BigEndian>()? as u64;

        let mut used = FIXED_LEN + ndims * DIM_LEN;
        if used > available {
            return Err(invalid(format!(
                "{} dimensions do not fit in {} header bytes",
                ndims, available
            )));
        }

        let mut dimensions = Vec::with_capacity(ndims as usize);
        for _ in 0..ndims {
            dimensions.push(ChunkDimension {
                flags: src.read_u32::<BigEndian>()?,
                length: src.read_u32::<BigEndian>()?,
                chunk_length: src.read_u32::<BigEndian>()?,
            });
        }

        let fill_len = src.read_u32::<BigEndian>()? as u64;
        used += 4;
        if used + fill_len > available {
            return Err(invalid(format!(
                "fill value of {} bytes overruns header ({} of {} bytes used)",
                fill_len, used, available
            )));
        }
        let mut fill_value = vec![0u8; fill_len as usize];
        src.read_exact(&mut fill_value)?;

        Ok(Self {
            header_len,
            version,
            flags,
            total_elements,
            chunk_size,
            element_size,
            chunk_table,
            special_table,
            dimensions,
            fill_value,
        })
    }
}

/// Chunk metadata of a chunked record: header fields, dimensions in header
/// order and chunk locations in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkedLayout {
    /// Nested header length as declared; informational.
    pub header_len: u32,
    pub version: u8,
    pub flags: u32,
    pub total_elements: u32,
    pub chunk_size: u32,
    pub element_size: u32,
    pub chunk_table: RecordId,
    pub special_table: RecordId,
    pub dimensions: Vec<ChunkDimension>,
    pub fill_value: Vec<u8>,
    pub chunks: Vec<ChunkLocation>,
}

impl ChunkedLayout {
    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// Number of chunks along each dimension (0 where chunk_length is 0).
    pub fn chunks_per_dimension(&self) -> Vec<u32> {
        self.dimensions
            .iter()
            .map(|d| {
                if d.chunk_length == 0 {
                    0
                } else {
                    d.length.div_ceil(d.chunk_length)
                }
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Every entry of `table`, once, in index order.
pub fn surface_chunks<T: ChunkIndex>(table: &T, table_id: RecordId) -> Result<Vec<ChunkLocation>> {
    let count = table.entry_count();
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let loc = table.entry_at(i).ok_or_else(|| RecordError::Malformed {
            id: table_id,
            reason: format!("chunk table entry {} of {} missing", i, count),
        })?;
        debug!("{} chunk {}: {}", table_id, i, loc);
        out.push(loc);
    }
    metrics::record_chunks_surfaced(out.len());
    Ok(out)
}

/// Resolve the chunk table named by `hdr` and build the layout.
///
/// The header has been read completely before this runs; resolving moves the
/// shared cursor.
pub(crate) fn materialize<R: Read + Seek>(
    dir: &mut Directory<R>,
    hdr: ChunkedHeader,
) -> Result<ChunkedLayout> {
    let table: ChunkTable = dir.resolve(hdr.chunk_table)?;
    let chunks = surface_chunks(&table, hdr.chunk_table)?;

    Ok(ChunkedLayout {
        header_len: hdr.header_len,
        version: hdr.version,
        flags: hdr.flags,
        total_elements: hdr.total_elements,
        chunk_size: hdr.chunk_size,
        element_size: hdr.element_size,
        chunk_table: hdr.chunk_table,
        special_table: hdr.special_table,
        dimensions: hdr.dimensions,
        fill_value: hdr.fill_value,
        chunks,
    })
}
