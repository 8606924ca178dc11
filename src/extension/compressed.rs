//! extension/compressed: SPECIAL_COMP header and the indirection to the
//! DFTAG_COMPRESSED block that holds the payload.
//!
//! Header after the special code (big-endian):
//! [version u16][uncompressed_len u32][linked_ref u16][model_type u16][codec u16]
//! followed by [deflate_level u16] only when codec == COMP_CODE_DEFLATE.

use std::io::{self, Read, Seek};

use byteorder::{BigEndian, ReadBytesExt};
use log::debug;

use crate::consts::{COMP_CODE_DEFLATE, DFTAG_COMPRESSED};
use crate::dir::Directory;
use crate::error::{RecordError, Result};
use crate::id::RecordId;
use crate::kinds::CompressedBlock;
use crate::record::{decode_error, DecodeFields};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedHeader {
    pub version: u16,
    pub uncompressed_len: u32,
    pub linked_ref: u16,
    /// Modelling layer; not needed for decoding.
    pub model_type: u16,
    pub codec: u16,
    /// Present only for the deflate codec.
    pub deflate_level: Option<u16>,
}

impl CompressedHeader {
    /// Reads the header fields. Stops after the codec id for any codec other
    /// than deflate, since their parameter blocks are not understood.
    pub fn read<S: Read>(src: &mut S) -> io::Result<Self> {
        let version = src.read_u16::<BigEndian>()?;
        let uncompressed_len = src.read_u32::<BigEndian>()?;
        let linked_ref = src.read_u16::<BigEndian>()?;
        let model_type = src.read_u16::<BigEndian>()?;
        let codec = src.read_u16::<BigEndian>()?;
        let deflate_level = if codec == COMP_CODE_DEFLATE {
            Some(src.read_u16::<BigEndian>()?)
        } else {
            None
        };
        Ok(Self {
            version,
            uncompressed_len,
            linked_ref,
            model_type,
            codec,
            deflate_level,
        })
    }

    /// Id of the block holding the compressed payload.
    pub fn linked_block(&self) -> RecordId {
        RecordId::new(DFTAG_COMPRESSED, self.linked_ref)
    }
}

/// Resolve the linked block, inflate it and decode `F` from the result.
pub(crate) fn materialize<F, R>(
    dir: &mut Directory<R>,
    id: RecordId,
    hdr: &CompressedHeader,
    level: u16,
) -> Result<F>
where
    F: DecodeFields,
    R: Read + Seek,
{
    let limit = dir.config().max_decompressed_bytes;
    let len = hdr.uncompressed_len as u64;
    if len > limit as u64 {
        return Err(RecordError::LimitExceeded {
            id,
            len,
            limit: limit as u64,
        });
    }

    let block_id = hdr.linked_block();
    let block: CompressedBlock = dir.resolve(block_id)?;
    debug!(
        "{}: inflating {} ({} -> {} bytes, level {})",
        id,
        block_id,
        block.stored_len(),
        len,
        level
    );

    let inflated = block
        .decompress_bounded(level, limit)
        .map_err(|source| RecordError::Decompress {
            id: block_id,
            source,
        })?;

    // 0 means the header left the length unset: the whole inflated payload is field data.
    let len = if len == 0 {
        inflated.get_ref().len() as u64
    } else {
        len
    };
    F::decode_fields(&mut inflated.take(len), len).map_err(|e| decode_error(id, e))
}
