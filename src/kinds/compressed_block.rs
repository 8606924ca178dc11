//! kinds/compressed_block: DFTAG_COMPRESSED payload.
//!
//! The block holds a zlib stream. Inflation is streamed through a small work
//! buffer and stops with an error as soon as the output passes the limit, so
//! a hostile block cannot make us allocate without bound.

use std::io::{self, Cursor, Read};

use flate2::read::ZlibDecoder;

use crate::metrics;
use crate::record::DecodeFields;

const TMP_BUF: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedBlock {
    data: Vec<u8>,
}

impl CompressedBlock {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn stored_len(&self) -> usize {
        self.data.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Inflated payload as a sequential byte source.
    ///
    /// `level` is the deflate level recorded by the writer; zlib streams are
    /// self-describing, so it does not change decoding.
    pub fn decompress(&self, level: u16) -> io::Result<Cursor<Vec<u8>>> {
        self.decompress_bounded(level, usize::MAX)
    }

    /// Like `decompress`, failing once more than `limit` bytes come out.
    pub fn decompress_bounded(&self, _level: u16, limit: usize) -> io::Result<Cursor<Vec<u8>>> {
        let mut decoder = ZlibDecoder::new(self.data.as_slice());
        let mut out = Vec::with_capacity(std::cmp::min(self.data.len() * 4, 8 * 1024 * 1024));
        let mut tmp = vec![0u8; TMP_BUF];

        loop {
            let n = decoder.read(&mut tmp)?;
            if n == 0 {
                break;
            }
            if out.len() + n > limit {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("inflated data exceeds limit of {} bytes", limit),
                ));
            }
            out.extend_from_slice(&tmp[..n]);
        }

        metrics::record_inflate(out.len() as u64);
        Ok(Cursor::new(out))
    }
}

impl DecodeFields for CompressedBlock {
    fn decode_fields<S: Read>(src: &mut S, len: u64) -> io::Result<Self> {
        let mut data = Vec::new();
        src.take(len).read_to_end(&mut data)?;
        if (data.len() as u64) < len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("compressed block truncated: {} of {} bytes", data.len(), len),
            ));
        }
        Ok(Self { data })
    }
}
