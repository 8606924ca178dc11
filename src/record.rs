//! record: lazily materialized data descriptor.
//!
//! A `Record<F>` is built cheaply from a `Descriptor`. The first
//! `ensure_loaded` seeks to the record, and either decodes `F` straight from
//! the stored bytes or, for a special element, reads the 2-byte special code
//! and runs the compressed or chunked protocol:
//!
//! - SPECIAL_COMP: header points at a DFTAG_COMPRESSED block; the block is
//!   resolved through the directory, inflated, and `F` is decoded from the
//!   inflated bytes.
//! - SPECIAL_CHUNKED: header describes a chunked array; the chunk table is
//!   resolved and every chunk location is surfaced in `ChunkedLayout`.
//!
//! State moves Pending -> Loaded | Degraded at most once. An error leaves the
//! record Pending so the caller may retry.

use std::fmt;
use std::io::{self, Read, Seek};

use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, warn};

use crate::consts::{tag_name, SPECIAL_CHUNKED, SPECIAL_COMP};
use crate::descriptor::Descriptor;
use crate::dir::Directory;
use crate::error::{RecordError, Result, Unsupported};
use crate::extension::{chunked, compressed, ChunkedLayout};
use crate::id::RecordId;
use crate::metrics;

/// Format-specific field decoding of one record kind.
///
/// `src` starts at the first byte of the record's field data; `len` is the
/// logical length available. Must not assume anything about absolute stream
/// positions. Malformed content is reported as `io::ErrorKind::InvalidData`.
pub trait DecodeFields: Sized {
    fn decode_fields<S: Read>(src: &mut S, len: u64) -> io::Result<Self>;
}

/// What a loaded record holds.
#[derive(Debug, Clone)]
pub enum Content<F> {
    Fields(F),
    Chunked(ChunkedLayout),
}

#[derive(Debug, Clone)]
pub enum LoadState<F> {
    Pending,
    Loaded(Content<F>),
    /// Loaded without field data: the special element is not supported.
    Degraded(Unsupported),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Degraded(Unsupported),
}

enum Step<F> {
    Done(Content<F>),
    Unsupported(Unsupported),
}

pub struct Record<F> {
    desc: Descriptor,
    /// 0 until the compressed header has been read.
    uncompressed_len: u32,
    state: LoadState<F>,
}

impl<F> Record<F> {
    pub fn new(desc: Descriptor) -> Self {
        Self {
            desc,
            uncompressed_len: 0,
            state: LoadState::Pending,
        }
    }

    pub fn id(&self) -> RecordId {
        self.desc.id
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.desc
    }

    pub fn is_extended(&self) -> bool {
        self.desc.extended
    }

    /// Declared length of the stored representation.
    pub fn stored_length(&self) -> u32 {
        self.desc.length
    }

    /// Uncompressed length from a compressed header, if one was read.
    pub fn uncompressed_length(&self) -> Option<u32> {
        (self.uncompressed_len > 0).then_some(self.uncompressed_len)
    }

    /// Logical length: the uncompressed length of a compressed special
    /// element once known, otherwise the stored length. No I/O.
    pub fn length(&self) -> u32 {
        if self.desc.extended && self.uncompressed_len > 0 {
            self.uncompressed_len
        } else {
            self.desc.length
        }
    }

    pub fn is_loaded(&self) -> bool {
        !matches!(self.state, LoadState::Pending)
    }

    pub fn state(&self) -> &LoadState<F> {
        &self.state
    }

    pub fn fields(&self) -> Option<&F> {
        match &self.state {
            LoadState::Loaded(Content::Fields(f)) => Some(f),
            _ => None,
        }
    }

    pub fn chunked(&self) -> Option<&ChunkedLayout> {
        match &self.state {
            LoadState::Loaded(Content::Chunked(c)) => Some(c),
            _ => None,
        }
    }

    pub fn degraded(&self) -> Option<Unsupported> {
        match self.state {
            LoadState::Degraded(u) => Some(u),
            _ => None,
        }
    }

    /// Take the decoded fields out of a loaded record.
    pub fn into_fields(self) -> Result<F> {
        let id = self.desc.id;
        match self.state {
            LoadState::Loaded(Content::Fields(f)) => Ok(f),
            LoadState::Loaded(Content::Chunked(_)) => Err(RecordError::NotFieldData(id)),
            LoadState::Degraded(what) => Err(RecordError::Unsupported { id, what }),
            LoadState::Pending => Err(RecordError::NotLoaded(id)),
        }
    }

    fn outcome(&self) -> Option<LoadOutcome> {
        match self.state {
            LoadState::Pending => None,
            LoadState::Loaded(_) => Some(LoadOutcome::Loaded),
            LoadState::Degraded(u) => Some(LoadOutcome::Degraded(u)),
        }
    }

    /// Stored bytes verbatim (possibly a special header or compressed data).
    /// Independent of the load state.
    pub fn read_raw<R: Read + Seek>(&self, dir: &mut Directory<R>) -> Result<Vec<u8>> {
        let len = self.desc.length as u64;
        dir.seek_to(self.desc.offset)?;
        let mut raw = Vec::new();
        dir.reader().take(len).read_to_end(&mut raw)?;
        if (raw.len() as u64) < len {
            return Err(RecordError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("{}: stored bytes truncated: {} of {}", self.desc, raw.len(), len),
            )));
        }
        Ok(raw)
    }
}

impl<F: DecodeFields> Record<F> {
    /// Materialize the record on first call; later calls are no-ops that report
    /// the same outcome.
    ///
    /// An unsupported special element yields `LoadOutcome::Degraded`, or
    /// `RecordError::Unsupported` with the record left pending when the
    /// directory runs with `strict_extensions`.
    pub fn ensure_loaded<R: Read + Seek>(&mut self, dir: &mut Directory<R>) -> Result<LoadOutcome> {
        if let Some(done) = self.outcome() {
            return Ok(done);
        }

        match self.load(dir) {
            Ok(Step::Done(content)) => {
                self.state = LoadState::Loaded(content);
                metrics::record_load_ok();
                debug!("loaded {} ({})", self.desc, tag_name(self.desc.id.tag));
                Ok(LoadOutcome::Loaded)
            }
            Ok(Step::Unsupported(what)) => {
                if dir.config().strict_extensions {
                    metrics::record_load_failure();
                    return Err(RecordError::Unsupported {
                        id: self.desc.id,
                        what,
                    });
                }
                warn!("{}: {}, record has no field data", self.desc, what);
                metrics::record_load_degraded();
                self.state = LoadState::Degraded(what);
                Ok(LoadOutcome::Degraded(what))
            }
            Err(e) => {
                metrics::record_load_failure();
                debug!("load {} failed: {}", self.desc, e);
                Err(e)
            }
        }
    }

    fn load<R: Read + Seek>(&mut self, dir: &mut Directory<R>) -> Result<Step<F>> {
        let id = self.desc.id;
        dir.seek_to(self.desc.offset)?;

        if !self.desc.extended {
            let len = self.desc.length as u64;
            let fields = F::decode_fields(&mut dir.reader().take(len), len)
                .map_err(|e| decode_error(id, e))?;
            return Ok(Step::Done(Content::Fields(fields)));
        }

        let special = dir.reader().read_u16::<BigEndian>()?;
        match special {
            SPECIAL_COMP => {
                let hdr = compressed::CompressedHeader::read(&mut dir.reader())?;
                // Logical length is known from here on, whatever happens to the payload.
                self.uncompressed_len = hdr.uncompressed_len;
                let Some(level) = hdr.deflate_level else {
                    return Ok(Step::Unsupported(Unsupported::Codec(hdr.codec)));
                };
                let fields = compressed::materialize::<F, R>(dir, id, &hdr, level)?;
                Ok(Step::Done(Content::Fields(fields)))
            }
            SPECIAL_CHUNKED => {
                // 2 bytes of special code are already consumed.
                let available = (self.desc.length as u64).saturating_sub(2);
                let hdr = chunked::ChunkedHeader::read(&mut dir.reader(), available)
                    .map_err(|e| decode_error(id, e))?;
                let layout = chunked::materialize(dir, hdr)?;
                Ok(Step::Done(Content::Chunked(layout)))
            }
            other => Ok(Step::Unsupported(Unsupported::ExtensionKind(other))),
        }
    }
}

/// InvalidData from a decoder means the bytes are nonsense; anything else is
/// a stream failure.
pub(crate) fn decode_error(id: RecordId, e: io::Error) -> RecordError {
    if e.kind() == io::ErrorKind::InvalidData {
        RecordError::Malformed {
            id,
            reason: e.to_string(),
        }
    } else {
        RecordError::Io(e)
    }
}

impl<F> fmt::Display for Record<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.desc, f)
    }
}

impl<F> fmt::Debug for Record<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("desc", &self.desc)
            .field("uncompressed_len", &self.uncompressed_len)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
