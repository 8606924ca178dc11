// src/dir.rs

use std::collections::BTreeMap;
use std::io::{self, Read, Seek, SeekFrom};

use log::debug;

use crate::config::ReaderConfig;
use crate::descriptor::Descriptor;
use crate::error::{RecordError, Result};
use crate::id::RecordId;
use crate::metrics;
use crate::record::{DecodeFields, Record};

/// Arena of descriptors keyed by `RecordId`, plus the one stream they all live in.
///
/// The directory is the only owner of the stream cursor. Everything that does
/// positioned I/O takes `&mut Directory`, so at most one positioned read is in
/// flight per directory.
pub struct Directory<R> {
    stream: R,
    entries: BTreeMap<RecordId, Descriptor>,
    cfg: ReaderConfig,
    depth: usize,
}

impl<R: Read + Seek> Directory<R> {
    /// Empty directory over `stream`; configuration comes from the environment.
    pub fn new(stream: R) -> Self {
        Self::with_config(stream, ReaderConfig::from_env())
    }

    pub fn with_config(stream: R, cfg: ReaderConfig) -> Self {
        Self {
            stream,
            entries: BTreeMap::new(),
            cfg,
            depth: 0,
        }
    }

    pub fn from_descriptors<I>(stream: R, cfg: ReaderConfig, descriptors: I) -> Self
    where
        I: IntoIterator<Item = Descriptor>,
    {
        let mut dir = Self::with_config(stream, cfg);
        for d in descriptors {
            dir.insert(d);
        }
        dir
    }

    /// Register a descriptor. A later entry with the same id replaces the
    /// earlier one, which is returned.
    pub fn insert(&mut self, d: Descriptor) -> Option<Descriptor> {
        self.entries.insert(d.id, d)
    }

    pub fn descriptor(&self, id: RecordId) -> Option<&Descriptor> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Known ids in ascending (tag, ref) order.
    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.entries.keys().copied()
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.cfg
    }

    pub fn stream_mut(&mut self) -> &mut R {
        &mut self.stream
    }

    pub fn into_inner(self) -> R {
        self.stream
    }

    /// Unloaded handle for a known record. No I/O.
    pub fn record<F: DecodeFields>(&self, id: RecordId) -> Result<Record<F>> {
        self.entries
            .get(&id)
            .map(|d| Record::new(*d))
            .ok_or(RecordError::UnknownRecord(id))
    }

    /// Look up `id`, load it and hand back its fields.
    ///
    /// Used for record-to-record references. Fails when the id is unknown, when
    /// the target degrades (unsupported special element), when it is chunked
    /// metadata instead of field data, or when nesting passes
    /// `max_resolve_depth`.
    pub fn resolve<F: DecodeFields>(&mut self, id: RecordId) -> Result<F> {
        let mut rec = self.record::<F>(id)?;
        if self.depth >= self.cfg.max_resolve_depth {
            return Err(RecordError::ResolveDepthExceeded {
                id,
                depth: self.depth,
            });
        }
        debug!("resolve {} (depth {})", rec.descriptor(), self.depth + 1);

        self.depth += 1;
        let res = rec.ensure_loaded(self);
        self.depth -= 1;
        res?;

        rec.into_fields()
    }

    // ---------- positioned I/O (crate-internal) ----------

    pub(crate) fn seek_to(&mut self, offset: u32) -> Result<()> {
        self.stream.seek(SeekFrom::Start(offset as u64))?;
        metrics::record_seek();
        Ok(())
    }

    /// Sequential reader at the current cursor.
    pub(crate) fn reader(&mut self) -> Metered<&mut R> {
        Metered(&mut self.stream)
    }
}

/// Read adapter that feeds the stream byte counter.
pub(crate) struct Metered<T>(T);

impl<T: Read> Read for Metered<T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.0.read(buf)?;
        metrics::record_bytes_read(n);
        Ok(n)
    }
}
