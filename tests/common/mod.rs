// tests/common/mod.rs: synthetic HDF4 fragments and an instrumented stream.

#![allow(dead_code)]

use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, WriteBytesExt};
use flate2::write::ZlibEncoder;
use flate2::Compression;

use hdf4dd::consts::{COMP_CODE_DEFLATE, SPECIAL_CHUNKED, SPECIAL_COMP};
use hdf4dd::{Descriptor, Directory, ReaderConfig};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ------- stream -------

/// Read + Seek over an in-memory file that counts accesses and can be told
/// to fail every read.
pub struct CountingStream {
    inner: Cursor<Vec<u8>>,
    pub seeks: Vec<u64>,
    pub read_calls: usize,
    pub bytes_read: usize,
    pub fail_reads: bool,
}

impl CountingStream {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            inner: Cursor::new(bytes),
            seeks: Vec::new(),
            read_calls: 0,
            bytes_read: 0,
            fail_reads: false,
        }
    }
}

impl Read for CountingStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.fail_reads {
            return Err(io::Error::new(io::ErrorKind::Other, "injected read failure"));
        }
        let n = self.inner.read(buf)?;
        self.read_calls += 1;
        self.bytes_read += n;
        Ok(n)
    }
}

impl Seek for CountingStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let p = self.inner.seek(pos)?;
        self.seeks.push(p);
        Ok(p)
    }
}

// ------- file builder -------

/// Appends record bodies to a byte buffer and hands out their descriptors.
pub struct FileBuilder {
    buf: Vec<u8>,
    descs: Vec<Descriptor>,
}

impl FileBuilder {
    pub fn new() -> Self {
        // Leave room for a file header so that no record sits at offset 0.
        Self {
            buf: vec![0u8; 16],
            descs: Vec::new(),
        }
    }

    pub fn pad_to(&mut self, offset: usize) {
        assert!(offset >= self.buf.len(), "cannot pad backwards");
        self.buf.resize(offset, 0xEE);
    }

    pub fn put(&mut self, tag: u16, reference: u16, body: &[u8], extended: bool) -> Descriptor {
        let d = Descriptor::new(
            tag,
            reference,
            self.buf.len() as u32,
            body.len() as u32,
            extended,
        );
        self.buf.extend_from_slice(body);
        self.descs.push(d);
        d
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.buf.clone()
    }

    pub fn descriptors(&self) -> Vec<Descriptor> {
        self.descs.clone()
    }

    pub fn directory(&self) -> Directory<Cursor<Vec<u8>>> {
        self.directory_with(ReaderConfig::default())
    }

    pub fn directory_with(&self, cfg: ReaderConfig) -> Directory<Cursor<Vec<u8>>> {
        Directory::from_descriptors(Cursor::new(self.bytes()), cfg, self.descriptors())
    }

    pub fn counting_directory(&self) -> Directory<CountingStream> {
        Directory::from_descriptors(
            CountingStream::new(self.bytes()),
            ReaderConfig::default(),
            self.descriptors(),
        )
    }
}

// ------- special headers -------

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::new(6));
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

/// SPECIAL_COMP header including the special code.
pub fn comp_header(uncompressed_len: u32, linked_ref: u16, codec: u16, level: u16) -> Vec<u8> {
    let mut h = Vec::new();
    h.write_u16::<BigEndian>(SPECIAL_COMP).unwrap();
    h.write_u16::<BigEndian>(1).unwrap(); // version
    h.write_u32::<BigEndian>(uncompressed_len).unwrap();
    h.write_u16::<BigEndian>(linked_ref).unwrap();
    h.write_u16::<BigEndian>(0).unwrap(); // model type
    h.write_u16::<BigEndian>(codec).unwrap();
    if codec == COMP_CODE_DEFLATE {
        h.write_u16::<BigEndian>(level).unwrap();
    }
    h
}

pub struct DimSpec {
    pub flags: u32,
    pub length: u32,
    pub chunk_length: u32,
}

/// SPECIAL_CHUNKED header including the special code.
pub fn chunked_header(
    chunk_table: (u16, u16),
    special_table: (u16, u16),
    dims: &[DimSpec],
    fill: &[u8],
) -> Vec<u8> {
    let mut h = Vec::new();
    h.write_u16::<BigEndian>(SPECIAL_CHUNKED).unwrap();
    h.write_u32::<BigEndian>(0).unwrap(); // sp_tag_head_len, informational
    h.write_u8(1).unwrap(); // version
    h.write_u32::<BigEndian>(0).unwrap(); // flags
    let total: u32 = dims.iter().map(|d| d.length).product();
    h.write_u32::<BigEndian>(total).unwrap();
    let chunk: u32 = dims.iter().map(|d| d.chunk_length).product();
    h.write_u32::<BigEndian>(chunk).unwrap();
    h.write_u32::<BigEndian>(4).unwrap(); // nt_size
    h.write_u16::<BigEndian>(chunk_table.0).unwrap();
    h.write_u16::<BigEndian>(chunk_table.1).unwrap();
    h.write_u16::<BigEndian>(special_table.0).unwrap();
    h.write_u16::<BigEndian>(special_table.1).unwrap();
    h.write_u16::<BigEndian>(dims.len() as u16).unwrap();
    for d in dims {
        h.write_u32::<BigEndian>(d.flags).unwrap();
        h.write_u32::<BigEndian>(d.length).unwrap();
        h.write_u32::<BigEndian>(d.chunk_length).unwrap();
    }
    h.write_u32::<BigEndian>(fill.len() as u32).unwrap();
    h.extend_from_slice(fill);
    h
}

/// Chunk table body: [rank u16][count u32] + entries.
pub fn chunk_table(rank: u16, entries: &[(Vec<i32>, u16, u16)]) -> Vec<u8> {
    let mut b = Vec::new();
    b.write_u16::<BigEndian>(rank).unwrap();
    b.write_u32::<BigEndian>(entries.len() as u32).unwrap();
    for (origin, tag, reference) in entries {
        assert_eq!(origin.len(), rank as usize);
        for o in origin {
            b.write_i32::<BigEndian>(*o).unwrap();
        }
        b.write_u16::<BigEndian>(*tag).unwrap();
        b.write_u16::<BigEndian>(*reference).unwrap();
    }
    b
}

/// DFTAG_VERSION body padded to the usual 92 bytes.
pub fn version_body(major: u32, minor: u32, release: u32, text: &str) -> Vec<u8> {
    let mut b = Vec::new();
    b.write_u32::<BigEndian>(major).unwrap();
    b.write_u32::<BigEndian>(minor).unwrap();
    b.write_u32::<BigEndian>(release).unwrap();
    b.extend_from_slice(text.as_bytes());
    b.resize(92, 0);
    b
}
