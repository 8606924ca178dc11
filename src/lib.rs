//! hdf4dd: lazy, extension-aware reader for HDF4 data descriptors.
//!
//! A `Directory` owns the file stream and the descriptors found in it. A
//! `Record<F>` is a cheap handle that materializes its fields on the first
//! `ensure_loaded`, following SPECIAL_COMP (deflate) and SPECIAL_CHUNKED
//! special elements through the directory.

// Базовые модули
pub mod consts;
pub mod config;
pub mod error;
pub mod metrics;

// Идентификация и размещение записей
pub mod id;
pub mod descriptor;
pub mod dir;

// Ленивая загрузка и special elements
pub mod record;
pub mod extension;

// Конкретные виды записей
pub mod kinds;

// Удобные реэкспорты
pub use config::{ReaderBuilder, ReaderConfig};
pub use descriptor::Descriptor;
pub use dir::Directory;
pub use error::{RecordError, Result, Unsupported};
pub use extension::{ChunkDimension, ChunkedLayout};
pub use id::RecordId;
pub use kinds::{
    ChunkIndex, ChunkLocation, ChunkTable, CompressedBlock, NumberType, RawData, VersionInfo,
};
pub use record::{Content, DecodeFields, LoadOutcome, LoadState, Record};
