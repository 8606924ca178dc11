//! kinds: concrete record kinds (field layouts) the reader understands.

pub mod chunk_table;
pub mod compressed_block;
pub mod number_type;
pub mod raw;
pub mod version;

pub use chunk_table::{ChunkIndex, ChunkLocation, ChunkTable};
pub use compressed_block::CompressedBlock;
pub use number_type::NumberType;
pub use raw::RawData;
pub use version::VersionInfo;
