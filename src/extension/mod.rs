//! extension: special element protocols (compressed, chunked).

pub mod chunked;
pub mod compressed;

pub use chunked::{surface_chunks, ChunkDimension, ChunkedHeader, ChunkedLayout};
pub use compressed::CompressedHeader;
