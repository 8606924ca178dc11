//! Lightweight global metrics for the reader.
//!
//! Process-wide relaxed atomic counters:
//! - record loads (ok / degraded / failed)
//! - stream access (seeks, bytes read)
//! - inflate (blocks, bytes produced)
//! - chunk tables (chunk locations surfaced)

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// ----- Loads -----
static RECORDS_LOADED: AtomicU64 = AtomicU64::new(0);
static RECORDS_DEGRADED: AtomicU64 = AtomicU64::new(0);
static LOAD_FAILURES: AtomicU64 = AtomicU64::new(0);

// ----- Stream -----
static STREAM_SEEKS: AtomicU64 = AtomicU64::new(0);
static STREAM_BYTES_READ: AtomicU64 = AtomicU64::new(0);

// ----- Inflate -----
static BLOCKS_INFLATED: AtomicU64 = AtomicU64::new(0);
static BYTES_INFLATED: AtomicU64 = AtomicU64::new(0);

// ----- Chunked -----
static CHUNKS_SURFACED: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    pub records_loaded: u64,
    pub records_degraded: u64,
    pub load_failures: u64,

    pub stream_seeks: u64,
    pub stream_bytes_read: u64,

    pub blocks_inflated: u64,
    pub bytes_inflated: u64,

    pub chunks_surfaced: u64,
}

impl MetricsSnapshot {
    /// Average inflated block size in bytes.
    pub fn avg_inflated_block(&self) -> f64 {
        if self.blocks_inflated == 0 {
            0.0
        } else {
            self.bytes_inflated as f64 / self.blocks_inflated as f64
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

// ----- Recorders -----
pub fn record_load_ok() {
    RECORDS_LOADED.fetch_add(1, Ordering::Relaxed);
}
pub fn record_load_degraded() {
    RECORDS_DEGRADED.fetch_add(1, Ordering::Relaxed);
}
pub fn record_load_failure() {
    LOAD_FAILURES.fetch_add(1, Ordering::Relaxed);
}

pub fn record_seek() {
    STREAM_SEEKS.fetch_add(1, Ordering::Relaxed);
}
pub fn record_bytes_read(n: usize) {
    STREAM_BYTES_READ.fetch_add(n as u64, Ordering::Relaxed);
}

pub fn record_inflate(bytes_out: u64) {
    BLOCKS_INFLATED.fetch_add(1, Ordering::Relaxed);
    BYTES_INFLATED.fetch_add(bytes_out, Ordering::Relaxed);
}

pub fn record_chunks_surfaced(n: usize) {
    CHUNKS_SURFACED.fetch_add(n as u64, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        records_loaded: RECORDS_LOADED.load(Ordering::Relaxed),
        records_degraded: RECORDS_DEGRADED.load(Ordering::Relaxed),
        load_failures: LOAD_FAILURES.load(Ordering::Relaxed),

        stream_seeks: STREAM_SEEKS.load(Ordering::Relaxed),
        stream_bytes_read: STREAM_BYTES_READ.load(Ordering::Relaxed),

        blocks_inflated: BLOCKS_INFLATED.load(Ordering::Relaxed),
        bytes_inflated: BYTES_INFLATED.load(Ordering::Relaxed),

        chunks_surfaced: CHUNKS_SURFACED.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    RECORDS_LOADED.store(0, Ordering::Relaxed);
    RECORDS_DEGRADED.store(0, Ordering::Relaxed);
    LOAD_FAILURES.store(0, Ordering::Relaxed);

    STREAM_SEEKS.store(0, Ordering::Relaxed);
    STREAM_BYTES_READ.store(0, Ordering::Relaxed);

    BLOCKS_INFLATED.store(0, Ordering::Relaxed);
    BYTES_INFLATED.store(0, Ordering::Relaxed);

    CHUNKS_SURFACED.store(0, Ordering::Relaxed);
}
