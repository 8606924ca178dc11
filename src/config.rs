//! Reader configuration and builder.
//!
//! Tunables live here instead of scattered env lookups:
//! - strict_extensions: unsupported special elements become errors instead of
//!   degraded records (ENV HDF_STRICT_EXTENSIONS).
//! - max_decompressed_bytes: cap on the declared/produced size of an inflated
//!   block (ENV HDF_MAX_DECOMPRESSED_BYTES, default 1 GiB).
//! - max_resolve_depth: how deep record-to-record references may nest
//!   (ENV HDF_MAX_RESOLVE_DEPTH, default 16).

use std::fmt;

/// Configuration consumed by `Directory`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Env: HDF_STRICT_EXTENSIONS = 0|1|true|false (default false)
    pub strict_extensions: bool,

    /// Env: HDF_MAX_DECOMPRESSED_BYTES (usize, default 1 GiB)
    pub max_decompressed_bytes: usize,

    /// Env: HDF_MAX_RESOLVE_DEPTH (usize, default 16)
    pub max_resolve_depth: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            strict_extensions: false,
            max_decompressed_bytes: 1usize << 30,
            max_resolve_depth: 16,
        }
    }
}

fn parse_flag(v: &str) -> bool {
    let s = v.trim().to_ascii_lowercase();
    s == "1" || s == "true" || s == "on" || s == "yes"
}

impl ReaderConfig {
    /// Load configuration from environment variables; unset or unparsable
    /// values keep their defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("HDF_STRICT_EXTENSIONS") {
            cfg.strict_extensions = parse_flag(&v);
        }

        if let Ok(v) = std::env::var("HDF_MAX_DECOMPRESSED_BYTES") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.max_decompressed_bytes = n;
            }
        }

        if let Ok(v) = std::env::var("HDF_MAX_RESOLVE_DEPTH") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.max_resolve_depth = n;
            }
        }

        cfg
    }

    pub fn with_strict_extensions(mut self, on: bool) -> Self {
        self.strict_extensions = on;
        self
    }

    pub fn with_max_decompressed_bytes(mut self, n: usize) -> Self {
        self.max_decompressed_bytes = n;
        self
    }

    pub fn with_max_resolve_depth(mut self, depth: usize) -> Self {
        self.max_resolve_depth = depth;
        self
    }
}

impl fmt::Display for ReaderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ReaderConfig {{ \
             strict_extensions: {}, \
             max_decompressed_bytes: {}, \
             max_resolve_depth: {} \
             }}",
            self.strict_extensions, self.max_decompressed_bytes, self.max_resolve_depth,
        )
    }
}

/// Builder producing a `ReaderConfig`; starts from the environment.
#[derive(Clone, Debug)]
pub struct ReaderBuilder {
    cfg: ReaderConfig,
}

impl Default for ReaderBuilder {
    fn default() -> Self {
        Self {
            cfg: ReaderConfig::from_env(),
        }
    }
}

impl ReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: ReaderConfig::default(),
        }
    }

    pub fn strict_extensions(mut self, on: bool) -> Self {
        self.cfg.strict_extensions = on;
        self
    }

    pub fn max_decompressed_bytes(mut self, n: usize) -> Self {
        self.cfg.max_decompressed_bytes = n;
        self
    }

    pub fn max_resolve_depth(mut self, depth: usize) -> Self {
        self.cfg.max_resolve_depth = depth;
        self
    }

    pub fn build(self) -> ReaderConfig {
        self.cfg
    }
}
