//! crates/sc_io/src/lib.rs
//! File boundary of the seat calculator.
//!
//! - `loader`: roster and params JSON → validated core types
//! - `canonical_json`: sorted-key compact JSON and atomic writes
//! - `hasher`: SHA-256 over raw or canonical bytes
//!
//! One shared error type (`IoError`) with `From` conversions used across modules.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for sc_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (read, create_dir_all, rename, ...).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON syntax or shape errors, with a JSON Pointer to the offending value.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Input parsed but violates a roster rule (blank name, duplicate, ...).
    #[error("invalid input at {pointer}: {msg}")]
    Invalid { pointer: String, msg: String },

    /// Hashing/canonicalization failures.
    #[error("hash error: {0}")]
    Hash(String),

    /// Input exceeds a size limit.
    #[error("limit exceeded: {0}")]
    Limit(String),
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps no pointer; callers enrich where they know one.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;

pub mod prelude {
    pub use crate::{IoError, IoResult};
    pub use crate::canonical_json::{to_canonical_bytes, write_canonical_file, write_text_file};
    pub use crate::hasher::{sha256_canonical, sha256_hex};
    pub use crate::loader::{load_params, load_params_over, load_roster, LoadedRoster};
}
