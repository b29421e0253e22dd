use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace};

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::ContentHash;

/// A fully buffered document and the fingerprint of its bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub hash: ContentHash,
}

/// Deterministic digest of raw document bytes
pub fn fingerprint(bytes: &[u8]) -> ContentHash {
    ContentHash::new(hex::encode(Sha256::digest(bytes)))
}

/// Reads a configuration source completely into memory
pub struct DocumentReader;

impl DocumentReader {
    /// Open and drain the file at `path`.
    ///
    /// The file handle is released when this returns, on success or error.
    pub fn read_path(path: impl AsRef<Path>) -> ConfigResult<RawDocument> {
        let path = path.as_ref();
        trace!(path = %path.display(), "loading config");
        let source_name = path.display().to_string();

        let file = File::open(path).map_err(|source| ConfigError::Read {
            source_name: source_name.clone(),
            source,
        })?;
        Self::read_from(&source_name, file)
    }

    /// Drain an arbitrary reader; no partial buffer is returned on failure
    pub fn read_from(source_name: &str, mut reader: impl Read) -> ConfigResult<RawDocument> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| ConfigError::Read {
                source_name: source_name.to_string(),
                source,
            })?;

        let hash = fingerprint(&bytes);
        debug!(source = source_name, bytes = bytes.len(), hash = %hash, "config source read");
        Ok(RawDocument { bytes, hash })
    }
}
