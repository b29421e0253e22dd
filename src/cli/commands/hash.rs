//! `appconf hash`: fingerprint a document without decoding it.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::config::DocumentReader;

#[derive(Debug, Serialize)]
pub struct HashOutput {
    pub source: String,
    pub bytes: usize,
    pub hash: String,
}

impl CommandOutput for HashOutput {
    fn to_human(&self) -> String {
        format!("{}  {}", self.hash, self.source)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(path: &Path, json_mode: bool) -> Result<()> {
    let raw = DocumentReader::read_path(path)?;
    let result = HashOutput {
        source: path.display().to_string(),
        bytes: raw.bytes.len(),
        hash: raw.hash.to_string(),
    };
    output(&result, json_mode);
    Ok(())
}
