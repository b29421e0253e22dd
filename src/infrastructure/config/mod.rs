//! Configuration infrastructure
//!
//! - Document reader: fully buffers a source and fingerprints its bytes
//! - Parser: decodes buffered bytes into a `ConfigDocument`
//! - Settings loader: the tool's own settings through figment

pub mod loader;
pub mod parser;
pub mod reader;
pub mod settings;

pub use loader::{SettingsError, SettingsLoader, ENV_PREFIX};
pub use parser::parse_document;
pub use reader::{fingerprint, DocumentReader, RawDocument};
pub use settings::{DatabaseSettings, Settings};
