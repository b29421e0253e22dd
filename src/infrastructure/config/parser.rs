use tracing::{debug, error};

use super::reader::RawDocument;
use crate::domain::errors::ConfigResult;
use crate::domain::models::ConfigDocument;

/// Decode a buffered document.
///
/// Collections are keyed by each entry's declared `Name`; the fingerprint
/// computed by the reader is attached unchanged.
pub fn parse_document(raw: &RawDocument) -> ConfigResult<ConfigDocument> {
    let mut document: ConfigDocument = serde_yaml::from_slice(&raw.bytes).map_err(|err| {
        error!(error = %err, "failed unmarshalling config data");
        err
    })?;
    document.hash = raw.hash.clone();

    debug!(
        app = %document.app_name,
        env = %document.env,
        databases = document.databases.len(),
        services = document.services.len(),
        crawlers = document.crawlers.len(),
        "config document decoded"
    );
    Ok(document)
}
