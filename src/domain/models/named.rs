//! Decoding of name-keyed collections.
//!
//! Collections appear in the document as sequences; each element's own
//! `Name` field becomes its key. Structural position is irrelevant. When two
//! elements declare the same name the later one wins and a warning is logged.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use tracing::warn;

/// An element that declares its own lookup key
pub trait Named {
    /// Collection label used in diagnostics
    const KIND: &'static str;

    fn name(&self) -> &str;
}

/// Key a decoded sequence by each element's declared name
pub fn key_by_name<T: Named>(items: Vec<T>) -> HashMap<String, T> {
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        let key = item.name().to_string();
        if map.insert(key.clone(), item).is_some() {
            warn!(kind = T::KIND, name = %key, "duplicate name, later entry replaces earlier one");
        }
    }
    map
}

/// `deserialize_with` helper for name-keyed collections; null decodes empty
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<HashMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Named,
{
    let items = Option::<Vec<T>>::deserialize(deserializer)?;
    Ok(key_by_name(items.unwrap_or_default()))
}
