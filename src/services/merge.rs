//! Override merge engine.
//!
//! For every entry, the effective component settings are the entry's
//! overrides layered field by field on top of the application defaults:
//! a field set in the override wins, otherwise the default's value is used,
//! otherwise the field stays unset for the consumer to resolve.

use tracing::debug;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::{ClientConfig, ComponentConfig, ConfigDocument, EntryKind};

use super::error_aggregator::ErrorAggregator;

/// Layer client overrides on top of client defaults
pub fn merge_client(overrides: &ClientConfig, defaults: &ClientConfig) -> ClientConfig {
    ClientConfig {
        timeout: overrides.timeout.or(&defaults.timeout),
        idle_conn_timeout: overrides.idle_conn_timeout.or(&defaults.idle_conn_timeout),
        max_idle_conns_per_host: overrides
            .max_idle_conns_per_host
            .or(&defaults.max_idle_conns_per_host),
        max_conns_per_host: overrides.max_conns_per_host.or(&defaults.max_conns_per_host),
        disable_compression: overrides.disable_compression.or(&defaults.disable_compression),
        insecure_skip_verify: overrides
            .insecure_skip_verify
            .or(&defaults.insecure_skip_verify),
    }
}

/// Layer a component block on top of the defaults; no override yields the defaults
pub fn merge_components(
    overrides: Option<&ComponentConfig>,
    defaults: &ComponentConfig,
) -> ComponentConfig {
    match overrides {
        Some(overrides) => ComponentConfig {
            client: merge_client(&overrides.client, &defaults.client),
        },
        None => defaults.clone(),
    }
}

/// Write the merged block into `target`.
///
/// Fails when no destination is supplied.
pub fn merge_into(
    target: Option<&mut ComponentConfig>,
    overrides: Option<&ComponentConfig>,
    defaults: &ComponentConfig,
) -> ConfigResult<()> {
    let target = target.ok_or_else(|| ConfigError::Merge("nil target".to_string()))?;
    *target = merge_components(overrides, defaults);
    Ok(())
}

/// Runs the merge for every entry of a document
pub struct MergeEngine;

impl MergeEngine {
    /// Compute the merged block of every entry independently.
    ///
    /// Failures are recorded and the remaining entries are still merged.
    pub fn apply(document: &mut ConfigDocument, errors: &mut ErrorAggregator) {
        let defaults = &document.component_configs;

        for entry in document.services.values_mut() {
            let result = merge_into(
                Some(&mut entry.merged),
                entry.component_configs.as_ref(),
                defaults,
            );
            record(result, EntryKind::Service, &entry.name, errors);
        }
        for entry in document.databases.values_mut() {
            let result = merge_into(
                Some(&mut entry.merged),
                entry.component_configs.as_ref(),
                defaults,
            );
            record(result, EntryKind::Database, &entry.name, errors);
        }
        for entry in document.crawlers.values_mut() {
            let result = merge_into(
                Some(&mut entry.merged),
                entry.component_configs.as_ref(),
                defaults,
            );
            record(result, EntryKind::Crawler, &entry.name, errors);
        }
    }
}

fn record(result: ConfigResult<()>, kind: EntryKind, name: &str, errors: &mut ErrorAggregator) {
    match result {
        Ok(()) => debug!(%kind, name, "component configs merged"),
        Err(ConfigError::Merge(reason)) => {
            errors.push(ConfigError::Merge(format!("{kind} '{name}': {reason}")));
        }
        Err(err) => errors.push(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ServiceConfig, Setting};

    fn client(timeout: Setting<u64>, max_conns: Setting<usize>) -> ClientConfig {
        ClientConfig {
            timeout,
            max_conns_per_host: max_conns,
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_override_timeout_default_conns() {
        let overrides = client(Setting::Value(30), Setting::Unset);
        let defaults = client(Setting::Value(15), Setting::Value(50));

        let merged = merge_client(&overrides, &defaults);
        assert_eq!(merged.timeout, Setting::Value(30));
        assert_eq!(merged.max_conns_per_host, Setting::Value(50));
        assert_eq!(merged.idle_conn_timeout, Setting::Unset);
    }

    #[test]
    fn test_no_override_yields_defaults() {
        let defaults = ComponentConfig {
            client: client(Setting::Value(15), Setting::Value(50)),
        };
        assert_eq!(merge_components(None, &defaults), defaults);
    }

    #[test]
    fn test_malformed_override_still_wins() {
        let overrides = client(Setting::Malformed("soon".into()), Setting::Unset);
        let defaults = client(Setting::Value(15), Setting::Unset);
        assert_eq!(
            merge_client(&overrides, &defaults).timeout,
            Setting::Malformed("soon".into())
        );
    }

    #[test]
    fn test_merge_into_without_target_fails() {
        let err = merge_into(None, None, &ComponentConfig::default()).unwrap_err();
        match err {
            ConfigError::Merge(reason) => assert_eq!(reason, "nil target"),
            other => panic!("expected Merge error, got {other:?}"),
        }
    }

    #[test]
    fn test_merge_into_overwrites_target() {
        let mut target = ComponentConfig {
            client: client(Setting::Value(99), Setting::Value(99)),
        };
        let defaults = ComponentConfig {
            client: client(Setting::Value(15), Setting::Unset),
        };
        merge_into(Some(&mut target), None, &defaults).unwrap();
        assert_eq!(target, defaults);
    }

    #[test]
    fn test_apply_is_entry_independent() {
        let mut document = ConfigDocument {
            component_configs: ComponentConfig {
                client: client(Setting::Value(15), Setting::Value(50)),
            },
            ..ConfigDocument::default()
        };
        let mut a = ServiceConfig::named("a");
        a.component_configs = Some(ComponentConfig {
            client: client(Setting::Value(30), Setting::Unset),
        });
        document.services.insert("a".into(), a);
        document.services.insert("b".into(), ServiceConfig::named("b"));

        let mut errors = ErrorAggregator::new();
        MergeEngine::apply(&mut document, &mut errors);

        assert!(errors.is_empty());
        assert_eq!(
            document.services["a"].merged_components().client.timeout,
            Setting::Value(30)
        );
        assert_eq!(
            document.services["b"].merged_components().client.timeout,
            Setting::Value(15)
        );
        assert_eq!(
            document.services["b"].merged_components().client.max_conns_per_host,
            Setting::Value(50)
        );
    }
}
