//! End-to-end builds: read, decode, merge, fan out, look up.

mod common;

use appconf::domain::models::{EntryKind, Setting};
use appconf::infrastructure::config::fingerprint;
use appconf::{ConfigError, ResourceError};

use common::{fake_builder, lazy_builder, write_document, FULL_DOCUMENT};

#[tokio::test]
async fn test_full_document_builds_with_one_database_error() {
    common::setup_test_logging();
    let file = write_document(FULL_DOCUMENT);

    let outcome = lazy_builder().build_from_path(file.path()).await.unwrap();
    let doc = &outcome.document;

    assert_eq!(doc.app_name, "billing");
    assert_eq!(doc.hash, fingerprint(FULL_DOCUMENT.as_bytes()));
    assert_eq!(doc.entry_count(), 5);

    // reports has no Server
    assert_eq!(outcome.errors.len(), 1);
    match &outcome.errors[0] {
        ConfigError::Init(err) => {
            assert_eq!(err.kind, EntryKind::Database);
            assert_eq!(err.name, "reports");
            match &err.source {
                ResourceError::MissingFields { fields, .. } => assert_eq!(fields, &vec!["Server"]),
                other => panic!("expected MissingFields, got {other:?}"),
            }
        }
        other => panic!("expected Init error, got {other:?}"),
    }

    assert!(doc.database("orders").unwrap().pool().is_ready());
    assert!(doc.database("reports").unwrap().pool().is_failed());
    assert!(doc.service("search").unwrap().client().is_ready());
    assert!(doc.service("ledger").unwrap().client().is_ready());
    assert!(doc.crawler("news").unwrap().collector().is_ready());
}

#[tokio::test]
async fn test_override_and_default_merge_per_entry() {
    let outcome = lazy_builder()
        .build_from_bytes(FULL_DOCUMENT.as_bytes())
        .await
        .unwrap();
    let doc = &outcome.document;

    let search = doc.service("search").unwrap();
    assert_eq!(search.merged_components().client.timeout, Setting::Value(30));
    assert_eq!(
        search.merged_components().client.max_conns_per_host,
        Setting::Value(50)
    );
    assert_eq!(
        search.endpoint_url("query").as_deref(),
        Some("https://search.example.com/v1/query")
    );

    let ledger = doc.service("ledger").unwrap();
    assert_eq!(ledger.merged_components(), &doc.component_configs);
    let client = ledger.client().handle().unwrap();
    assert_eq!(client.settings().timeout.as_secs(), 15);
}

#[tokio::test]
async fn test_failures_do_not_stop_other_entries() {
    let yaml = "
AppName: billing
Databases:
  - Name: bad-one
  - Name: good
  - Name: bad-two
Crawlers:
  - Name: bad-crawl
  - Name: news
";
    let outcome = fake_builder().build_from_bytes(yaml.as_bytes()).await.unwrap();
    let doc = &outcome.document;

    assert!(doc.database("good").unwrap().pool().is_ready());
    assert!(doc.crawler("news").unwrap().collector().is_ready());

    let failed: Vec<(EntryKind, String)> = outcome
        .errors
        .iter()
        .map(|err| match err {
            ConfigError::Init(init) => (init.kind, init.name.clone()),
            other => panic!("expected Init error, got {other:?}"),
        })
        .collect();
    assert_eq!(
        failed,
        vec![
            (EntryKind::Database, "bad-one".to_string()),
            (EntryKind::Database, "bad-two".to_string()),
            (EntryKind::Crawler, "bad-crawl".to_string()),
        ]
    );

    let bad = doc.database("bad-one").unwrap();
    assert!(matches!(
        bad.pool().error().map(|e| &e.source),
        Some(ResourceError::MissingFields { component: "DatabaseConfig", .. })
    ));
}

#[tokio::test]
async fn test_huge_conn_limit_builds_service() {
    let yaml = "
Services:
  - Name: search
    URL: https://search.example.com
    ComponentConfigs:
      Client:
        MaxConnsPerHost: 18446744073709551615
";
    let outcome = lazy_builder().build_from_bytes(yaml.as_bytes()).await.unwrap();

    assert!(outcome.errors.is_empty());
    let search = outcome.document.service("search").unwrap();
    assert_eq!(search.merged_components().client.max_conns_per_host, Setting::Value(usize::MAX));
    let client = search.client().handle().unwrap();
    assert!(client.available_slots().is_some());
    assert!(client.acquire().await.is_some());
}

#[tokio::test]
async fn test_bad_server_port_fails_only_that_database() {
    let yaml = "
Databases:
  - Name: orders
    Scheme: postgres
    Server: db.internal:abc
    Username: svc
    Password: hunter2
    Database: orders
  - Name: replica
    Scheme: postgres
    Server: '[::1]:5433'
    Username: svc
    Password: hunter2
    Database: orders
";
    let outcome = lazy_builder().build_from_bytes(yaml.as_bytes()).await.unwrap();

    assert_eq!(outcome.errors.len(), 1);
    let orders = outcome.document.database("orders").unwrap();
    assert!(matches!(
        orders.pool().error().map(|e| &e.source),
        Some(ResourceError::InvalidSetting { field: "Server", .. })
    ));
    assert!(outcome.document.database("replica").unwrap().pool().is_ready());
}

#[tokio::test]
async fn test_lookup_miss_is_not_found() {
    let outcome = lazy_builder()
        .build_from_bytes(FULL_DOCUMENT.as_bytes())
        .await
        .unwrap();

    let err = outcome.document.crawler("sports").unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { kind: EntryKind::Crawler, .. }));
    assert_eq!(err.to_string(), "crawler config not found: sports");

    // names are scoped to their collection
    assert!(outcome.document.service("orders").is_err());
    assert!(outcome.document.lookup(EntryKind::Database, "orders").is_ok());
}

#[tokio::test]
async fn test_crawler_without_timeout_fails() {
    let outcome = lazy_builder()
        .build_from_bytes(b"Crawlers:\n  - Name: news\n  - Name: sports\n    TimeoutSeconds: soon\n")
        .await
        .unwrap();

    assert_eq!(outcome.errors.len(), 2);
    let news = outcome.document.crawler("news").unwrap();
    assert!(matches!(
        news.collector().error().map(|e| &e.source),
        Some(ResourceError::MissingFields { .. })
    ));
    let sports = outcome.document.crawler("sports").unwrap();
    assert!(matches!(
        sports.collector().error().map(|e| &e.source),
        Some(ResourceError::InvalidSetting { field: "TimeoutSeconds", .. })
    ));
}

#[tokio::test]
async fn test_read_and_decode_failures_abort() {
    let err = lazy_builder()
        .build_from_path("/nonexistent/appconf.yaml")
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));

    let err = lazy_builder()
        .build_from_bytes(b"Services:\n  search:\n    URL: x\n")
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigError::Decode(_)));
}

#[tokio::test]
async fn test_duplicate_names_keep_last() {
    let yaml = "
Services:
  - Name: search
    URL: https://old.example.com
  - Name: search
    URL: https://new.example.com
";
    let outcome = lazy_builder().build_from_bytes(yaml.as_bytes()).await.unwrap();
    assert_eq!(outcome.document.services.len(), 1);
    assert_eq!(
        outcome.document.service("search").unwrap().url,
        "https://new.example.com"
    );
}

#[tokio::test]
async fn test_same_bytes_build_equal_documents() {
    let a = lazy_builder()
        .build_from_bytes(FULL_DOCUMENT.as_bytes())
        .await
        .unwrap();
    let b = lazy_builder()
        .build_from_bytes(FULL_DOCUMENT.as_bytes())
        .await
        .unwrap();

    assert_eq!(a.document.hash, b.document.hash);
    let names = |doc: &appconf::ConfigDocument| {
        doc.entries()
            .iter()
            .map(|e| (e.kind(), e.name().to_string()))
            .collect::<Vec<_>>()
    };
    assert_eq!(names(&a.document), names(&b.document));
    assert_eq!(a.errors.len(), b.errors.len());
}
