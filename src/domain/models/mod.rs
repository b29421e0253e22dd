pub mod component;
pub mod crawler;
pub mod database;
pub mod document;
pub mod named;
pub mod resource;
pub mod service;
pub mod setting;

pub use component::{ClientConfig, ComponentConfig};
pub use crawler::{CrawlConfig, CrawlConfigMap};
pub use database::{DatabaseConfig, DatabaseConfigMap, POSTGRES_SCHEME};
pub use document::{ConfigDocument, ContentHash, EntryRef};
pub use named::Named;
pub use resource::{EntryKind, ResourceState};
pub use service::{Endpoint, EndpointMap, ServiceConfig, ServiceConfigMap};
pub use setting::Setting;
