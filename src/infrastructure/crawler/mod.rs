//! Web-crawl collectors for crawler entries (reqwest)

pub mod collector;

pub use collector::{
    Collector, CollectorInitializer, CrawlError, CrawlLimits, CrawlResponse,
};
