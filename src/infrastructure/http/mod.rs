//! HTTP client construction for service entries (reqwest)

pub mod client;

pub use client::{HttpClient, ReqwestClientFactory, ResolvedClientSettings, DEFAULT_TIMEOUT_SECS};
