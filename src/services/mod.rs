//! Build pipeline services: merge, fan-out, error collection and the
//! builder that runs them in order.

pub mod builder;
pub mod error_aggregator;
pub mod fan_out;
pub mod merge;

pub use builder::{BuildOutcome, ConfigBuilder, Initializers};
pub use error_aggregator::ErrorAggregator;
pub use fan_out::ResourceFanOut;
pub use merge::{merge_client, merge_components, merge_into, MergeEngine};
