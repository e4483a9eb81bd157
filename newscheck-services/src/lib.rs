//! Business logic for newscheck
//!
//! - [`NewsAggregator`]: concurrent fan-out over the news upstreams with
//!   per-branch fallback substitution
//! - [`AnalysisService`]: article analysis and claim verification through the AI clients
//! - [`FallbackCatalog`]: immutable fallback content injected into the aggregator
//! - [`NewsCheckConfig`]: environment configuration

pub mod aggregator;
pub mod analysis;
pub mod config;
pub mod fallback;

pub use aggregator::{NewsAggregator, ALL_SOURCES_FAILED, CATEGORY_MAX, FEED_MAX, NO_NEWS_FOUND};
pub use analysis::{placeholder_content, AnalysisService, BOTH_ANALYSES_FAILED};
pub use config::NewsCheckConfig;
pub use fallback::{FallbackCatalog, FallbackEntry};
