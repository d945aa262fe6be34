//! Forecast view: window summaries, top-N selection, domain buckets, and
//! summary bullet text.

pub mod bullets;
pub mod domains;
pub mod selector;
pub mod summary;

pub use domains::DomainBucket;
pub use summary::{WindowSummarizer, WindowSummary, WindowUi};
