//! Domain layer containing the temporal aggregation logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, ids, errors, calendar math)
//! - `timeline` - Cycle data model, theme vocabulary, and the window tiler
//! - `intersection` - Cross-system temporal intersection aggregator
//! - `forecast` - Window summaries, top-N selection, and domain classification

pub mod forecast;
pub mod foundation;
pub mod intersection;
pub mod timeline;
