//! Cross-system temporal intersection: per-window weighted aggregation of
//! overlapping cycles into synthetic intersection cycles.

pub mod aggregator;
pub mod ledger;
pub mod policy;

pub use aggregator::IntersectionAggregator;
pub use ledger::ThemeLedger;
pub use policy::IntersectionPolicy;
