//! Shared domain primitives: errors, numeric helpers, calendar math, ids.

pub mod calendar;
pub mod errors;
pub mod ids;
pub mod life_domain;
pub mod numeric;

pub use errors::ValidationError;
pub use ids::CycleId;
pub use life_domain::LifeDomain;
pub use numeric::{clamp01, round2};
