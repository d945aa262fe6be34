//! Life Chart Temporal - Signal Intersection & Window Ranking Engine
//!
//! This crate aggregates time-bounded influence signals produced by several
//! independent predictive subsystems into a single ranked timeline of notable
//! windows. It is a pure, deterministic, in-process transformation: given the
//! same cycle list and range, the output is byte-identical.

pub mod application;
pub mod domain;

pub use application::{ForecastEngine, ForecastRequest, ForecastResponse};
pub use domain::foundation::{CycleId, LifeDomain, ValidationError};
pub use domain::intersection::{IntersectionAggregator, IntersectionPolicy};
pub use domain::timeline::{Cycle, Granularity, Polarity, SignalSystem, Window, WindowTiler};
