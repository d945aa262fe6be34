//! Timeline data model: cycles, theme vocabulary, and window tiling.

pub mod cycle;
pub mod scaffold;
pub mod themes;
pub mod windows;

pub use cycle::{chronological, sort_cycles, Cycle, CycleEvidence, Evidence, EvidenceValue, Polarity, SignalSystem};
pub use themes::Theme;
pub use windows::{Granularity, Window, WindowId, WindowTiler};
