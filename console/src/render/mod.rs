//! Pure renderers: domain records in, display text out.
//!
//! Every renderer is deterministic, preserves input order, and emits a
//! designated empty-state line instead of an empty block.

pub mod analytics;
pub mod attendance;
pub mod pyq;
pub mod results;
pub mod timetable;
