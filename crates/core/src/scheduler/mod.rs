//! Recurring session generation: expand a weekly pattern, classify the
//! occurrences against existing bookings, then preview or commit.

pub mod classifier;
pub mod expander;
pub mod generator;

pub use classifier::classify;
pub use expander::{expand, RecurrencePattern};
pub use generator::{commit, plan, preview, GenerationPlan};
