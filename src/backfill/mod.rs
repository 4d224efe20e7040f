//! Hourly backfill: window iteration, per-window writes and the run loop.

pub mod runner;
pub mod window;
pub mod worker;

pub use runner::{BackfillRunner, BackfillSummary};
pub use window::{HourlyWindows, Window};
pub use worker::{ReferenceData, WindowCounts, WindowOutcome};
