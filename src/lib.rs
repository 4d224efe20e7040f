//! Air Backfill - hourly air-pollution history backfill into Postgres
//!
//! This library exposes the core modules for testing and reuse.

pub mod backfill;
pub mod config;
pub mod entity;
pub mod error;
pub mod openweather;
