//! Fishing-conditions advisor.
//!
//! `advisor` holds the pure scoring core. `services` fetches weather,
//! hydrology and water sites and feeds them through it.

pub mod advisor;
pub mod cache;
pub mod config;
pub mod errors;
pub mod helpers;
pub mod report;
pub mod services;
