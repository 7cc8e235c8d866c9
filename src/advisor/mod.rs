//! Scoring and recommendation core.
//!
//! Pure functions over explicit inputs: no I/O, no logging, no shared state.
//! Safe to call from any thread.

pub mod gear;
pub mod models;
pub mod score;
pub mod species;
pub mod windows;

pub use gear::recommend_gear;
pub use models::{
    is_river_like, ConditionSet, DaySunEvents, GearRecommendation, HourlyRecord, ThermalBand,
    TimeWindow, WaterKind, WaterSite,
};
pub use score::{score_breakdown, success_score, ScoreBreakdown};
pub use species::classify;
pub use windows::rank_time_windows;
