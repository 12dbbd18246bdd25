//! Read projections over a session's candidate pool.

mod export;
mod summary;
pub mod views;

pub use export::{ranking_csv, write_ranking_csv};
pub use summary::{aggregate_pool, CandidatePoolReport, FirstSeenCounter};
pub use views::{
    AcademicStats, ConversionRateEntry, DistributionEntry, PoolAnalytics, ScoreDistribution,
    SessionAnalytics, SessionInfo, SkillFrequencyEntry, StatusCountEntry, TopPerformerEntry,
};
