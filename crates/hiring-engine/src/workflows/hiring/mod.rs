//! Campus hiring sessions: candidate matching, pool analytics, and the status workflow.

pub mod analytics;
pub mod candidates;
pub mod domain;
pub mod matching;

#[cfg(test)]
mod tests;

pub use candidates::{candidate_router, CandidateWorkflowError, CandidateWorkflowService};
pub use domain::{
    CandidateId, CandidateProfile, CandidateRecord, CandidateStatus, HiringSession, JobCriteria,
    MatchTier, SessionCandidate, SessionId, StudentId,
};
pub use matching::{compute_detailed_analysis, compute_match_score, MatchEngine, MatchResult};
