//! Candidate to criteria matching: the bounded match score and the five-factor analysis.

mod analysis;
mod config;
mod recommendations;
mod rules;
pub mod skills;

pub use analysis::{AnalysisFactor, ComponentBreakdown, FactorDetail, MatchResult};
pub use config::{factor_weights, weights, ScoringPolicy, UnconstrainedCredit};
pub use rules::{ComponentScore, ScoreBreakdown};
pub use skills::{find_skill, MatchedItem, SkillCoverage};

use super::domain::{CandidateProfile, JobCriteria};

/// Stateless scorer. Safe to share across threads and call concurrently per candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchEngine {
    policy: ScoringPolicy,
}

impl MatchEngine {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    /// The five component sub-scores, after criteria sanitization.
    pub fn breakdown(&self, profile: &CandidateProfile, criteria: &JobCriteria) -> ScoreBreakdown {
        rules::score_profile(profile, &criteria.sanitized(), &self.policy)
    }

    /// Overall match score in `0..=100`.
    pub fn score(&self, profile: &CandidateProfile, criteria: &JobCriteria) -> u8 {
        self.breakdown(profile, criteria).overall_score()
    }

    /// Five-factor breakdown with evidence and recommendations.
    pub fn analyze(&self, profile: &CandidateProfile, criteria: &JobCriteria) -> MatchResult {
        analysis::analyze_profile(profile, &criteria.sanitized(), &self.policy)
    }
}

/// Match score under the default policy.
pub fn compute_match_score(profile: &CandidateProfile, criteria: &JobCriteria) -> u8 {
    MatchEngine::default().score(profile, criteria)
}

/// Detailed analysis under the default policy.
pub fn compute_detailed_analysis(
    profile: &CandidateProfile,
    criteria: &JobCriteria,
) -> MatchResult {
    MatchEngine::default().analyze(profile, criteria)
}
