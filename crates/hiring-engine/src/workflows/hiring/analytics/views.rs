use super::super::domain::{CandidateId, CandidateStatus, MatchTier, SessionId, StudentId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCountEntry {
    pub status: CandidateStatus,
    pub status_label: &'static str,
    pub count: usize,
}

/// Score buckets: excellent `[90,100]`, good `[80,90)`, fair `[70,80)`, poor `[0,70)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreDistribution {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
}

impl ScoreDistribution {
    pub fn total(&self) -> usize {
        self.excellent + self.good + self.fair + self.poor
    }

    pub fn count(&self, tier: MatchTier) -> usize {
        match tier {
            MatchTier::Excellent => self.excellent,
            MatchTier::Good => self.good,
            MatchTier::Fair => self.fair,
            MatchTier::Poor => self.poor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillFrequencyEntry {
    pub skill: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionEntry {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionRateEntry {
    pub status: CandidateStatus,
    pub status_label: &'static str,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AcademicStats {
    pub average_gpa: Option<f64>,
    pub average_ats_score: Option<f64>,
    pub internship_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPerformerEntry {
    pub rank: usize,
    pub candidate_id: CandidateId,
    pub student_id: StudentId,
    pub match_score: u8,
    pub tier: MatchTier,
    pub status: CandidateStatus,
    pub skills_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

/// Aggregates over one candidate pool. Lists are complete; see [`PoolAnalytics::truncated`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolAnalytics {
    pub total_candidates: usize,
    pub status_distribution: Vec<StatusCountEntry>,
    pub score_distribution: ScoreDistribution,
    pub skill_frequency: Vec<SkillFrequencyEntry>,
    pub average_skill_count: f64,
    pub academic_stats: AcademicStats,
    pub year_distribution: Vec<DistributionEntry>,
    pub department_distribution: Vec<DistributionEntry>,
    pub conversion_rates: Vec<ConversionRateEntry>,
    pub top_performers: Vec<TopPerformerEntry>,
}

impl PoolAnalytics {
    pub fn status_count(&self, status: CandidateStatus) -> usize {
        self.status_distribution
            .iter()
            .find(|entry| entry.status == status)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    /// Display cut of the skill table and the ranking.
    pub fn truncated(mut self, top_skills: usize, top_performers: usize) -> Self {
        self.skill_frequency.truncate(top_skills);
        self.top_performers.truncate(top_performers);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub session_id: SessionId,
    pub title: String,
    pub role: String,
    pub target_hires: u32,
    pub current_hires: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionAnalytics {
    pub session: SessionInfo,
    pub candidate_stats: PoolAnalytics,
}
