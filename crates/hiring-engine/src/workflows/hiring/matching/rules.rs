use super::super::domain::{CandidateProfile, JobCriteria};
use super::config::{weights, ScoringPolicy};
use super::skills::SkillCoverage;
use serde::{Deserialize, Serialize};

/// Sub-score of one weighted dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub score: f64,
    pub max_weight: f64,
}

impl ComponentScore {
    fn from_fraction(fraction: f64, max_weight: f64) -> Self {
        Self {
            score: fraction.clamp(0.0, 1.0) * max_weight,
            max_weight,
        }
    }

    fn combine(halves: [ComponentScore; 2]) -> Self {
        Self {
            score: halves[0].score + halves[1].score,
            max_weight: halves[0].max_weight + halves[1].max_weight,
        }
    }
}

/// The five sub-scores behind a match score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub gpa: ComponentScore,
    pub required_skills: ComponentScore,
    pub preferred_skills: ComponentScore,
    pub academic_marks: ComponentScore,
    pub eligibility: ComponentScore,
}

impl ScoreBreakdown {
    pub fn components(&self) -> [ComponentScore; 5] {
        [
            self.gpa,
            self.required_skills,
            self.preferred_skills,
            self.academic_marks,
            self.eligibility,
        ]
    }

    pub fn total(&self) -> f64 {
        self.components().iter().map(|component| component.score).sum()
    }

    pub fn max_total(&self) -> f64 {
        self.components()
            .iter()
            .map(|component| component.max_weight)
            .sum()
    }

    /// `round(min(100, total / max * 100))`; every scorer contributes its weight, so `max` is never zero.
    pub fn overall_score(&self) -> u8 {
        let max_total = self.max_total();
        if max_total <= 0.0 {
            return 0;
        }
        ((self.total() / max_total) * 100.0)
            .clamp(0.0, 100.0)
            .round() as u8
    }
}

pub(crate) fn score_profile(
    profile: &CandidateProfile,
    criteria: &JobCriteria,
    policy: &ScoringPolicy,
) -> ScoreBreakdown {
    ScoreBreakdown {
        gpa: score_gpa(profile, criteria, policy),
        required_skills: score_skill_list(
            &criteria.required_skills,
            profile,
            policy,
            weights::REQUIRED_SKILLS,
        ),
        preferred_skills: score_skill_list(
            &criteria.preferred_skills,
            profile,
            policy,
            weights::PREFERRED_SKILLS,
        ),
        academic_marks: score_marks(profile, criteria, policy),
        eligibility: score_eligibility(profile, criteria, policy),
    }
}

fn score_gpa(
    profile: &CandidateProfile,
    criteria: &JobCriteria,
    policy: &ScoringPolicy,
) -> ComponentScore {
    let fraction = policy.threshold_fraction(profile.gpa, criteria.min_gpa);
    ComponentScore::from_fraction(fraction, weights::GPA)
}

/// Linear in matched / required; an empty requirement list falls back to skill presence.
fn score_skill_list(
    requirements: &[String],
    profile: &CandidateProfile,
    policy: &ScoringPolicy,
    weight: f64,
) -> ComponentScore {
    let fraction = SkillCoverage::evaluate(requirements, &profile.skills)
        .ratio()
        .unwrap_or_else(|| policy.presence_fraction(profile.has_skills()));
    ComponentScore::from_fraction(fraction, weight)
}

fn score_marks(
    profile: &CandidateProfile,
    criteria: &JobCriteria,
    policy: &ScoringPolicy,
) -> ComponentScore {
    let half = weights::ACADEMIC_MARKS / 2.0;
    ComponentScore::combine([
        ComponentScore::from_fraction(
            policy.threshold_fraction(profile.tenth_percentage, criteria.min_tenth_percentage),
            half,
        ),
        ComponentScore::from_fraction(
            policy.threshold_fraction(profile.twelfth_percentage, criteria.min_twelfth_percentage),
            half,
        ),
    ])
}

fn score_eligibility(
    profile: &CandidateProfile,
    criteria: &JobCriteria,
    policy: &ScoringPolicy,
) -> ComponentScore {
    let half = weights::ELIGIBILITY / 2.0;
    ComponentScore::combine([
        ComponentScore::from_fraction(
            membership_fraction(&profile.year, &criteria.eligible_years, policy),
            half,
        ),
        ComponentScore::from_fraction(
            membership_fraction(&profile.department, &criteria.eligible_departments, policy),
            half,
        ),
    ])
}

pub(crate) fn membership_fraction(
    value: &Option<String>,
    allowed: &[String],
    policy: &ScoringPolicy,
) -> f64 {
    let value = super::super::domain::present_text(value);
    if allowed.is_empty() {
        return policy.presence_fraction(value.is_some());
    }

    match value {
        Some(value) if allowed.iter().any(|candidate| candidate == value) => 1.0,
        _ => 0.0,
    }
}
