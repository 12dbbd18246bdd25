use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identifier wrapper for hiring sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Identifier wrapper for a candidate's membership in one session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Identifier wrapper for the student behind a candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structured candidate attributes as produced by profile storage and resume ingestion.
///
/// Skills keep their stored order and casing; analytics relies on first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub tenth_percentage: Option<f64>,
    #[serde(default)]
    pub twelfth_percentage: Option<f64>,
    #[serde(default)]
    pub experience_years: Option<f64>,
    #[serde(default)]
    pub has_internship: Option<bool>,
    /// Compatibility score supplied by the external resume screening service.
    #[serde(default)]
    pub ats_score: Option<f64>,
}

impl CandidateProfile {
    pub fn has_skills(&self) -> bool {
        self.skills.iter().any(|skill| !skill.trim().is_empty())
    }

    pub fn has_year(&self) -> bool {
        present_text(&self.year).is_some()
    }

    pub fn has_department(&self) -> bool {
        present_text(&self.department).is_some()
    }
}

pub(crate) fn present_text(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Requirement configuration attached to a hiring session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobCriteria {
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub min_gpa: Option<f64>,
    #[serde(default)]
    pub min_tenth_percentage: Option<f64>,
    #[serde(default)]
    pub min_twelfth_percentage: Option<f64>,
    #[serde(default)]
    pub eligible_years: Vec<String>,
    #[serde(default)]
    pub eligible_departments: Vec<String>,
    #[serde(default)]
    pub cgpa_minimum: Option<f64>,
    #[serde(default)]
    pub experience_years_required: Option<f64>,
}

pub const MAX_GRADE_POINT: f64 = 10.0;
pub const MAX_PERCENTAGE: f64 = 100.0;

impl JobCriteria {
    /// Clamp user-authored values onto their valid ranges instead of failing the scoring call.
    ///
    /// Non-finite numbers and zero thresholds are treated as "not configured"; blank and
    /// duplicate skills are dropped while keeping the first occurrence.
    pub fn sanitized(&self) -> JobCriteria {
        JobCriteria {
            required_skills: dedup_skills(&self.required_skills),
            preferred_skills: dedup_skills(&self.preferred_skills),
            min_gpa: clamp_threshold("min_gpa", self.min_gpa, MAX_GRADE_POINT),
            min_tenth_percentage: clamp_threshold(
                "min_tenth_percentage",
                self.min_tenth_percentage,
                MAX_PERCENTAGE,
            ),
            min_twelfth_percentage: clamp_threshold(
                "min_twelfth_percentage",
                self.min_twelfth_percentage,
                MAX_PERCENTAGE,
            ),
            eligible_years: dedup_exact(&self.eligible_years),
            eligible_departments: dedup_exact(&self.eligible_departments),
            cgpa_minimum: clamp_threshold("cgpa_minimum", self.cgpa_minimum, MAX_GRADE_POINT),
            experience_years_required: clamp_threshold(
                "experience_years_required",
                self.experience_years_required,
                f64::MAX,
            ),
        }
    }

    /// CGPA bar used by the academic factor; falls back to `min_gpa`.
    pub fn academic_threshold(&self) -> Option<f64> {
        self.cgpa_minimum.or(self.min_gpa)
    }
}

fn clamp_threshold(field: &'static str, value: Option<f64>, upper: f64) -> Option<f64> {
    let raw = value?;
    if !raw.is_finite() {
        debug!(field, "dropping non-finite criteria value");
        return None;
    }

    let clamped = raw.clamp(0.0, upper);
    if clamped != raw {
        debug!(field, raw, clamped, "clamped criteria value");
    }

    if clamped > 0.0 {
        Some(clamped)
    } else {
        None
    }
}

fn dedup_skills(skills: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut kept = Vec::new();
    for skill in skills {
        let trimmed = skill.trim();
        if trimmed.is_empty() {
            continue;
        }
        let folded = trimmed.to_lowercase();
        if seen.contains(&folded) {
            continue;
        }
        seen.push(folded);
        kept.push(trimmed.to_string());
    }
    kept
}

fn dedup_exact(values: &[String]) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();
    for value in values {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !kept.iter().any(|existing| existing == trimmed) {
            kept.push(trimmed.to_string());
        }
    }
    kept
}

/// Candidate status within a session. Exactly five values cross the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Applied,
    Shortlisted,
    Waitlisted,
    Hired,
    Rejected,
}

impl CandidateStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Applied,
            Self::Shortlisted,
            Self::Waitlisted,
            Self::Hired,
            Self::Rejected,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Shortlisted => "shortlisted",
            Self::Waitlisted => "waitlisted",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Shortlisted => "Shortlisted",
            Self::Waitlisted => "Waitlisted",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
        }
    }

    /// Applied candidates are never part of the recruiter's active pipeline.
    pub const fn in_active_pipeline(self) -> bool {
        !matches!(self, Self::Applied)
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a candidate status")]
pub struct UnknownStatus {
    pub value: String,
}

impl FromStr for CandidateStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus {
                value: value.to_string(),
            })
    }
}

/// Qualitative band for a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MatchTier {
    pub const fn ordered() -> [Self; 4] {
        [Self::Excellent, Self::Good, Self::Fair, Self::Poor]
    }

    pub const fn for_score(score: u8) -> Self {
        if score >= 90 {
            Self::Excellent
        } else if score >= 80 {
            Self::Good
        } else if score >= 70 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent Match",
            Self::Good => "Good Match",
            Self::Fair => "Fair Match",
            Self::Poor => "Poor Match",
        }
    }
}

/// A student's membership in a hiring session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCandidate {
    pub id: CandidateId,
    pub session_id: SessionId,
    pub student_id: StudentId,
    pub status: CandidateStatus,
    pub match_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Session membership joined with the candidate's linked profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub candidate: SessionCandidate,
    pub profile: CandidateProfile,
}

/// Hiring campaign as owned by the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiringSession {
    pub id: SessionId,
    pub title: String,
    pub role: String,
    pub criteria: JobCriteria,
    pub target_hires: u32,
    pub current_hires: u32,
}
