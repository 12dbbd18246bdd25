use super::super::domain::{present_text, CandidateProfile, JobCriteria, MatchTier};
use super::config::{factor_weights, ScoringPolicy};
use super::rules::membership_fraction;
use super::skills::{MatchedItem, SkillCoverage};
use serde::{Deserialize, Serialize};

const REQUIRED_SKILL_SHARE: f64 = 0.75;
const PREFERRED_SKILL_SHARE: f64 = 0.25;
const INTERNSHIP_FLOOR: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisFactor {
    Skills,
    Education,
    Experience,
    Academic,
    YearEligibility,
}

impl AnalysisFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Skills => "Skills Match",
            Self::Education => "Education",
            Self::Experience => "Experience",
            Self::Academic => "Academic",
            Self::YearEligibility => "Year Eligibility",
        }
    }
}

/// Factor-specific evidence shown next to the generic matched/missing lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FactorDetail {
    Skills {
        required_matched: usize,
        required_total: usize,
        preferred_matched: usize,
        preferred_total: usize,
    },
    Education {
        eligible_departments: Vec<String>,
        candidate_department: Option<String>,
    },
    Experience {
        required_years: Option<f64>,
        candidate_years: Option<f64>,
        has_internship: bool,
    },
    Academic {
        required_cgpa: Option<f64>,
        candidate_gpa: Option<f64>,
        meets_requirement: bool,
    },
    YearEligibility {
        eligible_years: Vec<String>,
        candidate_year: Option<String>,
        is_eligible: bool,
    },
}

/// One weighted factor of the detailed analysis. `score` is a 0..=100 percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentBreakdown {
    pub factor: AnalysisFactor,
    pub weight: u8,
    pub score: f64,
    #[serde(default)]
    pub matched_items: Vec<MatchedItem>,
    #[serde(default)]
    pub missing_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_items: Vec<String>,
    pub detail: FactorDetail,
}

impl ComponentBreakdown {
    /// Points this factor adds to the overall score.
    pub fn contribution(&self) -> f64 {
        f64::from(self.weight) * self.score / 100.0
    }
}

/// Five-factor analysis of one candidate against one set of criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub overall_score: u8,
    pub tier: MatchTier,
    pub skills: ComponentBreakdown,
    pub education: ComponentBreakdown,
    pub experience: ComponentBreakdown,
    pub academic: ComponentBreakdown,
    pub year_eligibility: ComponentBreakdown,
    pub recommendations: Vec<String>,
}

impl MatchResult {
    pub fn factors(&self) -> [&ComponentBreakdown; 5] {
        [
            &self.skills,
            &self.education,
            &self.experience,
            &self.academic,
            &self.year_eligibility,
        ]
    }
}

pub(crate) fn analyze_profile(
    profile: &CandidateProfile,
    criteria: &JobCriteria,
    policy: &ScoringPolicy,
) -> MatchResult {
    let skills = skills_factor(profile, criteria, policy);
    let education = education_factor(profile, criteria, policy);
    let experience = experience_factor(profile, criteria, policy);
    let academic = academic_factor(profile, criteria, policy);
    let year_eligibility = year_factor(profile, criteria, policy);

    let total: f64 = [&skills, &education, &experience, &academic, &year_eligibility]
        .iter()
        .map(|factor| factor.contribution())
        .sum();
    let overall_score = total.clamp(0.0, 100.0).round() as u8;

    let mut result = MatchResult {
        overall_score,
        tier: MatchTier::for_score(overall_score),
        skills,
        education,
        experience,
        academic,
        year_eligibility,
        recommendations: Vec::new(),
    };
    result.recommendations = super::recommendations::recommend(&result);
    result
}

fn percent(fraction: f64) -> f64 {
    fraction.clamp(0.0, 1.0) * 100.0
}

fn fmt_number(value: f64) -> String {
    format!("{}", (value * 100.0).round() / 100.0)
}

fn skills_factor(
    profile: &CandidateProfile,
    criteria: &JobCriteria,
    policy: &ScoringPolicy,
) -> ComponentBreakdown {
    let required = SkillCoverage::evaluate(&criteria.required_skills, &profile.skills);
    let preferred = SkillCoverage::evaluate(&criteria.preferred_skills, &profile.skills);

    let presence = policy.presence_fraction(profile.has_skills());
    let fraction = REQUIRED_SKILL_SHARE * required.ratio().unwrap_or(presence)
        + PREFERRED_SKILL_SHARE * preferred.ratio().unwrap_or(presence);

    let detail = FactorDetail::Skills {
        required_matched: required.matched.len(),
        required_total: required.total(),
        preferred_matched: preferred.matched.len(),
        preferred_total: preferred.total(),
    };

    let matched_items: Vec<MatchedItem> = required
        .matched
        .into_iter()
        .chain(preferred.matched)
        .collect();
    let additional_items = profile
        .skills
        .iter()
        .filter(|skill| !skill.trim().is_empty())
        .filter(|skill| !matched_items.iter().any(|item| &item.evidence == *skill))
        .cloned()
        .collect();

    ComponentBreakdown {
        factor: AnalysisFactor::Skills,
        weight: factor_weights::SKILLS,
        score: percent(fraction),
        matched_items,
        missing_items: required.missing.into_iter().chain(preferred.missing).collect(),
        additional_items,
        detail,
    }
}

fn education_factor(
    profile: &CandidateProfile,
    criteria: &JobCriteria,
    policy: &ScoringPolicy,
) -> ComponentBreakdown {
    let mut matched_items = Vec::new();
    let mut missing_items = Vec::new();

    let marks = [
        (
            "10th percentage",
            profile.tenth_percentage,
            criteria.min_tenth_percentage,
        ),
        (
            "12th percentage",
            profile.twelfth_percentage,
            criteria.min_twelfth_percentage,
        ),
    ];

    let mut fractions = Vec::with_capacity(3);
    for (name, actual, threshold) in marks {
        fractions.push(policy.threshold_fraction(actual, threshold));
        let Some(threshold) = threshold else {
            continue;
        };
        let requirement = format!("{name} >= {}", fmt_number(threshold));
        match actual {
            Some(value) if value >= threshold => matched_items.push(MatchedItem {
                requirement,
                evidence: fmt_number(value),
            }),
            Some(value) => missing_items.push(format!("{requirement} (has {})", fmt_number(value))),
            None => missing_items.push(format!("{requirement} (not provided)")),
        }
    }

    let department = present_text(&profile.department).map(str::to_string);
    fractions.push(membership_fraction(
        &profile.department,
        &criteria.eligible_departments,
        policy,
    ));
    if !criteria.eligible_departments.is_empty() {
        let requirement = format!(
            "Department in {}",
            criteria.eligible_departments.join(", ")
        );
        match &department {
            Some(value) if criteria.eligible_departments.contains(value) => {
                matched_items.push(MatchedItem {
                    requirement,
                    evidence: value.clone(),
                })
            }
            Some(value) => missing_items.push(format!("{requirement} (has {value})")),
            None => missing_items.push(format!("{requirement} (not provided)")),
        }
    }

    let fraction = fractions.iter().sum::<f64>() / fractions.len() as f64;

    ComponentBreakdown {
        factor: AnalysisFactor::Education,
        weight: factor_weights::EDUCATION,
        score: percent(fraction),
        matched_items,
        missing_items,
        additional_items: Vec::new(),
        detail: FactorDetail::Education {
            eligible_departments: criteria.eligible_departments.clone(),
            candidate_department: department,
        },
    }
}

/// An internship earns at least half credit when the candidate is short on years.
fn experience_factor(
    profile: &CandidateProfile,
    criteria: &JobCriteria,
    policy: &ScoringPolicy,
) -> ComponentBreakdown {
    let has_internship = profile.has_internship == Some(true);
    let years = profile
        .experience_years
        .filter(|value| value.is_finite())
        .map(|value| value.max(0.0));
    let required = criteria.experience_years_required;

    let mut matched_items = Vec::new();
    let mut missing_items = Vec::new();

    let fraction = match required {
        Some(required_years) => {
            let base = policy.threshold_fraction(years, Some(required_years));
            let requirement = format!("{} years of experience", fmt_number(required_years));
            if base >= 1.0 {
                matched_items.push(MatchedItem {
                    requirement,
                    evidence: format!("{} years", fmt_number(years.unwrap_or_default())),
                });
            } else {
                missing_items.push(format!(
                    "{requirement} (has {})",
                    fmt_number(years.unwrap_or_default())
                ));
            }
            if has_internship {
                base.max(INTERNSHIP_FLOOR)
            } else {
                base
            }
        }
        None => policy.presence_fraction(years.is_some() || has_internship),
    };

    if has_internship {
        matched_items.push(MatchedItem {
            requirement: "Internship".to_string(),
            evidence: "completed".to_string(),
        });
    }

    ComponentBreakdown {
        factor: AnalysisFactor::Experience,
        weight: factor_weights::EXPERIENCE,
        score: percent(fraction),
        matched_items,
        missing_items,
        additional_items: Vec::new(),
        detail: FactorDetail::Experience {
            required_years: required,
            candidate_years: years,
            has_internship,
        },
    }
}

fn academic_factor(
    profile: &CandidateProfile,
    criteria: &JobCriteria,
    policy: &ScoringPolicy,
) -> ComponentBreakdown {
    let threshold = criteria.academic_threshold();
    let gpa = profile.gpa.filter(|value| value.is_finite());
    let fraction = policy.threshold_fraction(gpa, threshold);

    let meets_requirement = match (gpa, threshold) {
        (Some(value), Some(required)) => value >= required,
        (Some(_), None) => true,
        (None, _) => false,
    };

    let mut matched_items = Vec::new();
    let mut missing_items = Vec::new();
    if let Some(required) = threshold {
        let requirement = format!("CGPA >= {}", fmt_number(required));
        match gpa {
            Some(value) if meets_requirement => matched_items.push(MatchedItem {
                requirement,
                evidence: fmt_number(value),
            }),
            Some(value) => missing_items.push(format!("{requirement} (has {})", fmt_number(value))),
            None => missing_items.push(format!("{requirement} (not provided)")),
        }
    }

    ComponentBreakdown {
        factor: AnalysisFactor::Academic,
        weight: factor_weights::ACADEMIC,
        score: percent(fraction),
        matched_items,
        missing_items,
        additional_items: Vec::new(),
        detail: FactorDetail::Academic {
            required_cgpa: threshold,
            candidate_gpa: gpa,
            meets_requirement,
        },
    }
}

fn year_factor(
    profile: &CandidateProfile,
    criteria: &JobCriteria,
    policy: &ScoringPolicy,
) -> ComponentBreakdown {
    let year = present_text(&profile.year).map(str::to_string);
    let fraction = membership_fraction(&profile.year, &criteria.eligible_years, policy);
    let is_eligible = match &year {
        Some(value) => {
            criteria.eligible_years.is_empty() || criteria.eligible_years.contains(value)
        }
        None => false,
    };

    let mut matched_items = Vec::new();
    let mut missing_items = Vec::new();
    if !criteria.eligible_years.is_empty() {
        let requirement = format!("Year in {}", criteria.eligible_years.join(", "));
        match &year {
            Some(value) if is_eligible => matched_items.push(MatchedItem {
                requirement,
                evidence: value.clone(),
            }),
            Some(value) => missing_items.push(format!("{requirement} (has {value})")),
            None => missing_items.push(format!("{requirement} (not provided)")),
        }
    }

    ComponentBreakdown {
        factor: AnalysisFactor::YearEligibility,
        weight: factor_weights::YEAR_ELIGIBILITY,
        score: percent(fraction),
        matched_items,
        missing_items,
        additional_items: Vec::new(),
        detail: FactorDetail::YearEligibility {
            eligible_years: criteria.eligible_years.clone(),
            candidate_year: year,
            is_eligible,
        },
    }
}
