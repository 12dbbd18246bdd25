use serde::{Deserialize, Serialize};

/// How a dimension the job poster left unconfigured is credited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnconstrainedCredit {
    /// Full weight whenever the candidate has any value for the attribute.
    #[default]
    AwardOnPresence,
    /// No credit for unconfigured dimensions.
    Withhold,
}

/// Policy switches applied uniformly by every component scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub unconstrained_credit: UnconstrainedCredit,
}

impl ScoringPolicy {
    /// Fraction (0..=1) earned against an optional minimum.
    ///
    /// Below the threshold the candidate earns `actual / threshold`; an absent value earns nothing.
    pub(crate) fn threshold_fraction(&self, actual: Option<f64>, threshold: Option<f64>) -> f64 {
        let Some(actual) = actual.filter(|value| value.is_finite()) else {
            return 0.0;
        };

        match threshold {
            Some(threshold) if threshold > 0.0 => (actual / threshold).clamp(0.0, 1.0),
            _ => self.presence_fraction(true),
        }
    }

    /// Fraction earned by an unconfigured dimension, given whether the candidate has a value.
    pub(crate) fn presence_fraction(&self, present: bool) -> f64 {
        match (self.unconstrained_credit, present) {
            (UnconstrainedCredit::AwardOnPresence, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Weights of the five scorers behind the overall match score.
pub mod weights {
    pub const GPA: f64 = 25.0;
    pub const REQUIRED_SKILLS: f64 = 30.0;
    pub const PREFERRED_SKILLS: f64 = 15.0;
    pub const ACADEMIC_MARKS: f64 = 15.0;
    pub const ELIGIBILITY: f64 = 15.0;

    pub const TOTAL: f64 = GPA + REQUIRED_SKILLS + PREFERRED_SKILLS + ACADEMIC_MARKS + ELIGIBILITY;
}

/// Weights of the five factors in the detailed analysis.
pub mod factor_weights {
    pub const SKILLS: u8 = 40;
    pub const EDUCATION: u8 = 20;
    pub const EXPERIENCE: u8 = 15;
    pub const ACADEMIC: u8 = 15;
    pub const YEAR_ELIGIBILITY: u8 = 10;
}
