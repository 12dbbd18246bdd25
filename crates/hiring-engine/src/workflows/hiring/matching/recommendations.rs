use super::super::domain::MatchTier;
use super::analysis::{ComponentBreakdown, FactorDetail, MatchResult};

const MAX_SKILL_GAPS: usize = 3;

/// Templated advice, weakest factor first. Factors at full score produce nothing.
pub(crate) fn recommend(result: &MatchResult) -> Vec<String> {
    let mut weak: Vec<&ComponentBreakdown> = result
        .factors()
        .into_iter()
        .filter(|factor| factor.score < 100.0)
        .collect();
    weak.sort_by(|left, right| left.score.total_cmp(&right.score));

    let mut advice = Vec::new();
    if result.tier == MatchTier::Excellent {
        advice.push("Strong overall match; prioritise for interview".to_string());
    }

    for factor in weak {
        advice.extend(factor_advice(factor));
    }

    if result.tier == MatchTier::Poor {
        advice.push(format!(
            "Overall match of {}% is below the 70% fair-match line; compare against stronger candidates",
            result.overall_score
        ));
    }

    advice
}

fn factor_advice(factor: &ComponentBreakdown) -> Vec<String> {
    match &factor.detail {
        FactorDetail::Skills {
            required_matched,
            required_total,
            preferred_total,
            ..
        } => {
            let missing_required = required_total.saturating_sub(*required_matched);
            let (required_gaps, preferred_gaps) = factor
                .missing_items
                .split_at(missing_required.min(factor.missing_items.len()));

            let mut advice: Vec<String> = required_gaps
                .iter()
                .take(MAX_SKILL_GAPS)
                .map(|skill| format!("Candidate lacks required skill: {skill}"))
                .collect();
            if required_gaps.len() > MAX_SKILL_GAPS {
                advice.push(format!(
                    "{} further required skills are missing",
                    required_gaps.len() - MAX_SKILL_GAPS
                ));
            }
            if !preferred_gaps.is_empty() {
                advice.push(format!(
                    "Could strengthen preferred skills: {}",
                    preferred_gaps.join(", ")
                ));
            }
            if *required_total == 0 && *preferred_total == 0 && factor.additional_items.is_empty()
            {
                advice.push("Candidate has not listed any skills".to_string());
            }
            advice
        }
        FactorDetail::Education { .. } => factor
            .missing_items
            .iter()
            .map(|item| format!("Education requirement not met: {item}"))
            .collect(),
        FactorDetail::Experience {
            required_years,
            candidate_years,
            has_internship,
        } => {
            let mut advice = Vec::new();
            match (required_years, candidate_years) {
                (Some(required), Some(actual)) if actual < required => advice.push(format!(
                    "Candidate has {actual} years of experience against {required} required"
                )),
                (Some(required), None) => advice.push(format!(
                    "No experience recorded against {required} years required"
                )),
                _ => {}
            }
            if !has_internship {
                advice.push("No internship experience recorded".to_string());
            }
            advice
        }
        FactorDetail::Academic {
            required_cgpa,
            candidate_gpa,
            meets_requirement,
        } => match (required_cgpa, candidate_gpa) {
            (_, None) => vec!["CGPA not provided".to_string()],
            (Some(required), Some(actual)) if !meets_requirement => {
                vec![format!("CGPA {actual} below threshold {required}")]
            }
            _ => Vec::new(),
        },
        FactorDetail::YearEligibility {
            eligible_years,
            candidate_year,
            is_eligible,
        } => match candidate_year {
            None => vec!["Year of study not provided".to_string()],
            Some(year) if !is_eligible => vec![format!(
                "Year {year} is not among eligible years: {}",
                eligible_years.join(", ")
            )],
            Some(_) => Vec::new(),
        },
    }
}
