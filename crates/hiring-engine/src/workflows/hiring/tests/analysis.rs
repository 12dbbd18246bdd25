use super::common::*;

use crate::workflows::hiring::domain::{CandidateProfile, JobCriteria, MatchTier};
use crate::workflows::hiring::matching::{
    compute_detailed_analysis, AnalysisFactor, FactorDetail, MatchEngine, MatchedItem,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn factor_weights_cover_one_hundred_points() {
    let result = compute_detailed_analysis(&scenario_profile(), &scenario_criteria());
    let total: u32 = result
        .factors()
        .iter()
        .map(|factor| u32::from(factor.weight))
        .sum();
    assert_eq!(total, 100);

    let factors: Vec<AnalysisFactor> = result.factors().iter().map(|factor| factor.factor).collect();
    assert_eq!(
        factors,
        vec![
            AnalysisFactor::Skills,
            AnalysisFactor::Education,
            AnalysisFactor::Experience,
            AnalysisFactor::Academic,
            AnalysisFactor::YearEligibility,
        ]
    );
}

#[test]
fn scenario_analysis_exposes_evidence_per_factor() {
    let result = compute_detailed_analysis(&scenario_profile(), &scenario_criteria());

    assert_close(result.skills.score, 62.5);
    assert_eq!(result.skills.missing_items, vec!["Java".to_string()]);
    assert_eq!(
        result.skills.matched_items,
        vec![
            MatchedItem {
                requirement: "Python".to_string(),
                evidence: "Python".to_string(),
            },
            MatchedItem {
                requirement: "SQL".to_string(),
                evidence: "SQL".to_string(),
            },
        ]
    );
    assert!(result.skills.additional_items.is_empty());

    assert_close(result.education.score, 100.0);
    assert_eq!(result.education.matched_items.len(), 3);
    assert_close(result.experience.score, 0.0);
    assert_close(result.academic.score, 100.0);
    assert_close(result.year_eligibility.score, 100.0);

    assert_eq!(result.overall_score, 70);
    assert_eq!(result.tier, MatchTier::Fair);
}

#[test]
fn recommendations_start_with_the_weakest_factor() {
    let result = compute_detailed_analysis(&scenario_profile(), &scenario_criteria());

    assert_eq!(
        result.recommendations,
        vec![
            "No internship experience recorded".to_string(),
            "Candidate lacks required skill: Java".to_string(),
        ]
    );
}

#[test]
fn unrequested_skills_are_listed_as_additional() {
    let profile = CandidateProfile {
        skills: strings(&["Python", "SQL", "Docker"]),
        ..scenario_profile()
    };

    let result = compute_detailed_analysis(&profile, &scenario_criteria());
    assert_eq!(result.skills.additional_items, vec!["Docker".to_string()]);
}

#[test]
fn internship_lifts_short_experience_to_half_credit() {
    let criteria = JobCriteria {
        experience_years_required: Some(2.0),
        ..scenario_criteria()
    };
    let without_internship = CandidateProfile {
        experience_years: Some(0.5),
        ..scenario_profile()
    };
    let with_internship = CandidateProfile {
        has_internship: Some(true),
        ..without_internship.clone()
    };

    let engine = MatchEngine::default();
    assert_close(engine.analyze(&without_internship, &criteria).experience.score, 25.0);

    let result = engine.analyze(&with_internship, &criteria);
    assert_close(result.experience.score, 50.0);
    assert_eq!(
        result.experience.detail,
        FactorDetail::Experience {
            required_years: Some(2.0),
            candidate_years: Some(0.5),
            has_internship: true,
        }
    );
}

#[test]
fn cgpa_minimum_takes_precedence_over_min_gpa() {
    let criteria = JobCriteria {
        min_gpa: Some(7.0),
        cgpa_minimum: Some(8.5),
        ..scenario_criteria()
    };

    let result = compute_detailed_analysis(&scenario_profile(), &criteria);
    assert_close(result.academic.score, 8.0 / 8.5 * 100.0);
    assert_eq!(
        result.academic.detail,
        FactorDetail::Academic {
            required_cgpa: Some(8.5),
            candidate_gpa: Some(8.0),
            meets_requirement: false,
        }
    );
    assert!(result
        .recommendations
        .contains(&"CGPA 8 below threshold 8.5".to_string()));
}

#[test]
fn excellent_candidates_get_a_single_priority_note() {
    let profile = CandidateProfile {
        skills: strings(&["Python", "Java", "SQL"]),
        has_internship: Some(true),
        ..scenario_profile()
    };

    let result = compute_detailed_analysis(&profile, &scenario_criteria());
    assert_eq!(result.overall_score, 100);
    assert_eq!(result.tier, MatchTier::Excellent);
    assert_eq!(
        result.recommendations,
        vec!["Strong overall match; prioritise for interview".to_string()]
    );
}

#[test]
fn poor_matches_close_with_a_comparison_note() {
    let result = compute_detailed_analysis(&CandidateProfile::default(), &scenario_criteria());

    assert_eq!(result.tier, MatchTier::Poor);
    let last = result.recommendations.last().expect("recommendations present");
    assert!(last.contains("below the 70% fair-match line"));
    assert!(result
        .recommendations
        .contains(&"Year of study not provided".to_string()));
}

#[test]
fn overall_analysis_score_is_bounded() {
    let criteria = JobCriteria {
        experience_years_required: Some(f64::INFINITY),
        cgpa_minimum: Some(42.0),
        ..scenario_criteria()
    };
    let profile = CandidateProfile {
        experience_years: Some(-4.0),
        gpa: Some(99.0),
        ..scenario_profile()
    };

    let result = compute_detailed_analysis(&profile, &criteria);
    assert!(result.overall_score <= 100);
    for factor in result.factors() {
        assert!((0.0..=100.0).contains(&factor.score));
    }
}
