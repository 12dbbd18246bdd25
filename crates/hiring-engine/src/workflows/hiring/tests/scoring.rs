use super::common::*;

use crate::workflows::hiring::domain::{CandidateProfile, JobCriteria, MatchTier};
use crate::workflows::hiring::matching::{
    compute_match_score, weights, MatchEngine, ScoringPolicy, UnconstrainedCredit,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn withholding_engine() -> MatchEngine {
    MatchEngine::new(ScoringPolicy {
        unconstrained_credit: UnconstrainedCredit::Withhold,
    })
}

#[test]
fn worked_scenario_scores_eighty_five() {
    let engine = MatchEngine::default();
    let breakdown = engine.breakdown(&scenario_profile(), &scenario_criteria());

    assert_close(breakdown.gpa.score, 25.0);
    assert_close(breakdown.required_skills.score, 15.0);
    assert_close(breakdown.preferred_skills.score, 15.0);
    assert_close(breakdown.academic_marks.score, 15.0);
    assert_close(breakdown.eligibility.score, 15.0);
    assert_close(breakdown.max_total(), 100.0);

    let score = breakdown.overall_score();
    assert_eq!(score, 85);
    assert_eq!(MatchTier::for_score(score).label(), "Good Match");
    assert_eq!(
        compute_match_score(&scenario_profile(), &scenario_criteria()),
        85
    );
}

#[test]
fn meeting_every_threshold_exactly_scores_one_hundred() {
    let profile = CandidateProfile {
        skills: strings(&["python", "Java", "SQL"]),
        gpa: Some(7.5),
        tenth_percentage: Some(80.0),
        twelfth_percentage: Some(80.0),
        ..scenario_profile()
    };

    assert_eq!(compute_match_score(&profile, &scenario_criteria()), 100);
}

#[test]
fn unconstrained_criteria_award_full_credit_for_present_attributes() {
    let score = compute_match_score(&scenario_profile(), &JobCriteria::default());
    assert_eq!(score, 100);
}

#[test]
fn unconstrained_criteria_give_nothing_for_absent_attributes() {
    let score = compute_match_score(&CandidateProfile::default(), &JobCriteria::default());
    assert_eq!(score, 0);
}

#[test]
fn withhold_policy_gives_no_credit_to_unconfigured_dimensions() {
    let engine = withholding_engine();
    assert_eq!(
        engine.score(&scenario_profile(), &JobCriteria::default()),
        0
    );

    // Configured dimensions are scored the same under either policy.
    assert_eq!(engine.score(&scenario_profile(), &scenario_criteria()), 85);
}

#[test]
fn matching_half_the_required_skills_earns_half_the_weight() {
    let criteria = JobCriteria {
        required_skills: strings(&["Rust", "Go", "Kotlin", "Scala"]),
        ..scenario_criteria()
    };
    let profile = CandidateProfile {
        skills: strings(&["rust", "Go"]),
        ..scenario_profile()
    };

    let breakdown = MatchEngine::default().breakdown(&profile, &criteria);
    assert_close(breakdown.required_skills.score, 15.0);
    assert_close(breakdown.required_skills.max_weight, weights::REQUIRED_SKILLS);
}

#[test]
fn skill_matching_uses_containment() {
    let criteria = JobCriteria {
        required_skills: strings(&["React"]),
        ..JobCriteria::default()
    };
    let profile = CandidateProfile {
        skills: strings(&["React.js"]),
        ..CandidateProfile::default()
    };

    let breakdown = MatchEngine::default().breakdown(&profile, &criteria);
    assert_close(breakdown.required_skills.score, weights::REQUIRED_SKILLS);
}

#[test]
fn raising_gpa_never_lowers_the_gpa_component() {
    let engine = MatchEngine::default();
    let criteria = scenario_criteria();
    let mut previous = 0.0;

    for step in 0..=20 {
        let profile = CandidateProfile {
            gpa: Some(f64::from(step) * 0.5),
            ..scenario_profile()
        };
        let gpa = engine.breakdown(&profile, &criteria).gpa.score;
        assert!(gpa >= previous, "gpa component dropped at step {step}");
        assert!(gpa <= weights::GPA);
        previous = gpa;
    }
}

#[test]
fn below_threshold_marks_earn_proportional_credit() {
    let profile = CandidateProfile {
        tenth_percentage: Some(40.0),
        twelfth_percentage: None,
        ..scenario_profile()
    };

    let breakdown = MatchEngine::default().breakdown(&profile, &scenario_criteria());
    assert_close(breakdown.academic_marks.score, 0.5 * 7.5);
    assert_close(breakdown.academic_marks.max_weight, weights::ACADEMIC_MARKS);
}

#[test]
fn eligibility_halves_are_independent() {
    let profile = CandidateProfile {
        year: Some("2".to_string()),
        ..scenario_profile()
    };

    let breakdown = MatchEngine::default().breakdown(&profile, &scenario_criteria());
    assert_close(breakdown.eligibility.score, 7.5);
}

#[test]
fn malformed_criteria_are_clamped_rather_than_rejected() {
    let criteria = JobCriteria {
        min_gpa: Some(-3.0),
        min_tenth_percentage: Some(250.0),
        min_twelfth_percentage: Some(f64::NAN),
        required_skills: strings(&["  ", "Python", "python"]),
        ..JobCriteria::default()
    };
    let profile = CandidateProfile {
        tenth_percentage: Some(100.0),
        ..scenario_profile()
    };

    let breakdown = MatchEngine::default().breakdown(&profile, &criteria);
    // Negative minimum is dropped, so any GPA earns full credit.
    assert_close(breakdown.gpa.score, weights::GPA);
    // Python is the only surviving requirement.
    assert_close(breakdown.required_skills.score, weights::REQUIRED_SKILLS);
    assert_close(breakdown.academic_marks.score, weights::ACADEMIC_MARKS);
}

#[test]
fn scores_stay_within_bounds_for_extreme_inputs() {
    let engine = MatchEngine::default();
    let profiles = [
        CandidateProfile::default(),
        scenario_profile(),
        CandidateProfile {
            gpa: Some(1_000.0),
            tenth_percentage: Some(-50.0),
            twelfth_percentage: Some(f64::INFINITY),
            ..scenario_profile()
        },
    ];
    let criteria = [
        JobCriteria::default(),
        scenario_criteria(),
        JobCriteria {
            min_gpa: Some(f64::MAX),
            min_tenth_percentage: Some(0.0),
            experience_years_required: Some(-1.0),
            ..scenario_criteria()
        },
    ];

    for profile in &profiles {
        for criteria in &criteria {
            let breakdown = engine.breakdown(profile, criteria);
            assert!(breakdown.overall_score() <= 100);
            assert_close(breakdown.max_total(), 100.0);
            for component in breakdown.components() {
                assert!(component.score >= 0.0);
                assert!(component.score <= component.max_weight);
            }
        }
    }
}
