use crate::infra::{
    demo_profiles, demo_session, read_json_argument, InMemoryCandidateRepository,
    InMemorySessionStore,
};
use clap::Args;
use hiring_engine::config::AnalyticsConfig;
use hiring_engine::error::AppError;
use hiring_engine::workflows::hiring::analytics::SessionAnalytics;
use hiring_engine::workflows::hiring::candidates::{BulkUpdateReport, CandidateWorkflowService};
use hiring_engine::workflows::hiring::domain::{
    CandidateId, CandidateProfile, JobCriteria, MatchTier, StudentId,
};
use hiring_engine::workflows::hiring::matching::{MatchEngine, ScoringPolicy};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Write the full candidate ranking to this CSV file.
    #[arg(long)]
    pub(crate) export_csv: Option<PathBuf>,
    /// Number of top performers to print (defaults to 5).
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Print the detailed five-factor analysis for the best-ranked candidate.
    #[arg(long)]
    pub(crate) explain_top: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Candidate profile as inline JSON or a path to a JSON file
    #[arg(long)]
    pub(crate) candidate: String,
    /// Job criteria as inline JSON or a path to a JSON file
    #[arg(long)]
    pub(crate) criteria: String,
    /// Emit the five-factor analysis instead of the component breakdown
    #[arg(long)]
    pub(crate) detailed: bool,
}

pub(crate) fn run_score(args: ScoreArgs, policy: ScoringPolicy) -> Result<(), AppError> {
    let ScoreArgs {
        candidate,
        criteria,
        detailed,
    } = args;

    let profile: CandidateProfile = read_json_argument(&candidate)?;
    let criteria: JobCriteria = read_json_argument(&criteria)?;
    let engine = MatchEngine::new(policy);

    if detailed {
        let result = engine.analyze(&profile, &criteria);
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let breakdown = engine.breakdown(&profile, &criteria);
    let score = breakdown.overall_score();
    println!("Match score: {} ({})", score, MatchTier::for_score(score).label());
    let rows = [
        ("GPA", breakdown.gpa),
        ("Required skills", breakdown.required_skills),
        ("Preferred skills", breakdown.preferred_skills),
        ("Academic marks", breakdown.academic_marks),
        ("Eligibility", breakdown.eligibility),
    ];
    for (name, component) in rows {
        println!(
            "- {}: {:.2} / {:.0}",
            name, component.score, component.max_weight
        );
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs, policy: ScoringPolicy) -> Result<(), AppError> {
    let DemoArgs {
        export_csv,
        top,
        explain_top,
    } = args;

    let session = demo_session();
    let session_id = session.id.clone();
    let sessions = Arc::new(InMemorySessionStore::with_sessions([session]));
    let service = CandidateWorkflowService::new(
        Arc::new(InMemoryCandidateRepository::default()),
        sessions.clone(),
        sessions,
        MatchEngine::new(policy),
    )
    .with_analytics(AnalyticsConfig {
        top_performers: top.unwrap_or(5),
        ..AnalyticsConfig::default()
    });

    println!("Campus hiring demo");
    let mut ids: Vec<CandidateId> = Vec::new();
    for (student_id, profile) in demo_profiles() {
        let record =
            service.add_candidate(&session_id, StudentId(student_id.to_string()), profile)?;
        println!(
            "- added {} ({}) with match score {}",
            record.candidate.id, student_id, record.candidate.match_score
        );
        ids.push(record.candidate.id);
    }

    let mut shortlist = service
        .pool_analytics(&session_id)?
        .top_performers
        .into_iter()
        .filter(|entry| entry.match_score >= 70)
        .map(|entry| entry.candidate_id)
        .collect::<Vec<_>>();
    shortlist.push(CandidateId("cand-withdrawn".to_string()));

    println!("\nBulk shortlist");
    let report = service.bulk_update_uniform(
        &shortlist,
        "shortlisted",
        Some("cleared resume screen".to_string()),
    );
    render_bulk_report(&report);

    if let Some(best) = shortlist.first().filter(|id| ids.contains(id)) {
        service.update_status(best, "hired", Some("offer accepted".to_string()))?;
        println!("- hired {best}");
        if explain_top {
            let analysis = service.detailed_analysis(&session_id, best)?;
            println!("\nFive-factor analysis for {best}");
            for factor in analysis.factors() {
                println!(
                    "  - {} (weight {}): {:.1}%",
                    factor.factor.label(),
                    factor.weight,
                    factor.score
                );
            }
            for advice in &analysis.recommendations {
                println!("  * {advice}");
            }
        }
    }

    let analytics = service.session_analytics(&session_id)?;
    render_analytics(&analytics);

    if let Some(path) = export_csv {
        let csv = service.export_ranking(&session_id)?;
        std::fs::write(&path, csv)?;
        println!("\nRanking exported to {}", path.display());
    }

    Ok(())
}

fn render_bulk_report(report: &BulkUpdateReport) {
    println!(
        "- {} of {} candidates updated",
        report.updated_count, report.attempted_count
    );
    for failure in &report.failures {
        println!("  - {} skipped: {}", failure.candidate_id, failure.reason);
    }
}

fn render_analytics(analytics: &SessionAnalytics) {
    let session = &analytics.session;
    let stats = &analytics.candidate_stats;

    println!("\nSession analytics: {} ({})", session.title, session.role);
    println!(
        "- hires {} of {} | {} candidates | {:.1} skills on average",
        session.current_hires, session.target_hires, stats.total_candidates, stats.average_skill_count
    );

    println!("\nStatus distribution");
    for (entry, rate) in stats.status_distribution.iter().zip(&stats.conversion_rates) {
        println!(
            "  - {}: {} ({:.0}%)",
            entry.status_label, entry.count, rate.percentage
        );
    }

    let buckets = &stats.score_distribution;
    println!(
        "\nScore buckets: excellent {} | good {} | fair {} | poor {}",
        buckets.excellent, buckets.good, buckets.fair, buckets.poor
    );

    println!("\nTop skills");
    for entry in &stats.skill_frequency {
        println!("  - {}: {}", entry.skill, entry.count);
    }

    let academic = &stats.academic_stats;
    println!("\nAcademic stats");
    match academic.average_gpa {
        Some(gpa) => println!("  - average GPA {:.2}", gpa),
        None => println!("  - average GPA unavailable"),
    }
    match academic.average_ats_score {
        Some(ats) => println!("  - average ATS score {:.1}", ats),
        None => println!("  - average ATS score unavailable"),
    }
    println!(
        "  - {:.0}% completed an internship",
        academic.internship_percentage
    );

    println!("\nTop performers");
    for entry in &stats.top_performers {
        println!(
            "  {}. {} ({}) {} [{}] {} skills",
            entry.rank,
            entry.candidate_id,
            entry.student_id.0,
            entry.match_score,
            entry.tier.label(),
            entry.skills_count
        );
    }
}
