use super::views::TopPerformerEntry;
use serde::Serialize;
use std::io;

const HEADER: [&str; 9] = [
    "rank",
    "candidate_id",
    "student_id",
    "match_score",
    "tier",
    "status",
    "skills_count",
    "gpa",
    "year",
];

#[derive(Serialize)]
struct RankingRow<'a> {
    rank: usize,
    candidate_id: &'a str,
    student_id: &'a str,
    match_score: u8,
    tier: &'static str,
    status: &'static str,
    skills_count: usize,
    gpa: Option<f64>,
    year: Option<&'a str>,
}

/// Write the ranking as CSV. The header row is written even for an empty pool.
pub fn write_ranking_csv<W: io::Write>(
    entries: &[TopPerformerEntry],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for entry in entries {
        csv_writer.serialize(RankingRow {
            rank: entry.rank,
            candidate_id: &entry.candidate_id.0,
            student_id: &entry.student_id.0,
            match_score: entry.match_score,
            tier: entry.tier.label(),
            status: entry.status.as_str(),
            skills_count: entry.skills_count,
            gpa: entry.gpa,
            year: entry.year.as_deref(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn ranking_csv(entries: &[TopPerformerEntry]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_ranking_csv(entries, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
