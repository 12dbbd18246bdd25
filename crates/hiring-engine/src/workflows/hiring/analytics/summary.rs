use super::super::domain::{present_text, CandidateRecord, CandidateStatus, MatchTier};
use super::views::{
    AcademicStats, ConversionRateEntry, DistributionEntry, PoolAnalytics, ScoreDistribution,
    SkillFrequencyEntry, StatusCountEntry, TopPerformerEntry,
};
use std::collections::{HashMap, HashSet};

/// Tallies accumulated in one pass over a candidate pool.
#[derive(Debug, Default)]
pub struct CandidatePoolReport {
    pub total: usize,
    pub status_counts: HashMap<CandidateStatus, usize>,
    pub tier_counts: HashMap<MatchTier, usize>,
    pub skill_counts: FirstSeenCounter,
    pub year_counts: FirstSeenCounter,
    pub department_counts: FirstSeenCounter,
    pub skill_total: usize,
    gpa: RunningMean,
    ats: RunningMean,
    pub internships: usize,
    pub ranking: Vec<TopPerformerEntry>,
}

impl CandidatePoolReport {
    pub fn from_records(records: &[CandidateRecord]) -> Self {
        let mut report = Self::default();

        for record in records {
            let candidate = &record.candidate;
            let profile = &record.profile;

            report.total += 1;
            *report.status_counts.entry(candidate.status).or_default() += 1;
            *report
                .tier_counts
                .entry(MatchTier::for_score(candidate.match_score))
                .or_default() += 1;

            let skills = distinct_skills(&profile.skills);
            for skill in &skills {
                report.skill_counts.record(skill);
            }
            report.skill_total += skills.len();

            if let Some(year) = present_text(&profile.year) {
                report.year_counts.record(year);
            }
            if let Some(department) = present_text(&profile.department) {
                report.department_counts.record(department);
            }

            report.gpa.push(profile.gpa);
            report.ats.push(profile.ats_score);
            if profile.has_internship == Some(true) {
                report.internships += 1;
            }

            report.ranking.push(TopPerformerEntry {
                rank: 0,
                candidate_id: candidate.id.clone(),
                student_id: candidate.student_id.clone(),
                match_score: candidate.match_score,
                tier: MatchTier::for_score(candidate.match_score),
                status: candidate.status,
                skills_count: skills.len(),
                gpa: profile.gpa,
                year: present_text(&profile.year).map(str::to_string),
            });
        }

        // `sort_by` is stable: equal scores keep their pool order.
        report
            .ranking
            .sort_by(|left, right| right.match_score.cmp(&left.match_score));
        for (index, entry) in report.ranking.iter_mut().enumerate() {
            entry.rank = index + 1;
        }

        report
    }

    pub fn summary(self) -> PoolAnalytics {
        let total = self.total;

        let status_distribution = CandidateStatus::ordered()
            .into_iter()
            .map(|status| StatusCountEntry {
                status,
                status_label: status.label(),
                count: self.status_counts.get(&status).copied().unwrap_or(0),
            })
            .collect();

        let conversion_rates = CandidateStatus::ordered()
            .into_iter()
            .map(|status| ConversionRateEntry {
                status,
                status_label: status.label(),
                percentage: percentage(self.status_counts.get(&status).copied().unwrap_or(0), total),
            })
            .collect();

        let tier = |tier: MatchTier| self.tier_counts.get(&tier).copied().unwrap_or(0);
        let score_distribution = ScoreDistribution {
            excellent: tier(MatchTier::Excellent),
            good: tier(MatchTier::Good),
            fair: tier(MatchTier::Fair),
            poor: tier(MatchTier::Poor),
        };

        let skill_frequency = self
            .skill_counts
            .ranked()
            .into_iter()
            .map(|(skill, count)| SkillFrequencyEntry { skill, count })
            .collect();

        let average_skill_count = if total == 0 {
            0.0
        } else {
            self.skill_total as f64 / total as f64
        };

        PoolAnalytics {
            total_candidates: total,
            status_distribution,
            score_distribution,
            skill_frequency,
            average_skill_count,
            academic_stats: AcademicStats {
                average_gpa: self.gpa.mean(),
                average_ats_score: self.ats.mean(),
                internship_percentage: percentage(self.internships, total),
            },
            year_distribution: distribution(self.year_counts),
            department_distribution: distribution(self.department_counts),
            conversion_rates,
            top_performers: self.ranking,
        }
    }
}

/// Summarize a pool in one call.
pub fn aggregate_pool(records: &[CandidateRecord]) -> PoolAnalytics {
    CandidatePoolReport::from_records(records).summary()
}

/// A profile's skills are a set: exact repeats count once, first occurrence wins.
fn distinct_skills(skills: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .map(String::as_str)
        .filter(|skill| seen.insert(*skill))
        .collect()
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

fn distribution(counter: FirstSeenCounter) -> Vec<DistributionEntry> {
    counter
        .ranked()
        .into_iter()
        .map(|(value, count)| DistributionEntry { value, count })
        .collect()
}

/// Case-sensitive occurrence counter that remembers first-seen order.
#[derive(Debug, Default)]
pub struct FirstSeenCounter {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl FirstSeenCounter {
    pub fn record(&mut self, value: &str) {
        match self.index.get(value) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(value.to_string(), self.entries.len());
                self.entries.push((value.to_string(), 1));
            }
        }
    }

    /// Descending by count; ties stay in first-seen order.
    pub fn ranked(self) -> Vec<(String, usize)> {
        let mut entries = self.entries;
        entries.sort_by(|left, right| right.1.cmp(&left.1));
        entries
    }
}

#[derive(Debug, Default)]
struct RunningMean {
    sum: f64,
    count: usize,
}

impl RunningMean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(value) = value.filter(|value| value.is_finite()) {
            self.sum += value;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}
