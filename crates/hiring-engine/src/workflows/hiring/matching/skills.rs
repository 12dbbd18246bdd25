use serde::{Deserialize, Serialize};

/// A requirement satisfied by a candidate attribute, kept for audit display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedItem {
    pub requirement: String,
    pub evidence: String,
}

/// Return the first candidate skill that contains `target`, ignoring case.
///
/// Containment rather than equality: "React" is satisfied by "React.js".
pub fn find_skill<'a>(target: &str, candidate_skills: &'a [String]) -> Option<&'a str> {
    let needle = target.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    candidate_skills
        .iter()
        .map(String::as_str)
        .find(|skill| skill.to_lowercase().contains(&needle))
}

/// Outcome of matching a requirement list against a candidate's skills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCoverage {
    pub matched: Vec<MatchedItem>,
    pub missing: Vec<String>,
}

impl SkillCoverage {
    pub fn evaluate(requirements: &[String], candidate_skills: &[String]) -> Self {
        let mut coverage = SkillCoverage::default();
        for requirement in requirements {
            match find_skill(requirement, candidate_skills) {
                Some(evidence) => coverage.matched.push(MatchedItem {
                    requirement: requirement.clone(),
                    evidence: evidence.to_string(),
                }),
                None => coverage.missing.push(requirement.clone()),
            }
        }
        coverage
    }

    pub fn total(&self) -> usize {
        self.matched.len() + self.missing.len()
    }

    /// Fraction of requirements matched; `None` when nothing was required.
    pub fn ratio(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.matched.len() as f64 / total as f64),
        }
    }
}
