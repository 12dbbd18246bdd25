use chrono::{DateTime, Utc};
use hiring_engine::error::AppError;
use hiring_engine::workflows::hiring::candidates::{
    CandidateRepository, EventError, RepositoryError, SessionEvent, SessionEventPublisher,
    SessionRepository, StatusChange,
};
use hiring_engine::workflows::hiring::domain::{
    CandidateId, CandidateProfile, CandidateRecord, CandidateStatus, HiringSession, JobCriteria,
    SessionId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Candidates kept in insertion order, which is the ranking tie-break.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidateRepository {
    records: Arc<Mutex<Vec<CandidateRecord>>>,
}

impl CandidateRepository for InMemoryCandidateRepository {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.candidate.id == record.candidate.id)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.candidate.id == id).cloned())
    }

    fn apply_status(
        &self,
        id: &CandidateId,
        expected: CandidateStatus,
        change: &StatusChange,
    ) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard
            .iter_mut()
            .find(|record| &record.candidate.id == id)
            .ok_or(RepositoryError::NotFound)?;
        if record.candidate.status != expected {
            return Err(RepositoryError::Conflict);
        }
        change.apply_to(&mut record.candidate);
        Ok(record.clone())
    }

    fn update_score(
        &self,
        id: &CandidateId,
        match_score: u8,
        scored_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard
            .iter_mut()
            .find(|record| &record.candidate.id == id)
            .ok_or(RepositoryError::NotFound)?;
        record.candidate.match_score = match_score;
        record.candidate.updated_at = scored_at;
        Ok(())
    }

    fn for_session(&self, session_id: &SessionId) -> Result<Vec<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| &record.candidate.session_id == session_id)
            .cloned()
            .collect())
    }
}

/// Session store that also consumes hire events by bumping `current_hires`.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, HiringSession>>>,
}

impl InMemorySessionStore {
    pub(crate) fn with_sessions(sessions: impl IntoIterator<Item = HiringSession>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.sessions.lock().expect("session mutex poisoned");
            for session in sessions {
                guard.insert(session.id.clone(), session);
            }
        }
        store
    }
}

impl SessionRepository for InMemorySessionStore {
    fn fetch(&self, id: &SessionId) -> Result<Option<HiringSession>, RepositoryError> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

impl SessionEventPublisher for InMemorySessionStore {
    fn publish(&self, event: SessionEvent) -> Result<(), EventError> {
        match event {
            SessionEvent::CandidateHired {
                session_id,
                candidate_id,
            } => {
                let mut guard = self.sessions.lock().expect("session mutex poisoned");
                let session = guard.get_mut(&session_id).ok_or_else(|| {
                    EventError::Transport(format!("session {session_id} is not loaded"))
                })?;
                session.current_hires += 1;
                info!(
                    %session_id,
                    %candidate_id,
                    current_hires = session.current_hires,
                    "hire counter incremented"
                );
                Ok(())
            }
        }
    }
}

/// Session served by `serve` and seeded by `demo`.
pub(crate) fn demo_session() -> HiringSession {
    HiringSession {
        id: SessionId("campus-2025-backend".to_string()),
        title: "Campus Drive 2025: Backend Engineering".to_string(),
        role: "Backend Engineer".to_string(),
        criteria: JobCriteria {
            required_skills: vec!["Python".to_string(), "SQL".to_string(), "Git".to_string()],
            preferred_skills: vec!["Docker".to_string(), "AWS".to_string()],
            min_gpa: Some(7.0),
            min_tenth_percentage: Some(75.0),
            min_twelfth_percentage: Some(75.0),
            eligible_years: vec!["3".to_string(), "4".to_string()],
            eligible_departments: vec!["CSE".to_string(), "IT".to_string(), "ECE".to_string()],
            cgpa_minimum: Some(7.5),
            experience_years_required: Some(1.0),
        },
        target_hires: 3,
        current_hires: 0,
    }
}

/// Accept either inline JSON or a path to a JSON file.
pub(crate) fn read_json_argument<T>(raw: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    let path = Path::new(raw);
    if path.is_file() {
        let contents = std::fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&contents)?);
    }
    Ok(serde_json::from_str(raw)?)
}

pub(crate) fn demo_profiles() -> Vec<(&'static str, CandidateProfile)> {
    let skills = |values: &[&str]| -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    };
    vec![
        (
            "stu-1001",
            CandidateProfile {
                skills: skills(&["Python", "PostgreSQL", "Git", "Docker"]),
                gpa: Some(8.7),
                year: Some("4".to_string()),
                department: Some("CSE".to_string()),
                tenth_percentage: Some(92.0),
                twelfth_percentage: Some(89.5),
                experience_years: Some(1.0),
                has_internship: Some(true),
                ats_score: Some(81.0),
            },
        ),
        (
            "stu-1002",
            CandidateProfile {
                skills: skills(&["Java", "MySQL", "Git"]),
                gpa: Some(7.2),
                year: Some("3".to_string()),
                department: Some("IT".to_string()),
                tenth_percentage: Some(84.0),
                twelfth_percentage: Some(78.0),
                has_internship: Some(false),
                ats_score: Some(64.0),
                ..CandidateProfile::default()
            },
        ),
        (
            "stu-1003",
            CandidateProfile {
                skills: skills(&["Python", "Django", "AWS", "Git", "SQL"]),
                gpa: Some(9.1),
                year: Some("4".to_string()),
                department: Some("ECE".to_string()),
                tenth_percentage: Some(95.0),
                twelfth_percentage: Some(93.0),
                experience_years: Some(0.5),
                has_internship: Some(true),
                ats_score: Some(88.0),
            },
        ),
        (
            "stu-1004",
            CandidateProfile {
                skills: skills(&["AutoCAD", "Python"]),
                gpa: Some(6.4),
                year: Some("2".to_string()),
                department: Some("ME".to_string()),
                tenth_percentage: Some(71.0),
                twelfth_percentage: Some(68.0),
                ..CandidateProfile::default()
            },
        ),
        (
            "stu-1005",
            CandidateProfile {
                skills: skills(&["Python", "SQL", "Git"]),
                gpa: Some(7.9),
                year: Some("3".to_string()),
                department: Some("CSE".to_string()),
                tenth_percentage: Some(88.0),
                twelfth_percentage: Some(86.0),
                has_internship: Some(true),
                ats_score: Some(73.0),
                ..CandidateProfile::default()
            },
        ),
    ]
}
