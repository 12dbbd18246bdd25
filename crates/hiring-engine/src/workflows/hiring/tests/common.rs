use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::config::AnalyticsConfig;
use crate::workflows::hiring::candidates::{
    candidate_router, CandidateRepository, CandidateWorkflowService, EventError, RepositoryError,
    SessionEvent, SessionEventPublisher, SessionRepository, StatusChange,
};
use crate::workflows::hiring::domain::{
    CandidateId, CandidateProfile, CandidateRecord, CandidateStatus, HiringSession, JobCriteria,
    SessionCandidate, SessionId, StudentId,
};
use crate::workflows::hiring::matching::MatchEngine;

pub(super) const SESSION: &str = "session-2025-backend";

pub(super) fn session_id() -> SessionId {
    SessionId(SESSION.to_string())
}

pub(super) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Third-year CS student with Python and SQL.
pub(super) fn scenario_profile() -> CandidateProfile {
    CandidateProfile {
        skills: strings(&["Python", "SQL"]),
        gpa: Some(8.0),
        year: Some("3".to_string()),
        department: Some("CS".to_string()),
        tenth_percentage: Some(90.0),
        twelfth_percentage: Some(88.0),
        ..CandidateProfile::default()
    }
}

pub(super) fn scenario_criteria() -> JobCriteria {
    JobCriteria {
        required_skills: strings(&["Python", "Java"]),
        preferred_skills: strings(&["SQL"]),
        min_gpa: Some(7.5),
        min_tenth_percentage: Some(80.0),
        min_twelfth_percentage: Some(80.0),
        eligible_years: strings(&["3", "4"]),
        eligible_departments: strings(&["CS"]),
        ..JobCriteria::default()
    }
}

pub(super) fn session() -> HiringSession {
    HiringSession {
        id: session_id(),
        title: "Backend Engineer 2025".to_string(),
        role: "Backend Engineer".to_string(),
        criteria: scenario_criteria(),
        target_hires: 3,
        current_hires: 0,
    }
}

pub(super) fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 10, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Stored record with a fixed score, bypassing the engine.
pub(super) fn record(
    id: &str,
    match_score: u8,
    status: CandidateStatus,
    profile: CandidateProfile,
) -> CandidateRecord {
    CandidateRecord {
        candidate: SessionCandidate {
            id: CandidateId(id.to_string()),
            session_id: session_id(),
            student_id: StudentId(format!("student-{id}")),
            status,
            match_score,
            recruiter_notes: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        },
        profile,
    }
}

pub(super) type MemoryService = CandidateWorkflowService<MemoryCandidates, MemorySessions, MemoryEvents>;

pub(super) fn build_service() -> (
    MemoryService,
    Arc<MemoryCandidates>,
    Arc<MemorySessions>,
    Arc<MemoryEvents>,
) {
    let candidates = Arc::new(MemoryCandidates::default());
    let sessions = Arc::new(MemorySessions::with(session()));
    let events = Arc::new(MemoryEvents::default());
    let service = CandidateWorkflowService::new(
        candidates.clone(),
        sessions.clone(),
        events.clone(),
        MatchEngine::default(),
    )
    .with_analytics(AnalyticsConfig::default());
    (service, candidates, sessions, events)
}

/// Add the scenario student plus one weaker and one stronger candidate.
pub(super) fn seed_pool(service: &MemoryService) -> Vec<CandidateId> {
    let strong = CandidateProfile {
        skills: strings(&["Python", "Java", "SQL"]),
        gpa: Some(9.1),
        year: Some("4".to_string()),
        department: Some("CS".to_string()),
        tenth_percentage: Some(95.0),
        twelfth_percentage: Some(93.0),
        has_internship: Some(true),
        ..CandidateProfile::default()
    };
    let weak = CandidateProfile {
        skills: strings(&["Excel"]),
        gpa: Some(6.0),
        year: Some("2".to_string()),
        department: Some("ME".to_string()),
        tenth_percentage: Some(70.0),
        twelfth_percentage: Some(65.0),
        ..CandidateProfile::default()
    };

    [scenario_profile(), strong, weak]
        .into_iter()
        .enumerate()
        .map(|(index, profile)| {
            service
                .add_candidate(&session_id(), StudentId(format!("student-{index}")), profile)
                .expect("candidate added")
                .candidate
                .id
        })
        .collect()
}

#[derive(Default)]
pub(super) struct MemoryCandidates {
    records: Mutex<Vec<CandidateRecord>>,
}

impl MemoryCandidates {
    pub(super) fn with(records: Vec<CandidateRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub(super) fn status_of(&self, id: &CandidateId) -> Option<CandidateStatus> {
        self.records
            .lock()
            .expect("candidate mutex poisoned")
            .iter()
            .find(|record| &record.candidate.id == id)
            .map(|record| record.candidate.status)
    }
}

impl CandidateRepository for MemoryCandidates {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("candidate mutex poisoned");
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
        let guard = self.records.lock().expect("candidate mutex poisoned");
        Ok(guard.iter().find(|record| &record.candidate.id == id).cloned())
    }

    fn apply_status(
        &self,
        id: &CandidateId,
        expected: CandidateStatus,
        change: &StatusChange,
    ) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("candidate mutex poisoned");
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
        let mut guard = self.records.lock().expect("candidate mutex poisoned");
        let record = guard
            .iter_mut()
            .find(|record| &record.candidate.id == id)
            .ok_or(RepositoryError::NotFound)?;
        record.candidate.match_score = match_score;
        record.candidate.updated_at = scored_at;
        Ok(())
    }

    fn for_session(&self, session_id: &SessionId) -> Result<Vec<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("candidate mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| &record.candidate.session_id == session_id)
            .cloned()
            .collect())
    }
}

/// Reports a lost race on the first `conflicts` status writes.
pub(super) struct ContendedCandidates {
    pub(super) inner: MemoryCandidates,
    conflicts: AtomicUsize,
}

impl ContendedCandidates {
    pub(super) fn new(inner: MemoryCandidates, conflicts: usize) -> Self {
        Self {
            inner,
            conflicts: AtomicUsize::new(conflicts),
        }
    }
}

impl CandidateRepository for ContendedCandidates {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn apply_status(
        &self,
        id: &CandidateId,
        expected: CandidateStatus,
        change: &StatusChange,
    ) -> Result<CandidateRecord, RepositoryError> {
        let remaining = self.conflicts.load(Ordering::SeqCst);
        if remaining > 0 {
            self.conflicts.store(remaining - 1, Ordering::SeqCst);
            return Err(RepositoryError::Conflict);
        }
        self.inner.apply_status(id, expected, change)
    }

    fn update_score(
        &self,
        id: &CandidateId,
        match_score: u8,
        scored_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        self.inner.update_score(id, match_score, scored_at)
    }

    fn for_session(&self, session_id: &SessionId) -> Result<Vec<CandidateRecord>, RepositoryError> {
        self.inner.for_session(session_id)
    }
}

pub(super) struct UnavailableCandidates;

impl CandidateRepository for UnavailableCandidates {
    fn insert(&self, _record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn apply_status(
        &self,
        _id: &CandidateId,
        _expected: CandidateStatus,
        _change: &StatusChange,
    ) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_score(
        &self,
        _id: &CandidateId,
        _match_score: u8,
        _scored_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_session(&self, _session_id: &SessionId) -> Result<Vec<CandidateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemorySessions {
    sessions: Mutex<HashMap<SessionId, HiringSession>>,
}

impl MemorySessions {
    pub(super) fn with(session: HiringSession) -> Self {
        let store = Self::default();
        store
            .sessions
            .lock()
            .expect("session mutex poisoned")
            .insert(session.id.clone(), session);
        store
    }

    pub(super) fn replace_criteria(&self, id: &SessionId, criteria: JobCriteria) {
        if let Some(session) = self
            .sessions
            .lock()
            .expect("session mutex poisoned")
            .get_mut(id)
        {
            session.criteria = criteria;
        }
    }
}

impl SessionRepository for MemorySessions {
    fn fetch(&self, id: &SessionId) -> Result<Option<HiringSession>, RepositoryError> {
        Ok(self
            .sessions
            .lock()
            .expect("session mutex poisoned")
            .get(id)
            .cloned())
    }
}

#[derive(Default)]
pub(super) struct MemoryEvents {
    events: Mutex<Vec<SessionEvent>>,
}

impl MemoryEvents {
    pub(super) fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().expect("event mutex poisoned").clone()
    }
}

impl SessionEventPublisher for MemoryEvents {
    fn publish(&self, event: SessionEvent) -> Result<(), EventError> {
        self.events.lock().expect("event mutex poisoned").push(event);
        Ok(())
    }
}

pub(super) struct OfflineEvents;

impl SessionEventPublisher for OfflineEvents {
    fn publish(&self, _event: SessionEvent) -> Result<(), EventError> {
        Err(EventError::Transport("broker offline".to_string()))
    }
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    candidate_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
