use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::domain::{
    CandidateId, CandidateRecord, CandidateStatus, HiringSession, SessionCandidate, SessionId,
};

/// A status write requested by the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub status: CandidateStatus,
    pub notes: Option<String>,
    pub changed_at: DateTime<Utc>,
}

impl StatusChange {
    /// Apply to a stored candidate. Absent notes keep the existing recruiter notes.
    pub fn apply_to(&self, candidate: &mut SessionCandidate) {
        candidate.status = self.status;
        if let Some(notes) = &self.notes {
            candidate.recruiter_notes = Some(notes.clone());
        }
        candidate.updated_at = self.changed_at;
    }
}

/// Candidate storage owned by the session-storage collaborator.
pub trait CandidateRepository: Send + Sync {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError>;
    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError>;
    /// Atomically apply `change` if the stored status still equals `expected`.
    ///
    /// Returns `Conflict` when another writer changed the status first.
    fn apply_status(
        &self,
        id: &CandidateId,
        expected: CandidateStatus,
        change: &StatusChange,
    ) -> Result<CandidateRecord, RepositoryError>;
    fn update_score(
        &self,
        id: &CandidateId,
        match_score: u8,
        scored_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;
    /// Every candidate of the session, in insertion order.
    fn for_session(&self, session_id: &SessionId) -> Result<Vec<CandidateRecord>, RepositoryError>;
}

/// Read access to hiring sessions.
pub trait SessionRepository: Send + Sync {
    fn fetch(&self, id: &SessionId) -> Result<Option<HiringSession>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists or was changed concurrently")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Events the workflow emits for other collaborators to act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The session store increments its hire counter. Nothing decrements it.
    CandidateHired {
        session_id: SessionId,
        candidate_id: CandidateId,
    },
}

pub trait SessionEventPublisher: Send + Sync {
    fn publish(&self, event: SessionEvent) -> Result<(), EventError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("event transport unavailable: {0}")]
    Transport(String),
}

/// Public view of a candidate for pipeline listings.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    pub candidate_id: CandidateId,
    pub session_id: SessionId,
    pub student_id: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub match_score: u8,
    pub match_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruiter_notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&CandidateRecord> for CandidateView {
    fn from(record: &CandidateRecord) -> Self {
        let candidate = &record.candidate;
        Self {
            candidate_id: candidate.id.clone(),
            session_id: candidate.session_id.clone(),
            student_id: candidate.student_id.0.clone(),
            status: candidate.status.as_str(),
            status_label: candidate.status.label(),
            match_score: candidate.match_score,
            match_label: super::super::domain::MatchTier::for_score(candidate.match_score).label(),
            recruiter_notes: candidate.recruiter_notes.clone(),
            updated_at: candidate.updated_at,
        }
    }
}
