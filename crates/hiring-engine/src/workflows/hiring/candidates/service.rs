use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::super::analytics::{
    aggregate_pool, ranking_csv, PoolAnalytics, SessionAnalytics, SessionInfo,
};
use super::super::domain::{
    CandidateId, CandidateProfile, CandidateRecord, CandidateStatus, HiringSession,
    SessionCandidate, SessionId, StudentId, UnknownStatus,
};
use super::super::matching::{MatchEngine, MatchResult};
use super::repository::{
    CandidateRepository, EventError, RepositoryError, SessionEvent, SessionEventPublisher,
    SessionRepository, StatusChange,
};
use super::status::{StatusMachine, TransitionError};
use crate::config::AnalyticsConfig;

const MAX_STATUS_ATTEMPTS: usize = 3;

static CANDIDATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_candidate_id() -> CandidateId {
    let id = CANDIDATE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CandidateId(format!("cand-{id:06}"))
}

/// One item of a bulk status request, as received at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub candidate_id: String,
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkUpdateFailure {
    pub candidate_id: String,
    pub reason: String,
}

/// Per-batch result of a bulk status update; failed items are listed, not raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkUpdateReport {
    pub updated_count: usize,
    pub attempted_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<BulkUpdateFailure>,
}

/// Record after a status write, with the status it replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusTransition {
    pub previous: CandidateStatus,
    pub record: CandidateRecord,
}

/// Service composing the match engine, status machine, and storage collaborators.
pub struct CandidateWorkflowService<C, S, E> {
    candidates: Arc<C>,
    sessions: Arc<S>,
    events: Arc<E>,
    engine: MatchEngine,
    machine: StatusMachine,
    analytics: AnalyticsConfig,
}

impl<C, S, E> CandidateWorkflowService<C, S, E>
where
    C: CandidateRepository + 'static,
    S: SessionRepository + 'static,
    E: SessionEventPublisher + 'static,
{
    pub fn new(candidates: Arc<C>, sessions: Arc<S>, events: Arc<E>, engine: MatchEngine) -> Self {
        Self {
            candidates,
            sessions,
            events,
            engine,
            machine: StatusMachine,
            analytics: AnalyticsConfig::default(),
        }
    }

    pub fn with_analytics(mut self, analytics: AnalyticsConfig) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    fn session(&self, session_id: &SessionId) -> Result<HiringSession, CandidateWorkflowError> {
        self.sessions
            .fetch(session_id)?
            .ok_or_else(|| CandidateWorkflowError::SessionNotFound(session_id.clone()))
    }

    fn candidate(&self, candidate_id: &CandidateId) -> Result<CandidateRecord, CandidateWorkflowError> {
        self.candidates
            .fetch(candidate_id)?
            .ok_or_else(|| CandidateWorkflowError::CandidateNotFound(candidate_id.clone()))
    }

    /// Score a student against the session criteria and add them with status `applied`.
    pub fn add_candidate(
        &self,
        session_id: &SessionId,
        student_id: StudentId,
        profile: CandidateProfile,
    ) -> Result<CandidateRecord, CandidateWorkflowError> {
        let session = self.session(session_id)?;
        let match_score = self.engine.score(&profile, &session.criteria);
        let now = Utc::now();

        let record = CandidateRecord {
            candidate: SessionCandidate {
                id: next_candidate_id(),
                session_id: session_id.clone(),
                student_id,
                status: self.machine.initial(),
                match_score,
                recruiter_notes: None,
                created_at: now,
                updated_at: now,
            },
            profile,
        };

        let stored = self.candidates.insert(record)?;
        info!(
            candidate_id = %stored.candidate.id,
            session_id = %session_id,
            match_score,
            "candidate added to session"
        );
        Ok(stored)
    }

    pub fn get(&self, candidate_id: &CandidateId) -> Result<CandidateRecord, CandidateWorkflowError> {
        self.candidate(candidate_id)
    }

    /// Validate and write one status change, emitting `CandidateHired` when the new status is `hired`.
    pub fn update_status(
        &self,
        candidate_id: &CandidateId,
        status: &str,
        notes: Option<String>,
    ) -> Result<StatusTransition, CandidateWorkflowError> {
        let status = status.parse::<CandidateStatus>()?;
        let transition = self.write_status(candidate_id, status, notes)?;
        self.announce_hire(&transition)?;
        Ok(transition)
    }

    /// Apply each item independently. Failed items are counted and reported, never raised.
    pub fn bulk_update_status(&self, updates: &[StatusUpdateRequest]) -> BulkUpdateReport {
        let mut report = BulkUpdateReport {
            attempted_count: updates.len(),
            ..BulkUpdateReport::default()
        };

        for update in updates {
            let candidate_id = CandidateId(update.candidate_id.clone());
            let written = update
                .status
                .parse::<CandidateStatus>()
                .map_err(CandidateWorkflowError::from)
                .and_then(|status| self.write_status(&candidate_id, status, update.notes.clone()));

            match written {
                Ok(transition) => {
                    report.updated_count += 1;
                    if let Err(err) = self.announce_hire(&transition) {
                        warn!(candidate_id = %candidate_id, error = %err, "hire event not delivered");
                    }
                }
                Err(err) => {
                    warn!(candidate_id = %candidate_id, error = %err, "bulk status item failed");
                    report.failures.push(BulkUpdateFailure {
                        candidate_id: update.candidate_id.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            updated = report.updated_count,
            attempted = report.attempted_count,
            "bulk status update finished"
        );
        report
    }

    /// Bulk update where every candidate receives the same status and note.
    pub fn bulk_update_uniform(
        &self,
        candidate_ids: &[CandidateId],
        status: &str,
        notes: Option<String>,
    ) -> BulkUpdateReport {
        let updates: Vec<StatusUpdateRequest> = candidate_ids
            .iter()
            .map(|id| StatusUpdateRequest {
                candidate_id: id.0.clone(),
                status: status.to_string(),
                notes: notes.clone(),
            })
            .collect();
        self.bulk_update_status(&updates)
    }

    fn write_status(
        &self,
        candidate_id: &CandidateId,
        status: CandidateStatus,
        notes: Option<String>,
    ) -> Result<StatusTransition, CandidateWorkflowError> {
        let change = StatusChange {
            status,
            notes,
            changed_at: Utc::now(),
        };

        let mut attempt = 1;
        loop {
            let current = self.candidate(candidate_id)?;
            let previous = current.candidate.status;
            self.machine.transition(previous, status)?;

            match self.candidates.apply_status(candidate_id, previous, &change) {
                Ok(record) => {
                    info!(
                        candidate_id = %candidate_id,
                        from = %previous,
                        to = %status,
                        "candidate status updated"
                    );
                    return Ok(StatusTransition { previous, record });
                }
                Err(RepositoryError::Conflict) if attempt < MAX_STATUS_ATTEMPTS => {
                    attempt += 1;
                }
                Err(RepositoryError::NotFound) => {
                    return Err(CandidateWorkflowError::CandidateNotFound(
                        candidate_id.clone(),
                    ))
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn announce_hire(&self, transition: &StatusTransition) -> Result<(), EventError> {
        if transition.record.candidate.status != CandidateStatus::Hired {
            return Ok(());
        }

        let candidate = &transition.record.candidate;
        self.events.publish(SessionEvent::CandidateHired {
            session_id: candidate.session_id.clone(),
            candidate_id: candidate.id.clone(),
        })?;
        info!(
            candidate_id = %candidate.id,
            session_id = %candidate.session_id,
            "hire recorded for session"
        );
        Ok(())
    }

    /// Active pipeline: excludes `applied`, optionally filtered, highest score first.
    pub fn pipeline(
        &self,
        session_id: &SessionId,
        status: Option<CandidateStatus>,
    ) -> Result<Vec<CandidateRecord>, CandidateWorkflowError> {
        self.session(session_id)?;
        let mut records: Vec<CandidateRecord> = self
            .candidates
            .for_session(session_id)?
            .into_iter()
            .filter(|record| record.candidate.status.in_active_pipeline())
            .filter(|record| status.map_or(true, |wanted| record.candidate.status == wanted))
            .collect();
        records.sort_by(|left, right| right.candidate.match_score.cmp(&left.candidate.match_score));
        Ok(records)
    }

    /// Recompute stored scores against the session's current criteria.
    pub fn refresh_match_scores(&self, session_id: &SessionId) -> Result<usize, CandidateWorkflowError> {
        let session = self.session(session_id)?;
        let scored_at = Utc::now();
        let mut refreshed = 0;
        for record in self.candidates.for_session(session_id)? {
            let score = self.engine.score(&record.profile, &session.criteria);
            self.candidates
                .update_score(&record.candidate.id, score, scored_at)?;
            refreshed += 1;
        }
        info!(session_id = %session_id, refreshed, "match scores refreshed");
        Ok(refreshed)
    }

    pub fn detailed_analysis(
        &self,
        session_id: &SessionId,
        candidate_id: &CandidateId,
    ) -> Result<MatchResult, CandidateWorkflowError> {
        let session = self.session(session_id)?;
        let record = self.candidate(candidate_id)?;
        if &record.candidate.session_id != session_id {
            return Err(CandidateWorkflowError::CandidateNotFound(candidate_id.clone()));
        }
        Ok(self.engine.analyze(&record.profile, &session.criteria))
    }

    /// Full, untruncated pool analytics for the session.
    pub fn pool_analytics(&self, session_id: &SessionId) -> Result<PoolAnalytics, CandidateWorkflowError> {
        self.session(session_id)?;
        let records = self.candidates.for_session(session_id)?;
        Ok(aggregate_pool(&records))
    }

    /// Analytics view with skill and ranking lists cut to the configured display limits.
    pub fn session_analytics(
        &self,
        session_id: &SessionId,
    ) -> Result<SessionAnalytics, CandidateWorkflowError> {
        let session = self.session(session_id)?;
        let records = self.candidates.for_session(session_id)?;
        let candidate_stats = aggregate_pool(&records)
            .truncated(self.analytics.top_skills, self.analytics.top_performers);

        Ok(SessionAnalytics {
            session: SessionInfo {
                session_id: session.id,
                title: session.title,
                role: session.role,
                target_hires: session.target_hires,
                current_hires: session.current_hires,
            },
            candidate_stats,
        })
    }

    /// Complete ranking as CSV.
    pub fn export_ranking(&self, session_id: &SessionId) -> Result<String, CandidateWorkflowError> {
        let analytics = self.pool_analytics(session_id)?;
        Ok(ranking_csv(&analytics.top_performers)?)
    }
}

/// Error raised by the candidate workflow service.
#[derive(Debug, thiserror::Error)]
pub enum CandidateWorkflowError {
    #[error("invalid status: {0}")]
    InvalidStatus(#[from] UnknownStatus),
    #[error("candidate {0} not found")]
    CandidateNotFound(CandidateId),
    #[error("session {0} not found")]
    SessionNotFound(SessionId),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Event(#[from] EventError),
    #[error("ranking export failed: {0}")]
    Export(#[from] csv::Error),
}
