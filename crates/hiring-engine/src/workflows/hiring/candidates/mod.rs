//! Candidate status workflow: transition rules, storage seams, service, and HTTP router.

pub mod repository;
pub mod router;
pub mod service;
pub mod status;

pub use repository::{
    CandidateRepository, CandidateView, EventError, RepositoryError, SessionEvent,
    SessionEventPublisher, SessionRepository, StatusChange,
};
pub use router::{candidate_router, error_status};
pub use service::{
    BulkUpdateFailure, BulkUpdateReport, CandidateWorkflowError, CandidateWorkflowService,
    StatusTransition, StatusUpdateRequest,
};
pub use status::{StatusMachine, TransitionError};
