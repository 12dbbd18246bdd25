use super::super::domain::CandidateStatus;

static ANY_STATUS: [CandidateStatus; 5] = CandidateStatus::ordered();

/// Transition rules for candidate status.
///
/// Every status may currently move to every other one; restrictions belong in
/// [`StatusMachine::allowed_targets`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusMachine;

impl StatusMachine {
    /// Status assigned when a candidate joins a session.
    pub const fn initial(&self) -> CandidateStatus {
        CandidateStatus::Applied
    }

    pub fn allowed_targets(&self, from: CandidateStatus) -> &'static [CandidateStatus] {
        match from {
            CandidateStatus::Applied
            | CandidateStatus::Shortlisted
            | CandidateStatus::Waitlisted
            | CandidateStatus::Hired
            | CandidateStatus::Rejected => &ANY_STATUS,
        }
    }

    pub fn permits(&self, from: CandidateStatus, to: CandidateStatus) -> bool {
        self.allowed_targets(from).contains(&to)
    }

    pub fn transition(
        &self,
        from: CandidateStatus,
        to: CandidateStatus,
    ) -> Result<CandidateStatus, TransitionError> {
        if self.permits(from, to) {
            Ok(to)
        } else {
            Err(TransitionError { from, to })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("candidate cannot move from {from} to {to}")]
pub struct TransitionError {
    pub from: CandidateStatus,
    pub to: CandidateStatus,
}
