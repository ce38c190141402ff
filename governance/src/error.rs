use heirloom_types::FaultKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("invalid signer count: {given} not in [{min}, {max}]")]
    InvalidSignerCount {
        given: usize,
        min: usize,
        max: usize,
    },

    #[error("signer {0} appears more than once")]
    DuplicateSigner(String),

    #[error("invalid threshold: {given} must be in [{min}, {signers}]")]
    InvalidThreshold {
        given: usize,
        min: usize,
        signers: usize,
    },

    #[error("{0} is not a signer of this committee")]
    UnauthorizedSigner(String),

    #[error("signer {0} has already approved this proposal")]
    DuplicateApproval(String),

    #[error("proposal {0} not found")]
    ProposalNotFound(String),

    #[error("proposal expired at {expired_at}s")]
    ProposalExpired { expired_at: u64 },

    #[error("proposal has already been executed")]
    ProposalAlreadyExecuted,

    #[error("insufficient approvals: {have} of {need} required")]
    InsufficientApprovals { have: usize, need: usize },

    #[error("force unlock requires at least one approving guardian of the target estate")]
    GuardianApprovalRequired,

    #[error("caller {0} is not the committee admin")]
    NotAdmin(String),

    #[error("no pending admin change")]
    NoPendingAdminChange,

    #[error("admin timelock active until {ready_at}s")]
    TimelockNotExpired { ready_at: u64 },
}

impl GovernanceError {
    /// Audit classification of this failure.
    pub fn kind(&self) -> FaultKind {
        use GovernanceError::*;
        match self {
            InvalidSignerCount { .. }
            | DuplicateSigner(_)
            | InvalidThreshold { .. }
            | ProposalNotFound(_) => FaultKind::Validation,

            UnauthorizedSigner(_) | NotAdmin(_) | GuardianApprovalRequired => {
                FaultKind::Authorization
            }

            DuplicateApproval(_)
            | ProposalAlreadyExecuted
            | InsufficientApprovals { .. }
            | NoPendingAdminChange => FaultKind::StateConflict,

            ProposalExpired { .. } | TimelockNotExpired { .. } => FaultKind::Temporal,
        }
    }
}
