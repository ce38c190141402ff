use heirloom_estate::EstateError;
use heirloom_governance::GovernanceError;
use heirloom_ledger::LedgerError;
use heirloom_types::{EstateId, FaultKind, MultisigId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("estate error: {0}")]
    Estate(#[from] EstateError),

    #[error("governance error: {0}")]
    Governance(#[from] GovernanceError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("no estate with id {0}")]
    UnknownEstate(EstateId),

    #[error("no multisig with id {0}")]
    UnknownMultisig(MultisigId),

    #[error("estate {0} has no multisig attached")]
    NoMultisigAttached(EstateId),

    #[error("proposal's multisig does not govern estate {0}")]
    WrongMultisig(EstateId),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NodeError {
    /// Audit classification, where one applies.
    pub fn kind(&self) -> Option<FaultKind> {
        match self {
            Self::Estate(e) => Some(e.kind()),
            Self::Governance(e) => Some(e.kind()),
            Self::Ledger(e) => Some(e.kind()),
            Self::UnknownEstate(_) | Self::UnknownMultisig(_) => Some(FaultKind::Validation),
            Self::NoMultisigAttached(_) | Self::WrongMultisig(_) => {
                Some(FaultKind::Authorization)
            }
            Self::Config(_) | Self::Snapshot(_) | Self::Io(_) => None,
        }
    }
}
