use heirloom_types::FaultKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient balance in {asset}: need {needed}, have {available}")]
    InsufficientBalance {
        asset: String,
        needed: u128,
        available: u128,
    },

    #[error("transfer amount must be non-zero")]
    ZeroAmount,

    #[error("transfer from an account to itself")]
    SelfTransfer,
}

impl LedgerError {
    pub fn kind(&self) -> FaultKind {
        match self {
            Self::InsufficientBalance { .. } => FaultKind::Resource,
            Self::ZeroAmount | Self::SelfTransfer => FaultKind::Validation,
        }
    }
}
