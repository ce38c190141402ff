//! Fault taxonomy for audit classification.
//!
//! Every error the core returns falls into one of these kinds. External
//! auditors and indexers group failures by kind; the concrete error carries
//! the violated constraint verbatim in its message.

use serde::{Deserialize, Serialize};

/// The kind of failure an operation reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultKind {
    /// Bad bounds, shares, or periods — caller-fixable, never retried
    /// automatically.
    Validation,
    /// Wrong caller identity for the attempted operation.
    Authorization,
    /// Operation invalid for the current lifecycle or lock state.
    StateConflict,
    /// Insufficient vault or ledger balance.
    Resource,
    /// Too early (delay not elapsed) or too late (expired).
    Temporal,
}

impl FaultKind {
    /// Whether resubmitting the identical request could ever succeed
    /// without the caller changing anything.
    pub fn retry_may_succeed(&self) -> bool {
        matches!(self, Self::Temporal | Self::Resource)
    }
}
