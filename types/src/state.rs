//! Estate lifecycle states.

use serde::{Deserialize, Serialize};

/// Where an estate stands in its life.
///
/// The emergency lock is an orthogonal overlay — it blocks operations but
/// never changes the lifecycle state itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Owner is active; check-ins keep the timer fresh.
    Active,
    /// Inactivity period expired; the owner can still check in before the
    /// grace period runs out.
    GracePeriod,
    /// Inactivity + grace both elapsed and inheritance was triggered;
    /// beneficiaries may claim.
    Claimable,
    /// Every beneficiary has claimed their share.
    Distributed,
}

impl LifecycleState {
    /// Whether the owner may still check in (resetting the timer).
    pub fn allows_check_in(&self) -> bool {
        matches!(self, Self::Active | Self::GracePeriod)
    }

    /// Whether beneficiary claims are accepted.
    pub fn allows_claims(&self) -> bool {
        matches!(self, Self::Claimable)
    }

    /// Whether owner-side configuration (beneficiaries, trading, RWAs)
    /// may still change.
    pub fn allows_configuration(&self) -> bool {
        matches!(self, Self::Active | Self::GracePeriod)
    }
}
