//! Emergency lock and guardians.
//!
//! The lock is an overlay with its own lifecycle: it can engage at any
//! estate stage and blocks every mutating operation until disengaged.
//! Guardians are identities the owner trusts to co-approve a governance
//! forced unlock when the owner themselves cannot act.

use crate::error::EstateError;
use heirloom_types::{Identity, ProtocolParams, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Why the lock was engaged. Governance-initiated locks can only be lifted
/// by governance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockType {
    UserInitiated,
    SecurityBreach,
    SuspiciousActivity,
    GovernanceInitiated,
}

/// Freeze/unfreeze gate for one estate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmergencyLock {
    pub locked: bool,
    pub lock_type: Option<LockType>,
    pub reason: String,
    pub locked_by: Option<Identity>,
    pub locked_at: Option<Timestamp>,
    /// Engagements over the estate's lifetime.
    pub lock_count: u32,
    pub last_lock_at: Option<Timestamp>,
    /// Identities allowed to co-approve a governance forced unlock.
    pub guardians: BTreeSet<Identity>,
}

impl EmergencyLock {
    pub fn new() -> Self {
        Self {
            locked: false,
            lock_type: None,
            reason: String::new(),
            locked_by: None,
            locked_at: None,
            lock_count: 0,
            last_lock_at: None,
            guardians: BTreeSet::new(),
        }
    }

    /// Engage the lock. Enforces the reason bounds and the re-lock cooldown.
    pub fn engage(
        &mut self,
        by: Identity,
        lock_type: LockType,
        reason: String,
        params: &ProtocolParams,
        now: Timestamp,
    ) -> Result<(), EstateError> {
        if self.locked {
            return Err(EstateError::AlreadyLocked);
        }
        if reason.len() < params.min_lock_reason_len || reason.len() > params.max_lock_reason_len {
            return Err(EstateError::InvalidLockReason {
                len: reason.len(),
                min: params.min_lock_reason_len,
                max: params.max_lock_reason_len,
            });
        }
        if let Some(last) = self.last_lock_at {
            if !last.has_elapsed(params.lock_cooldown_secs, now) {
                return Err(EstateError::LockCooldown {
                    retry_at: last.plus(params.lock_cooldown_secs).as_secs(),
                });
            }
        }

        self.locked = true;
        self.lock_type = Some(lock_type);
        self.reason = reason;
        self.locked_by = Some(by);
        self.locked_at = Some(now);
        self.lock_count = self.lock_count.saturating_add(1);
        self.last_lock_at = Some(now);
        Ok(())
    }

    /// Owner disengage. Enforces the minimum lock duration so a compromised
    /// session cannot lock-and-unlock in one breath.
    pub fn disengage(
        &mut self,
        params: &ProtocolParams,
        now: Timestamp,
    ) -> Result<(), EstateError> {
        if !self.locked {
            return Err(EstateError::NotLocked);
        }
        if let Some(at) = self.locked_at {
            if !at.has_elapsed(params.min_lock_duration_secs, now) {
                return Err(EstateError::UnlockTooEarly {
                    ready_at: at.plus(params.min_lock_duration_secs).as_secs(),
                });
            }
        }
        self.clear();
        Ok(())
    }

    /// Governance forced disengage — skips the duration gate.
    pub fn force_disengage(&mut self) -> Result<(), EstateError> {
        if !self.locked {
            return Err(EstateError::NotLocked);
        }
        self.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.locked = false;
        self.lock_type = None;
        self.reason.clear();
        self.locked_by = None;
        self.locked_at = None;
    }

    pub fn add_guardian(&mut self, guardian: Identity) -> Result<(), EstateError> {
        if !self.guardians.insert(guardian.clone()) {
            return Err(EstateError::DuplicateGuardian {
                identity: guardian.to_string(),
            });
        }
        Ok(())
    }

    pub fn remove_guardian(&mut self, guardian: &Identity) -> Result<(), EstateError> {
        if !self.guardians.remove(guardian) {
            return Err(EstateError::UnknownGuardian {
                identity: guardian.to_string(),
            });
        }
        Ok(())
    }

    pub fn is_guardian(&self, identity: &Identity) -> bool {
        self.guardians.contains(identity)
    }
}

impl Default for EmergencyLock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ProtocolParams {
        ProtocolParams::default()
    }

    fn engage(lock: &mut EmergencyLock, now: u64) -> Result<(), EstateError> {
        lock.engage(
            Identity::new("owner"),
            LockType::UserInitiated,
            "suspicious login from new device".into(),
            &params(),
            Timestamp::new(now),
        )
    }

    #[test]
    fn engage_then_disengage_after_min_duration() {
        let mut lock = EmergencyLock::new();
        engage(&mut lock, 1_000).unwrap();
        assert!(lock.locked);
        assert_eq!(lock.lock_count, 1);

        // 5 minutes not yet elapsed
        assert!(matches!(
            lock.disengage(&params(), Timestamp::new(1_100)),
            Err(EstateError::UnlockTooEarly { ready_at: 1_300 })
        ));

        lock.disengage(&params(), Timestamp::new(1_300)).unwrap();
        assert!(!lock.locked);
        assert!(lock.reason.is_empty());
    }

    #[test]
    fn double_engage_rejected() {
        let mut lock = EmergencyLock::new();
        engage(&mut lock, 1_000).unwrap();
        assert!(matches!(engage(&mut lock, 2_000), Err(EstateError::AlreadyLocked)));
    }

    #[test]
    fn relock_respects_cooldown() {
        let mut lock = EmergencyLock::new();
        engage(&mut lock, 1_000).unwrap();
        lock.disengage(&params(), Timestamp::new(1_300)).unwrap();

        // cooldown runs from the engagement, 1h
        assert!(matches!(
            engage(&mut lock, 2_000),
            Err(EstateError::LockCooldown { retry_at: 4_600 })
        ));
        engage(&mut lock, 4_600).unwrap();
        assert_eq!(lock.lock_count, 2);
    }

    #[test]
    fn reason_bounds_enforced() {
        let mut lock = EmergencyLock::new();
        let err = lock
            .engage(
                Identity::new("owner"),
                LockType::UserInitiated,
                "short".into(),
                &params(),
                Timestamp::new(0),
            )
            .unwrap_err();
        assert!(matches!(err, EstateError::InvalidLockReason { len: 5, .. }));
    }

    #[test]
    fn force_disengage_skips_duration_gate() {
        let mut lock = EmergencyLock::new();
        engage(&mut lock, 1_000).unwrap();
        lock.force_disengage().unwrap();
        assert!(!lock.locked);
    }

    #[test]
    fn guardian_set_management() {
        let mut lock = EmergencyLock::new();
        let g = Identity::new("guardian-1");
        lock.add_guardian(g.clone()).unwrap();
        assert!(lock.is_guardian(&g));
        assert!(matches!(
            lock.add_guardian(g.clone()),
            Err(EstateError::DuplicateGuardian { .. })
        ));
        lock.remove_guardian(&g).unwrap();
        assert!(matches!(
            lock.remove_guardian(&g),
            Err(EstateError::UnknownGuardian { .. })
        ));
    }
}
