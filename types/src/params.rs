//! Protocol parameters — every tunable bound and fee in one place.
//!
//! Governance can change the creation fee at runtime (`ChangeFee` proposal);
//! the remaining bounds are fixed per deployment.

use crate::amount::Amount;
use crate::asset::AssetId;
use crate::share::ShareBps;
use serde::{Deserialize, Serialize};

/// All protocol parameters the core validates against.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtocolParams {
    // ── Estate lifecycle ─────────────────────────────────────────────────
    /// Minimum owner inactivity period before inheritance can arm.
    /// Default: 24 hours.
    pub min_inactivity_secs: u64,

    /// Maximum inactivity period. Default: 300 years.
    pub max_inactivity_secs: u64,

    /// Minimum grace period after inactivity expiry. Default: 24 hours.
    pub min_grace_secs: u64,

    /// Maximum grace period. Default: 90 days.
    pub max_grace_secs: u64,

    /// Maximum number of beneficiaries per estate.
    pub max_beneficiaries: usize,

    // ── Fees ─────────────────────────────────────────────────────────────
    /// One-time fee charged on estate creation, routed to the treasury.
    pub creation_fee: Amount,

    /// Asset the creation fee is denominated in.
    pub fee_asset: AssetId,

    // ── Trading delegation ───────────────────────────────────────────────
    /// Minimum owner-side profit share. The delegate can never take more
    /// than half.
    pub min_human_share: ShareBps,

    /// Bounds on the trading emergency-withdrawal delay, in hours.
    pub min_emergency_delay_hours: u32,
    pub max_emergency_delay_hours: u32,

    // ── Emergency lock ───────────────────────────────────────────────────
    /// Cooldown between successive lock engagements. Default: 1 hour.
    pub lock_cooldown_secs: u64,

    /// Minimum time an estate stays locked before the owner can unlock.
    /// Default: 5 minutes. Governance force-unlock ignores this.
    pub min_lock_duration_secs: u64,

    /// Bounds on the lock reason string length, in bytes.
    pub min_lock_reason_len: usize,
    pub max_lock_reason_len: usize,

    // ── Multisig governance ──────────────────────────────────────────────
    /// Signer count bounds for a committee.
    pub min_signers: usize,
    pub max_signers: usize,

    /// Minimum approval threshold.
    pub min_threshold: usize,

    /// Proposals expire this long after creation, checked lazily.
    /// Default: 7 days.
    pub proposal_expiry_secs: u64,

    /// Timelock on committee admin rotation. Default: 48 hours.
    pub admin_timelock_secs: u64,
}

impl ProtocolParams {
    /// The intended configuration for a live deployment.
    pub fn mainnet_defaults() -> Self {
        Self {
            min_inactivity_secs: 24 * 3600,
            max_inactivity_secs: 300 * 365 * 24 * 3600,
            min_grace_secs: 24 * 3600,
            max_grace_secs: 90 * 24 * 3600,
            max_beneficiaries: 10,

            creation_fee: Amount::new(100_000_000),
            fee_asset: AssetId::new("NATIVE"),

            min_human_share: ShareBps::new(5000),
            min_emergency_delay_hours: 24,
            max_emergency_delay_hours: 168,

            lock_cooldown_secs: 3600,
            min_lock_duration_secs: 300,
            min_lock_reason_len: 6,
            max_lock_reason_len: 200,

            min_signers: 2,
            max_signers: 10,
            min_threshold: 2,
            proposal_expiry_secs: 7 * 24 * 3600,
            admin_timelock_secs: 48 * 3600,
        }
    }
}

/// Default is the mainnet configuration.
impl Default for ProtocolParams {
    fn default() -> Self {
        Self::mainnet_defaults()
    }
}
