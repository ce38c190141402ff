use heirloom_ledger::LedgerError;
use heirloom_types::FaultKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EstateError {
    #[error("invalid {name} period: {given}s not in [{min}s, {max}s]")]
    InvalidPeriod {
        name: &'static str,
        given: u64,
        min: u64,
        max: u64,
    },

    #[error("caller {caller} is not authorized for this operation")]
    Unauthorized { caller: String },

    #[error("estate is locked")]
    EstateLocked,

    #[error("estate is already claimable; owner operations are closed")]
    EstateClaimable,

    #[error("estate is not yet claimable: {remaining_secs}s of inactivity and grace remain")]
    NotYetClaimable { remaining_secs: u64 },

    #[error("estate is not claimable")]
    NotClaimable,

    #[error("caller {caller} is not a beneficiary of this estate")]
    UnknownBeneficiary { caller: String },

    #[error("beneficiary {beneficiary} has already claimed their share")]
    AlreadyClaimed { beneficiary: String },

    #[error("too many beneficiaries: {given} exceeds the maximum of {max}")]
    TooManyBeneficiaries { given: usize, max: usize },

    #[error("invalid share: {0}")]
    InvalidShare(String),

    #[error("beneficiary {identity} appears more than once")]
    DuplicateBeneficiary { identity: String },

    #[error("trading is already enabled for this estate")]
    TradingAlreadyEnabled,

    #[error("trading is not enabled for this estate")]
    TradingNotEnabled,

    #[error("invalid emergency withdrawal delay: {given_hours}h not in [{min}h, {max}h]")]
    InvalidDelay { given_hours: u32, min: u32, max: u32 },

    #[error("caller {caller} is neither the owner nor the trading delegate")]
    UnauthorizedContributor { caller: String },

    #[error("no distributable profit above the high-water mark")]
    NoProfit,

    #[error("emergency withdrawal already requested")]
    WithdrawalAlreadyRequested,

    #[error("emergency withdrawal has not been requested")]
    WithdrawalNotRequested,

    #[error("emergency withdrawal delay still active until {ready_at}s")]
    WithdrawalDelayActive { ready_at: u64 },

    #[error("estate is already emergency-locked")]
    AlreadyLocked,

    #[error("estate is not emergency-locked")]
    NotLocked,

    #[error("emergency lock cooldown active until {retry_at}s")]
    LockCooldown { retry_at: u64 },

    #[error("estate must stay locked until {ready_at}s before the owner can unlock")]
    UnlockTooEarly { ready_at: u64 },

    #[error("lock reason length {len} not in [{min}, {max}] bytes")]
    InvalidLockReason { len: usize, min: usize, max: usize },

    #[error("guardian {identity} is already registered")]
    DuplicateGuardian { identity: String },

    #[error("guardian {identity} is not registered")]
    UnknownGuardian { identity: String },

    #[error("a multisig committee is already attached to this estate")]
    MultisigAlreadyAttached,

    #[error("no RWA with number {number} on this estate")]
    UnknownRwa { number: u32 },

    #[error("RWA {number} has been removed")]
    RwaInactive { number: u32 },

    #[error("beneficiary must claim their vault share before taking RWAs")]
    MustClaimFirst,

    #[error("vault balance in {asset} too low: need {needed}, have {available}")]
    InsufficientVaultBalance {
        asset: String,
        needed: u128,
        available: u128,
    },

    #[error("ledger rejected the transfer: {0}")]
    Ledger(#[from] LedgerError),
}

impl EstateError {
    /// Audit classification of this failure.
    pub fn kind(&self) -> FaultKind {
        use EstateError::*;
        match self {
            InvalidPeriod { .. }
            | TooManyBeneficiaries { .. }
            | InvalidShare(_)
            | DuplicateBeneficiary { .. }
            | InvalidDelay { .. }
            | InvalidLockReason { .. }
            | DuplicateGuardian { .. }
            | UnknownGuardian { .. }
            | UnknownRwa { .. } => FaultKind::Validation,

            Unauthorized { .. } | UnknownBeneficiary { .. } | UnauthorizedContributor { .. } => {
                FaultKind::Authorization
            }

            EstateLocked
            | EstateClaimable
            | NotClaimable
            | AlreadyClaimed { .. }
            | TradingAlreadyEnabled
            | TradingNotEnabled
            | NoProfit
            | WithdrawalAlreadyRequested
            | WithdrawalNotRequested
            | AlreadyLocked
            | NotLocked
            | MultisigAlreadyAttached
            | RwaInactive { .. }
            | MustClaimFirst => FaultKind::StateConflict,

            NotYetClaimable { .. }
            | WithdrawalDelayActive { .. }
            | LockCooldown { .. }
            | UnlockTooEarly { .. } => FaultKind::Temporal,

            InsufficientVaultBalance { .. } => FaultKind::Resource,

            Ledger(inner) => inner.kind(),
        }
    }
}
