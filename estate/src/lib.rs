//! Estate core: lifecycle state machine, beneficiary shares, asset vaults,
//! trading delegation, and the emergency lock.
//!
//! Everything here is synchronous and clock-free: callers pass `now` in and
//! the hosting layer (`heirloom-node`) serializes operations per estate.

pub mod beneficiary;
pub mod emergency;
pub mod error;
pub mod estate;
pub mod rwa;
pub mod trading;
pub mod vault;

pub use beneficiary::{validate_set, Beneficiary};
pub use emergency::{EmergencyLock, LockType};
pub use error::EstateError;
pub use estate::{Authority, ClaimReceipt, Estate};
pub use rwa::{Rwa, RwaRegistry};
pub use trading::{TradingConfig, TradingDelegate, TradingStrategy};
pub use vault::VaultSet;
