//! Threshold governance for the Heirloom estate protocol.
//!
//! A committee of signers raises proposals against estates; once a proposal
//! collects `threshold` distinct approvals it may be executed. Execution is
//! driven by the node layer so governance actions flow through the exact
//! internal estate operations the owner path uses.

pub mod engine;
pub mod error;
pub mod multisig;
pub mod proposal;

pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use multisig::Multisig;
pub use proposal::{Proposal, ProposalAction};
