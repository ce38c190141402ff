//! Heirloom node — the service facade over the estate core.
//!
//! The node layer owns:
//! - the [`EstateRegistry`]: arena of estates and committees with
//!   single-writer-per-entity locking,
//! - governance proposal execution, routed through the same internal estate
//!   operations the owner path uses,
//! - the event bus external indexers and audit trails subscribe to,
//! - configuration, logging, and snapshot persistence.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod registry;
pub mod snapshot;

pub use config::NodeConfig;
pub use error::NodeError;
pub use events::{EstateEvent, EventBus};
pub use logging::{init_logging, LogFormat};
pub use registry::EstateRegistry;
