//! Caller identities and hashed contact references.
//!
//! Identities arrive pre-verified by the hosting environment (signature or
//! credential checks happen outside the core). The core only ever compares
//! them for equality and membership.

use blake2::{Blake2b512, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque, host-verified caller identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Create an identity from a raw string.
    ///
    /// # Panics
    /// Panics if the string is empty — an empty identity can never have been
    /// verified by the host.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(!s.is_empty(), "identity must be non-empty");
        Self(s)
    }

    /// The custody identity for an estate — the ledger account that holds
    /// the estate's pooled assets.
    pub fn custody_for(estate: crate::id::EstateId) -> Self {
        Self(format!("estate-custody-{}", estate.value()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Blake2b digest of an out-of-band contact address.
///
/// The core never stores plaintext contact data; external notifiers match
/// against the hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactHash([u8; 32]);

impl ContactHash {
    pub const EMPTY: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Hash a plaintext contact address (email, phone, relay id).
    pub fn from_plain(contact: &str) -> Self {
        let digest = Blake2b512::digest(contact.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest[..32]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for ContactHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContactHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for ContactHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

// Inline hex encoding to avoid adding the `hex` crate as a dependency of types.
mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_hash_is_deterministic() {
        let a = ContactHash::from_plain("owner@example.com");
        let b = ContactHash::from_plain("owner@example.com");
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn contact_hash_distinguishes_inputs() {
        let a = ContactHash::from_plain("owner@example.com");
        let b = ContactHash::from_plain("heir@example.com");
        assert_ne!(a, b);
    }

    #[test]
    fn custody_identity_is_per_estate() {
        let a = Identity::custody_for(crate::id::EstateId::new(1));
        let b = Identity::custody_for(crate::id::EstateId::new(2));
        assert_ne!(a, b);
    }

    #[test]
    #[should_panic]
    fn empty_identity_rejected() {
        Identity::new("");
    }
}
