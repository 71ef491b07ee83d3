//! The role and policy guard.
//!
//! Every state-changing operation in the bridge is gated by an explicit capability check at its
//! entry point. Capabilities form a closed set; principals are opaque identities. The table is
//! many-to-many: a principal may hold several capabilities and a capability is typically held by
//! several principals.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buf::Buf32;

/// A named permission required to invoke a gated operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// May administer roles and fees, cancel transfers, and trip the emergency pause.
    Admin,
    /// May initiate and claim transfers and submit proof data.
    Operator,
    /// May relay headers, submit proof data, and trigger proof verification.
    Relayer,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Capability::Admin => "Admin",
            Capability::Operator => "Operator",
            Capability::Relayer => "Relayer",
        };
        write!(f, "{name}")
    }
}

/// An opaque caller identity.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Principal(Buf32);

impl Principal {
    /// Wraps an identity hash as a principal.
    pub const fn new(id: Buf32) -> Self {
        Principal(id)
    }

    /// Returns the underlying identity hash.
    pub const fn id(&self) -> Buf32 {
        self.0
    }
}

impl From<Buf32> for Principal {
    fn from(id: Buf32) -> Self {
        Principal(id)
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

/// Error raised when a principal lacks the capability an operation requires.
///
/// The required capability is always named so callers know what was missing; authorization
/// failures are never silently downgraded.
#[derive(Debug, Clone, Error)]
#[error("principal {principal} lacks the {required} capability")]
pub struct AuthorizationError {
    /// The principal that attempted the operation.
    pub principal: Principal,
    /// The capability the operation requires.
    pub required: Capability,
}

/// The capability table consulted by every state-changing operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleTable {
    assignments: BTreeMap<Principal, BTreeSet<Capability>>,
}

impl RoleTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with the deployer holding all three capabilities.
    ///
    /// This is the bootstrap exception: granting and revoking is Admin-gated, so the first
    /// Admin has to come from somewhere.
    pub fn bootstrap(deployer: Principal) -> Self {
        let mut table = Self::new();
        table.grant(deployer, Capability::Admin);
        table.grant(deployer, Capability::Operator);
        table.grant(deployer, Capability::Relayer);
        table
    }

    /// Grants a capability. Returns false if the principal already held it.
    pub fn grant(&mut self, principal: Principal, capability: Capability) -> bool {
        self.assignments.entry(principal).or_default().insert(capability)
    }

    /// Revokes a capability. Returns false if the principal did not hold it.
    pub fn revoke(&mut self, principal: Principal, capability: Capability) -> bool {
        match self.assignments.get_mut(&principal) {
            Some(caps) => {
                let removed = caps.remove(&capability);
                if caps.is_empty() {
                    self.assignments.remove(&principal);
                }
                removed
            }
            None => false,
        }
    }

    /// Returns true if the principal holds the capability.
    pub fn holds(&self, principal: Principal, capability: Capability) -> bool {
        self.assignments
            .get(&principal)
            .is_some_and(|caps| caps.contains(&capability))
    }

    /// Requires the capability, failing with a typed [`AuthorizationError`] naming it.
    pub fn require(
        &self,
        principal: Principal,
        capability: Capability,
    ) -> Result<(), AuthorizationError> {
        if self.holds(principal, capability) {
            Ok(())
        } else {
            Err(AuthorizationError {
                principal,
                required: capability,
            })
        }
    }

    /// Requires any one of the listed capabilities.
    ///
    /// The error names the first alternative, which reads as the operation's primary role.
    pub fn require_any(
        &self,
        principal: Principal,
        capabilities: &[Capability],
    ) -> Result<(), AuthorizationError> {
        if capabilities
            .iter()
            .any(|cap| self.holds(principal, *cap))
        {
            Ok(())
        } else {
            Err(AuthorizationError {
                principal,
                required: capabilities[0],
            })
        }
    }

    /// Returns the capabilities held by a principal.
    pub fn capabilities(&self, principal: Principal) -> BTreeSet<Capability> {
        self.assignments.get(&principal).cloned().unwrap_or_default()
    }
}
