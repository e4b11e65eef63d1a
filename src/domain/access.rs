//! Access policy: what each role may do on the dashboard.
//!
//! Write and delete are independent capabilities. Marketing creates records
//! but cannot remove them; managers and the director remove records but
//! cannot create them. Everyone who is signed in can read and export.

use serde::Serialize;
use std::fmt;

use crate::domain::foundation::{InvalidRole, Role};

/// Capability flags derived from a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub can_write: bool,
    pub can_delete: bool,
}

impl Capabilities {
    /// True when the role cannot create records (forms are hidden).
    pub fn is_read_only(&self) -> bool {
        !self.can_write
    }

    /// Whether the given mutating action is permitted.
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Create => self.can_write,
            Action::Delete => self.can_delete,
        }
    }
}

/// Mutating actions gated by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create => write!(f, "create"),
            Action::Delete => write!(f, "delete"),
        }
    }
}

/// Maps a role to its capabilities.
pub fn capabilities(role: Role) -> Capabilities {
    match role {
        Role::Marketing => Capabilities {
            can_write: true,
            can_delete: false,
        },
        Role::Manager | Role::Superadmin => Capabilities {
            can_write: false,
            can_delete: true,
        },
    }
}

/// Capabilities for a raw role string; unknown roles are rejected.
pub fn capabilities_for(raw_role: &str) -> Result<Capabilities, InvalidRole> {
    Ok(capabilities(raw_role.parse()?))
}

impl Role {
    pub fn capabilities(&self) -> Capabilities {
        capabilities(*self)
    }
}
