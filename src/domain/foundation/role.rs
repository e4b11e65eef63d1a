//! Role enum for the signed-in dashboard user.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role picked at sign-in. No credential backs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Marketing,
    Manager,
    Superadmin,
}

/// A role string outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid role '{0}': expected marketing, manager or superadmin")]
pub struct InvalidRole(pub String);

impl Role {
    /// All roles, in role-picker order.
    pub const ALL: [Role; 3] = [Role::Marketing, Role::Manager, Role::Superadmin];

    /// Wire value stored in `assigned_to` and accepted at sign-in.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Marketing => "marketing",
            Role::Manager => "manager",
            Role::Superadmin => "superadmin",
        }
    }

    /// Human-readable label shown in the role picker.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Marketing => "Marketing",
            Role::Manager => "Manager Marketing",
            Role::Superadmin => "Direktur Utama",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "marketing" => Ok(Role::Marketing),
            "manager" => Ok(Role::Manager),
            "superadmin" => Ok(Role::Superadmin),
            other => Err(InvalidRole(other.to_string())),
        }
    }
}
