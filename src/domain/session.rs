//! Dashboard session: the role picked at sign-in.

use serde::Serialize;

use crate::domain::access::Capabilities;
use crate::domain::foundation::Role;

/// An active sign-in. Holds only the selected role; nothing is verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Session {
    role: Role,
}

impl Session {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn capabilities(&self) -> Capabilities {
        self.role.capabilities()
    }

    /// Dashboard heading, e.g. `Dashboard Marketing`.
    pub fn heading(&self) -> String {
        let raw = self.role.as_str();
        let mut chars = raw.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        format!("Dashboard {}", capitalized)
    }
}
