//! Actor roles and the role hierarchy.
//!
//! Roles form a strict hierarchy, ranked 1 (least authority) to 5:
//!
//! ```text
//! lead(1) < receptionist(2) < consultant(3) < manager(4) < super_admin(5)
//! ```
//!
//! Rank is informational; no decision in this crate assumes that a higher
//! rank implies a superset of rights. The only privileged-role check lives in
//! [`Role::is_top`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Lead,
    Receptionist,
    Consultant,
    Manager,
    SuperAdmin,
}

impl Role {
    /// Every role, lowest rank first.
    pub const ALL: [Role; 5] = [
        Role::Lead,
        Role::Receptionist,
        Role::Consultant,
        Role::Manager,
        Role::SuperAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Receptionist => "receptionist",
            Self::Consultant => "consultant",
            Self::Manager => "manager",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Hierarchy rank, 1..=5.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Lead => 1,
            Self::Receptionist => 2,
            Self::Consultant => 3,
            Self::Manager => 4,
            Self::SuperAdmin => 5,
        }
    }

    /// The top role bypasses office scoping and the chat matrix.
    pub fn is_top(&self) -> bool {
        self.rank() == Self::top().rank()
    }

    pub fn top() -> Role {
        Role::SuperAdmin
    }

    /// Lowest-privilege role.
    pub fn lowest() -> Role {
        Role::Lead
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a directory role name does not name a known role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Case-insensitive; `-` and spaces are accepted in place of `_`,
    /// and `superadmin` is accepted for `super_admin`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "lead" => Ok(Self::Lead),
            "receptionist" => Ok(Self::Receptionist),
            "consultant" => Ok(Self::Consultant),
            "manager" => Ok(Self::Manager),
            "super_admin" | "superadmin" => Ok(Self::SuperAdmin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}
