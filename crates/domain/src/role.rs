use std::str::FromStr;

use gatewise_core::AppError;
use serde::{Deserialize, Serialize};

/// Coarse-grained access level assigned to a user within a tenant.
///
/// The declaration order is the authority hierarchy: `derive(Ord)` makes a
/// higher role compare greater than every lower one, so route guards compare
/// roles directly instead of indexing into a role-name array.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Front-line operator; permissions are tunable per user.
    Staff,
    /// Team lead with management capabilities.
    Manager,
    /// Tenant administrator.
    Admin,
    /// Unrestricted administrator; satisfies every role requirement.
    MasterAdmin,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Manager => "manager",
            Self::Admin => "admin",
            Self::MasterAdmin => "master_admin",
        }
    }

    /// Returns all roles in ascending order of authority.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[Role::Staff, Role::Manager, Role::Admin, Role::MasterAdmin];

        ALL
    }

    /// Returns whether this role meets a required role.
    #[must_use]
    pub fn satisfies(&self, required: Role) -> bool {
        *self >= required
    }

    /// Returns whether this role meets at least one of the acceptable roles.
    ///
    /// The check passes when this role is at least the lowest acceptable
    /// role, so `MasterAdmin` satisfies any non-empty requirement without
    /// being enumerated. An empty list denies.
    #[must_use]
    pub fn satisfies_any(&self, acceptable: &[Role]) -> bool {
        acceptable
            .iter()
            .min()
            .is_some_and(|minimum| self.satisfies(*minimum))
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "staff" => Ok(Self::Staff),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            "master_admin" => Ok(Self::MasterAdmin),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}
