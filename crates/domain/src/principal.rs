use gatewise_core::TenantId;
use serde::{Deserialize, Serialize};

use crate::{Permission, Role, StaffOverrides, UserId};

/// A resolved, session-scoped user identity with its access inputs.
///
/// Created when a session is established and dropped on sign-out. All
/// permission decisions derive from this one value; there is no ambient
/// session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedPrincipal {
    /// Stable user identifier.
    pub user_id: UserId,
    /// Tenant the session is scoped to.
    pub tenant_id: TenantId,
    /// Assigned role.
    pub role: Role,
    /// Account-active flag; `false` invalidates every derived permission.
    pub is_active: bool,
    /// Per-user toggles, present only for staff.
    pub staff_overrides: Option<StaffOverrides>,
}

impl AuthenticatedPrincipal {
    /// Returns whether the principal holds the given permission.
    ///
    /// Inactive accounts are denied everything regardless of role or
    /// overrides. Staff answers come from the override record (field
    /// defaults when the record is absent); other roles answer from the
    /// static base table.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        if !self.is_active {
            return false;
        }

        match self.role {
            Role::Staff => self
                .staff_overrides
                .unwrap_or_default()
                .permits(permission),
            _ => self
                .role
                .base_permissions()
                .iter()
                .any(|held| *held == permission),
        }
    }

    /// Route-guard check against a single required role.
    ///
    /// Inactive accounts fail every guard.
    #[must_use]
    pub fn satisfies_role(&self, required: Role) -> bool {
        self.is_active && self.role.satisfies(required)
    }

    /// Route-guard check against a list of acceptable roles.
    #[must_use]
    pub fn satisfies_any_role(&self, acceptable: &[Role]) -> bool {
        self.is_active && self.role.satisfies_any(acceptable)
    }
}
