use std::str::FromStr;
use std::sync::Arc;

use gatewise_core::{AppError, AppResult};
use gatewise_domain::{AuthenticatedPrincipal, Role, StaffOverrides, UserId};
use tracing::warn;

use crate::{IdentityRepository, StaffOverrideRepository};

/// Resolves a session user into an [`AuthenticatedPrincipal`].
#[derive(Clone)]
pub struct PrincipalService {
    identities: Arc<dyn IdentityRepository>,
    staff_overrides: Arc<dyn StaffOverrideRepository>,
}

impl PrincipalService {
    /// Creates a new principal resolver over the identity stores.
    #[must_use]
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        staff_overrides: Arc<dyn StaffOverrideRepository>,
    ) -> Self {
        Self {
            identities,
            staff_overrides,
        }
    }

    /// Resolves the principal for a user.
    ///
    /// A missing identity row is an error (the session references it). A
    /// missing or unrecognized role, or a role-store failure, resolves to
    /// the most restrictive shape instead: staff with every override
    /// denied. Override-store failures degrade the same way; permission
    /// escalation must never ride on an outage. Inactive accounts resolve
    /// normally and are denied by the predicate, not by erroring here.
    pub async fn resolve(&self, user_id: UserId) -> AppResult<AuthenticatedPrincipal> {
        let identity = self
            .identities
            .find_identity(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no identity for user '{user_id}'")))?;

        let (role, restricted) = match self.identities.find_role(user_id).await {
            Ok(Some(value)) => match Role::from_str(&value) {
                Ok(role) => (role, false),
                Err(_) => {
                    warn!(user_id = %user_id, role = %value, "unknown role value, resolving as restricted staff");
                    (Role::Staff, true)
                }
            },
            Ok(None) => {
                warn!(user_id = %user_id, "no role record, resolving as restricted staff");
                (Role::Staff, true)
            }
            Err(error) => {
                warn!(user_id = %user_id, %error, "role lookup failed, resolving as restricted staff");
                (Role::Staff, true)
            }
        };

        let staff_overrides = if restricted {
            Some(StaffOverrides::deny_all())
        } else if role == Role::Staff {
            match self.staff_overrides.find_overrides(user_id).await {
                Ok(record) => record,
                Err(error) => {
                    warn!(user_id = %user_id, %error, "override lookup failed, denying staff toggles");
                    Some(StaffOverrides::deny_all())
                }
            }
        } else {
            None
        };

        Ok(AuthenticatedPrincipal {
            user_id,
            tenant_id: identity.tenant_id,
            role,
            is_active: identity.is_active,
            staff_overrides,
        })
    }
}
