use std::collections::HashMap;

use async_trait::async_trait;
use gatewise_application::{IdentityRecord, IdentityRepository, StaffOverrideRepository};
use gatewise_core::AppResult;
use gatewise_domain::{Role, StaffOverrides, UserId};
use tokio::sync::RwLock;

/// In-memory identity and staff-override store.
///
/// Backs tests and embedding hosts that supply their own identity data; the
/// role is stored as its raw string so unknown values can be represented,
/// exactly as the external store would hand them over.
#[derive(Debug, Default)]
pub struct InMemoryIdentityRepository {
    identities: RwLock<HashMap<UserId, IdentityRecord>>,
    roles: RwLock<HashMap<UserId, String>>,
    overrides: RwLock<HashMap<UserId, StaffOverrides>>,
}

impl InMemoryIdentityRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an identity row.
    pub async fn upsert_identity(&self, record: IdentityRecord) {
        self.identities.write().await.insert(record.user_id, record);
    }

    /// Assigns a role to a user.
    pub async fn assign_role(&self, user_id: UserId, role: Role) {
        self.roles
            .write()
            .await
            .insert(user_id, role.as_str().to_owned());
    }

    /// Stores a raw role value, including ones no release understands yet.
    pub async fn assign_raw_role(&self, user_id: UserId, value: impl Into<String>) {
        self.roles.write().await.insert(user_id, value.into());
    }

    /// Inserts or replaces a staff override record.
    pub async fn upsert_overrides(&self, user_id: UserId, overrides: StaffOverrides) {
        self.overrides.write().await.insert(user_id, overrides);
    }

    /// Flips the account-active flag for a user, if the identity exists.
    pub async fn set_active(&self, user_id: UserId, is_active: bool) {
        if let Some(record) = self.identities.write().await.get_mut(&user_id) {
            record.is_active = is_active;
        }
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn find_identity(&self, user_id: UserId) -> AppResult<Option<IdentityRecord>> {
        Ok(self.identities.read().await.get(&user_id).copied())
    }

    async fn find_role(&self, user_id: UserId) -> AppResult<Option<String>> {
        Ok(self.roles.read().await.get(&user_id).cloned())
    }
}

#[async_trait]
impl StaffOverrideRepository for InMemoryIdentityRepository {
    async fn find_overrides(&self, user_id: UserId) -> AppResult<Option<StaffOverrides>> {
        Ok(self.overrides.read().await.get(&user_id).copied())
    }
}

#[cfg(test)]
mod tests {
    use gatewise_application::{IdentityRecord, IdentityRepository, StaffOverrideRepository};
    use gatewise_core::TenantId;
    use gatewise_domain::{Role, StaffOverrides, UserId};

    use super::InMemoryIdentityRepository;

    #[tokio::test]
    async fn unknown_user_reads_as_absent() {
        let repository = InMemoryIdentityRepository::new();
        let identity = repository.find_identity(UserId::new()).await;
        assert_eq!(identity.ok().flatten(), None);
    }

    #[tokio::test]
    async fn stores_identity_role_and_overrides() {
        let repository = InMemoryIdentityRepository::new();
        let user_id = UserId::new();
        repository
            .upsert_identity(IdentityRecord {
                user_id,
                tenant_id: TenantId::new(),
                is_active: true,
            })
            .await;
        repository.assign_role(user_id, Role::Staff).await;
        repository
            .upsert_overrides(user_id, StaffOverrides::deny_all())
            .await;

        let role = repository.find_role(user_id).await.ok().flatten();
        assert_eq!(role.as_deref(), Some("staff"));
        let overrides = repository.find_overrides(user_id).await.ok().flatten();
        assert_eq!(overrides, Some(StaffOverrides::deny_all()));
    }

    #[tokio::test]
    async fn set_active_flips_the_flag() {
        let repository = InMemoryIdentityRepository::new();
        let user_id = UserId::new();
        repository
            .upsert_identity(IdentityRecord {
                user_id,
                tenant_id: TenantId::new(),
                is_active: true,
            })
            .await;
        repository.set_active(user_id, false).await;

        let identity = repository.find_identity(user_id).await.ok().flatten();
        assert_eq!(identity.map(|record| record.is_active), Some(false));
    }
}
