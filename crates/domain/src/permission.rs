use std::str::FromStr;

use gatewise_core::AppError;
use serde::{Deserialize, Serialize};

use crate::Role;

/// Permissions enforced by application policy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Allows reading the shared conversation inbox.
    AccessInbox,
    /// Allows sending outbound messages.
    SendMessages,
    /// Allows viewing lead records.
    AccessLeads,
    /// Allows exporting lead records.
    ExportLeads,
    /// Allows viewing campaigns.
    AccessCampaigns,
    /// Allows creating and editing campaigns.
    ManageCampaigns,
    /// Allows viewing call history.
    AccessCalls,
    /// Allows placing outbound calls.
    MakeCalls,
    /// Allows viewing reports and analytics.
    AccessReports,
    /// Allows changing tenant settings.
    AccessSettings,
    /// Allows managing team members and their roles.
    ManageTeam,
    /// Allows viewing billing and subscription state.
    AccessBilling,
    /// Allows configuring third-party integrations.
    AccessIntegrations,
    /// Allows using AI-assisted tooling.
    UseAiTools,
    /// Allows deleting records permanently.
    DeleteRecords,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessInbox => "inbox.access",
            Self::SendMessages => "inbox.send",
            Self::AccessLeads => "leads.access",
            Self::ExportLeads => "leads.export",
            Self::AccessCampaigns => "campaigns.access",
            Self::ManageCampaigns => "campaigns.manage",
            Self::AccessCalls => "calls.access",
            Self::MakeCalls => "calls.make",
            Self::AccessReports => "reports.access",
            Self::AccessSettings => "settings.access",
            Self::ManageTeam => "team.manage",
            Self::AccessBilling => "billing.access",
            Self::AccessIntegrations => "integrations.access",
            Self::UseAiTools => "ai.use",
            Self::DeleteRecords => "records.delete",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::AccessInbox,
            Permission::SendMessages,
            Permission::AccessLeads,
            Permission::ExportLeads,
            Permission::AccessCampaigns,
            Permission::ManageCampaigns,
            Permission::AccessCalls,
            Permission::MakeCalls,
            Permission::AccessReports,
            Permission::AccessSettings,
            Permission::ManageTeam,
            Permission::AccessBilling,
            Permission::AccessIntegrations,
            Permission::UseAiTools,
            Permission::DeleteRecords,
        ];

        ALL
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "inbox.access" => Ok(Self::AccessInbox),
            "inbox.send" => Ok(Self::SendMessages),
            "leads.access" => Ok(Self::AccessLeads),
            "leads.export" => Ok(Self::ExportLeads),
            "campaigns.access" => Ok(Self::AccessCampaigns),
            "campaigns.manage" => Ok(Self::ManageCampaigns),
            "calls.access" => Ok(Self::AccessCalls),
            "calls.make" => Ok(Self::MakeCalls),
            "reports.access" => Ok(Self::AccessReports),
            "settings.access" => Ok(Self::AccessSettings),
            "team.manage" => Ok(Self::ManageTeam),
            "billing.access" => Ok(Self::AccessBilling),
            "integrations.access" => Ok(Self::AccessIntegrations),
            "ai.use" => Ok(Self::UseAiTools),
            "records.delete" => Ok(Self::DeleteRecords),
            _ => Err(AppError::Validation(format!(
                "unknown permission value '{value}'"
            ))),
        }
    }
}

impl Role {
    /// Returns the static base permission list for this role.
    ///
    /// Rows are monotonic: every permission of a lower role is held by every
    /// higher role, which keeps the route-guard ordering and the permission
    /// model consistent.
    #[must_use]
    pub fn base_permissions(&self) -> &'static [Permission] {
        const STAFF: &[Permission] = &[Permission::AccessInbox, Permission::SendMessages];
        const MANAGER: &[Permission] = &[
            Permission::AccessInbox,
            Permission::SendMessages,
            Permission::AccessLeads,
            Permission::ExportLeads,
            Permission::AccessCampaigns,
            Permission::ManageCampaigns,
            Permission::AccessCalls,
            Permission::MakeCalls,
            Permission::AccessReports,
        ];
        const ADMIN: &[Permission] = &[
            Permission::AccessInbox,
            Permission::SendMessages,
            Permission::AccessLeads,
            Permission::ExportLeads,
            Permission::AccessCampaigns,
            Permission::ManageCampaigns,
            Permission::AccessCalls,
            Permission::MakeCalls,
            Permission::AccessReports,
            Permission::AccessSettings,
            Permission::ManageTeam,
            Permission::AccessIntegrations,
            Permission::UseAiTools,
            Permission::DeleteRecords,
        ];

        match self {
            Self::Staff => STAFF,
            Self::Manager => MANAGER,
            Self::Admin => ADMIN,
            Self::MasterAdmin => Permission::all(),
        }
    }
}

/// Per-user permission toggles, meaningful only for [`Role::Staff`].
///
/// The external override store returns a sparse record; deserialization
/// fills every absent field with its documented default, so the rest of the
/// system always sees one fully-resolved struct. Inbox access and message
/// sending default on, every other capability defaults off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffOverrides {
    /// Access to the shared inbox. Defaults to `true`.
    pub can_access_inbox: bool,
    /// Sending outbound messages. Defaults to `true`.
    pub can_send_messages: bool,
    /// Viewing lead records. Defaults to `false`.
    pub can_access_leads: bool,
    /// Exporting lead records. Defaults to `false`.
    pub can_export_leads: bool,
    /// Viewing campaigns. Defaults to `false`.
    pub can_access_campaigns: bool,
    /// Creating and editing campaigns. Defaults to `false`.
    pub can_manage_campaigns: bool,
    /// Viewing call history. Defaults to `false`.
    pub can_access_calls: bool,
    /// Placing outbound calls. Defaults to `false`.
    pub can_make_calls: bool,
    /// Viewing reports. Defaults to `false`.
    pub can_access_reports: bool,
    /// Changing tenant settings. Defaults to `false`.
    pub can_access_settings: bool,
    /// Managing team members. Defaults to `false`.
    pub can_manage_team: bool,
    /// Viewing billing. Defaults to `false`.
    pub can_access_billing: bool,
    /// Configuring integrations. Defaults to `false`.
    pub can_access_integrations: bool,
    /// Using AI-assisted tooling. Defaults to `false`.
    pub can_use_ai_tools: bool,
    /// Deleting records. Defaults to `false`.
    pub can_delete_records: bool,
}

impl Default for StaffOverrides {
    fn default() -> Self {
        Self {
            can_access_inbox: true,
            can_send_messages: true,
            can_access_leads: false,
            can_export_leads: false,
            can_access_campaigns: false,
            can_manage_campaigns: false,
            can_access_calls: false,
            can_make_calls: false,
            can_access_reports: false,
            can_access_settings: false,
            can_manage_team: false,
            can_access_billing: false,
            can_access_integrations: false,
            can_use_ai_tools: false,
            can_delete_records: false,
        }
    }
}

impl StaffOverrides {
    /// Returns the overrides record with every capability denied.
    ///
    /// The restrictive fallback used when the override store cannot be read
    /// or the role itself could not be resolved.
    #[must_use]
    pub fn deny_all() -> Self {
        Self {
            can_access_inbox: false,
            can_send_messages: false,
            ..Self::default()
        }
    }

    /// Returns whether this record permits the given capability.
    #[must_use]
    pub fn permits(&self, permission: Permission) -> bool {
        match permission {
            Permission::AccessInbox => self.can_access_inbox,
            Permission::SendMessages => self.can_send_messages,
            Permission::AccessLeads => self.can_access_leads,
            Permission::ExportLeads => self.can_export_leads,
            Permission::AccessCampaigns => self.can_access_campaigns,
            Permission::ManageCampaigns => self.can_manage_campaigns,
            Permission::AccessCalls => self.can_access_calls,
            Permission::MakeCalls => self.can_make_calls,
            Permission::AccessReports => self.can_access_reports,
            Permission::AccessSettings => self.can_access_settings,
            Permission::ManageTeam => self.can_manage_team,
            Permission::AccessBilling => self.can_access_billing,
            Permission::AccessIntegrations => self.can_access_integrations,
            Permission::UseAiTools => self.can_use_ai_tools,
            Permission::DeleteRecords => self.can_delete_records,
        }
    }
}
