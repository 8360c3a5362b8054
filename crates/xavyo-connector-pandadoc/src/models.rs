//! PandaDoc API records and derived role model.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Membership of a user in a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceMembership {
    /// Role name, either a system role or a custom one.
    pub role: String,
    pub workspace_id: String,
    /// Unique per user and workspace.
    pub membership_id: String,
}

/// PandaDoc user as returned by `GET /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "user_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, rename = "phone_number")]
    pub phone: String,
    #[serde(default)]
    pub is_organization_owner: bool,
    #[serde(default)]
    pub license: String,
    /// Memberships in upstream order.
    #[serde(default)]
    pub workspaces: Vec<WorkspaceMembership>,
}

/// PandaDoc workspace as returned by `GET /workspaces`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
}

impl Workspace {
    /// Creation time as RFC 3339 with second precision and a `Z` suffix.
    pub fn date_created_rfc3339(&self) -> Option<String> {
        self.date_created
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

/// Envelope of the list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

/// Built-in PandaDoc roles, present in every organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemRole {
    Member,
    Manager,
    Admin,
    Collaborator,
}

impl SystemRole {
    /// All system roles, in emission order.
    pub const ALL: [SystemRole; 4] = [
        SystemRole::Member,
        SystemRole::Manager,
        SystemRole::Admin,
        SystemRole::Collaborator,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemRole::Member => "Member",
            SystemRole::Manager => "Manager",
            SystemRole::Admin => "Admin",
            SystemRole::Collaborator => "Collaborator",
        }
    }

    /// Exact, case-sensitive match on the role name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == name)
    }
}

/// Role in a workspace. PandaDoc has no role endpoint, so custom roles are
/// only known through the memberships that reference them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    System(SystemRole),
    Custom { name: String },
}

/// Description given to every discovered custom role.
pub const CUSTOM_ROLE_DESCRIPTION: &str = "Custom role";

impl Role {
    /// Classify a membership role name.
    pub fn from_name(name: &str) -> Self {
        match SystemRole::from_name(name) {
            Some(role) => Role::System(role),
            None => Role::Custom {
                name: name.to_string(),
            },
        }
    }

    /// Role name, which doubles as its identifier.
    pub fn name(&self) -> &str {
        match self {
            Role::System(role) => role.as_str(),
            Role::Custom { name } => name,
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Role::System(_))
    }

    /// Empty for system roles.
    pub fn description(&self) -> &'static str {
        match self {
            Role::System(_) => "",
            Role::Custom { .. } => CUSTOM_ROLE_DESCRIPTION,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
