//! Resource types synced from PandaDoc.

use xavyo_connector::types::{ResourceTrait, ResourceType};

pub const USER_RESOURCE_TYPE_ID: &str = "user";
pub const WORKSPACE_RESOURCE_TYPE_ID: &str = "workspace";
pub const ROLE_RESOURCE_TYPE_ID: &str = "role";

/// Every PandaDoc user.
pub fn user_resource_type() -> ResourceType {
    ResourceType::new(USER_RESOURCE_TYPE_ID, "User", ResourceTrait::User)
}

pub fn workspace_resource_type() -> ResourceType {
    ResourceType::new(WORKSPACE_RESOURCE_TYPE_ID, "Workspace", ResourceTrait::Group)
        .with_description(
            "A workspace is an environment with a unique Dashboard, Documents, Templates, \
             Catalog items, and Contacts.",
        )
}

pub fn role_resource_type() -> ResourceType {
    ResourceType::new(ROLE_RESOURCE_TYPE_ID, "Role", ResourceTrait::Role)
        .with_description("A role is a set of permissions that can be assigned to a user.")
}
