//! Role synchronization from PandaDoc.
//!
//! PandaDoc has no role endpoint. The four system roles always exist;
//! custom roles are discovered from the role names on users' workspace
//! memberships. Role entitlements are scoped per workspace.

use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use xavyo_connector::error::ConnectorResult;
use xavyo_connector::pagination::{ListPage, PageToken};
use xavyo_connector::traits::ResourceSyncer;
use xavyo_connector::types::{
    Annotation, Entitlement, Grant, Profile, Resource, ResourceId, ResourceType,
};

use crate::cache::CollectionCache;
use crate::cursor::PageCursor;
use crate::models::{Role, SystemRole, User, Workspace};
use crate::resource_types::{role_resource_type, user_resource_type, ROLE_RESOURCE_TYPE_ID};
use crate::users::user_principal;
use crate::{PandaDocClient, PandaDocError, PandaDocResult};

/// Slug of the entitlement granting a role inside one workspace.
pub fn role_entitlement_slug(workspace_name: &str) -> String {
    format!("assigned in workspace {workspace_name}")
}

/// System roles followed by each custom role name once, in the order first
/// seen across users and their memberships.
pub fn discover_roles(users: &[User]) -> Vec<Role> {
    let mut roles: Vec<Role> = SystemRole::ALL.into_iter().map(Role::System).collect();
    let mut seen = HashSet::new();

    for membership in users.iter().flat_map(|user| &user.workspaces) {
        let role = Role::from_name(&membership.role);
        if !role.is_system() && seen.insert(membership.role.as_str()) {
            roles.push(role);
        }
    }

    roles
}

/// Maps a role to a role resource. The role name is both id and display name.
pub fn role_resource(resource_type: &ResourceType, role: &Role) -> Resource {
    let mut profile = Profile::new();
    profile.insert("id".into(), json!(role.name()));
    profile.insert("name".into(), json!(role.name()));
    profile.insert("is_system".into(), json!(role.is_system()));

    Resource::role(resource_type, role.name(), role.name(), profile)
        .with_description(role.description())
}

/// One entitlement per workspace, all sharing the role's display metadata.
pub fn role_entitlements(role: &Resource, workspaces: &[Workspace]) -> Vec<Entitlement> {
    let user_type = user_resource_type();

    workspaces
        .iter()
        .map(|workspace| {
            Entitlement::permission(role, role_entitlement_slug(&workspace.name))
                .with_display_name(role.display_name.clone())
                .with_description(role.description.clone())
                .with_grantable_to(&user_type)
        })
        .collect()
}

/// Grants of `role`, one per membership that carries it.
///
/// # Errors
///
/// Fails with [`PandaDocError::WorkspaceNotFound`] as soon as a matching
/// membership names a workspace absent from `workspaces`.
pub fn role_grants(
    role: &Resource,
    users: &[User],
    workspaces: &[Workspace],
) -> PandaDocResult<Vec<Grant>> {
    let role_name = role.id.resource.as_str();
    let workspace_names: HashMap<&str, &str> = workspaces
        .iter()
        .map(|w| (w.id.as_str(), w.name.as_str()))
        .collect();

    let mut grants = Vec::new();
    for user in users {
        for membership in user.workspaces.iter().filter(|m| m.role == role_name) {
            let workspace_name = workspace_names
                .get(membership.workspace_id.as_str())
                .ok_or_else(|| PandaDocError::WorkspaceNotFound(membership.workspace_id.clone()))?;

            let grant = Grant::new(
                role,
                &role_entitlement_slug(workspace_name),
                user_principal(user),
            )
            .with_annotation(Annotation::V1Identifier {
                id: format!(
                    "workspace-grant:{}:{}:{}",
                    role_name, membership.membership_id, membership.role
                ),
            });
            grants.push(grant);
        }
    }

    Ok(grants)
}

fn has_assignments(users: &[User], role_name: &str) -> bool {
    users
        .iter()
        .any(|user| user.workspaces.iter().any(|m| m.role == role_name))
}

/// Emits system and custom roles with workspace-scoped assignments.
#[derive(Debug)]
pub struct RoleBuilder {
    resource_type: ResourceType,
    client: Arc<PandaDocClient>,
    users: CollectionCache<User>,
    workspaces: CollectionCache<Workspace>,
}

impl RoleBuilder {
    pub fn new(client: Arc<PandaDocClient>) -> Self {
        Self {
            resource_type: role_resource_type(),
            client,
            users: CollectionCache::new("users"),
            workspaces: CollectionCache::new("workspaces"),
        }
    }

    async fn users(&self) -> PandaDocResult<&[User]> {
        self.users
            .get_or_fetch(|| self.client.list_all_users())
            .await
    }

    async fn workspaces(&self) -> PandaDocResult<&[Workspace]> {
        self.workspaces
            .get_or_fetch(|| self.client.list_all_workspaces())
            .await
    }

    #[instrument(skip(self, token))]
    async fn list_roles(&self, token: &PageToken) -> PandaDocResult<ListPage<Resource>> {
        PageCursor::decode(&token.token, ROLE_RESOURCE_TYPE_ID)?;

        let roles = discover_roles(self.users().await?);
        debug!(
            custom = roles.iter().filter(|r| !r.is_system()).count(),
            "Discovered roles"
        );

        Ok(ListPage::done(
            roles
                .iter()
                .map(|role| role_resource(&self.resource_type, role))
                .collect(),
        ))
    }

    #[instrument(skip(self, role), fields(role = %role.id.resource))]
    async fn workspace_entitlements(&self, role: &Resource) -> PandaDocResult<ListPage<Entitlement>> {
        let workspaces = self.workspaces().await?;
        Ok(ListPage::done(role_entitlements(role, workspaces)))
    }

    #[instrument(skip(self, role), fields(role = %role.id.resource))]
    async fn assignment_grants(&self, role: &Resource) -> PandaDocResult<ListPage<Grant>> {
        let users = self.users().await?;
        if !has_assignments(users, &role.id.resource) {
            return Ok(ListPage::empty());
        }

        let workspaces = self.workspaces().await?;
        let grants = role_grants(role, users, workspaces).inspect_err(|e| {
            warn!(error = %e, "Role assignment references an unknown workspace");
        })?;

        Ok(ListPage::done(grants))
    }
}

#[async_trait]
impl ResourceSyncer for RoleBuilder {
    fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    async fn list(
        &self,
        _parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> ConnectorResult<ListPage<Resource>> {
        Ok(self.list_roles(token).await?)
    }

    async fn entitlements(
        &self,
        resource: &Resource,
        _token: &PageToken,
    ) -> ConnectorResult<ListPage<Entitlement>> {
        Ok(self.workspace_entitlements(resource).await?)
    }

    async fn grants(
        &self,
        resource: &Resource,
        _token: &PageToken,
    ) -> ConnectorResult<ListPage<Grant>> {
        Ok(self.assignment_grants(resource).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkspaceMembership;

    fn membership(role: &str, workspace_id: &str, membership_id: &str) -> WorkspaceMembership {
        WorkspaceMembership {
            role: role.into(),
            workspace_id: workspace_id.into(),
            membership_id: membership_id.into(),
        }
    }

    fn user(id: &str, memberships: Vec<WorkspaceMembership>) -> User {
        User {
            id: id.into(),
            email: format!("{id}@example.com"),
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            is_organization_owner: false,
            license: String::new(),
            workspaces: memberships,
        }
    }

    fn workspace(id: &str, name: &str) -> Workspace {
        Workspace {
            id: id.into(),
            name: name.into(),
            owner: String::new(),
            date_created: None,
        }
    }

    fn custom_role_resource(name: &str) -> Resource {
        role_resource(
            &role_resource_type(),
            &Role::Custom {
                name: name.to_string(),
            },
        )
    }

    #[test]
    fn test_discover_roles_adds_custom_role_once() {
        let users = vec![
            user(
                "u-1",
                vec![
                    membership("Admin", "ws-1", "m-1"),
                    membership("Ops-Lead", "ws-2", "m-2"),
                ],
            ),
            user(
                "u-2",
                vec![
                    membership("Manager", "ws-1", "m-3"),
                    membership("Ops-Lead", "ws-1", "m-4"),
                ],
            ),
        ];

        let roles = discover_roles(&users);

        assert_eq!(roles.len(), 5);
        assert!(roles[..4].iter().all(Role::is_system));
        let names: Vec<_> = roles.iter().map(Role::name).collect();
        assert_eq!(
            names,
            vec!["Member", "Manager", "Admin", "Collaborator", "Ops-Lead"]
        );
        assert!(!roles[4].is_system());
    }

    #[test]
    fn test_discover_roles_without_users() {
        let roles = discover_roles(&[]);
        assert_eq!(roles.len(), 4);
        assert!(roles.iter().all(Role::is_system));
    }

    #[test]
    fn test_role_resource_profile() {
        let resource = role_resource(&role_resource_type(), &Role::System(SystemRole::Admin));
        assert_eq!(resource.id, ResourceId::new("role", "Admin"));
        assert_eq!(resource.display_name, "Admin");
        assert!(resource.description.is_empty());
        let profile = resource.traits.profile();
        assert_eq!(profile["id"], "Admin");
        assert_eq!(profile["is_system"], true);

        let custom = custom_role_resource("Ops-Lead");
        assert_eq!(custom.description, "Custom role");
        assert_eq!(custom.traits.profile()["is_system"], false);
    }

    #[test]
    fn test_role_entitlements_per_workspace() {
        let role = custom_role_resource("Ops-Lead");
        let workspaces = vec![workspace("ws-1", "Sales"), workspace("ws-2", "Legal")];

        let entitlements = role_entitlements(&role, &workspaces);

        assert_eq!(entitlements.len(), 2);
        assert_eq!(entitlements[0].slug, "assigned in workspace Sales");
        assert_eq!(entitlements[0].id, "role:Ops-Lead:assigned in workspace Sales");
        assert_eq!(entitlements[1].slug, "assigned in workspace Legal");
        for ent in &entitlements {
            assert_eq!(ent.display_name, "Ops-Lead");
            assert_eq!(ent.description, "Custom role");
            assert_eq!(ent.grantable_to, vec!["user".to_string()]);
        }
    }

    #[test]
    fn test_role_grants_with_audit_key() {
        let role = custom_role_resource("Ops-Lead");
        let users = vec![
            user("u-1", vec![membership("Ops-Lead", "ws-2", "m-2")]),
            user("u-2", vec![membership("Admin", "ws-1", "m-3")]),
        ];
        let workspaces = vec![workspace("ws-1", "Sales"), workspace("ws-2", "Legal")];

        let grants = role_grants(&role, &users, &workspaces).unwrap();

        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].principal, ResourceId::new("user", "u-1"));
        assert_eq!(
            grants[0].entitlement,
            "role:Ops-Lead:assigned in workspace Legal"
        );
        assert_eq!(
            grants[0].annotations,
            vec![Annotation::V1Identifier {
                id: "workspace-grant:Ops-Lead:m-2:Ops-Lead".to_string()
            }]
        );
    }

    #[test]
    fn test_role_grants_unknown_workspace_fails() {
        let role = custom_role_resource("Ops-Lead");
        let users = vec![user("u-1", vec![membership("Ops-Lead", "ws-404", "m-1")])];
        let workspaces = vec![workspace("ws-1", "Sales")];

        let err = role_grants(&role, &users, &workspaces).unwrap_err();
        assert!(matches!(err, PandaDocError::WorkspaceNotFound(id) if id == "ws-404"));
    }

    #[test]
    fn test_role_grants_are_deterministic() {
        let role = role_resource(&role_resource_type(), &Role::System(SystemRole::Member));
        let users = vec![
            user("u-1", vec![membership("Member", "ws-1", "m-1")]),
            user(
                "u-2",
                vec![
                    membership("Member", "ws-2", "m-2"),
                    membership("Member", "ws-1", "m-3"),
                ],
            ),
        ];
        let workspaces = vec![workspace("ws-1", "Sales"), workspace("ws-2", "Legal")];

        let first = role_grants(&role, &users, &workspaces).unwrap();
        let second = role_grants(&role, &users, &workspaces).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }
}
