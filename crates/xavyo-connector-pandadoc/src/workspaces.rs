//! Workspace synchronization from PandaDoc.
//!
//! Workspaces become group resources with a single `member` entitlement.
//! Membership comes from the users' workspace lists, not from a workspace
//! endpoint.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument};
use xavyo_connector::error::ConnectorResult;
use xavyo_connector::pagination::{ListPage, PageToken};
use xavyo_connector::traits::ResourceSyncer;
use xavyo_connector::types::{Entitlement, Grant, Profile, Resource, ResourceId, ResourceType};

use crate::cache::CollectionCache;
use crate::client::PageOptions;
use crate::cursor::PageCursor;
use crate::models::{User, Workspace};
use crate::resource_types::{
    user_resource_type, workspace_resource_type, WORKSPACE_RESOURCE_TYPE_ID,
};
use crate::users::user_principal;
use crate::{PandaDocClient, PandaDocResult};

/// Slug and display name of the workspace membership entitlement.
pub const MEMBER_ENTITLEMENT: &str = "member";

/// Maps a PandaDoc workspace to a group resource.
pub fn workspace_resource(resource_type: &ResourceType, workspace: &Workspace) -> Resource {
    let mut profile = Profile::new();
    profile.insert("workspace_id".into(), json!(workspace.id));
    profile.insert("name".into(), json!(workspace.name));
    profile.insert("owner".into(), json!(workspace.owner));
    if let Some(created) = workspace.date_created_rfc3339() {
        profile.insert("date_created".into(), json!(created));
    }

    Resource::group(
        resource_type,
        workspace.id.clone(),
        workspace.name.clone(),
        profile,
    )
}

/// Member grants of `workspace`, in user order then membership order.
pub(crate) fn membership_grants(workspace: &Resource, users: &[User]) -> Vec<Grant> {
    users
        .iter()
        .flat_map(|user| {
            user.workspaces
                .iter()
                .filter(move |m| m.workspace_id == workspace.id.resource)
                .map(move |_| Grant::new(workspace, MEMBER_ENTITLEMENT, user_principal(user)))
        })
        .collect()
}

/// Emits workspaces and their memberships.
#[derive(Debug)]
pub struct WorkspaceBuilder {
    resource_type: ResourceType,
    client: Arc<PandaDocClient>,
    users: CollectionCache<User>,
}

impl WorkspaceBuilder {
    pub fn new(client: Arc<PandaDocClient>) -> Self {
        Self {
            resource_type: workspace_resource_type(),
            client,
            users: CollectionCache::new("users"),
        }
    }

    /// Fetches the page named by `token`. Workspaces are not cached here.
    #[instrument(skip(self, token))]
    async fn list_workspaces(&self, token: &PageToken) -> PandaDocResult<ListPage<Resource>> {
        let cursor = PageCursor::decode(&token.token, WORKSPACE_RESOURCE_TYPE_ID)?;
        let page = self
            .client
            .list_workspaces(PageOptions::new(cursor.page(), token.size))
            .await?;

        let resources: Vec<Resource> = page
            .items
            .iter()
            .map(|workspace| workspace_resource(&self.resource_type, workspace))
            .collect();

        let next_token = cursor.advance(page.next_page)?;
        debug!(
            count = resources.len(),
            has_more = !next_token.is_empty(),
            "Emitting workspace resources"
        );

        Ok(ListPage::with_next(resources, next_token))
    }

    #[instrument(skip(self, workspace), fields(workspace_id = %workspace.id.resource))]
    async fn member_grants(&self, workspace: &Resource) -> PandaDocResult<ListPage<Grant>> {
        let users = self
            .users
            .get_or_fetch(|| self.client.list_all_users())
            .await?;

        Ok(ListPage::done(membership_grants(workspace, users)))
    }
}

#[async_trait]
impl ResourceSyncer for WorkspaceBuilder {
    fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    async fn list(
        &self,
        _parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> ConnectorResult<ListPage<Resource>> {
        Ok(self.list_workspaces(token).await?)
    }

    async fn entitlements(
        &self,
        resource: &Resource,
        _token: &PageToken,
    ) -> ConnectorResult<ListPage<Entitlement>> {
        let member = Entitlement::permission(resource, MEMBER_ENTITLEMENT)
            .with_display_name(MEMBER_ENTITLEMENT)
            .with_description(resource.description.clone())
            .with_grantable_to(&user_resource_type());

        Ok(ListPage::done(vec![member]))
    }

    async fn grants(
        &self,
        resource: &Resource,
        _token: &PageToken,
    ) -> ConnectorResult<ListPage<Grant>> {
        Ok(self.member_grants(resource).await?)
    }
}
