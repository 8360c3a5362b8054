//! User synchronization from PandaDoc.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument};
use xavyo_connector::error::ConnectorResult;
use xavyo_connector::pagination::{ListPage, PageToken};
use xavyo_connector::traits::ResourceSyncer;
use xavyo_connector::types::{
    Entitlement, Grant, Profile, Resource, ResourceId, ResourceType, UserEmail, UserStatus,
};

use crate::cache::CollectionCache;
use crate::cursor::PageCursor;
use crate::models::User;
use crate::resource_types::{user_resource_type, USER_RESOURCE_TYPE_ID};
use crate::{PandaDocClient, PandaDocResult};

/// Maps a PandaDoc user to a user resource.
///
/// PandaDoc exposes no account status, so every user is reported enabled.
pub fn user_resource(resource_type: &ResourceType, user: &User) -> Resource {
    let mut profile = Profile::new();
    profile.insert("user_id".into(), json!(user.id));
    profile.insert("first_name".into(), json!(user.first_name));
    profile.insert("last_name".into(), json!(user.last_name));
    profile.insert("email".into(), json!(user.email));
    profile.insert("phone".into(), json!(user.phone));
    profile.insert("license".into(), json!(user.license));
    profile.insert("owner".into(), json!(user.is_organization_owner));

    Resource::user(
        resource_type,
        user.id.clone(),
        user.email.clone(),
        profile,
        UserStatus::Enabled,
        vec![UserEmail {
            address: user.email.clone(),
            is_primary: true,
        }],
    )
}

/// Principal id of a user in grants.
pub(crate) fn user_principal(user: &User) -> ResourceId {
    ResourceId::new(USER_RESOURCE_TYPE_ID, user.id.clone())
}

/// Emits one resource per PandaDoc user.
#[derive(Debug)]
pub struct UserBuilder {
    resource_type: ResourceType,
    client: Arc<PandaDocClient>,
    users: CollectionCache<User>,
}

impl UserBuilder {
    pub fn new(client: Arc<PandaDocClient>) -> Self {
        Self {
            resource_type: user_resource_type(),
            client,
            users: CollectionCache::new("users"),
        }
    }

    /// Lists all users, loading the full collection on first use.
    #[instrument(skip(self, token))]
    async fn list_users(&self, token: &PageToken) -> PandaDocResult<ListPage<Resource>> {
        PageCursor::decode(&token.token, USER_RESOURCE_TYPE_ID)?;

        let users = self
            .users
            .get_or_fetch(|| self.client.list_all_users())
            .await?;

        debug!(count = users.len(), "Emitting user resources");

        Ok(ListPage::done(
            users
                .iter()
                .map(|user| user_resource(&self.resource_type, user))
                .collect(),
        ))
    }
}

#[async_trait]
impl ResourceSyncer for UserBuilder {
    fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    async fn list(
        &self,
        _parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> ConnectorResult<ListPage<Resource>> {
        Ok(self.list_users(token).await?)
    }

    /// Users offer nothing to grant.
    async fn entitlements(
        &self,
        _resource: &Resource,
        _token: &PageToken,
    ) -> ConnectorResult<ListPage<Entitlement>> {
        Ok(ListPage::empty())
    }

    async fn grants(
        &self,
        _resource: &Resource,
        _token: &PageToken,
    ) -> ConnectorResult<ListPage<Grant>> {
        Ok(ListPage::empty())
    }
}
