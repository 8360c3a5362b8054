//! Connector Framework traits
//!
//! The host drives a sync pass through one [`ResourceSyncer`] per resource
//! type: it lists resources, then asks each resource for its entitlements
//! and grants.

use async_trait::async_trait;

use crate::error::ConnectorResult;
use crate::pagination::{ListPage, PageToken};
use crate::types::{Entitlement, Grant, Resource, ResourceId, ResourceType};

/// Syncs one resource type into the identity graph.
///
/// Implementations must tolerate concurrent calls on the same instance; the
/// host may parallelize resource kinds.
#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    /// Descriptor of the resource type this syncer emits.
    fn resource_type(&self) -> &ResourceType;

    /// List resources of this type.
    ///
    /// # Arguments
    /// * `parent` - Parent resource, if the host is listing children
    /// * `token` - Page request; an empty continuation starts from the beginning
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> ConnectorResult<ListPage<Resource>>;

    /// List the entitlements offered by `resource`.
    async fn entitlements(
        &self,
        resource: &Resource,
        token: &PageToken,
    ) -> ConnectorResult<ListPage<Entitlement>>;

    /// List the grants of entitlements offered by `resource`.
    async fn grants(
        &self,
        resource: &Resource,
        token: &PageToken,
    ) -> ConnectorResult<ListPage<Grant>>;
}

/// Boxed syncer handed to the host.
pub type BoxedResourceSyncer = Box<dyn ResourceSyncer>;

/// Descriptive metadata reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConnectorMetadata {
    pub display_name: String,
    pub description: String,
}
