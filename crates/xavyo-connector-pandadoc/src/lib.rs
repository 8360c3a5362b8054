//! PandaDoc Connector for xavyo
//!
//! This crate implements the xavyo-connector traits for PandaDoc, syncing an
//! organization's users, workspaces and workspace roles into the identity
//! graph through the PandaDoc public API.
//!
//! # Features
//!
//! - API-Key authentication, US and EU deployments
//! - Users as user resources with their profile and primary email
//! - Workspaces as groups with a `member` entitlement
//! - System and discovered custom roles with per-workspace entitlements
//!
//! # Example
//!
//! ```no_run
//! use xavyo_connector::pagination::PageToken;
//! use xavyo_connector_pandadoc::{PandaDocConfig, PandaDocConnector, PandaDocDomain};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PandaDocConfig::builder()
//!     .api_key("your-api-key")
//!     .domain(PandaDocDomain::Us)
//!     .build()?;
//!
//! let connector = PandaDocConnector::new(config)?;
//! for syncer in connector.resource_syncers() {
//!     let page = syncer.list(None, &PageToken::new(50)).await?;
//!     println!("{}: {} resources", syncer.resource_type().id, page.items.len());
//! }
//! # Ok(())
//! # }
//! ```

mod cache;
mod client;
mod config;
mod connector;
mod cursor;
mod error;
mod models;
mod resource_types;
mod roles;
mod users;
mod workspaces;

// Re-exports
pub use client::{Page, PageOptions, PandaDocClient, MAX_PAGE_SIZE};
pub use config::{PandaDocConfig, PandaDocConfigBuilder, PandaDocDomain};
pub use connector::PandaDocConnector;
pub use cursor::PageCursor;
pub use error::{PandaDocError, PandaDocResult};
pub use models::{
    ListResponse, Role, SystemRole, User, Workspace, WorkspaceMembership,
    CUSTOM_ROLE_DESCRIPTION,
};
pub use resource_types::{
    role_resource_type, user_resource_type, workspace_resource_type, ROLE_RESOURCE_TYPE_ID,
    USER_RESOURCE_TYPE_ID, WORKSPACE_RESOURCE_TYPE_ID,
};
pub use roles::{
    discover_roles, role_entitlement_slug, role_entitlements, role_grants, role_resource,
    RoleBuilder,
};
pub use users::{user_resource, UserBuilder};
pub use workspaces::{workspace_resource, WorkspaceBuilder, MEMBER_ENTITLEMENT};
