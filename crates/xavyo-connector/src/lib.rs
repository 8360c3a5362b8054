//! # Connector Framework
//!
//! Core abstractions for syncing external identity systems into the xavyo
//! identity graph.
//!
//! ## Architecture
//!
//! A connector exposes one [`ResourceSyncer`] per resource type. The host
//! drives each sync pass:
//!
//! 1. `list` every resource type, following page tokens until exhausted
//! 2. `entitlements` for each listed resource
//! 3. `grants` for each listed resource
//!
//! ## Example
//!
//! ```ignore
//! use xavyo_connector::prelude::*;
//!
//! for syncer in connector.resource_syncers() {
//!     let mut token = PageToken::new(50);
//!     loop {
//!         let page = syncer.list(None, &token).await?;
//!         for resource in &page.items {
//!             let grants = syncer.grants(resource, &PageToken::default()).await?;
//!         }
//!         if !page.has_more() {
//!             break;
//!         }
//!         token = token.with_token(page.next_token);
//!     }
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`types`] - Resource types, resources, entitlements and grants
//! - [`pagination`] - Host page tokens and the state bag behind them
//! - [`traits`] - The `ResourceSyncer` trait
//! - [`error`] - Error types with transient/permanent classification
//! - [`config`] - Configuration trait

pub mod config;
pub mod error;
pub mod pagination;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
///
/// ```
/// use xavyo_connector::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::ConnectorConfig;
    pub use crate::error::{ConnectorError, ConnectorResult};
    pub use crate::pagination::{Bag, ListPage, PageState, PageToken};
    pub use crate::traits::{BoxedResourceSyncer, ConnectorMetadata, ResourceSyncer};
    pub use crate::types::{
        Annotation, Entitlement, EntitlementPurpose, Grant, Profile, Resource, ResourceId,
        ResourceTrait, ResourceTraits, ResourceType, UserEmail, UserStatus,
    };
}

// Re-export async_trait for connector implementors
pub use async_trait::async_trait;
