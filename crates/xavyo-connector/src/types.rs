//! Connector Framework type definitions
//!
//! Identity-graph nodes and edges emitted to the host: resource types,
//! resources, entitlements, and grants.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Profile attached to a resource trait.
pub type Profile = Map<String, Value>;

/// Trait a resource type exposes to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceTrait {
    /// Identity that can receive grants.
    User,
    /// Collection of members.
    Group,
    /// Named set of permissions.
    Role,
}

impl ResourceTrait {
    /// Get the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceTrait::User => "user",
            ResourceTrait::Group => "group",
            ResourceTrait::Role => "role",
        }
    }
}

impl fmt::Display for ResourceTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Descriptor of a kind of resource a connector syncs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    /// Stable identifier (e.g. "user").
    pub id: String,
    /// Human-readable name.
    pub display_name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Traits of resources of this type.
    pub traits: Vec<ResourceTrait>,
}

impl ResourceType {
    /// Create a resource type with a single trait.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, t: ResourceTrait) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            description: String::new(),
            traits: vec![t],
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Identifier of a resource within the identity graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId {
    /// Resource type id.
    pub resource_type: String,
    /// Resource id, unique within its type.
    pub resource: String,
}

impl ResourceId {
    pub fn new(resource_type: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource: resource.into(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource)
    }
}

/// Account status reported for user resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Unspecified,
    Enabled,
    Disabled,
    Deleted,
}

/// Email address attached to a user trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEmail {
    pub address: String,
    pub is_primary: bool,
}

/// Trait-specific payload of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResourceTraits {
    User {
        profile: Profile,
        status: UserStatus,
        emails: Vec<UserEmail>,
    },
    Group {
        profile: Profile,
    },
    Role {
        profile: Profile,
    },
}

impl ResourceTraits {
    /// Profile regardless of trait kind.
    pub fn profile(&self) -> &Profile {
        match self {
            ResourceTraits::User { profile, .. }
            | ResourceTraits::Group { profile }
            | ResourceTraits::Role { profile } => profile,
        }
    }
}

/// A node of the identity graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_resource_id: Option<ResourceId>,
    pub traits: ResourceTraits,
}

impl Resource {
    /// Create a user resource.
    pub fn user(
        resource_type: &ResourceType,
        id: impl Into<String>,
        display_name: impl Into<String>,
        profile: Profile,
        status: UserStatus,
        emails: Vec<UserEmail>,
    ) -> Self {
        Self::new(
            resource_type,
            id,
            display_name,
            ResourceTraits::User {
                profile,
                status,
                emails,
            },
        )
    }

    /// Create a group resource.
    pub fn group(
        resource_type: &ResourceType,
        id: impl Into<String>,
        display_name: impl Into<String>,
        profile: Profile,
    ) -> Self {
        Self::new(
            resource_type,
            id,
            display_name,
            ResourceTraits::Group { profile },
        )
    }

    /// Create a role resource.
    pub fn role(
        resource_type: &ResourceType,
        id: impl Into<String>,
        display_name: impl Into<String>,
        profile: Profile,
    ) -> Self {
        Self::new(
            resource_type,
            id,
            display_name,
            ResourceTraits::Role { profile },
        )
    }

    fn new(
        resource_type: &ResourceType,
        id: impl Into<String>,
        display_name: impl Into<String>,
        traits: ResourceTraits,
    ) -> Self {
        Self {
            id: ResourceId::new(resource_type.id.clone(), id),
            display_name: display_name.into(),
            description: String::new(),
            parent_resource_id: None,
            traits,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the parent resource.
    #[must_use]
    pub fn with_parent(mut self, parent: Option<ResourceId>) -> Self {
        self.parent_resource_id = parent;
        self
    }
}

/// Purpose of an entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntitlementPurpose {
    Assignment,
    Permission,
}

/// A grantable capability scoped to a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    /// `{resource type}:{resource}:{slug}`.
    pub id: String,
    pub resource: ResourceId,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub slug: String,
    pub purpose: EntitlementPurpose,
    /// Resource type ids whose resources may receive this entitlement.
    pub grantable_to: Vec<String>,
}

impl Entitlement {
    /// Create a permission entitlement on `resource`.
    ///
    /// Display name defaults to the slug.
    pub fn permission(resource: &Resource, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            id: entitlement_id(&resource.id, &slug),
            resource: resource.id.clone(),
            display_name: slug.clone(),
            description: String::new(),
            slug,
            purpose: EntitlementPurpose::Permission,
            grantable_to: Vec::new(),
        }
    }

    /// Allow resources of `resource_type` to receive this entitlement.
    #[must_use]
    pub fn with_grantable_to(mut self, resource_type: &ResourceType) -> Self {
        self.grantable_to.push(resource_type.id.clone());
        self
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Builds the id of the entitlement `slug` on `resource`.
pub fn entitlement_id(resource: &ResourceId, slug: &str) -> String {
    format!("{}:{}", resource, slug)
}

/// Metadata attached to grants for host-side audit and dedup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    /// Identifier assigned by a previous generation of the connector.
    V1Identifier { id: String },
}

/// Binding of a principal to an entitlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    /// `{entitlement id}:{principal type}:{principal}`.
    pub id: String,
    /// Id of the granted entitlement.
    pub entitlement: String,
    /// Resource the entitlement belongs to.
    pub resource: ResourceId,
    pub principal: ResourceId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Grant {
    /// Grant entitlement `slug` on `resource` to `principal`.
    pub fn new(resource: &Resource, slug: &str, principal: ResourceId) -> Self {
        let entitlement = entitlement_id(&resource.id, slug);
        Self {
            id: format!("{}:{}", entitlement, principal),
            entitlement,
            resource: resource.id.clone(),
            principal,
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}
