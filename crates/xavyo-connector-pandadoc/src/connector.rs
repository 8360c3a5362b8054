//! PandaDoc connector entry point.

use std::sync::Arc;
use tracing::info;
use xavyo_connector::config::ConnectorConfig;
use xavyo_connector::error::ConnectorResult;
use xavyo_connector::traits::{BoxedResourceSyncer, ConnectorMetadata};

use crate::roles::RoleBuilder;
use crate::users::UserBuilder;
use crate::workspaces::WorkspaceBuilder;
use crate::{PandaDocClient, PandaDocConfig};

const DISPLAY_NAME: &str = "PandaDoc connector";
const DESCRIPTION: &str = "Connector to sync users, workspaces, and roles from PandaDoc.";

/// Syncs users, workspaces and roles from one PandaDoc organization.
pub struct PandaDocConnector {
    config: PandaDocConfig,
    client: Arc<PandaDocClient>,
}

impl std::fmt::Debug for PandaDocConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PandaDocConnector")
            .field("config", &self.config.redacted())
            .field("base_url", &self.client.base_url().as_str())
            .finish()
    }
}

impl PandaDocConnector {
    /// Create a connector with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: PandaDocConfig) -> ConnectorResult<Self> {
        config.validate()?;
        let client = Arc::new(PandaDocClient::new(&config)?);

        info!(
            domain = %config.domain,
            base_url = %client.base_url(),
            "PandaDoc connector initialized"
        );

        Ok(Self { config, client })
    }

    /// One syncer per resource type: users, workspaces, roles.
    ///
    /// Each call returns fresh builders with empty caches, so every sync
    /// pass observes upstream state once.
    pub fn resource_syncers(&self) -> Vec<BoxedResourceSyncer> {
        vec![
            Box::new(UserBuilder::new(Arc::clone(&self.client))),
            Box::new(WorkspaceBuilder::new(Arc::clone(&self.client))),
            Box::new(RoleBuilder::new(Arc::clone(&self.client))),
        ]
    }

    pub fn metadata(&self) -> ConnectorMetadata {
        ConnectorMetadata {
            display_name: DISPLAY_NAME.to_string(),
            description: DESCRIPTION.to_string(),
        }
    }

    pub fn client(&self) -> &PandaDocClient {
        &self.client
    }
}
