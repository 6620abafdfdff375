//! Provider dispatch
//!
//! The lifecycle entrypoints the host runtime drives, dispatched by type
//! name through the registry. Each entrypoint is one independent blocking
//! request/response exchange; the remote service is the only shared state.

use crate::config::ProviderConfig;
use crate::github::client::GithubClient;
use crate::resource::registry;
use crate::schema::state::ResourceState;
use anyhow::{Context, Result};

/// Configured provider instance
pub struct Provider {
    config: ProviderConfig,
    client: GithubClient,
}

impl Provider {
    /// Create a provider from validated configuration
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.validate()?;
        let client = GithubClient::new(&config)?;
        Ok(Self { config, client })
    }

    /// The configuration this provider was built from
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// The underlying GitHub client
    pub fn client(&self) -> &GithubClient {
        &self.client
    }

    /// All registered resource type names
    pub fn resource_type_names() -> Vec<&'static str> {
        registry::resource_type_names()
    }

    /// All registered data-source type names
    pub fn data_source_type_names() -> Vec<&'static str> {
        registry::data_source_type_names()
    }

    /// Create (or overwrite) a remote object from the desired state.
    /// The state is schema-validated first; nothing is written when
    /// validation fails.
    pub async fn create(&self, type_name: &str, state: &mut ResourceState) -> Result<()> {
        let resource = registry::get_resource(type_name)
            .with_context(|| format!("Unknown resource type {:?}", type_name))?;
        resource
            .schema()
            .validate(state)
            .with_context(|| format!("Invalid configuration for {}", type_name))?;

        tracing::debug!("create: type={}", type_name);
        resource.create(&self.client, state).await
    }

    /// Refresh local state from the remote object.
    pub async fn read(&self, type_name: &str, state: &mut ResourceState) -> Result<()> {
        let resource = registry::get_resource(type_name)
            .with_context(|| format!("Unknown resource type {:?}", type_name))?;

        tracing::debug!("read: type={}", type_name);
        resource.read(&self.client, state).await
    }

    /// Delete the remote object.
    pub async fn delete(&self, type_name: &str, state: &mut ResourceState) -> Result<()> {
        let resource = registry::get_resource(type_name)
            .with_context(|| format!("Unknown resource type {:?}", type_name))?;

        tracing::debug!("delete: type={}", type_name);
        resource.delete(&self.client, state).await
    }

    /// Re-derive a resource state from an external identifier.
    pub async fn import(&self, type_name: &str, external_id: &str) -> Result<ResourceState> {
        let resource = registry::get_resource(type_name)
            .with_context(|| format!("Unknown resource type {:?}", type_name))?;

        tracing::debug!("import: type={} id={}", type_name, external_id);
        resource.import(&self.client, external_id).await
    }

    /// Run a read-only data-source query.
    pub async fn read_data_source(&self, type_name: &str, state: &mut ResourceState) -> Result<()> {
        let data_source = registry::get_data_source(type_name)
            .with_context(|| format!("Unknown data source type {:?}", type_name))?;
        data_source
            .schema()
            .validate(state)
            .with_context(|| format!("Invalid configuration for {}", type_name))?;

        tracing::debug!("read_data_source: type={}", type_name);
        data_source.read(&self.client, state).await
    }
}
