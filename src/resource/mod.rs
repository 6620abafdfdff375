//! Resources and data sources
//!
//! Each component is a schema declaration plus the lifecycle operations the
//! host runtime drives. Resources own a remote object (create, drift-aware
//! read, delete, import); data sources are read-only queries. All of them
//! work through [`GithubClient`] and a flat [`ResourceState`].

use crate::github::client::GithubClient;
use crate::schema::state::ResourceState;
use crate::schema::Schema;
use anyhow::Result;
use async_trait::async_trait;

pub mod branch_protection_rules;
pub mod dependabot_secret;
pub mod registry;

/// A host-managed remote object with a CRUD lifecycle.
///
/// `create` doubles as update: every mutable attribute on the current
/// components is force-new, so the host recreates on change.
#[async_trait]
pub trait ManagedResource: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Create (or overwrite) the remote object and establish identity.
    async fn create(&self, client: &GithubClient, state: &mut ResourceState) -> Result<()>;

    /// Refresh local state from the remote object. A missing remote object
    /// clears the identifier and succeeds.
    async fn read(&self, client: &GithubClient, state: &mut ResourceState) -> Result<()>;

    /// Delete the remote object.
    async fn delete(&self, client: &GithubClient, state: &mut ResourceState) -> Result<()>;

    /// Re-derive a state from an external identifier string.
    async fn import(&self, client: &GithubClient, external_id: &str) -> Result<ResourceState>;
}

/// A read-only query against remote state.
#[async_trait]
pub trait DataSource: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Populate computed attributes (and the identifier) from remote state.
    async fn read(&self, client: &GithubClient, state: &mut ResourceState) -> Result<()>;
}
