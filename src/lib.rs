//! Declarative GitHub resource provider.
//!
//! octoform maps flat resource and data-source declarations onto calls
//! against the GitHub REST (v3) and GraphQL (v4) APIs. It is meant to be
//! embedded in an infrastructure-as-code host runtime: the host hands each
//! lifecycle entrypoint a flat attribute state, and octoform reconciles it
//! against the remote service - creating missing objects, detecting drift on
//! read, deleting removed objects, and re-deriving identity on import.
//!
//! # Module Structure
//!
//! - [`config`] - Provider configuration (token, owner, base URL)
//! - [`github`] - GitHub API client: auth, HTTP, GraphQL, secret sealing
//! - [`schema`] - Attribute schema declarations and flat resource state
//! - [`resource`] - Resource and data-source implementations plus registry
//! - [`provider`] - Lifecycle entrypoints dispatched by type name
//! - [`logging`] - Structured logging setup for host-spawned processes
//!
//! # Example
//!
//! ```ignore
//! use octoform::{Provider, ProviderConfig, ResourceState};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let provider = Provider::new(ProviderConfig::default())?;
//!     let mut state = ResourceState::new();
//!     state.set("repository", "infra");
//!     state.set("secret_name", "DEPLOY_KEY");
//!     state.set("plaintext_value", "hunter2");
//!     provider.create("github_dependabot_secret", &mut state).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod github;
pub mod id;
pub mod logging;
pub mod provider;
pub mod resource;
pub mod schema;

pub use config::ProviderConfig;
pub use provider::Provider;
pub use schema::state::{AttrValue, ResourceState};
pub use schema::{AttrType, Attribute, Schema};
