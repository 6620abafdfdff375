//! GitHub API interaction module
//!
//! This module provides the core functionality for talking to the GitHub
//! REST (v3) and GraphQL (v4) APIs, including token resolution, the HTTP
//! client, the GraphQL envelope, and sealed-box secret encryption.
//!
//! # Module Structure
//!
//! - [`auth`] - Token and owner resolution from the environment
//! - [`client`] - Main GitHub client for making API requests
//! - [`http`] - HTTP utilities for REST API calls
//! - [`graphql`] - GraphQL request/response envelope and pagination info
//! - [`crypto`] - Anonymous sealed-box encryption of secret values
//!
//! # Example
//!
//! ```ignore
//! use crate::config::ProviderConfig;
//! use crate::github::client::GithubClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = GithubClient::new(&ProviderConfig::default())?;
//!     let key = client
//!         .get(&client.dependabot_public_key_url("my-repo"))
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod crypto;
pub mod graphql;
pub mod http;
