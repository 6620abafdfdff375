//! Provider Configuration
//!
//! Connection settings for the GitHub APIs. Nothing here is ever persisted
//! to disk; the host runtime passes configuration in, and anything not set
//! explicitly falls back to the conventional environment variables.

use crate::github::auth;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// REST endpoint of github.com.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderConfig {
    /// API token. Falls back to GITHUB_TOKEN, then GH_TOKEN.
    #[serde(default)]
    pub token: Option<String>,
    /// Owner (user or organization) all repository paths are scoped to.
    /// Falls back to GITHUB_OWNER, then GITHUB_ORGANIZATION.
    #[serde(default)]
    pub owner: Option<String>,
    /// REST base URL, for GitHub Enterprise installs.
    /// Falls back to GITHUB_BASE_URL, then github.com.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Get effective token (explicit > environment)
    pub fn effective_token(&self) -> Option<String> {
        self.token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(auth::get_default_token)
    }

    /// Get effective owner (explicit > environment)
    pub fn effective_owner(&self) -> Option<String> {
        self.owner
            .clone()
            .filter(|o| !o.is_empty())
            .or_else(auth::get_default_owner)
    }

    /// Get effective base URL (explicit > environment > github.com)
    pub fn effective_base_url(&self) -> String {
        self.base_url
            .clone()
            .filter(|u| !u.is_empty())
            .or_else(|| std::env::var("GITHUB_BASE_URL").ok().filter(|u| !u.is_empty()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Validate the configuration without touching the network.
    pub fn validate(&self) -> Result<()> {
        let base_url = self.effective_base_url();
        let url = Url::parse(&base_url)
            .with_context(|| format!("Invalid GitHub base URL {:?}", base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("GitHub base URL must be http or https, got {:?}", base_url);
        }

        if let Some(owner) = &self.owner {
            if !auth::validate_owner(owner) {
                bail!("Invalid GitHub owner login {:?}", owner);
            }
        }

        Ok(())
    }
}
