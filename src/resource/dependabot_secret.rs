//! Dependabot repository secret
//!
//! Write-only secret storage: the value goes up sealed against the
//! repository public key and can never be read back. Reads only see the
//! secret's name and timestamps, so drift is detected by comparing the
//! remotely tracked update timestamp against the one cached at creation.

use super::ManagedResource;
use crate::github::client::GithubClient;
use crate::github::{crypto, http};
use crate::id::{build_two_part_id, parse_two_part_id};
use crate::schema::state::{AttrValue, ResourceState};
use crate::schema::{Attribute, Schema};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use zeroize::Zeroizing;

pub const TYPE_NAME: &str = "github_dependabot_secret";

/// Repository public key used to seal secret values.
#[derive(Debug, Deserialize)]
struct PublicKeyResponse {
    key_id: String,
    key: String,
}

/// Secret descriptor as returned by the REST API. The value itself is
/// write-only and never part of the response.
#[derive(Debug, Deserialize)]
struct SecretResponse {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

pub struct DependabotSecret;

#[async_trait]
impl ManagedResource for DependabotSecret {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with_attribute(
                "repository",
                Attribute::required_string()
                    .force_new()
                    .description("Name of the repository."),
            )
            .with_attribute(
                "secret_name",
                Attribute::required_string()
                    .force_new()
                    .validator(validate_secret_name)
                    .description("Name of the secret."),
            )
            .with_attribute(
                "encrypted_value",
                Attribute::optional_string()
                    .force_new()
                    .sensitive()
                    .conflicts_with(&["plaintext_value"])
                    .validator(validate_base64_value)
                    .description(
                        "Encrypted value of the secret using the repository public key, in base64.",
                    ),
            )
            .with_attribute(
                "plaintext_value",
                Attribute::optional_string()
                    .force_new()
                    .sensitive()
                    .conflicts_with(&["encrypted_value"])
                    .description("Plaintext value of the secret to be encrypted."),
            )
            .with_attribute(
                "created_at",
                Attribute::computed_string().description("Creation timestamp of the secret."),
            )
            .with_attribute(
                "updated_at",
                Attribute::computed_string().description("Last update timestamp of the secret."),
            )
    }

    async fn create(&self, client: &GithubClient, state: &mut ResourceState) -> Result<()> {
        let repo = state
            .get_nonempty_str("repository")
            .context("Missing required attribute \"repository\"")?
            .to_string();
        let secret_name = state
            .get_nonempty_str("secret_name")
            .context("Missing required attribute \"secret_name\"")?
            .to_string();

        // The key may rotate at any time, so it is fetched before every
        // write and never cached.
        let public_key = fetch_public_key(client, &repo).await?;

        let encrypted_value = match state.get_nonempty_str("encrypted_value") {
            Some(encrypted) => encrypted.to_string(),
            None => {
                let plaintext = Zeroizing::new(
                    state
                        .get_str("plaintext_value")
                        .unwrap_or_default()
                        .to_string(),
                );
                crypto::seal_and_encode(&plaintext, &public_key.key)
                    .context("Failed to encrypt secret value")?
            }
        };

        let url = client.dependabot_secret_url(&repo, &secret_name);
        let body = json!({
            "encrypted_value": encrypted_value,
            "key_id": public_key.key_id,
        });
        client
            .put(&url, Some(&body))
            .await
            .with_context(|| format!("Failed to store dependabot secret {:?}", secret_name))?;

        state.set_id(build_two_part_id(&repo, &secret_name));
        self.read(client, state).await
    }

    async fn read(&self, client: &GithubClient, state: &mut ResourceState) -> Result<()> {
        let Some(id) = state.id().map(str::to_string) else {
            bail!("Dependabot secret has no identifier to read");
        };
        let (repo, secret_name) = parse_two_part_id(&id, "repository", "secret_name")?;

        let url = client.dependabot_secret_url(&repo, &secret_name);
        let response = match client.get(&url).await {
            Ok(response) => response,
            Err(err) if http::error_is_not_found(&err) => {
                tracing::warn!(
                    "Removing dependabot secret {} from state because it no longer exists on GitHub",
                    id
                );
                state.clear_id();
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let secret: SecretResponse = serde_json::from_value(response)
            .context("Unexpected dependabot secret response shape")?;

        state.set("created_at", secret.created_at.to_rfc3339());

        // Timestamp-based drift detection. The first read after create
        // caches updated_at; a later read that sees a different remote
        // timestamp means the secret changed outside this provider. The
        // cached value can no longer be verified against a write-only
        // secret, so the identifier is dropped to force recreation.
        let remote_updated_at = secret.updated_at.to_rfc3339();
        let cached_updated_at = state.get_nonempty_str("updated_at").map(str::to_string);
        match cached_updated_at {
            Some(cached) if cached != remote_updated_at => {
                tracing::warn!("The dependabot secret {} was externally updated on GitHub", id);
                state.clear_id();
            }
            Some(_) => {}
            None => state.set("updated_at", remote_updated_at),
        }

        Ok(())
    }

    async fn delete(&self, client: &GithubClient, state: &mut ResourceState) -> Result<()> {
        let Some(id) = state.id().map(str::to_string) else {
            bail!("Dependabot secret has no identifier to delete");
        };
        let (repo, secret_name) = parse_two_part_id(&id, "repository", "secret_name")?;

        tracing::debug!("Deleting dependabot secret: {}", id);
        client
            .delete(&client.dependabot_secret_url(&repo, &secret_name))
            .await
            .with_context(|| format!("Failed to delete dependabot secret {:?}", secret_name))?;

        Ok(())
    }

    async fn import(&self, client: &GithubClient, external_id: &str) -> Result<ResourceState> {
        let (repo, secret_name) = parse_two_part_id(external_id, "repository", "secret_name")?;

        let url = client.dependabot_secret_url(&repo, &secret_name);
        let response = client
            .get(&url)
            .await
            .with_context(|| format!("Failed to import dependabot secret {:?}", external_id))?;
        let secret: SecretResponse = serde_json::from_value(response)
            .context("Unexpected dependabot secret response shape")?;

        let mut state = ResourceState::new();
        state.set_id(build_two_part_id(&repo, &secret_name));
        state.set("repository", repo);
        state.set("secret_name", secret_name);
        // encrypted_value and plaintext_value are write-only and cannot be
        // imported.
        state.set("created_at", secret.created_at.to_rfc3339());
        state.set("updated_at", secret.updated_at.to_rfc3339());

        Ok(state)
    }
}

/// Fetch the repository public key used to seal secret values.
async fn fetch_public_key(client: &GithubClient, repo: &str) -> Result<PublicKeyResponse> {
    let url = client.dependabot_public_key_url(repo);
    let response = client
        .get(&url)
        .await
        .with_context(|| format!("Failed to fetch dependabot public key for {:?}", repo))?;
    serde_json::from_value(response).context("Unexpected public key response shape")
}

/// Validate a secret name.
/// Names are alphanumerics and underscores, may not begin with a digit,
/// and may not begin with the reserved GITHUB_ prefix.
fn validate_secret_name(name: &str, value: &AttrValue) -> Result<()> {
    let Some(secret_name) = value.as_str() else {
        bail!("{} must be a string", name);
    };

    let mut chars = secret_name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => bail!(
            "{} must start with a letter or underscore, got {:?}",
            name,
            secret_name
        ),
    }
    if !secret_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        bail!(
            "{} may only contain letters, digits, and underscores, got {:?}",
            name,
            secret_name
        );
    }
    if secret_name.to_ascii_uppercase().starts_with("GITHUB_") {
        bail!("{} may not begin with the reserved GITHUB_ prefix", name);
    }

    Ok(())
}

/// Validate that an attribute holds standard base64.
fn validate_base64_value(name: &str, value: &AttrValue) -> Result<()> {
    let Some(encoded) = value.as_str() else {
        bail!("{} must be a string", name);
    };
    crypto::validate_base64(encoded).with_context(|| format!("{} must be valid base64", name))
}
