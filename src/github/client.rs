//! GitHub Client
//!
//! Main client for interacting with the GitHub APIs, combining token
//! authentication, HTTP functionality, and endpoint construction for both
//! the REST (v3) and GraphQL (v4) surfaces.

use super::http::GithubHttpClient;
use crate::config::ProviderConfig;
use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use url::Url;
use urlencoding::encode;

/// Main GitHub client
#[derive(Clone)]
pub struct GithubClient {
    pub http: GithubHttpClient,
    pub owner: String,
    token: String,
    rest_base: Url,
    graphql_url: Url,
}

impl GithubClient {
    /// Create a new GitHub client from provider configuration
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let token = config
            .effective_token()
            .context("No GitHub token configured. Set GITHUB_TOKEN or pass one explicitly")?;
        let owner = config
            .effective_owner()
            .context("No GitHub owner configured. Set GITHUB_OWNER or pass one explicitly")?;
        if !super::auth::validate_owner(&owner) {
            bail!("Invalid GitHub owner login: {:?}", owner);
        }

        let mut rest_base = Url::parse(&config.effective_base_url())
            .context("Failed to parse GitHub base URL")?;
        if !rest_base.path().ends_with('/') {
            rest_base.set_path(&format!("{}/", rest_base.path()));
        }
        let graphql_url = graphql_endpoint(&rest_base)?;

        let http = GithubHttpClient::new().context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            owner,
            token,
            rest_base,
            graphql_url,
        })
    }

    /// Make a GET request to a GitHub API
    pub async fn get(&self, url: &str) -> Result<Value> {
        Ok(self.http.get(url, &self.token).await?)
    }

    /// Make a POST request to a GitHub API
    pub async fn post(&self, url: &str, body: Option<&Value>) -> Result<Value> {
        Ok(self.http.post(url, &self.token, body).await?)
    }

    /// Make a PUT request to a GitHub API
    pub async fn put(&self, url: &str, body: Option<&Value>) -> Result<Value> {
        Ok(self.http.put(url, &self.token, body).await?)
    }

    /// Make a DELETE request to a GitHub API
    pub async fn delete(&self, url: &str) -> Result<Value> {
        Ok(self.http.delete(url, &self.token).await?)
    }

    /// Execute a GraphQL query and return its `data` payload.
    /// A non-empty `errors` array aborts the call; no partial results are
    /// handed back.
    pub async fn graphql(&self, query: &str, variables: Value) -> Result<Value> {
        let body = json!({ "query": query, "variables": variables });
        let response = self
            .http
            .post(self.graphql_url.as_str(), &self.token, Some(&body))
            .await?;

        if let Some(errors) = response.get("errors").and_then(|v| v.as_array()) {
            if !errors.is_empty() {
                let messages: Vec<&str> = errors
                    .iter()
                    .filter_map(|e| e.get("message").and_then(|m| m.as_str()))
                    .collect();
                bail!("GraphQL query failed: {}", messages.join("; "));
            }
        }

        response
            .get("data")
            .cloned()
            .context("GraphQL response missing data payload")
    }

    // =========================================================================
    // REST endpoint builders
    // =========================================================================

    /// Build a repository-scoped REST URL
    pub fn repo_url(&self, repo: &str, tail: &str) -> String {
        format!(
            "{}repos/{}/{}/{}",
            self.rest_base,
            encode(&self.owner),
            encode(repo),
            tail
        )
    }

    /// Build the dependabot secret URL for a repository
    pub fn dependabot_secret_url(&self, repo: &str, secret_name: &str) -> String {
        self.repo_url(repo, &format!("dependabot/secrets/{}", encode(secret_name)))
    }

    /// Build the dependabot public key URL for a repository
    pub fn dependabot_public_key_url(&self, repo: &str) -> String {
        self.repo_url(repo, "dependabot/secrets/public-key")
    }
}

/// Derive the GraphQL endpoint from the REST base URL.
/// github.com serves GraphQL at `/graphql` next to the REST root; GitHub
/// Enterprise mounts REST under `/api/v3/` and GraphQL under `/api/graphql`.
fn graphql_endpoint(rest_base: &Url) -> Result<Url> {
    let base = rest_base.as_str();
    let endpoint = if let Some(prefix) = base.strip_suffix("api/v3/") {
        format!("{}api/graphql", prefix)
    } else {
        format!("{}graphql", base)
    };
    Url::parse(&endpoint).context("Failed to derive GraphQL endpoint")
}
