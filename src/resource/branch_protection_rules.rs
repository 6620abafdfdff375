//! Branch protection rules data source
//!
//! Read-only listing of every branch protection rule on a repository,
//! aggregated across GraphQL pages.

use super::DataSource;
use crate::github::client::GithubClient;
use crate::github::graphql::PageInfo;
use crate::schema::state::{AttrValue, ResourceState};
use crate::schema::{Attribute, Schema};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const TYPE_NAME: &str = "github_branch_protection_rules";

/// Nodes fetched per GraphQL page.
const PAGE_SIZE: u32 = 100;

const RULES_QUERY: &str = r#"
query($owner: String!, $name: String!, $first: Int!, $cursor: String) {
  repository(owner: $owner, name: $name) {
    id
    branchProtectionRules(first: $first, after: $cursor) {
      nodes {
        pattern
        allowsDeletions
        allowsForcePushes
        blocksCreations
        dismissesStaleReviews
        isAdminEnforced
        lockAllowsFetchAndMerge
        lockBranch
        requireLastPushApproval
        requiredApprovingReviewCount
        requiresApprovingReviews
        requiresCodeOwnerReviews
        requiresCommitSignatures
        requiresConversationResolution
        requiresLinearHistory
        requiresDeployments
        requiresStatusChecks
        requiresStrictStatusChecks
        restrictsPushes
        restrictsReviewDismissals
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}
"#;

/// GraphQL node field -> flat attribute key.
const RULE_FIELDS: &[(&str, &str)] = &[
    ("pattern", "pattern"),
    ("allowsDeletions", "allows_deletions"),
    ("allowsForcePushes", "allows_force_pushes"),
    ("blocksCreations", "blocks_creations"),
    ("dismissesStaleReviews", "dismisses_stale_reviews"),
    ("isAdminEnforced", "is_admin_enforced"),
    ("lockAllowsFetchAndMerge", "lock_allows_fetch_and_merge"),
    ("lockBranch", "lock_branch"),
    ("requireLastPushApproval", "require_last_push_approval"),
    ("requiredApprovingReviewCount", "required_approving_review_count"),
    ("requiresApprovingReviews", "requires_approving_reviews"),
    ("requiresCodeOwnerReviews", "requires_code_owner_reviews"),
    ("requiresCommitSignatures", "requires_commit_signatures"),
    ("requiresConversationResolution", "requires_conversation_resolution"),
    ("requiresLinearHistory", "requires_linear_history"),
    ("requiresDeployments", "requires_deployments"),
    ("requiresStatusChecks", "requires_status_checks"),
    ("requiresStrictStatusChecks", "requires_strict_status_checks"),
    ("restrictsPushes", "restricts_pushes"),
    ("restrictsReviewDismissals", "restricts_review_dismissals"),
];

pub struct BranchProtectionRules;

#[async_trait]
impl DataSource for BranchProtectionRules {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with_attribute(
                "repository",
                Attribute::required_string().description("Name of the repository."),
            )
            .with_attribute(
                "rules",
                Attribute::computed_list()
                    .description("All branch protection rules of the repository."),
            )
    }

    async fn read(&self, client: &GithubClient, state: &mut ResourceState) -> Result<()> {
        let repository = state
            .get_nonempty_str("repository")
            .context("Missing required attribute \"repository\"")?
            .to_string();

        let mut rules: Vec<AttrValue> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut repository_id = String::new();

        loop {
            let variables = json!({
                "owner": client.owner,
                "name": repository,
                "first": PAGE_SIZE,
                "cursor": cursor,
            });
            let data = client.graphql(RULES_QUERY, variables).await?;

            let repo = data
                .get("repository")
                .filter(|v| !v.is_null())
                .with_context(|| format!("Repository {:?} not found in GraphQL response", repository))?;
            if let Some(id) = repo.get("id").and_then(|v| v.as_str()) {
                repository_id = id.to_string();
            }

            let connection = repo
                .get("branchProtectionRules")
                .context("GraphQL response missing branchProtectionRules")?;
            if let Some(nodes) = connection.get("nodes").and_then(|v| v.as_array()) {
                rules.extend(nodes.iter().map(flatten_rule));
            }

            let page_info: PageInfo = connection
                .get("pageInfo")
                .cloned()
                .map(serde_json::from_value)
                .transpose()
                .context("GraphQL response has malformed pageInfo")?
                .unwrap_or_default();
            if !page_info.has_next_page {
                break;
            }
            cursor = page_info.end_cursor;
        }

        tracing::debug!(
            "Fetched {} branch protection rules for {}",
            rules.len(),
            repository
        );

        state.set_id(repository_id);
        state.set("rules", AttrValue::List(rules));

        Ok(())
    }
}

/// Flatten one GraphQL rule node into a snake_case attribute map.
/// Null fields are omitted rather than defaulted.
fn flatten_rule(node: &Value) -> AttrValue {
    let mut rule = BTreeMap::new();
    for (remote, local) in RULE_FIELDS {
        let value = match node.get(remote) {
            Some(Value::String(s)) => AttrValue::String(s.clone()),
            Some(Value::Bool(b)) => AttrValue::Bool(*b),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => AttrValue::Int(i),
                None => continue,
            },
            _ => continue,
        };
        rule.insert(local.to_string(), value);
    }
    AttrValue::Map(rule)
}
