//! Branch protection rules data source against a mocked GraphQL endpoint
//!
//! Verifies cursor pagination, empty results, and error propagation.

use octoform::{AttrValue, Provider, ProviderConfig, ResourceState};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_provider(server: &MockServer) -> Provider {
    Provider::new(ProviderConfig {
        token: Some("test-token".to_string()),
        owner: Some("octocat".to_string()),
        base_url: Some(server.uri()),
    })
    .expect("provider should build")
}

fn query_state() -> ResourceState {
    let mut state = ResourceState::new();
    state.set("repository", "infra");
    state
}

fn rule_node(pattern: &str, review_count: i64) -> Value {
    json!({
        "pattern": pattern,
        "allowsDeletions": false,
        "allowsForcePushes": false,
        "blocksCreations": false,
        "dismissesStaleReviews": false,
        "isAdminEnforced": false,
        "lockAllowsFetchAndMerge": false,
        "lockBranch": false,
        "requireLastPushApproval": false,
        "requiredApprovingReviewCount": review_count,
        "requiresApprovingReviews": true,
        "requiresCodeOwnerReviews": true,
        "requiresCommitSignatures": false,
        "requiresConversationResolution": false,
        "requiresLinearHistory": false,
        "requiresDeployments": false,
        "requiresStatusChecks": true,
        "requiresStrictStatusChecks": false,
        "restrictsPushes": false,
        "restrictsReviewDismissals": false,
    })
}

fn rules_page(nodes: Vec<Value>, has_next_page: bool, end_cursor: Option<&str>) -> Value {
    json!({
        "data": {
            "repository": {
                "id": "R_kgDOexample",
                "branchProtectionRules": {
                    "nodes": nodes,
                    "pageInfo": {
                        "hasNextPage": has_next_page,
                        "endCursor": end_cursor,
                    }
                }
            }
        }
    })
}

#[tokio::test]
async fn test_zero_rules_yields_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rules_page(vec![], false, None)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = test_provider(&server);
    let mut state = query_state();
    provider
        .read_data_source("github_branch_protection_rules", &mut state)
        .await
        .expect("zero rules is not an error");

    assert_eq!(state.id(), Some("R_kgDOexample"));
    assert_eq!(state.get("rules"), Some(&AttrValue::List(vec![])));
}

#[tokio::test]
async fn test_multi_page_results_are_aggregated() {
    let server = MockServer::start().await;

    // First page: two rules and a continuation cursor.
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rules_page(
            vec![rule_node("main*", 2), rule_node("dev*", 1)],
            true,
            Some("cursor-1"),
        )))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    // Second page: requested with the cursor from the first.
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({"variables": {"cursor": "cursor-1"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(rules_page(
            vec![rule_node("release/*", 3)],
            false,
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let provider = test_provider(&server);
    let mut state = query_state();
    provider
        .read_data_source("github_branch_protection_rules", &mut state)
        .await
        .expect("paginated read should succeed");

    let rules = state
        .get("rules")
        .and_then(AttrValue::as_list)
        .expect("rules should be a list");
    assert_eq!(rules.len(), 3, "aggregate equals the sum of page sizes");

    let first = rules[0].as_map().expect("rule should be a map");
    assert_eq!(first.get("pattern"), Some(&AttrValue::String("main*".into())));
    assert_eq!(
        first.get("required_approving_review_count"),
        Some(&AttrValue::Int(2))
    );
    assert_eq!(
        first.get("requires_code_owner_reviews"),
        Some(&AttrValue::Bool(true))
    );

    let last = rules[2].as_map().expect("rule should be a map");
    assert_eq!(
        last.get("pattern"),
        Some(&AttrValue::String("release/*".into()))
    );

    assert_eq!(state.id(), Some("R_kgDOexample"));
}

#[tokio::test]
async fn test_query_errors_abort_without_partial_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{"message": "API rate limit exceeded"}]
        })))
        .mount(&server)
        .await;

    let provider = test_provider(&server);
    let mut state = query_state();
    let err = provider
        .read_data_source("github_branch_protection_rules", &mut state)
        .await
        .expect_err("query errors propagate");

    assert!(err.to_string().contains("API rate limit exceeded"));
    assert!(state.get("rules").is_none(), "no partial results");
    assert!(state.id().is_none());
}

#[tokio::test]
async fn test_missing_repository_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "repository": null }
        })))
        .mount(&server)
        .await;

    let provider = test_provider(&server);
    let mut state = query_state();
    let err = provider
        .read_data_source("github_branch_protection_rules", &mut state)
        .await
        .expect_err("missing repository is an error");
    assert!(err.to_string().contains("infra"));
}

#[tokio::test]
async fn test_missing_required_repository_attribute() {
    let server = MockServer::start().await;
    let provider = test_provider(&server);

    let mut state = ResourceState::new();
    let err = provider
        .read_data_source("github_branch_protection_rules", &mut state)
        .await
        .expect_err("repository is required");
    assert!(err.to_string().contains("Invalid configuration"));
    assert!(server.received_requests().await.unwrap().is_empty());
}
