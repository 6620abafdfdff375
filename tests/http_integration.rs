//! Integration tests for the GitHub HTTP client using wiremock
//!
//! These tests verify the HTTP client behavior against mocked endpoints,
//! ensuring proper handling of various response codes and edge cases.

use octoform::config::ProviderConfig;
use octoform::github::client::GithubClient;
use octoform::github::http::{GithubHttpClient, HttpError};
use serde_json::json;
use wiremock::matchers::{bearer_token, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> GithubClient {
    GithubClient::new(&ProviderConfig {
        token: Some("test-token".to_string()),
        owner: Some("octocat".to_string()),
        base_url: Some(server.uri()),
    })
    .expect("client should build")
}

/// Test module for HTTP client integration tests
mod http_client_tests {
    use super::*;

    /// Test successful GET request returns parsed JSON
    #[tokio::test]
    async fn test_get_success_returns_json() {
        let server = MockServer::start().await;

        let expected_response = json!({
            "name": "DEPLOY_KEY",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-02T11:00:00Z"
        });

        Mock::given(method("GET"))
            .and(path("/repos/octocat/infra/dependabot/secrets/DEPLOY_KEY"))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&expected_response))
            .mount(&server)
            .await;

        let http = GithubHttpClient::new().expect("client should build");
        let url = format!(
            "{}/repos/octocat/infra/dependabot/secrets/DEPLOY_KEY",
            server.uri()
        );

        let response = http
            .get(&url, "test-token")
            .await
            .expect("Request should succeed");

        assert_eq!(response["name"], "DEPLOY_KEY");
        assert_eq!(response["created_at"], "2024-05-01T10:00:00Z");
    }

    /// Test GitHub default headers are sent on every request
    #[tokio::test]
    async fn test_github_headers_are_sent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/headers"))
            .and(header("Accept", "application/vnd.github+json"))
            .and(header("X-GitHub-Api-Version", "2022-11-28"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let http = GithubHttpClient::new().expect("client should build");
        let url = format!("{}/headers", server.uri());
        http.get(&url, "test-token")
            .await
            .expect("Request should succeed");
    }

    /// Test 401 response surfaces the GitHub error message
    #[tokio::test]
    async fn test_401_returns_unauthorized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/infra/dependabot/secrets/KEY"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Bad credentials",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;

        let http = GithubHttpClient::new().expect("client should build");
        let url = format!("{}/repos/octocat/infra/dependabot/secrets/KEY", server.uri());

        let err = http
            .get(&url, "bad-token")
            .await
            .expect_err("Request should fail");

        match err {
            HttpError::Status { status, message } => {
                assert_eq!(status.as_u16(), 401);
                assert_eq!(message, "Bad credentials");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    /// Test 404 response is structurally distinguishable
    #[tokio::test]
    async fn test_404_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/infra/dependabot/secrets/GONE"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Not Found"
            })))
            .mount(&server)
            .await;

        let http = GithubHttpClient::new().expect("client should build");
        let url = format!("{}/repos/octocat/infra/dependabot/secrets/GONE", server.uri());

        let err = http
            .get(&url, "test-token")
            .await
            .expect_err("Request should fail");
        assert!(err.is_not_found());

        let err = anyhow::Error::new(err).context("while reading");
        assert!(octoform::github::http::error_is_not_found(&err));
    }

    /// Test PUT with empty success body maps to null
    #[tokio::test]
    async fn test_put_empty_response() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/repos/octocat/infra/dependabot/secrets/KEY"))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let http = GithubHttpClient::new().expect("client should build");
        let url = format!("{}/repos/octocat/infra/dependabot/secrets/KEY", server.uri());

        let response = http
            .put(&url, "test-token", Some(&json!({"encrypted_value": "abc", "key_id": "1"})))
            .await
            .expect("Request should succeed");

        assert!(response.is_null());
    }

    /// Test DELETE request
    #[tokio::test]
    async fn test_delete_request() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/repos/octocat/infra/dependabot/secrets/KEY"))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let http = GithubHttpClient::new().expect("client should build");
        let url = format!("{}/repos/octocat/infra/dependabot/secrets/KEY", server.uri());

        let response = http
            .delete(&url, "test-token")
            .await
            .expect("Request should succeed");
        assert!(response.is_null());
    }

    /// Test rate limiting (429) response propagates unchanged
    #[tokio::test]
    async fn test_rate_limit_429() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rate-limited"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "message": "API rate limit exceeded"
            })))
            .mount(&server)
            .await;

        let http = GithubHttpClient::new().expect("client should build");
        let url = format!("{}/rate-limited", server.uri());

        let err = http
            .get(&url, "test-token")
            .await
            .expect_err("Request should fail");
        match err {
            HttpError::Status { status, message } => {
                assert_eq!(status.as_u16(), 429);
                assert_eq!(message, "API rate limit exceeded");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }
}

/// Test module for the GraphQL call path
mod graphql_tests {
    use super::*;

    /// Test a successful query returns only the data payload
    #[tokio::test]
    async fn test_graphql_returns_data_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "repository": { "id": "R_abc123" } }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let data = client
            .graphql("query { repository { id } }", json!({}))
            .await
            .expect("Query should succeed");

        assert_eq!(data["repository"]["id"], "R_abc123");
    }

    /// Test a non-empty errors array aborts the call
    #[tokio::test]
    async fn test_graphql_errors_abort() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [
                    { "message": "Could not resolve to a Repository" }
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .graphql("query { repository { id } }", json!({}))
            .await
            .expect_err("Query should fail");

        assert!(err.to_string().contains("Could not resolve to a Repository"));
    }
}
