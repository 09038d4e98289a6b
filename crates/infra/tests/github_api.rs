//! GitHub adapter tests against a mock API server.

use quorum_core::ports::IssueTracker;
use quorum_domain::QuorumError;
use quorum_infra::GithubClient;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GithubClient {
    GithubClient::with_base_url("test-token", server.uri()).expect("client")
}

fn repo_page(names: &[&str]) -> Value {
    Value::Array(names.iter().map(|name| json!({ "name": name })).collect())
}

#[tokio::test]
async fn lists_public_repos_across_pages() {
    let server = MockServer::start().await;

    let first_page: Vec<String> = (0..100).map(|i| format!("repo-{i}")).collect();
    let first_refs: Vec<&str> = first_page.iter().map(String::as_str).collect();

    Mock::given(method("GET"))
        .and(path("/orgs/nodejs/repos"))
        .and(query_param("type", "public"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_page(&first_refs)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orgs/nodejs/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_page(&["node", "TSC"])))
        .mount(&server)
        .await;

    let repos = client(&server).list_public_repos("nodejs").await.expect("repos");
    assert_eq!(repos.len(), 102);
    assert_eq!(repos[100], "node");
    assert_eq!(repos[101], "TSC");
}

#[tokio::test]
async fn open_issues_carry_the_pull_request_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/nodejs/node/issues"))
        .and(query_param("labels", "tsc-agenda"))
        .and(query_param("state", "open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "number": 7,
                "title": "Discuss thing",
                "html_url": "https://github.com/nodejs/node/issues/7"
            },
            {
                "number": 8,
                "title": "A pull request",
                "html_url": "https://github.com/nodejs/node/pull/8",
                "pull_request": { "url": "https://api.github.com/repos/nodejs/node/pulls/8" }
            }
        ])))
        .mount(&server)
        .await;

    let issues =
        client(&server).list_open_issues("nodejs", "node", "tsc-agenda").await.expect("issues");
    assert_eq!(issues.len(), 2);
    assert!(!issues[0].pull_request);
    assert!(issues[1].pull_request);
}

#[tokio::test]
async fn search_returns_hits_with_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1,
            "items": [{
                "number": 42,
                "title": "Node.js TSC Meeting 2025-01-15",
                "body": "existing body",
                "html_url": "https://github.com/nodejs/TSC/issues/42"
            }]
        })))
        .mount(&server)
        .await;

    let hits = client(&server)
        .search_issues("\"Node.js TSC Meeting 2025-01-15\" repo:nodejs/TSC in:title is:issue is:open")
        .await
        .expect("hits");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].number, 42);
    assert_eq!(hits[0].body.as_deref(), Some("existing body"));
}

#[tokio::test]
async fn creates_issue_with_title_body_and_labels() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/nodejs/TSC/issues"))
        .and(body_partial_json(json!({
            "title": "Node.js TSC Meeting 2025-01-15",
            "body": "the body",
            "labels": ["meeting"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "number": 43,
            "title": "Node.js TSC Meeting 2025-01-15",
            "html_url": "https://github.com/nodejs/TSC/issues/43"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let handle = client(&server)
        .create_issue(
            "nodejs",
            "TSC",
            "Node.js TSC Meeting 2025-01-15",
            "the body",
            &["meeting".to_string()],
        )
        .await
        .expect("handle");
    assert_eq!(handle.id, "43");
    assert_eq!(handle.url, "https://github.com/nodejs/TSC/issues/43");
}

#[tokio::test]
async fn updates_issue_body_in_place() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/repos/nodejs/TSC/issues/43"))
        .and(body_partial_json(json!({ "body": "new body" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 43,
            "html_url": "https://github.com/nodejs/TSC/issues/43"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let handle =
        client(&server).update_issue("nodejs", "TSC", 43, "new body").await.expect("handle");
    assert_eq!(handle.id, "43");
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/nodejs/repos"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client(&server).list_public_repos("nodejs").await.expect_err("should fail");
    assert!(matches!(err, QuorumError::Auth(_)));
}
