//! End-to-end tests of the send pipeline
//!
//! Saved environment, placeholder resolution, per-verb building and execution
//! against a local mock server.

use super::temp_commands;
use gostman::models::{ErrorClass, RequestDefinition};
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_with_merged_query_and_resolved_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("z", "2"))
        .and(query_param("q", "rust"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"hits":1}"#))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, commands) = temp_commands();
    let env = format!(r#"{{"base": "{}", "token": "abc", "term": "rust"}}"#, server.uri());
    assert!(commands.save_environment(&env).is_success());

    let mut def = RequestDefinition::new("search", "get", "{{base}}/search?z=2");
    def.headers = r#"{"Authorization": "Bearer {{token}}"}"#.to_string();
    def.query_params = r#"{"q": "{{term}}"}"#.to_string();

    let result = commands.send(&def).await;
    assert_eq!(result.error_class, ErrorClass::None);
    assert_eq!(result.status, "200 OK");
    assert_eq!(result.body, r#"{"hits":1}"#);
}

#[tokio::test]
async fn test_post_body_sent_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_string(r#"{"name": "Ana", "team": "core"}"#))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, commands) = temp_commands();
    commands.save_environment(&format!(r#"{{"base": "{}", "team": "core"}}"#, server.uri()));

    let mut def = RequestDefinition::new("create", "POST", "{{base}}/users");
    def.headers = r#"{"Content-Type": "application/json"}"#.to_string();
    def.body = r#"{"name": "Ana", "team": "{{team}}"}"#.to_string();

    let result = commands.send(&def).await;
    assert_eq!(result.status, "201 Created");
    assert_eq!(result.body, "created");
}

#[tokio::test]
async fn test_server_error_is_still_completed() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let (_dir, commands) = temp_commands();
    let def = RequestDefinition::new("remove", "DELETE", format!("{}/items/1", server.uri()));

    let result = commands.send(&def).await;
    assert!(result.is_completed());
    assert_eq!(result.status, "500 Internal Server Error");
    assert_eq!(result.body, "boom");
}

#[tokio::test]
async fn test_graphql_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(query_param("id", "1"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({
            "query": "query($id: ID!) { user(id: $id) { name } }",
            "variables": {"id": "1"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":{}}"#))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, commands) = temp_commands();
    let mut def = RequestDefinition::new("user", "GRAPHQL", format!("{}/graphql", server.uri()));
    def.body = "query($id: ID!) { user(id: $id) { name } }".to_string();
    def.query_params = r#"{"id": "1"}"#.to_string();

    let result = commands.send(&def).await;
    assert_eq!(result.status, "200 OK");
    assert_eq!(result.body, r#"{"data":{}}"#);
}

#[tokio::test]
async fn test_malformed_environment_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (_dir, commands) = temp_commands();
    // Bypass validation to simulate a hand-edited file.
    let mut document = commands.store().load();
    document.environment_text = "{broken".to_string();
    commands.store().store(&document).unwrap();

    let def = RequestDefinition::new("ping", "GET", format!("{}/ping", server.uri()));
    let result = commands.send(&def).await;

    assert_eq!(result.error_class, ErrorClass::Configuration);
    assert_eq!(result.status_label(), "Configuration Error");
    assert!(result.body.starts_with("Error parsing Env Variables"));
}

#[tokio::test]
async fn test_unsupported_method_sends_nothing() {
    let (_dir, commands) = temp_commands();
    let def = RequestDefinition::new("opts", "OPTIONS", "http://127.0.0.1:9/");

    let result = commands.send(&def).await;
    assert_eq!(result.error_class, ErrorClass::Configuration);
    assert!(result.status.is_empty());
}

#[tokio::test]
async fn test_unresolved_placeholder_in_header_value_passes_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("X-Token", "{{missing}}"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, commands) = temp_commands();
    let mut def = RequestDefinition::new("raw", "GET", format!("{}/", server.uri()));
    def.headers = r#"{"X-Token": "{{missing}}"}"#.to_string();

    let result = commands.send(&def).await;
    assert_eq!(result.status, "204 No Content");
}
