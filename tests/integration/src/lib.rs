//! Integration tests for Campus Server.
//!
//! These tests require a running Campus Server at `localhost:4566`.
//! They are marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p campus-integration -- --ignored
//! ```
//!
//! The DynamoDB store tests additionally need a DynamoDB-compatible endpoint
//! at `DYNAMODB_ENDPOINT_URL` (default `http://localhost:8000`).

use std::sync::Once;

use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
use serde_json::{Value, json};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Base URL of the server.
#[must_use]
pub fn server_url() -> String {
    std::env::var("CAMPUS_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_owned())
}

/// URL of the student collection.
#[must_use]
pub fn students_url() -> String {
    format!("{}/students", server_url())
}

/// URL of a single student.
#[must_use]
pub fn student_url(student_id: &str) -> String {
    format!("{}/{student_id}", students_url())
}

/// Create an HTTP client for the server.
#[must_use]
pub fn http_client() -> reqwest::Client {
    init_tracing();
    reqwest::Client::new()
}

/// Generate a unique student id for a test.
#[must_use]
pub fn test_student_id(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// A complete create body for `student_id`.
#[must_use]
pub fn create_body(student_id: &str) -> Value {
    json!({
        "studentID": student_id,
        "name": "Jane Doe",
        "email": "jane@example.edu",
        "major": "Computer Science",
        "gpa": 3.8,
    })
}

/// Create a student and return its id. Caller is responsible for cleanup.
pub async fn create_test_student(client: &reqwest::Client, prefix: &str) -> String {
    let student_id = test_student_id(prefix);
    let resp = client
        .post(students_url())
        .json(&create_body(&student_id))
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to create student {student_id}: {e}"));
    assert_eq!(resp.status(), 200, "create {student_id}");
    student_id
}

/// Delete a student, ignoring any failure.
pub async fn cleanup_student(client: &reqwest::Client, student_id: &str) {
    let _ = client.delete(student_url(student_id)).send().await;
}

/// Create a DynamoDB client pointing at the local endpoint.
#[must_use]
pub fn dynamodb_client() -> aws_sdk_dynamodb::Client {
    init_tracing();

    let creds = Credentials::new("test", "test", None, None, "integration-test");
    let endpoint = std::env::var("DYNAMODB_ENDPOINT_URL")
        .unwrap_or_else(|_| "http://localhost:8000".to_owned());

    let config = aws_sdk_dynamodb::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(creds)
        .endpoint_url(endpoint)
        .build();

    aws_sdk_dynamodb::Client::from_conf(config)
}

/// Generate a unique table name for a DynamoDB test.
#[must_use]
pub fn test_table_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

mod test_dynamodb_store;
mod test_errors;
mod test_routing;
mod test_students;
