//! Student response formatting.
//!
//! Every handler response carries the same CORS headers, differing only in
//! the allowed-methods value, and a JSON body: either the success payload or
//!
//! ```json
//! { "error": "Student with ID S1 not found" }
//! ```

use std::collections::BTreeMap;

use bytes::Bytes;
use http_body_util::Full;

use campus_student_model::error::StudentError;
use campus_student_model::gateway::GatewayResponse;
use campus_student_model::operations::StudentOperation;

use crate::router::RouteError;

/// Body of every student HTTP response. Preflight answers carry an empty one.
pub type StudentResponseBody = Full<Bytes>;

/// Content type for every JSON response.
pub const CONTENT_TYPE: &str = "application/json";

/// `Access-Control-Allow-Origin` value.
pub const ALLOW_ORIGIN: &str = "*";

/// `Access-Control-Allow-Headers` value.
pub const ALLOW_HEADERS: &str = "Content-Type";

/// The fixed CORS header set for a response.
#[must_use]
pub fn cors_headers(allowed_methods: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "Access-Control-Allow-Origin".to_owned(),
            ALLOW_ORIGIN.to_owned(),
        ),
        (
            "Access-Control-Allow-Headers".to_owned(),
            ALLOW_HEADERS.to_owned(),
        ),
        (
            "Access-Control-Allow-Methods".to_owned(),
            allowed_methods.to_owned(),
        ),
    ])
}

/// Serialize an error message into the `{"error": ...}` body.
#[must_use]
pub fn error_to_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

/// Convert a `StudentError` into the operation's error response.
#[must_use]
pub fn error_response(op: StudentOperation, error: &StudentError) -> GatewayResponse {
    GatewayResponse {
        status_code: error.status_code.as_u16(),
        headers: cors_headers(op.allowed_methods()),
        body: error_to_json(&error.message),
    }
}

/// Build a 200 response carrying `payload` as JSON.
///
/// A payload that fails to serialize becomes a 500 error response.
#[must_use]
pub fn json_response<T: serde::Serialize>(op: StudentOperation, payload: &T) -> GatewayResponse {
    match serde_json::to_string(payload) {
        Ok(body) => GatewayResponse {
            status_code: http::StatusCode::OK.as_u16(),
            headers: cors_headers(op.allowed_methods()),
            body,
        },
        Err(e) => error_response(
            op,
            &StudentError::unexpected(format!("Failed to serialize response: {e}")),
        ),
    }
}

/// Build the `{"message": ...}` success response of a write operation.
#[must_use]
pub fn message_response(op: StudentOperation, message: &str) -> GatewayResponse {
    json_response(op, &serde_json::json!({ "message": message }))
}

/// Convert a structured gateway response into an HTTP response.
///
/// Headers that are not valid HTTP header names or values are dropped.
#[must_use]
pub fn into_http(response: GatewayResponse) -> http::Response<StudentResponseBody> {
    let mut http_response = http::Response::new(Full::from(response.body));
    *http_response.status_mut() = http::StatusCode::from_u16(response.status_code)
        .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);

    let headers = http_response.headers_mut();
    for (name, value) in response.headers {
        match (
            http::HeaderName::from_bytes(name.as_bytes()),
            http::HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "dropping invalid response header"),
        }
    }
    headers.insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static(CONTENT_TYPE),
    );

    http_response
}

/// Answer a CORS preflight request.
#[must_use]
pub fn preflight_response(allowed_methods: &'static str) -> http::Response<StudentResponseBody> {
    let mut response = http::Response::new(Full::default());
    let headers = response.headers_mut();
    headers.insert(
        "access-control-allow-origin",
        http::HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        "access-control-allow-headers",
        http::HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        "access-control-allow-methods",
        http::HeaderValue::from_static(allowed_methods),
    );
    response
}

/// Convert a routing failure into an HTTP error response.
#[must_use]
pub fn route_error_response(error: &RouteError) -> http::Response<StudentResponseBody> {
    let mut response = http::Response::new(Full::from(error_to_json(&error.to_string())));
    *response.status_mut() = error.status_code();

    let headers = response.headers_mut();
    headers.insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static(CONTENT_TYPE),
    );
    headers.insert(
        "access-control-allow-origin",
        http::HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        "access-control-allow-headers",
        http::HeaderValue::from_static(ALLOW_HEADERS),
    );
    if let Some(allowed) = error.allowed_methods() {
        headers.insert(http::header::ALLOW, http::HeaderValue::from_static(allowed));
    }
    response
}
