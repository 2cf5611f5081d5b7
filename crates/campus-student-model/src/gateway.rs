//! Structured request and response exchanged with the HTTP gateway.
//!
//! The shapes follow the API Gateway proxy integration, so a proxy event
//! deserializes straight into [`GatewayRequest`] and a [`GatewayResponse`]
//! serializes into what the gateway relays:
//!
//! ```json
//! { "statusCode": 200, "headers": { "...": "..." }, "body": "{\"message\":\"...\"}" }
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Name of the path parameter carrying the student id.
pub const ID_PARAM: &str = "id";

/// An invocation of one handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    /// Raw request body, expected to hold a JSON object.
    #[serde(default)]
    pub body: Option<String>,
    /// Path parameters extracted by the router.
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
}

impl GatewayRequest {
    /// Create an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attach the `id` path parameter.
    #[must_use]
    pub fn with_path_id(mut self, id: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(ID_PARAM.to_owned(), id.into());
        self
    }

    /// The body, if present and non-empty.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.is_empty())
    }

    /// The `id` path parameter, if present and non-empty.
    #[must_use]
    pub fn path_id(&self) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(ID_PARAM))
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }
}

/// A handler's answer, relayed verbatim by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
    /// JSON-encoded body.
    pub body: String,
}

impl GatewayResponse {
    /// Parse the body back into JSON.
    pub fn json_body(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Look up a header by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}
