//! Student request router.
//!
//! Routes are resolved from the method and path alone:
//!
//! ```text
//! POST    /students        -> Create
//! GET     /students/{id}   -> Read
//! PUT     /students/{id}   -> Update
//! DELETE  /students/{id}   -> Delete
//! OPTIONS /students[/{id}] -> CORS preflight
//! ```
//!
//! The `/students` base path is configurable so the service can sit behind a
//! stage prefix such as `/dev/students`.

use http::Method;
use percent_encoding::percent_decode_str;

use campus_student_model::operations::StudentOperation;

/// Methods accepted on the collection path.
pub const COLLECTION_METHODS: &str = "OPTIONS,POST";

/// Methods accepted on the item path.
pub const ITEM_METHODS: &str = "OPTIONS,GET,PUT,DELETE";

/// Errors produced while routing a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// No route matches the path.
    #[error("No route for {method} {path}")]
    NotFound {
        /// Request method.
        method: String,
        /// Request path.
        path: String,
    },
    /// The path matches but the method is not served there.
    #[error("Method {method} not allowed on {path}")]
    MethodNotAllowed {
        /// Request method.
        method: String,
        /// Request path.
        path: String,
        /// Methods served on this path.
        allowed: &'static str,
    },
    /// The `{id}` segment does not percent-decode to UTF-8.
    #[error("Invalid 'id' in path parameters")]
    InvalidId {
        /// Request path.
        path: String,
    },
}

impl RouteError {
    /// HTTP status for this routing failure.
    #[must_use]
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            Self::NotFound { .. } => http::StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => http::StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidId { .. } => http::StatusCode::BAD_REQUEST,
        }
    }

    /// The `Allow` header value, for `MethodNotAllowed`.
    #[must_use]
    pub fn allowed_methods(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } | Self::InvalidId { .. } => None,
            Self::MethodNotAllowed { allowed, .. } => Some(allowed),
        }
    }
}

/// The result of routing a request to a student operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingContext {
    /// The identified operation.
    pub operation: StudentOperation,
    /// The decoded `{id}` path segment, for item routes.
    pub student_id: Option<String>,
}

/// A resolved route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Invoke a handler.
    Operation(RoutingContext),
    /// Answer a CORS preflight with the given allowed methods.
    Preflight(&'static str),
}

/// Maps requests under a base path to student operations.
#[derive(Debug, Clone)]
pub struct StudentRouter {
    base_path: String,
}

impl StudentRouter {
    /// Create a router serving the collection at `base_path` (e.g. `/students`).
    #[must_use]
    pub fn new(base_path: &str) -> Self {
        let trimmed = base_path.trim().trim_end_matches('/');
        let base_path = if trimmed.is_empty() || trimmed.starts_with('/') {
            trimmed.to_owned()
        } else {
            format!("/{trimmed}")
        };
        Self { base_path }
    }

    /// Resolve an HTTP request to a route.
    pub fn resolve<B>(&self, req: &http::Request<B>) -> Result<Route, RouteError> {
        let method = req.method();
        let path = req.uri().path();

        let not_found = || RouteError::NotFound {
            method: method.to_string(),
            path: path.to_owned(),
        };

        let rest = path.strip_prefix(self.base_path.as_str()).ok_or_else(not_found)?;

        // Collection: exactly the base path, optionally with a trailing slash.
        if rest.is_empty() || rest == "/" {
            return match *method {
                Method::POST => Ok(Route::Operation(RoutingContext {
                    operation: StudentOperation::Create,
                    student_id: None,
                })),
                Method::OPTIONS => Ok(Route::Preflight(COLLECTION_METHODS)),
                _ => Err(RouteError::MethodNotAllowed {
                    method: method.to_string(),
                    path: path.to_owned(),
                    allowed: COLLECTION_METHODS,
                }),
            };
        }

        let segment = rest.strip_prefix('/').ok_or_else(not_found)?;
        let segment = segment.strip_suffix('/').unwrap_or(segment);
        if segment.is_empty() || segment.contains('/') {
            return Err(not_found());
        }
        if *method == Method::OPTIONS {
            return Ok(Route::Preflight(ITEM_METHODS));
        }

        let operation =
            StudentOperation::from_item_method(method).ok_or_else(|| RouteError::MethodNotAllowed {
                method: method.to_string(),
                path: path.to_owned(),
                allowed: ITEM_METHODS,
            })?;

        let student_id = percent_decode_str(segment)
            .decode_utf8()
            .map_err(|_| RouteError::InvalidId {
                path: path.to_owned(),
            })?
            .into_owned();

        Ok(Route::Operation(RoutingContext {
            operation,
            student_id: Some(student_id),
        }))
    }
}

impl Default for StudentRouter {
    fn default() -> Self {
        Self::new("/students")
    }
}
