//! Student HTTP service implementing the hyper `Service` trait.

use std::collections::HashMap;
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Incoming;
use tracing::Instrument;

use campus_student_model::error::StudentError;
use campus_student_model::gateway::{GatewayRequest, ID_PARAM};

use crate::dispatch::{StudentHandler, dispatch_operation};
use crate::response::{
    ALLOW_HEADERS, ALLOW_ORIGIN, CONTENT_TYPE, StudentResponseBody, error_response,
    error_to_json, into_http, preflight_response, route_error_response,
};
use crate::router::{Route, RoutingContext, StudentRouter};

/// Default cap on request body size (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Configuration for the student HTTP service.
#[derive(Debug, Clone)]
pub struct StudentHttpConfig {
    /// Collection path, e.g. `/students`.
    pub base_path: String,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl Default for StudentHttpConfig {
    fn default() -> Self {
        Self {
            base_path: "/students".to_owned(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Hyper `Service` implementation for the student API.
///
/// Wraps a [`StudentHandler`] implementation, routes incoming requests to an
/// operation, and relays the handler's structured response.
#[derive(Debug)]
pub struct StudentHttpService<H: StudentHandler> {
    handler: Arc<H>,
    router: Arc<StudentRouter>,
    config: Arc<StudentHttpConfig>,
}

impl<H: StudentHandler> StudentHttpService<H> {
    /// Create a new `StudentHttpService`.
    pub fn new(handler: Arc<H>, config: StudentHttpConfig) -> Self {
        Self {
            handler,
            router: Arc::new(StudentRouter::new(&config.base_path)),
            config: Arc::new(config),
        }
    }

    /// Process a single request through the full pipeline.
    ///
    /// Generic over the request body so any `http_body::Body` can be served.
    pub async fn handle<B>(&self, req: http::Request<B>) -> http::Response<StudentResponseBody>
    where
        B: http_body::Body<Data = Bytes> + Send,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let request_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!(
            "student_request",
            request_id = %request_id,
            method = %req.method(),
            path = %req.uri().path(),
        );
        let response = process_request(
            req,
            self.handler.as_ref(),
            &self.router,
            &self.config,
        )
        .instrument(span)
        .await;
        add_common_headers(response, &request_id)
    }
}

impl<H: StudentHandler> Clone for StudentHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            router: Arc::clone(&self.router),
            config: Arc::clone(&self.config),
        }
    }
}

impl<H: StudentHandler> hyper::service::Service<http::Request<Incoming>>
    for StudentHttpService<H>
{
    type Response = http::Response<StudentResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let svc = self.clone();
        Box::pin(async move { Ok(svc.handle(req).await) })
    }
}

/// Route, collect the body, and dispatch to the handler.
async fn process_request<H, B>(
    req: http::Request<B>,
    handler: &H,
    router: &StudentRouter,
    config: &StudentHttpConfig,
) -> http::Response<StudentResponseBody>
where
    H: StudentHandler,
    B: http_body::Body<Data = Bytes> + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    // 1. Route on method + path.
    let ctx = match router.resolve(&req) {
        Ok(Route::Operation(ctx)) => ctx,
        Ok(Route::Preflight(allowed)) => return preflight_response(allowed),
        Err(err) => {
            tracing::debug!(error = %err, "no route");
            return route_error_response(&err);
        }
    };

    // 2. Collect body, bounded by the configured limit.
    let (_parts, body) = req.into_parts();
    let body = match collect_body(body, config.max_body_bytes).await {
        Ok(body) => body,
        Err(BodyError::TooLarge) => return payload_too_large(),
        Err(BodyError::Read(err)) => {
            return into_http(error_response(ctx.operation, &err));
        }
    };

    // 3. Dispatch to handler.
    let op = ctx.operation;
    match build_gateway_request(ctx, &body) {
        Ok(request) => into_http(dispatch_operation(handler, op, request).await),
        Err(err) => {
            tracing::debug!(operation = %op, "request body is not UTF-8");
            into_http(error_response(op, &err))
        }
    }
}

/// Failure while reading the request body.
enum BodyError {
    TooLarge,
    Read(StudentError),
}

/// Collect the body into a single `Bytes` buffer, enforcing `limit`.
async fn collect_body<B>(body: B, limit: usize) -> Result<Bytes, BodyError>
where
    B: http_body::Body<Data = Bytes> + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => Err(BodyError::TooLarge),
        Err(e) => Err(BodyError::Read(StudentError::unexpected(format!(
            "Failed to read request body: {e}"
        )))),
    }
}

/// Assemble the structured request a handler sees.
///
/// A body that is not UTF-8 cannot be JSON, so operations that read the body
/// reject it as invalid JSON. Read and Delete ignore their body.
fn build_gateway_request(
    ctx: RoutingContext,
    body: &Bytes,
) -> Result<GatewayRequest, StudentError> {
    let body = if body.is_empty() {
        None
    } else {
        match String::from_utf8(body.to_vec()) {
            Ok(text) => Some(text),
            Err(_) if ctx.operation.requires_body() => return Err(StudentError::invalid_json()),
            Err(_) => None,
        }
    };
    let path_parameters = ctx
        .student_id
        .map(|id| HashMap::from([(ID_PARAM.to_owned(), id)]));
    Ok(GatewayRequest {
        body,
        path_parameters,
    })
}

fn payload_too_large() -> http::Response<StudentResponseBody> {
    let mut response = http::Response::new(StudentResponseBody::from(error_to_json(
        "Request body too large",
    )));
    *response.status_mut() = http::StatusCode::PAYLOAD_TOO_LARGE;
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
    response
}

/// Add common response headers to every student response.
fn add_common_headers(
    mut response: http::Response<StudentResponseBody>,
    request_id: &str,
) -> http::Response<StudentResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.entry("x-request-id").or_insert(hv);
    }
    headers.insert("server", http::HeaderValue::from_static("Campus"));

    response
}
