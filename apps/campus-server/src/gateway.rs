//! Gateway service in front of the student API.
//!
//! Health-check probes (`/health`, `/_health`) are answered here; every
//! other request is handed to the student HTTP service, which owns routing
//! under the configured base path.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use hyper::body::Incoming;
use hyper::service::Service;

use campus_student_http::response::StudentResponseBody;
use campus_student_http::dispatch::StudentHandler;
use campus_student_http::service::StudentHttpService;

/// Gateway that answers health probes and forwards student traffic.
#[derive(Debug)]
pub struct GatewayService<H: StudentHandler> {
    students: StudentHttpService<H>,
    store_backend: &'static str,
}

impl<H: StudentHandler> GatewayService<H> {
    /// Create a new gateway over the student service.
    pub fn new(students: StudentHttpService<H>, store_backend: &'static str) -> Self {
        Self {
            students,
            store_backend,
        }
    }

    /// Serve one request.
    pub async fn handle<B>(&self, req: http::Request<B>) -> http::Response<StudentResponseBody>
    where
        B: http_body::Body<Data = Bytes> + Send,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        if is_health_check(req.method(), req.uri().path()) {
            return health_check_response(self.store_backend);
        }
        self.students.handle(req).await
    }
}

impl<H: StudentHandler> Clone for GatewayService<H> {
    fn clone(&self) -> Self {
        Self {
            students: self.students.clone(),
            store_backend: self.store_backend,
        }
    }
}

impl<H: StudentHandler> Service<http::Request<Incoming>> for GatewayService<H> {
    type Response = http::Response<StudentResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let gateway = self.clone();
        Box::pin(async move { Ok(gateway.handle(req).await) })
    }
}

/// Check if the request is a health check probe.
fn is_health_check(method: &http::Method, path: &str) -> bool {
    *method == http::Method::GET && (path == "/health" || path == "/_health")
}

/// Report the gateway as running, along with the active store backend.
fn health_check_response(store_backend: &str) -> http::Response<StudentResponseBody> {
    let body = format!(r#"{{"status":"running","store":"{store_backend}"}}"#);
    let mut response = http::Response::new(StudentResponseBody::from(body));
    response.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json"),
    );
    response
}
