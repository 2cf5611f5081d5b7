//! Student HTTP service layer for Campus.
//!
//! This crate turns HTTP requests into handler invocations and back:
//!
//! - **Router**: maps method + path (`/students`, `/students/{id}`) to an operation
//! - **Handler trait**: the boundary between HTTP and business logic
//! - **Service**: hyper `Service` implementation, CORS preflight, body limits
//! - **Response helpers**: the fixed CORS headers and `{"error": ...}` bodies

pub mod dispatch;
pub mod response;
pub mod router;
pub mod service;

pub use response::StudentResponseBody;
pub use dispatch::StudentHandler;
pub use service::{StudentHttpConfig, StudentHttpService};
