//! Student handler trait and operation dispatch.

use std::future::Future;
use std::pin::Pin;

use campus_student_model::gateway::{GatewayRequest, GatewayResponse};
use campus_student_model::operations::StudentOperation;

/// Trait that the student business logic must implement.
///
/// The handler receives the resolved operation and the structured request
/// and always answers with a complete [`GatewayResponse`]: every failure has
/// already been turned into an error response by the time it returns.
pub trait StudentHandler: Send + Sync + 'static {
    /// Handle one student operation.
    fn handle_operation(
        &self,
        op: StudentOperation,
        request: GatewayRequest,
    ) -> Pin<Box<dyn Future<Output = GatewayResponse> + Send>>;
}

/// Dispatch a student operation to the handler.
pub async fn dispatch_operation<H: StudentHandler>(
    handler: &H,
    op: StudentOperation,
    request: GatewayRequest,
) -> GatewayResponse {
    tracing::debug!(operation = %op, "dispatching student operation");
    handler.handle_operation(op, request).await
}
