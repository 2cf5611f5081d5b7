//! Student handler implementation bridging HTTP to business logic.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use campus_student_http::dispatch::StudentHandler;
use campus_student_http::response::{error_response, json_response, message_response};
use campus_student_model::error::StudentError;
use campus_student_model::gateway::{GatewayRequest, GatewayResponse};
use campus_student_model::operations::StudentOperation;

use crate::provider::StudentProvider;

/// Handler that bridges the HTTP layer to the student provider.
#[derive(Debug)]
pub struct CampusStudentHandler {
    provider: Arc<StudentProvider>,
}

impl CampusStudentHandler {
    /// Create a new handler wrapping a provider.
    #[must_use]
    pub fn new(provider: Arc<StudentProvider>) -> Self {
        Self { provider }
    }
}

impl StudentHandler for CampusStudentHandler {
    fn handle_operation(
        &self,
        op: StudentOperation,
        request: GatewayRequest,
    ) -> Pin<Box<dyn Future<Output = GatewayResponse> + Send>> {
        let provider = Arc::clone(&self.provider);
        Box::pin(async move { dispatch(provider.as_ref(), op, &request).await })
    }
}

/// Run one invocation and map its outcome onto a gateway response.
async fn dispatch(
    provider: &StudentProvider,
    op: StudentOperation,
    request: &GatewayRequest,
) -> GatewayResponse {
    tracing::info!(
        operation = %op,
        student_id = request.path_id().unwrap_or("-"),
        "handling student request",
    );
    tracing::debug!(body = request.body().unwrap_or_default(), "request body");

    let result = match op {
        StudentOperation::Create => provider.handle_create(request).await.map(|student_id| {
            tracing::info!(operation = %op, %student_id, "student created");
            written(op)
        }),
        StudentOperation::Read => provider
            .handle_read(request)
            .await
            .map(|student| json_response(op, &student)),
        StudentOperation::Update => provider
            .handle_update(request)
            .await
            .map(|()| written(op)),
        StudentOperation::Delete => provider
            .handle_delete(request)
            .await
            .map(|()| written(op)),
    };

    match result {
        Ok(response) => {
            tracing::debug!(operation = %op, status = response.status_code, "student request succeeded");
            response
        }
        Err(err) => failed(op, &err),
    }
}

fn written(op: StudentOperation) -> GatewayResponse {
    message_response(op, op.success_message().unwrap_or_default())
}

fn failed(op: StudentOperation, err: &StudentError) -> GatewayResponse {
    if err.is_client_error() {
        tracing::warn!(operation = %op, code = %err.code, error = %err.message, "student request rejected");
    } else {
        tracing::error!(operation = %op, error = %err.message, "student request failed");
    }
    error_response(op, err)
}
