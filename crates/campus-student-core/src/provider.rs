//! The four student record operations.
//!
//! Each handler validates its input in a fixed order and stops at the first
//! failure:
//!
//! | Operation | Steps                                                            |
//! |-----------|------------------------------------------------------------------|
//! | Create    | body, parse, required fields, existence (must be absent), put     |
//! | Read      | path id, get (must be present)                                    |
//! | Update    | body, path id, parse, required fields, existence (present), update|
//! | Delete    | path id, existence (must be present), delete                      |
//!
//! The existence check and the write are separate store calls, so two
//! concurrent requests for the same id can interleave between them.

use std::sync::Arc;

use campus_student_model::error::StudentError;
use campus_student_model::gateway::GatewayRequest;
use campus_student_model::student::Student;

use crate::error::store_error_to_student;
use crate::store::StudentStore;
use crate::validation::{
    CREATE_FIELDS, UPDATE_FIELDS, new_student, require_body, require_path_id, student_fields,
    validate_body,
};

/// Student record operations over a [`StudentStore`].
#[derive(Debug, Clone)]
pub struct StudentProvider {
    store: Arc<dyn StudentStore>,
}

impl StudentProvider {
    /// Create a provider over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    /// Handle `CreateStudent`, returning the new record's id.
    pub async fn handle_create(&self, request: &GatewayRequest) -> Result<String, StudentError> {
        let body = require_body(request)?;
        let object = validate_body(body, CREATE_FIELDS)?;
        let student = new_student(&object)?;
        let student_id = student.student_id.clone();

        if self.exists(&student_id).await? {
            return Err(StudentError::conflict(&student_id));
        }

        self.store
            .put(student)
            .await
            .map_err(store_error_to_student)?;
        Ok(student_id)
    }

    /// Handle `GetStudent`.
    pub async fn handle_read(&self, request: &GatewayRequest) -> Result<Student, StudentError> {
        let student_id = require_path_id(request)?;

        self.store
            .get(student_id)
            .await
            .map_err(store_error_to_student)?
            .ok_or_else(|| StudentError::not_found(student_id))
    }

    /// Handle `UpdateStudent`.
    ///
    /// A `studentID` in the body is ignored; the record key comes from the path.
    pub async fn handle_update(&self, request: &GatewayRequest) -> Result<(), StudentError> {
        let body = require_body(request)?;
        let student_id = require_path_id(request)?;
        let object = validate_body(body, UPDATE_FIELDS)?;
        let fields = student_fields(&object)?;

        if !self.exists(student_id).await? {
            return Err(StudentError::not_found(student_id));
        }

        self.store
            .update(student_id, fields)
            .await
            .map_err(store_error_to_student)
    }

    /// Handle `DeleteStudent`.
    pub async fn handle_delete(&self, request: &GatewayRequest) -> Result<(), StudentError> {
        let student_id = require_path_id(request)?;

        if !self.exists(student_id).await? {
            return Err(StudentError::not_found(student_id));
        }

        self.store
            .delete(student_id)
            .await
            .map_err(store_error_to_student)
    }

    async fn exists(&self, student_id: &str) -> Result<bool, StudentError> {
        self.store
            .get(student_id)
            .await
            .map(|found| found.is_some())
            .map_err(store_error_to_student)
    }
}
