//! Student Store abstraction.
//!
//! A store is a key-value mapping from `StudentID` to [`Student`]. It makes
//! no atomicity promise across calls: the existence check a handler runs
//! before a write is a separate read, so two concurrent creates of the same
//! id may both pass the check.

use std::fmt;

use async_trait::async_trait;

use campus_student_model::student::{Student, StudentFields};

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
pub mod memory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbStudentStore;
pub use memory::InMemoryStudentStore;

/// Failures reported by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend call failed. Carries the backend's own message.
    #[error("{0}")]
    Backend(String),
    /// A stored item could not be read back as a student.
    #[error("Stored record for student {student_id} is malformed: {reason}")]
    Corrupt {
        /// Key of the offending item.
        student_id: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Key-value persistence for student records.
#[async_trait]
pub trait StudentStore: fmt::Debug + Send + Sync + 'static {
    /// Short backend name, reported by the health endpoint.
    fn backend_name(&self) -> &'static str;

    /// Look up a record by id.
    async fn get(&self, student_id: &str) -> Result<Option<Student>, StoreError>;

    /// Write a full record, replacing any record with the same id.
    async fn put(&self, student: Student) -> Result<(), StoreError>;

    /// Replace the four non-key fields of the record with `student_id`.
    ///
    /// Behaves as an upsert: a record that does not exist is created.
    async fn update(&self, student_id: &str, fields: StudentFields) -> Result<(), StoreError>;

    /// Remove the record with `student_id`. Removing an absent record is not an error.
    async fn delete(&self, student_id: &str) -> Result<(), StoreError>;
}
