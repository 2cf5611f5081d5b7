//! Conversions into the student error taxonomy.

use campus_student_model::error::StudentError;

use crate::store::StoreError;

/// Convert a store failure into an `Unexpected` error carrying the raw message.
///
/// Takes `e` by value because this is used as a closure argument to `.map_err()`.
#[must_use]
pub fn store_error_to_student(e: StoreError) -> StudentError {
    StudentError::unexpected(e.to_string()).with_source(e)
}
