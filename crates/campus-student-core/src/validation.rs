//! Request validation shared by the four handlers.
//!
//! The protocol runs in a fixed order: body present, body parses as a JSON
//! object, every required field present, then typed extraction. Presence is
//! explicit: only an absent key, `null`, or `""` counts as missing, so a GPA
//! of `0` and a literal `false` are both present.

use serde_json::{Map, Value};

use campus_student_model::error::StudentError;
use campus_student_model::gateway::GatewayRequest;
use campus_student_model::student::{Gpa, Student, StudentFields};

/// Body fields required by create, in reporting order.
pub const CREATE_FIELDS: &[&str] = &["studentID", "name", "email", "major", "gpa"];

/// Body fields required by update, in reporting order. The id comes from the path.
pub const UPDATE_FIELDS: &[&str] = &["name", "email", "major", "gpa"];

/// The request body, or `MissingBody`.
pub fn require_body(request: &GatewayRequest) -> Result<&str, StudentError> {
    request.body().ok_or_else(StudentError::missing_body)
}

/// The `id` path parameter, or `MissingPathId`.
pub fn require_path_id(request: &GatewayRequest) -> Result<&str, StudentError> {
    request.path_id().ok_or_else(StudentError::missing_path_id)
}

/// Parse the body as a JSON object.
pub fn parse_object(body: &str) -> Result<Map<String, Value>, StudentError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) | Err(_) => Err(StudentError::invalid_json()),
    }
}

/// Whether a field counts as missing.
#[must_use]
pub fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Check every required field, reporting all missing ones at once.
pub fn require_fields(object: &Map<String, Value>, required: &[&str]) -> Result<(), StudentError> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|field| is_missing(object.get(*field)))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(StudentError::missing_fields(missing.as_slice()))
    }
}

/// Parse `body` and check `required` fields.
pub fn validate_body(body: &str, required: &[&str]) -> Result<Map<String, Value>, StudentError> {
    let object = parse_object(body)?;
    require_fields(&object, required)?;
    Ok(object)
}

/// Build a new record from a validated create body.
pub fn new_student(object: &Map<String, Value>) -> Result<Student, StudentError> {
    let student_id = string_field(object, "studentID")?;
    Ok(Student::from_fields(student_id, student_fields(object)?))
}

/// Build the replaceable fields from a validated body.
pub fn student_fields(object: &Map<String, Value>) -> Result<StudentFields, StudentError> {
    Ok(StudentFields {
        name: string_field(object, "name")?,
        email: string_field(object, "email")?,
        major: string_field(object, "major")?,
        gpa: gpa_field(object, "gpa")?,
    })
}

fn string_field(object: &Map<String, Value>, name: &str) -> Result<String, StudentError> {
    match object.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(StudentError::malformed_input(format!(
            "Invalid value for field '{name}': expected a string"
        ))),
    }
}

fn gpa_field(object: &Map<String, Value>, name: &str) -> Result<Gpa, StudentError> {
    let value = object.get(name).unwrap_or(&Value::Null);
    Gpa::from_json(value).map_err(|e| {
        StudentError::malformed_input(format!("Invalid value for field '{name}': {e}"))
            .with_source(e)
    })
}
