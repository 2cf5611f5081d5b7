//! Student service error types.
//!
//! Every failure a handler can produce is one of the [`StudentErrorCode`]
//! variants. The gateway renders them as `{"error": "<message>"}` with the
//! code's status.

use std::fmt;

/// Well-known error codes of the student service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum StudentErrorCode {
    /// The request carried no body, or an empty one.
    MissingBody,
    /// The `id` path parameter is absent or empty.
    MissingPathId,
    /// The body is not a JSON object, or a field has the wrong shape.
    MalformedInput,
    /// One or more required fields are absent, null, or empty.
    MissingFields,
    /// A student with the requested id already exists.
    Conflict,
    /// No student with the requested id exists.
    NotFound,
    /// Any other failure, including store errors.
    #[default]
    Unexpected,
}

impl StudentErrorCode {
    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingBody => "MissingBody",
            Self::MissingPathId => "MissingPathId",
            Self::MalformedInput => "MalformedInput",
            Self::MissingFields => "MissingFields",
            Self::Conflict => "Conflict",
            Self::NotFound => "NotFound",
            Self::Unexpected => "Unexpected",
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// `Conflict` answers 400, not 409: existing clients key off that status.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::MissingBody
            | Self::MissingPathId
            | Self::MalformedInput
            | Self::MissingFields
            | Self::Conflict => http::StatusCode::BAD_REQUEST,
            Self::NotFound => http::StatusCode::NOT_FOUND,
            Self::Unexpected => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for StudentErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A student service error.
#[derive(Debug)]
pub struct StudentError {
    /// The error code.
    pub code: StudentErrorCode,
    /// The message rendered into the `error` field of the response body.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for StudentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StudentError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for StudentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl StudentError {
    /// Create a new `StudentError` with a custom message.
    #[must_use]
    pub fn with_message(code: StudentErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // -- Convenience constructors --

    /// The request body is absent or empty.
    #[must_use]
    pub fn missing_body() -> Self {
        Self::with_message(StudentErrorCode::MissingBody, "Missing request body")
    }

    /// The `id` path parameter is absent or empty.
    #[must_use]
    pub fn missing_path_id() -> Self {
        Self::with_message(
            StudentErrorCode::MissingPathId,
            "Missing 'id' in path parameters",
        )
    }

    /// The body does not parse as a JSON object.
    #[must_use]
    pub fn invalid_json() -> Self {
        Self::malformed_input("Invalid JSON")
    }

    /// Input is structurally wrong in some other way.
    #[must_use]
    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::with_message(StudentErrorCode::MalformedInput, message)
    }

    /// Required fields are missing. `fields` must already be in declared order.
    #[must_use]
    pub fn missing_fields<S: AsRef<str>>(fields: &[S]) -> Self {
        let names: Vec<&str> = fields.iter().map(AsRef::as_ref).collect();
        Self::with_message(
            StudentErrorCode::MissingFields,
            format!("Missing field(s): {}", names.join(", ")),
        )
    }

    /// A student with this id already exists.
    #[must_use]
    pub fn conflict(student_id: &str) -> Self {
        Self::with_message(
            StudentErrorCode::Conflict,
            format!("Student with ID {student_id} already exists"),
        )
    }

    /// No student with this id exists.
    #[must_use]
    pub fn not_found(student_id: &str) -> Self {
        Self::with_message(
            StudentErrorCode::NotFound,
            format!("Student with ID {student_id} not found"),
        )
    }

    /// Any other failure. The message is surfaced to the caller verbatim.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::with_message(StudentErrorCode::Unexpected, message)
    }

    /// Whether this error is the caller's fault (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code.is_client_error()
    }
}
