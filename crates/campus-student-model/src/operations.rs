//! Student operation enum.

use std::fmt;

/// The four record operations exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentOperation {
    /// Insert a new student; rejected if the id is taken.
    Create,
    /// Fetch a student by id.
    Read,
    /// Replace every non-key field of an existing student.
    Update,
    /// Remove a student by id.
    Delete,
}

impl StudentOperation {
    /// Returns the operation name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CreateStudent",
            Self::Read => "GetStudent",
            Self::Update => "UpdateStudent",
            Self::Delete => "DeleteStudent",
        }
    }

    /// Value of the `Access-Control-Allow-Methods` header on this operation's responses.
    #[must_use]
    pub fn allowed_methods(&self) -> &'static str {
        match self {
            Self::Create => "OPTIONS,POST",
            Self::Read => "OPTIONS,GET",
            Self::Update => "OPTIONS,PUT",
            Self::Delete => "OPTIONS,DELETE",
        }
    }

    /// Whether the operation requires a request body.
    #[must_use]
    pub fn requires_body(&self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }

    /// Fixed success message for write operations. `Read` answers with the record instead.
    #[must_use]
    pub fn success_message(&self) -> Option<&'static str> {
        match self {
            Self::Create => Some("Student created successfully"),
            Self::Read => None,
            Self::Update => Some("Student updated successfully"),
            Self::Delete => Some("Student deleted successfully"),
        }
    }

    /// Map an HTTP method on the item path (`/students/{id}`) to an operation.
    #[must_use]
    pub fn from_item_method(method: &http::Method) -> Option<Self> {
        match *method {
            http::Method::GET => Some(Self::Read),
            http::Method::PUT => Some(Self::Update),
            http::Method::DELETE => Some(Self::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for StudentOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
