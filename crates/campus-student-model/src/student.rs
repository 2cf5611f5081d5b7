//! The `Student` record and its exact-decimal GPA.
//!
//! GPA values never pass through binary floating point on the way in: a JSON
//! number is taken from its shortest textual form, so `3.1` is stored as the
//! decimal `3.1`. On the way out a whole GPA renders as an integer and a
//! fractional one as a float.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when a value cannot be read as a GPA.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GpaError {
    /// The text is not a decimal literal.
    #[error("'{0}' is not a decimal number")]
    NotDecimal(String),
    /// The JSON value is neither a number nor a string.
    #[error("expected a number, got {0}")]
    WrongType(&'static str),
}

/// Grade point average, held as an exact decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gpa(Decimal);

impl Gpa {
    /// Whether the value has no fractional part (`4`, `4.0`).
    #[must_use]
    pub fn is_whole(&self) -> bool {
        self.0.fract().is_zero()
    }

    /// Read a GPA from a JSON value: a number, or a string holding a decimal literal.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, GpaError> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self(Decimal::from(i)))
                } else if let Some(u) = n.as_u64() {
                    Ok(Self(Decimal::from(u)))
                } else {
                    // f64 Display is the shortest text that round-trips.
                    let f = n.as_f64().ok_or_else(|| GpaError::NotDecimal(n.to_string()))?;
                    f.to_string().parse()
                }
            }
            serde_json::Value::String(s) => s.parse(),
            serde_json::Value::Bool(_) => Err(GpaError::WrongType("a boolean")),
            serde_json::Value::Null => Err(GpaError::WrongType("null")),
            serde_json::Value::Array(_) => Err(GpaError::WrongType("an array")),
            serde_json::Value::Object(_) => Err(GpaError::WrongType("an object")),
        }
    }

    /// Render as a JSON number: integer when whole, float otherwise.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl FromStr for Gpa {
    type Err = GpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Self)
            .map_err(|_| GpaError::NotDecimal(s.to_owned()))
    }
}

impl fmt::Display for Gpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for Gpa {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            if let Some(i) = self.0.trunc().to_i64() {
                return serializer.serialize_i64(i);
            }
        }
        // Parsing the decimal text gives the correctly rounded f64.
        let f: f64 = self
            .0
            .normalize()
            .to_string()
            .parse()
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_f64(f)
    }
}

impl<'de> Deserialize<'de> for Gpa {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// The four replaceable fields of a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    /// Full name.
    pub name: String,
    /// Contact email. Not format-checked.
    pub email: String,
    /// Declared major.
    pub major: String,
    /// Grade point average.
    pub gpa: Gpa,
}

/// A stored student record.
///
/// Serializes with the storage attribute names (`StudentID`, `Name`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Student {
    /// Primary key. Immutable once created.
    #[serde(rename = "StudentID")]
    pub student_id: String,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Declared major.
    pub major: String,
    /// Grade point average.
    #[serde(rename = "GPA")]
    pub gpa: Gpa,
}

impl Student {
    /// Assemble a record from its key and fields.
    #[must_use]
    pub fn from_fields(student_id: impl Into<String>, fields: StudentFields) -> Self {
        Self {
            student_id: student_id.into(),
            name: fields.name,
            email: fields.email,
            major: fields.major,
            gpa: fields.gpa,
        }
    }

    /// Overwrite all four non-key fields. The key is left untouched.
    pub fn replace_fields(&mut self, fields: StudentFields) {
        self.name = fields.name;
        self.email = fields.email;
        self.major = fields.major;
        self.gpa = fields.gpa;
    }
}
