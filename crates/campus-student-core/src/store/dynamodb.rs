//! DynamoDB-backed Student Store.
//!
//! Records live in a single table with a string hash key `StudentID`. The
//! GPA is stored as a number attribute, so it round-trips exactly.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;

use campus_student_model::student::{Gpa, Student, StudentFields};

use super::{StoreError, StudentStore};
use crate::config::StudentConfig;

const ATTR_ID: &str = "StudentID";
const ATTR_NAME: &str = "Name";
const ATTR_EMAIL: &str = "Email";
const ATTR_MAJOR: &str = "Major";
const ATTR_GPA: &str = "GPA";

/// `Name` is a DynamoDB reserved word, hence the `#name` placeholder.
const UPDATE_EXPRESSION: &str = "SET #name = :name, Email = :email, Major = :major, GPA = :gpa";

/// Student records in a DynamoDB table.
#[derive(Debug, Clone)]
pub struct DynamoDbStudentStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStudentStore {
    /// Wrap an existing client.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a client from the default AWS credential chain, honoring the
    /// configured region and endpoint override.
    pub async fn from_config(config: &StudentConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.default_region.clone()));
        if let Some(url) = &config.dynamodb_endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    fn key(student_id: &str) -> AttributeValue {
        AttributeValue::S(student_id.to_owned())
    }
}

fn backend_error<E>(e: E) -> StoreError
where
    E: std::error::Error,
{
    StoreError::Backend(DisplayErrorContext(e).to_string())
}

fn student_to_item(student: Student) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (ATTR_ID.to_owned(), AttributeValue::S(student.student_id)),
        (ATTR_NAME.to_owned(), AttributeValue::S(student.name)),
        (ATTR_EMAIL.to_owned(), AttributeValue::S(student.email)),
        (ATTR_MAJOR.to_owned(), AttributeValue::S(student.major)),
        (ATTR_GPA.to_owned(), AttributeValue::N(student.gpa.to_string())),
    ])
}

fn item_to_student(
    student_id: &str,
    item: &HashMap<String, AttributeValue>,
) -> Result<Student, StoreError> {
    let corrupt = |reason: String| StoreError::Corrupt {
        student_id: student_id.to_owned(),
        reason,
    };
    let string_attr = |name: &str| -> Result<String, StoreError> {
        item.get(name)
            .and_then(|v| v.as_s().ok())
            .cloned()
            .ok_or_else(|| corrupt(format!("missing string attribute {name}")))
    };

    let gpa = item
        .get(ATTR_GPA)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| corrupt(format!("missing number attribute {ATTR_GPA}")))?
        .parse::<Gpa>()
        .map_err(|e| corrupt(e.to_string()))?;

    Ok(Student {
        student_id: string_attr(ATTR_ID)?,
        name: string_attr(ATTR_NAME)?,
        email: string_attr(ATTR_EMAIL)?,
        major: string_attr(ATTR_MAJOR)?,
        gpa,
    })
}

#[async_trait]
impl StudentStore for DynamoDbStudentStore {
    fn backend_name(&self) -> &'static str {
        "dynamodb"
    }

    async fn get(&self, student_id: &str) -> Result<Option<Student>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ATTR_ID, Self::key(student_id))
            .send()
            .await
            .map_err(backend_error)?;

        output
            .item()
            .map(|item| item_to_student(student_id, item))
            .transpose()
    }

    async fn put(&self, student: Student) -> Result<(), StoreError> {
        tracing::debug!(table = %self.table_name, student_id = %student.student_id, "put_item");
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(student_to_item(student)))
            .send()
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn update(&self, student_id: &str, fields: StudentFields) -> Result<(), StoreError> {
        tracing::debug!(table = %self.table_name, student_id, "update_item");
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(ATTR_ID, Self::key(student_id))
            .update_expression(UPDATE_EXPRESSION)
            .expression_attribute_names("#name", ATTR_NAME)
            .expression_attribute_values(":name", AttributeValue::S(fields.name))
            .expression_attribute_values(":email", AttributeValue::S(fields.email))
            .expression_attribute_values(":major", AttributeValue::S(fields.major))
            .expression_attribute_values(":gpa", AttributeValue::N(fields.gpa.to_string()))
            .send()
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn delete(&self, student_id: &str) -> Result<(), StoreError> {
        tracing::debug!(table = %self.table_name, student_id, "delete_item");
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(ATTR_ID, Self::key(student_id))
            .send()
            .await
            .map_err(backend_error)?;
        Ok(())
    }
}
