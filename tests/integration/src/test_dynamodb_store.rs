//! DynamoDB Student Store tests against a DynamoDB-compatible endpoint.

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::types::{
        AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
        ScalarAttributeType,
    };
    use campus_student_core::store::{DynamoDbStudentStore, StudentStore};
    use campus_student_model::student::{Student, StudentFields};

    use crate::{dynamodb_client, test_table_name};

    /// Helper: create a students table keyed by `StudentID`.
    async fn create_students_table(client: &aws_sdk_dynamodb::Client, table_name: &str) {
        client
            .create_table()
            .table_name(table_name)
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name("StudentID")
                    .key_type(KeyType::Hash)
                    .build()
                    .unwrap(),
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name("StudentID")
                    .attribute_type(ScalarAttributeType::S)
                    .build()
                    .unwrap(),
            )
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await
            .unwrap_or_else(|e| panic!("failed to create table {table_name}: {e}"));
    }

    async fn delete_table(client: &aws_sdk_dynamodb::Client, table_name: &str) {
        let _ = client.delete_table().table_name(table_name).send().await;
    }

    fn fields(name: &str, gpa: &str) -> StudentFields {
        StudentFields {
            name: name.to_owned(),
            email: "jane@example.edu".to_owned(),
            major: "Physics".to_owned(),
            gpa: gpa.parse().unwrap(),
        }
    }

    #[tokio::test]
    #[ignore = "requires running DynamoDB endpoint"]
    async fn test_should_round_trip_student_through_table() {
        let client = dynamodb_client();
        let table = test_table_name("students");
        create_students_table(&client, &table).await;
        let store = DynamoDbStudentStore::new(client.clone(), &table);

        let student = Student::from_fields("S1", fields("Jane", "3.10"));
        store.put(student.clone()).await.expect("put");
        let stored = store.get("S1").await.expect("get").expect("present");
        assert_eq!(stored, student);

        // GPA is stored as a number attribute.
        let raw = client
            .get_item()
            .table_name(&table)
            .key("StudentID", AttributeValue::S("S1".to_owned()))
            .send()
            .await
            .expect("raw get_item");
        let item = raw.item().expect("item");
        assert!(matches!(item.get("GPA"), Some(AttributeValue::N(_))));

        delete_table(&client, &table).await;
    }

    #[tokio::test]
    #[ignore = "requires running DynamoDB endpoint"]
    async fn test_should_update_and_delete_student() {
        let client = dynamodb_client();
        let table = test_table_name("students");
        create_students_table(&client, &table).await;
        let store = DynamoDbStudentStore::new(client.clone(), &table);

        store
            .put(Student::from_fields("S2", fields("Jane", "2.5")))
            .await
            .expect("put");
        store.update("S2", fields("Joan", "3.9")).await.expect("update");

        let stored = store.get("S2").await.expect("get").expect("present");
        assert_eq!(stored.student_id, "S2");
        assert_eq!(stored.name, "Joan");
        assert_eq!(stored.gpa.to_string(), "3.9");

        store.delete("S2").await.expect("delete");
        assert!(store.get("S2").await.expect("get").is_none());

        delete_table(&client, &table).await;
    }

    #[tokio::test]
    #[ignore = "requires running DynamoDB endpoint"]
    async fn test_should_surface_missing_table_as_backend_error() {
        let store = DynamoDbStudentStore::new(dynamodb_client(), test_table_name("absent"));
        let err = store.get("S1").await.unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
