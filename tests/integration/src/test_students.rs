//! Student lifecycle integration tests.

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::{
        cleanup_student, create_body, create_test_student, http_client, student_url,
        students_url, test_student_id,
    };

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_create_and_read_student() {
        let client = http_client();
        let student_id = test_student_id("create");

        let resp = client
            .post(students_url())
            .json(&create_body(&student_id))
            .send()
            .await
            .expect("create student");
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()["access-control-allow-methods"],
            "OPTIONS,POST"
        );
        let body: Value = resp.json().await.expect("create body");
        assert_eq!(body, json!({"message": "Student created successfully"}));

        let resp = client
            .get(student_url(&student_id))
            .send()
            .await
            .expect("get student");
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.expect("get body");
        assert_eq!(
            body,
            json!({
                "StudentID": student_id,
                "Name": "Jane Doe",
                "Email": "jane@example.edu",
                "Major": "Computer Science",
                "GPA": 3.8,
            })
        );

        cleanup_student(&client, &student_id).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_duplicate_create() {
        let client = http_client();
        let student_id = create_test_student(&client, "dup").await;

        let mut body = create_body(&student_id);
        body["name"] = json!("Someone Else");
        let resp = client
            .post(students_url())
            .json(&body)
            .send()
            .await
            .expect("duplicate create");
        assert_eq!(resp.status(), 400);
        let err: Value = resp.json().await.expect("error body");
        assert_eq!(
            err["error"],
            format!("Student with ID {student_id} already exists")
        );

        let stored: Value = client
            .get(student_url(&student_id))
            .send()
            .await
            .expect("get student")
            .json()
            .await
            .expect("get body");
        assert_eq!(stored["Name"], "Jane Doe");

        cleanup_student(&client, &student_id).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_update_every_field() {
        let client = http_client();
        let student_id = create_test_student(&client, "update").await;

        let resp = client
            .put(student_url(&student_id))
            .json(&json!({
                "name": "Jane Roe",
                "email": "roe@example.edu",
                "major": "Mathematics",
                "gpa": 4,
            }))
            .send()
            .await
            .expect("update student");
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.expect("update body");
        assert_eq!(body, json!({"message": "Student updated successfully"}));

        let stored: Value = client
            .get(student_url(&student_id))
            .send()
            .await
            .expect("get student")
            .json()
            .await
            .expect("get body");
        assert_eq!(stored["Name"], "Jane Roe");
        assert_eq!(stored["Email"], "roe@example.edu");
        assert_eq!(stored["Major"], "Mathematics");
        assert_eq!(stored["GPA"], json!(4));

        cleanup_student(&client, &student_id).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_delete_student() {
        let client = http_client();
        let student_id = create_test_student(&client, "delete").await;

        let resp = client
            .delete(student_url(&student_id))
            .send()
            .await
            .expect("delete student");
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.expect("delete body");
        assert_eq!(body, json!({"message": "Student deleted successfully"}));

        let resp = client
            .get(student_url(&student_id))
            .send()
            .await
            .expect("get deleted student");
        assert_eq!(resp.status(), 404);

        let resp = client
            .delete(student_url(&student_id))
            .send()
            .await
            .expect("delete again");
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_accept_zero_gpa() {
        let client = http_client();
        let student_id = test_student_id("zero");
        let mut body = create_body(&student_id);
        body["gpa"] = json!(0);

        let resp = client
            .post(students_url())
            .json(&body)
            .send()
            .await
            .expect("create student");
        assert_eq!(resp.status(), 200);

        cleanup_student(&client, &student_id).await;
    }
}
