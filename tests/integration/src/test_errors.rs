//! Validation and error response integration tests.

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::{http_client, student_url, students_url, test_student_id};

    async fn error_of(resp: reqwest::Response) -> (u16, String) {
        let status = resp.status().as_u16();
        let body: Value = resp.json().await.expect("error body");
        (status, body["error"].as_str().unwrap_or_default().to_owned())
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_missing_body() {
        let client = http_client();
        let resp = client.post(students_url()).send().await.expect("post");
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
        assert_eq!(
            error_of(resp).await,
            (400, "Missing request body".to_owned())
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_invalid_json() {
        let client = http_client();
        let resp = client
            .post(students_url())
            .body("{not json")
            .send()
            .await
            .expect("post");
        assert_eq!(error_of(resp).await, (400, "Invalid JSON".to_owned()));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_missing_fields() {
        let client = http_client();
        let resp = client
            .post(students_url())
            .json(&json!({"studentID": test_student_id("missing"), "email": ""}))
            .send()
            .await
            .expect("post");
        assert_eq!(
            error_of(resp).await,
            (400, "Missing field(s): name, email, major, gpa".to_owned())
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_unknown_student() {
        let client = http_client();
        let student_id = test_student_id("ghost");

        let resp = client.get(student_url(&student_id)).send().await.expect("get");
        assert_eq!(
            error_of(resp).await,
            (404, format!("Student with ID {student_id} not found"))
        );

        let resp = client
            .put(student_url(&student_id))
            .json(&json!({"name": "A", "email": "a@x.com", "major": "CS", "gpa": 3}))
            .send()
            .await
            .expect("put");
        assert_eq!(
            error_of(resp).await,
            (404, format!("Student with ID {student_id} not found"))
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_check_update_body_first() {
        let client = http_client();
        let resp = client
            .put(student_url(&test_student_id("nobody")))
            .send()
            .await
            .expect("put");
        assert_eq!(
            error_of(resp).await,
            (400, "Missing request body".to_owned())
        );
    }
}
