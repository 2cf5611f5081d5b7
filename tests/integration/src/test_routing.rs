//! Routing, preflight, and health integration tests.

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::{http_client, server_url, student_url, students_url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_health() {
        let client = http_client();
        let resp = client
            .get(format!("{}/health", server_url()))
            .send()
            .await
            .expect("health");
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.expect("health body");
        assert_eq!(body["status"], "running");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_answer_preflight() {
        let client = http_client();
        let resp = client
            .request(reqwest::Method::OPTIONS, students_url())
            .send()
            .await
            .expect("options");
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()["access-control-allow-methods"],
            "OPTIONS,POST"
        );

        let resp = client
            .request(reqwest::Method::OPTIONS, student_url("S1"))
            .send()
            .await
            .expect("options item");
        assert_eq!(
            resp.headers()["access-control-allow-methods"],
            "OPTIONS,GET,PUT,DELETE"
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_unrouted_requests() {
        let client = http_client();
        let resp = client
            .get(format!("{}/courses", server_url()))
            .send()
            .await
            .expect("get");
        assert_eq!(resp.status(), 404);

        let resp = client.get(students_url()).send().await.expect("list");
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["allow"], "OPTIONS,POST");
    }
}
