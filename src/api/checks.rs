use super::TrmmClient;
use crate::api::types::Check;
use crate::error::ApiResult;
use reqwest::Method;
use serde::Serialize;

const BASE: &str = "/checks";

#[derive(Debug, Default, Clone, Serialize)]
pub struct CheckQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<i64>,
}

pub(crate) trait ChecksApi {
    async fn fetch_checks(&self, query: &CheckQuery) -> ApiResult<Vec<Check>>;
    async fn save_check(&self, check: &Check) -> ApiResult<String>;
    async fn update_check(&self, id: i64, check: &Check) -> ApiResult<String>;
    async fn remove_check(&self, id: i64) -> ApiResult<String>;
    async fn reset_check(&self, id: i64) -> ApiResult<String>;
    async fn run_agent_checks(&self, agent_id: &str) -> ApiResult<String>;
}

impl ChecksApi for TrmmClient {
    async fn fetch_checks(&self, query: &CheckQuery) -> ApiResult<Vec<Check>> {
        self.get_json_with(&format!("{}/", BASE), query).await
    }

    async fn save_check(&self, check: &Check) -> ApiResult<String> {
        self.send_message(Method::POST, &format!("{}/", BASE), Some(check))
            .await
    }

    async fn update_check(&self, id: i64, check: &Check) -> ApiResult<String> {
        self.send_message(Method::PUT, &format!("{}/{}/", BASE, id), Some(check))
            .await
    }

    async fn remove_check(&self, id: i64) -> ApiResult<String> {
        self.send_message::<()>(Method::DELETE, &format!("{}/{}/", BASE, id), None)
            .await
    }

    async fn reset_check(&self, id: i64) -> ApiResult<String> {
        self.send_message::<()>(Method::POST, &format!("{}/{}/reset/", BASE, id), None)
            .await
    }

    async fn run_agent_checks(&self, agent_id: &str) -> ApiResult<String> {
        self.send_message::<()>(Method::POST, &format!("{}/{}/run/", BASE, agent_id), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{client_for, request_lines, serve_many, serve_once};
    use crate::api::types::CheckType;

    #[tokio::test]
    async fn test_save_check_posts_type() {
        let (url, handle) = serve_once(200, "\"Memory Check was added!\"").await;
        let client = client_for(&url, Some("abc"), None);

        let mut check = Check::new(CheckType::Memory);
        check.agent = Some("abc123".to_string());
        check.warning_threshold = Some(70);
        check.error_threshold = Some(90);

        let msg = client.save_check(&check).await.unwrap();
        assert_eq!(msg, "Memory Check was added!");

        let request = handle.await.unwrap();
        assert!(request.starts_with("POST /checks/ HTTP/1.1"));
        assert!(request.contains(r#""check_type":"memory""#));
        assert!(!request.contains(r#""id":"#));
    }

    #[tokio::test]
    async fn test_fetch_checks_by_policy() {
        let (url, handle) = serve_many(200, "[]", 1).await;
        let client = client_for(&url, Some("abc"), None);

        let query = CheckQuery {
            agent_id: None,
            policy: Some(2),
        };
        assert!(client.fetch_checks(&query).await.unwrap().is_empty());

        let requests = handle.await.unwrap();
        assert_eq!(request_lines(&requests), vec!["GET /checks/?policy=2"]);
    }
}
