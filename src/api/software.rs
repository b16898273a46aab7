use super::TrmmClient;
use crate::api::types::{AgentSoftware, ChocoSoftware, InstalledSoftware};
use crate::error::ApiResult;
use reqwest::Method;

const BASE: &str = "/software";

pub(crate) trait SoftwareApi {
    async fn fetch_chocos_software(&self) -> ApiResult<Vec<ChocoSoftware>>;
    /// The endpoint wraps the list in `{"software": [...]}`; only the list is returned.
    async fn fetch_agent_software(&self, agent_id: &str) -> ApiResult<Vec<InstalledSoftware>>;
    async fn install_agent_software(&self, agent_id: &str, name: &str) -> ApiResult<String>;
    async fn refresh_agent_software(&self, agent_id: &str) -> ApiResult<String>;
}

impl SoftwareApi for TrmmClient {
    async fn fetch_chocos_software(&self) -> ApiResult<Vec<ChocoSoftware>> {
        self.get_json(&format!("{}/chocos/", BASE)).await
    }

    async fn fetch_agent_software(&self, agent_id: &str) -> ApiResult<Vec<InstalledSoftware>> {
        let wrapped: AgentSoftware = self.get_json(&format!("{}/{}/", BASE, agent_id)).await?;
        Ok(wrapped.software)
    }

    async fn install_agent_software(&self, agent_id: &str, name: &str) -> ApiResult<String> {
        let body = serde_json::json!({ "name": name });
        self.send_message(Method::POST, &format!("{}/{}/", BASE, agent_id), Some(&body))
            .await
    }

    async fn refresh_agent_software(&self, agent_id: &str) -> ApiResult<String> {
        self.send_message::<()>(Method::PUT, &format!("{}/{}/", BASE, agent_id), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{client_for, request_lines, serve_many, serve_once};

    #[tokio::test]
    async fn test_agent_software_is_unwrapped() {
        let body = r#"{"id": 1, "agent": 7, "software": [{"name": "7-Zip", "version": "23.01"}]}"#;
        let (url, handle) = serve_once(200, body).await;
        let client = client_for(&url, Some("abc"), None);

        let software = client.fetch_agent_software("abc123").await.unwrap();
        assert_eq!(software.len(), 1);
        assert_eq!(software[0].version.as_deref(), Some("23.01"));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_choco_and_install_routes() {
        let (url, handle) = serve_many(200, "[]", 2).await;
        let client = client_for(&url, Some("abc"), None);

        assert!(client.fetch_chocos_software().await.unwrap().is_empty());
        client.install_agent_software("abc123", "7zip").await.unwrap();

        let requests = handle.await.unwrap();
        assert_eq!(request_lines(&requests), vec!["GET /software/chocos/", "POST /software/abc123/"]);
        assert!(requests[1].contains(r#""name":"7zip""#));
    }
}
