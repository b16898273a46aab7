use super::TrmmClient;
use crate::api::types::WinService;
use crate::error::ApiResult;
use reqwest::Method;

const BASE: &str = "/services";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Start,
    Stop,
    Restart,
}

impl ServiceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceAction::Start => "start",
            ServiceAction::Stop => "stop",
            ServiceAction::Restart => "restart",
        }
    }
}

pub(crate) trait ServicesApi {
    async fn get_agent_services(&self, agent_id: &str) -> ApiResult<Vec<WinService>>;
    async fn get_agent_service_details(&self, agent_id: &str, svc_name: &str) -> ApiResult<WinService>;
    /// `start_type` is one of "auto", "autodelay", "manual", "disabled".
    async fn edit_agent_service_start_type(
        &self,
        agent_id: &str,
        svc_name: &str,
        start_type: &str,
    ) -> ApiResult<String>;
    async fn send_agent_service_action(
        &self,
        agent_id: &str,
        svc_name: &str,
        action: ServiceAction,
    ) -> ApiResult<String>;
}

impl ServicesApi for TrmmClient {
    async fn get_agent_services(&self, agent_id: &str) -> ApiResult<Vec<WinService>> {
        self.get_json(&format!("{}/{}/", BASE, agent_id)).await
    }

    async fn get_agent_service_details(&self, agent_id: &str, svc_name: &str) -> ApiResult<WinService> {
        self.get_json(&format!("{}/{}/{}/", BASE, agent_id, svc_name))
            .await
    }

    async fn edit_agent_service_start_type(
        &self,
        agent_id: &str,
        svc_name: &str,
        start_type: &str,
    ) -> ApiResult<String> {
        let body = serde_json::json!({ "startType": start_type });
        self.send_message(
            Method::PUT,
            &format!("{}/{}/{}/", BASE, agent_id, svc_name),
            Some(&body),
        )
        .await
    }

    async fn send_agent_service_action(
        &self,
        agent_id: &str,
        svc_name: &str,
        action: ServiceAction,
    ) -> ApiResult<String> {
        let body = serde_json::json!({ "sv_action": action.as_str() });
        self.send_message(
            Method::POST,
            &format!("{}/{}/{}/", BASE, agent_id, svc_name),
            Some(&body),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{client_for, serve_once};

    #[tokio::test]
    async fn test_service_action_payload() {
        let (url, handle) = serve_once(200, "\"Spooler service was restarted\"").await;
        let client = client_for(&url, Some("abc"), None);

        let msg = client
            .send_agent_service_action("abc123", "Spooler", ServiceAction::Restart)
            .await
            .unwrap();
        assert_eq!(msg, "Spooler service was restarted");

        let request = handle.await.unwrap();
        assert!(request.starts_with("POST /services/abc123/Spooler/ HTTP/1.1"));
        assert!(request.contains(r#""sv_action":"restart""#));
    }

    #[tokio::test]
    async fn test_start_type_payload() {
        let (url, handle) = serve_once(200, "\"Spooler was updated\"").await;
        let client = client_for(&url, Some("abc"), None);

        client
            .edit_agent_service_start_type("abc123", "Spooler", "autodelay")
            .await
            .unwrap();

        let request = handle.await.unwrap();
        assert!(request.starts_with("PUT /services/abc123/Spooler/ HTTP/1.1"));
        assert!(request.contains(r#""startType":"autodelay""#));
    }

    #[tokio::test]
    async fn test_service_details() {
        let body = r#"{"name": "Spooler", "display_name": "Print Spooler", "start_type": "Automatic"}"#;
        let (url, handle) = serve_once(200, body).await;
        let client = client_for(&url, Some("abc"), None);

        let service = client.get_agent_service_details("abc123", "Spooler").await.unwrap();
        assert_eq!(service.display_name, "Print Spooler");
        handle.await.unwrap();
    }
}
