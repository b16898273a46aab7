use super::TrmmClient;
use crate::api::types::WinUpdate;
use crate::error::ApiResult;
use reqwest::Method;

const BASE: &str = "/winupdate";

pub(crate) trait WinUpdatesApi {
    async fn fetch_agent_updates(&self, agent_id: &str) -> ApiResult<Vec<WinUpdate>>;
    async fn run_agent_update_scan(&self, agent_id: &str) -> ApiResult<String>;
    async fn run_agent_update_install(&self, agent_id: &str) -> ApiResult<String>;
    /// `action` is "approve", "ignore" or "nothing".
    async fn edit_agent_update(&self, id: i64, action: &str) -> ApiResult<String>;
}

impl WinUpdatesApi for TrmmClient {
    async fn fetch_agent_updates(&self, agent_id: &str) -> ApiResult<Vec<WinUpdate>> {
        self.get_json(&format!("{}/{}/", BASE, agent_id)).await
    }

    async fn run_agent_update_scan(&self, agent_id: &str) -> ApiResult<String> {
        self.send_message::<()>(Method::POST, &format!("{}/{}/scan/", BASE, agent_id), None)
            .await
    }

    async fn run_agent_update_install(&self, agent_id: &str) -> ApiResult<String> {
        self.send_message::<()>(Method::POST, &format!("{}/{}/install/", BASE, agent_id), None)
            .await
    }

    async fn edit_agent_update(&self, id: i64, action: &str) -> ApiResult<String> {
        let body = serde_json::json!({ "action": action });
        self.send_message(Method::PUT, &format!("{}/{}/", BASE, id), Some(&body))
            .await
    }
}
