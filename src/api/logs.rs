use super::TrmmClient;
use crate::api::types::{AuditLogEntry, DebugLogEntry, PendingAction};
use crate::error::ApiResult;
use reqwest::Method;
use serde::Serialize;
use std::path::Path;

const BASE: &str = "/logs";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugLogQuery {
    pub log_level_filter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_type_filter: Option<String>,
}

impl Default for DebugLogQuery {
    fn default() -> Self {
        Self {
            log_level_filter: "info".to_string(),
            agent_filter: None,
            log_type_filter: None,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogFilter {
    /// Days back from now.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_filter: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub agent_filter: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_filter: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub client_filter: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub action_filter: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub object_filter: Vec<String>,
}

pub(crate) trait LogsApi {
    async fn fetch_debug_log(&self, query: &DebugLogQuery) -> ApiResult<Vec<DebugLogEntry>>;
    /// Saves the server's debug log to `dest`.
    async fn download_debug_log(&self, dest: &Path) -> ApiResult<()>;
    async fn fetch_audit_logs(&self, filter: &AuditLogFilter) -> ApiResult<Vec<AuditLogEntry>>;
    async fn fetch_pending_actions(&self) -> ApiResult<Vec<PendingAction>>;
    async fn remove_pending_action(&self, id: i64) -> ApiResult<String>;
}

impl LogsApi for TrmmClient {
    async fn fetch_debug_log(&self, query: &DebugLogQuery) -> ApiResult<Vec<DebugLogEntry>> {
        self.send_json(Method::PATCH, &format!("{}/debuglog/", BASE), Some(query))
            .await
    }

    async fn download_debug_log(&self, dest: &Path) -> ApiResult<()> {
        let path = format!("{}/downloadlog/", BASE);
        let builder = self.request(Method::GET, &path)?;
        let response = self.send(builder, &Method::GET, &path).await?;
        let bytes = response.bytes().await?;
        tokio::fs::write(dest, &bytes).await?;
        tracing::info!(dest = %dest.display(), size = bytes.len(), "debug log downloaded");
        Ok(())
    }

    async fn fetch_audit_logs(&self, filter: &AuditLogFilter) -> ApiResult<Vec<AuditLogEntry>> {
        self.send_json(Method::PATCH, &format!("{}/auditlogs/", BASE), Some(filter))
            .await
    }

    async fn fetch_pending_actions(&self) -> ApiResult<Vec<PendingAction>> {
        self.get_json(&format!("{}/pendingactions/", BASE)).await
    }

    async fn remove_pending_action(&self, id: i64) -> ApiResult<String> {
        self.send_message::<()>(Method::DELETE, &format!("{}/pendingactions/{}/", BASE, id), None)
            .await
    }
}
