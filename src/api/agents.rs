use super::TrmmClient;
use crate::api::types::{Agent, AutomatedTask, Check, Note};
use crate::error::ApiResult;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

const BASE: &str = "/agents";

#[derive(Debug, Default, Clone, Serialize)]
pub struct AgentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<i64>,
    /// `false` asks for the lightweight listing used by dropdowns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<bool>,
}

impl AgentQuery {
    /// Scopes the agent table to the node selected in the client tree.
    pub fn for_tree_node(raw: &str) -> Self {
        let mut query = Self::default();
        if let Some((kind, id)) = raw.split_once('|') {
            if let Ok(id) = id.parse::<i64>() {
                match kind {
                    "Client" => query.client = Some(id),
                    "Site" => query.site = Some(id),
                    _ => {}
                }
            }
        }
        query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MaintenanceTarget {
    Client,
    Site,
    Agent,
}

pub(crate) trait AgentsApi {
    async fn fetch_agents(&self, query: &AgentQuery) -> ApiResult<Vec<Agent>>;
    async fn fetch_agent(&self, agent_id: &str) -> ApiResult<Agent>;
    async fn edit_agent<P: Serialize + Sync + ?Sized>(&self, agent_id: &str, payload: &P) -> ApiResult<String>;
    async fn remove_agent(&self, agent_id: &str) -> ApiResult<String>;
    async fn fetch_agent_checks(&self, agent_id: &str) -> ApiResult<Vec<Check>>;
    async fn fetch_agent_tasks(&self, agent_id: &str) -> ApiResult<Vec<AutomatedTask>>;
    async fn fetch_agent_notes(&self, agent_id: &str) -> ApiResult<Vec<Note>>;
    async fn save_note(&self, agent_id: &str, note: &str) -> ApiResult<String>;
    async fn reboot_agent(&self, agent_id: &str) -> ApiResult<String>;
    async fn ping_agent(&self, agent_id: &str) -> ApiResult<Value>;
    async fn toggle_maintenance_mode(
        &self,
        target: MaintenanceTarget,
        id: &str,
        enabled: bool,
    ) -> ApiResult<String>;
}

impl AgentsApi for TrmmClient {
    async fn fetch_agents(&self, query: &AgentQuery) -> ApiResult<Vec<Agent>> {
        self.get_json_with(&format!("{}/", BASE), query).await
    }

    async fn fetch_agent(&self, agent_id: &str) -> ApiResult<Agent> {
        self.get_json(&format!("{}/{}/", BASE, agent_id)).await
    }

    async fn edit_agent<P: Serialize + Sync + ?Sized>(&self, agent_id: &str, payload: &P) -> ApiResult<String> {
        self.send_message(Method::PUT, &format!("{}/{}/", BASE, agent_id), Some(payload))
            .await
    }

    async fn remove_agent(&self, agent_id: &str) -> ApiResult<String> {
        self.send_message::<()>(Method::DELETE, &format!("{}/{}/", BASE, agent_id), None)
            .await
    }

    async fn fetch_agent_checks(&self, agent_id: &str) -> ApiResult<Vec<Check>> {
        self.get_json(&format!("{}/{}/checks/", BASE, agent_id)).await
    }

    async fn fetch_agent_tasks(&self, agent_id: &str) -> ApiResult<Vec<AutomatedTask>> {
        self.get_json(&format!("{}/{}/tasks/", BASE, agent_id)).await
    }

    async fn fetch_agent_notes(&self, agent_id: &str) -> ApiResult<Vec<Note>> {
        self.get_json(&format!("{}/{}/notes/", BASE, agent_id)).await
    }

    async fn save_note(&self, agent_id: &str, note: &str) -> ApiResult<String> {
        let body = serde_json::json!({ "agent_id": agent_id, "note": note });
        self.send_message(Method::POST, &format!("{}/notes/", BASE), Some(&body))
            .await
    }

    async fn reboot_agent(&self, agent_id: &str) -> ApiResult<String> {
        self.send_message::<()>(Method::POST, &format!("{}/{}/reboot/", BASE, agent_id), None)
            .await
    }

    async fn ping_agent(&self, agent_id: &str) -> ApiResult<Value> {
        self.get_json(&format!("{}/{}/ping/", BASE, agent_id)).await
    }

    async fn toggle_maintenance_mode(
        &self,
        target: MaintenanceTarget,
        id: &str,
        enabled: bool,
    ) -> ApiResult<String> {
        let body = serde_json::json!({ "type": target, "id": id, "action": enabled });
        self.send_message(Method::POST, &format!("{}/maintenance/", BASE), Some(&body))
            .await
    }
}
