use super::TrmmClient;
use crate::api::types::AutomatedTask;
use crate::error::ApiResult;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

const BASE: &str = "/tasks";

#[derive(Debug, Default, Clone, Serialize)]
pub struct TaskQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<i64>,
}

pub(crate) trait TasksApi {
    async fn fetch_tasks(&self, query: &TaskQuery) -> ApiResult<Vec<AutomatedTask>>;
    async fn save_task<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String>;
    async fn update_task<P: Serialize + Sync + ?Sized>(&self, id: i64, payload: &P) -> ApiResult<String>;
    async fn remove_task(&self, id: i64) -> ApiResult<String>;
    /// `payload` may name the agent when running a policy task on one machine.
    async fn run_task(&self, id: i64, payload: &Value) -> ApiResult<String>;
}

impl TasksApi for TrmmClient {
    async fn fetch_tasks(&self, query: &TaskQuery) -> ApiResult<Vec<AutomatedTask>> {
        self.get_json_with(&format!("{}/", BASE), query).await
    }

    async fn save_task<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String> {
        self.send_message(Method::POST, &format!("{}/", BASE), Some(payload))
            .await
    }

    async fn update_task<P: Serialize + Sync + ?Sized>(&self, id: i64, payload: &P) -> ApiResult<String> {
        self.send_message(Method::PUT, &format!("{}/{}/", BASE, id), Some(payload))
            .await
    }

    async fn remove_task(&self, id: i64) -> ApiResult<String> {
        self.send_message::<()>(Method::DELETE, &format!("{}/{}/", BASE, id), None)
            .await
    }

    async fn run_task(&self, id: i64, payload: &Value) -> ApiResult<String> {
        self.send_message(Method::POST, &format!("{}/{}/run/", BASE, id), Some(payload))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{client_for, request_lines, serve_many, serve_once};

    #[tokio::test]
    async fn test_run_task_path() {
        let (url, handle) = serve_once(200, "\"Task will now be run\"").await;
        let client = client_for(&url, Some("abc"), None);

        let msg = client
            .run_task(11, &serde_json::json!({"agent_id": "abc123"}))
            .await
            .unwrap();
        assert_eq!(msg, "Task will now be run");

        let request = handle.await.unwrap();
        assert!(request.starts_with("POST /tasks/11/run/ HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_task_routes() {
        let (url, handle) = serve_many(200, "[]", 4).await;
        let client = client_for(&url, Some("abc"), None);
        let payload = serde_json::json!({ "name": "Nightly cleanup" });

        let query = TaskQuery {
            agent_id: Some("abc123".to_string()),
            policy: None,
        };
        client.fetch_tasks(&query).await.unwrap();
        client.save_task(&payload).await.unwrap();
        client.update_task(11, &payload).await.unwrap();
        client.remove_task(11).await.unwrap();

        let requests = handle.await.unwrap();
        assert_eq!(
            request_lines(&requests),
            vec!["GET /tasks/?agent_id=abc123", "POST /tasks/", "PUT /tasks/11/", "DELETE /tasks/11/"]
        );
    }
}
