use super::TrmmClient;
use crate::api::types::{Script, ScriptSnippet};
use crate::error::ApiResult;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

const BASE: &str = "/scripts";

#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptQuery {
    pub show_community_scripts: bool,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct ScriptDownloadQuery {
    /// Download with snippets expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_snippets: Option<bool>,
}

pub(crate) trait ScriptsApi {
    async fn fetch_scripts(&self, query: &ScriptQuery) -> ApiResult<Vec<Script>>;
    async fn test_script<P: Serialize + Sync + ?Sized>(&self, agent_id: &str, payload: &P) -> ApiResult<Value>;
    async fn save_script<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String>;
    async fn edit_script(&self, script: &Script) -> ApiResult<String>;
    async fn remove_script(&self, id: i64) -> ApiResult<String>;
    async fn download_script(&self, id: i64, query: &ScriptDownloadQuery) -> ApiResult<Value>;

    async fn fetch_script_snippets(&self) -> ApiResult<Vec<ScriptSnippet>>;
    async fn save_script_snippet<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String>;
    async fn fetch_script_snippet(&self, id: i64) -> ApiResult<ScriptSnippet>;
    async fn edit_script_snippet(&self, snippet: &ScriptSnippet) -> ApiResult<String>;
    async fn remove_script_snippet(&self, id: i64) -> ApiResult<String>;
}

impl ScriptsApi for TrmmClient {
    async fn fetch_scripts(&self, query: &ScriptQuery) -> ApiResult<Vec<Script>> {
        self.get_json_with(&format!("{}/", BASE), query).await
    }

    async fn test_script<P: Serialize + Sync + ?Sized>(&self, agent_id: &str, payload: &P) -> ApiResult<Value> {
        self.send_json(Method::POST, &format!("{}/{}/test/", BASE, agent_id), Some(payload))
            .await
    }

    async fn save_script<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String> {
        self.send_message(Method::POST, &format!("{}/", BASE), Some(payload))
            .await
    }

    async fn edit_script(&self, script: &Script) -> ApiResult<String> {
        self.send_message(Method::PUT, &format!("{}/{}/", BASE, script.id), Some(script))
            .await
    }

    async fn remove_script(&self, id: i64) -> ApiResult<String> {
        self.send_message::<()>(Method::DELETE, &format!("{}/{}/", BASE, id), None)
            .await
    }

    async fn download_script(&self, id: i64, query: &ScriptDownloadQuery) -> ApiResult<Value> {
        self.get_json_with(&format!("{}/{}/download/", BASE, id), query)
            .await
    }

    async fn fetch_script_snippets(&self) -> ApiResult<Vec<ScriptSnippet>> {
        self.get_json(&format!("{}/snippets/", BASE)).await
    }

    async fn save_script_snippet<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String> {
        self.send_message(Method::POST, &format!("{}/snippets/", BASE), Some(payload))
            .await
    }

    async fn fetch_script_snippet(&self, id: i64) -> ApiResult<ScriptSnippet> {
        self.get_json(&format!("{}/snippets/{}/", BASE, id)).await
    }

    async fn edit_script_snippet(&self, snippet: &ScriptSnippet) -> ApiResult<String> {
        self.send_message(
            Method::PUT,
            &format!("{}/snippets/{}/", BASE, snippet.id),
            Some(snippet),
        )
        .await
    }

    async fn remove_script_snippet(&self, id: i64) -> ApiResult<String> {
        self.send_message::<()>(Method::DELETE, &format!("{}/snippets/{}/", BASE, id), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{client_for, request_lines, serve_many, serve_once};

    #[tokio::test]
    async fn test_fetch_scripts_community_flag() {
        let body = r#"[{"id": 3, "name": "Clear Temp", "category": null, "args": ["-Force"]}]"#;
        let (url, handle) = serve_once(200, body).await;
        let client = client_for(&url, Some("abc"), None);

        let scripts = client
            .fetch_scripts(&ScriptQuery {
                show_community_scripts: true,
            })
            .await
            .unwrap();
        assert_eq!(scripts[0].default_timeout, 90);
        assert_eq!(scripts[0].args, vec!["-Force".to_string()]);

        let request = handle.await.unwrap();
        assert!(request.starts_with("GET /scripts/?showCommunityScripts=true HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_script_and_snippet_routes() {
        let (url, handle) = serve_many(200, "[]", 8).await;
        let client = client_for(&url, Some("abc"), None);
        let payload = serde_json::json!({ "name": "Clear Temp", "shell": "powershell" });
        let script: Script = serde_json::from_value(serde_json::json!({ "id": 3, "name": "Clear Temp" })).unwrap();
        let snippet = ScriptSnippet {
            id: 4,
            name: "Header".to_string(),
            desc: None,
            code: Some("$ErrorActionPreference = 'Stop'".to_string()),
            shell: Some("powershell".to_string()),
        };

        client.test_script("abc123", &payload).await.unwrap();
        client.save_script(&payload).await.unwrap();
        client.edit_script(&script).await.unwrap();
        client.remove_script(3).await.unwrap();
        assert!(client.fetch_script_snippets().await.unwrap().is_empty());
        client.save_script_snippet(&payload).await.unwrap();
        client.edit_script_snippet(&snippet).await.unwrap();
        client.remove_script_snippet(4).await.unwrap();

        let requests = handle.await.unwrap();
        assert_eq!(
            request_lines(&requests),
            vec![
                "POST /scripts/abc123/test/",
                "POST /scripts/",
                "PUT /scripts/3/",
                "DELETE /scripts/3/",
                "GET /scripts/snippets/",
                "POST /scripts/snippets/",
                "PUT /scripts/snippets/4/",
                "DELETE /scripts/snippets/4/",
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_script_snippet() {
        let (url, handle) = serve_once(200, r#"{"id": 4, "name": "Header", "code": "exit 0"}"#).await;
        let client = client_for(&url, Some("abc"), None);

        let snippet = client.fetch_script_snippet(4).await.unwrap();
        assert_eq!(snippet.code.as_deref(), Some("exit 0"));
        let request = handle.await.unwrap();
        assert!(request.starts_with("GET /scripts/snippets/4/ HTTP/1.1"));
    }
}
