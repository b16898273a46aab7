use super::TrmmClient;
use crate::api::types::{CustomField, DashboardInfo};
use crate::error::{ApiError, ApiResult};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use std::path::Path;

const BASE: &str = "/core";

/// Scope for the custom field list: `model=client|site|agent`.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CustomFieldQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

pub(crate) trait CoreApi {
    async fn fetch_custom_fields(&self, query: &CustomFieldQuery) -> ApiResult<Vec<CustomField>>;
    async fn upload_mesh_agent(&self, path: &Path) -> ApiResult<String>;
    async fn fetch_dashboard_info(&self) -> ApiResult<DashboardInfo>;
    async fn fetch_version(&self) -> ApiResult<String>;
}

impl CoreApi for TrmmClient {
    async fn fetch_custom_fields(&self, query: &CustomFieldQuery) -> ApiResult<Vec<CustomField>> {
        self.get_json_with(&format!("{}/customfields/", BASE), query)
            .await
    }

    async fn upload_mesh_agent(&self, path: &Path) -> ApiResult<String> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "meshagent.exe".to_string());
        let form = Form::new().part("meshagent", Part::bytes(bytes).file_name(file_name));

        let url_path = format!("{}/uploadmesh/", BASE);
        let builder = self.request(Method::PUT, &url_path)?.multipart(form);
        let response = self.send(builder, &Method::PUT, &url_path).await?;
        let text = response.text().await.map_err(ApiError::Transport)?;
        Ok(super::message_from(
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)),
        ))
    }

    async fn fetch_dashboard_info(&self) -> ApiResult<DashboardInfo> {
        self.get_json(&format!("{}/dashinfo/", BASE)).await
    }

    async fn fetch_version(&self) -> ApiResult<String> {
        self.get_json(&format!("{}/version/", BASE)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{client_for, serve_once};
    use std::io::Write;

    #[tokio::test]
    async fn test_fetch_custom_fields_scoped() {
        let body = r#"[{"id": 1, "name": "Contract", "model": "client", "type": "text"}]"#;
        let (url, handle) = serve_once(200, body).await;
        let client = client_for(&url, Some("abc"), None);

        let query = CustomFieldQuery {
            model: Some("client".to_string()),
        };
        let fields = client.fetch_custom_fields(&query).await.unwrap();
        assert_eq!(fields[0].field_type.as_deref(), Some("text"));

        let request = handle.await.unwrap();
        assert!(request.starts_with("GET /core/customfields/?model=client HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_fetch_version() {
        let (url, handle) = serve_once(200, "\"0.19.2\"").await;
        let client = client_for(&url, Some("abc"), None);
        assert_eq!(client.fetch_version().await.unwrap(), "0.19.2");
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_upload_mesh_agent_is_multipart() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"MZ").unwrap();
        let (url, handle) = serve_once(200, "\"Mesh Agent uploaded successfully\"").await;
        let client = client_for(&url, Some("abc"), None);

        let msg = client.upload_mesh_agent(file.path()).await.unwrap();
        assert_eq!(msg, "Mesh Agent uploaded successfully");

        let request = handle.await.unwrap();
        assert!(request.starts_with("PUT /core/uploadmesh/ HTTP/1.1"));
        assert!(request.to_lowercase().contains("content-type: multipart/form-data"));
        assert!(request.contains(r#"name="meshagent""#));
        assert!(request.contains("MZ"));
    }
}
