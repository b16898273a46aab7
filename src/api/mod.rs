pub mod accounts;
pub mod agents;
pub mod alerts;
pub mod automation;
pub mod checks;
pub mod clients;
pub mod dashboard;
pub mod logs;
pub mod scripts;
pub mod services;
pub mod software;
pub mod tasks;
pub mod types;
pub mod winupdates;

#[cfg(test)]
pub(crate) mod test_server;

use crate::config::{Credentials, TrmmConfig};
use crate::error::{ApiError, ApiResult};
use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use types::LoginResponse;

/// HTTP client for the RMM backend. Cloned into every spawned request task.
#[derive(Clone, Debug)]
pub struct TrmmClient {
    pub(crate) client: Client,
    pub(crate) config: TrmmConfig,
    pub(crate) token: Option<String>,
}

impl TrmmClient {
    pub fn new(config: TrmmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let token = config.api_token.clone();
        Ok(Self {
            client,
            config,
            token,
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() || self.config.api_key.is_some()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.config.credentials.as_ref()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    /// Builds an authenticated request. Session tokens win over API keys.
    pub(crate) fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let builder = self.client.request(method, self.url(path));
        if let Some(token) = &self.token {
            Ok(builder.header("Authorization", format!("Token {}", token)))
        } else if let Some(key) = &self.config.api_key {
            Ok(builder.header("X-API-KEY", key))
        } else {
            Err(ApiError::NotAuthenticated)
        }
    }

    pub(crate) async fn send(
        &self,
        builder: RequestBuilder,
        method: &Method,
        path: &str,
    ) -> ApiResult<Response> {
        tracing::debug!(%method, path, "api request");

        let response = builder.send().await.map_err(|e| {
            tracing::error!(%method, path, error = %e, "api request failed to send");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(%method, path, %status, body = %text, "api request failed");
            return Err(ApiError::from_status(status, text));
        }

        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let text = response.text().await?;
        // DELETE and some POST endpoints answer with an empty body.
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        Ok(serde_json::from_str(text)?)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let builder = self.request(Method::GET, path)?;
        let response = self.send(builder, &Method::GET, path).await?;
        Self::read_json(response).await
    }

    pub(crate) async fn get_json_with<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path)?.query(query);
        let response = self.send(builder, &Method::GET, path).await?;
        Self::read_json(response).await
    }

    pub(crate) async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(method.clone(), path)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = self.send(builder, &method, path).await?;
        Self::read_json(response).await
    }

    /// For write endpoints that answer with a status message ("Check was added").
    pub(crate) async fn send_message<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<String>
    where
        B: Serialize + ?Sized,
    {
        let value: Value = self.send_json(method, path, body).await?;
        Ok(message_from(value))
    }

    pub(crate) async fn delete_with<Q>(&self, path: &str, query: &Q) -> ApiResult<String>
    where
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::DELETE, path)?.query(query);
        let response = self.send(builder, &Method::DELETE, path).await?;
        let value: Value = Self::read_json(response).await?;
        Ok(message_from(value))
    }

    pub async fn login(&mut self, creds: &Credentials) -> ApiResult<()> {
        let path = "/login/";
        let mut body = serde_json::json!({
            "username": creds.username,
            "password": creds.password,
        });
        if let Some(code) = &creds.totp {
            body["twofactor"] = Value::String(code.clone());
        }

        let builder = self.client.post(self.url(path)).json(&body);
        let response = self.send(builder, &Method::POST, path).await?;
        let login: LoginResponse = Self::read_json(response).await?;
        tracing::info!(username = %creds.username, "logged in");
        self.token = Some(login.token);
        Ok(())
    }

    /// Clears the local token even when the backend call fails.
    pub async fn logout(&mut self) -> ApiResult<()> {
        if self.token.is_none() {
            return Ok(());
        }
        let result: ApiResult<Value> = self.send_json::<Value, ()>(Method::POST, "/logout/", None).await;
        self.token = None;
        result.map(|_| ())
    }
}

/// Turns a write endpoint's JSON answer into a displayable message.
pub fn message_from(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::test_server::{client_for, serve_once};
    use super::*;
    use crate::api::clients::ClientsApi;

    #[tokio::test]
    async fn test_token_header_attached() {
        let (url, handle) = serve_once(200, "[]").await;
        let client = client_for(&url, Some("abc123"), None);

        let clients = client.fetch_clients().await.unwrap();
        assert!(clients.is_empty());

        let request = handle.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /clients/ http/1.1"));
        assert!(request.contains("authorization: token abc123"));
    }

    #[tokio::test]
    async fn test_api_key_header_attached() {
        let (url, handle) = serve_once(200, "[]").await;
        let client = client_for(&url, None, Some("KEY-1"));

        client.fetch_sites().await.unwrap();

        let request = handle.await.unwrap().to_lowercase();
        assert!(request.contains("x-api-key: key-1"));
        assert!(!request.contains("authorization:"));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_session_expired() {
        let (url, handle) = serve_once(401, r#"{"detail": "Invalid token."}"#).await;
        let client = client_for(&url, Some("stale"), None);

        let err = client.fetch_clients().await.unwrap_err();
        assert!(err.is_session_expired());
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_bad_request_carries_message() {
        let (url, handle) = serve_once(400, "\"Client name already exists\"").await;
        let client = client_for(&url, Some("abc"), None);

        let err = client
            .save_client(&serde_json::json!({"client": {"name": "Contoso"}}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Client name already exists");

        let request = handle.await.unwrap();
        assert!(request.contains("\"name\":\"Contoso\""));
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_sending() {
        let client = client_for("http://127.0.0.1:9", None, None);
        let err = client.fetch_clients().await.unwrap_err();
        assert!(matches!(err, ApiError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let (url, handle) = serve_once(200, r#"{"token": "fresh", "expiry": null}"#).await;
        let mut client = client_for(&url, None, None);
        let creds = Credentials {
            username: "tech".to_string(),
            password: "hunter2".to_string(),
            totp: Some("123456".to_string()),
        };

        client.login(&creds).await.unwrap();
        assert_eq!(client.token(), Some("fresh"));
        assert!(client.is_authenticated());

        let request = handle.await.unwrap();
        assert!(request.contains("\"twofactor\":\"123456\""));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = client_for("http://127.0.0.1:1", Some("abc"), None);
        let err = client.fetch_clients().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn test_message_from() {
        assert_eq!(message_from(Value::String("ok".into())), "ok");
        assert_eq!(message_from(Value::Null), "");
        assert_eq!(message_from(serde_json::json!({"a": 1})), r#"{"a":1}"#);
    }
}
