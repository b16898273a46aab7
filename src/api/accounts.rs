use super::TrmmClient;
use crate::api::types::{ApiKey, Role, User};
use crate::error::ApiResult;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

const BASE: &str = "/accounts";

/// Optional filters for the user list. `search` narrows by username.
#[derive(Debug, Default, Clone, Serialize)]
pub struct UserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

pub(crate) trait AccountsApi {
    async fn fetch_users(&self, query: &UserQuery) -> ApiResult<Vec<User>>;
    async fn fetch_user(&self, id: i64) -> ApiResult<User>;
    async fn save_user<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String>;
    async fn edit_user<P: Serialize + Sync + ?Sized>(&self, id: i64, payload: &P) -> ApiResult<String>;
    async fn remove_user(&self, id: i64) -> ApiResult<String>;
    async fn reset_user_password(&self, id: i64, password: &str) -> ApiResult<String>;
    async fn reset_user_totp(&self, id: i64) -> ApiResult<String>;
    async fn setup_totp(&self) -> ApiResult<Value>;
    /// Persists per-user UI preferences (`client_tree_splitter`, `show_community_scripts`, ...).
    async fn update_ui_settings(&self, settings: &Value) -> ApiResult<String>;

    async fn fetch_roles(&self) -> ApiResult<Vec<Role>>;
    async fn save_role<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String>;
    async fn edit_role<P: Serialize + Sync + ?Sized>(&self, id: i64, payload: &P) -> ApiResult<String>;
    async fn remove_role(&self, id: i64) -> ApiResult<String>;

    async fn fetch_api_keys(&self) -> ApiResult<Vec<ApiKey>>;
    async fn save_api_key<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String>;
    async fn edit_api_key(&self, key: &ApiKey) -> ApiResult<String>;
    async fn remove_api_key(&self, id: i64) -> ApiResult<String>;
}

impl AccountsApi for TrmmClient {
    async fn fetch_users(&self, query: &UserQuery) -> ApiResult<Vec<User>> {
        self.get_json_with(&format!("{}/users/", BASE), query).await
    }

    async fn fetch_user(&self, id: i64) -> ApiResult<User> {
        self.get_json(&format!("{}/users/{}/", BASE, id)).await
    }

    async fn save_user<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String> {
        self.send_message(Method::POST, &format!("{}/users/", BASE), Some(payload))
            .await
    }

    async fn edit_user<P: Serialize + Sync + ?Sized>(&self, id: i64, payload: &P) -> ApiResult<String> {
        self.send_message(Method::PUT, &format!("{}/users/{}/", BASE, id), Some(payload))
            .await
    }

    async fn remove_user(&self, id: i64) -> ApiResult<String> {
        self.send_message::<()>(Method::DELETE, &format!("{}/users/{}/", BASE, id), None)
            .await
    }

    async fn reset_user_password(&self, id: i64, password: &str) -> ApiResult<String> {
        let body = serde_json::json!({ "id": id, "password": password });
        self.send_message(Method::POST, &format!("{}/users/reset/", BASE), Some(&body))
            .await
    }

    async fn reset_user_totp(&self, id: i64) -> ApiResult<String> {
        let body = serde_json::json!({ "id": id });
        self.send_message(Method::PUT, &format!("{}/users/reset_totp/", BASE), Some(&body))
            .await
    }

    async fn setup_totp(&self) -> ApiResult<Value> {
        self.send_json::<Value, ()>(Method::POST, &format!("{}/users/setup_totp/", BASE), None)
            .await
    }

    async fn update_ui_settings(&self, settings: &Value) -> ApiResult<String> {
        self.send_message(Method::PATCH, &format!("{}/users/ui/", BASE), Some(settings))
            .await
    }

    async fn fetch_roles(&self) -> ApiResult<Vec<Role>> {
        self.get_json(&format!("{}/roles/", BASE)).await
    }

    async fn save_role<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String> {
        self.send_message(Method::POST, &format!("{}/roles/", BASE), Some(payload))
            .await
    }

    async fn edit_role<P: Serialize + Sync + ?Sized>(&self, id: i64, payload: &P) -> ApiResult<String> {
        self.send_message(Method::PUT, &format!("{}/roles/{}/", BASE, id), Some(payload))
            .await
    }

    async fn remove_role(&self, id: i64) -> ApiResult<String> {
        self.send_message::<()>(Method::DELETE, &format!("{}/roles/{}/", BASE, id), None)
            .await
    }

    async fn fetch_api_keys(&self) -> ApiResult<Vec<ApiKey>> {
        self.get_json(&format!("{}/apikeys/", BASE)).await
    }

    async fn save_api_key<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String> {
        self.send_message(Method::POST, &format!("{}/apikeys/", BASE), Some(payload))
            .await
    }

    async fn edit_api_key(&self, key: &ApiKey) -> ApiResult<String> {
        self.send_message(Method::PUT, &format!("{}/apikeys/{}/", BASE, key.id), Some(key))
            .await
    }

    async fn remove_api_key(&self, id: i64) -> ApiResult<String> {
        self.send_message::<()>(Method::DELETE, &format!("{}/apikeys/{}/", BASE, id), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{client_for, request_lines, serve_many, serve_once};

    #[tokio::test]
    async fn test_fetch_users_with_search() {
        let body = r#"[{"id": 1, "username": "jim", "is_active": true}]"#;
        let (url, handle) = serve_once(200, body).await;
        let client = client_for(&url, Some("abc"), None);

        let query = UserQuery {
            search: Some("ji".to_string()),
        };
        let users = client.fetch_users(&query).await.unwrap();
        assert_eq!(users[0].username, "jim");

        let request = handle.await.unwrap();
        assert!(request.starts_with("GET /accounts/users/?search=ji HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_remove_role_accepts_empty_body() {
        let (url, handle) = serve_once(200, "").await;
        let client = client_for(&url, Some("abc"), None);

        let msg = client.remove_role(3).await.unwrap();
        assert_eq!(msg, "");

        let request = handle.await.unwrap();
        assert!(request.starts_with("DELETE /accounts/roles/3/ HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_user_role_and_key_routes() {
        let (url, handle) = serve_many(200, "[]", 12).await;
        let client = client_for(&url, Some("abc"), None);
        let payload = serde_json::json!({ "name": "tech" });
        let key: ApiKey = serde_json::from_value(serde_json::json!({ "id": 6, "name": "backup" })).unwrap();

        client.save_user(&payload).await.unwrap();
        client.edit_user(2, &payload).await.unwrap();
        client.remove_user(2).await.unwrap();
        client.reset_user_password(2, "hunter22").await.unwrap();
        client.reset_user_totp(2).await.unwrap();
        client.save_role(&payload).await.unwrap();
        client.edit_role(3, &payload).await.unwrap();
        client.save_api_key(&payload).await.unwrap();
        client.edit_api_key(&key).await.unwrap();
        client.remove_api_key(6).await.unwrap();
        client.update_ui_settings(&serde_json::json!({ "client_tree_splitter": 20 })).await.unwrap();
        client.setup_totp().await.unwrap();

        let requests = handle.await.unwrap();
        assert_eq!(
            request_lines(&requests),
            vec![
                "POST /accounts/users/",
                "PUT /accounts/users/2/",
                "DELETE /accounts/users/2/",
                "POST /accounts/users/reset/",
                "PUT /accounts/users/reset_totp/",
                "POST /accounts/roles/",
                "PUT /accounts/roles/3/",
                "POST /accounts/apikeys/",
                "PUT /accounts/apikeys/6/",
                "DELETE /accounts/apikeys/6/",
                "PATCH /accounts/users/ui/",
                "POST /accounts/users/setup_totp/",
            ]
        );
        assert!(requests[3].contains(r#""password":"hunter22""#));
    }

    #[tokio::test]
    async fn test_fetch_user() {
        let (url, handle) = serve_once(200, r#"{"id": 2, "username": "tech", "role": 1}"#).await;
        let client = client_for(&url, Some("abc"), None);

        let user = client.fetch_user(2).await.unwrap();
        assert_eq!(user.role, Some(1));
        let request = handle.await.unwrap();
        assert!(request.starts_with("GET /accounts/users/2/ HTTP/1.1"));
    }
}
