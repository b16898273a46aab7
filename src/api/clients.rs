use super::TrmmClient;
use crate::api::types::{Client, Site};
use crate::error::ApiResult;
use reqwest::Method;
use serde::Serialize;

const BASE: &str = "/clients";

pub(crate) trait ClientsApi {
    async fn fetch_clients(&self) -> ApiResult<Vec<Client>>;
    async fn fetch_client(&self, id: i64) -> ApiResult<Client>;
    async fn save_client<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String>;
    async fn edit_client<P: Serialize + Sync + ?Sized>(&self, id: i64, payload: &P) -> ApiResult<String>;
    /// `move_to_site` reassigns the client's agents before deletion.
    async fn remove_client(&self, id: i64, move_to_site: Option<i64>) -> ApiResult<String>;

    async fn fetch_sites(&self) -> ApiResult<Vec<Site>>;
    async fn fetch_site(&self, id: i64) -> ApiResult<Site>;
    async fn save_site<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String>;
    async fn edit_site<P: Serialize + Sync + ?Sized>(&self, id: i64, payload: &P) -> ApiResult<String>;
    async fn remove_site(&self, id: i64, move_to_site: Option<i64>) -> ApiResult<String>;
}

fn move_params(move_to_site: Option<i64>) -> Vec<(&'static str, String)> {
    move_to_site
        .map(|site| vec![("move_to_site", site.to_string())])
        .unwrap_or_default()
}

impl ClientsApi for TrmmClient {
    async fn fetch_clients(&self) -> ApiResult<Vec<Client>> {
        self.get_json(&format!("{}/", BASE)).await
    }

    async fn fetch_client(&self, id: i64) -> ApiResult<Client> {
        self.get_json(&format!("{}/{}/", BASE, id)).await
    }

    async fn save_client<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String> {
        self.send_message(Method::POST, &format!("{}/", BASE), Some(payload))
            .await
    }

    async fn edit_client<P: Serialize + Sync + ?Sized>(&self, id: i64, payload: &P) -> ApiResult<String> {
        self.send_message(Method::PUT, &format!("{}/{}/", BASE, id), Some(payload))
            .await
    }

    async fn remove_client(&self, id: i64, move_to_site: Option<i64>) -> ApiResult<String> {
        self.delete_with(&format!("{}/{}/", BASE, id), &move_params(move_to_site))
            .await
    }

    async fn fetch_sites(&self) -> ApiResult<Vec<Site>> {
        self.get_json(&format!("{}/sites/", BASE)).await
    }

    async fn fetch_site(&self, id: i64) -> ApiResult<Site> {
        self.get_json(&format!("{}/sites/{}/", BASE, id)).await
    }

    async fn save_site<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String> {
        self.send_message(Method::POST, &format!("{}/sites/", BASE), Some(payload))
            .await
    }

    async fn edit_site<P: Serialize + Sync + ?Sized>(&self, id: i64, payload: &P) -> ApiResult<String> {
        self.send_message(Method::PUT, &format!("{}/sites/{}/", BASE, id), Some(payload))
            .await
    }

    async fn remove_site(&self, id: i64, move_to_site: Option<i64>) -> ApiResult<String> {
        self.delete_with(&format!("{}/sites/{}/", BASE, id), &move_params(move_to_site))
            .await
    }
}
