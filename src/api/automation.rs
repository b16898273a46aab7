use super::TrmmClient;
use crate::api::types::{AutomatedTask, Check, Policy};
use crate::error::ApiResult;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

const BASE: &str = "/automation";

pub(crate) trait AutomationApi {
    async fn fetch_policies(&self) -> ApiResult<Vec<Policy>>;
    async fn fetch_policy(&self, id: i64) -> ApiResult<Policy>;
    async fn save_policy<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String>;
    async fn edit_policy(&self, policy: &Policy) -> ApiResult<String>;
    async fn remove_policy(&self, id: i64) -> ApiResult<String>;
    async fn fetch_policy_checks(&self, id: i64) -> ApiResult<Vec<Check>>;
    async fn fetch_policy_tasks(&self, id: i64) -> ApiResult<Vec<AutomatedTask>>;
    /// Per-agent results for a policy check.
    async fn fetch_policy_check_status(&self, check_id: i64) -> ApiResult<Vec<Value>>;
    async fn fetch_policy_task_status(&self, task_id: i64) -> ApiResult<Vec<Value>>;
    async fn run_policy_task(&self, task_id: i64) -> ApiResult<String>;
    /// Clients, sites and agents the policy applies to.
    async fn fetch_related(&self, id: i64) -> ApiResult<Value>;
    async fn fetch_policy_overview(&self) -> ApiResult<Value>;
    async fn save_patch_policy<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String>;
    async fn edit_patch_policy<P: Serialize + Sync + ?Sized>(&self, id: i64, payload: &P) -> ApiResult<String>;
    async fn remove_patch_policy(&self, id: i64) -> ApiResult<String>;
}

impl AutomationApi for TrmmClient {
    async fn fetch_policies(&self) -> ApiResult<Vec<Policy>> {
        self.get_json(&format!("{}/policies/", BASE)).await
    }

    async fn fetch_policy(&self, id: i64) -> ApiResult<Policy> {
        self.get_json(&format!("{}/policies/{}/", BASE, id)).await
    }

    async fn save_policy<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String> {
        self.send_message(Method::POST, &format!("{}/policies/", BASE), Some(payload))
            .await
    }

    async fn edit_policy(&self, policy: &Policy) -> ApiResult<String> {
        self.send_message(
            Method::PUT,
            &format!("{}/policies/{}/", BASE, policy.id),
            Some(policy),
        )
        .await
    }

    async fn remove_policy(&self, id: i64) -> ApiResult<String> {
        self.send_message::<()>(Method::DELETE, &format!("{}/policies/{}/", BASE, id), None)
            .await
    }

    async fn fetch_policy_checks(&self, id: i64) -> ApiResult<Vec<Check>> {
        self.get_json(&format!("{}/policies/{}/checks/", BASE, id)).await
    }

    async fn fetch_policy_tasks(&self, id: i64) -> ApiResult<Vec<AutomatedTask>> {
        self.get_json(&format!("{}/policies/{}/tasks/", BASE, id)).await
    }

    async fn fetch_policy_check_status(&self, check_id: i64) -> ApiResult<Vec<Value>> {
        self.send_json::<_, ()>(Method::PATCH, &format!("{}/checks/{}/status/", BASE, check_id), None)
            .await
    }

    async fn fetch_policy_task_status(&self, task_id: i64) -> ApiResult<Vec<Value>> {
        self.send_json::<_, ()>(Method::PATCH, &format!("{}/tasks/{}/status/", BASE, task_id), None)
            .await
    }

    async fn run_policy_task(&self, task_id: i64) -> ApiResult<String> {
        self.send_message::<()>(Method::POST, &format!("{}/tasks/{}/run/", BASE, task_id), None)
            .await
    }

    async fn fetch_related(&self, id: i64) -> ApiResult<Value> {
        self.get_json(&format!("{}/policies/{}/related/", BASE, id)).await
    }

    async fn fetch_policy_overview(&self) -> ApiResult<Value> {
        self.get_json(&format!("{}/policies/overview/", BASE)).await
    }

    async fn save_patch_policy<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> ApiResult<String> {
        self.send_message(Method::POST, &format!("{}/patchpolicy/", BASE), Some(payload))
            .await
    }

    async fn edit_patch_policy<P: Serialize + Sync + ?Sized>(&self, id: i64, payload: &P) -> ApiResult<String> {
        self.send_message(Method::PUT, &format!("{}/patchpolicy/{}/", BASE, id), Some(payload))
            .await
    }

    async fn remove_patch_policy(&self, id: i64) -> ApiResult<String> {
        self.send_message::<()>(Method::DELETE, &format!("{}/patchpolicy/{}/", BASE, id), None)
            .await
    }
}
