use super::TrmmClient;
use crate::api::types::Alert;
use crate::error::ApiResult;
use reqwest::Method;
use serde::Serialize;

const BASE: &str = "/alerts";

#[derive(Debug, Default, Clone, Serialize)]
pub struct AlertFilter {
    /// Only the newest `top` alerts; used by the dashboard badge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
    #[serde(rename = "resolvedFilter", skip_serializing_if = "Option::is_none")]
    pub resolved: Option<bool>,
    #[serde(rename = "snoozedFilter", skip_serializing_if = "Option::is_none")]
    pub snoozed: Option<bool>,
    #[serde(rename = "timeFilter", skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    Resolve,
    Snooze { days: u32 },
    Unsnooze,
}

impl AlertAction {
    fn payload(&self) -> serde_json::Value {
        match self {
            AlertAction::Resolve => serde_json::json!({ "type": "resolve" }),
            AlertAction::Snooze { days } => {
                serde_json::json!({ "type": "snooze", "snooze_days": days })
            }
            AlertAction::Unsnooze => serde_json::json!({ "type": "unsnooze" }),
        }
    }
}

pub(crate) trait AlertsApi {
    async fn fetch_alerts(&self, filter: &AlertFilter) -> ApiResult<Vec<Alert>>;
    async fn edit_alert(&self, id: i64, action: AlertAction) -> ApiResult<String>;
    async fn bulk_alert_action(&self, ids: &[i64], action: AlertAction) -> ApiResult<String>;
}

impl AlertsApi for TrmmClient {
    async fn fetch_alerts(&self, filter: &AlertFilter) -> ApiResult<Vec<Alert>> {
        self.send_json(Method::PATCH, &format!("{}/", BASE), Some(filter))
            .await
    }

    async fn edit_alert(&self, id: i64, action: AlertAction) -> ApiResult<String> {
        let mut body = action.payload();
        body["id"] = serde_json::json!(id);
        self.send_message(Method::PUT, &format!("{}/{}/", BASE, id), Some(&body))
            .await
    }

    async fn bulk_alert_action(&self, ids: &[i64], action: AlertAction) -> ApiResult<String> {
        let mut body = action.payload();
        body["alerts"] = serde_json::json!(ids);
        let bulk_action = match action {
            AlertAction::Resolve => "resolve",
            AlertAction::Snooze { .. } => "snooze",
            AlertAction::Unsnooze => "unsnooze",
        };
        body["bulk_action"] = serde_json::json!(bulk_action);
        self.send_message(Method::POST, &format!("{}/bulk/", BASE), Some(&body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_serializes_backend_keys() {
        let filter = AlertFilter {
            resolved: Some(false),
            days: Some(30),
            ..Default::default()
        };
        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(value, serde_json::json!({"resolvedFilter": false, "timeFilter": 30}));
    }

    #[test]
    fn test_snooze_payload() {
        let value = AlertAction::Snooze { days: 3 }.payload();
        assert_eq!(value["type"], "snooze");
        assert_eq!(value["snooze_days"], 3);
    }
}
