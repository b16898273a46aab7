use crate::api::types::Alert;
use crate::common::format::parse_timestamp;

#[derive(Debug, Default)]
pub struct AlertsStore {
    pub alerts: Vec<Alert>,
}

impl AlertsStore {
    pub fn set_alerts(&mut self, alerts: Vec<Alert>) {
        self.alerts = alerts;
    }

    /// Alerts that still need attention: unresolved, or never snoozed.
    pub fn new_alerts(&self) -> Vec<&Alert> {
        self.alerts
            .iter()
            .filter(|a| !a.resolved || a.snooze_until.is_none())
            .collect()
    }

    /// Newest first; alerts without a parseable time sink to the bottom.
    pub fn sorted_alerts(&self) -> Vec<&Alert> {
        let mut sorted: Vec<&Alert> = self.alerts.iter().collect();
        sorted.sort_by_key(|a| std::cmp::Reverse(a.alert_time.as_deref().and_then(parse_timestamp)));
        sorted
    }
}
