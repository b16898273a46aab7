use crate::api::TrmmClient;
use crate::api::logs::{DebugLogQuery, LogsApi};
use crate::api::types::DebugLogEntry;
use crate::common::csv::Column;
use crate::common::format::{format_date, format_table_column_text};
use crate::error::ApiResult;

/// (label, value)
pub const LOG_TYPE_OPTIONS: [(&str, &str); 5] = [
    ("Agent Update", "agent_update"),
    ("Agent Issues", "agent_issues"),
    ("Windows Updates", "windows_updates"),
    ("System Issues", "system_issues"),
    ("Scripting", "scripting"),
];

pub const LOG_LEVEL_OPTIONS: [&str; 4] = ["info", "warning", "error", "critical"];

/// Columns of the debug log table, reused for CSV export.
pub fn debug_log_columns() -> Vec<Column<DebugLogEntry>> {
    vec![
        Column::new("Time", |e: &DebugLogEntry| e.entry_time.clone())
            .formatted(|v| format_date(v, true).unwrap_or_else(|| v.to_string())),
        Column::new("Log Level", |e: &DebugLogEntry| Some(e.log_level.clone())),
        Column::new("Agent", |e: &DebugLogEntry| e.agent.clone()),
        Column::new("Log Type", |e: &DebugLogEntry| Some(e.log_type.clone()))
            .formatted(format_table_column_text),
        Column::new("Message", |e: &DebugLogEntry| e.message.clone()),
    ]
}

/// Filters and rows of the debug log screen.
#[derive(Debug, Default)]
pub struct DebugLogState {
    pub query: DebugLogQuery,
    pub entries: Vec<DebugLogEntry>,
}

impl DebugLogState {
    /// Cycles through the log levels.
    pub fn next_level(&mut self) {
        let i = LOG_LEVEL_OPTIONS
            .iter()
            .position(|l| *l == self.query.log_level_filter)
            .map(|i| (i + 1) % LOG_LEVEL_OPTIONS.len())
            .unwrap_or(0);
        self.query.log_level_filter = LOG_LEVEL_OPTIONS[i].to_string();
    }

    /// Cycles through the log types, with "all" between the last and the first.
    pub fn next_log_type(&mut self) {
        let current = self
            .query
            .log_type_filter
            .as_deref()
            .and_then(|t| LOG_TYPE_OPTIONS.iter().position(|(_, v)| *v == t));
        self.query.log_type_filter = match current {
            None => Some(LOG_TYPE_OPTIONS[0].1.to_string()),
            Some(i) if i + 1 < LOG_TYPE_OPTIONS.len() => Some(LOG_TYPE_OPTIONS[i + 1].1.to_string()),
            Some(_) => None,
        };
    }

    /// Blank agent ids clear the filter.
    pub fn set_agent(&mut self, agent_id: Option<String>) {
        self.query.agent_filter = agent_id.filter(|a| !a.trim().is_empty());
    }

    pub fn log_type_label(&self) -> &str {
        self.query
            .log_type_filter
            .as_deref()
            .and_then(|t| LOG_TYPE_OPTIONS.iter().find(|(_, v)| *v == t))
            .map(|(label, _)| *label)
            .unwrap_or("All")
    }
}

pub async fn fetch_debug_log(client: &TrmmClient, query: &DebugLogQuery) -> ApiResult<Vec<DebugLogEntry>> {
    client.fetch_debug_log(query).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::csv::table_to_csv;

    #[test]
    fn test_defaults() {
        let state = DebugLogState::default();
        assert_eq!(state.query.log_level_filter, "info");
        assert_eq!(state.query.agent_filter, None);
        assert_eq!(state.log_type_label(), "All");
    }

    #[test]
    fn test_cycles() {
        let mut state = DebugLogState::default();
        state.next_level();
        assert_eq!(state.query.log_level_filter, "warning");
        for _ in 0..3 {
            state.next_level();
        }
        assert_eq!(state.query.log_level_filter, "info");

        state.next_log_type();
        assert_eq!(state.query.log_type_filter.as_deref(), Some("agent_update"));
        assert_eq!(state.log_type_label(), "Agent Update");
        for _ in 0..4 {
            state.next_log_type();
        }
        assert_eq!(state.query.log_type_filter.as_deref(), Some("scripting"));
        state.next_log_type();
        assert_eq!(state.query.log_type_filter, None);
    }

    #[test]
    fn test_blank_agent_clears_filter() {
        let mut state = DebugLogState::default();
        state.set_agent(Some("abc123".to_string()));
        assert_eq!(state.query.agent_filter.as_deref(), Some("abc123"));
        state.set_agent(Some("  ".to_string()));
        assert_eq!(state.query.agent_filter, None);
    }

    #[test]
    fn test_columns_format_log_type() {
        let entry: DebugLogEntry = serde_json::from_value(serde_json::json!({
            "log_level": "error",
            "log_type": "windows_updates",
            "agent": "DESKTOP-01",
            "message": "install failed"
        }))
        .unwrap();
        let csv = table_to_csv(&[entry], &debug_log_columns());
        assert_eq!(
            csv,
            "\"Time\",\"Log Level\",\"Agent\",\"Log Type\",\"Message\"\r\n\"\",\"error\",\"DESKTOP-01\",\"Windows Updates\",\"install failed\""
        );
    }
}
