use crate::api::types::{AuditLogEntry, DebugLogEntry, PendingAction};
use crate::app::{App, LogsTab};
use crate::common::csv::Column;
use crate::common::format::{capitalize, format_date, format_table_column_text};
use crate::options::logs::debug_log_columns;
use crate::pages::{column_table, loading, pane, styled_column_table, tabs};
use ratatui::prelude::*;

fn date(v: &str) -> String {
    format_date(v, true).unwrap_or_else(|| v.to_string())
}

/// Audit log columns, shared with the CSV export.
pub fn audit_columns() -> Vec<Column<AuditLogEntry>> {
    vec![
        Column::new("Time", |e: &AuditLogEntry| e.entry_time.clone()).formatted(date),
        Column::new("Username", |e: &AuditLogEntry| Some(e.username.clone())),
        Column::new("Agent", |e: &AuditLogEntry| e.agent.clone()),
        Column::new("Action", |e: &AuditLogEntry| e.action.clone()).formatted(format_table_column_text),
        Column::new("Object", |e: &AuditLogEntry| e.object_type.clone()).formatted(capitalize),
        Column::new("Message", |e: &AuditLogEntry| e.message.clone()),
    ]
}

fn pending_columns() -> Vec<Column<PendingAction>> {
    vec![
        Column::new("Time", |p: &PendingAction| p.entry_time.clone()).formatted(date),
        Column::new("Agent", |p: &PendingAction| p.hostname.clone()),
        Column::new("Client", |p: &PendingAction| p.client.clone()),
        Column::new("Site", |p: &PendingAction| p.site.clone()),
        Column::new("Type", |p: &PendingAction| p.action_type.clone()).formatted(format_table_column_text),
        Column::new("Status", |p: &PendingAction| p.status.clone()).formatted(capitalize),
        Column::new("Description", |p: &PendingAction| p.description.clone()),
    ]
}

pub fn render_logs(app: &mut App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let selected = match app.logs_tab {
        LogsTab::Debug => 0,
        LogsTab::Audit => 1,
        LogsTab::Pending => 2,
    };
    frame.render_widget(
        tabs(
            vec!["Debug Log", "Audit Log", "Pending Actions"],
            selected,
            "Logs ('h/l': switch)".to_string(),
        ),
        chunks[0],
    );

    let area = chunks[1];
    match app.logs_tab {
        LogsTab::Debug => {
            let query = &app.debug_log.query;
            let title = format!(
                "Level: {} | Type: {} | Agent: {}",
                capitalize(&query.log_level_filter),
                app.debug_log.log_type_label(),
                query.agent_filter.as_deref().unwrap_or("All")
            );
            let block = pane(title, true).title_bottom(
                "'v': level, 't': type, 'a': agent, 'c': clear agent, 'D': download, 'e': export",
            );
            if app.logs_loading && app.debug_log.entries.is_empty() {
                frame.render_widget(loading(block, "debug log"), area);
                return;
            }
            let widths = vec![
                Constraint::Percentage(15),
                Constraint::Percentage(8),
                Constraint::Percentage(12),
                Constraint::Percentage(12),
                Constraint::Percentage(53),
            ];
            let table = styled_column_table(
                &app.debug_log.entries,
                &debug_log_columns(),
                widths,
                block,
                |e: &DebugLogEntry| match e.log_level.as_str() {
                    "error" | "critical" => Style::default().fg(Color::Red),
                    "warning" => Style::default().fg(Color::Yellow),
                    _ => Style::default(),
                },
            );
            frame.render_stateful_widget(table, area, &mut app.logs_state);
        }
        LogsTab::Audit => {
            let block = pane("Audit Log (last 7 days)", true).title_bottom("'e': export");
            if app.logs_loading && app.audit_logs.is_empty() {
                frame.render_widget(loading(block, "audit log"), area);
                return;
            }
            let widths = vec![
                Constraint::Percentage(15),
                Constraint::Percentage(10),
                Constraint::Percentage(12),
                Constraint::Percentage(12),
                Constraint::Percentage(10),
                Constraint::Percentage(41),
            ];
            let table = column_table(&app.audit_logs, &audit_columns(), widths, block);
            frame.render_stateful_widget(table, area, &mut app.logs_state);
        }
        LogsTab::Pending => {
            let block = pane("Pending Actions", true).title_bottom("'d': delete");
            if app.logs_loading && app.pending_actions.is_empty() {
                frame.render_widget(loading(block, "pending actions"), area);
                return;
            }
            let widths = vec![
                Constraint::Percentage(14),
                Constraint::Percentage(12),
                Constraint::Percentage(10),
                Constraint::Percentage(10),
                Constraint::Percentage(12),
                Constraint::Percentage(8),
                Constraint::Percentage(34),
            ];
            let table = column_table(&app.pending_actions, &pending_columns(), widths, block);
            frame.render_stateful_widget(table, area, &mut app.logs_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::csv::table_to_csv;

    #[test]
    fn test_audit_export_formats_action() {
        let entry: AuditLogEntry = serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": "tech",
            "agent": "SRV-01",
            "action": "execute_script",
            "object_type": "agent",
            "message": "tech ran script Cleanup"
        }))
        .unwrap();
        let csv = table_to_csv(&[entry], &audit_columns());
        assert!(csv.ends_with("\"\",\"tech\",\"SRV-01\",\"Execute Script\",\"Agent\",\"tech ran script Cleanup\""));
    }
}
