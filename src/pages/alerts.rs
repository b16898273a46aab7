use crate::api::types::Alert;
use crate::app::App;
use crate::common::csv::Column;
use crate::common::format::{capitalize, format_date};
use crate::pages::{loading, pane, styled_column_table};
use ratatui::{prelude::*, widgets::Paragraph};

fn status(alert: &Alert) -> &'static str {
    if alert.resolved {
        "Resolved"
    } else if alert.snoozed {
        "Snoozed"
    } else {
        "Active"
    }
}

pub fn alert_columns() -> Vec<Column<Alert>> {
    vec![
        Column::new("Time", |a: &Alert| a.alert_time.clone())
            .formatted(|v| format_date(v, false).unwrap_or_else(|| v.to_string())),
        Column::new("Severity", |a: &Alert| a.severity.clone()).formatted(capitalize),
        Column::new("Agent", |a: &Alert| a.hostname.clone()),
        Column::new("Client", |a: &Alert| a.client.clone()),
        Column::new("Site", |a: &Alert| a.site.clone()),
        Column::new("Message", |a: &Alert| a.message.clone()),
        Column::new("Status", |a: &Alert| Some(status(a).to_string())),
        Column::new("Snoozed Until", |a: &Alert| a.snooze_until.clone())
            .formatted(|v| format_date(v, false).unwrap_or_else(|| v.to_string())),
    ]
}

pub fn render_alerts(app: &mut App, frame: &mut Frame, area: Rect) {
    let scope = if app.new_alerts_only { "active" } else { "all" };
    let block = pane(format!("Alerts ({})", scope), true)
        .title_bottom("'r': resolve, 's': snooze 1 day, 'u': unsnooze, 'A': resolve all, 'n': active/all, 'e': export");

    if app.alerts_loading && app.store.alerts.alerts.is_empty() {
        frame.render_widget(loading(block, "alerts"), area);
        return;
    }
    let alerts = app.visible_alerts();
    if alerts.is_empty() {
        frame.render_widget(Paragraph::new("No alerts.").block(block), area);
        return;
    }

    let widths = vec![
        Constraint::Percentage(13),
        Constraint::Percentage(7),
        Constraint::Percentage(12),
        Constraint::Percentage(10),
        Constraint::Percentage(10),
        Constraint::Percentage(28),
        Constraint::Percentage(8),
        Constraint::Percentage(12),
    ];
    let table = styled_column_table(alerts, &alert_columns(), widths, block, |a: &Alert| {
        if a.resolved || a.snoozed {
            return Style::default().fg(Color::DarkGray);
        }
        match a.severity.as_deref() {
            Some("error") => Style::default().fg(Color::Red),
            Some("warning") => Style::default().fg(Color::Yellow),
            _ => Style::default(),
        }
    });
    frame.render_stateful_widget(table, area, &mut app.alerts_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_column() {
        let alert: Alert = serde_json::from_value(serde_json::json!({
            "id": 1,
            "severity": "error",
            "snoozed": true
        }))
        .unwrap();
        let columns = alert_columns();
        assert_eq!(columns[1].text(&alert), "Error");
        assert_eq!(columns[6].text(&alert), "Snoozed");
    }
}
