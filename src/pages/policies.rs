use crate::api::types::{AutomatedTask, Check, Policy};
use crate::app::App;
use crate::common::csv::Column;
use crate::common::format::capitalize;
use crate::common::schedule::task_schedule;
use crate::pages::{column_table, loading, pane};
use ratatui::{prelude::*, widgets::Paragraph};

fn flag(v: bool) -> Option<String> {
    Some(if v { "Yes" } else { "No" }.to_string())
}

fn policy_columns() -> Vec<Column<Policy>> {
    vec![
        Column::new("Name", |p: &Policy| Some(p.name.clone())),
        Column::new("Description", |p: &Policy| p.desc.clone()),
        Column::new("Active", |p: &Policy| flag(p.active)),
        Column::new("Enforced", |p: &Policy| flag(p.enforced)),
        Column::new("Default", |p: &Policy| {
            match (p.default_server_policy, p.default_workstation_policy) {
                (true, true) => Some("Servers, Workstations".to_string()),
                (true, false) => Some("Servers".to_string()),
                (false, true) => Some("Workstations".to_string()),
                (false, false) => None,
            }
        }),
        Column::new("Agents", |p: &Policy| p.agents_count.map(|c| c.to_string())),
    ]
}

fn policy_check_columns() -> Vec<Column<Check>> {
    vec![
        Column::new("Type", |c: &Check| Some(c.check_type.display_name().to_string())),
        Column::new("Description", |c: &Check| Some(c.description())),
        Column::new("Severity", |c: &Check| c.alert_severity.clone()).formatted(capitalize),
    ]
}

fn policy_task_columns() -> Vec<Column<AutomatedTask>> {
    vec![
        Column::new("Name", |t: &AutomatedTask| Some(t.name.clone())),
        Column::new("Schedule", task_schedule),
        Column::new("Enabled", |t: &AutomatedTask| flag(t.enabled)),
    ]
}

pub fn render_policies(app: &mut App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let block = pane("Automation Policies ('Enter': open)", true);
    if app.policies_loading && app.store.automation.policies.is_empty() {
        frame.render_widget(loading(block, "policies"), chunks[0]);
    } else {
        let widths = vec![
            Constraint::Percentage(22),
            Constraint::Percentage(30),
            Constraint::Percentage(8),
            Constraint::Percentage(10),
            Constraint::Percentage(20),
            Constraint::Percentage(10),
        ];
        let table = column_table(&app.store.automation.policies, &policy_columns(), widths, block);
        frame.render_stateful_widget(table, chunks[0], &mut app.policy_state);
    }

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let Some(policy) = app.store.automation.selected() else {
        frame.render_widget(
            Paragraph::new("Select a policy to see its checks and tasks.").block(pane("Policy", false)),
            chunks[1],
        );
        return;
    };

    let checks_block = pane(format!("{}: Checks", policy.name), false).title_bottom("'a': add check");
    let widths = vec![
        Constraint::Percentage(25),
        Constraint::Percentage(60),
        Constraint::Percentage(15),
    ];
    frame.render_widget(
        column_table(&app.store.automation.checks, &policy_check_columns(), widths, checks_block),
        right[0],
    );

    let tasks_block = pane(format!("{}: Tasks", policy.name), false);
    let widths = vec![
        Constraint::Percentage(35),
        Constraint::Percentage(50),
        Constraint::Percentage(15),
    ];
    frame.render_widget(
        column_table(&app.store.automation.tasks, &policy_task_columns(), widths, tasks_block),
        right[1],
    );
}
