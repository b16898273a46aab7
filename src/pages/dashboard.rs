use crate::app::{AgentTab, App, DashboardFocus};
use crate::api::types::{Agent, AutomatedTask, Check, InstalledSoftware, Note, WinService, WinUpdate};
use crate::common::csv::Column;
use crate::common::format::{boot_time, capitalize, disk_size, format_date};
use crate::common::schedule::task_schedule;
use crate::pages::{column_table, labeled, loading, pane, styled_column_table, tabs};
use crate::store::tree::{NodeColor, flatten};
use ratatui::{
    prelude::*,
    widgets::{Block, Cell, Paragraph, Row, Table, Wrap},
};

fn date(v: &str) -> String {
    format_date(v, false).unwrap_or_else(|| v.to_string())
}

fn yes_no(v: bool) -> Option<String> {
    Some(if v { "Yes" } else { "No" }.to_string())
}

/// Agent table columns, shared with the CSV export.
pub fn agent_columns() -> Vec<Column<Agent>> {
    vec![
        Column::new("Client", |a: &Agent| Some(a.client.clone())),
        Column::new("Site", |a: &Agent| Some(a.site.clone())),
        Column::new("Hostname", |a: &Agent| Some(a.hostname.clone())),
        Column::new("Description", |a: &Agent| a.description.clone()),
        Column::new("User", |a: &Agent| {
            a.logged_username
                .clone()
                .filter(|u| !u.is_empty() && u != "None")
                .or_else(|| a.last_logged_in_user.clone())
        }),
        Column::new("Status", |a: &Agent| a.status.clone()).formatted(capitalize),
        Column::new("Checks", |a: &Agent| {
            a.checks.as_ref().map(|c| {
                if c.has_failing_checks {
                    format!("{} failing", c.failing)
                } else {
                    format!("{}/{} passing", c.passing, c.total)
                }
            })
        }),
        Column::new("Last Response", |a: &Agent| a.last_seen.clone()).formatted(date),
        Column::new("Boot Time", |a: &Agent| a.boot_time.map(boot_time)),
        Column::new("Version", |a: &Agent| a.version.clone()),
    ]
}

fn check_columns() -> Vec<Column<Check>> {
    vec![
        Column::new("Status", |c: &Check| c.status.clone()).formatted(capitalize),
        Column::new("Description", |c: &Check| Some(c.description())),
        Column::new("Severity", |c: &Check| c.alert_severity.clone()).formatted(capitalize),
        Column::new("Policy", |c: &Check| c.policy.map(|_| "Yes".to_string())),
        Column::new("Last Run", |c: &Check| c.last_run.clone()).formatted(date),
    ]
}

fn task_columns() -> Vec<Column<AutomatedTask>> {
    vec![
        Column::new("Name", |t: &AutomatedTask| Some(t.name.clone())),
        Column::new("Schedule", task_schedule),
        Column::new("Enabled", |t: &AutomatedTask| yes_no(t.enabled)),
        Column::new("Sync Status", |t: &AutomatedTask| t.sync_status.clone()).formatted(capitalize),
        Column::new("Last Run", |t: &AutomatedTask| t.last_run.clone()).formatted(date),
        Column::new("Exit Code", |t: &AutomatedTask| t.retcode.map(|r| r.to_string())),
    ]
}

fn software_columns() -> Vec<Column<InstalledSoftware>> {
    vec![
        Column::new("Name", |s: &InstalledSoftware| Some(s.name.clone())),
        Column::new("Version", |s: &InstalledSoftware| s.version.clone()),
        Column::new("Publisher", |s: &InstalledSoftware| s.publisher.clone()),
        Column::new("Installed", |s: &InstalledSoftware| s.install_date.clone()),
        Column::new("Size", |s: &InstalledSoftware| s.size.clone()),
    ]
}

fn update_columns() -> Vec<Column<WinUpdate>> {
    vec![
        Column::new("KB", |u: &WinUpdate| u.kb.clone()),
        Column::new("Title", |u: &WinUpdate| u.title.clone()),
        Column::new("Severity", |u: &WinUpdate| u.severity.clone()),
        Column::new("Installed", |u: &WinUpdate| yes_no(u.installed)),
        Column::new("Action", |u: &WinUpdate| u.action.clone()).formatted(capitalize),
    ]
}

fn service_columns() -> Vec<Column<WinService>> {
    vec![
        Column::new("Display Name", |s: &WinService| Some(s.display_name.clone())),
        Column::new("Name", |s: &WinService| Some(s.name.clone())),
        Column::new("Status", |s: &WinService| s.status.clone()).formatted(capitalize),
        Column::new("Startup", |s: &WinService| s.start_type.clone()).formatted(capitalize),
    ]
}

fn note_columns() -> Vec<Column<Note>> {
    vec![
        Column::new("Time", |n: &Note| n.entry_time.clone()).formatted(date),
        Column::new("User", |n: &Note| n.username.clone()),
        Column::new("Note", |n: &Note| Some(n.note.clone())),
    ]
}

pub fn render_dashboard(app: &mut App, frame: &mut Frame, area: Rect) {
    let tree_width = app.store.prefs.client_tree_splitter;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(tree_width), Constraint::Min(0)])
        .split(area);

    render_tree(app, frame, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(app.store.agent_table_height()),
            Constraint::Fill(app.store.tabs_table_height()),
        ])
        .split(chunks[1]);

    render_agents(app, frame, right[0]);
    render_agent_tabs(app, frame, right[1]);
}

fn render_tree(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = pane("Clients", app.focus == DashboardFocus::Tree);
    if app.store.tree_loading && !app.store.tree_ready {
        frame.render_widget(loading(block, "clients"), area);
        return;
    }

    let rows: Vec<Row> = flatten(&app.store.tree)
        .into_iter()
        .map(|(depth, node)| {
            let style = match node.color {
                Some(NodeColor::Green) => Style::default().fg(Color::Green),
                Some(NodeColor::Negative) => Style::default().fg(Color::Red),
                Some(NodeColor::Warning) => Style::default().fg(Color::Yellow),
                None => Style::default(),
            };
            let marker = if node.children.is_empty() { "  " } else { "▾ " };
            Row::new(vec![Cell::from(format!("{}{}{}", "  ".repeat(depth), marker, node.label))])
                .style(style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Percentage(100)])
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");
    frame.render_stateful_widget(table, area, &mut app.tree_state);
}

fn render_agents(app: &mut App, frame: &mut Frame, area: Rect) {
    let title = format!(
        "Agents [{}] ('w': filter, 'm': maintenance, 'p': ping, 'c': run checks, 'b': reboot)",
        app.agent_filter.title()
    );
    let block = pane(title, app.focus == DashboardFocus::Agents);
    if app.loaded_node.is_none() {
        frame.render_widget(
            Paragraph::new("Select a client or site and press Enter.").block(block),
            area,
        );
        return;
    }
    if app.store.agent_table_loading && app.agents.is_empty() {
        frame.render_widget(loading(block, "agents"), area);
        return;
    }

    let widths = vec![
        Constraint::Percentage(10),
        Constraint::Percentage(10),
        Constraint::Percentage(13),
        Constraint::Percentage(15),
        Constraint::Percentage(10),
        Constraint::Percentage(7),
        Constraint::Percentage(8),
        Constraint::Percentage(12),
        Constraint::Percentage(8),
        Constraint::Percentage(7),
    ];
    let agents = app.visible_agents();
    let table = styled_column_table(agents, &agent_columns(), widths, block, |a: &Agent| {
        if a.maintenance_mode {
            Style::default().fg(Color::Green)
        } else if !a.is_online() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        }
    });
    frame.render_stateful_widget(table, area, &mut app.agent_table_state);
}

fn tab_hint(tab: AgentTab) -> &'static str {
    match tab {
        AgentTab::Summary => "",
        AgentTab::Checks => "'a': add, 'e': edit, 'x': reset, 'd': delete",
        AgentTab::Tasks => "'r': run",
        AgentTab::Software => "'r': refresh",
        AgentTab::Updates => "'s': scan, 'i': install, 'a': approve, 'g': ignore, 'n': clear",
        AgentTab::Services => "'s': start, 't': stop, 'r': restart",
        AgentTab::Notes => "'n': new note",
    }
}

fn render_agent_tabs(app: &mut App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let title = match app.store.agent_hostname() {
        Some(hostname) => format!("Agent: {}", hostname),
        None => "Agent".to_string(),
    };
    let titles = AgentTab::ALL.iter().map(|t| t.title()).collect();
    frame.render_widget(tabs(titles, app.agent_tab.index(), title), chunks[0]);

    let focused = app.focus == DashboardFocus::Tabs;
    let block = pane(app.agent_tab.title(), focused).title_bottom(tab_hint(app.agent_tab));
    if app.store.selected_row.is_none() {
        frame.render_widget(
            Paragraph::new("Select an agent and press Enter.").block(block),
            chunks[1],
        );
        return;
    }

    let area = chunks[1];
    match app.agent_tab {
        AgentTab::Summary => render_summary(app, frame, area, block),
        AgentTab::Checks => {
            let Some(checks) = app.store.checks() else {
                frame.render_widget(loading(block, "checks"), area);
                return;
            };
            let widths = vec![
                Constraint::Percentage(10),
                Constraint::Percentage(45),
                Constraint::Percentage(10),
                Constraint::Percentage(10),
                Constraint::Percentage(25),
            ];
            let table = styled_column_table(checks, &check_columns(), widths, block, |c: &Check| {
                match c.status.as_deref() {
                    Some("failing") => Style::default().fg(Color::Red),
                    Some("passing") => Style::default().fg(Color::Green),
                    _ => Style::default(),
                }
            });
            frame.render_stateful_widget(table, area, &mut app.tab_table_state);
        }
        AgentTab::Tasks => {
            let widths = vec![
                Constraint::Percentage(25),
                Constraint::Percentage(30),
                Constraint::Percentage(8),
                Constraint::Percentage(12),
                Constraint::Percentage(17),
                Constraint::Percentage(8),
            ];
            let table = column_table(&app.store.automated_tasks, &task_columns(), widths, block);
            frame.render_stateful_widget(table, area, &mut app.tab_table_state);
        }
        AgentTab::Software => {
            let widths = vec![
                Constraint::Percentage(35),
                Constraint::Percentage(15),
                Constraint::Percentage(25),
                Constraint::Percentage(13),
                Constraint::Percentage(12),
            ];
            let table = column_table(&app.store.installed_software, &software_columns(), widths, block);
            frame.render_stateful_widget(table, area, &mut app.tab_table_state);
        }
        AgentTab::Updates => {
            let widths = vec![
                Constraint::Percentage(10),
                Constraint::Percentage(55),
                Constraint::Percentage(12),
                Constraint::Percentage(10),
                Constraint::Percentage(13),
            ];
            let updates = app.store.sorted_updates();
            let table = column_table(updates, &update_columns(), widths, block);
            frame.render_stateful_widget(table, area, &mut app.tab_table_state);
        }
        AgentTab::Services => {
            let widths = vec![
                Constraint::Percentage(45),
                Constraint::Percentage(25),
                Constraint::Percentage(15),
                Constraint::Percentage(15),
            ];
            let table = column_table(app.store.agent_services(), &service_columns(), widths, block);
            frame.render_stateful_widget(table, area, &mut app.tab_table_state);
        }
        AgentTab::Notes => {
            let widths = vec![
                Constraint::Percentage(20),
                Constraint::Percentage(15),
                Constraint::Percentage(65),
            ];
            let table = column_table(&app.store.notes, &note_columns(), widths, block);
            frame.render_stateful_widget(table, area, &mut app.tab_table_state);
        }
    }
}

fn render_summary(app: &App, frame: &mut Frame, area: Rect, block: Block) {
    let Some(agent) = app.store.agent_summary.as_ref() else {
        frame.render_widget(loading(block, "agent"), area);
        return;
    };
    let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());

    let mut text = vec![
        labeled("Hostname", agent.hostname.clone()),
        labeled("Client / Site", format!("{} / {}", agent.client, agent.site)),
        labeled("Operating System", or_na(&agent.operating_system)),
        labeled("Type", capitalize(&or_na(&agent.monitoring_type))),
        labeled("Status", capitalize(&or_na(&agent.status))),
        labeled("Public IP", or_na(&agent.public_ip)),
        labeled("Logged In User", or_na(&agent.logged_username)),
        labeled("Last Response", agent.last_seen.as_deref().map(date).unwrap_or_default()),
        labeled("Boot Time", agent.boot_time.map(boot_time).unwrap_or_default()),
        labeled("Agent Version", or_na(&agent.version)),
        labeled("Maintenance Mode", if agent.maintenance_mode { "On" } else { "Off" }),
        labeled("Needs Reboot", if agent.needs_reboot { "Yes" } else { "No" }),
        labeled(
            "Pending Actions",
            agent.pending_actions_count.unwrap_or(0).to_string(),
        ),
    ];
    if let Some(checks) = &agent.checks {
        text.push(labeled(
            "Checks",
            format!(
                "{} total, {} passing, {} failing, {} warning",
                checks.total, checks.passing, checks.failing, checks.warning
            ),
        ));
    }
    for disk in app.store.agent_disks() {
        text.push(labeled(
            "Disk",
            format!(
                "{} {} used of {} ({:.0}%)",
                disk.device,
                disk_size(disk.used.as_ref()),
                disk_size(disk.total.as_ref()),
                disk.percent.unwrap_or(0.0)
            ),
        ));
    }

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::csv::table_to_csv;

    #[test]
    fn test_agent_columns_prefer_logged_in_user() {
        let agent: Agent = serde_json::from_value(serde_json::json!({
            "agent_id": "abc",
            "hostname": "SRV-01",
            "client_name": "Acme",
            "site_name": "HQ",
            "logged_username": "None",
            "last_logged_in_user": "jdoe",
            "status": "online",
            "checks": {"total": 3, "passing": 3, "failing": 0, "warning": 0, "info": 0, "has_failing_checks": false}
        }))
        .unwrap();
        let columns = agent_columns();
        assert_eq!(columns[4].text(&agent), "jdoe");
        assert_eq!(columns[5].text(&agent), "Online");
        assert_eq!(columns[6].text(&agent), "3/3 passing");

        let csv = table_to_csv(&[agent], &columns);
        assert!(csv.starts_with("\"Client\",\"Site\",\"Hostname\""));
        assert!(csv.contains("\"Acme\",\"HQ\",\"SRV-01\""));
    }
}
