use crate::api::types::{ApiKey, CustomField, Role};
use crate::app::{AdminTab, App};
use crate::common::csv::Column;
use crate::common::format::{capitalize, format_date};
use crate::pages::{column_table, loading, pane, tabs};
use ratatui::{
    prelude::*,
    widgets::{Cell, Row, Table},
};

fn date(v: &str) -> String {
    format_date(v, false).unwrap_or_else(|| v.to_string())
}

fn role_columns() -> Vec<Column<Role>> {
    vec![
        Column::new("Name", |r: &Role| Some(r.name.clone())),
        Column::new("Superuser", |r: &Role| Some(if r.is_superuser { "Yes" } else { "No" }.to_string())),
        Column::new("Users", |r: &Role| r.user_count.map(|c| c.to_string())),
    ]
}

fn api_key_columns() -> Vec<Column<ApiKey>> {
    vec![
        Column::new("Name", |k: &ApiKey| Some(k.name.clone())),
        Column::new("User", |k: &ApiKey| k.username.clone()),
        Column::new("Expiration", |k: &ApiKey| k.expiration.clone()).formatted(date),
    ]
}

fn custom_field_columns() -> Vec<Column<CustomField>> {
    vec![
        Column::new("Name", |f: &CustomField| Some(f.name.clone())),
        Column::new("Model", |f: &CustomField| Some(f.model.clone())).formatted(capitalize),
        Column::new("Type", |f: &CustomField| f.field_type.clone()).formatted(capitalize),
        Column::new("Required", |f: &CustomField| Some(if f.required { "Yes" } else { "No" }.to_string())),
    ]
}

const TITLES: [&str; 4] = ["Users", "Roles", "API Keys", "Custom Fields"];

pub fn render_admin(app: &mut App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let selected = match app.admin_tab {
        AdminTab::Users => 0,
        AdminTab::Roles => 1,
        AdminTab::ApiKeys => 2,
        AdminTab::CustomFields => 3,
    };
    frame.render_widget(
        tabs(TITLES.to_vec(), selected, "Administration ('h/l': switch)".to_string()),
        chunks[0],
    );

    let area = chunks[1];
    let block = pane(TITLES[selected], true);
    let admin = &app.store.admin;
    let empty = match app.admin_tab {
        AdminTab::Users => admin.users.is_empty(),
        AdminTab::Roles => admin.roles.is_empty(),
        AdminTab::ApiKeys => admin.api_keys.is_empty(),
        AdminTab::CustomFields => admin.custom_fields.is_empty(),
    };
    if app.admin_loading && empty {
        frame.render_widget(loading(block, TITLES[selected]), area);
        return;
    }

    let table = match app.admin_tab {
        // Users show their role by name, which needs the role list.
        AdminTab::Users => {
            let rows: Vec<Row> = admin
                .users
                .iter()
                .map(|u| {
                    let name = [u.first_name.as_deref(), u.last_name.as_deref()]
                        .into_iter()
                        .flatten()
                        .collect::<Vec<_>>()
                        .join(" ");
                    let style = if u.is_active {
                        Style::default()
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    Row::new(vec![
                        Cell::from(u.username.clone()),
                        Cell::from(name),
                        Cell::from(u.email.clone().unwrap_or_default()),
                        Cell::from(admin.role_name(u.role).to_string()),
                        Cell::from(u.last_login.as_deref().map(date).unwrap_or_default()),
                    ])
                    .style(style)
                })
                .collect();
            Table::new(
                rows,
                [
                    Constraint::Percentage(18),
                    Constraint::Percentage(20),
                    Constraint::Percentage(25),
                    Constraint::Percentage(15),
                    Constraint::Percentage(22),
                ],
            )
            .header(
                Row::new(vec!["Username", "Name", "Email", "Role", "Last Login"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(">> ")
        }
        AdminTab::Roles => column_table(
            &admin.roles,
            &role_columns(),
            vec![Constraint::Percentage(50), Constraint::Percentage(25), Constraint::Percentage(25)],
            block,
        ),
        AdminTab::ApiKeys => column_table(
            &admin.api_keys,
            &api_key_columns(),
            vec![Constraint::Percentage(40), Constraint::Percentage(30), Constraint::Percentage(30)],
            block,
        ),
        AdminTab::CustomFields => column_table(
            &admin.custom_fields,
            &custom_field_columns(),
            vec![
                Constraint::Percentage(40),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
            ],
            block,
        ),
    };
    frame.render_stateful_widget(table, area, &mut app.admin_state);
}
