use crate::api::types::Script;
use crate::app::App;
use crate::common::csv::Column;
use crate::common::format::{capitalize, truncate_text};
use crate::pages::{column_table, loading, pane};
use ratatui::prelude::*;

fn script_columns() -> Vec<Column<Script>> {
    vec![
        Column::new("Name", |s: &Script| Some(s.name.clone())),
        Column::new("Category", |s: &Script| s.category.clone()),
        Column::new("Shell", |s: &Script| s.shell.clone()).formatted(capitalize),
        Column::new("Type", |s: &Script| s.script_type.clone()).formatted(capitalize),
        Column::new("Timeout", |s: &Script| Some(format!("{}s", s.default_timeout))),
        Column::new("Description", |s: &Script| s.description.clone())
            .formatted(|v| truncate_text(v, 80)),
    ]
}

pub fn render_scripts(app: &mut App, frame: &mut Frame, area: Rect) {
    let community = if app.store.prefs.show_community_scripts {
        "shown"
    } else {
        "hidden"
    };
    let block = pane(format!("Script Manager (community scripts {})", community), true)
        .title_bottom("'Enter': view code, 'c': toggle community scripts");
    if app.scripts_loading && app.scripts.is_empty() {
        frame.render_widget(loading(block, "scripts"), area);
        return;
    }

    let widths = vec![
        Constraint::Percentage(25),
        Constraint::Percentage(15),
        Constraint::Percentage(10),
        Constraint::Percentage(10),
        Constraint::Percentage(8),
        Constraint::Percentage(32),
    ];
    let table = column_table(&app.scripts, &script_columns(), widths, block);
    frame.render_stateful_widget(table, area, &mut app.scripts_state);
}
