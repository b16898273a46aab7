use crate::app::Popup;
use crate::common::utils::centered_rect;
use crate::options::checks::{CHECK_TYPES, CheckForm};
use crate::options::dropdowns::Dropdown;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};

const HELP: &[(&str, &str)] = &[
    ("1-6", "Dashboard, Alerts, Policies, Logs, Scripts, Admin"),
    ("R", "Refresh the current view"),
    ("e", "Export the current table to export.csv"),
    ("L", "Log out"),
    ("q / Ctrl-C", "Quit"),
    ("Tab", "Dashboard: move between clients, agents and agent tabs"),
    ("j / k", "Move the selection"),
    ("Enter", "Open the highlighted client, site, agent or policy"),
    ("[ / ]", "Switch agent tab"),
    ("+ / -", "Resize the agent table"),
    ("< / >", "Resize the client tree"),
    ("m / p / c / b", "Agent: maintenance mode, ping, run checks, reboot"),
    ("T", "Admin: set up two-factor for your account"),
];

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(Color::DarkGray))
}

pub fn render_popup(popup: &mut Popup, frame: &mut Frame) {
    match popup {
        Popup::Help => render_help(frame),
        Popup::Message {
            title,
            content,
            loading,
        } => render_message(frame, title, content, *loading),
        Popup::Confirm { message, .. } => render_confirm(frame, message),
        Popup::CheckType { state, .. } => render_check_type(frame, state),
        Popup::CheckForm { form, field } => render_check_form(frame, form, *field),
        Popup::AgentPicker(dropdown) => render_agent_picker(frame, dropdown),
        Popup::NoteInput(note) => render_note_input(frame, note),
    }
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let rows: Vec<Row> = HELP
        .iter()
        .map(|(keys, what)| {
            Row::new(vec![
                Cell::from(*keys).style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(*what),
            ])
        })
        .collect();
    let table = Table::new(rows, [Constraint::Percentage(25), Constraint::Percentage(75)])
        .block(popup_block("Keys").title_bottom("any key: close"));
    frame.render_widget(table, area);
}

fn render_message(frame: &mut Frame, title: &str, content: &str, loading: bool) {
    let area = centered_rect(80, 80, frame.area());
    frame.render_widget(Clear, area);

    let text = if loading { "Loading..." } else { content };
    let paragraph = Paragraph::new(text)
        .block(popup_block(title).title_bottom("Esc: close"))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_confirm(frame: &mut Frame, message: &str) {
    let area = centered_rect(40, 20, frame.area());
    frame.render_widget(Clear, area);

    let paragraph = Paragraph::new(message)
        .alignment(Alignment::Center)
        .block(popup_block("Confirm").title_bottom("y: yes | n: no"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_check_type(frame: &mut Frame, state: &mut TableState) {
    let area = centered_rect(30, 40, frame.area());
    frame.render_widget(Clear, area);

    let rows: Vec<Row> = CHECK_TYPES
        .iter()
        .map(|t| Row::new(vec![Cell::from(t.display_name())]))
        .collect();
    let table = Table::new(rows, [Constraint::Percentage(100)])
        .block(popup_block("Add Check").title_bottom("Enter: select | Esc: cancel"))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");
    frame.render_stateful_widget(table, area, state);
}

fn render_check_form(frame: &mut Frame, form: &CheckForm, selected: usize) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);

    let title = format!(
        "{} {}",
        if form.editing { "Edit" } else { "Add" },
        form.check.check_type.display_name()
    );
    let block = popup_block(&title);
    frame.render_widget(block.clone(), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let rows: Vec<Row> = form
        .fields()
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            let value = form.display(field);
            let value = if i == selected && field.is_text() {
                format!("{}_", value)
            } else if i == selected {
                format!("< {} >", value)
            } else {
                value
            };
            let style = if i == selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![Cell::from(field.label()), Cell::from(value)]).style(style)
        })
        .collect();
    let table = Table::new(rows, [Constraint::Percentage(30), Constraint::Percentage(70)]);
    frame.render_widget(table, layout[0]);

    let status = if form.loading {
        "Loading..."
    } else {
        "Up/Down: field | Left/Right: change | Enter: save | Esc: cancel"
    };
    let instructions = Paragraph::new(status)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::ITALIC));
    frame.render_widget(instructions, layout[1]);
}

fn render_agent_picker(frame: &mut Frame, dropdown: &Dropdown) {
    let area = centered_rect(40, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = popup_block("Filter by Agent");
    frame.render_widget(block.clone(), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    frame.render_widget(Paragraph::new(format!("Search: {}_", dropdown.needle)), layout[0]);

    if dropdown.loading {
        frame.render_widget(
            Paragraph::new("Loading agents...").style(Style::default().fg(Color::Yellow)),
            layout[1],
        );
    } else {
        let rows: Vec<Row> = dropdown
            .filtered()
            .iter()
            .map(|option| {
                if option.is_category() {
                    Row::new(vec![Cell::from(option.label().to_string())])
                        .style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    Row::new(vec![Cell::from(format!("  {}", option.label()))])
                }
            })
            .collect();
        let mut state = TableState::default().with_selected(dropdown.highlighted);
        let table = Table::new(rows, [Constraint::Percentage(100)])
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(table, layout[1], &mut state);
    }

    let instructions = Paragraph::new("Type to search | Enter: select | Esc: cancel")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::ITALIC));
    frame.render_widget(instructions, layout[2]);
}

fn render_note_input(frame: &mut Frame, note: &str) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);

    let paragraph = Paragraph::new(format!("{}_", note))
        .block(popup_block("Add Note").title_bottom("Enter: save | Esc: cancel"))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
