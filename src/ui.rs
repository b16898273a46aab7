use crate::app::{App, CurrentView};
use crate::common::notify::NotifyKind;
use crate::pages;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};

pub fn render(app: &mut App, frame: &mut Frame) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(app, frame, layout[0]);
    render_status(app, frame, layout[2]);

    let main_block = Block::default().borders(Borders::ALL);

    if app.session_expired {
        let message = app
            .error
            .clone()
            .unwrap_or_else(|| "Your session has expired.".to_string());
        frame.render_widget(
            Paragraph::new(format!("{}\n\n'r': log in again | 'q': quit", message))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(main_block.title("Session")),
            layout[1],
        );
    } else if let Some(err) = &app.error {
        frame.render_widget(
            Paragraph::new(format!("Error: {}\n\n'R': retry", err))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(main_block),
            layout[1],
        );
    } else {
        match app.current_view {
            CurrentView::Dashboard => pages::dashboard::render_dashboard(app, frame, layout[1]),
            CurrentView::Alerts => pages::alerts::render_alerts(app, frame, layout[1]),
            CurrentView::Policies => pages::policies::render_policies(app, frame, layout[1]),
            CurrentView::Logs => pages::logs::render_logs(app, frame, layout[1]),
            CurrentView::Scripts => pages::scripts::render_scripts(app, frame, layout[1]),
            CurrentView::Admin => pages::admin::render_admin(app, frame, layout[1]),
        }
    }

    if let Some(popup) = app.popup.as_mut() {
        pages::popups::render_popup(popup, frame);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let titles: Vec<String> = CurrentView::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| match view {
            CurrentView::Alerts if !app.store.alerts.new_alerts().is_empty() => {
                format!("{} {} ({})", i + 1, view.title(), app.store.alerts.new_alerts().len())
            }
            _ => format!("{} {}", i + 1, view.title()),
        })
        .collect();
    let selected = CurrentView::ALL
        .iter()
        .position(|v| *v == app.current_view)
        .unwrap_or(0);

    let user = app.store.username.as_deref().filter(|u| !u.is_empty()).unwrap_or("api key");
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Tactical RMM | {}", user)),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan),
        );
    frame.render_widget(tabs, area);
}

/// Bottom line: the latest notification, or the key hint.
fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let line = match app.notifications.latest() {
        Some(n) => {
            let color = match n.kind {
                NotifyKind::Positive => Color::Green,
                NotifyKind::Negative => Color::Red,
                NotifyKind::Warning => Color::Yellow,
                NotifyKind::Info => Color::Cyan,
            };
            Paragraph::new(n.message.clone()).style(Style::default().fg(color))
        }
        None => Paragraph::new("'?': help | 'R': refresh | 'q': quit")
            .style(Style::default().add_modifier(Modifier::ITALIC)),
    };
    frame.render_widget(line, area);
}
