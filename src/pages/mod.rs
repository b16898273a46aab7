pub mod admin;
pub mod alerts;
pub mod dashboard;
pub mod logs;
pub mod policies;
pub mod popups;
pub mod scripts;

use crate::common::csv::Column;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs},
};

/// Builds a table whose cells are the same text the CSV export writes.
pub fn column_table<'a, 'r, T: 'r>(
    rows: impl IntoIterator<Item = &'r T>,
    columns: &[Column<T>],
    widths: Vec<Constraint>,
    block: Block<'a>,
) -> Table<'a> {
    styled_column_table(rows, columns, widths, block, |_| Style::default())
}

pub fn styled_column_table<'a, 'r, T: 'r>(
    rows: impl IntoIterator<Item = &'r T>,
    columns: &[Column<T>],
    widths: Vec<Constraint>,
    block: Block<'a>,
    row_style: impl Fn(&T) -> Style,
) -> Table<'a> {
    let header = Row::new(columns.iter().map(|c| c.label))
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = rows
        .into_iter()
        .map(|row| {
            Row::new(columns.iter().map(|c| Cell::from(c.text(row)))).style(row_style(row))
        })
        .collect();

    Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ")
}

/// `Label: value` with a bold label.
pub fn labeled<'a>(label: &'a str, value: impl Into<String>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(value.into()),
    ])
}

pub fn tabs<'a>(titles: Vec<&'a str>, selected: usize, title: String) -> Tabs<'a> {
    Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan),
        )
}

pub fn loading<'a>(block: Block<'a>, what: &str) -> Paragraph<'a> {
    Paragraph::new(format!("Loading {}...", what))
        .style(Style::default().fg(Color::Yellow))
        .block(block)
}

/// Focused panes get a cyan border.
pub fn pane(title: impl Into<String>, focused: bool) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL).title(title.into());
    if focused {
        block.border_style(Style::default().fg(Color::Cyan))
    } else {
        block
    }
}
