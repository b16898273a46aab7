use crate::common::notify::Notification;
use std::path::Path;

pub const EXPORT_FILE: &str = "export.csv";

/// One exported column. `format` is applied to present values only.
pub struct Column<T> {
    pub label: &'static str,
    pub field: fn(&T) -> Option<String>,
    pub format: Option<fn(&str) -> String>,
}

impl<T> Column<T> {
    pub fn new(label: &'static str, field: fn(&T) -> Option<String>) -> Self {
        Self {
            label,
            field,
            format: None,
        }
    }

    pub fn formatted(mut self, format: fn(&str) -> String) -> Self {
        self.format = Some(format);
        self
    }

    /// The cell text for `row`, as shown on screen.
    pub fn text(&self, row: &T) -> String {
        match ((self.field)(row), self.format) {
            (Some(v), Some(f)) => f(&v),
            (Some(v), None) => v,
            (None, _) => String::new(),
        }
    }
}

/// Quotes a value, doubling embedded quotes. Missing values become `""`.
pub fn wrap_csv_value(value: Option<&str>, format: Option<fn(&str) -> String>) -> String {
    let formatted = match (value, format) {
        (Some(v), Some(f)) => f(v),
        (Some(v), None) => v.to_string(),
        (None, _) => String::new(),
    };
    format!("\"{}\"", formatted.replace('"', "\"\""))
}

pub fn table_to_csv<T>(rows: &[T], columns: &[Column<T>]) -> String {
    let header = columns
        .iter()
        .map(|col| wrap_csv_value(Some(col.label), None))
        .collect::<Vec<_>>()
        .join(",");

    std::iter::once(header)
        .chain(rows.iter().map(|row| {
            columns
                .iter()
                .map(|col| wrap_csv_value((col.field)(row).as_deref(), col.format))
                .collect::<Vec<_>>()
                .join(",")
        }))
        .collect::<Vec<_>>()
        .join("\r\n")
}

/// Writes the table to `dir/export.csv` and reports the outcome as a notification.
pub fn export_table_to_csv<T>(rows: &[T], columns: &[Column<T>], dir: &Path) -> Notification {
    let path = dir.join(EXPORT_FILE);
    match std::fs::write(&path, table_to_csv(rows, columns)) {
        Ok(()) => {
            tracing::info!(path = %path.display(), rows = rows.len(), "table exported");
            Notification::positive(format!("Exported {} rows to {}", rows.len(), path.display()))
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "table export failed");
            Notification::negative(format!("Unable to write {}: {}", path.display(), e))
        }
    }
}
