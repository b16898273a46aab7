use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parses the backend's timestamps. Offset-less values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// "Mar-01-2024 - 09:05" in local time, optionally with ":SS".
pub fn format_date(raw: &str, include_seconds: bool) -> Option<String> {
    format_date_in(raw, include_seconds, &Local)
}

pub fn format_date_in<Tz: TimeZone>(raw: &str, include_seconds: bool, tz: &Tz) -> Option<String> {
    let dt = parse_timestamp(raw)?.with_timezone(tz);
    let naive = dt.naive_local();
    let month = MONTHS[naive.month0() as usize];
    let mut out = format!("{}-{}", month, naive.format("%d-%Y - %H:%M"));
    if include_seconds {
        out.push_str(&naive.format(":%S").to_string());
    }
    Some(out)
}

/// Empty-safe version of the usual first-letter upper-casing.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `log_type` -> `Log Type`
pub fn format_table_column_text(text: &str) -> String {
    text.split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Cuts at `chars` characters and appends "..." once the text reaches that length.
pub fn truncate_text(text: &str, chars: usize) -> String {
    if text.chars().count() >= chars {
        let head: String = text.chars().take(chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Relative boot time, e.g. "3 days ago". Months are 30 days, years 365.
pub fn boot_time(unixtime: f64) -> String {
    time_ago(unixtime, Utc::now())
}

pub fn time_ago(unixtime: f64, now: DateTime<Utc>) -> String {
    const MINUTE: f64 = 60.0 * 1000.0;
    const HOUR: f64 = MINUTE * 60.0;
    const DAY: f64 = HOUR * 24.0;
    const MONTH: f64 = DAY * 30.0;
    const YEAR: f64 = DAY * 365.0;

    let elapsed = now.timestamp_millis() as f64 - unixtime * 1000.0;
    let (value, unit) = if elapsed < MINUTE {
        (elapsed / 1000.0, "seconds")
    } else if elapsed < HOUR {
        (elapsed / MINUTE, "minutes")
    } else if elapsed < DAY {
        (elapsed / HOUR, "hours")
    } else if elapsed < MONTH {
        (elapsed / DAY, "days")
    } else if elapsed < YEAR {
        (elapsed / MONTH, "months")
    } else {
        (elapsed / YEAR, "years")
    };
    format!("{} {} ago", value.round() as i64, unit)
}

pub fn bytes2human(n: u64) -> String {
    const SYMBOLS: [&str; 8] = ["K", "M", "G", "T", "P", "E", "Z", "Y"];
    let value = n as f64;
    for (i, symbol) in SYMBOLS.iter().enumerate().rev() {
        let prefix = 2f64.powi(((i + 1) * 10) as i32);
        if value >= prefix {
            return format!("{:.1}{}", value / prefix, symbol);
        }
    }
    format!("{}B", n)
}

/// Disk sizes arrive either as byte counts or as already formatted strings.
pub fn disk_size(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(bytes) => bytes2human(bytes),
            None => n.to_string(),
        },
        Some(Value::String(s)) => s.clone(),
        _ => "n/a".to_string(),
    }
}
