use crate::api::types::AutomatedTask;
use crate::common::format::parse_timestamp;
use chrono::{Local, TimeZone};

pub const WEEK_DAYS: [(&str, u32); 7] = [
    ("Sunday", 0x1),
    ("Monday", 0x2),
    ("Tuesday", 0x4),
    ("Wednesday", 0x8),
    ("Thursday", 0x10),
    ("Friday", 0x20),
    ("Saturday", 0x40),
];

pub const MONTHS: [(&str, u32); 12] = [
    ("January", 0x1),
    ("February", 0x2),
    ("March", 0x4),
    ("April", 0x8),
    ("May", 0x10),
    ("June", 0x20),
    ("July", 0x40),
    ("August", 0x80),
    ("September", 0x100),
    ("October", 0x200),
    ("November", 0x400),
    ("December", 0x800),
];

pub const WEEKS: [(&str, u32); 5] = [
    ("First Week", 0x1),
    ("Second Week", 0x2),
    ("Third Week", 0x4),
    ("Fourth Week", 0x8),
    ("Last Week", 0x10),
];

pub const LAST_DAY: u32 = 0x8000_0000;

/// ("1", 0x1) ... ("31", 0x4000_0000), then ("Last Day", 0x8000_0000).
pub fn month_days() -> Vec<(String, u32)> {
    let mut days: Vec<(String, u32)> = (1..=31u32).map(|d| (d.to_string(), 1 << (d - 1))).collect();
    days.push(("Last Day".to_string(), LAST_DAY));
    days
}

fn names_for<'a>(mask: u32, table: impl IntoIterator<Item = (&'a str, u32)>) -> String {
    table
        .into_iter()
        .filter(|(_, bit)| mask & bit != 0)
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn bitdays_to_string(mask: u32) -> String {
    if mask == 127 {
        return "Every day".to_string();
    }
    names_for(mask, WEEK_DAYS)
}

pub fn bitmonths_to_string(mask: u32) -> String {
    if mask == 4095 {
        return "Every month".to_string();
    }
    names_for(mask, MONTHS)
}

pub fn bitweeks_to_string(mask: u32) -> String {
    if mask == 31 {
        return "Every week".to_string();
    }
    names_for(mask, WEEKS)
}

pub fn bitmonthdays_to_string(mask: u32) -> String {
    if mask == u32::MAX {
        return "Every day".to_string();
    }
    let days = month_days();
    names_for(mask, days.iter().map(|(name, bit)| (name.as_str(), *bit)))
}

/// Human readable schedule for a task in local time, `None` for unrecognized task types.
pub fn task_schedule(task: &AutomatedTask) -> Option<String> {
    task_schedule_in(task, &Local)
}

pub fn task_schedule_in<Tz: TimeZone>(task: &AutomatedTask, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    let run_time = || {
        task.run_time_date
            .as_deref()
            .and_then(parse_timestamp)
            .map(|dt| dt.with_timezone(tz).format("%I:%M%p").to_string())
            .unwrap_or_default()
    };
    let weekdays = || bitdays_to_string(task.run_time_bit_weekdays.unwrap_or(0));
    let months = || bitmonths_to_string(task.monthly_months_of_year.unwrap_or(0));

    let text = match task.task_type.as_deref()? {
        "manual" => "Manual".to_string(),
        "checkfailure" => "Every time check fails".to_string(),
        "runonce" => {
            let when = task
                .run_time_date
                .as_deref()
                .and_then(parse_timestamp)
                .map(|dt| dt.with_timezone(tz).format("%m/%d/%Y %I:%M%p").to_string())
                .unwrap_or_default();
            format!("Run once on {}", when)
        }
        "daily" => match task.daily_interval.unwrap_or(1) {
            1 => format!("Daily at {}", run_time()),
            n => format!("Every {} days at {}", n, run_time()),
        },
        "weekly" => match task.weekly_interval.unwrap_or(1) {
            1 => format!("{} at {}", weekdays(), run_time()),
            n => format!("{} at {} every {} weeks", weekdays(), run_time(), n),
        },
        "monthly" => format!(
            "Runs on {} on days {} at {}",
            months(),
            bitmonthdays_to_string(task.monthly_days_of_month.unwrap_or(0)),
            run_time()
        ),
        "monthlydow" => format!(
            "Runs on {} on {} on {} at {}",
            months(),
            bitweeks_to_string(task.monthly_weeks_of_month.unwrap_or(0)),
            weekdays(),
            run_time()
        ),
        "onboarding" => "Onboarding: Runs once on task creation.".to_string(),
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn task(task_type: &str) -> AutomatedTask {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Nightly cleanup",
            "task_type": task_type,
            "run_time_date": "2024-03-01T14:30:00Z",
        }))
        .unwrap()
    }

    #[test]
    fn test_bit_strings() {
        assert_eq!(bitdays_to_string(127), "Every day");
        assert_eq!(bitdays_to_string(0x2 | 0x20), "Monday, Friday");
        assert_eq!(bitmonths_to_string(4095), "Every month");
        assert_eq!(bitmonths_to_string(0x1 | 0x800), "January, December");
        assert_eq!(bitweeks_to_string(31), "Every week");
        assert_eq!(bitweeks_to_string(0x1 | 0x10), "First Week, Last Week");
        assert_eq!(bitmonthdays_to_string(u32::MAX), "Every day");
        assert_eq!(bitmonthdays_to_string(0x1 | 0x4000 | LAST_DAY), "1, 15, Last Day");
        assert_eq!(bitdays_to_string(0), "");
    }

    #[test]
    fn test_month_days_table() {
        let days = month_days();
        assert_eq!(days.len(), 32);
        assert_eq!(days[30], ("31".to_string(), 0x4000_0000));
    }

    #[test]
    fn test_task_schedule() {
        assert_eq!(task_schedule_in(&task("manual"), &Utc).as_deref(), Some("Manual"));
        assert_eq!(
            task_schedule_in(&task("runonce"), &Utc).as_deref(),
            Some("Run once on 03/01/2024 02:30PM")
        );

        let mut daily = task("daily");
        daily.daily_interval = Some(3);
        assert_eq!(task_schedule_in(&daily, &Utc).as_deref(), Some("Every 3 days at 02:30PM"));

        let mut weekly = task("weekly");
        weekly.weekly_interval = Some(1);
        weekly.run_time_bit_weekdays = Some(0x2);
        assert_eq!(task_schedule_in(&weekly, &Utc).as_deref(), Some("Monday at 02:30PM"));
        weekly.weekly_interval = Some(2);
        assert_eq!(
            task_schedule_in(&weekly, &Utc).as_deref(),
            Some("Monday at 02:30PM every 2 weeks")
        );

        let mut monthly = task("monthly");
        monthly.monthly_months_of_year = Some(4095);
        monthly.monthly_days_of_month = Some(0x1);
        assert_eq!(
            task_schedule_in(&monthly, &Utc).as_deref(),
            Some("Runs on Every month on days 1 at 02:30PM")
        );

        let mut dow = task("monthlydow");
        dow.monthly_months_of_year = Some(0x4);
        dow.monthly_weeks_of_month = Some(0x10);
        dow.run_time_bit_weekdays = Some(0x40);
        assert_eq!(
            task_schedule_in(&dow, &Utc).as_deref(),
            Some("Runs on March on Last Week on Saturday at 02:30PM")
        );

        assert_eq!(task_schedule_in(&task("mystery"), &Utc), None);
    }

    #[test]
    fn test_run_time_follows_timezone() {
        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(
            task_schedule_in(&task("daily"), &eastern).as_deref(),
            Some("Daily at 09:30AM")
        );
        assert_eq!(
            task_schedule_in(&task("runonce"), &eastern).as_deref(),
            Some("Run once on 03/01/2024 09:30AM")
        );
    }
}
