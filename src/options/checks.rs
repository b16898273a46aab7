use super::dropdowns::ScriptDropdown;
use super::services::DEFAULT_SERVICES;
use super::{OptionValue, SelectOption};
use crate::api::TrmmClient;
use crate::api::checks::ChecksApi;
use crate::api::types::{Agent, Check, CheckType, ScriptRef};
use crate::common::validation::{is_valid_threshold, validate_event_id, validate_retcode};
use crate::error::ApiError;
use serde_json::Value;
use thiserror::Error;

pub const FAIL_OPTIONS: [i64; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// (label, value)
pub const SEVERITY_OPTIONS: [(&str, &str); 3] = [
    ("Informational", "info"),
    ("Warning", "warning"),
    ("Error", "error"),
];

pub const LOG_NAME_OPTIONS: [&str; 3] = ["Application", "System", "Security"];

pub const FAIL_WHEN_OPTIONS: [(&str, &str); 2] = [
    ("Log contains", "contains"),
    ("Log does not contain", "not_contains"),
];

pub fn drive_letters() -> Vec<String> {
    ('A'..='Z').map(|c| format!("{}:", c)).collect()
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub const CHECK_TYPES: [CheckType; 7] = [
    CheckType::Diskspace,
    CheckType::Cpuload,
    CheckType::Memory,
    CheckType::Winsvc,
    CheckType::Ping,
    CheckType::Eventlog,
    CheckType::Script,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Disk,
    Service,
    Script,
    Timeout,
    Name,
    Ip,
    LogName,
    EventId,
    FailWhen,
    Warning,
    Error,
    InfoCodes,
    WarningCodes,
    Severity,
    Fails,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Disk => "Disk",
            FormField::Service => "Service",
            FormField::Script => "Script",
            FormField::Timeout => "Timeout (seconds)",
            FormField::Name => "Descriptive Name",
            FormField::Ip => "Hostname or IP",
            FormField::LogName => "Event Log",
            FormField::EventId => "Event ID (* for any)",
            FormField::FailWhen => "Fail When",
            FormField::Warning => "Warning Threshold %",
            FormField::Error => "Error Threshold %",
            FormField::InfoCodes => "Informational Return Codes",
            FormField::WarningCodes => "Warning Return Codes",
            FormField::Severity => "Alert Severity",
            FormField::Fails => "Failures before alert",
        }
    }

    /// Fields typed into rather than picked from a list.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FormField::Name | FormField::Ip | FormField::EventId | FormField::InfoCodes | FormField::WarningCodes
        )
    }
}

/// Comma-separated exit codes, e.g. "0,3010".
fn parse_codes(text: &str) -> Result<Vec<i64>, String> {
    text.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| {
            if validate_retcode(c) {
                c.parse::<i64>().map_err(|e| e.to_string())
            } else {
                Err(format!("{} is not a valid return code", c))
            }
        })
        .collect()
}

fn codes_text(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_array)
        .map(|codes| codes.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(","))
        .unwrap_or_default()
}

fn step_index(len: usize, current: Option<usize>, delta: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let i = current.unwrap_or(0) as isize + delta;
    Some(i.rem_euclid(len as isize) as usize)
}

fn push_digit(value: i64, c: char, max: i64) -> i64 {
    let Some(d) = c.to_digit(10) else {
        return value;
    };
    let next = value * 10 + d as i64;
    if next > max { d as i64 } else { next }
}

/// State behind the add/edit check popup.
#[derive(Debug, Clone)]
pub struct CheckForm {
    pub check: Check,
    pub editing: bool,
    pub disk_options: Vec<String>,
    /// (label, service name), sorted by label.
    pub service_options: Vec<(String, String)>,
    pub scripts: ScriptDropdown,
    /// Typed as text so the `*` wildcard can be entered.
    pub event_id: String,
    pub info_codes: String,
    pub warning_codes: String,
    pub loading: bool,
}

impl CheckForm {
    /// A new check bound to an agent or a policy.
    pub fn new(check_type: CheckType, agent: Option<String>, policy: Option<i64>) -> Self {
        let mut check = Check::new(check_type);
        check.agent = agent;
        check.policy = policy;
        check.alert_severity = Some("warning".to_string());
        match check_type {
            CheckType::Diskspace => {
                check.warning_threshold = Some(25);
                check.error_threshold = Some(10);
            }
            CheckType::Cpuload | CheckType::Memory => {
                check.warning_threshold = Some(70);
                check.error_threshold = Some(90);
            }
            _ => {}
        }
        let mut form = Self {
            check,
            editing: false,
            disk_options: drive_letters(),
            service_options: DEFAULT_SERVICES
                .iter()
                .map(|(name, label)| (label.to_string(), name.to_string()))
                .collect(),
            scripts: ScriptDropdown::default(),
            event_id: String::new(),
            info_codes: String::new(),
            warning_codes: String::new(),
            loading: false,
        };
        form.service_options.sort_by_key(|(label, _)| label.to_lowercase());
        match check_type {
            CheckType::Diskspace => form.check.disk = form.disk_options.first().cloned(),
            CheckType::Winsvc => {
                if let Some((label, name)) = form.service_options.first().cloned() {
                    form.check.svc_name = Some(name);
                    form.check.svc_display_name = Some(label);
                }
            }
            CheckType::Eventlog => {
                form.set_field("log_name", Value::from(LOG_NAME_OPTIONS[0]));
                form.set_field("fail_when", Value::from(FAIL_WHEN_OPTIONS[0].1));
                form.set_field("event_type", Value::from("INFO"));
                form.set_field("search_last_days", Value::from(1));
            }
            CheckType::Script => form.set_field("timeout", Value::from(form.scripts.default_timeout)),
            _ => {}
        }
        form
    }

    pub fn edit(check: Check) -> Self {
        let mut form = Self::new(check.check_type, check.agent.clone(), check.policy);
        form.event_id = if check.extra.get("event_id_is_wildcard") == Some(&Value::Bool(true)) {
            "*".to_string()
        } else {
            check
                .extra
                .get("event_id")
                .filter(|v| !v.is_null())
                .map(|v| v.to_string())
                .unwrap_or_default()
        };
        form.info_codes = codes_text(check.extra.get("info_return_codes"));
        form.warning_codes = codes_text(check.extra.get("warning_return_codes"));
        form.check = check;
        form.editing = true;
        form
    }

    /// Script checks pick from the script list.
    pub fn needs_script_options(&self) -> bool {
        self.check.check_type == CheckType::Script
    }

    /// Loads the script list, keeping an edited check's script selected.
    pub fn apply_scripts(&mut self, result: Result<Vec<SelectOption>, String>) {
        self.scripts.dropdown.apply("scripts", result);
        let current = self.check.script.as_ref().map(|s| s.id);
        match current {
            Some(id) => {
                if let Some(i) = self.scripts.dropdown.filtered().iter().position(|o| {
                    o.value() == Some(&OptionValue::Id(id))
                }) {
                    self.scripts.dropdown.highlighted = Some(i);
                }
            }
            None => self.pick_highlighted_script(),
        }
    }

    fn pick_highlighted_script(&mut self) {
        let Some(SelectOption::Item {
            label,
            value: OptionValue::Id(id),
            ..
        }) = self.scripts.dropdown.selected()
        else {
            return;
        };
        self.scripts.select_script(id);
        self.check.script = Some(ScriptRef { id, name: label });
        self.set_field("timeout", Value::from(self.scripts.default_timeout));
        self.set_field("script_args", Value::from(self.scripts.default_args.clone()));
    }

    /// Fields shown for this check type, in display order.
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields = match self.check.check_type {
            CheckType::Diskspace => vec![FormField::Disk, FormField::Warning, FormField::Error],
            CheckType::Cpuload | CheckType::Memory => vec![FormField::Warning, FormField::Error],
            CheckType::Winsvc => vec![FormField::Service],
            CheckType::Ping => vec![FormField::Name, FormField::Ip],
            CheckType::Eventlog => vec![
                FormField::Name,
                FormField::LogName,
                FormField::EventId,
                FormField::FailWhen,
            ],
            CheckType::Script => vec![
                FormField::Script,
                FormField::Timeout,
                FormField::InfoCodes,
                FormField::WarningCodes,
            ],
            CheckType::Unknown => Vec::new(),
        };
        fields.push(FormField::Severity);
        fields.push(FormField::Fails);
        fields
    }

    fn extra_str(&self, key: &str) -> &str {
        self.check.extra.get(key).and_then(Value::as_str).unwrap_or("")
    }

    fn extra_i64(&self, key: &str) -> i64 {
        self.check.extra.get(key).and_then(Value::as_i64).unwrap_or(0)
    }

    pub fn display(&self, field: FormField) -> String {
        let or_empty = |v: &Option<String>| v.clone().unwrap_or_default();
        match field {
            FormField::Disk => or_empty(&self.check.disk),
            FormField::Service => or_empty(&self.check.svc_display_name),
            FormField::Script => self
                .check
                .script
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "Select a script".to_string()),
            FormField::Timeout => self.extra_i64("timeout").to_string(),
            FormField::Name => or_empty(&self.check.name),
            FormField::Ip => or_empty(&self.check.ip),
            FormField::LogName => self.extra_str("log_name").to_string(),
            FormField::EventId => self.event_id.clone(),
            FormField::InfoCodes => self.info_codes.clone(),
            FormField::WarningCodes => self.warning_codes.clone(),
            FormField::FailWhen => FAIL_WHEN_OPTIONS
                .iter()
                .find(|(_, v)| *v == self.extra_str("fail_when"))
                .map(|(label, _)| label.to_string())
                .unwrap_or_default(),
            FormField::Warning => self.check.warning_threshold.unwrap_or(0).to_string(),
            FormField::Error => self.check.error_threshold.unwrap_or(0).to_string(),
            FormField::Severity => SEVERITY_OPTIONS
                .iter()
                .find(|(_, v)| Some(*v) == self.check.alert_severity.as_deref())
                .map(|(label, _)| label.to_string())
                .unwrap_or_default(),
            FormField::Fails => self.check.fails_b4_alert.unwrap_or(1).to_string(),
        }
    }

    /// Left/right on a field: steps through its options or nudges its number.
    pub fn cycle(&mut self, field: FormField, delta: isize) {
        match field {
            FormField::Disk => {
                let current = self
                    .disk_options
                    .iter()
                    .position(|d| Some(d) == self.check.disk.as_ref());
                if let Some(i) = step_index(self.disk_options.len(), current, delta) {
                    self.check.disk = Some(self.disk_options[i].clone());
                }
            }
            FormField::Service => {
                let current = self
                    .service_options
                    .iter()
                    .position(|(_, name)| Some(name) == self.check.svc_name.as_ref());
                if let Some(i) = step_index(self.service_options.len(), current, delta) {
                    let (label, name) = self.service_options[i].clone();
                    self.check.svc_name = Some(name);
                    self.check.svc_display_name = Some(label);
                }
            }
            FormField::Script => {
                self.scripts.dropdown.step(delta);
                self.pick_highlighted_script();
            }
            FormField::LogName => {
                let current = LOG_NAME_OPTIONS.iter().position(|l| *l == self.extra_str("log_name"));
                if let Some(i) = step_index(LOG_NAME_OPTIONS.len(), current, delta) {
                    self.set_field("log_name", Value::from(LOG_NAME_OPTIONS[i]));
                }
            }
            FormField::FailWhen => {
                let current = FAIL_WHEN_OPTIONS
                    .iter()
                    .position(|(_, v)| *v == self.extra_str("fail_when"));
                if let Some(i) = step_index(FAIL_WHEN_OPTIONS.len(), current, delta) {
                    self.set_field("fail_when", Value::from(FAIL_WHEN_OPTIONS[i].1));
                }
            }
            FormField::Severity => {
                let current = SEVERITY_OPTIONS
                    .iter()
                    .position(|(_, v)| Some(*v) == self.check.alert_severity.as_deref());
                if let Some(i) = step_index(SEVERITY_OPTIONS.len(), current, delta) {
                    self.check.alert_severity = Some(SEVERITY_OPTIONS[i].1.to_string());
                }
            }
            FormField::Fails => {
                let current = FAIL_OPTIONS
                    .iter()
                    .position(|f| Some(*f) == self.check.fails_b4_alert);
                if let Some(i) = step_index(FAIL_OPTIONS.len(), current, delta) {
                    self.check.fails_b4_alert = Some(FAIL_OPTIONS[i]);
                }
            }
            FormField::Warning => {
                let v = self.check.warning_threshold.unwrap_or(0) + delta as i64;
                self.check.warning_threshold = Some(v.clamp(0, 99));
            }
            FormField::Error => {
                let v = self.check.error_threshold.unwrap_or(0) + delta as i64;
                self.check.error_threshold = Some(v.clamp(0, 99));
            }
            FormField::Timeout => {
                let v = (self.extra_i64("timeout") + delta as i64 * 5).max(1);
                self.set_field("timeout", Value::from(v));
            }
            FormField::Name
            | FormField::Ip
            | FormField::EventId
            | FormField::InfoCodes
            | FormField::WarningCodes => {}
        }
    }

    pub fn push_char(&mut self, field: FormField, c: char) {
        match field {
            FormField::Name => self.check.name.get_or_insert_with(String::new).push(c),
            FormField::Ip => self.check.ip.get_or_insert_with(String::new).push(c),
            FormField::EventId => self.event_id.push(c),
            FormField::InfoCodes if c.is_ascii_digit() || c == ',' => self.info_codes.push(c),
            FormField::WarningCodes if c.is_ascii_digit() || c == ',' => self.warning_codes.push(c),
            FormField::Warning => {
                self.check.warning_threshold =
                    Some(push_digit(self.check.warning_threshold.unwrap_or(0), c, 99));
            }
            FormField::Error => {
                self.check.error_threshold =
                    Some(push_digit(self.check.error_threshold.unwrap_or(0), c, 99));
            }
            FormField::Timeout => {
                let v = push_digit(self.extra_i64("timeout"), c, 86400);
                self.set_field("timeout", Value::from(v));
            }
            _ => {}
        }
    }

    pub fn pop_char(&mut self, field: FormField) {
        match field {
            FormField::Name => {
                if let Some(name) = self.check.name.as_mut() {
                    name.pop();
                }
            }
            FormField::Ip => {
                if let Some(ip) = self.check.ip.as_mut() {
                    ip.pop();
                }
            }
            FormField::EventId => {
                self.event_id.pop();
            }
            FormField::InfoCodes => {
                self.info_codes.pop();
            }
            FormField::WarningCodes => {
                self.warning_codes.pop();
            }
            FormField::Warning => {
                self.check.warning_threshold = Some(self.check.warning_threshold.unwrap_or(0) / 10);
            }
            FormField::Error => {
                self.check.error_threshold = Some(self.check.error_threshold.unwrap_or(0) / 10);
            }
            FormField::Timeout => {
                let v = self.extra_i64("timeout") / 10;
                self.set_field("timeout", Value::from(v));
            }
            _ => {}
        }
    }

    /// Only new agent checks load disks or services from the agent.
    pub fn needs_agent_options(&self) -> bool {
        !self.editing
            && self.check.agent.is_some()
            && matches!(self.check.check_type, CheckType::Diskspace | CheckType::Winsvc)
    }

    /// Replaces the static disk/service lists with the agent's own and picks the first.
    pub fn apply_agent(&mut self, agent: &Agent) {
        match self.check.check_type {
            CheckType::Diskspace => {
                self.disk_options = agent.disks.iter().map(|d| d.device.clone()).collect();
                self.check.disk = self.disk_options.first().cloned();
            }
            CheckType::Winsvc => {
                let mut services: Vec<(String, String)> = agent
                    .services
                    .iter()
                    .map(|s| (s.display_name.clone(), s.name.clone()))
                    .collect();
                services.sort_by_key(|(label, _)| label.to_lowercase());
                self.service_options = services;
                if let Some((label, name)) = self.service_options.first() {
                    self.check.svc_name = Some(name.clone());
                    self.check.svc_display_name = Some(label.clone());
                }
            }
            _ => {}
        }
    }

    /// Stores a check-specific field the typed struct does not model,
    /// e.g. `log_name` or `fail_when` for event log checks.
    pub fn set_field(&mut self, key: &str, value: Value) {
        self.check.extra.insert(key.to_string(), value);
    }

    pub fn validate(&self) -> Result<(), String> {
        let warning = self.check.warning_threshold.unwrap_or(0);
        let error = self.check.error_threshold.unwrap_or(0);
        match self.check.check_type {
            CheckType::Cpuload | CheckType::Memory => is_valid_threshold(warning, error, false),
            CheckType::Diskspace => is_valid_threshold(warning, error, true),
            CheckType::Winsvc if self.check.svc_name.as_deref().is_none_or(str::is_empty) => {
                Err("A service must be selected".to_string())
            }
            CheckType::Eventlog if !validate_event_id(Some(&self.event_id)) => {
                Err("Event ID must be a number or *".to_string())
            }
            CheckType::Script if self.check.script.is_none() => {
                Err("A script must be selected".to_string())
            }
            CheckType::Script => {
                parse_codes(&self.info_codes)?;
                parse_codes(&self.warning_codes).map(|_| ())
            }
            _ => Ok(()),
        }
    }

    /// The check as sent to the backend. A `*` event id is stored as the
    /// wildcard flag with id 0.
    pub fn payload(&self) -> Check {
        let mut check = self.check.clone();
        if check.check_type == CheckType::Eventlog {
            let wildcard = self.event_id.trim() == "*";
            let id = if wildcard {
                0
            } else {
                self.event_id.trim().parse::<i64>().unwrap_or(0)
            };
            check.extra.insert("event_id".to_string(), Value::from(id));
            check
                .extra
                .insert("event_id_is_wildcard".to_string(), Value::Bool(wildcard));
        }
        if check.check_type == CheckType::Script {
            for (key, text) in [
                ("info_return_codes", &self.info_codes),
                ("warning_return_codes", &self.warning_codes),
            ] {
                let codes = parse_codes(text).unwrap_or_default();
                check.extra.insert(key.to_string(), Value::from(codes));
            }
        }
        check
    }

    /// Validates, then adds or updates the check. Returns the backend's message.
    pub async fn submit(&self, client: &TrmmClient) -> Result<String, SubmitError> {
        self.validate().map_err(SubmitError::Invalid)?;
        let check = self.payload();
        let message = match (self.editing, check.id) {
            (true, Some(id)) => client.update_check(id, &check).await?,
            _ => client.save_check(&check).await?,
        };
        tracing::info!(check_type = self.check.check_type.as_str(), editing = self.editing, "check saved");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{client_for, serve_once};

    #[test]
    fn test_option_lists() {
        assert_eq!(FAIL_OPTIONS.len(), 10);
        let letters = drive_letters();
        assert_eq!(letters.len(), 26);
        assert_eq!(letters[2], "C:");
        assert_eq!(SEVERITY_OPTIONS[0], ("Informational", "info"));
        assert_eq!(FAIL_WHEN_OPTIONS[1].1, "not_contains");
    }

    #[test]
    fn test_new_disk_check_defaults() {
        let form = CheckForm::new(CheckType::Diskspace, Some("abc123".to_string()), None);
        assert_eq!(form.check.disk.as_deref(), Some("A:"));
        assert!(form.validate().is_ok());
        assert!(form.needs_agent_options());

        let policy_form = CheckForm::new(CheckType::Diskspace, None, Some(3));
        assert!(!policy_form.needs_agent_options());
    }

    #[test]
    fn test_fractional_event_id_is_rejected() {
        for typed in ["4625.5", "1e3", "NaN", "inf"] {
            let mut form = CheckForm::new(CheckType::Eventlog, None, Some(1));
            for c in typed.chars() {
                form.push_char(FormField::EventId, c);
            }
            assert_eq!(form.validate().unwrap_err(), "Event ID must be a number or *", "{typed}");
        }

        let mut form = CheckForm::new(CheckType::Eventlog, None, Some(1));
        for c in "4625".chars() {
            form.push_char(FormField::EventId, c);
        }
        assert!(form.validate().is_ok());
        assert_eq!(form.payload().extra["event_id"], serde_json::json!(4625));
    }

    #[test]
    fn test_policy_service_check_starts_with_a_service() {
        let form = CheckForm::new(CheckType::Winsvc, None, Some(1));
        assert_eq!(form.service_options.len(), DEFAULT_SERVICES.len());
        let (label, name) = form.service_options[0].clone();
        assert_eq!(form.check.svc_name.as_deref(), Some(name.as_str()));
        assert_eq!(form.check.svc_display_name.as_deref(), Some(label.as_str()));
        assert!(form.validate().is_ok());

        let mut cleared = form.clone();
        cleared.check.svc_name = None;
        assert_eq!(cleared.validate().unwrap_err(), "A service must be selected");
    }

    #[test]
    fn test_default_services_cover_agent_services() {
        for name in ["tacticalagent", "Mesh Agent", "sshd", "Spooler"] {
            assert!(DEFAULT_SERVICES.iter().any(|(n, _)| *n == name), "{name}");
        }
        let labels: Vec<String> = DEFAULT_SERVICES.iter().map(|(_, l)| l.to_lowercase()).collect();
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn test_validate_by_type() {
        let mut form = CheckForm::new(CheckType::Memory, None, Some(1));
        form.check.warning_threshold = Some(95);
        form.check.error_threshold = Some(80);
        assert_eq!(
            form.validate().unwrap_err(),
            "Warning Threshold must be less than Error Threshold"
        );

        let mut disk = CheckForm::new(CheckType::Diskspace, None, Some(1));
        disk.check.warning_threshold = Some(5);
        disk.check.error_threshold = Some(10);
        assert_eq!(
            disk.validate().unwrap_err(),
            "Warning Threshold must be more than Error Threshold"
        );

        let ping = CheckForm::new(CheckType::Ping, None, Some(1));
        assert!(ping.validate().is_ok());
    }

    #[test]
    fn test_script_return_codes() {
        let mut form = CheckForm::new(CheckType::Script, Some("abc123".to_string()), None);
        form.check.script = Some(ScriptRef {
            id: 3,
            name: "Clear Temp".to_string(),
        });
        for c in "0,3010x".chars() {
            form.push_char(FormField::InfoCodes, c);
        }
        assert_eq!(form.display(FormField::InfoCodes), "0,3010");
        assert!(form.validate().is_ok());

        let payload = form.payload();
        assert_eq!(payload.extra["info_return_codes"], serde_json::json!([0, 3010]));
        assert_eq!(payload.extra["warning_return_codes"], serde_json::json!([]));

        let edited = CheckForm::edit(payload);
        assert_eq!(edited.info_codes, "0,3010");
        assert!(parse_codes("1,-2").is_err());
    }

    #[test]
    fn test_apply_agent_picks_first() {
        let agent: Agent = serde_json::from_value(serde_json::json!({
            "agent_id": "abc123",
            "hostname": "SRV-01",
            "disks": [{"device": "D:"}, {"device": "C:"}],
            "services": [
                {"name": "Spooler", "display_name": "Print Spooler"},
                {"name": "BITS", "display_name": "background Intelligent Transfer Service"}
            ]
        }))
        .unwrap();

        let mut disk = CheckForm::new(CheckType::Diskspace, Some("abc123".to_string()), None);
        disk.apply_agent(&agent);
        assert_eq!(disk.disk_options, vec!["D:".to_string(), "C:".to_string()]);
        assert_eq!(disk.check.disk.as_deref(), Some("D:"));

        let mut svc = CheckForm::new(CheckType::Winsvc, Some("abc123".to_string()), None);
        svc.apply_agent(&agent);
        assert_eq!(svc.check.svc_name.as_deref(), Some("BITS"));
        assert_eq!(svc.service_options.len(), 2);
    }

    #[test]
    fn test_fields_by_type() {
        let disk = CheckForm::new(CheckType::Diskspace, None, Some(1));
        assert_eq!(
            disk.fields(),
            [
                FormField::Disk,
                FormField::Warning,
                FormField::Error,
                FormField::Severity,
                FormField::Fails
            ]
        );
        let ping = CheckForm::new(CheckType::Ping, None, Some(1));
        assert!(ping.fields().iter().any(|f| f.is_text()));
    }

    #[test]
    fn test_cycle_wraps_choices() {
        let mut form = CheckForm::new(CheckType::Eventlog, None, Some(1));
        assert_eq!(form.display(FormField::LogName), "Application");
        form.cycle(FormField::LogName, -1);
        assert_eq!(form.display(FormField::LogName), "Security");

        assert_eq!(form.display(FormField::Severity), "Warning");
        form.cycle(FormField::Severity, 1);
        assert_eq!(form.check.alert_severity.as_deref(), Some("error"));

        form.cycle(FormField::Fails, -1);
        assert_eq!(form.check.fails_b4_alert, Some(10));
    }

    #[test]
    fn test_typing_thresholds() {
        let mut form = CheckForm::new(CheckType::Cpuload, None, Some(1));
        form.pop_char(FormField::Warning);
        form.pop_char(FormField::Warning);
        assert_eq!(form.check.warning_threshold, Some(0));
        form.push_char(FormField::Warning, '8');
        form.push_char(FormField::Warning, '5');
        assert_eq!(form.check.warning_threshold, Some(85));
        form.push_char(FormField::Warning, '1');
        assert_eq!(form.check.warning_threshold, Some(1));
        form.push_char(FormField::Warning, 'x');
        assert_eq!(form.check.warning_threshold, Some(1));
    }

    #[test]
    fn test_event_id_wildcard_payload() {
        let mut form = CheckForm::new(CheckType::Eventlog, None, Some(1));
        assert!(form.validate().is_err());

        form.push_char(FormField::EventId, '*');
        assert!(form.validate().is_ok());
        let payload = form.payload();
        assert_eq!(payload.extra["event_id"], 0);
        assert_eq!(payload.extra["event_id_is_wildcard"], true);

        form.pop_char(FormField::EventId);
        for c in "4625".chars() {
            form.push_char(FormField::EventId, c);
        }
        let payload = form.payload();
        assert_eq!(payload.extra["event_id"], 4625);
        assert_eq!(payload.extra["event_id_is_wildcard"], false);
    }

    #[test]
    fn test_script_choice_sets_timeout() {
        let mut form = CheckForm::new(CheckType::Script, None, Some(1));
        assert!(form.needs_script_options());
        assert_eq!(form.validate().unwrap_err(), "A script must be selected");

        form.apply_scripts(Ok(vec![
            SelectOption::Category("Maintenance".to_string()),
            SelectOption::Item {
                label: "Disk Health".to_string(),
                value: OptionValue::Id(14),
                timeout: Some(300),
                args: vec![],
            },
        ]));
        assert_eq!(form.display(FormField::Script), "Disk Health");
        assert_eq!(form.display(FormField::Timeout), "300");
        assert!(form.validate().is_ok());
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let client = client_for("http://127.0.0.1:9", Some("abc"), None);
        let mut form = CheckForm::new(CheckType::Cpuload, Some("abc123".to_string()), None);
        form.check.warning_threshold = Some(0);
        form.check.error_threshold = Some(0);
        let err = form.submit(&client).await.unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_edit_uses_put() {
        let (url, handle) = serve_once(200, "\"Memory Check was edited\"").await;
        let client = client_for(&url, Some("abc"), None);

        let mut check = Check::new(CheckType::Memory);
        check.id = Some(17);
        check.warning_threshold = Some(70);
        check.error_threshold = Some(85);
        let form = CheckForm::edit(check);

        let msg = form.submit(&client).await.unwrap();
        assert_eq!(msg, "Memory Check was edited");
        let request = handle.await.unwrap();
        assert!(request.starts_with("PUT /checks/17/ HTTP/1.1"));
    }
}
