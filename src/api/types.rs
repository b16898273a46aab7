use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

// Resources are owned by the backend. Fields the console reads are typed;
// everything else rides along in `extra` so an edited resource can be sent
// back without dropping data.

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub expiry: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FailingChecks {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub warning: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Site {
    pub id: i64,
    pub name: String,
    pub client: Option<i64>,
    pub client_name: Option<String>,
    pub server_policy: Option<i64>,
    pub workstation_policy: Option<i64>,
    pub alert_template: Option<i64>,
    #[serde(default)]
    pub maintenance_mode: bool,
    #[serde(default)]
    pub failing_checks: FailingChecks,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Client {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub sites: Vec<Site>,
    pub server_policy: Option<i64>,
    pub workstation_policy: Option<i64>,
    pub alert_template: Option<i64>,
    #[serde(default)]
    pub maintenance_mode: bool,
    #[serde(default)]
    pub failing_checks: FailingChecks,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Disk {
    pub device: String,
    pub fstype: Option<String>,
    /// Older agents report sizes pre-formatted ("26.4 GB"), newer ones in bytes.
    pub total: Option<Value>,
    pub used: Option<Value>,
    pub free: Option<Value>,
    pub percent: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WinService {
    pub name: String,
    pub display_name: String,
    pub status: Option<String>,
    pub start_type: Option<String>,
    pub pid: Option<i64>,
    pub description: Option<String>,
    pub username: Option<String>,
    pub binpath: Option<String>,
    #[serde(default)]
    pub autodelay: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AgentCheckCounts {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub passing: i64,
    #[serde(default)]
    pub failing: i64,
    #[serde(default)]
    pub warning: i64,
    #[serde(default)]
    pub info: i64,
    #[serde(default)]
    pub has_failing_checks: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Agent {
    pub agent_id: String,
    #[serde(alias = "id")]
    pub pk: Option<i64>,
    pub hostname: String,
    #[serde(alias = "client_name", default)]
    pub client: String,
    #[serde(alias = "site_name", default)]
    pub site: String,
    #[serde(alias = "plat")]
    pub platform: Option<String>,
    pub monitoring_type: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub operating_system: Option<String>,
    pub public_ip: Option<String>,
    pub logged_username: Option<String>,
    pub last_logged_in_user: Option<String>,
    pub last_seen: Option<String>,
    pub boot_time: Option<f64>,
    pub version: Option<String>,
    #[serde(default)]
    pub needs_reboot: bool,
    #[serde(default)]
    pub maintenance_mode: bool,
    pub pending_actions_count: Option<i64>,
    pub checks: Option<AgentCheckCounts>,
    #[serde(default)]
    pub disks: Vec<Disk>,
    #[serde(default)]
    pub services: Vec<WinService>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Agent {
    pub fn is_online(&self) -> bool {
        self.status.as_deref() == Some("online")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CheckType {
    Diskspace,
    Cpuload,
    Memory,
    Script,
    Winsvc,
    Ping,
    Eventlog,
    #[serde(other)]
    Unknown,
}

impl CheckType {
    pub fn display_name(&self) -> &'static str {
        match self {
            CheckType::Diskspace => "Disk Space Check",
            CheckType::Cpuload => "CPU Load Check",
            CheckType::Memory => "Memory Check",
            CheckType::Script => "Script Check",
            CheckType::Winsvc => "Service Check",
            CheckType::Ping => "Ping Check",
            CheckType::Eventlog => "Event Log Check",
            CheckType::Unknown => "Check",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckType::Diskspace => "diskspace",
            CheckType::Cpuload => "cpuload",
            CheckType::Memory => "memory",
            CheckType::Script => "script",
            CheckType::Winsvc => "winsvc",
            CheckType::Ping => "ping",
            CheckType::Eventlog => "eventlog",
            CheckType::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScriptRef {
    pub id: i64,
    pub name: String,
}

/// Checks come back with the script nested but are saved with its id.
fn script_id<S: Serializer>(script: &Option<ScriptRef>, serializer: S) -> Result<S::Ok, S::Error> {
    match script {
        Some(script) => serializer.serialize_i64(script.id),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Check {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub check_type: CheckType,
    pub name: Option<String>,
    pub readable_desc: Option<String>,
    pub status: Option<String>,
    pub alert_severity: Option<String>,
    pub warning_threshold: Option<i64>,
    pub error_threshold: Option<i64>,
    pub disk: Option<String>,
    pub svc_name: Option<String>,
    pub svc_display_name: Option<String>,
    pub ip: Option<String>,
    #[serde(serialize_with = "script_id")]
    pub script: Option<ScriptRef>,
    pub fails_b4_alert: Option<i64>,
    pub last_run: Option<String>,
    pub agent: Option<String>,
    pub policy: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Check {
    /// A blank check of the given type, used as the initial state of the add form.
    pub fn new(check_type: CheckType) -> Self {
        Self {
            id: None,
            check_type,
            name: None,
            readable_desc: None,
            status: None,
            alert_severity: None,
            warning_threshold: None,
            error_threshold: None,
            disk: None,
            svc_name: None,
            svc_display_name: None,
            ip: None,
            script: None,
            fails_b4_alert: Some(1),
            last_run: None,
            agent: None,
            policy: None,
            extra: Map::new(),
        }
    }

    /// Falls back to a locally built description when the backend omits it.
    pub fn description(&self) -> String {
        if let Some(desc) = &self.readable_desc {
            return desc.clone();
        }
        let display = self.check_type.display_name();
        let thresholds = || {
            let mut text = String::new();
            if let Some(w) = self.warning_threshold.filter(|w| *w > 0) {
                text.push_str(&format!(" Warning Threshold: {}%", w));
            }
            if let Some(e) = self.error_threshold.filter(|e| *e > 0) {
                text.push_str(&format!(" Error Threshold: {}%", e));
            }
            text
        };
        match self.check_type {
            CheckType::Diskspace => format!(
                "{}: Drive {} - {}",
                display,
                self.disk.as_deref().unwrap_or(""),
                thresholds()
            ),
            CheckType::Cpuload | CheckType::Memory => format!("{} - {}", display, thresholds()),
            CheckType::Winsvc => format!(
                "{}: {}",
                display,
                self.svc_display_name.as_deref().unwrap_or("")
            ),
            CheckType::Ping | CheckType::Eventlog => {
                format!("{}: {}", display, self.name.as_deref().unwrap_or(""))
            }
            CheckType::Script => format!(
                "{}: {}",
                display,
                self.script.as_ref().map(|s| s.name.as_str()).unwrap_or("")
            ),
            CheckType::Unknown => "n/a".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AutomatedTask {
    pub id: i64,
    pub name: String,
    pub task_type: Option<String>,
    pub schedule: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    pub sync_status: Option<String>,
    pub last_run: Option<String>,
    pub retcode: Option<i64>,
    pub daily_interval: Option<i64>,
    pub weekly_interval: Option<i64>,
    pub run_time_date: Option<String>,
    pub run_time_bit_weekdays: Option<u32>,
    pub monthly_months_of_year: Option<u32>,
    pub monthly_days_of_month: Option<u32>,
    pub monthly_weeks_of_month: Option<u32>,
    pub agent: Option<String>,
    pub policy: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Policy {
    pub id: i64,
    pub name: String,
    pub desc: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub enforced: bool,
    #[serde(default)]
    pub default_server_policy: bool,
    #[serde(default)]
    pub default_workstation_policy: bool,
    pub agents_count: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Alert {
    pub id: i64,
    pub alert_type: Option<String>,
    pub alert_time: Option<String>,
    pub severity: Option<String>,
    pub message: Option<String>,
    pub hostname: Option<String>,
    pub client: Option<String>,
    pub site: Option<String>,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default)]
    pub snoozed: bool,
    pub snooze_until: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuditLogEntry {
    pub id: i64,
    pub username: String,
    pub agent: Option<String>,
    pub entry_time: Option<String>,
    pub action: Option<String>,
    pub object_type: Option<String>,
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DebugLogEntry {
    pub id: Option<i64>,
    pub entry_time: Option<String>,
    pub log_level: String,
    pub agent: Option<String>,
    pub log_type: String,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PendingAction {
    pub id: i64,
    pub hostname: Option<String>,
    pub client: Option<String>,
    pub site: Option<String>,
    pub action_type: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub entry_time: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Script {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub shell: Option<String>,
    pub script_type: Option<String>,
    #[serde(default = "default_script_timeout")]
    pub default_timeout: i64,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_script_timeout() -> i64 {
    90
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScriptSnippet {
    pub id: i64,
    pub name: String,
    pub desc: Option<String>,
    pub code: Option<String>,
    pub shell: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CustomField {
    pub id: i64,
    pub name: String,
    /// "client", "site" or "agent".
    pub model: String,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    pub role: Option<i64>,
    pub last_login: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub is_superuser: bool,
    pub user_count: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiKey {
    pub id: i64,
    pub name: String,
    pub key: Option<String>,
    pub user: Option<i64>,
    pub username: Option<String>,
    pub expiration: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WinUpdate {
    pub id: i64,
    pub kb: Option<String>,
    pub title: Option<String>,
    pub severity: Option<String>,
    #[serde(default)]
    pub installed: bool,
    #[serde(default)]
    pub downloaded: bool,
    pub action: Option<String>,
    pub date_installed: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InstalledSoftware {
    pub name: String,
    pub version: Option<String>,
    pub publisher: Option<String>,
    pub install_date: Option<String>,
    pub size: Option<String>,
    pub source: Option<String>,
    pub location: Option<String>,
    pub uninstall: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AgentSoftware {
    #[serde(default)]
    pub software: Vec<InstalledSoftware>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChocoSoftware {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Note {
    pub id: i64,
    pub note: String,
    pub username: Option<String>,
    pub entry_time: Option<String>,
}

/// Dashboard bootstrap data: server version plus the user's UI preferences.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DashboardInfo {
    pub trmm_version: Option<String>,
    pub latest_trmm_ver: Option<String>,
    #[serde(default)]
    pub show_community_scripts: bool,
    pub dbl_click_action: Option<String>,
    pub default_agent_tbl_tab: Option<String>,
    pub client_tree_sort: Option<String>,
    pub client_tree_splitter: Option<u16>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
