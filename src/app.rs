use crate::api::TrmmClient;
use crate::api::types::{Agent, Alert, AuditLogEntry, CheckType, PendingAction, Script};
use crate::common::notify::{Notification, NotifyQueue};
use crate::common::utils::clamp_selection;
use crate::event::{DropdownKind, Event, EventHandler};
use crate::options::checks::CheckForm;
use crate::options::dropdowns::Dropdown;
use crate::options::logs::DebugLogState;
use crate::store::Store;
use crate::store::tree::flatten;
use crate::tui::Tui;
use crate::ui;
use anyhow::Result;
use ratatui::widgets::TableState;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How often the backend version is polled.
const VERSION_POLL: Duration = Duration::from_secs(300);
const SETUP_NOTICE: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentView {
    Dashboard,
    Alerts,
    Policies,
    Logs,
    Scripts,
    Admin,
}

impl CurrentView {
    pub const ALL: [CurrentView; 6] = [
        CurrentView::Dashboard,
        CurrentView::Alerts,
        CurrentView::Policies,
        CurrentView::Logs,
        CurrentView::Scripts,
        CurrentView::Admin,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            CurrentView::Dashboard => "Dashboard",
            CurrentView::Alerts => "Alerts",
            CurrentView::Policies => "Policies",
            CurrentView::Logs => "Logs",
            CurrentView::Scripts => "Scripts",
            CurrentView::Admin => "Admin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardFocus {
    Tree,
    Agents,
    Tabs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentTab {
    Summary,
    Checks,
    Tasks,
    Software,
    Updates,
    Services,
    Notes,
}

impl AgentTab {
    pub const ALL: [AgentTab; 7] = [
        AgentTab::Summary,
        AgentTab::Checks,
        AgentTab::Tasks,
        AgentTab::Software,
        AgentTab::Updates,
        AgentTab::Services,
        AgentTab::Notes,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            AgentTab::Summary => "Summary",
            AgentTab::Checks => "Checks",
            AgentTab::Tasks => "Tasks",
            AgentTab::Software => "Software",
            AgentTab::Updates => "Patches",
            AgentTab::Services => "Services",
            AgentTab::Notes => "Notes",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

/// Agent table filter by monitoring type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentFilter {
    Server,
    Workstation,
    Mixed,
}

impl AgentFilter {
    pub fn from_pref(pref: &str) -> Self {
        match pref {
            "workstation" => AgentFilter::Workstation,
            "mixed" => AgentFilter::Mixed,
            _ => AgentFilter::Server,
        }
    }

    pub fn next(self) -> Self {
        match self {
            AgentFilter::Server => AgentFilter::Workstation,
            AgentFilter::Workstation => AgentFilter::Mixed,
            AgentFilter::Mixed => AgentFilter::Server,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AgentFilter::Server => "Servers",
            AgentFilter::Workstation => "Workstations",
            AgentFilter::Mixed => "Mixed",
        }
    }

    pub fn matches(&self, agent: &Agent) -> bool {
        match self {
            AgentFilter::Mixed => true,
            AgentFilter::Server => agent.monitoring_type.as_deref() == Some("server"),
            AgentFilter::Workstation => agent.monitoring_type.as_deref() == Some("workstation"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogsTab {
    Debug,
    Audit,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminTab {
    Users,
    Roles,
    ApiKeys,
    CustomFields,
}

/// Writes that need a yes/no before they are sent.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingWrite {
    RemoveCheck(i64),
    RemovePendingAction(i64),
    RebootAgent(String),
}

#[derive(Debug)]
pub enum Popup {
    Help,
    Message {
        title: String,
        content: String,
        loading: bool,
    },
    Confirm {
        message: String,
        write: PendingWrite,
    },
    /// First step of adding a check: pick its type.
    CheckType {
        agent: Option<String>,
        policy: Option<i64>,
        state: TableState,
    },
    CheckForm {
        form: Box<CheckForm>,
        field: usize,
    },
    AgentPicker(Dropdown),
    NoteInput(String),
}

#[derive(Debug)]
pub struct App {
    pub should_quit: bool,
    pub client: TrmmClient,
    pub store: Store,
    pub notifications: NotifyQueue,
    pub current_view: CurrentView,
    pub popup: Option<Popup>,
    pub error: Option<String>,
    pub session_expired: bool,
    pub export_dir: PathBuf,
    last_version_check: Instant,

    // Dashboard
    pub focus: DashboardFocus,
    pub tree_state: TableState,
    pub loaded_node: Option<String>,
    pub agents: Vec<Agent>,
    pub agent_filter: AgentFilter,
    pub agent_table_state: TableState,
    pub agent_tab: AgentTab,
    pub tab_table_state: TableState,
    pub splitter: f64,

    // Alerts
    pub alerts_loading: bool,
    pub alerts_state: TableState,
    pub new_alerts_only: bool,

    // Policies
    pub policies_loading: bool,
    pub policy_state: TableState,

    // Logs
    pub logs_tab: LogsTab,
    pub logs_loading: bool,
    pub debug_log: DebugLogState,
    pub audit_logs: Vec<AuditLogEntry>,
    pub pending_actions: Vec<PendingAction>,
    pub logs_state: TableState,

    // Scripts
    pub scripts: Vec<Script>,
    pub scripts_loading: bool,
    pub scripts_state: TableState,

    // Admin
    pub admin_tab: AdminTab,
    pub admin_loading: bool,
    pub admin_state: TableState,
}

impl App {
    pub fn new(client: TrmmClient, username: Option<String>) -> Self {
        let mut store = Store::default();
        if let Some(token) = client.token() {
            store.retrieve_token(token.to_string(), username.unwrap_or_default());
        }
        let splitter = 50.0;
        store.set_splitter(splitter);
        let agent_filter = AgentFilter::from_pref(&store.prefs.default_agent_tbl_tab);

        Self {
            should_quit: false,
            client,
            store,
            notifications: NotifyQueue::default(),
            current_view: CurrentView::Dashboard,
            popup: None,
            error: None,
            session_expired: false,
            export_dir: PathBuf::from("."),
            last_version_check: Instant::now(),
            focus: DashboardFocus::Tree,
            tree_state: TableState::default(),
            loaded_node: None,
            agents: Vec::new(),
            agent_filter,
            agent_table_state: TableState::default(),
            agent_tab: AgentTab::Summary,
            tab_table_state: TableState::default(),
            splitter,
            alerts_loading: false,
            alerts_state: TableState::default(),
            new_alerts_only: true,
            policies_loading: false,
            policy_state: TableState::default(),
            logs_tab: LogsTab::Debug,
            logs_loading: false,
            debug_log: DebugLogState::default(),
            audit_logs: Vec::new(),
            pending_actions: Vec::new(),
            logs_state: TableState::default(),
            scripts: Vec::new(),
            scripts_loading: false,
            scripts_state: TableState::default(),
            admin_tab: AdminTab::Users,
            admin_loading: false,
            admin_state: TableState::default(),
        }
    }

    pub async fn run(&mut self, tui: &mut Tui, events: &mut EventHandler) -> Result<()> {
        if self.client.is_authenticated() {
            self.refresh_all(events.sender());
        } else {
            self.session_expired = true;
            self.error = Some(
                "Not authenticated. Set TRMM_API_TOKEN, TRMM_API_KEY or TRMM_USERNAME/TRMM_PASSWORD."
                    .to_string(),
            );
        }

        while !self.should_quit {
            tui.draw(|f| {
                ui::render(self, f);
            })?;

            let event = events.next().await?;
            self.handle_event(event, events.sender());
        }
        Ok(())
    }

    /// Agents shown in the agent table after the monitoring type filter.
    pub fn visible_agents(&self) -> Vec<&Agent> {
        self.agents
            .iter()
            .filter(|a| self.agent_filter.matches(a))
            .collect()
    }

    pub fn selected_agent(&self) -> Option<&Agent> {
        let i = self.agent_table_state.selected()?;
        self.visible_agents().get(i).copied()
    }

    /// Raw key (`Client|id` / `Site|id`) of the highlighted tree node.
    pub fn selected_node(&self) -> Option<String> {
        let i = self.tree_state.selected()?;
        flatten(&self.store.tree).get(i).map(|(_, node)| node.raw.clone())
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn handle_event(&mut self, event: Event, tx: tokio::sync::mpsc::UnboundedSender<Event>) {
        match event {
            Event::Tick => self.on_tick(tx),
            Event::Key(key) => self.handle_key_event(key, tx),
            Event::Mouse(_) => {}
            Event::Resize(_, _) => {}
            Event::SessionExpired => {
                if !self.session_expired {
                    tracing::warn!("session expired");
                }
                self.session_expired = true;
                self.popup = None;
                self.client.set_token(None);
                self.store.destroy_token();
            }
            Event::Notify(notification) => self.notify(notification),
            Event::LoggedIn(result) => match result {
                Ok(token) => {
                    let username = self
                        .client
                        .credentials()
                        .map(|c| c.username.clone())
                        .unwrap_or_default();
                    self.client.set_token(Some(token.clone()));
                    self.store.retrieve_token(token, username);
                    self.session_expired = false;
                    self.error = None;
                    self.refresh_all(tx);
                }
                Err(e) => self.error = Some(format!("Login failed: {}", e)),
            },
            Event::DashboardInfoFetched(result) => match result {
                Ok(info) => {
                    self.store.apply_dashboard_info(&info);
                    self.agent_filter = AgentFilter::from_pref(&self.store.prefs.default_agent_tbl_tab);
                    if let Some(version) = &info.trmm_version {
                        self.store.check_version(version);
                    }
                    // The tree sort may have changed.
                    if self.store.tree_ready {
                        self.store.load_tree();
                    }
                }
                Err(e) => tracing::warn!(error = %e, "dashboard info unavailable"),
            },
            Event::VersionFetched(result) => match result {
                Ok(version) => {
                    self.store.check_version(&version);
                    if self.store.need_refresh {
                        self.notify(Notification::info("Backend was updated, reloading"));
                        self.store.set_refresh_needed(false);
                        self.refresh_all(tx);
                    }
                }
                Err(e) => tracing::warn!(error = %e, "version check failed"),
            },
            Event::ClientsFetched(result) => {
                self.store.tree_loading = false;
                match result {
                    Ok(clients) => {
                        self.error = None;
                        self.store.set_clients(clients);
                        self.store.load_tree();
                        let len = flatten(&self.store.tree).len();
                        clamp_selection(&mut self.tree_state, len);
                        if self.store.needs_initial_setup {
                            self.notify(
                                Notification::warning("No clients yet. Add a client and site in the web dashboard first.")
                                    .with_timeout(SETUP_NOTICE),
                            );
                        } else if self.loaded_node.is_none() {
                            if let Some(raw) = self.selected_node() {
                                self.fetch_agents(raw, tx);
                            }
                        }
                    }
                    Err(e) => self.error = Some(e),
                }
            }
            Event::AgentsFetched(node, result) => {
                if self.loaded_node.as_deref() != Some(node.as_str()) {
                    return;
                }
                self.store.agent_table_loading = false;
                match result {
                    Ok(agents) => {
                        self.agents = agents;
                        let len = self.visible_agents().len();
                        clamp_selection(&mut self.agent_table_state, len);
                    }
                    Err(e) => self.notify(Notification::negative(e)),
                }
            }
            Event::AgentSummaryFetched(agent_id, result) => {
                if self.store.selected_row.as_deref() != Some(agent_id.as_str()) {
                    return;
                }
                match result {
                    Ok(agent) => self.store.set_summary(agent),
                    Err(e) => self.notify(Notification::negative(e)),
                }
            }
            Event::ChecksFetched(agent_id, result) => {
                if self.is_current_agent(&agent_id) {
                    self.apply_tab(result, |store, v| store.set_checks(v));
                }
            }
            Event::TasksFetched(agent_id, result) => {
                if self.is_current_agent(&agent_id) {
                    self.apply_tab(result, |store, v| store.set_automated_tasks(v));
                }
            }
            Event::SoftwareFetched(agent_id, result) => {
                if self.is_current_agent(&agent_id) {
                    self.apply_tab(result, |store, v| store.set_installed_software(v));
                }
            }
            Event::UpdatesFetched(agent_id, result) => {
                if self.is_current_agent(&agent_id) {
                    self.apply_tab(result, |store, v| store.set_win_updates(v));
                }
            }
            Event::ServicesFetched(agent_id, result) => {
                if self.is_current_agent(&agent_id) {
                    self.apply_tab(result, |store, v| store.set_services(v));
                }
            }
            Event::NotesFetched(agent_id, result) => {
                if self.is_current_agent(&agent_id) {
                    self.apply_tab(result, |store, v| store.set_notes(v));
                }
            }
            Event::AlertsFetched(result) => {
                self.alerts_loading = false;
                match result {
                    Ok(alerts) => {
                        self.store.alerts.set_alerts(alerts);
                        let len = self.visible_alerts().len();
                        clamp_selection(&mut self.alerts_state, len);
                    }
                    Err(e) => self.notify(Notification::negative(e)),
                }
            }
            Event::PoliciesFetched(result) => {
                self.policies_loading = false;
                match result {
                    Ok(policies) => {
                        self.store.automation.set_policies(policies);
                        let len = self.store.automation.policies.len();
                        clamp_selection(&mut self.policy_state, len);
                    }
                    Err(e) => self.notify(Notification::negative(e)),
                }
            }
            Event::PolicyChecksFetched(id, result) => {
                if self.store.automation.selected_policy == Some(id) {
                    match result {
                        Ok(checks) => self.store.automation.set_policy_checks(checks),
                        Err(e) => self.notify(Notification::negative(e)),
                    }
                }
            }
            Event::PolicyTasksFetched(id, result) => {
                if self.store.automation.selected_policy == Some(id) {
                    match result {
                        Ok(tasks) => self.store.automation.set_policy_tasks(tasks),
                        Err(e) => self.notify(Notification::negative(e)),
                    }
                }
            }
            Event::DebugLogFetched(result) => {
                self.logs_loading = false;
                match result {
                    Ok(entries) => {
                        self.debug_log.entries = entries;
                        clamp_selection(&mut self.logs_state, self.debug_log.entries.len());
                    }
                    Err(e) => self.notify(Notification::negative(e)),
                }
            }
            Event::AuditLogsFetched(result) => {
                self.logs_loading = false;
                match result {
                    Ok(entries) => {
                        self.audit_logs = entries;
                        clamp_selection(&mut self.logs_state, self.audit_logs.len());
                    }
                    Err(e) => self.notify(Notification::negative(e)),
                }
            }
            Event::PendingActionsFetched(result) => {
                self.logs_loading = false;
                match result {
                    Ok(actions) => {
                        self.pending_actions = actions;
                        clamp_selection(&mut self.logs_state, self.pending_actions.len());
                    }
                    Err(e) => self.notify(Notification::negative(e)),
                }
            }
            Event::ScriptsFetched(result) => {
                self.scripts_loading = false;
                match result {
                    Ok(mut scripts) => {
                        scripts.sort_by_key(|s| s.name.to_lowercase());
                        self.scripts = scripts;
                        clamp_selection(&mut self.scripts_state, self.scripts.len());
                    }
                    Err(e) => self.notify(Notification::negative(e)),
                }
            }
            Event::TextFetched(name, result) => {
                let content = result.unwrap_or_else(|e| format!("Error: {}", e));
                self.popup = Some(Popup::Message {
                    title: name,
                    content,
                    loading: false,
                });
            }
            Event::UsersFetched(result) => {
                self.admin_loading = false;
                match result {
                    Ok(users) => self.store.admin.set_users(users),
                    Err(e) => self.notify(Notification::negative(e)),
                }
                self.clamp_admin_selection();
            }
            Event::RolesFetched(result) => {
                self.admin_loading = false;
                match result {
                    Ok(roles) => self.store.admin.set_roles(roles),
                    Err(e) => self.notify(Notification::negative(e)),
                }
                self.clamp_admin_selection();
            }
            Event::ApiKeysFetched(result) => {
                self.admin_loading = false;
                match result {
                    Ok(keys) => self.store.admin.set_api_keys(keys),
                    Err(e) => self.notify(Notification::negative(e)),
                }
                self.clamp_admin_selection();
            }
            Event::CustomFieldsFetched(result) => {
                self.admin_loading = false;
                match result {
                    Ok(fields) => self.store.admin.set_custom_fields(fields),
                    Err(e) => self.notify(Notification::negative(e)),
                }
                self.clamp_admin_selection();
            }
            Event::OptionsFetched(kind, result) => match (kind, self.popup.as_mut()) {
                (DropdownKind::LogAgent, Some(Popup::AgentPicker(dropdown))) => {
                    dropdown.apply("agents", result);
                }
                (DropdownKind::CheckScript, Some(Popup::CheckForm { form, .. })) => {
                    form.apply_scripts(result);
                }
                _ => {}
            },
            Event::CheckFormAgentFetched(result) => {
                if let Some(Popup::CheckForm { form, .. }) = self.popup.as_mut() {
                    form.loading = false;
                    match result {
                        Ok(agent) => form.apply_agent(&agent),
                        Err(e) => tracing::warn!(error = %e, "agent disks and services unavailable"),
                    }
                }
            }
            Event::ActionFinished(result) => match result {
                Ok(message) => {
                    // A saved check closes its form.
                    if matches!(self.popup, Some(Popup::CheckForm { .. })) {
                        self.popup = None;
                    }
                    if !message.is_empty() {
                        self.notify(Notification::positive(message));
                    }
                    self.refresh_current(tx);
                }
                Err(e) => {
                    if let Some(Popup::CheckForm { form, .. }) = self.popup.as_mut() {
                        form.loading = false;
                    }
                    self.notify(Notification::negative(e));
                }
            },
        }
    }

    fn is_current_agent(&self, agent_id: &str) -> bool {
        self.store.selected_row.as_deref() == Some(agent_id)
    }

    /// Stores a detail tab's rows and keeps its selection valid.
    fn apply_tab<T>(&mut self, result: Result<Vec<T>, String>, set: impl FnOnce(&mut Store, Vec<T>)) {
        match result {
            Ok(rows) => {
                let len = rows.len();
                set(&mut self.store, rows);
                clamp_selection(&mut self.tab_table_state, len);
            }
            Err(e) => self.notify(Notification::negative(e)),
        }
    }

    fn clamp_admin_selection(&mut self) {
        let len = match self.admin_tab {
            AdminTab::Users => self.store.admin.users.len(),
            AdminTab::Roles => self.store.admin.roles.len(),
            AdminTab::ApiKeys => self.store.admin.api_keys.len(),
            AdminTab::CustomFields => self.store.admin.custom_fields.len(),
        };
        clamp_selection(&mut self.admin_state, len);
    }

    fn on_tick(&mut self, tx: tokio::sync::mpsc::UnboundedSender<Event>) {
        self.notifications.prune(Instant::now());
        if !self.session_expired && self.last_version_check.elapsed() >= VERSION_POLL {
            self.last_version_check = Instant::now();
            self.fetch_version(tx);
        }
    }

    pub fn visible_alerts(&self) -> Vec<&Alert> {
        let sorted = self.store.alerts.sorted_alerts();
        if !self.new_alerts_only {
            return sorted;
        }
        let new_ids: Vec<i64> = self.store.alerts.new_alerts().iter().map(|a| a.id).collect();
        sorted.into_iter().filter(|a| new_ids.contains(&a.id)).collect()
    }

    pub fn open_check_type_popup(&mut self, agent: Option<String>, policy: Option<i64>) {
        let mut state = TableState::default();
        state.select(Some(0));
        self.popup = Some(Popup::CheckType { agent, policy, state });
    }

    /// Opens the check form and starts loading whatever its fields list.
    pub fn open_check_form(&mut self, form: CheckForm, tx: tokio::sync::mpsc::UnboundedSender<Event>) {
        let needs_scripts = form.needs_script_options();
        let agent = form.check.agent.clone().filter(|_| form.needs_agent_options());
        let mut form = Box::new(form);
        form.loading = agent.is_some();
        self.popup = Some(Popup::CheckForm { form, field: 0 });

        if let Some(agent_id) = agent {
            self.fetch_check_form_agent(agent_id, tx.clone());
        }
        if needs_scripts {
            self.fetch_script_options(DropdownKind::CheckScript, tx);
        }
    }

    pub fn add_check_of_type(
        &mut self,
        check_type: CheckType,
        agent: Option<String>,
        policy: Option<i64>,
        tx: tokio::sync::mpsc::UnboundedSender<Event>,
    ) {
        self.open_check_form(CheckForm::new(check_type, agent, policy), tx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::client_for;

    fn app() -> App {
        App::new(client_for("http://127.0.0.1:9", Some("abc"), None), Some("tech".to_string()))
    }

    fn agent(id: &str, monitoring_type: &str) -> Agent {
        serde_json::from_value(serde_json::json!({
            "agent_id": id,
            "hostname": id,
            "monitoring_type": monitoring_type
        }))
        .unwrap()
    }

    #[test]
    fn test_new_app_carries_token() {
        let app = app();
        assert!(app.store.logged_in());
        assert_eq!(app.store.username.as_deref(), Some("tech"));
        assert_eq!(app.agent_filter, AgentFilter::Server);
    }

    #[tokio::test]
    async fn test_session_expired_clears_token() {
        let mut app = app();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        app.popup = Some(Popup::Help);
        app.handle_event(Event::SessionExpired, tx);
        assert!(app.session_expired);
        assert!(app.popup.is_none());
        assert!(!app.store.logged_in());
        assert!(!app.client.is_authenticated());
    }

    #[test]
    fn test_agent_filter() {
        let mut app = app();
        app.agents = vec![agent("a", "server"), agent("b", "workstation"), agent("c", "server")];
        assert_eq!(app.visible_agents().len(), 2);
        app.agent_filter = app.agent_filter.next();
        assert_eq!(app.visible_agents().len(), 1);
        app.agent_filter = app.agent_filter.next();
        assert_eq!(app.visible_agents().len(), 3);
    }

    #[tokio::test]
    async fn test_stale_tab_results_are_ignored() {
        let mut app = app();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        app.store.set_active_row(Some("current".to_string()));
        app.handle_event(Event::NotesFetched("old".to_string(), Ok(vec![])), tx.clone());
        assert!(app.store.checks().is_none());

        app.handle_event(Event::ChecksFetched("current".to_string(), Ok(vec![])), tx);
        assert_eq!(app.store.checks().map(|c| c.len()), Some(0));
    }

    #[tokio::test]
    async fn test_failed_action_keeps_form_open() {
        let mut app = app();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        app.popup = Some(Popup::CheckForm {
            form: Box::new(CheckForm::new(CheckType::Memory, None, Some(1))),
            field: 0,
        });
        app.handle_event(Event::ActionFinished(Err("Check already exists".to_string())), tx);
        assert!(matches!(app.popup, Some(Popup::CheckForm { .. })));
        assert_eq!(app.notifications.len(), 1);
    }
}
