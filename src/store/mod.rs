pub mod admin;
pub mod alerts;
pub mod automation;
pub mod tree;

use crate::api::types::{
    Agent, AutomatedTask, Check, Client, DashboardInfo, Disk, InstalledSoftware, Note, WinService,
    WinUpdate,
};
use admin::AdminStore;
use alerts::AlertsStore;
use automation::AutomationStore;
use tree::{TreeNode, build_tree};

const MIN_PANE_HEIGHT: u16 = 15;

/// Per-user preferences the backend keeps for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct UiPrefs {
    pub show_community_scripts: bool,
    pub agent_dbl_click_action: String,
    pub default_agent_tbl_tab: String,
    pub client_tree_sort: String,
    pub client_tree_splitter: u16,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            show_community_scripts: false,
            agent_dbl_click_action: String::new(),
            default_agent_tbl_tab: "server".to_string(),
            client_tree_sort: tree::SORT_ALPHAFAIL.to_string(),
            client_tree_splitter: 11,
        }
    }
}

/// Central dashboard state. Mutated only from the UI loop.
#[derive(Debug)]
pub struct Store {
    pub username: Option<String>,
    pub token: Option<String>,
    pub clients: Vec<Client>,
    pub tree: Vec<TreeNode>,
    pub tree_ready: bool,
    /// Set when the backend has no clients yet.
    pub needs_initial_setup: bool,
    pub selected_row: Option<String>,
    pub agent_summary: Option<Agent>,
    pub win_updates: Vec<WinUpdate>,
    pub agent_checks: Option<Vec<Check>>,
    pub automated_tasks: Vec<AutomatedTask>,
    pub installed_software: Vec<InstalledSoftware>,
    pub services: Vec<WinService>,
    pub notes: Vec<Note>,
    pub need_refresh: bool,
    pub table_height: u16,
    pub tab_height: u16,
    pub prefs: UiPrefs,
    pub agent_table_loading: bool,
    pub tree_loading: bool,
    known_version: Option<String>,

    pub alerts: AlertsStore,
    pub automation: AutomationStore,
    pub admin: AdminStore,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            username: None,
            token: None,
            clients: Vec::new(),
            tree: Vec::new(),
            tree_ready: false,
            needs_initial_setup: false,
            selected_row: None,
            agent_summary: None,
            win_updates: Vec::new(),
            agent_checks: None,
            automated_tasks: Vec::new(),
            installed_software: Vec::new(),
            services: Vec::new(),
            notes: Vec::new(),
            need_refresh: false,
            table_height: 35,
            tab_height: 35,
            prefs: UiPrefs::default(),
            agent_table_loading: false,
            tree_loading: false,
            known_version: None,
            alerts: AlertsStore::default(),
            automation: AutomationStore::default(),
            admin: AdminStore::default(),
        }
    }
}

impl Store {
    // getters

    pub fn logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn selected_agent_id(&self) -> Option<&str> {
        self.agent_summary.as_ref().map(|a| a.agent_id.as_str())
    }

    pub fn agent_disks(&self) -> &[Disk] {
        self.agent_summary
            .as_ref()
            .map(|a| a.disks.as_slice())
            .unwrap_or_default()
    }

    pub fn agent_services(&self) -> &[WinService] {
        match &self.agent_summary {
            Some(agent) if !agent.services.is_empty() => &agent.services,
            _ => &self.services,
        }
    }

    pub fn checks(&self) -> Option<&[Check]> {
        self.agent_checks.as_deref()
    }

    /// Pending updates first, each group ordered by id.
    pub fn sorted_updates(&self) -> Vec<&WinUpdate> {
        let mut sorted: Vec<&WinUpdate> = self.win_updates.iter().collect();
        sorted.sort_by_key(|u| (u.installed, u.id));
        sorted
    }

    pub fn agent_hostname(&self) -> Option<&str> {
        self.agent_summary.as_ref().map(|a| a.hostname.as_str())
    }

    pub fn agent_table_height(&self) -> u16 {
        self.table_height
    }

    pub fn tabs_table_height(&self) -> u16 {
        self.tab_height
    }

    // mutations

    pub fn set_active_row(&mut self, agent_id: Option<String>) {
        self.selected_row = agent_id;
    }

    pub fn retrieve_token(&mut self, token: String, username: String) {
        self.token = Some(token);
        self.username = Some(username);
    }

    pub fn destroy_token(&mut self) {
        self.token = None;
        self.username = None;
    }

    pub fn set_clients(&mut self, clients: Vec<Client>) {
        self.clients = clients;
    }

    /// Rebuilds the tree from the current clients.
    pub fn load_tree(&mut self) {
        self.needs_initial_setup = self.clients.is_empty();
        self.tree = build_tree(&self.clients, &self.prefs.client_tree_sort);
        self.tree_ready = true;
        self.tree_loading = false;
    }

    pub fn set_summary(&mut self, agent: Agent) {
        self.agent_summary = Some(agent);
    }

    pub fn set_win_updates(&mut self, updates: Vec<WinUpdate>) {
        self.win_updates = updates;
    }

    pub fn set_installed_software(&mut self, software: Vec<InstalledSoftware>) {
        self.installed_software = software;
    }

    pub fn set_checks(&mut self, checks: Vec<Check>) {
        self.agent_checks = Some(checks);
    }

    pub fn set_automated_tasks(&mut self, tasks: Vec<AutomatedTask>) {
        self.automated_tasks = tasks;
    }

    pub fn set_services(&mut self, services: Vec<WinService>) {
        self.services = services;
    }

    pub fn set_notes(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    /// Clears everything tied to the selected agent.
    pub fn destroy_sub_table(&mut self) {
        self.agent_summary = None;
        self.agent_checks = None;
        self.win_updates.clear();
        self.installed_software.clear();
        self.automated_tasks.clear();
        self.services.clear();
        self.notes.clear();
        self.selected_row = None;
    }

    pub fn set_refresh_needed(&mut self, needed: bool) {
        self.need_refresh = needed;
    }

    /// Splits the screen between the agent table and the detail tabs.
    /// `val` is the splitter position in percent of the screen height.
    pub fn set_splitter(&mut self, val: f64) {
        let agent_height = (100.0 - val - 15.0).abs();
        let tabs_height = (val - 10.0).abs();
        self.table_height = (agent_height.round() as u16).max(MIN_PANE_HEIGHT);
        self.tab_height = (tabs_height.round() as u16).max(MIN_PANE_HEIGHT);
    }

    pub fn set_client_splitter(&mut self, val: u16) {
        self.prefs.client_tree_splitter = val;
    }

    pub fn apply_dashboard_info(&mut self, info: &DashboardInfo) {
        self.prefs.show_community_scripts = info.show_community_scripts;
        if let Some(action) = &info.dbl_click_action {
            self.prefs.agent_dbl_click_action = action.clone();
        }
        if let Some(tab) = &info.default_agent_tbl_tab {
            self.prefs.default_agent_tbl_tab = tab.clone();
        }
        if let Some(sort) = &info.client_tree_sort {
            self.prefs.client_tree_sort = sort.clone();
        }
        if let Some(splitter) = info.client_tree_splitter {
            self.prefs.client_tree_splitter = splitter;
        }
    }

    /// Remembers the first backend version seen and flags a refresh when it changes.
    pub fn check_version(&mut self, version: &str) {
        match &self.known_version {
            None => self.known_version = Some(version.to_string()),
            Some(known) if known == version => {}
            Some(known) => {
                tracing::info!(from = %known, to = %version, "backend version changed");
                self.known_version = Some(version.to_string());
                self.need_refresh = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(id: i64, installed: bool) -> WinUpdate {
        serde_json::from_value(serde_json::json!({"id": id, "installed": installed})).unwrap()
    }

    #[test]
    fn test_sorted_updates_pending_first() {
        let mut store = Store::default();
        store.set_win_updates(vec![update(5, true), update(3, false), update(1, true), update(4, false)]);
        let ids: Vec<i64> = store.sorted_updates().iter().map(|u| u.id).collect();
        assert_eq!(ids, [3, 4, 1, 5]);
    }

    #[test]
    fn test_splitter_heights() {
        let mut store = Store::default();
        store.set_splitter(50.0);
        assert_eq!(store.agent_table_height(), 35);
        assert_eq!(store.tabs_table_height(), 40);

        store.set_splitter(90.0);
        assert_eq!(store.agent_table_height(), 15);
        assert_eq!(store.tabs_table_height(), 80);

        store.set_splitter(12.0);
        assert_eq!(store.agent_table_height(), 73);
        assert_eq!(store.tabs_table_height(), 15);
    }

    #[test]
    fn test_check_version_flags_refresh() {
        let mut store = Store::default();
        store.check_version("0.19.0");
        assert!(!store.need_refresh);
        store.check_version("0.19.0");
        assert!(!store.need_refresh);
        store.check_version("0.19.1");
        assert!(store.need_refresh);
    }

    #[test]
    fn test_empty_tree_needs_setup() {
        let mut store = Store::default();
        store.load_tree();
        assert!(store.tree_ready);
        assert!(store.needs_initial_setup);
    }

    #[test]
    fn test_token_lifecycle() {
        let mut store = Store::default();
        assert!(!store.logged_in());
        store.retrieve_token("abc".to_string(), "tech".to_string());
        assert!(store.logged_in());
        store.destroy_token();
        assert!(!store.logged_in());
        assert_eq!(store.username, None);
    }

    #[test]
    fn test_destroy_sub_table() {
        let mut store = Store::default();
        store.set_summary(
            serde_json::from_value(serde_json::json!({
                "agent_id": "abc123",
                "hostname": "DESKTOP-01",
                "disks": [{"device": "C:"}]
            }))
            .unwrap(),
        );
        store.set_active_row(Some("abc123".to_string()));
        assert_eq!(store.selected_agent_id(), Some("abc123"));
        assert_eq!(store.agent_disks().len(), 1);

        store.destroy_sub_table();
        assert_eq!(store.selected_agent_id(), None);
        assert!(store.agent_disks().is_empty());
        assert_eq!(store.selected_row, None);
    }

    #[test]
    fn test_apply_dashboard_info() {
        let mut store = Store::default();
        let info: DashboardInfo = serde_json::from_value(serde_json::json!({
            "show_community_scripts": true,
            "client_tree_sort": "alpha",
            "client_tree_splitter": 20
        }))
        .unwrap();
        store.apply_dashboard_info(&info);
        assert!(store.prefs.show_community_scripts);
        assert_eq!(store.prefs.client_tree_sort, "alpha");
        assert_eq!(store.prefs.client_tree_splitter, 20);
        assert_eq!(store.prefs.default_agent_tbl_tab, "server");
    }
}
