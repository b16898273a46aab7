use crate::api::alerts::AlertAction;
use crate::api::services::ServiceAction;
use crate::app::{AdminTab, AgentTab, App, CurrentView, DashboardFocus, LogsTab, PendingWrite, Popup};
use crate::common::csv::export_table_to_csv;
use crate::common::notify::Notification;
use crate::common::utils::{clamp_selection, select_next, select_previous};
use crate::event::{DropdownKind, Event};
use crate::options::OptionValue;
use crate::options::checks::{CHECK_TYPES, CheckForm};
use crate::options::dropdowns::Dropdown;
use crate::options::logs::debug_log_columns;
use crate::pages;
use crate::store::tree::flatten;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;
use serde_json::json;
use tokio::sync::mpsc::UnboundedSender;

const SPLITTER_STEP: f64 = 5.0;
const SPLITTER_RANGE: (f64, f64) = (25.0, 75.0);
const CLIENT_SPLITTER_RANGE: (u16, u16) = (5, 60);
const SNOOZE_DAYS: u32 = 1;

impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if let Some(popup) = self.popup.take() {
            self.handle_popup_key(popup, key, tx);
            return;
        }

        if self.session_expired {
            match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('r') => self.login(tx),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.popup = Some(Popup::Help);
                return;
            }
            KeyCode::Char(c @ '1'..='6') => {
                let i = c as usize - '1' as usize;
                self.switch_view(CurrentView::ALL[i], tx);
                return;
            }
            KeyCode::Char('R') => {
                self.notify(Notification::info("Refreshing"));
                self.refresh_current(tx);
                return;
            }
            KeyCode::Char('L') => {
                self.logout();
                return;
            }
            KeyCode::Char('e') if self.current_view != CurrentView::Dashboard || self.focus != DashboardFocus::Tabs => {
                self.export_current();
                return;
            }
            _ => {}
        }

        match self.current_view {
            CurrentView::Dashboard => self.dashboard_key(key, tx),
            CurrentView::Alerts => self.alerts_key(key, tx),
            CurrentView::Policies => self.policies_key(key, tx),
            CurrentView::Logs => self.logs_key(key, tx),
            CurrentView::Scripts => self.scripts_key(key, tx),
            CurrentView::Admin => self.admin_key(key, tx),
        }
    }

    fn switch_view(&mut self, view: CurrentView, tx: UnboundedSender<Event>) {
        if self.current_view == view {
            return;
        }
        self.current_view = view;
        self.refresh_current(tx);
    }

    /// Popups own the keyboard while open. Handlers put the popup back
    /// unless the key closed it.
    fn handle_popup_key(&mut self, popup: Popup, key: KeyEvent, tx: UnboundedSender<Event>) {
        match popup {
            Popup::Help => {}
            Popup::Message { .. } if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) => {}
            Popup::Confirm { write, .. } if matches!(key.code, KeyCode::Char('y') | KeyCode::Enter) => {
                self.confirm_write(write, tx);
            }
            Popup::Confirm { .. } if matches!(key.code, KeyCode::Char('n') | KeyCode::Esc) => {}
            Popup::CheckType {
                agent,
                policy,
                mut state,
            } => match key.code {
                KeyCode::Esc => {}
                KeyCode::Char('j') | KeyCode::Down => {
                    select_next(&mut state, CHECK_TYPES.len());
                    self.popup = Some(Popup::CheckType { agent, policy, state });
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    select_previous(&mut state, CHECK_TYPES.len());
                    self.popup = Some(Popup::CheckType { agent, policy, state });
                }
                KeyCode::Enter => {
                    let check_type = CHECK_TYPES[state.selected().unwrap_or(0)];
                    self.add_check_of_type(check_type, agent, policy, tx);
                }
                _ => self.popup = Some(Popup::CheckType { agent, policy, state }),
            },
            Popup::CheckForm { form, field } => self.check_form_key(form, field, key, tx),
            Popup::AgentPicker(mut dropdown) => match key.code {
                KeyCode::Esc => {}
                KeyCode::Enter => {
                    if let Some(OptionValue::Key(agent_id)) = dropdown.selected().and_then(|o| o.value().cloned()) {
                        self.debug_log.set_agent(Some(agent_id));
                        self.fetch_logs(tx);
                    }
                }
                KeyCode::Down => {
                    dropdown.step(1);
                    self.popup = Some(Popup::AgentPicker(dropdown));
                }
                KeyCode::Up => {
                    dropdown.step(-1);
                    self.popup = Some(Popup::AgentPicker(dropdown));
                }
                KeyCode::Backspace => {
                    let mut needle = dropdown.needle.clone();
                    needle.pop();
                    dropdown.set_needle(&needle);
                    self.popup = Some(Popup::AgentPicker(dropdown));
                }
                KeyCode::Char(c) => {
                    let needle = format!("{}{}", dropdown.needle, c);
                    dropdown.set_needle(&needle);
                    self.popup = Some(Popup::AgentPicker(dropdown));
                }
                _ => self.popup = Some(Popup::AgentPicker(dropdown)),
            },
            Popup::NoteInput(mut note) => match key.code {
                KeyCode::Esc => {}
                KeyCode::Enter => {
                    if let (false, Some(agent_id)) = (note.trim().is_empty(), self.store.selected_agent_id().map(str::to_string)) {
                        self.save_note(agent_id, note, tx);
                    }
                }
                KeyCode::Backspace => {
                    note.pop();
                    self.popup = Some(Popup::NoteInput(note));
                }
                KeyCode::Char(c) => {
                    note.push(c);
                    self.popup = Some(Popup::NoteInput(note));
                }
                _ => self.popup = Some(Popup::NoteInput(note)),
            },
            other => self.popup = Some(other),
        }
    }

    fn check_form_key(&mut self, mut form: Box<CheckForm>, mut field: usize, key: KeyEvent, tx: UnboundedSender<Event>) {
        // Nothing but Esc while a save is in flight.
        if form.loading && key.code != KeyCode::Esc {
            self.popup = Some(Popup::CheckForm { form, field });
            return;
        }
        let fields = form.fields();
        let current = fields.get(field).copied();
        match key.code {
            KeyCode::Esc => return,
            KeyCode::Down | KeyCode::Tab => field = (field + 1) % fields.len().max(1),
            KeyCode::Up | KeyCode::BackTab => field = field.checked_sub(1).unwrap_or(fields.len().saturating_sub(1)),
            KeyCode::Left => {
                if let Some(f) = current {
                    form.cycle(f, -1);
                }
            }
            KeyCode::Right => {
                if let Some(f) = current {
                    form.cycle(f, 1);
                }
            }
            KeyCode::Backspace => {
                if let Some(f) = current {
                    form.pop_char(f);
                }
            }
            KeyCode::Char(c) => {
                if let Some(f) = current {
                    form.push_char(f, c);
                }
            }
            KeyCode::Enter => match form.validate() {
                Ok(()) => {
                    form.loading = true;
                    self.submit_check_form((*form).clone(), tx);
                }
                Err(e) => self.notify(Notification::negative(e)),
            },
            _ => {}
        }
        self.popup = Some(Popup::CheckForm { form, field });
    }

    fn dashboard_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        match key.code {
            KeyCode::Tab => {
                self.focus = match self.focus {
                    DashboardFocus::Tree => DashboardFocus::Agents,
                    DashboardFocus::Agents => DashboardFocus::Tabs,
                    DashboardFocus::Tabs => DashboardFocus::Tree,
                };
            }
            KeyCode::Char('j') | KeyCode::Down => self.dashboard_step(true),
            KeyCode::Char('k') | KeyCode::Up => self.dashboard_step(false),
            KeyCode::Enter => match self.focus {
                DashboardFocus::Tree => {
                    if let Some(node) = self.selected_node() {
                        self.fetch_agents(node, tx);
                        self.focus = DashboardFocus::Agents;
                    }
                }
                DashboardFocus::Agents => self.load_agent(tx),
                DashboardFocus::Tabs => {}
            },
            KeyCode::Char(']') | KeyCode::Right => self.switch_agent_tab(1, tx),
            KeyCode::Char('[') | KeyCode::Left => self.switch_agent_tab(-1, tx),
            KeyCode::Char('w') => {
                self.agent_filter = self.agent_filter.next();
                let len = self.visible_agents().len();
                clamp_selection(&mut self.agent_table_state, len);
            }
            KeyCode::Char('+') => self.move_splitter(SPLITTER_STEP),
            KeyCode::Char('-') => self.move_splitter(-SPLITTER_STEP),
            KeyCode::Char('>') => self.move_client_splitter(2, tx),
            KeyCode::Char('<') => self.move_client_splitter(-2, tx),
            _ if self.focus == DashboardFocus::Tabs => self.agent_tab_key(key, tx),
            _ => self.agent_action_key(key, tx),
        }
    }

    fn dashboard_step(&mut self, down: bool) {
        let (state, len) = match self.focus {
            DashboardFocus::Tree => (&mut self.tree_state, flatten(&self.store.tree).len()),
            DashboardFocus::Agents => {
                let len = self.visible_agents().len();
                (&mut self.agent_table_state, len)
            }
            DashboardFocus::Tabs => {
                let len = self.agent_tab_len();
                (&mut self.tab_table_state, len)
            }
        };
        if down {
            select_next(state, len);
        } else {
            select_previous(state, len);
        }
    }

    fn agent_tab_len(&self) -> usize {
        match self.agent_tab {
            AgentTab::Summary => 0,
            AgentTab::Checks => self.store.checks().map_or(0, |c| c.len()),
            AgentTab::Tasks => self.store.automated_tasks.len(),
            AgentTab::Software => self.store.installed_software.len(),
            AgentTab::Updates => self.store.win_updates.len(),
            AgentTab::Services => self.store.agent_services().len(),
            AgentTab::Notes => self.store.notes.len(),
        }
    }

    /// Opens the highlighted agent in the detail tabs.
    fn load_agent(&mut self, tx: UnboundedSender<Event>) {
        let Some(agent_id) = self.selected_agent().map(|a| a.agent_id.clone()) else {
            return;
        };
        if self.store.selected_row.as_deref() != Some(agent_id.as_str()) {
            self.store.destroy_sub_table();
            self.tab_table_state = TableState::default();
        }
        self.store.set_active_row(Some(agent_id.clone()));
        self.fetch_agent_summary(agent_id.clone(), tx.clone());
        self.fetch_agent_tab(agent_id, tx);
    }

    fn switch_agent_tab(&mut self, delta: isize, tx: UnboundedSender<Event>) {
        let len = AgentTab::ALL.len() as isize;
        let i = (self.agent_tab.index() as isize + delta).rem_euclid(len) as usize;
        self.agent_tab = AgentTab::ALL[i];
        self.tab_table_state = TableState::default();
        if let Some(agent_id) = self.store.selected_row.clone() {
            self.fetch_agent_tab(agent_id, tx);
        }
    }

    fn move_splitter(&mut self, delta: f64) {
        self.splitter = (self.splitter + delta).clamp(SPLITTER_RANGE.0, SPLITTER_RANGE.1);
        self.store.set_splitter(self.splitter);
    }

    fn move_client_splitter(&mut self, delta: i16, tx: UnboundedSender<Event>) {
        let current = self.store.prefs.client_tree_splitter as i16;
        let next = (current + delta).clamp(CLIENT_SPLITTER_RANGE.0 as i16, CLIENT_SPLITTER_RANGE.1 as i16) as u16;
        if next == self.store.prefs.client_tree_splitter {
            return;
        }
        self.store.set_client_splitter(next);
        self.save_ui_settings(json!({ "client_tree_splitter": next }), tx);
    }

    /// Actions on the highlighted (or opened) agent.
    fn agent_action_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        let agent = self
            .store
            .agent_summary
            .as_ref()
            .filter(|_| self.focus == DashboardFocus::Tabs)
            .or_else(|| self.selected_agent())
            .map(|a| (a.agent_id.clone(), a.hostname.clone(), a.maintenance_mode));
        let Some((agent_id, hostname, maintenance)) = agent else {
            return;
        };
        match key.code {
            KeyCode::Char('m') => self.toggle_maintenance(agent_id, !maintenance, tx),
            KeyCode::Char('p') => self.ping_agent(agent_id, hostname, tx),
            KeyCode::Char('c') => self.run_agent_checks(agent_id, tx),
            KeyCode::Char('b') => {
                self.popup = Some(Popup::Confirm {
                    message: format!("Reboot {} now?", hostname),
                    write: PendingWrite::RebootAgent(agent_id),
                });
            }
            _ => {}
        }
    }

    fn agent_tab_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        let Some(agent_id) = self.store.selected_row.clone() else {
            return;
        };
        let row = self.tab_table_state.selected();
        match (self.agent_tab, key.code) {
            (AgentTab::Checks, KeyCode::Char('a')) => self.open_check_type_popup(Some(agent_id), None),
            (AgentTab::Checks, KeyCode::Char('e')) => {
                if let Some(check) = row.and_then(|i| self.store.checks()?.get(i).cloned()) {
                    self.open_check_form(CheckForm::edit(check), tx);
                }
            }
            (AgentTab::Checks, KeyCode::Char('x')) => {
                if let Some(id) = row.and_then(|i| self.store.checks()?.get(i)?.id) {
                    self.reset_check(id, tx);
                }
            }
            (AgentTab::Checks, KeyCode::Char('d')) => {
                if let Some(check) = row.and_then(|i| self.store.checks()?.get(i)) {
                    if let Some(id) = check.id {
                        self.popup = Some(Popup::Confirm {
                            message: format!("Delete check \"{}\"?", check.description()),
                            write: PendingWrite::RemoveCheck(id),
                        });
                    }
                }
            }
            (AgentTab::Tasks, KeyCode::Char('r')) => {
                if let Some(id) = row.and_then(|i| self.store.automated_tasks.get(i)).map(|t| t.id) {
                    self.run_task(id, tx);
                }
            }
            (AgentTab::Software, KeyCode::Char('r')) => self.refresh_software(agent_id, tx),
            (AgentTab::Updates, KeyCode::Char('s')) => self.run_update_scan(agent_id, tx),
            (AgentTab::Updates, KeyCode::Char('i')) => self.run_update_install(agent_id, tx),
            (AgentTab::Updates, KeyCode::Char(c @ ('a' | 'g' | 'n'))) => {
                let action = match c {
                    'a' => "approve",
                    'g' => "ignore",
                    _ => "nothing",
                };
                let sorted = self.store.sorted_updates();
                if let Some(id) = row.and_then(|i| sorted.get(i)).map(|u| u.id) {
                    self.set_update_action(id, action, tx);
                }
            }
            (AgentTab::Services, KeyCode::Char(c @ ('s' | 't' | 'r'))) => {
                let action = match c {
                    's' => ServiceAction::Start,
                    't' => ServiceAction::Stop,
                    _ => ServiceAction::Restart,
                };
                if let Some(name) = row.and_then(|i| self.store.agent_services().get(i)).map(|s| s.name.clone()) {
                    self.service_action(agent_id, name, action, tx);
                }
            }
            (AgentTab::Notes, KeyCode::Char('n')) => self.popup = Some(Popup::NoteInput(String::new())),
            _ => self.agent_action_key(key, tx),
        }
    }

    fn alerts_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        let len = self.visible_alerts().len();
        let selected = self
            .alerts_state
            .selected()
            .and_then(|i| self.visible_alerts().get(i).map(|a| a.id));
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => select_next(&mut self.alerts_state, len),
            KeyCode::Char('k') | KeyCode::Up => select_previous(&mut self.alerts_state, len),
            KeyCode::Char('n') => {
                self.new_alerts_only = !self.new_alerts_only;
                let len = self.visible_alerts().len();
                clamp_selection(&mut self.alerts_state, len);
            }
            KeyCode::Char('r') => {
                if let Some(id) = selected {
                    self.alert_action(id, AlertAction::Resolve, tx);
                }
            }
            KeyCode::Char('s') => {
                if let Some(id) = selected {
                    self.alert_action(id, AlertAction::Snooze { days: SNOOZE_DAYS }, tx);
                }
            }
            KeyCode::Char('u') => {
                if let Some(id) = selected {
                    self.alert_action(id, AlertAction::Unsnooze, tx);
                }
            }
            KeyCode::Char('A') => {
                let ids = self
                    .visible_alerts()
                    .iter()
                    .filter(|a| !a.resolved)
                    .map(|a| a.id)
                    .collect();
                self.bulk_alert_action(ids, AlertAction::Resolve, tx);
            }
            _ => {}
        }
    }

    fn policies_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        let len = self.store.automation.policies.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => select_next(&mut self.policy_state, len),
            KeyCode::Char('k') | KeyCode::Up => select_previous(&mut self.policy_state, len),
            KeyCode::Enter => {
                let id = self
                    .policy_state
                    .selected()
                    .and_then(|i| self.store.automation.policies.get(i))
                    .map(|p| p.id);
                if let Some(id) = id {
                    self.store.automation.set_selected_policy(Some(id));
                    self.fetch_policy_details(id, tx);
                }
            }
            KeyCode::Char('a') => {
                if let Some(id) = self.store.automation.selected_policy {
                    self.open_check_type_popup(None, Some(id));
                }
            }
            _ => {}
        }
    }

    fn logs_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        let len = match self.logs_tab {
            LogsTab::Debug => self.debug_log.entries.len(),
            LogsTab::Audit => self.audit_logs.len(),
            LogsTab::Pending => self.pending_actions.len(),
        };
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => select_next(&mut self.logs_state, len),
            KeyCode::Char('k') | KeyCode::Up => select_previous(&mut self.logs_state, len),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => self.switch_logs_tab(true, tx),
            KeyCode::Char('h') | KeyCode::Left => self.switch_logs_tab(false, tx),
            KeyCode::Char('v') if self.logs_tab == LogsTab::Debug => {
                self.debug_log.next_level();
                self.fetch_logs(tx);
            }
            KeyCode::Char('t') if self.logs_tab == LogsTab::Debug => {
                self.debug_log.next_log_type();
                self.fetch_logs(tx);
            }
            KeyCode::Char('a') if self.logs_tab == LogsTab::Debug => {
                self.popup = Some(Popup::AgentPicker(Dropdown {
                    loading: true,
                    ..Default::default()
                }));
                self.fetch_agent_options(DropdownKind::LogAgent, tx);
            }
            KeyCode::Char('c') if self.logs_tab == LogsTab::Debug => {
                self.debug_log.set_agent(None);
                self.fetch_logs(tx);
            }
            KeyCode::Char('D') if self.logs_tab == LogsTab::Debug => self.download_debug_log(tx),
            KeyCode::Char('d') if self.logs_tab == LogsTab::Pending => {
                let action = self.logs_state.selected().and_then(|i| self.pending_actions.get(i));
                if let Some(action) = action {
                    self.popup = Some(Popup::Confirm {
                        message: format!(
                            "Delete pending action on {}?",
                            action.hostname.as_deref().unwrap_or("agent")
                        ),
                        write: PendingWrite::RemovePendingAction(action.id),
                    });
                }
            }
            _ => {}
        }
    }

    fn switch_logs_tab(&mut self, forward: bool, tx: UnboundedSender<Event>) {
        self.logs_tab = match (self.logs_tab, forward) {
            (LogsTab::Debug, true) | (LogsTab::Pending, false) => LogsTab::Audit,
            (LogsTab::Audit, true) | (LogsTab::Debug, false) => LogsTab::Pending,
            (LogsTab::Pending, true) | (LogsTab::Audit, false) => LogsTab::Debug,
        };
        self.logs_state = TableState::default();
        self.fetch_logs(tx);
    }

    fn scripts_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        let len = self.scripts.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => select_next(&mut self.scripts_state, len),
            KeyCode::Char('k') | KeyCode::Up => select_previous(&mut self.scripts_state, len),
            KeyCode::Char('c') => {
                let show = !self.store.prefs.show_community_scripts;
                self.store.prefs.show_community_scripts = show;
                self.save_ui_settings(json!({ "show_community_scripts": show }), tx.clone());
                self.fetch_scripts(tx);
            }
            KeyCode::Enter => {
                let script = self
                    .scripts_state
                    .selected()
                    .and_then(|i| self.scripts.get(i))
                    .map(|s| (s.id, s.name.clone()));
                if let Some((id, name)) = script {
                    self.fetch_script_code(id, name, tx);
                }
            }
            _ => {}
        }
    }

    fn admin_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        const TABS: [AdminTab; 4] = [AdminTab::Users, AdminTab::Roles, AdminTab::ApiKeys, AdminTab::CustomFields];
        let len = match self.admin_tab {
            AdminTab::Users => self.store.admin.users.len(),
            AdminTab::Roles => self.store.admin.roles.len(),
            AdminTab::ApiKeys => self.store.admin.api_keys.len(),
            AdminTab::CustomFields => self.store.admin.custom_fields.len(),
        };
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => select_next(&mut self.admin_state, len),
            KeyCode::Char('k') | KeyCode::Up => select_previous(&mut self.admin_state, len),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Left => {
                let i = TABS.iter().position(|t| *t == self.admin_tab).unwrap_or(0);
                let forward = matches!(key.code, KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab);
                let next = if forward { (i + 1) % TABS.len() } else { (i + TABS.len() - 1) % TABS.len() };
                self.admin_tab = TABS[next];
                self.admin_state = TableState::default();
            }
            KeyCode::Char('T') => self.setup_totp(tx),
            _ => {}
        }
    }

    /// Writes the table of the current view to `export.csv`.
    fn export_current(&mut self) {
        let notification = match (self.current_view, self.logs_tab) {
            (CurrentView::Dashboard, _) => {
                let rows: Vec<_> = self.visible_agents().into_iter().cloned().collect();
                export_table_to_csv(&rows, &pages::dashboard::agent_columns(), &self.export_dir)
            }
            (CurrentView::Alerts, _) => {
                let rows: Vec<_> = self.visible_alerts().into_iter().cloned().collect();
                export_table_to_csv(&rows, &pages::alerts::alert_columns(), &self.export_dir)
            }
            (CurrentView::Logs, LogsTab::Debug) => {
                export_table_to_csv(&self.debug_log.entries, &debug_log_columns(), &self.export_dir)
            }
            (CurrentView::Logs, LogsTab::Audit) => {
                export_table_to_csv(&self.audit_logs, &pages::logs::audit_columns(), &self.export_dir)
            }
            _ => Notification::warning("Nothing to export here"),
        };
        self.notify(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::client_for;
    use crate::api::types::CheckType;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app() -> App {
        App::new(client_for("http://127.0.0.1:9", Some("abc"), None), Some("tech".to_string()))
    }

    #[tokio::test]
    async fn test_help_closes_on_any_key() {
        let mut app = app();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        app.handle_key_event(key(KeyCode::Char('?')), tx.clone());
        assert!(matches!(app.popup, Some(Popup::Help)));
        app.handle_key_event(key(KeyCode::Char('x')), tx);
        assert!(app.popup.is_none());
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn test_confirm_cancel_keeps_nothing() {
        let mut app = app();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        app.popup = Some(Popup::Confirm {
            message: "Reboot?".to_string(),
            write: PendingWrite::RebootAgent("abc".to_string()),
        });
        app.handle_key_event(key(KeyCode::Char('n')), tx);
        assert!(app.popup.is_none());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_check_form_field_navigation_and_invalid_submit() {
        let mut app = app();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let form = CheckForm::new(CheckType::Cpuload, Some("abc".to_string()), None);
        app.popup = Some(Popup::CheckForm {
            form: Box::new(form),
            field: 0,
        });

        // Warning threshold: type 9, then error threshold: type 5.
        app.handle_key_event(key(KeyCode::Backspace), tx.clone());
        app.handle_key_event(key(KeyCode::Backspace), tx.clone());
        app.handle_key_event(key(KeyCode::Char('9')), tx.clone());
        app.handle_key_event(key(KeyCode::Down), tx.clone());
        app.handle_key_event(key(KeyCode::Backspace), tx.clone());
        app.handle_key_event(key(KeyCode::Backspace), tx.clone());
        app.handle_key_event(key(KeyCode::Char('5')), tx.clone());
        app.handle_key_event(key(KeyCode::Enter), tx);

        match &app.popup {
            Some(Popup::CheckForm { form, field }) => {
                assert_eq!(*field, 1);
                assert!(!form.loading);
            }
            other => panic!("form closed: {:?}", other),
        }
        assert!(app.notifications.latest().is_some());
    }

    #[tokio::test]
    async fn test_session_expired_screen_only_quits_or_logs_in() {
        let mut app = app();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        app.session_expired = true;
        app.handle_key_event(key(KeyCode::Char('2')), tx.clone());
        assert_eq!(app.current_view, CurrentView::Dashboard);
        app.handle_key_event(key(KeyCode::Char('r')), tx.clone());
        assert!(app.error.is_some());
        app.handle_key_event(key(KeyCode::Char('q')), tx);
        assert!(app.should_quit);
    }

    #[test]
    fn test_splitter_is_clamped() {
        let mut app = app();
        for _ in 0..20 {
            app.move_splitter(SPLITTER_STEP);
        }
        assert_eq!(app.splitter, SPLITTER_RANGE.1);
    }
}
