use crate::api::accounts::{AccountsApi, UserQuery};
use crate::api::agents::{AgentQuery, AgentsApi, MaintenanceTarget};
use crate::api::alerts::{AlertAction, AlertFilter, AlertsApi};
use crate::api::automation::AutomationApi;
use crate::api::checks::ChecksApi;
use crate::api::clients::ClientsApi;
use crate::api::dashboard::{CoreApi, CustomFieldQuery};
use crate::api::logs::{AuditLogFilter, LogsApi};
use crate::api::message_from;
use crate::api::scripts::{ScriptDownloadQuery, ScriptQuery, ScriptsApi};
use crate::api::services::{ServiceAction, ServicesApi};
use crate::api::software::SoftwareApi;
use crate::api::tasks::TasksApi;
use crate::api::winupdates::WinUpdatesApi;
use crate::app::{AgentTab, App, CurrentView, LogsTab, PendingWrite};
use crate::common::notify::Notification;
use crate::error::{ApiError, ApiResult};
use crate::event::{DropdownKind, Event};
use crate::options::checks::{CheckForm, SubmitError};
use crate::options::dropdowns::{fetch_agent_options, fetch_script_options};
use serde_json::Value;
use std::future::Future;
use tokio::sync::mpsc::UnboundedSender;

/// Alerts older than this are not listed.
const ALERT_DAYS: u32 = 30;
const AUDIT_DAYS: u32 = 7;
const DEBUG_LOG_FILE: &str = "debug.log";
const TOTP_TITLE: &str = "Two-factor setup";
/// A 401 from `/login/` means rejected credentials, not an expired session.
const BAD_LOGIN: &str = "Invalid username, password or two-factor code";

/// Runs a request off the UI loop and posts the result back. A 401 turns into
/// `Event::SessionExpired` instead of a result.
pub(crate) fn spawn_request<T, Fut, W>(tx: UnboundedSender<Event>, request: Fut, wrap: W)
where
    T: Send + 'static,
    Fut: Future<Output = ApiResult<T>> + Send + 'static,
    W: FnOnce(Result<T, String>) -> Event + Send + 'static,
{
    tokio::spawn(async move {
        let event = match request.await {
            Err(e) if e.is_session_expired() => Event::SessionExpired,
            result => wrap(result.map_err(|e| e.to_string())),
        };
        let _ = tx.send(event);
    });
}

/// Writes report through `Event::ActionFinished`, which notifies and reloads.
fn spawn_write<Fut>(tx: UnboundedSender<Event>, request: Fut)
where
    Fut: Future<Output = ApiResult<String>> + Send + 'static,
{
    spawn_request(tx, request, Event::ActionFinished);
}

impl App {
    pub fn refresh_all(&mut self, tx: UnboundedSender<Event>) {
        self.fetch_dashboard_info(tx.clone());
        self.fetch_alerts(tx.clone());
        self.fetch_clients(tx.clone());
        if self.current_view != CurrentView::Dashboard {
            self.refresh_current(tx);
        }
    }

    /// Reloads whatever the current view shows.
    pub fn refresh_current(&mut self, tx: UnboundedSender<Event>) {
        match self.current_view {
            CurrentView::Dashboard => {
                self.fetch_clients(tx.clone());
                if let Some(node) = self.loaded_node.clone() {
                    self.fetch_agents(node, tx.clone());
                }
                if let Some(agent_id) = self.store.selected_row.clone() {
                    self.fetch_agent_summary(agent_id.clone(), tx.clone());
                    self.fetch_agent_tab(agent_id, tx);
                }
            }
            CurrentView::Alerts => self.fetch_alerts(tx),
            CurrentView::Policies => {
                self.fetch_policies(tx.clone());
                if let Some(id) = self.store.automation.selected_policy {
                    self.fetch_policy_details(id, tx);
                }
            }
            CurrentView::Logs => self.fetch_logs(tx),
            CurrentView::Scripts => self.fetch_scripts(tx),
            CurrentView::Admin => self.fetch_admin(tx),
        }
    }

    pub fn login(&mut self, tx: UnboundedSender<Event>) {
        let Some(creds) = self.client.credentials().cloned() else {
            self.error = Some("No credentials configured. Set TRMM_USERNAME and TRMM_PASSWORD.".to_string());
            return;
        };
        let mut client = self.client.clone();
        spawn_request(
            tx,
            async move {
                client.login(&creds).await.map_err(|e| {
                    if e.is_session_expired() {
                        ApiError::BadRequest(BAD_LOGIN.to_string())
                    } else {
                        e
                    }
                })?;
                Ok::<_, ApiError>(client.token().unwrap_or_default().to_string())
            },
            Event::LoggedIn,
        );
    }

    pub fn logout(&mut self) {
        let mut client = self.client.clone();
        tokio::spawn(async move {
            if let Err(e) = client.logout().await {
                tracing::warn!(error = %e, "logout request failed");
            }
        });
        self.client.set_token(None);
        self.store.destroy_token();
        self.session_expired = true;
        self.error = Some("Logged out.".to_string());
    }

    pub fn fetch_dashboard_info(&mut self, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_request(
            tx,
            async move { client.fetch_dashboard_info().await },
            Event::DashboardInfoFetched,
        );
    }

    pub fn fetch_version(&mut self, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_request(tx, async move { client.fetch_version().await }, Event::VersionFetched);
    }

    pub fn fetch_clients(&mut self, tx: UnboundedSender<Event>) {
        self.store.tree_loading = true;
        let client = self.client.clone();
        spawn_request(tx, async move { client.fetch_clients().await }, Event::ClientsFetched);
    }

    /// Loads the agent table for a tree node (`Client|id` / `Site|id`).
    pub fn fetch_agents(&mut self, node: String, tx: UnboundedSender<Event>) {
        if self.loaded_node.as_deref() != Some(node.as_str()) {
            self.agents.clear();
            self.agent_table_state.select(None);
        }
        self.loaded_node = Some(node.clone());
        self.store.agent_table_loading = true;
        let client = self.client.clone();
        let query = AgentQuery::for_tree_node(&node);
        spawn_request(
            tx,
            async move { client.fetch_agents(&query).await },
            move |result| Event::AgentsFetched(node, result),
        );
    }

    pub fn fetch_agent_summary(&mut self, agent_id: String, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        let id = agent_id.clone();
        spawn_request(
            tx,
            async move { client.fetch_agent(&id).await },
            move |result| Event::AgentSummaryFetched(agent_id, result),
        );
    }

    /// Loads the rows of the active detail tab.
    pub fn fetch_agent_tab(&mut self, agent_id: String, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        let id = agent_id.clone();
        match self.agent_tab {
            AgentTab::Summary => {}
            AgentTab::Checks => spawn_request(
                tx,
                async move { client.fetch_agent_checks(&id).await },
                move |r| Event::ChecksFetched(agent_id, r),
            ),
            AgentTab::Tasks => spawn_request(
                tx,
                async move { client.fetch_agent_tasks(&id).await },
                move |r| Event::TasksFetched(agent_id, r),
            ),
            AgentTab::Software => spawn_request(
                tx,
                async move { client.fetch_agent_software(&id).await },
                move |r| Event::SoftwareFetched(agent_id, r),
            ),
            AgentTab::Updates => spawn_request(
                tx,
                async move { client.fetch_agent_updates(&id).await },
                move |r| Event::UpdatesFetched(agent_id, r),
            ),
            AgentTab::Services => spawn_request(
                tx,
                async move { client.get_agent_services(&id).await },
                move |r| Event::ServicesFetched(agent_id, r),
            ),
            AgentTab::Notes => spawn_request(
                tx,
                async move { client.fetch_agent_notes(&id).await },
                move |r| Event::NotesFetched(agent_id, r),
            ),
        }
    }

    pub fn fetch_alerts(&mut self, tx: UnboundedSender<Event>) {
        self.alerts_loading = true;
        let client = self.client.clone();
        let filter = AlertFilter {
            resolved: Some(true),
            snoozed: Some(true),
            days: Some(ALERT_DAYS),
            ..Default::default()
        };
        spawn_request(tx, async move { client.fetch_alerts(&filter).await }, Event::AlertsFetched);
    }

    pub fn fetch_policies(&mut self, tx: UnboundedSender<Event>) {
        self.policies_loading = true;
        let client = self.client.clone();
        spawn_request(tx, async move { client.fetch_policies().await }, Event::PoliciesFetched);
    }

    pub fn fetch_policy_details(&mut self, id: i64, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_request(
            tx.clone(),
            async move { client.fetch_policy_checks(id).await },
            move |r| Event::PolicyChecksFetched(id, r),
        );
        let client = self.client.clone();
        spawn_request(
            tx,
            async move { client.fetch_policy_tasks(id).await },
            move |r| Event::PolicyTasksFetched(id, r),
        );
    }

    pub fn fetch_logs(&mut self, tx: UnboundedSender<Event>) {
        self.logs_loading = true;
        let client = self.client.clone();
        match self.logs_tab {
            LogsTab::Debug => {
                let query = self.debug_log.query.clone();
                spawn_request(
                    tx,
                    async move { crate::options::logs::fetch_debug_log(&client, &query).await },
                    Event::DebugLogFetched,
                );
            }
            LogsTab::Audit => {
                let filter = AuditLogFilter {
                    time_filter: Some(AUDIT_DAYS),
                    ..Default::default()
                };
                spawn_request(
                    tx,
                    async move { client.fetch_audit_logs(&filter).await },
                    Event::AuditLogsFetched,
                );
            }
            LogsTab::Pending => spawn_request(
                tx,
                async move { client.fetch_pending_actions().await },
                Event::PendingActionsFetched,
            ),
        }
    }

    pub fn fetch_scripts(&mut self, tx: UnboundedSender<Event>) {
        self.scripts_loading = true;
        let client = self.client.clone();
        let query = ScriptQuery {
            show_community_scripts: self.store.prefs.show_community_scripts,
        };
        spawn_request(tx, async move { client.fetch_scripts(&query).await }, Event::ScriptsFetched);
    }

    /// Shows a script's code in a popup.
    pub fn fetch_script_code(&mut self, id: i64, name: String, tx: UnboundedSender<Event>) {
        self.popup = Some(crate::app::Popup::Message {
            title: name.clone(),
            content: String::new(),
            loading: true,
        });
        let client = self.client.clone();
        let query = ScriptDownloadQuery {
            with_snippets: Some(true),
        };
        spawn_request(
            tx,
            async move {
                let value = client.download_script(id, &query).await?;
                Ok::<_, ApiError>(match value.get("code").and_then(Value::as_str) {
                    Some(code) => code.to_string(),
                    None => message_from(value),
                })
            },
            move |r| Event::TextFetched(name, r),
        );
    }

    pub fn setup_totp(&mut self, tx: UnboundedSender<Event>) {
        self.popup = Some(crate::app::Popup::Message {
            title: TOTP_TITLE.to_string(),
            content: String::new(),
            loading: true,
        });
        let client = self.client.clone();
        spawn_request(
            tx,
            async move { Ok::<_, ApiError>(totp_setup_text(client.setup_totp().await?)) },
            |r| Event::TextFetched(TOTP_TITLE.to_string(), r),
        );
    }

    pub fn fetch_admin(&mut self, tx: UnboundedSender<Event>) {
        self.admin_loading = true;
        let client = self.client.clone();
        spawn_request(
            tx.clone(),
            async move { client.fetch_users(&UserQuery::default()).await },
            Event::UsersFetched,
        );
        let client = self.client.clone();
        spawn_request(tx.clone(), async move { client.fetch_roles().await }, Event::RolesFetched);
        let client = self.client.clone();
        spawn_request(tx.clone(), async move { client.fetch_api_keys().await }, Event::ApiKeysFetched);
        let client = self.client.clone();
        spawn_request(
            tx,
            async move { client.fetch_custom_fields(&CustomFieldQuery::default()).await },
            Event::CustomFieldsFetched,
        );
    }

    pub fn fetch_agent_options(&mut self, kind: DropdownKind, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_request(
            tx,
            async move { fetch_agent_options(&client, false).await },
            move |r| Event::OptionsFetched(kind, r),
        );
    }

    pub fn fetch_script_options(&mut self, kind: DropdownKind, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        let community = self.store.prefs.show_community_scripts;
        spawn_request(
            tx,
            async move { fetch_script_options(&client, community, false).await },
            move |r| Event::OptionsFetched(kind, r),
        );
    }

    pub fn fetch_check_form_agent(&mut self, agent_id: String, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_request(
            tx,
            async move { client.fetch_agent(&agent_id).await },
            Event::CheckFormAgentFetched,
        );
    }

    /// Persists UI preferences; only failures are surfaced.
    pub fn save_ui_settings(&mut self, settings: Value, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_request(
            tx,
            async move { client.update_ui_settings(&settings).await },
            |r| match r {
                Ok(_) => Event::Notify(Notification::info("Preferences saved")),
                Err(e) => Event::Notify(Notification::negative(e)),
            },
        );
    }

    pub fn submit_check_form(&mut self, form: CheckForm, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        tokio::spawn(async move {
            let event = match form.submit(&client).await {
                Err(SubmitError::Api(e)) if e.is_session_expired() => Event::SessionExpired,
                result => Event::ActionFinished(result.map_err(|e| e.to_string())),
            };
            let _ = tx.send(event);
        });
    }

    // writes

    pub fn toggle_maintenance(&mut self, agent_id: String, enabled: bool, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_write(tx, async move {
            client
                .toggle_maintenance_mode(MaintenanceTarget::Agent, &agent_id, enabled)
                .await
        });
    }

    pub fn ping_agent(&mut self, agent_id: String, hostname: String, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_write(tx, async move {
            let value = client.ping_agent(&agent_id).await?;
            Ok::<_, ApiError>(match value.get("status").and_then(Value::as_str) {
                Some(status) => format!("{} is {}", hostname, status),
                None => message_from(value),
            })
        });
    }

    pub fn run_agent_checks(&mut self, agent_id: String, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_write(tx, async move { client.run_agent_checks(&agent_id).await });
    }

    pub fn reset_check(&mut self, id: i64, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_write(tx, async move { client.reset_check(id).await });
    }

    pub fn run_task(&mut self, id: i64, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_write(tx, async move { client.run_task(id, &Value::Null).await });
    }

    pub fn refresh_software(&mut self, agent_id: String, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_write(tx, async move { client.refresh_agent_software(&agent_id).await });
    }

    pub fn run_update_scan(&mut self, agent_id: String, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_write(tx, async move { client.run_agent_update_scan(&agent_id).await });
    }

    pub fn run_update_install(&mut self, agent_id: String, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_write(tx, async move { client.run_agent_update_install(&agent_id).await });
    }

    pub fn set_update_action(&mut self, id: i64, action: &'static str, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_write(tx, async move { client.edit_agent_update(id, action).await });
    }

    pub fn service_action(
        &mut self,
        agent_id: String,
        svc_name: String,
        action: ServiceAction,
        tx: UnboundedSender<Event>,
    ) {
        let client = self.client.clone();
        spawn_write(tx, async move {
            client
                .send_agent_service_action(&agent_id, &svc_name, action)
                .await
        });
    }

    pub fn save_note(&mut self, agent_id: String, note: String, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_write(tx, async move { client.save_note(&agent_id, &note).await });
    }

    pub fn alert_action(&mut self, id: i64, action: AlertAction, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        spawn_write(tx, async move { client.edit_alert(id, action).await });
    }

    pub fn bulk_alert_action(&mut self, ids: Vec<i64>, action: AlertAction, tx: UnboundedSender<Event>) {
        if ids.is_empty() {
            return;
        }
        let client = self.client.clone();
        spawn_write(tx, async move { client.bulk_alert_action(&ids, action).await });
    }

    pub fn download_debug_log(&mut self, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        let path = self.export_dir.join(DEBUG_LOG_FILE);
        spawn_write(tx, async move {
            client.download_debug_log(&path).await?;
            Ok::<_, ApiError>(format!("Debug log saved to {}", path.display()))
        });
    }

    /// Sends a write the user confirmed.
    pub fn confirm_write(&mut self, write: PendingWrite, tx: UnboundedSender<Event>) {
        let client = self.client.clone();
        match write {
            PendingWrite::RemoveCheck(id) => {
                spawn_write(tx, async move { client.remove_check(id).await })
            }
            PendingWrite::RemovePendingAction(id) => {
                spawn_write(tx, async move { client.remove_pending_action(id).await })
            }
            PendingWrite::RebootAgent(agent_id) => {
                spawn_write(tx, async move { client.reboot_agent(&agent_id).await })
            }
        }
    }
}

/// The backend answers with the new secret, or a bare string once a secret exists.
fn totp_setup_text(value: Value) -> String {
    match value {
        Value::Object(ref map) => {
            let field = |key: &str| map.get(key).and_then(Value::as_str).unwrap_or("").to_string();
            format!(
                "Add this account to your authenticator app.\n\nUser: {}\nSecret: {}\nURI: {}",
                field("username"),
                field("totp_key"),
                field("qr_url")
            )
        }
        other => message_from(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TrmmClient;
    use crate::api::test_server::{client_for, serve_once};
    use crate::config::{Credentials, TrmmConfig};
    use std::time::Duration;

    #[tokio::test]
    async fn test_spawn_request_maps_session_expiry() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        spawn_request(tx, async { Err::<(), _>(ApiError::SessionExpired) }, |_| Event::Tick);
        assert!(matches!(rx.recv().await, Some(Event::SessionExpired)));
    }

    #[tokio::test]
    async fn test_spawn_request_posts_errors_as_text() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        spawn_request(
            tx,
            async { Err::<String, _>(ApiError::BadRequest("Agent is offline".to_string())) },
            Event::ActionFinished,
        );
        match rx.recv().await {
            Some(Event::ActionFinished(Err(msg))) => assert_eq!(msg, "Agent is offline"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_agents_scopes_to_node() {
        let (url, handle) = serve_once(200, r#"[{"agent_id": "abc", "hostname": "SRV-01"}]"#).await;
        let mut app = App::new(client_for(&url, Some("abc"), None), None);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        app.fetch_agents("Site|4".to_string(), tx);
        assert!(app.store.agent_table_loading);

        match rx.recv().await {
            Some(Event::AgentsFetched(node, Ok(agents))) => {
                assert_eq!(node, "Site|4");
                assert_eq!(agents[0].hostname, "SRV-01");
            }
            other => panic!("unexpected event {:?}", other),
        }
        let request = handle.await.unwrap();
        assert!(request.starts_with("GET /agents/?site=4 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_rejected_login_is_an_error_not_expiry() {
        let (url, handle) = serve_once(401, r#"{"detail": "Bad credentials"}"#).await;
        let client = TrmmClient::new(TrmmConfig {
            api_url: url,
            api_token: None,
            api_key: None,
            credentials: Some(Credentials {
                username: "tech".to_string(),
                password: "wrong".to_string(),
                totp: None,
            }),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        let mut app = App::new(client, None);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        app.login(tx);

        match rx.recv().await {
            Some(Event::LoggedIn(Err(msg))) => assert_eq!(msg, BAD_LOGIN),
            other => panic!("unexpected event {:?}", other),
        }
        let request = handle.await.unwrap();
        assert!(request.starts_with("POST /login/ HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_setup_totp_shows_secret() {
        let body = r#"{"username": "tech", "totp_key": "JBSWY3DP", "qr_url": "otpauth://totp/tech"}"#;
        let (url, handle) = serve_once(200, body).await;
        let mut app = App::new(client_for(&url, Some("abc"), None), None);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        app.setup_totp(tx);
        assert!(matches!(app.popup, Some(crate::app::Popup::Message { loading: true, .. })));

        match rx.recv().await {
            Some(Event::TextFetched(title, Ok(text))) => {
                assert_eq!(title, TOTP_TITLE);
                assert!(text.contains("Secret: JBSWY3DP"));
                assert!(text.contains("URI: otpauth://totp/tech"));
            }
            other => panic!("unexpected event {:?}", other),
        }
        let request = handle.await.unwrap();
        assert!(request.starts_with("POST /accounts/users/setup_totp/ HTTP/1.1"));
    }

    #[test]
    fn test_totp_already_set_is_shown_as_is() {
        let text = totp_setup_text(Value::String("totp token already set".to_string()));
        assert_eq!(text, "totp token already set");
    }
}
