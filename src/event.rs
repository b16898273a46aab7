use crate::api::types::{
    Agent, Alert, ApiKey, AuditLogEntry, AutomatedTask, Check, Client, CustomField, DashboardInfo,
    DebugLogEntry, InstalledSoftware, Note, PendingAction, Policy, Role, Script, User, WinService,
    WinUpdate,
};
use crate::common::notify::Notification;
use crate::options::SelectOption;
use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, MouseEvent};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;

/// Which dropdown a batch of options belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropdownKind {
    LogAgent,
    CheckScript,
}

#[derive(Clone, Debug)]
pub enum Event {
    Tick,
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Any request answered 401.
    SessionExpired,
    Notify(Notification),
    LoggedIn(Result<String, String>),
    DashboardInfoFetched(Result<DashboardInfo, String>),
    VersionFetched(Result<String, String>),
    ClientsFetched(Result<Vec<Client>, String>),
    AgentsFetched(String, Result<Vec<Agent>, String>), // (tree node raw key, Result)
    AgentSummaryFetched(String, Result<Agent, String>), // (agent id, Result)
    ChecksFetched(String, Result<Vec<Check>, String>),
    TasksFetched(String, Result<Vec<AutomatedTask>, String>),
    SoftwareFetched(String, Result<Vec<InstalledSoftware>, String>),
    UpdatesFetched(String, Result<Vec<WinUpdate>, String>),
    ServicesFetched(String, Result<Vec<WinService>, String>),
    NotesFetched(String, Result<Vec<Note>, String>),
    AlertsFetched(Result<Vec<Alert>, String>),
    PoliciesFetched(Result<Vec<Policy>, String>),
    PolicyChecksFetched(i64, Result<Vec<Check>, String>),
    PolicyTasksFetched(i64, Result<Vec<AutomatedTask>, String>),
    DebugLogFetched(Result<Vec<DebugLogEntry>, String>),
    AuditLogsFetched(Result<Vec<AuditLogEntry>, String>),
    PendingActionsFetched(Result<Vec<PendingAction>, String>),
    ScriptsFetched(Result<Vec<Script>, String>),
    TextFetched(String, Result<String, String>), // (popup title, Result)
    UsersFetched(Result<Vec<User>, String>),
    RolesFetched(Result<Vec<Role>, String>),
    ApiKeysFetched(Result<Vec<ApiKey>, String>),
    CustomFieldsFetched(Result<Vec<CustomField>, String>),
    OptionsFetched(DropdownKind, Result<Vec<SelectOption>, String>),
    CheckFormAgentFetched(Result<Agent, String>),
    /// A write finished; the message is shown and the current view reloaded.
    ActionFinished(Result<String, String>),
}

#[derive(Debug)]
pub struct EventHandler {
    _tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: std::time::Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let _tx = tx.clone();
        let task_tx = tx.clone();
        let _task = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                let tick_delay = interval.tick();
                let crossterm_event = reader.next().fuse();
                let event = tokio::select! {
                    _ = tick_delay => Some(Event::Tick),
                    Some(Ok(evt)) = crossterm_event => match evt {
                        CrosstermEvent::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                            Some(Event::Key(key))
                        }
                        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                        _ => None,
                    },
                };
                // The receiver is gone once the app has quit.
                if let Some(event) = event {
                    if task_tx.send(event).is_err() {
                        break;
                    }
                }
            }
        });
        Self { _tx, rx, _task }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self._tx.clone()
    }

    pub async fn next(&mut self) -> Result<Event> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("Unable to get event"))
    }
}
