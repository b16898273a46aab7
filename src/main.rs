pub mod api;
pub mod app;
pub mod app_keys;
pub mod app_requests;
pub mod common;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod options;
pub mod pages;
pub mod store;
pub mod tui;
pub mod ui;

use anyhow::Result;
use api::TrmmClient;
use app::App;
use config::Config;
use event::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    // Load config
    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {:#}", e);
        std::process::exit(1);
    });

    let _log_guard = logging::init_logging(&config);
    tracing::info!(api_url = %config.trmm.api_url, "starting");

    let mut client = TrmmClient::new(config.trmm.clone())?;

    // Username/password login unless a token or API key was given
    let mut username = None;
    if !client.is_authenticated() {
        if let Some(creds) = client.credentials().cloned() {
            match client.login(&creds).await {
                Ok(()) => username = Some(creds.username),
                Err(e) => {
                    tracing::warn!(error = %e, "login failed");
                    eprintln!("Warning: Login failed: {}", e);
                }
            }
        }
    }

    // Setup terminal
    let mut terminal = tui::init()?;
    tui::install_panic_hook();

    let mut app = App::new(client, username);
    let mut events = EventHandler::new(config.tick_rate);

    let res = app.run(&mut terminal, &mut events).await;

    // Restore terminal
    tui::restore()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "exited with error");
        println!("{err:?}");
    }

    Ok(())
}
