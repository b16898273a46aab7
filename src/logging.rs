use crate::config::Config;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logs go to a file since the terminal belongs to the UI.
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init_logging(config: &Config) -> WorkerGuard {
    let path = Path::new(&config.log_file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|f| f.to_os_string())
        .unwrap_or_else(|| "trmm_tui.log".into());

    let (writer, guard) = tracing_appender::non_blocking(rolling::never(dir, file_name));
    let file_layer = fmt::layer().with_writer(writer).with_ansi(false);

    // RUST_LOG wins; otherwise info.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    guard
}
