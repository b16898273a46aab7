use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub totp: Option<String>,
}

#[derive(Clone, Debug)]
pub struct TrmmConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub api_key: Option<String>,
    pub credentials: Option<Credentials>,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub trmm: TrmmConfig,
    pub tick_rate: Duration,
    pub log_file: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("TRMM_API_URL").context("TRMM_API_URL must be set")?;
        let api_url = api_url.trim().trim_end_matches('/').to_string();
        if api_url.is_empty() {
            anyhow::bail!("TRMM_API_URL must not be empty");
        }

        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let credentials = match (non_empty("TRMM_USERNAME"), non_empty("TRMM_PASSWORD")) {
            (Some(username), Some(password)) => Some(Credentials {
                username,
                password,
                totp: non_empty("TRMM_TOTP"),
            }),
            (Some(_), None) => anyhow::bail!("TRMM_PASSWORD must be set when TRMM_USERNAME is"),
            _ => None,
        };

        let timeout_secs = match non_empty("TRMM_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .context("TRMM_TIMEOUT_SECS must be a whole number of seconds")?,
            None => 10,
        };

        let tick_ms = match non_empty("TRMM_TICK_MS") {
            Some(v) => v
                .parse::<u64>()
                .context("TRMM_TICK_MS must be a whole number of milliseconds")?,
            None => 250,
        };

        let trmm = TrmmConfig {
            api_url,
            api_token: non_empty("TRMM_API_TOKEN"),
            api_key: non_empty("TRMM_API_KEY"),
            credentials,
            timeout: Duration::from_secs(timeout_secs),
        };

        Ok(Self {
            trmm,
            tick_rate: Duration::from_millis(tick_ms),
            log_file: non_empty("TRMM_LOG_FILE").unwrap_or_else(|| "trmm_tui.log".to_string()),
        })
    }
}
