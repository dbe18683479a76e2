use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use teloxide::types::{ChatId, UserId};

use crate::salesbot::agents::{self, Agent};

/// Environment variable consulted when the config file omits the token.
pub const TOKEN_ENV_VAR: &str = "TELEGRAM_TOKEN";

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    ReadFile { path: PathBuf, source: std::io::Error },
    /// Failed to parse JSON.
    ParseJson { path: PathBuf, source: serde_json::Error },
    /// Validation error.
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFile { path, source } => {
                write!(f, "failed to read config file '{}': {}", path.display(), source)
            }
            Self::ParseJson { path, source } => {
                write!(f, "failed to parse config file '{}': {}", path.display(), source)
            }
            Self::Validation(msg) => write!(f, "config validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFile { source, .. } => Some(source),
            Self::ParseJson { source, .. } => Some(source),
            Self::Validation(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    /// Telegram user IDs with access to the dashboard and reset commands.
    admin_ids: Vec<u64>,
    /// Bot token. Falls back to the TELEGRAM_TOKEN environment variable.
    telegram_bot_token: Option<String>,
    /// Link to the externally hosted lead-capture form.
    form_link: String,
    /// Human-agent roster. Defaults to the built-in list when omitted.
    agents: Option<Vec<Agent>>,
    /// Chat that receives WARN/ERROR log events (optional).
    alert_chat_id: Option<i64>,
    /// Directory for state files (database, logs). Defaults to current directory.
    data_dir: Option<String>,
}

pub struct Config {
    pub admin_ids: Vec<UserId>,
    pub telegram_bot_token: String,
    pub form_link: String,
    pub agents: Vec<Agent>,
    pub alert_chat_id: Option<ChatId>,
    /// Directory for state files (database, logs).
    pub data_dir: PathBuf,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| ConfigError::ReadFile { path: config_path.clone(), source: e })?;
        let file: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseJson { path: config_path.clone(), source: e })?;

        Self::from_file(file, std::env::var(TOKEN_ENV_VAR).ok())
    }

    fn from_file(file: ConfigFile, env_token: Option<String>) -> Result<Self, ConfigError> {
        if file.admin_ids.is_empty() {
            return Err(ConfigError::Validation("admin_ids must contain at least one admin ID".into()));
        }

        let token = resolve_token(file.telegram_bot_token, env_token)?;

        if !file.form_link.starts_with("http://") && !file.form_link.starts_with("https://") {
            return Err(ConfigError::Validation("form_link must be an http(s) URL".into()));
        }

        let agents = match file.agents {
            Some(list) if list.is_empty() => {
                return Err(ConfigError::Validation("agents must not be an empty list".into()));
            }
            Some(list) => list,
            None => agents::default_roster(),
        };

        let data_dir = file
            .data_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            admin_ids: file.admin_ids.into_iter().map(UserId).collect(),
            telegram_bot_token: token,
            form_link: file.form_link,
            agents,
            alert_chat_id: file.alert_chat_id.map(ChatId),
            data_dir,
        })
    }

    pub fn is_admin(&self, user_id: UserId) -> bool {
        self.admin_ids.contains(&user_id)
    }
}

/// Choose the bot token: file value wins, environment variable is the
/// fallback. Telegram tokens are formatted as {bot_id}:{secret} where
/// bot_id is numeric.
fn resolve_token(
    file_token: Option<String>,
    env_token: Option<String>,
) -> Result<String, ConfigError> {
    let token = file_token
        .filter(|t| !t.is_empty())
        .or(env_token)
        .ok_or_else(|| {
            ConfigError::Validation(format!(
                "telegram_bot_token is required (set it in the config file or via {TOKEN_ENV_VAR})"
            ))
        })?;

    let parts: Vec<&str> = token.split(':').collect();
    if parts.len() != 2 || parts[0].parse::<u64>().is_err() || parts[1].is_empty() {
        return Err(ConfigError::Validation(
            "telegram_bot_token appears invalid (expected format: 123456789:ABCdefGHI...)".into(),
        ));
    }

    Ok(token)
}
