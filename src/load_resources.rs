// src/load_resources.rs
use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::time::{interval, Duration};

use crate::utils::token_registry::TokenRegistry;

pub const SETTINGS_PATH_ENV: &str = "BALANCE_API_SETTINGS";
pub const LISTEN_ADDRESS_ENV: &str = "BALANCE_API_LISTEN";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub listen_address: String,
    pub log_filter: String,
    pub tokens_path: PathBuf,
    pub reload_interval_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0:3000".to_string(),
            log_filter: "info".to_string(),
            tokens_path: PathBuf::from("./config/tokens.json"),
            reload_interval_secs: 300,
        }
    }
}

pub struct AppState {
    pub settings: Settings,
    pub tokens: Arc<TokenRegistry>,
}

impl AppState {
    pub fn new(settings: Settings, tokens: TokenRegistry) -> Self {
        Self {
            settings,
            tokens: Arc::new(tokens),
        }
    }
}

// Function to load JSON from a file
pub fn load_json(file_path: &Path) -> anyhow::Result<Value> {
    let file_content = fs::read_to_string(file_path)
        .with_context(|| format!("File not found: {}", file_path.display()))?;
    serde_json::from_str::<Value>(&file_content)
        .with_context(|| format!("Failed to parse JSON: {}", file_path.display()))
}

/// Reads settings from `BALANCE_API_SETTINGS` (default `./config/settings.json`).
/// A missing file falls back to defaults; `BALANCE_API_LISTEN` overrides the
/// listen address.
pub fn load_settings() -> anyhow::Result<Settings> {
    let path = env::var(SETTINGS_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./config/settings.json"));

    let mut settings = if path.exists() {
        let json = load_json(&path)?;
        serde_json::from_value::<Settings>(json)
            .with_context(|| format!("Invalid settings in {}", path.display()))?
    } else {
        Settings::default()
    };

    if let Ok(listen_address) = env::var(LISTEN_ADDRESS_ENV) {
        settings.listen_address = listen_address;
    }
    Ok(settings)
}

// Function to create AppState with the token registry loaded from disk
pub fn create_app_state(settings: Settings) -> anyhow::Result<AppState> {
    let tokens = TokenRegistry::new();
    let document = load_json(&settings.tokens_path)?;
    let loaded = tokens
        .replace_all(&document)
        .with_context(|| format!("Invalid token list in {}", settings.tokens_path.display()))?;
    tracing::info!("Loaded {} tokens from {}", loaded, settings.tokens_path.display());

    Ok(AppState::new(settings, tokens))
}

// Function to periodically reload tokens.json
pub async fn reload_tokens(state: Arc<AppState>) {
    let file_path = state.settings.tokens_path.clone();
    let mut interval = interval(Duration::from_secs(state.settings.reload_interval_secs.max(1)));
    // The first tick fires immediately and the file was just loaded.
    interval.tick().await;

    loop {
        interval.tick().await;

        let reloaded = load_json(&file_path)
            .and_then(|doc| state.tokens.replace_all(&doc).map_err(Into::into));
        match reloaded {
            Ok(count) => tracing::debug!("Tokens reloaded: {}", count),
            Err(e) => tracing::error!("Failed to reload {}: {:#}", file_path.display(), e),
        }
    }
}
