//! Lightweight configuration loader.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (nested keys split on `__`, e.g. `APP_API__BASE_URL`).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::error::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    /// Sent as a bearer token when non-empty.
    #[serde(default)]
    pub token: Option<String>,
    /// Per-request bound on the HTTP client, module loads included.
    pub timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), token: None, timeout_ms: 15_000 }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration { Duration::from_millis(self.timeout_ms) }

    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    pub debounce_ms: u64,
    /// Bound the aggregator puts on one content search, whatever the searcher.
    /// Kept below `api.timeout_ms` so a slow search ends here and is treated
    /// as an empty remote result; the client bound still covers module loads.
    pub request_timeout_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { debounce_ms: 250, request_timeout_ms: 10_000 }
    }
}

impl SearchSettings {
    pub fn debounce(&self) -> Duration { Duration::from_millis(self.debounce_ms) }
    pub fn request_timeout(&self) -> Duration { Duration::from_millis(self.request_timeout_ms) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { filter: "info".to_string() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self::from_figment(figment);
        config.validate_for_env(env_name)?;
        Ok(config)
    }

    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to extract settings: {}", e))
    }

    fn validate_for_env(&self, env: &str) -> anyhow::Result<()> {
        let settings = self.settings()?;
        settings.validate()?;
        if matches!(env, "prod" | "production") && settings.api.base_url.starts_with("http://localhost") {
            return Err(Error::InvalidConfig("api.base_url points at localhost in production".into()).into());
        }
        Ok(())
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), Error> {
        if self.api.base_url.trim().is_empty() {
            return Err(Error::InvalidConfig("api.base_url must not be empty".into()));
        }
        if self.search.debounce_ms == 0 {
            return Err(Error::InvalidConfig("search.debounce_ms must be positive".into()));
        }
        if self.search.request_timeout_ms == 0 {
            return Err(Error::InvalidConfig("search.request_timeout_ms must be positive".into()));
        }
        Ok(())
    }
}
