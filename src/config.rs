use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable holding the hosted store endpoint
pub const STORE_URL_ENV: &str = "SUPABASE_URL";

/// Environment variable holding the privileged store access key
pub const STORE_KEY_ENV: &str = "SUPABASE_SERVICE_ROLE_KEY";

/// Prefix for layered environment overrides (`PET_RELAY_SERVICE__HTTP__PORT=9000`)
pub const ENV_PREFIX: &str = "PET_RELAY";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Which record store implementation backs the `pets` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Hosted Postgres reached through its REST endpoint
    Postgrest,
    /// Process-local tables, lost on exit
    Memory,
}

#[derive(Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub table: String,
    pub url: Option<String>,
    pub service_role_key: Option<String>,
    pub timeout_secs: u64,
}

// Keeps the access key out of logs.
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("backend", &self.backend)
            .field("table", &self.table)
            .field("url", &self.url)
            .field(
                "service_role_key",
                &self.service_role_key.as_ref().map(|_| "<redacted>"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    /// Load configuration from defaults, an optional file at `path`, and the
    /// process environment.
    pub fn load(path: &str) -> Result<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`], but store credentials are looked up through
    /// `env` instead of the process environment.
    pub fn load_with_env<F>(path: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = config::Config::builder()
            .set_default("service.name", "pet-relay")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 8787)?
            .set_default("store.backend", "postgrest")?
            .set_default("store.table", "pets")?
            .set_default("store.timeout_secs", 10)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("store.url", env(STORE_URL_ENV))?
            .set_override_option("store.service_role_key", env(STORE_KEY_ENV))?
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }
}
