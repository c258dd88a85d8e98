use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config::from_env()
});

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 15;
const DEFAULT_EXTRACT_TIMEOUT_SECS: u64 = 8;

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    pub bind_addr: String,
    pub provider_timeout: Duration,
    pub extract_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Config {
        Config {
            provider: ProviderConfig {
                api_key: get_env_opt("GOOGLE_API_KEY"),
                project_id: get_env_opt("VERTEX_PROJECT_ID"),
                engine_id: get_env_opt("VERTEX_ENGINE_ID").or_else(|| get_env_opt("GOOGLE_CSE_ID")),
            },
            bind_addr: get_env_or_default("BIND_ADDR", DEFAULT_BIND_ADDR),
            provider_timeout: get_secs_or_default("PROVIDER_TIMEOUT_SECS", DEFAULT_PROVIDER_TIMEOUT_SECS),
            extract_timeout: get_secs_or_default("EXTRACT_TIMEOUT_SECS", DEFAULT_EXTRACT_TIMEOUT_SECS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            provider: ProviderConfig::default(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            extract_timeout: Duration::from_secs(DEFAULT_EXTRACT_TIMEOUT_SECS),
        }
    }
}

/// Credentials for the upstream search provider. Missing credentials are not an error,
/// they select the mock fallback.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub project_id: Option<String>,
    pub engine_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderBackend {
    VertexSearch {
        api_key: String,
        project_id: String,
        engine_id: String,
    },
    CustomSearch {
        api_key: String,
        cx: String,
    },
}

impl ProviderConfig {
    /// Picks the backend the present credentials are complete for.
    pub fn backend(&self) -> Option<ProviderBackend> {
        let api_key = non_empty(&self.api_key)?;
        let engine_id = non_empty(&self.engine_id)?;
        match non_empty(&self.project_id) {
            Some(project_id) => Some(ProviderBackend::VertexSearch {
                api_key,
                project_id,
                engine_id,
            }),
            None => Some(ProviderBackend::CustomSearch { api_key, cx: engine_id }),
        }
    }

    /// Names of the variables that are not set.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if non_empty(&self.api_key).is_none() {
            missing.push("GOOGLE_API_KEY");
        }
        if non_empty(&self.project_id).is_none() {
            missing.push("VERTEX_PROJECT_ID");
        }
        if non_empty(&self.engine_id).is_none() {
            missing.push("VERTEX_ENGINE_ID");
        }
        missing
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn get_env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_secs_or_default(key: &str, default: u64) -> Duration {
    let secs = env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default);
    Duration::from_secs(secs)
}
