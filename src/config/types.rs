use std::path::PathBuf;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::store::StoreConfig;
use crate::providers::ProviderConfig;

/// Environment variable pointing at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "SHORTSGEN_CONFIG";

/// Prefix for environment overrides, e.g. `SHORTSGEN_PROXY__SERVICE_KEY`.
pub const ENV_PREFIX: &str = "SHORTSGEN_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct ConfigV1 {
    pub bind_address: String,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    /// Identity providers used to authenticate proxy callers.
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
    #[serde(default)]
    pub backend: BackendConfig,
    /// The edge proxy route is only mounted when this section is present.
    pub proxy: Option<ProxyConfig>,
}

/// Load config from `./config.yaml` (or `$SHORTSGEN_CONFIG`), with
/// `SHORTSGEN_`-prefixed environment variables layered on top.
pub fn load_config() -> ConfigV1 {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "./config.yaml".to_string());
    let figment = Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__").ignore(&["config"]));
    let config = match figment.extract::<Config>() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };
    match config {
        Config::ConfigV1(c) => c,
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    match serde_json::to_string_pretty(&schema) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to render schema: {}", e),
    }
}

/// Settings for the provider chain.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_auth_timeout")]
    pub timeout_in_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            timeout_in_ms: default_auth_timeout(),
        }
    }
}

fn default_auth_timeout() -> u64 {
    3000
}

/// Where the generation backend keeps its artifacts and uploads.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct BackendConfig {
    #[serde(default = "default_videos_dir")]
    pub videos_dir: PathBuf,
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,
    /// Base URL used when handing out links to uploaded voice samples.
    #[serde(default = "default_public_url")]
    pub public_url: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            videos_dir: default_videos_dir(),
            uploads_dir: default_uploads_dir(),
            public_url: default_public_url(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_videos_dir() -> PathBuf {
    PathBuf::from("./videos")
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_public_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

/// Upstream generation service the edge proxy forwards to.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct ProxyConfig {
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,
    /// Sent as a bearer token on every forwarded request.
    pub service_key: String,
}

fn default_upstream_url() -> String {
    "http://localhost:8000".to_string()
}
