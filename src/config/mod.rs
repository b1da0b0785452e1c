//! Configuration module for the InPost courier adapter

use serde::Deserialize;
use serde_json::{Map, Value};
use config::{Config, ConfigError, Environment, File};
use std::path::PathBuf;
use url::Url;

pub const PRODUCTION_BASE_URL: &str = "https://api-shipx-pl.easypack24.net";
pub const SANDBOX_BASE_URL: &str = "https://sandbox-api-shipx-pl.easypack24.net";

/// Main adapter settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub parameters: InpostParameters,
}

/// ShipX API connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// Explicit API host; overrides `sandbox` when set
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub sandbox: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// Per-account shipment parameters
///
/// Optional fields are only sent to the courier when set.
#[derive(Debug, Clone, Deserialize)]
pub struct InpostParameters {
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default = "default_service")]
    pub service: String,
    #[serde(default = "default_label_type")]
    pub label_type: String,
    #[serde(default)]
    pub target_point: Option<String>,
    #[serde(default)]
    pub sending_method: Option<String>,
    /// Cash on delivery block, e.g. `{"amount": 12.5, "currency": "PLN"}`
    #[serde(default)]
    pub cod: Option<Value>,
    #[serde(default)]
    pub insurance: Option<Value>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_service() -> String {
    "inpost_courier_standard".to_string()
}

fn default_label_type() -> String {
    "normal".to_string()
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (prefixed with INPOST_)
    /// 2. config/local.toml (gitignored)
    /// 3. config/default.toml
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config_dir = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        let builder = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // INPOST_API__TOKEN, INPOST_PARAMETERS__ORGANIZATION_ID, etc.
            .add_source(
                Environment::with_prefix("INPOST")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
            );

        builder.build()?.try_deserialize()
    }
}

impl ApiSettings {
    /// API host the client talks to
    pub fn resolved_base_url(&self) -> Result<Url, ConfigError> {
        let raw = match self.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            Some(url) => url,
            None if self.sandbox => SANDBOX_BASE_URL,
            None => PRODUCTION_BASE_URL,
        };

        Url::parse(raw).map_err(|e| ConfigError::Message(format!("invalid api.base_url '{}': {}", raw, e)))
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: None,
            token: String::new(),
            sandbox: false,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl InpostParameters {
    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn label_type(&self) -> &str {
        &self.label_type
    }

    /// Organization id used in organization-scoped paths (empty when unset)
    pub fn organization_id(&self) -> &str {
        self.organization_id.as_deref().unwrap_or_default()
    }

    /// Cash on delivery block, only when configured as a key-value mapping
    pub fn cod_object(&self) -> Option<&Map<String, Value>> {
        self.cod.as_ref().and_then(Value::as_object)
    }

    /// Insurance block, only when configured as a key-value mapping
    pub fn insurance_object(&self) -> Option<&Map<String, Value>> {
        self.insurance.as_ref().and_then(Value::as_object)
    }
}

impl Default for InpostParameters {
    fn default() -> Self {
        InpostParameters {
            organization_id: None,
            service: default_service(),
            label_type: default_label_type(),
            target_point: None,
            sending_method: None,
            cod: None,
            insurance: None,
        }
    }
}
