//! Service configuration.
//!
//! Loaded from the YAML file named by `WEBCODEC_CONFIG` when it is set, then
//! the `LISTEN` environment variable overrides the listen address.
//!
//! ```yaml
//! server:
//!   listen_addr: "0.0.0.0:8080"
//! negotiation:
//!   codecs: [json, jsonp, yaml]
//!   default_content_type: application/json
//!   callback_content_type: text/javascript
//!   callback_param: callback
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::codec::{CONTENT_TYPE_JSON, CONTENT_TYPE_JSONP, CodecRegistry};
use crate::negotiator::{ContentNegotiator, NegotiationSettings};

pub const CONFIG_ENV: &str = "WEBCODEC_CONFIG";
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub negotiation: NegotiationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NegotiationConfig {
    /// Built-in codec names, in lookup order
    pub codecs: Vec<String>,
    pub default_content_type: String,
    pub callback_content_type: String,
    /// Query parameter carrying the callback name
    pub callback_param: String,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            codecs: vec!["json".to_string(), "jsonp".to_string(), "yaml".to_string()],
            default_content_type: CONTENT_TYPE_JSON.to_string(),
            callback_content_type: CONTENT_TYPE_JSONP.to_string(),
            callback_param: "callback".to_string(),
        }
    }
}

impl Config {
    /// Load from `WEBCODEC_CONFIG` (defaults when unset), then apply `LISTEN`.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = listen_addr;
        }
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to null; treat it as all defaults.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Failed to parse YAML config")
    }

    /// Build the negotiator described by the `negotiation` section.
    pub fn negotiator(&self) -> anyhow::Result<ContentNegotiator> {
        let registry = CodecRegistry::from_names(self.negotiation.codecs.as_slice())?;
        let settings = NegotiationSettings {
            default_content_type: self.negotiation.default_content_type.clone(),
            callback_content_type: self.negotiation.callback_content_type.clone(),
        };
        ContentNegotiator::new(registry, settings).context("Invalid negotiation config")
    }
}
