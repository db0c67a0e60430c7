// src/config.rs

//! Client configuration.
//!
//! A [`Config`] can be deserialized from a JSON file, assembled from
//! `LIGHTNING_*` environment variables, or built in code. Every field has a
//! default, so partial files are fine.

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use log::warn;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};
use crate::session::Credentials;

/// Process-wide configuration read from the environment on first use.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

pub const DEFAULT_HOST: &str = "http://localhost:3000";

// --- Top-Level Configuration Structure ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Lightning server.
    pub host: String,
    pub mode: Mode,
    /// Basic-auth credentials sent with every request.
    pub auth: Option<Credentials>,
    /// Per-request timeout in seconds; `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
    /// Send row-shaped fields (points, links, colors) as keyed objects.
    pub keyed_rows: bool,
    pub local: LocalConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            mode: Mode::Remote,
            auth: None,
            timeout_secs: None,
            keyed_rows: false,
            local: LocalConfig::default(),
        }
    }
}

/// Where visualizations are created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// On a Lightning server, over HTTP.
    #[default]
    Remote,
    /// As standalone HTML documents, no server involved.
    Local,
}

// --- Local Rendering ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocalConfig {
    /// Script that draws the inlined payload.
    pub script_url: String,
    /// CSS width of the container element.
    pub container_width: String,
    /// Container height in pixels.
    pub container_height: u32,
}

impl Default for LocalConfig {
    fn default() -> Self {
        LocalConfig {
            script_url: "lightning.js".to_string(),
            container_width: "100%".to_string(),
            container_height: 400,
        }
    }
}

impl Config {
    /// Defaults overridden by `LIGHTNING_HOST`, `LIGHTNING_MODE`,
    /// `LIGHTNING_USERNAME` / `LIGHTNING_PASSWORD` and
    /// `LIGHTNING_TIMEOUT_SECS`. Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();
        if let Some(host) = lookup("LIGHTNING_HOST") {
            config.host = host;
        }
        match lookup("LIGHTNING_MODE").as_deref() {
            Some("local") => config.mode = Mode::Local,
            Some("remote") | None => {}
            Some(other) => warn!("ignoring LIGHTNING_MODE={other:?}; expected remote or local"),
        }
        if let (Some(username), Some(password)) =
            (lookup("LIGHTNING_USERNAME"), lookup("LIGHTNING_PASSWORD"))
        {
            config.auth = Some(Credentials { username, password });
        }
        if let Some(raw) = lookup("LIGHTNING_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(secs) => config.timeout_secs = Some(secs),
                Err(e) => warn!("ignoring LIGHTNING_TIMEOUT_SECS={raw:?}: {e}"),
            }
        }
        config
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            VizError::config(format!("cannot read config {}: {e}", path.display()))
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
