use crate::error::StashError;
use log::{debug, warn};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:9999/graphql";
pub const DEFAULT_FIELD_NAME: &str = "NextAgeDday";

/// Key baked in at build time for the fallback mode.
const FALLBACK_API_KEY: Option<&str> = option_env!("STASH_FALLBACK_API_KEY");

/// How the API key is sourced, and whether the custom field is ensured first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Never send a key; create the field when missing.
    #[default]
    NoKey,
    /// Use the given key or the built-in one; assume the field exists.
    Fallback,
    /// Refuse to run without a key; create the field when missing.
    Strict,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self {
            Mode::NoKey => "no-key",
            Mode::Fallback => "fallback",
            Mode::Strict => "strict",
        };
        f.write_str(v)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub ensure_field: bool,
    pub field_name: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Build the run configuration for `mode` from the raw settings.
    pub fn resolve(
        mode: Mode,
        endpoint: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self, StashError> {
        let endpoint = endpoint
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let api_key = api_key.filter(|k| !k.is_empty());

        let (api_key, ensure_field) = match mode {
            Mode::NoKey => {
                if api_key.is_some() {
                    debug!("Ignoring supplied API key in {} mode", mode);
                }
                (None, true)
            }
            Mode::Fallback => {
                let key = api_key.or_else(|| FALLBACK_API_KEY.map(str::to_string));
                if key.is_none() {
                    warn!("No API key supplied and no fallback key built in; sending none");
                }
                (key, false)
            }
            Mode::Strict => (Some(api_key.ok_or(StashError::MissingApiKey)?), true),
        };

        Ok(Self {
            endpoint,
            api_key,
            ensure_field,
            field_name: DEFAULT_FIELD_NAME.to_string(),
            timeout: None,
        })
    }

    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            ensure_field: true,
            field_name: DEFAULT_FIELD_NAME.to_string(),
            timeout: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("ensure_field", &self.ensure_field)
            .field("field_name", &self.field_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}
