//! # Router Configuration Module
//!
//! [`RouterConfig`] controls the handlers the router installs on its own:
//!
//! | Flag              | Default | Effect                                                   |
//! |-------------------|---------|----------------------------------------------------------|
//! | `options_enabled` | `true`  | Every registered path gets `options_handler(node)`       |
//! | `trace_enabled`   | `false` | Every registered path gets `trace_handler(node)`         |
//! | `add_head_on_get` | `true`  | `.get(h)` also installs HEAD as `head_handler(h)`        |
//!
//! The configuration is read when a path is registered, so changes only affect
//! routes registered afterwards.
//!
//! ## Environment Variables
//!
//! [`RouterConfig::from_env`] overrides the flags from:
//!
//! - `BRRTMUX_OPTIONS`
//! - `BRRTMUX_TRACE`
//! - `BRRTMUX_HEAD_ON_GET`
//!
//! Accepted values are `1/0`, `true/false`, `yes/no`, `on/off` (case-insensitive).
//! Anything else keeps the default.
//!
//! ## TOML
//!
//! ```rust
//! use brrtmux::config::RouterConfig;
//!
//! let config = RouterConfig::from_toml_str("trace = true\nhead_on_get = false\n")?;
//! assert!(config.options_enabled);
//! assert!(config.trace_enabled);
//! assert!(!config.add_head_on_get);
//! # Ok::<(), brrtmux::config::ConfigError>(())
//! ```

use std::env;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use crate::handlers::{
    default_head_handler, default_options_handler, default_trace_handler, BoxedHandler,
};
use crate::router::RouteNode;

pub const ENV_OPTIONS: &str = "BRRTMUX_OPTIONS";
pub const ENV_TRACE: &str = "BRRTMUX_TRACE";
pub const ENV_HEAD_ON_GET: &str = "BRRTMUX_HEAD_ON_GET";

/// Builds a handler for a freshly registered node (OPTIONS, TRACE).
pub type RouteHandlerFactory = Arc<dyn Fn(&RouteNode) -> BoxedHandler + Send + Sync>;

/// Wraps a GET handler into a HEAD handler.
pub type HandlerWrapper = Arc<dyn Fn(BoxedHandler) -> BoxedHandler + Send + Sync>;

/// Per-router configuration of the default-handler policy.
#[derive(Clone)]
pub struct RouterConfig {
    /// Install `options_handler` on every registered path
    pub options_enabled: bool,
    /// Builds the OPTIONS handler for a node when it is registered.
    ///
    /// The node passed in is a snapshot at registration time; methods added
    /// later are not visible through it. A handler that needs the node's
    /// current method set should read [`Request::route`](crate::server::Request::route)
    /// at dispatch time, as the default `Allow` handler does.
    pub options_handler: RouteHandlerFactory,
    /// Install `trace_handler` on every registered path
    pub trace_enabled: bool,
    pub trace_handler: RouteHandlerFactory,
    /// Install HEAD as `head_handler(get)` whenever GET is set
    pub add_head_on_get: bool,
    pub head_handler: HandlerWrapper,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            options_enabled: true,
            options_handler: Arc::new(default_options_handler),
            trace_enabled: false,
            trace_handler: Arc::new(default_trace_handler),
            add_head_on_get: true,
            head_handler: Arc::new(default_head_handler),
        }
    }
}

impl fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterConfig")
            .field("options_enabled", &self.options_enabled)
            .field("trace_enabled", &self.trace_enabled)
            .field("add_head_on_get", &self.add_head_on_get)
            .finish_non_exhaustive()
    }
}

/// Flag overrides as they appear in a TOML file. Missing keys keep the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterSettings {
    pub options: Option<bool>,
    pub trace: Option<bool>,
    pub head_on_get: Option<bool>,
}

/// Configuration loading error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read
    Io {
        /// Path that was read
        path: String,
        /// Underlying I/O error message
        message: String,
    },
    /// The configuration is not valid TOML or has unknown keys
    Parse {
        /// Parser error message
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => {
                write!(f, "router configuration error: cannot read '{path}': {message}")
            }
            ConfigError::Parse { message } => {
                write!(f, "router configuration error: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a boolean flag value; `None` if it is not recognised.
#[must_use]
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl RouterConfig {
    /// Defaults overridden by `BRRTMUX_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `BRRTMUX_*` keys.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str, default: bool| match lookup(key) {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                warn!(key = %key, value = %raw, default = default, "Unrecognised flag value, using default");
                default
            }),
            None => default,
        };

        let defaults = Self::default();
        Self {
            options_enabled: flag(ENV_OPTIONS, defaults.options_enabled),
            trace_enabled: flag(ENV_TRACE, defaults.trace_enabled),
            add_head_on_get: flag(ENV_HEAD_ON_GET, defaults.add_head_on_get),
            ..defaults
        }
    }

    /// Defaults overridden by a TOML document with `options`, `trace` and
    /// `head_on_get` keys.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let settings: RouterSettings = toml::from_str(source).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        let mut config = Self::default();
        config.apply(settings);
        Ok(config)
    }

    /// Like [`from_toml_str`](Self::from_toml_str), reading the document from a file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Apply flag overrides, leaving unset flags and all factories untouched.
    pub fn apply(&mut self, settings: RouterSettings) {
        if let Some(options) = settings.options {
            self.options_enabled = options;
        }
        if let Some(trace) = settings.trace {
            self.trace_enabled = trace;
        }
        if let Some(head_on_get) = settings.head_on_get {
            self.add_head_on_get = head_on_get;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert!(config.options_enabled);
        assert!(!config.trace_enabled);
        assert!(config.add_head_on_get);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = [(ENV_TRACE, "yes"), (ENV_OPTIONS, "0")].into();
        let config = RouterConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert!(config.trace_enabled);
        assert!(!config.options_enabled);
        assert!(config.add_head_on_get);
    }

    #[test]
    fn test_from_lookup_bad_value_keeps_default() {
        let config = RouterConfig::from_lookup(|key| {
            (key == ENV_HEAD_ON_GET).then(|| "sometimes".to_string())
        });
        assert!(config.add_head_on_get);
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        let err = RouterConfig::from_toml_str("tracing = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        let config = RouterConfig::from_toml_str("").unwrap();
        assert!(config.options_enabled);
        assert!(!config.trace_enabled);
    }
}
