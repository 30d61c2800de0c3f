//! Shared error type for plugins.

use thiserror::Error;

/// Error raised by any plugin operation.
///
/// `MissingData`, `Parse`, and `Locked` come from the plugin's own extraction; the
/// network variants wrap what the HTTP client reported and are passed through unchanged.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Invalid URL: {input}: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("Unknown plugin '{id}'. Run `novelsource list` to see available plugins.")]
    UnknownPlugin { id: String },

    #[error("Plugin {plugin} does not support {operation}.")]
    Unsupported {
        plugin: &'static str,
        operation: &'static str,
    },

    // HTTP and network
    #[error("Network error: could not reach {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} when fetching: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read response body: {source}")]
    BodyRead { source: reqwest::Error },

    // Extraction
    #[error("Missing {what} at {url} (selector or structure may have changed)")]
    MissingData { what: String, url: String },

    #[error("Could not parse {what}: {reason}")]
    Parse { what: String, reason: String },

    #[error("Invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Premium or login-gated chapter. Callers can prompt the user to log in or purchase.
    #[error("Chapter is locked at {url}. You may need to log in via the site and purchase it.")]
    Locked { url: String },

    #[error("Settings error: {reason}")]
    Settings { reason: String },
}

impl PluginError {
    pub(crate) fn missing(what: impl Into<String>, url: impl Into<String>) -> Self {
        PluginError::MissingData {
            what: what.into(),
            url: url.into(),
        }
    }

    pub(crate) fn parse(what: impl Into<String>, reason: impl ToString) -> Self {
        PluginError::Parse {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    /// True when the failure is a premium gate rather than a scraping or network problem.
    pub fn is_locked(&self) -> bool {
        matches!(self, PluginError::Locked { .. })
    }
}
