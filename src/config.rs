//! Optional config file loading. Search order: ./novelsource.toml, then
//! $XDG_CONFIG_HOME/novelsource/config.toml (or ~/.config/novelsource/config.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file contents. All fields optional; only present keys override defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// HTTP User-Agent header.
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Delay in milliseconds between requests. Replaces every plugin's own delay.
    pub request_delay_ms: Option<u64>,
    /// Plugin settings file. Default: $XDG_CONFIG_HOME/novelsource/settings.toml.
    pub settings_path: Option<PathBuf>,
    /// Default body format of the `chapter` command: html, markdown, or text.
    pub output_format: Option<String>,
}

/// Search order: (1) ./novelsource.toml, (2) $XDG_CONFIG_HOME/novelsource/config.toml.
/// Missing file returns Ok(None). Invalid TOML or I/O error reading a present file returns Err.
pub fn load_config() -> Result<Option<Config>, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Cannot determine current directory: {}", e))?;
    let mut paths = vec![cwd.join("novelsource.toml")];
    if let Some(d) = dirs::config_dir() {
        paths.push(d.join("novelsource").join("config.toml"));
    }
    load_first(&paths)
}

/// Load the first of `paths` that exists.
fn load_first(paths: &[PathBuf]) -> Result<Option<Config>, String> {
    for path in paths {
        if path.exists() {
            return load_file(path).map(Some);
        }
    }
    Ok(None)
}

fn load_file(path: &Path) -> Result<Config, String> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
    toml::from_str(&s).map_err(|e| format!("Invalid config {}: {}", path.display(), e))
}
