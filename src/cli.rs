//! CLI parsing and orchestration. Parses args, opens the plugin, runs one operation, and prints
//! the result as JSON (chapter bodies as HTML, Markdown, or text). Maps errors to exit codes.

use crate::config::{self, Config};
use crate::filters::{FilterSet, FilterValue, FilterValues};
use crate::formats::{write_chapter, write_json, ChapterFormat, FormatError};
use crate::plugins::{self, resolve_plugin, PluginError, PluginId, PoliteClient, PopularOptions};
use crate::settings::{
    FileSettingsStore, MemorySettingsStore, SettingKind, SettingValue, SettingsStore,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

/// CLI error carrying exit code and message.
#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Plugin(#[from] PluginError),

    #[error("{0}")]
    Format(#[from] FormatError),
}

impl CliRunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliRunError::InvalidInput(_) => 1,
            CliRunError::Plugin(_) => 2,
            CliRunError::Format(_) => 3,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "novelsource")]
#[command(about = "Browse, search, and read novels from supported sites as JSON")]
#[command(version)]
#[command(
    after_help = "Config file keys (user_agent, timeout_secs, request_delay_ms, settings_path, output_format) are read from ./novelsource.toml or the user config directory. CLI flags override config."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log requests and skipped items to stderr (same as RUST_LOG=debug).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// HTTP User-Agent (overrides config).
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Delay between requests in milliseconds (overrides config and the plugin's own delay).
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Request timeout in seconds (overrides config; default 30).
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Plugin settings file (overrides config).
    #[arg(long, global = true)]
    pub settings_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available plugins.
    List,

    /// Print a plugin's listing filters as JSON.
    Filters {
        /// Plugin id or any URL on its site.
        plugin: String,
    },

    /// List popular (or latest) novels.
    Popular {
        /// Plugin id or any URL on its site.
        plugin: String,

        /// Page number, starting at 1.
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Show the site's latest updates instead of the filtered catalogue.
        #[arg(long)]
        latest: bool,

        /// Filter as key=value. Lists are comma-separated; prefix with - to exclude, e.g. tags=+1,-2.
        #[arg(long = "filter", value_parser = parse_key_value)]
        filters: Vec<(String, String)>,
    },

    /// Print novel details and chapters (oldest first).
    Novel {
        plugin: String,
        /// Novel path as returned by `popular` or `search`, or its full URL.
        path: String,
    },

    /// Print one page of a novel's chapter list (page 1 holds the oldest chapters).
    Page {
        plugin: String,
        path: String,
        page: u32,
    },

    /// Print a chapter body.
    Chapter {
        plugin: String,
        path: String,

        /// Body format: html, markdown, or text (overrides config; default html).
        #[arg(long, value_parser = parse_format)]
        format: Option<ChapterFormat>,
    },

    /// Search novels by title.
    Search {
        plugin: String,
        term: String,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Show plugin settings, or update them with key=value pairs.
    Settings {
        plugin: String,

        #[arg(value_parser = parse_key_value)]
        values: Vec<(String, String)>,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected key=value, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Missing key in '{}'", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

fn parse_format(s: &str) -> Result<ChapterFormat, String> {
    s.parse()
}

#[derive(Debug, Serialize)]
struct PluginInfo {
    id: &'static str,
    name: &'static str,
    site: &'static str,
    version: &'static str,
}

/// A declared setting with its current value.
#[derive(Debug, Serialize)]
struct SettingState {
    key: &'static str,
    label: &'static str,
    description: &'static str,
    value: SettingValue,
}

fn plugin_arg(input: &str) -> Result<PluginId, CliRunError> {
    resolve_plugin(input).map_err(|e| CliRunError::InvalidInput(e.to_string()))
}

/// Turn `--filter key=value` pairs into values for `set`. Unknown keys are rejected.
fn filter_values(
    id: PluginId,
    set: &FilterSet,
    pairs: &[(String, String)],
) -> Result<FilterValues, CliRunError> {
    let mut values = FilterValues::new();
    for (key, raw) in pairs {
        let def = set.get(key).ok_or_else(|| {
            let known: Vec<_> = set.0.iter().map(|f| f.key).collect();
            let known = if known.is_empty() {
                "none".to_string()
            } else {
                known.join(", ")
            };
            CliRunError::InvalidInput(format!(
                "Unknown filter '{}' for {}. Available filters: {}",
                key, id, known
            ))
        })?;
        values.set(key.clone(), FilterValue::parse_for(&def.kind, raw));
    }
    Ok(values)
}

fn setting_states(id: PluginId, store: &dyn SettingsStore) -> Vec<SettingState> {
    id.settings()
        .into_iter()
        .map(|def| {
            let value = store.get(id.as_str(), def.key).unwrap_or(match def.kind {
                SettingKind::Switch { default } => SettingValue::Bool(default),
            });
            SettingState {
                key: def.key,
                label: def.label,
                description: def.description,
                value,
            }
        })
        .collect()
}

fn update_settings(
    id: PluginId,
    store: &mut dyn SettingsStore,
    pairs: &[(String, String)],
) -> Result<(), CliRunError> {
    let defs = id.settings();
    for (key, raw) in pairs {
        let def = defs.iter().find(|d| d.key == key).ok_or_else(|| {
            CliRunError::InvalidInput(format!("Unknown setting '{}' for {}.", key, id))
        })?;
        let value = SettingValue::parse(raw);
        match (&def.kind, &value) {
            (SettingKind::Switch { .. }, SettingValue::Bool(_)) => {}
            (SettingKind::Switch { .. }, _) => {
                return Err(CliRunError::InvalidInput(format!(
                    "Setting '{}' is a switch: use true or false, got '{}'.",
                    key, raw
                )))
            }
        }
        store.set(id.as_str(), def.key, value)?;
        tracing::debug!(plugin = %id, key = def.key, "setting updated");
    }
    Ok(())
}

fn open_settings(args: &Args, config: Option<&Config>) -> Result<Box<dyn SettingsStore>, CliRunError> {
    let path = args
        .settings_file
        .clone()
        .or_else(|| config.and_then(|c| c.settings_path.clone()))
        .or_else(FileSettingsStore::default_path);
    match path {
        Some(path) => Ok(Box::new(FileSettingsStore::open(path)?)),
        None => {
            tracing::warn!("no config directory; plugin settings will not be saved");
            Ok(Box::new(MemorySettingsStore::new()))
        }
    }
}

fn build_client(args: &Args, config: Option<&Config>) -> Result<PoliteClient, CliRunError> {
    let mut builder = PoliteClient::builder();
    if let Some(ua) = args
        .user_agent
        .clone()
        .or_else(|| config.and_then(|c| c.user_agent.clone()))
    {
        builder = builder.user_agent(ua);
    }
    if let Some(secs) = args.timeout.or_else(|| config.and_then(|c| c.timeout_secs)) {
        builder = builder.timeout_secs(secs);
    }
    if let Some(ms) = args
        .delay_ms
        .or_else(|| config.and_then(|c| c.request_delay_ms))
    {
        builder = builder.delay_ms(ms);
    }
    builder
        .build()
        .map_err(|e| CliRunError::InvalidInput(format!("Failed to create HTTP client: {}", e)))
}

/// Entry point for the CLI. Returns Ok(()) on success; Err with exit code and message on failure.
pub fn run(args: &Args) -> Result<(), CliRunError> {
    let config = config::load_config().map_err(CliRunError::InvalidInput)?;
    let config = config.as_ref();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &args.command {
        Command::List => {
            let infos: Vec<PluginInfo> = plugins::all()
                .iter()
                .map(|id| PluginInfo {
                    id: id.as_str(),
                    name: id.name(),
                    site: id.site(),
                    version: id.version(),
                })
                .collect();
            write_json(&mut out, &infos)?;
        }
        Command::Filters { plugin } => {
            let id = plugin_arg(plugin)?;
            write_json(&mut out, &id.filters())?;
        }
        Command::Settings { plugin, values } => {
            let id = plugin_arg(plugin)?;
            let mut store = open_settings(args, config)?;
            update_settings(id, store.as_mut(), values)?;
            write_json(&mut out, &setting_states(id, store.as_ref()))?;
        }
        command => {
            let store = open_settings(args, config)?;
            let mut client = build_client(args, config)?;
            run_plugin_command(command, config, &mut client, store.as_ref(), &mut out)?;
        }
    }
    out.flush().map_err(FormatError::from)?;
    Ok(())
}

/// Commands that talk to a site.
fn run_plugin_command<W: Write>(
    command: &Command,
    config: Option<&Config>,
    client: &mut PoliteClient,
    store: &dyn SettingsStore,
    out: &mut W,
) -> Result<(), CliRunError> {
    match command {
        Command::Popular {
            plugin,
            page,
            latest,
            filters,
        } => {
            let id = plugin_arg(plugin)?;
            let options = PopularOptions {
                show_latest: *latest,
                filters: filter_values(id, &id.filters(), filters)?,
            };
            let mut p = plugins::open(id, client, store);
            let items = p.popular_novels((*page).max(1), &options)?;
            tracing::debug!(plugin = %id, count = items.len(), "listing parsed");
            write_json(out, &items)?;
        }
        Command::Novel { plugin, path } => {
            let id = plugin_arg(plugin)?;
            let mut p = plugins::open(id, client, store);
            let novel = p.parse_novel(path)?;
            write_json(out, &novel)?;
        }
        Command::Page { plugin, path, page } => {
            let id = plugin_arg(plugin)?;
            let mut p = plugins::open(id, client, store);
            let page = p.parse_page(path, *page)?;
            write_json(out, &page)?;
        }
        Command::Chapter {
            plugin,
            path,
            format,
        } => {
            let id = plugin_arg(plugin)?;
            let format = match format {
                Some(f) => *f,
                None => match config.and_then(|c| c.output_format.as_deref()) {
                    Some(s) => s.parse().map_err(|e: String| {
                        CliRunError::InvalidInput(format!("Config output_format: {}", e))
                    })?,
                    None => ChapterFormat::default(),
                },
            };
            let mut p = plugins::open(id, client, store);
            let body = p.parse_chapter(path)?;
            write_chapter(out, &body, format)?;
        }
        Command::Search { plugin, term, page } => {
            let id = plugin_arg(plugin)?;
            if term.trim().is_empty() {
                return Err(CliRunError::InvalidInput(
                    "Search term must not be empty.".to_string(),
                ));
            }
            let mut p = plugins::open(id, client, store);
            let items = p.search_novels(term.trim(), (*page).max(1))?;
            write_json(out, &items)?;
        }
        Command::List | Command::Filters { .. } | Command::Settings { .. } => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_key_value_splits_on_first_equals() {
        assert_eq!(
            parse_key_value("tags=+1,-2").unwrap(),
            ("tags".to_string(), "+1,-2".to_string())
        );
        assert_eq!(
            parse_key_value(" sortBy = title|asc ").unwrap(),
            ("sortBy".to_string(), "title|asc".to_string())
        );
        assert_eq!(
            parse_key_value("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn parse_key_value_rejects_missing_parts() {
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn args_parse_popular_with_filters() {
        let args = Args::try_parse_from([
            "novelsource",
            "popular",
            "mznovels",
            "--page",
            "2",
            "--filter",
            "genres=1,-2",
            "--filter",
            "sort_by=views",
            "-v",
        ])
        .unwrap();
        assert!(args.verbose);
        match args.command {
            Command::Popular {
                plugin,
                page,
                latest,
                filters,
            } => {
                assert_eq!(plugin, "mznovels");
                assert_eq!(page, 2);
                assert!(!latest);
                assert_eq!(filters.len(), 2);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn args_parse_chapter_format() {
        let args = Args::try_parse_from([
            "novelsource",
            "chapter",
            "katreadingcafe",
            "https://katreadingcafe.com/x/",
            "--format",
            "md",
        ])
        .unwrap();
        assert!(matches!(
            args.command,
            Command::Chapter {
                format: Some(ChapterFormat::Markdown),
                ..
            }
        ));
        assert!(Args::try_parse_from(["novelsource", "chapter", "x", "y", "--format", "pdf"]).is_err());
    }

    #[test]
    fn filter_values_parse_by_kind() {
        let id = PluginId::MzNovels;
        let set = id.filters();
        let values = filter_values(
            id,
            &set,
            &[
                ("genres".to_string(), "1,-2".to_string()),
                ("sort_by".to_string(), "views".to_string()),
            ],
        )
        .unwrap();
        assert_eq!(
            values.get("genres"),
            Some(&FilterValue::Excludable {
                included: vec!["1".into()],
                excluded: vec!["2".into()],
            })
        );
        assert_eq!(values.get("sort_by"), Some(&FilterValue::Text("views".into())));
    }

    #[test]
    fn filter_values_reject_unknown_key() {
        let id = PluginId::MyNovels;
        let err = filter_values(id, &id.filters(), &[("genre".into(), "x".into())]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("Available filters: none"));
    }

    #[test]
    fn settings_show_defaults_and_accept_switch_values() {
        let mut store = MemorySettingsStore::new();
        let states = setting_states(PluginId::MyNovels, &store);
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].key, "hideLocked");
        assert_eq!(states[0].value, SettingValue::Bool(false));

        update_settings(
            PluginId::MyNovels,
            &mut store,
            &[("hideLocked".to_string(), "on".to_string())],
        )
        .unwrap();
        let states = setting_states(PluginId::MyNovels, &store);
        assert_eq!(states[0].value, SettingValue::Bool(true));
    }

    #[test]
    fn settings_reject_unknown_key_and_bad_value() {
        let mut store = MemorySettingsStore::new();
        let err = update_settings(
            PluginId::MyNovels,
            &mut store,
            &[("theme".to_string(), "dark".to_string())],
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 1);
        let err = update_settings(
            PluginId::MyNovels,
            &mut store,
            &[("hideLocked".to_string(), "sometimes".to_string())],
        )
        .unwrap_err();
        assert!(err.to_string().contains("switch"));
        assert!(update_settings(
            PluginId::DarkStarTranslations,
            &mut store,
            &[("hideLocked".to_string(), "true".to_string())],
        )
        .is_err());
    }

    #[test]
    fn plugin_arg_accepts_id_or_url() {
        assert_eq!(plugin_arg("nightstudio").unwrap(), PluginId::NightStudio);
        assert_eq!(
            plugin_arg("https://mznovels.com/novel/x/").unwrap(),
            PluginId::MzNovels
        );
        assert_eq!(plugin_arg("example").unwrap_err().exit_code(), 1);
    }

    #[test]
    fn cli_run_error_exit_codes() {
        assert_eq!(CliRunError::InvalidInput("x".into()).exit_code(), 1);
        assert_eq!(
            CliRunError::Plugin(PluginError::Locked { url: "x".into() }).exit_code(),
            2
        );
        assert_eq!(CliRunError::Format(FormatError::EmptyBody).exit_code(), 3);
    }
}
