//! Site plugins. Plugin identity, the shared contract, the HTTP client, and one module per site.

mod client;
mod error;
mod html;

pub mod darkstar;
pub mod extract;
pub mod katreadingcafe;
pub mod mynovels;
pub mod mznovels;
pub mod studio;
pub mod url;

pub use client::{Headers, PoliteClient, PoliteClientBuilder};
pub use error::PluginError;

use crate::filters::{filter_set, FilterSet, FilterValues};
use crate::model::{NovelItem, SourceNovel, SourcePage};
use crate::settings::{SettingDef, SettingsStore};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Supported site. Static metadata lives here so hosts can list plugins without a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginId {
    DarkStarTranslations,
    KariStudio,
    NightStudio,
    KatReadingCafe,
    MyNovels,
    MzNovels,
}

impl PluginId {
    pub const ALL: [PluginId; 6] = [
        PluginId::DarkStarTranslations,
        PluginId::KariStudio,
        PluginId::NightStudio,
        PluginId::KatReadingCafe,
        PluginId::MyNovels,
        PluginId::MzNovels,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PluginId::DarkStarTranslations => "darkstartranslations",
            PluginId::KariStudio => "karistudio",
            PluginId::NightStudio => "nightstudio",
            PluginId::KatReadingCafe => "katreadingcafe",
            PluginId::MyNovels => "mynovels",
            PluginId::MzNovels => "mznovels",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PluginId::DarkStarTranslations => "DarkStar Translations",
            PluginId::KariStudio => "Kari Studio",
            PluginId::NightStudio => "Night Studio",
            PluginId::KatReadingCafe => "Kat Reading Cafe",
            PluginId::MyNovels => "MyNovels",
            PluginId::MzNovels => "MzNovels",
        }
    }

    /// Site origin without trailing slash.
    pub fn site(self) -> &'static str {
        match self {
            PluginId::DarkStarTranslations => darkstar::SITE,
            PluginId::KariStudio => studio::KARI_STUDIO.site,
            PluginId::NightStudio => studio::NIGHT_STUDIO.site,
            PluginId::KatReadingCafe => katreadingcafe::SITE,
            PluginId::MyNovels => mynovels::SITE,
            PluginId::MzNovels => mznovels::SITE,
        }
    }

    pub fn version(self) -> &'static str {
        match self {
            PluginId::NightStudio => "1.0.1",
            _ => "1.0.0",
        }
    }

    pub fn filters(self) -> FilterSet {
        filter_set(self)
    }

    pub fn settings(self) -> Vec<SettingDef> {
        match self {
            PluginId::MyNovels => vec![mynovels::hide_locked_setting()],
            _ => Vec::new(),
        }
    }

    /// Minimum spacing between requests the site tolerates.
    pub fn request_delay(self) -> Duration {
        match self {
            PluginId::DarkStarTranslations => Duration::from_secs(1),
            _ => Duration::ZERO,
        }
    }

    fn host(self) -> &'static str {
        self.site()
            .trim_start_matches("https://")
            .trim_end_matches('/')
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluginId {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PluginId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| PluginError::UnknownPlugin { id: s.to_string() })
    }
}

/// Every shipped plugin, in listing order.
pub fn all() -> &'static [PluginId] {
    &PluginId::ALL
}

/// Look up a plugin by id, ignoring case.
pub fn find(id: &str) -> Option<PluginId> {
    id.parse().ok()
}

/// Resolve a plugin from its id or from any URL on its site.
pub fn resolve_plugin(input: &str) -> Result<PluginId, PluginError> {
    if !input.contains("://") {
        return input.parse();
    }
    let url = Url::parse(input).map_err(|e| PluginError::InvalidUrl {
        input: input.to_string(),
        reason: e.to_string(),
    })?;
    let host = url.host_str().ok_or_else(|| PluginError::InvalidUrl {
        input: input.to_string(),
        reason: "URL has no host".to_string(),
    })?;
    let host = host.trim_start_matches("www.");
    PluginId::ALL
        .into_iter()
        .find(|id| id.host() == host)
        .ok_or_else(|| PluginError::UnknownPlugin {
            id: host.to_string(),
        })
}

/// Options for a listing request.
#[derive(Debug, Clone, Default)]
pub struct PopularOptions {
    /// Show the site's "latest updates" view instead of the filtered catalogue.
    pub show_latest: bool,
    pub filters: FilterValues,
}

/// Contract every site plugin implements.
///
/// Paths returned by the listing and search methods are accepted unchanged by
/// [Plugin::parse_novel] and [Plugin::parse_chapter]; chapter lists are oldest-first.
pub trait Plugin {
    fn id(&self) -> PluginId;

    fn name(&self) -> &'static str {
        self.id().name()
    }

    fn site(&self) -> &'static str {
        self.id().site()
    }

    fn version(&self) -> &'static str {
        self.id().version()
    }

    fn filters(&self) -> FilterSet {
        self.id().filters()
    }

    fn settings(&self) -> Vec<SettingDef> {
        self.id().settings()
    }

    /// Listing page `page` (1-based). Items missing a name or path are skipped.
    fn popular_novels(
        &mut self,
        page: u32,
        options: &PopularOptions,
    ) -> Result<Vec<NovelItem>, PluginError>;

    fn parse_novel(&mut self, path: &str) -> Result<SourceNovel, PluginError>;

    /// One page of the chapter list (1 = oldest). Only for sites with paged chapter lists.
    fn parse_page(&mut self, _path: &str, _page: u32) -> Result<SourcePage, PluginError> {
        Err(PluginError::Unsupported {
            plugin: self.id().as_str(),
            operation: "page-wise chapter loading",
        })
    }

    /// Chapter body as an HTML fragment with site chrome removed.
    fn parse_chapter(&mut self, path: &str) -> Result<String, PluginError>;

    fn search_novels(&mut self, term: &str, page: u32) -> Result<Vec<NovelItem>, PluginError>;

    fn resolve_url(&self, path: &str) -> String {
        url::resolve_path(self.site(), path)
    }
}

/// Build the plugin for `id` over a shared client. Settings are read once, here.
pub fn open<'a>(
    id: PluginId,
    client: &'a mut PoliteClient,
    settings: &dyn SettingsStore,
) -> Box<dyn Plugin + 'a> {
    client.set_delay(id.request_delay());
    match id {
        PluginId::DarkStarTranslations => Box::new(darkstar::DarkStarPlugin::new(client)),
        PluginId::KariStudio => Box::new(studio::StudioPlugin::new(client, &studio::KARI_STUDIO)),
        PluginId::NightStudio => {
            Box::new(studio::StudioPlugin::new(client, &studio::NIGHT_STUDIO))
        }
        PluginId::KatReadingCafe => Box::new(katreadingcafe::KatReadingCafePlugin::new(client)),
        PluginId::MyNovels => Box::new(mynovels::MyNovelsPlugin::new(client, settings)),
        PluginId::MzNovels => Box::new(mznovels::MzNovelsPlugin::new(client)),
    }
}

/// Check response status and read body as UTF-8.
pub(crate) fn check_response(
    response: reqwest::blocking::Response,
    url: &str,
) -> Result<String, PluginError> {
    let status = response.status();
    if !status.is_success() {
        return Err(PluginError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    response
        .text()
        .map_err(|e| PluginError::BodyRead { source: e })
}

/// GET `url` and return the body text.
pub(crate) fn fetch_text(
    client: &mut PoliteClient,
    url: &str,
    headers: Headers<'_>,
) -> Result<String, PluginError> {
    let response = client.get(url, headers).map_err(|e| PluginError::Network {
        url: url.to_string(),
        source: e,
    })?;
    check_response(response, url)
}

/// GET `url` and decode the body as JSON.
pub(crate) fn fetch_json<T: DeserializeOwned>(
    client: &mut PoliteClient,
    url: &str,
    headers: Headers<'_>,
) -> Result<T, PluginError> {
    let body = fetch_text(client, url, headers)?;
    serde_json::from_str(&body).map_err(|e| PluginError::parse(format!("JSON from {}", url), e))
}
