//! novelsource: site plugins that turn novel-hosting pages into listings, novel details,
//! chapter bodies, and search results.

pub mod cli;
pub mod config;
pub mod filters;
pub mod formats;
pub mod model;
pub mod plugins;
pub mod settings;

// Re-exports for CLI and consumers.
pub use filters::{FilterDef, FilterKind, FilterOption, FilterSet, FilterValue, FilterValues};
pub use formats::{render_chapter, ChapterFormat, FormatError};
pub use model::{ChapterItem, NovelItem, NovelStatus, SourceNovel, SourcePage};
pub use plugins::{
    open, resolve_plugin, Plugin, PluginError, PluginId, PoliteClient, PoliteClientBuilder,
    PopularOptions,
};
pub use settings::{
    FileSettingsStore, MemorySettingsStore, SettingDef, SettingKind, SettingValue, SettingsStore,
};
