//! Filter schema (what a host renders) and user-chosen filter values (what a listing request reads).

mod tables;

pub use tables::filter_set;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One selectable label/value pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub label: &'static str,
    pub value: &'static str,
}

/// Shorthand for building static option tables.
pub(crate) const fn opt(label: &'static str, value: &'static str) -> FilterOption {
    FilterOption { label, value }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FilterKind {
    /// Single choice.
    Picker {
        options: &'static [FilterOption],
        default: &'static str,
    },
    /// Any number of choices.
    CheckboxGroup {
        options: &'static [FilterOption],
        default: &'static [&'static str],
    },
    /// Choices that can each be included or excluded. Default is nothing chosen.
    ExcludableCheckboxGroup { options: &'static [FilterOption] },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterDef {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FilterKind,
}

/// Ordered, immutable filter declaration of one plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterSet(pub Vec<FilterDef>);

impl FilterSet {
    pub fn get(&self, key: &str) -> Option<&FilterDef> {
        self.0.iter().find(|f| f.key == key)
    }

    /// Chosen picker value, or the declared default when unset.
    pub fn picker(&self, values: &FilterValues, key: &str) -> String {
        match values.get(key) {
            Some(FilterValue::Text(v)) => v.clone(),
            _ => match self.get(key).map(|f| &f.kind) {
                Some(FilterKind::Picker { default, .. }) => default.to_string(),
                _ => String::new(),
            },
        }
    }

    /// Chosen checkbox values, or the declared default when unset.
    pub fn checkboxes(&self, values: &FilterValues, key: &str) -> Vec<String> {
        match values.get(key) {
            Some(FilterValue::List(v)) => v.clone(),
            _ => match self.get(key).map(|f| &f.kind) {
                Some(FilterKind::CheckboxGroup { default, .. }) => {
                    default.iter().map(|s| s.to_string()).collect()
                }
                _ => Vec::new(),
            },
        }
    }

    /// Chosen (included, excluded) values of an excludable group.
    pub fn excludable(&self, values: &FilterValues, key: &str) -> (Vec<String>, Vec<String>) {
        match values.get(key) {
            Some(FilterValue::Excludable { included, excluded }) => {
                (included.clone(), excluded.clone())
            }
            Some(FilterValue::List(v)) => (v.clone(), Vec::new()),
            _ => (Vec::new(), Vec::new()),
        }
    }

    /// True when every filter resolves to its declared default (nothing included or excluded
    /// for excludable groups).
    pub fn all_default(&self, values: &FilterValues) -> bool {
        self.0.iter().all(|def| match &def.kind {
            FilterKind::Picker { default, .. } => self.picker(values, def.key) == *default,
            FilterKind::CheckboxGroup { default, .. } => {
                let chosen = self.checkboxes(values, def.key);
                chosen.len() == default.len() && chosen.iter().zip(default.iter()).all(|(a, b)| a == b)
            }
            FilterKind::ExcludableCheckboxGroup { .. } => {
                let (included, excluded) = self.excludable(values, def.key);
                included.is_empty() && excluded.is_empty()
            }
        })
    }
}

/// A user's choice for one filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    List(Vec<String>),
    Excludable {
        included: Vec<String>,
        excluded: Vec<String>,
    },
}

impl FilterValue {
    /// Parse a command-line value for a filter of the given kind.
    ///
    /// Pickers take the value verbatim, checkbox groups a comma list, and excludable groups a
    /// comma list where `-x` excludes and `x` or `+x` includes.
    pub fn parse_for(kind: &FilterKind, raw: &str) -> FilterValue {
        let items = || {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        };
        match kind {
            FilterKind::Picker { .. } => FilterValue::Text(raw.trim().to_string()),
            FilterKind::CheckboxGroup { .. } => FilterValue::List(items()),
            FilterKind::ExcludableCheckboxGroup { .. } => {
                let mut included = Vec::new();
                let mut excluded = Vec::new();
                for item in items() {
                    if let Some(v) = item.strip_prefix('-') {
                        excluded.push(v.to_string());
                    } else {
                        included.push(item.trim_start_matches('+').to_string());
                    }
                }
                FilterValue::Excludable { included, excluded }
            }
        }
    }
}

/// User-chosen values keyed by filter key. Missing keys mean "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterValues(BTreeMap<String, FilterValue>);

impl FilterValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: FilterValue) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: FilterValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SORT: &[FilterOption] = &[opt("Newest", "new"), opt("Popular", "popular")];
    const GENRES: &[FilterOption] = &[opt("Action", "action"), opt("Drama", "drama")];

    fn sample() -> FilterSet {
        FilterSet(vec![
            FilterDef {
                key: "sort",
                label: "Sort",
                kind: FilterKind::Picker {
                    options: SORT,
                    default: "popular",
                },
            },
            FilterDef {
                key: "genres",
                label: "Genres",
                kind: FilterKind::CheckboxGroup {
                    options: GENRES,
                    default: &[],
                },
            },
            FilterDef {
                key: "tags",
                label: "Tags",
                kind: FilterKind::ExcludableCheckboxGroup { options: GENRES },
            },
        ])
    }

    #[test]
    fn unset_values_fall_back_to_defaults() {
        let set = sample();
        let values = FilterValues::new();
        assert_eq!(set.picker(&values, "sort"), "popular");
        assert!(set.checkboxes(&values, "genres").is_empty());
        assert_eq!(set.excludable(&values, "tags"), (vec![], vec![]));
        assert_eq!(set.picker(&values, "nope"), "");
    }

    #[test]
    fn chosen_values_override_defaults() {
        let set = sample();
        let values = FilterValues::new()
            .with("sort", FilterValue::Text("new".into()))
            .with("genres", FilterValue::List(vec!["drama".into()]));
        assert_eq!(set.picker(&values, "sort"), "new");
        assert_eq!(set.checkboxes(&values, "genres"), vec!["drama"]);
    }

    #[test]
    fn all_default_detects_any_change() {
        let set = sample();
        assert!(set.all_default(&FilterValues::new()));
        assert!(set.all_default(
            &FilterValues::new().with("sort", FilterValue::Text("popular".into()))
        ));
        assert!(!set.all_default(
            &FilterValues::new().with("sort", FilterValue::Text("new".into()))
        ));
        assert!(!set.all_default(&FilterValues::new().with(
            "tags",
            FilterValue::Excludable {
                included: vec![],
                excluded: vec!["drama".into()],
            }
        )));
    }

    #[test]
    fn parse_for_excludable_splits_signs() {
        let set = sample();
        let kind = &set.0[2].kind;
        assert_eq!(
            FilterValue::parse_for(kind, "+1, -2,3"),
            FilterValue::Excludable {
                included: vec!["1".into(), "3".into()],
                excluded: vec!["2".into()],
            }
        );
    }

    #[test]
    fn parse_for_checkbox_and_picker() {
        let set = sample();
        let genres = &set.0[1].kind;
        assert_eq!(
            FilterValue::parse_for(genres, "action,,drama"),
            FilterValue::List(vec!["action".into(), "drama".into()])
        );
        let sort = &set.0[0].kind;
        assert_eq!(
            FilterValue::parse_for(sort, " new "),
            FilterValue::Text("new".into())
        );
    }

    #[test]
    fn filter_set_serializes_for_host_ui() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(sample())?;
        assert_eq!(json[0]["key"], "sort");
        assert_eq!(json[0]["type"], "picker");
        assert_eq!(json[0]["default"], "popular");
        assert_eq!(json[1]["options"][1]["label"], "Drama");
        assert_eq!(json[2]["type"], "excludableCheckboxGroup");
        Ok(())
    }
}
