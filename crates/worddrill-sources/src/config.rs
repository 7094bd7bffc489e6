//! Dataset configuration and source factory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use worddrill_core::model::DatasetKind;
use worddrill_core::traits::DatasetSource;

use crate::file::FileSource;
use crate::http::{HttpSource, DEFAULT_TIMEOUT_SECS};

/// Spreadsheet holding the published vocabulary sheets.
pub const SHEET_ID: &str = "1j1YiF4Vj33guXhIJm1DkJDUJQX_HNKPDUSmNrpooADw";
pub const NOUNS_GID: &str = "0";
pub const VERBS_GID: &str = "1459632609";

/// CSV export URL for one tab of the published spreadsheet.
pub fn sheet_export_url(gid: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{SHEET_ID}/export?format=csv&gid={gid}")
}

/// Where one named dataset comes from. `path` wins over `url` when both are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub kind: DatasetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl DatasetConfig {
    pub fn http(kind: DatasetKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: Some(url.into()),
            path: None,
        }
    }

    pub fn file(kind: DatasetKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            url: None,
            path: Some(path.into()),
        }
    }
}

/// Top-level worddrill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorddrillConfig {
    /// Dataset configurations keyed by name.
    #[serde(default = "default_datasets")]
    pub datasets: BTreeMap<String, DatasetConfig>,
    /// HTTP timeout for sheet downloads.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Fixed seed for item selection; random when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_datasets() -> BTreeMap<String, DatasetConfig> {
    let mut datasets = BTreeMap::new();
    datasets.insert(
        "nouns".to_string(),
        DatasetConfig::http(DatasetKind::Nouns, sheet_export_url(NOUNS_GID)),
    );
    datasets.insert(
        "verbs".to_string(),
        DatasetConfig::http(DatasetKind::Verbs, sheet_export_url(VERBS_GID)),
    );
    datasets
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for WorddrillConfig {
    fn default() -> Self {
        Self {
            datasets: default_datasets(),
            timeout_secs: default_timeout(),
            seed: None,
        }
    }
}

impl WorddrillConfig {
    /// Look up a dataset by name.
    pub fn dataset(&self, name: &str) -> Result<&DatasetConfig> {
        self.datasets.get(name).with_context(|| {
            let known: Vec<&str> = self.datasets.keys().map(String::as_str).collect();
            format!("unknown dataset '{name}' (configured: {})", known.join(", "))
        })
    }

    /// Pick a dataset of `kind`: the one named after the kind if present,
    /// otherwise the first configured one of that kind.
    pub fn dataset_for(&self, kind: DatasetKind) -> Option<(&str, &DatasetConfig)> {
        let by_name = kind.to_string();
        if let Some((name, config)) = self
            .datasets
            .get_key_value(&by_name)
            .filter(|(_, c)| c.kind == kind)
        {
            return Some((name.as_str(), config));
        }
        self.datasets
            .iter()
            .find(|(_, c)| c.kind == kind)
            .map(|(name, c)| (name.as_str(), c))
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_dataset_config(config: &DatasetConfig) -> DatasetConfig {
    DatasetConfig {
        kind: config.kind,
        url: config.url.as_deref().map(resolve_env_vars),
        path: config
            .path
            .as_ref()
            .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy()))),
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `worddrill.toml` in the current directory
/// 2. `~/.config/worddrill/config.toml`
///
/// Environment variable overrides: `WORDDRILL_NOUNS_URL`, `WORDDRILL_VERBS_URL`.
pub fn load_config() -> Result<WorddrillConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<WorddrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("worddrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<WorddrillConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => WorddrillConfig::default(),
    };

    apply_env_overrides(&mut config);

    config.datasets = config
        .datasets
        .iter()
        .map(|(k, v)| (k.clone(), resolve_dataset_config(v)))
        .collect();

    Ok(config)
}

fn apply_env_overrides(config: &mut WorddrillConfig) {
    for (var, name, kind) in [
        ("WORDDRILL_NOUNS_URL", "nouns", DatasetKind::Nouns),
        ("WORDDRILL_VERBS_URL", "verbs", DatasetKind::Verbs),
    ] {
        if let Ok(url) = std::env::var(var) {
            let entry = config
                .datasets
                .entry(name.to_string())
                .or_insert_with(|| DatasetConfig::http(kind, String::new()));
            entry.url = Some(url);
            entry.path = None;
        }
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("worddrill"))
}

/// Create a source for one dataset.
pub fn create_source(
    name: &str,
    config: &DatasetConfig,
    timeout_secs: u64,
) -> Result<Box<dyn DatasetSource>> {
    if let Some(path) = &config.path {
        return Ok(Box::new(FileSource::new(path)));
    }
    match config.url.as_deref() {
        Some(url) if !url.is_empty() => {
            let source = HttpSource::new(url, timeout_secs)
                .with_context(|| format!("failed to set up source for dataset '{name}'"))?;
            Ok(Box::new(source))
        }
        _ => anyhow::bail!("dataset '{name}' has neither a url nor a path"),
    }
}

/// Starter config file contents.
pub fn starter_config() -> Result<String> {
    toml::to_string_pretty(&WorddrillConfig::default()).context("failed to render config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_WORDDRILL_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_WORDDRILL_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_WORDDRILL_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no refs ${unterminated"), "no refs ${unterminated");
        std::env::remove_var("_WORDDRILL_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = WorddrillConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.datasets.len(), 2);

        let nouns = config.dataset("nouns").unwrap();
        assert_eq!(nouns.kind, DatasetKind::Nouns);
        assert!(nouns.url.as_deref().unwrap().ends_with("gid=0"));

        let verbs = config.dataset("verbs").unwrap();
        assert!(verbs.url.as_deref().unwrap().ends_with("gid=1459632609"));
    }

    #[test]
    fn parse_dataset_config() {
        let toml_str = r#"
timeout_secs = 5
seed = 42

[datasets.nouns]
kind = "nouns"
url = "https://example.com/nouns.csv"

[datasets.persons]
kind = "verb-persons"
path = "./persons.csv"
"#;
        let config: WorddrillConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.datasets.len(), 2);

        let (name, persons) = config.dataset_for(DatasetKind::VerbPersons).unwrap();
        assert_eq!(name, "persons");
        assert_eq!(persons.path.as_deref(), Some(Path::new("./persons.csv")));
        assert!(config.dataset_for(DatasetKind::Verbs).is_none());
    }

    #[test]
    fn dataset_for_prefers_kind_name() {
        let mut config = WorddrillConfig::default();
        config.datasets.insert(
            "a-nouns".into(),
            DatasetConfig::file(DatasetKind::Nouns, "a.csv"),
        );
        let (name, _) = config.dataset_for(DatasetKind::Nouns).unwrap();
        assert_eq!(name, "nouns");
    }

    #[test]
    fn unknown_dataset_lists_known_names() {
        let config = WorddrillConfig::default();
        let err = config.dataset("adjectives").unwrap_err().to_string();
        assert!(err.contains("adjectives"));
        assert!(err.contains("nouns, verbs"));
    }

    #[test]
    fn load_from_explicit_path_resolves_vars() {
        std::env::set_var("_WORDDRILL_DATA_DIR", "/srv/data");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worddrill.toml");
        std::fs::write(
            &path,
            "[datasets.nouns]\nkind = \"nouns\"\npath = \"${_WORDDRILL_DATA_DIR}/nouns.csv\"\n",
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        let nouns = config.dataset("nouns").unwrap();
        assert_eq!(nouns.path.as_deref(), Some(Path::new("/srv/data/nouns.csv")));
        std::env::remove_var("_WORDDRILL_DATA_DIR");
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn create_source_prefers_path() {
        let config = DatasetConfig {
            kind: DatasetKind::Nouns,
            url: Some("https://example.com/nouns.csv".into()),
            path: Some(PathBuf::from("local.csv")),
        };
        let source = create_source("nouns", &config, 5).unwrap();
        assert_eq!(source.name(), "local.csv");
    }

    #[test]
    fn create_source_without_location_fails() {
        let config = DatasetConfig {
            kind: DatasetKind::Nouns,
            url: None,
            path: None,
        };
        assert!(create_source("nouns", &config, 5).is_err());
    }

    #[test]
    fn starter_config_parses_back() {
        let rendered = starter_config().unwrap();
        let config: WorddrillConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(config.datasets, WorddrillConfig::default().datasets);
    }
}
