//! Project settings loaded from TOML.
//!
//! Defaults are embedded via `include_str!("default_settings.toml")`; a
//! custom file replaces them wholesale and goes through the same validation.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::scheme::SchemeId;
use crate::tables::ResourcePaths;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub paths: PathSettings,
    pub segmentation: SegmentationSettings,
    pub manyogana: ManyoganaSettings,
    pub pack: PackSettings,
    pub fetch: FetchSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathSettings {
    pub data_dir: String,
    pub fixed_dir: String,
    pub source_dir: String,
    pub output_dir: String,
    pub pack_file: String,
    /// Custom romaji TOML; the embedded table is used when unset.
    #[serde(default)]
    pub romaji_table: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentationSettings {
    /// Extra vocabulary in `dict.txt` format.
    #[serde(default)]
    pub user_dict: Option<String>,
    pub hmm: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManyoganaSettings {
    pub seed: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackSettings {
    pub meta: String,
    pub icon: String,
    pub lang_prefix: String,
    /// Output names left out of the archive.
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Release,
    Snapshot,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    pub manifest_url: String,
    pub channel: Channel,
    pub timeout_secs: u64,
}

impl Settings {
    /// Resource locations under `root`.
    pub fn resource_paths(&self, root: &Path) -> ResourcePaths {
        ResourcePaths {
            data_dir: root.join(&self.paths.data_dir),
            fixed_dir: root.join(&self.paths.fixed_dir),
            user_dict: self.segmentation.user_dict.as_ref().map(|p| root.join(p)),
            romaji_table: self.paths.romaji_table.as_ref().map(|p| root.join(p)),
        }
    }

    pub fn source_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.source_dir)
    }

    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.output_dir)
    }

    pub fn pack_file(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.pack_file)
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! invalid {
        ($field:expr, $reason:expr) => {
            return Err(SettingsError::InvalidValue {
                field: $field.to_string(),
                reason: $reason.to_string(),
            })
        };
    }
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.trim().is_empty() {
                invalid!(
                    concat!(stringify!($section), ".", stringify!($field)),
                    "must not be empty"
                );
            }
        };
    }

    check_non_empty!(paths.data_dir);
    check_non_empty!(paths.fixed_dir);
    check_non_empty!(paths.source_dir);
    check_non_empty!(paths.output_dir);
    check_non_empty!(paths.pack_file);
    check_non_empty!(pack.meta);
    check_non_empty!(pack.icon);
    check_non_empty!(fetch.manifest_url);

    if !s.pack.lang_prefix.is_empty() && !s.pack.lang_prefix.ends_with('/') {
        invalid!("pack.lang_prefix", "must end with '/'");
    }
    for name in &s.pack.exclude {
        if name.parse::<SchemeId>().is_err() {
            invalid!("pack.exclude", format!("unknown scheme {name:?}"));
        }
    }
    if !s.fetch.manifest_url.starts_with("https://") && !s.fetch.manifest_url.starts_with("http://")
    {
        invalid!("fetch.manifest_url", "must be an http(s) URL");
    }
    if s.fetch.timeout_secs == 0 {
        invalid!("fetch.timeout_secs", "must be positive");
    }

    Ok(())
}
