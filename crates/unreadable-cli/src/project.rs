//! Project root plus the settings that locate everything under it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use unreadable_core::settings::{self, Settings, SettingsError};
use unreadable_core::{Converter, ConvertOptions, Resources, TableError};

/// Settings file picked up from the root when `--settings` is not given.
pub const SETTINGS_FILE: &str = "langtool.toml";

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: SettingsError,
    },
}

#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub settings: Settings,
}

impl Project {
    /// Read `settings_file`, or `<root>/langtool.toml` when present, or the
    /// embedded defaults.
    pub fn load(root: &Path, settings_file: Option<&Path>) -> Result<Self, ProjectError> {
        let local = root.join(SETTINGS_FILE);
        let path = match settings_file {
            Some(path) => Some(path.to_path_buf()),
            None if local.is_file() => Some(local),
            None => None,
        };

        let settings = match path {
            Some(path) => {
                debug!(settings = %path.display(), "loading settings");
                let text = fs::read_to_string(&path).map_err(|source| ProjectError::Read {
                    path: path.clone(),
                    source,
                })?;
                settings::parse_settings_toml(&text)
                    .map_err(|source| ProjectError::Settings { path, source })?
            }
            None => settings::parse_settings_toml(settings::default_toml()).map_err(|source| {
                ProjectError::Settings {
                    path: PathBuf::from("<default settings>"),
                    source,
                }
            })?,
        };

        Ok(Self {
            root: root.to_path_buf(),
            settings,
        })
    }

    pub fn resources(&self) -> Result<Resources, TableError> {
        Resources::load(&self.settings.resource_paths(&self.root))
    }

    pub fn converter(&self) -> Result<Converter, TableError> {
        Converter::new(self.resources()?, self.settings.segmentation.hmm)
    }

    /// Default options with the configured Man'yōgana seed.
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            seed: self.settings.manyogana.seed,
            ..ConvertOptions::default()
        }
    }

    pub fn source_map_path(&self, name: &str) -> PathBuf {
        self.settings.source_dir(&self.root).join(format!("{name}.json"))
    }

    pub fn output_path(&self, output_name: &str) -> PathBuf {
        self.settings
            .output_dir(&self.root)
            .join(format!("{output_name}.json"))
    }

    pub fn fixed_path(&self, output_name: &str) -> PathBuf {
        self.root
            .join(&self.settings.paths.fixed_dir)
            .join(format!("{output_name}.json"))
    }
}
