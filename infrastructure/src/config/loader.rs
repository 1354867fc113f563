//! Input loading with multi-source merging

use super::file_config::FileConfig;
use super::run_context::RunContext;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Project-level input file, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "approval.toml";

/// Loads action inputs and run context
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load action inputs from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `INPUT_*` environment variables set by the runner
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./approval.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path)?.extract().map_err(Box::new)
    }

    /// Like [`load`](Self::load), with `overrides` merged over every source.
    ///
    /// `overrides` must serialize with the input keys and skip unset values.
    pub fn load_with_overrides<T: Serialize>(
        config_path: Option<&Path>,
        overrides: &T,
    ) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path)?
            .merge(Serialized::defaults(overrides))
            .extract()
            .map_err(Box::new)
    }

    fn figment(config_path: Option<&Path>) -> Result<Figment, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment.merge(Serialized::defaults(raw_env("INPUT_", None))))
    }

    /// Load the run context from `GITHUB_*` variables
    pub fn load_run_context() -> Result<RunContext, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(raw_env("GITHUB_", Some(RunContext::KEYS))))
            .extract()
            .map_err(Box::new)
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }
}

/// Environment variables starting with `prefix`, keyed by the lowercased
/// remainder and kept as text.
///
/// Values are never reinterpreted: `007` stays `007` and `[prod]` stays a
/// string.
fn raw_env(prefix: &str, only: Option<&[&str]>) -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .filter_map(|(key, value)| {
            let name = key.get(..prefix.len())?;
            if !name.eq_ignore_ascii_case(prefix) {
                return None;
            }
            let name = key[prefix.len()..].to_lowercase();
            match only {
                Some(keys) if !keys.contains(&name.as_str()) => None,
                _ if name.is_empty() => None,
                _ => Some((name, value)),
            }
        })
        .collect()
}
