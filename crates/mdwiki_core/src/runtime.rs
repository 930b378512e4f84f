use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::config::{DEFAULT_CONFIG_FILENAME, MdwikiConfig, load_config};
use crate::filesystem::display_path;

pub const USAGE: &str = "usage: mdwiki <repo-dir> <wiki-dir>";
pub const CONFIG_ENV_VAR: &str = "MDWIKI_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Flag,
    Env,
    RepoDir,
    Default,
}

impl ValueSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Env => "env",
            Self::RepoDir => "repo-dir",
            Self::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RuntimeOverrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Everything one conversion run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub sidebar_file_name: String,
    pub pinned_pages: Vec<String>,
    pub config_path: Option<PathBuf>,
    pub config_source: ValueSource,
}

impl ConvertConfig {
    /// Plain settings with no config file, mostly for library callers and tests.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        let defaults = MdwikiConfig::default();
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            sidebar_file_name: defaults.sidebar_file_name().to_string(),
            pinned_pages: defaults.pinned_pages(),
            config_path: None,
            config_source: ValueSource::Default,
        }
    }

    pub fn diagnostics(&self) -> String {
        format!(
            "input_dir={}\noutput_dir={}\nconfig_path={} ({})\nsidebar_file_name={}\npinned_pages={}",
            display_path(&self.input_dir),
            display_path(&self.output_dir),
            self.config_path
                .as_deref()
                .map(display_path)
                .unwrap_or_else(|| "<none>".to_string()),
            self.config_source.as_str(),
            self.sidebar_file_name,
            if self.pinned_pages.is_empty() {
                "<none>".to_string()
            } else {
                self.pinned_pages.join(", ")
            }
        )
    }
}

pub fn resolve_runtime(overrides: &RuntimeOverrides) -> Result<ConvertConfig> {
    resolve_runtime_with_lookup(overrides, |key| env::var(key).ok())
}

fn resolve_runtime_with_lookup<F>(overrides: &RuntimeOverrides, lookup_env: F) -> Result<ConvertConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let input_dir = require_directory("repo-dir", overrides.input_dir.as_deref())?;
    let output_dir = require_directory("wiki-dir", overrides.output_dir.as_deref())?;

    let (config_path, config_source) = if let Some(path) = overrides.config.as_deref() {
        (Some(require_config_file(path)?), ValueSource::Flag)
    } else if let Some(value) = lookup_env(CONFIG_ENV_VAR).filter(|value| !value.trim().is_empty()) {
        (
            Some(require_config_file(Path::new(value.trim()))?),
            ValueSource::Env,
        )
    } else {
        let candidate = input_dir.join(DEFAULT_CONFIG_FILENAME);
        if candidate.is_file() {
            (Some(candidate), ValueSource::RepoDir)
        } else {
            (None, ValueSource::Default)
        }
    };

    let config = match config_path.as_deref() {
        Some(path) => load_config(path)?,
        None => MdwikiConfig::default(),
    };

    Ok(ConvertConfig {
        sidebar_file_name: config.sidebar_file_name().to_string(),
        pinned_pages: config.pinned_pages(),
        input_dir,
        output_dir,
        config_path,
        config_source,
    })
}

fn require_directory(label: &str, path: Option<&Path>) -> Result<PathBuf> {
    let Some(path) = path.filter(|path| !path.as_os_str().is_empty()) else {
        bail!("{USAGE}\n{label} was not provided");
    };
    // Symlinks are not followed: a linked directory is rejected like a file.
    let Ok(metadata) = fs::symlink_metadata(path) else {
        bail!("{USAGE}\n{label} does not exist: {}", display_path(path));
    };
    if !metadata.is_dir() {
        bail!("{USAGE}\n{label} is not a directory: {}", display_path(path));
    }
    Ok(path.to_path_buf())
}

fn require_config_file(path: &Path) -> Result<PathBuf> {
    if !path.is_file() {
        bail!("config file not found: {}", display_path(path));
    }
    Ok(path.to_path_buf())
}
