use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::sidebar::{SIDEBAR_FILE_NAME, default_pinned_pages};

pub const DEFAULT_CONFIG_FILENAME: &str = ".mdwiki.toml";

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct MdwikiConfig {
    #[serde(default)]
    pub sidebar: SidebarSection,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct SidebarSection {
    pub file_name: Option<String>,
    pub pinned: Option<Vec<String>>,
}

impl MdwikiConfig {
    pub fn sidebar_file_name(&self) -> &str {
        self.sidebar
            .file_name
            .as_deref()
            .map(str::trim)
            .unwrap_or(SIDEBAR_FILE_NAME)
    }

    pub fn pinned_pages(&self) -> Vec<String> {
        self.sidebar
            .pinned
            .clone()
            .unwrap_or_else(default_pinned_pages)
    }
}

/// Reads and validates the `[sidebar]` settings of an existing TOML file.
pub fn load_config(config_path: &Path) -> Result<MdwikiConfig> {
    let content = fs::read_to_string(config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;
    let parsed: MdwikiConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", config_path.display()))?;
    validate_config(&parsed)
        .with_context(|| format!("invalid config in {}", config_path.display()))?;
    Ok(parsed)
}

fn validate_config(config: &MdwikiConfig) -> Result<()> {
    if let Some(file_name) = &config.sidebar.file_name {
        let trimmed = file_name.trim();
        if trimmed.is_empty() {
            bail!("sidebar.file_name must not be empty");
        }
        if trimmed.contains(['/', '\\']) || trimmed == "." || trimmed == ".." {
            bail!("sidebar.file_name must be a plain file name, got `{file_name}`");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{MdwikiConfig, load_config};
    use crate::sidebar::SIDEBAR_FILE_NAME;
    use tempfile::tempdir;

    #[test]
    fn default_config_uses_builtin_sidebar_settings() {
        let config = MdwikiConfig::default();
        assert_eq!(config.sidebar_file_name(), SIDEBAR_FILE_NAME);
        assert_eq!(config.pinned_pages(), vec!["Home", "Getting-Started"]);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let temp = tempdir().expect("tempdir");
        let error = load_config(&temp.path().join(".mdwiki.toml")).expect_err("must fail");
        assert!(error.to_string().contains("failed to read"));
    }

    #[test]
    fn empty_config_file_yields_defaults() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join(".mdwiki.toml");
        fs::write(&path, "").expect("write config");
        assert_eq!(load_config(&path).expect("load"), MdwikiConfig::default());
    }

    #[test]
    fn sidebar_section_overrides_defaults() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join(".mdwiki.toml");
        fs::write(
            &path,
            "[sidebar]\nfile_name = \"_Nav.md\"\npinned = [\"Overview\"]\n",
        )
        .expect("write config");

        let config = load_config(&path).expect("load");
        assert_eq!(config.sidebar_file_name(), "_Nav.md");
        assert_eq!(config.pinned_pages(), vec!["Overview"]);
    }

    #[test]
    fn empty_pinned_list_disables_pinning() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join(".mdwiki.toml");
        fs::write(&path, "[sidebar]\npinned = []\n").expect("write config");

        let config = load_config(&path).expect("load");
        assert!(config.pinned_pages().is_empty());
        assert_eq!(config.sidebar_file_name(), SIDEBAR_FILE_NAME);
    }

    #[test]
    fn sidebar_file_name_must_be_plain() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join(".mdwiki.toml");
        fs::write(&path, "[sidebar]\nfile_name = \"../escape.md\"\n").expect("write config");

        let error = load_config(&path).expect_err("must fail");
        assert!(format!("{error:#}").contains("plain file name"));
    }

    #[test]
    fn malformed_toml_is_reported() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join(".mdwiki.toml");
        fs::write(&path, "[sidebar\n").expect("write config");

        let error = load_config(&path).expect_err("must fail");
        assert!(error.to_string().contains("failed to parse"));
    }
}
