use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracegrid_engine::columns::{ColumnChoice, DurationMode, default_choices};
use tracegrid_engine::{MaskRedactor, PassthroughRedactor, Redactor, Viewer};

use crate::{Error, Result};

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "TRACEGRID_CONFIG";

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. TRACEGRID_CONFIG environment variable (with tilde expansion)
/// 3. Platform config directory (`~/.config/tracegrid/config.toml` on Linux)
/// 4. ~/.tracegrid/config.toml (fallback for systems without one)
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(&path.to_string_lossy()));
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV)
        && !env_path.is_empty()
    {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("tracegrid").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".tracegrid").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no home or config directory found".to_string(),
    ))
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the runs API; related runs are disabled over HTTP when unset
    pub base_url: Option<String>,
    /// Project scope for API paths
    pub project_id: Option<String>,
    /// Environment variable holding the bearer key
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            project_id: None,
            api_key_env: "TRACEGRID_API_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationStyle {
    #[default]
    Compact,
    Full,
}

impl From<DurationStyle> for DurationMode {
    fn from(style: DurationStyle) -> Self {
        match style {
            DurationStyle::Compact => DurationMode::Compact,
            DurationStyle::Full => DurationMode::Full,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// e.g. `fr_FR`; the environment locale when unset
    pub locale: Option<String>,
    /// IANA zone name; the system zone when unset
    pub timezone: Option<String>,
    pub duration: DurationStyle,
    /// Hide text values (status, cost) behind asterisks
    pub mask_text: bool,
}

impl DisplayConfig {
    pub fn viewer(&self) -> Viewer {
        Viewer::with_overrides(self.locale.as_deref(), self.timezone.as_deref())
    }

    pub fn redactor(&self) -> Box<dyn Redactor> {
        if self.mask_text {
            Box::new(MaskRedactor)
        } else {
            Box::new(PassthroughRedactor)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Column names as accepted by `--columns`; the default set when empty
    pub columns: Vec<String>,
    /// Aggregate feedback from related runs
    pub related_runs: bool,
    /// Enrichment kinds appended as extra columns
    pub enrichments: Vec<String>,
}

impl TableConfig {
    /// Parsed column choices, enrichment columns last
    pub fn choices(&self) -> Result<Vec<ColumnChoice>> {
        let mut choices = if self.columns.is_empty() {
            default_choices()
        } else {
            self.columns
                .iter()
                .map(|name| name.parse::<ColumnChoice>())
                .collect::<std::result::Result<Vec<_>, _>>()?
        };

        for kind in &self.enrichments {
            let choice = ColumnChoice::Enrichment(kind.clone());
            if !choices.contains(&choice) {
                choices.push(choice);
            }
        }
        Ok(choices)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub table: TableConfig,
}

impl Config {
    /// Load from the resolved path; a missing file yields defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = resolve_config_path(explicit_path)?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api.api_key_env, "TRACEGRID_API_KEY");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.display.duration, DurationStyle::Compact);
        assert!(!config.table.related_runs);
    }

    #[test]
    fn test_missing_file_yields_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join("absent.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.api.base_url = Some("https://api.example.test".to_string());
        config.display.timezone = Some("Europe/Paris".to_string());
        config.display.duration = DurationStyle::Full;
        config.table.columns = vec!["name".to_string(), "cost".to_string()];
        config.save_to(&config_path)?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_partial_sections_fill_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[display]\nduration = \"full\"\n\n[table]\nenrichments = [\"sentiment\"]\n",
        )?;

        let config = Config::load_from(&config_path)?;
        assert_eq!(config.display.duration, DurationStyle::Full);
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(
            config.table.choices()?.last(),
            Some(&ColumnChoice::Enrichment("sentiment".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_invalid_toml_is_reported() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[display\n")?;

        assert!(matches!(
            Config::load_from(&config_path),
            Err(Error::ConfigParse(_))
        ));
        Ok(())
    }

    #[test]
    fn test_unknown_column_name_is_rejected() {
        let table = TableConfig {
            columns: vec!["name".to_string(), "colour".to_string()],
            ..TableConfig::default()
        };
        assert!(matches!(table.choices(), Err(Error::Table(_))));
    }

    #[test]
    fn test_explicit_path_wins() -> Result<()> {
        let path = resolve_config_path(Some(Path::new("/tmp/custom.toml")))?;
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
        Ok(())
    }
}
