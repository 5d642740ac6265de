use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Root application configuration, loaded from `~/.config/paperlink/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub disambiguation: DisambiguationConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Fixed output width. When unset the terminal width is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
    pub styled: bool,
    /// Replaces the built-in link priority table when non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priority: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisambiguationConfig {
    pub scheme: String,
    /// Candidates must have strictly more papers than this to be considered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_papers: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: None,
            styled: true,
            priority: Vec::new(),
        }
    }
}

impl Default for DisambiguationConfig {
    fn default() -> Self {
        Self {
            scheme: "semantic_scholar".to_string(),
            minimum_papers: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl AppConfig {
    /// Standard config file path: `~/.config/paperlink/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("PAPERLINK_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("paperlink")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values no component can work with.
    pub fn validate(&self) -> Result<()> {
        if self.disambiguation.scheme.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "disambiguation.scheme must not be empty".to_string(),
            ));
        }
        if self.display.width == Some(0) {
            return Err(CoreError::ConfigError("display.width must be positive".to_string()));
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.disambiguation.scheme, "semantic_scholar");
        assert!(cfg.disambiguation.minimum_papers.is_none());
        assert!(cfg.display.styled);
        assert!(cfg.display.priority.is_empty());
        assert_eq!(cfg.log.filter, "info");
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = AppConfig::default();
        cfg.display.width = Some(100);
        cfg.disambiguation.minimum_papers = Some(2);
        cfg.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.display.width, Some(100));
        assert_eq!(loaded.disambiguation.minimum_papers, Some(2));
        assert_eq!(loaded.disambiguation.scheme, cfg.disambiguation.scheme);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[disambiguation]\nscheme = \"openreview\"\n").unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.disambiguation.scheme, "openreview");
        assert_eq!(loaded.log.filter, "info");
        assert!(loaded.display.styled);
    }

    #[test]
    fn test_empty_scheme_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[disambiguation]\nscheme = \"\"\n").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, CoreError::ConfigError(ref m) if m.contains("scheme")));
    }

    #[test]
    fn test_zero_width_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.display.width = Some(0);
        assert!(matches!(cfg.validate(), Err(CoreError::ConfigError(_))));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let cfg = AppConfig::load_from(Path::new("/tmp/nonexistent_paperlink_config.toml")).unwrap();
        assert_eq!(cfg.disambiguation.scheme, "semantic_scholar");
    }
}
