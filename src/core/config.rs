use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_FRANKFURTER_URL: &str = "https://api.frankfurter.dev";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
        }
    }
}

/// Origins allowed to call the API from a browser. Credentials are allowed
/// for these origins.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        CorsConfig {
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "https://softuni-react-exam-2025-test.vercel.app".to_string(),
            ],
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FrankfurterProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProvidersConfig {
    pub frankfurter: Option<FrankfurterProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            frankfurter: Some(FrankfurterProviderConfig {
                base_url: DEFAULT_FRANKFURTER_URL.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file has been set up.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxproxy", "fxproxy")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Writes the built-in defaults to `path`, creating parent directories.
    /// An existing file is never overwritten.
    pub fn write_default<P: AsRef<std::path::Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if path.exists() {
            anyhow::bail!("Configuration file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let contents = serde_yaml::to_string(&Self::default())
            .context("Failed to serialize default config")?;
        fs::write(path, format!("---\n{contents}"))
            .with_context(|| format!("Failed to write config file to {}", path.display()))?;
        Ok(())
    }

    pub fn frankfurter_base_url(&self) -> &str {
        self.providers
            .frankfurter
            .as_ref()
            .map_or(DEFAULT_FRANKFURTER_URL, |p| &p.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
server:
  listen_addr: "0.0.0.0:9000"
cors:
  allowed_origins:
    - "https://example.com"
providers:
  frankfurter:
    base_url: "http://example.com/frankfurter"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.server.listen_addr, "0.0.0.0:9000");
        assert_eq!(config.cors.allowed_origins, vec!["https://example.com"]);
        assert_eq!(
            config.frankfurter_base_url(),
            "http://example.com/frankfurter"
        );
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(config.cors.allowed_origins.len(), 2);
        assert!(
            config
                .cors
                .allowed_origins
                .contains(&"http://localhost:5173".to_string())
        );
        assert_eq!(config.frankfurter_base_url(), DEFAULT_FRANKFURTER_URL);
    }

    #[test]
    fn test_empty_providers_fall_back_to_default_url() {
        let yaml_str = r#"
providers:
  frankfurter: ~
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert!(config.providers.frankfurter.is_none());
        assert_eq!(config.frankfurter_base_url(), DEFAULT_FRANKFURTER_URL);
    }

    #[test]
    fn test_write_default_round_trips_and_refuses_overwrite() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.yaml");

        AppConfig::write_default(&path).expect("Failed to write default config");
        let loaded = AppConfig::load_from_path(&path).expect("Failed to load written config");
        assert_eq!(loaded, AppConfig::default());

        let err = AppConfig::write_default(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = AppConfig::load_from_path("/nonexistent/fxproxy/config.yaml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
