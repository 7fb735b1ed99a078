use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for issuepad
///
/// An explicit value object handed to the pipeline at construction; there is
/// no ambient global settings state.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// GitHub authentication and scoping settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Notes-service connection settings
    #[serde(default)]
    pub notes: NotesConfig,

    /// Digest title and document shape
    #[serde(default)]
    pub digest: DigestConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// GitHub configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GitHubConfig {
    /// Authentication method
    #[serde(default = "default_auth_method")]
    pub auth_method: String, // "auto", "gh_cli", "token"

    /// Organization whose repositories are scanned
    #[serde(default)]
    pub organization: String,

    /// Repositories of interest; everything else in the organization is
    /// ignored. Matched by exact name, case-sensitive.
    #[serde(default)]
    pub projects: Vec<String>,

    /// Label an issue must carry to count toward the digest.
    /// Exact string match, no case normalization.
    #[serde(default = "default_label")]
    pub label: String,
}

/// Notes-service configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NotesConfig {
    /// Base URL of the notes service, e.g. "https://pads.example.org"
    #[serde(default)]
    pub base_url: String,

    /// Name of the environment variable holding the notes-service API token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

/// Digest document configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DigestConfig {
    /// Title prefix for the published document
    #[serde(default = "default_title")]
    pub title: String,

    /// Separator emitted after each repository heading
    #[serde(default = "default_separator")]
    pub section_sep: String,

    /// Separator emitted after each issue line
    #[serde(default = "default_separator")]
    pub item_sep: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String, // "info"

    /// Log format
    #[serde(default = "default_log_format")]
    pub format: String, // "compact"

    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,
}

// Default value functions
fn default_auth_method() -> String {
    "auto".to_string()
}
fn default_true() -> bool {
    true
}
fn default_label() -> String {
    "in progress".to_string()
}
fn default_token_env() -> String {
    "NOTES_API_TOKEN".to_string()
}
fn default_title() -> String {
    "Active Projects".to_string()
}
fn default_separator() -> String {
    "\n".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "compact".to_string()
}

// Default implementations
impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            auth_method: default_auth_method(),
            organization: String::new(),
            projects: Vec::new(),
            label: default_label(),
        }
    }
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token_env: default_token_env(),
        }
    }
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            section_sep: default_separator(),
            item_sep: default_separator(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            color: default_true(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            notes: NotesConfig::default(),
            digest: DigestConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location or create a default config
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::default_config_path()?;

        if config_path.exists() {
            Self::load(&config_path)
        } else {
            // Create default config
            let config = Self::default();

            // Create config directory if it doesn't exist
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
            }

            // Save default config
            config.save(&config_path)?;

            tracing::info!("Created default configuration at: {:?}", config_path);
            Ok(config)
        }
    }

    /// Load configuration from a specific file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    /// Get the default configuration file path (XDG compliant)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = config_dir().context("Failed to get user config directory")?;

        Ok(config_dir.join("issuepad").join("config.yml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // Helper function to create a temporary config directory
    fn setup_test_config_dir() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_dir = temp_dir.path().join("issuepad");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        (temp_dir, config_dir)
    }

    #[test]
    fn test_config_default_values() {
        let config = Config::default();

        assert_eq!(config.github.auth_method, "auto");
        assert!(config.github.organization.is_empty());
        assert!(config.github.projects.is_empty());
        assert_eq!(config.github.label, "in progress");
        assert_eq!(config.notes.token_env, "NOTES_API_TOKEN");
        assert_eq!(config.digest.title, "Active Projects");
        assert_eq!(config.digest.section_sep, "\n");
        assert_eq!(config.digest.item_sep, "\n");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.color);
    }

    #[test]
    fn test_config_load_nonexistent_file() {
        let nonexistent_path = Path::new("/nonexistent/path/config.yml");
        let result = Config::load(nonexistent_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let (_temp_dir, config_dir) = setup_test_config_dir();
        let config_path = config_dir.join("config.yml");

        // Create a config with non-default values
        let mut config = Config::default();
        config.github.organization = "sc3".to_string();
        config.github.projects = vec!["sc3".to_string(), "cookcountyjail".to_string()];
        config.github.label = "blocked".to_string();
        config.digest.section_sep = "\n\n".to_string();
        config.notes.base_url = "https://pads.example.org".to_string();

        // Save the config
        config.save(&config_path).expect("Failed to save config");

        // Load it back
        let loaded_config = Config::load(&config_path).expect("Failed to load config");

        assert_eq!(loaded_config.github.organization, "sc3");
        assert_eq!(
            loaded_config.github.projects,
            vec!["sc3".to_string(), "cookcountyjail".to_string()]
        );
        assert_eq!(loaded_config.github.label, "blocked");
        assert_eq!(loaded_config.digest.section_sep, "\n\n");
        assert_eq!(loaded_config.notes.base_url, "https://pads.example.org");
    }

    #[test]
    fn test_config_default_path_xdg() {
        // This test verifies that the default path respects XDG directories
        let default_path = Config::default_config_path().expect("Failed to get default path");
        assert!(default_path.to_string_lossy().contains("issuepad"));
        assert!(default_path.to_string_lossy().ends_with("config.yml"));
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml_content = r#"
github:
  auth_method: "gh_cli"
  organization: "sc3"
  projects:
    - "sc3"
    - "cookcountyjail"
    - "26thandcalifornia"
  label: "in progress"
notes:
  base_url: "https://pads.example.org"
  token_env: "PAD_TOKEN"
digest:
  title: "Active Projects"
  section_sep: "\n\n"
  item_sep: "\n"
logging:
  level: "debug"
  format: "json"
  color: false
"#;

        let config: Config = serde_yaml::from_str(yaml_content).expect("Failed to parse YAML");

        assert_eq!(config.github.auth_method, "gh_cli");
        assert_eq!(config.github.organization, "sc3");
        assert_eq!(config.github.projects.len(), 3);
        assert_eq!(config.github.label, "in progress");
        assert_eq!(config.notes.base_url, "https://pads.example.org");
        assert_eq!(config.notes.token_env, "PAD_TOKEN");
        assert_eq!(config.digest.section_sep, "\n\n");
        assert_eq!(config.digest.item_sep, "\n");
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.color);
    }

    #[test]
    fn test_yaml_partial_config_uses_defaults() {
        let yaml_content = r#"
github:
  organization: "sc3"
  projects: ["sc3"]
"#;

        let config: Config = serde_yaml::from_str(yaml_content).expect("Failed to parse YAML");

        assert_eq!(config.github.organization, "sc3");
        assert_eq!(config.github.auth_method, "auto");
        assert_eq!(config.github.label, "in progress");
        assert_eq!(config.digest.title, "Active Projects");
        assert_eq!(config.digest.item_sep, "\n");
    }
}
