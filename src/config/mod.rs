//! Configuration management.

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration for rewind.
#[derive(Debug, Clone)]
pub struct RewindConfig {
    /// Path to the capture archive directory.
    pub archive_dir: PathBuf,
    /// Maximum captures fed to the answerer per question.
    pub context_limit: usize,
    /// Answerer backend configuration.
    pub llm: LlmConfig,
}

/// Answerer backend configuration.
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    /// Backend name: "gemini" or "ollama".
    pub provider: AnswerProvider,
    /// Model name.
    pub model: Option<String>,
    /// API key (Gemini only; Ollama is keyless).
    pub api_key: Option<String>,
    /// Base URL for the backend (for self-hosted or proxied endpoints).
    pub base_url: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

/// Available answerer backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerProvider {
    /// Google Gemini.
    #[default]
    Gemini,
    /// Ollama (local).
    Ollama,
}

impl AnswerProvider {
    /// Parses a backend name, defaulting to Gemini.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "ollama" => Self::Ollama,
            _ => Self::Gemini,
        }
    }

    /// Returns the backend name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Ollama => "ollama",
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Archive directory.
    pub archive_dir: Option<String>,
    /// Context limit.
    pub context_limit: Option<usize>,
    /// Answerer configuration.
    pub llm: Option<ConfigFileLlm>,
}

/// Answerer section in the config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLlm {
    /// Backend name.
    pub provider: Option<String>,
    /// Model name.
    pub model: Option<String>,
    /// API key.
    pub api_key: Option<String>,
    /// Base URL.
    pub base_url: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

impl Default for RewindConfig {
    fn default() -> Self {
        Self {
            archive_dir: default_archive_dir(),
            context_limit: crate::services::DEFAULT_CONTEXT_LIMIT,
            llm: LlmConfig::default(),
        }
    }
}

/// The archive directory the capture agent writes to: `~/Rewind`.
fn default_archive_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from("Rewind"),
        |dirs| dirs.home_dir().join("Rewind"),
    )
}

impl RewindConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &std::path::Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: e.to_string(),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/rewind/` on macOS)
    /// 2. XDG config dir (`~/.config/rewind/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs.config_dir().join("rewind").join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return config;
            }
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("rewind")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return config;
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `RewindConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(archive_dir) = file.archive_dir {
            config.archive_dir = PathBuf::from(archive_dir);
        }
        if let Some(context_limit) = file.context_limit {
            config.context_limit = context_limit;
        }
        if let Some(llm) = file.llm {
            if let Some(provider) = llm.provider {
                config.llm.provider = AnswerProvider::parse(&provider);
            }
            config.llm.model = llm.model;
            config.llm.api_key = llm.api_key;
            config.llm.base_url = llm.base_url;
            config.llm.timeout_ms = llm.timeout_ms;
            config.llm.connect_timeout_ms = llm.connect_timeout_ms;
        }

        config
    }

    /// Sets the archive directory.
    #[must_use]
    pub fn with_archive_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.archive_dir = path.into();
        self
    }

    /// Sets the context limit.
    #[must_use]
    pub const fn with_context_limit(mut self, limit: usize) -> Self {
        self.context_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RewindConfig::default();
        assert_eq!(config.context_limit, 5);
        assert_eq!(config.llm.provider, AnswerProvider::Gemini);
        assert!(config.archive_dir.ends_with("Rewind"));
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!(AnswerProvider::parse("gemini"), AnswerProvider::Gemini);
        assert_eq!(AnswerProvider::parse("OLLAMA"), AnswerProvider::Ollama);
        assert_eq!(AnswerProvider::parse("unknown"), AnswerProvider::Gemini);
    }

    #[test]
    fn test_from_config_file() {
        let file: ConfigFile = toml::from_str(
            r#"
            archive_dir = "/data/rewind"
            context_limit = 8

            [llm]
            provider = "ollama"
            model = "llama3.2"
            timeout_ms = 5000
            "#,
        )
        .unwrap();

        let config = RewindConfig::from_config_file(file);
        assert_eq!(config.archive_dir, PathBuf::from("/data/rewind"));
        assert_eq!(config.context_limit, 8);
        assert_eq!(config.llm.provider, AnswerProvider::Ollama);
        assert_eq!(config.llm.model.as_deref(), Some("llama3.2"));
        assert_eq!(config.llm.timeout_ms, Some(5000));
    }

    #[test]
    fn test_empty_config_file_keeps_defaults() {
        let file: ConfigFile = toml::from_str("").unwrap();
        let config = RewindConfig::from_config_file(file);
        assert_eq!(config.context_limit, 5);
        assert_eq!(config.llm.provider, AnswerProvider::Gemini);
    }

    #[test]
    fn test_builders() {
        let config = RewindConfig::new()
            .with_archive_dir("/tmp/captures")
            .with_context_limit(3);
        assert_eq!(config.archive_dir, PathBuf::from("/tmp/captures"));
        assert_eq!(config.context_limit, 3);
    }
}
