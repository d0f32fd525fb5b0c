//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across tasks.
//! Every section is `#[serde(default)]`, so a hand-written `settings.toml`
//! only needs the keys it wants to change.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::language::SUPPORTED_TARGETS;

// ---------------------------------------------------------------------------
// ProviderKind
// ---------------------------------------------------------------------------

/// Selects which capability provider backs the annotation pipeline.
///
/// | Variant  | Detect            | Translate | Summarize |
/// |----------|-------------------|-----------|-----------|
/// | Http     | remote model      | yes       | yes       |
/// | Local    | in-process        | no        | no        |
/// | Disabled | always `Unknown`  | no        | no        |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Any OpenAI-compatible chat-completions endpoint (Ollama, OpenAI, Groq …).
    Http,
    /// Offline statistical language detection only.
    Local,
    /// No provider: every operation degrades to its failure marker.
    Disabled,
}

impl Default for ProviderKind {
    fn default() -> Self {
        Self::Http
    }
}

// ---------------------------------------------------------------------------
// ProviderConfig
// ---------------------------------------------------------------------------

/// Settings for the capability provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Which backend to use.
    pub kind: ProviderKind,
    /// Base URL of the API endpoint.
    ///
    /// - Ollama default: `http://localhost:11434`
    /// - OpenAI: `https://api.openai.com`
    pub base_url: String,
    /// API key — `None` for local endpoints that need no authentication.
    pub api_key: Option<String>,
    /// Model identifier sent to the API (e.g. `"qwen2.5:3b"`, `"gpt-4o-mini"`).
    pub model: String,
    /// Sampling temperature (0.0 – 1.0).
    pub temperature: f32,
    /// Maximum seconds to wait for a single provider response.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            base_url: "http://localhost:11434".into(),
            api_key: None,
            model: "qwen2.5:3b".into(),
            temperature: 0.2,
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineConfig
// ---------------------------------------------------------------------------

/// Wildcard for [`PipelineConfig::summarizable_language`].
pub const ANY_LANGUAGE: &str = "*";

/// Rules the annotation pipeline applies before calling the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// A record is summarizable only when its text is strictly longer than
    /// this many characters.
    pub summary_threshold: usize,
    /// Language a record must be detected as before it can be summarized.
    /// [`ANY_LANGUAGE`] (`"*"`) accepts any resolved language, including
    /// `Unknown`.
    pub summarizable_language: String,
    /// ISO-639-1 codes accepted as translation targets.
    pub supported_targets: Vec<String>,
    /// Target used when a translate command names none.
    pub default_target: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            summary_threshold: 150,
            summarizable_language: "en".into(),
            supported_targets: SUPPORTED_TARGETS.iter().map(|c| c.to_string()).collect(),
            default_target: "en".into(),
        }
    }
}

impl PipelineConfig {
    /// Returns `true` when a record detected as `code` (`None` for `Unknown`)
    /// passes the summarizable-language rule.
    pub fn summarizes_language(&self, code: Option<&str>) -> bool {
        if self.summarizable_language == ANY_LANGUAGE {
            return true;
        }
        code.is_some_and(|c| c.eq_ignore_ascii_case(&self.summarizable_language))
    }

    /// Returns `true` when `code` is one of the configured translation targets.
    pub fn supports_target(&self, code: &str) -> bool {
        self.supported_targets
            .iter()
            .any(|t| t.eq_ignore_ascii_case(code))
    }
}

// ---------------------------------------------------------------------------
// LoggingConfig
// ---------------------------------------------------------------------------

/// Logging settings; `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `env_logger` filter directive (e.g. `"info"`, `"text_annotator=debug"`).
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use text_annotator::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Capability provider settings.
    pub provider: ProviderConfig,
    /// Annotation pipeline rules.
    pub pipeline: PipelineConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating the config directory as needed.
    pub fn save(&self) -> Result<()> {
        self.save_in(&AppPaths::new())
    }

    /// Save to `paths.settings_file`, creating `paths.config_dir` first.
    pub fn save_in(&self, paths: &AppPaths) -> Result<()> {
        paths.ensure_config_dir()?;
        self.save_to(&paths.settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.provider.kind, loaded.provider.kind);
        assert_eq!(original.provider.base_url, loaded.provider.base_url);
        assert_eq!(original.provider.api_key, loaded.provider.api_key);
        assert_eq!(original.provider.model, loaded.provider.model);
        assert_eq!(original.provider.timeout_secs, loaded.provider.timeout_secs);

        assert_eq!(
            original.pipeline.summary_threshold,
            loaded.pipeline.summary_threshold
        );
        assert_eq!(
            original.pipeline.summarizable_language,
            loaded.pipeline.summarizable_language
        );
        assert_eq!(
            original.pipeline.supported_targets,
            loaded.pipeline.supported_targets
        );
        assert_eq!(original.logging.filter, loaded.logging.filter);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config.provider.kind, ProviderKind::Http);
        assert_eq!(config.pipeline.summary_threshold, 150);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.provider.base_url, "http://localhost:11434");
        assert!(cfg.provider.api_key.is_none());
        assert_eq!(cfg.pipeline.summary_threshold, 150);
        assert_eq!(cfg.pipeline.summarizable_language, "en");
        assert_eq!(
            cfg.pipeline.supported_targets,
            vec!["en", "pt", "es", "ru", "tr", "fr"]
        );
        assert_eq!(cfg.pipeline.default_target, "en");
        assert_eq!(cfg.logging.filter, "info");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(
            &path,
            "[provider]\nkind = \"Local\"\n\n[pipeline]\nsummary_threshold = 80\n",
        )
        .expect("write");

        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.provider.kind, ProviderKind::Local);
        assert_eq!(cfg.provider.model, "qwen2.5:3b");
        assert_eq!(cfg.pipeline.summary_threshold, 80);
        assert_eq!(cfg.pipeline.summarizable_language, "en");
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.provider.kind = ProviderKind::Disabled;
        cfg.provider.api_key = Some("sk-test".into());
        cfg.pipeline.summarizable_language = ANY_LANGUAGE.into();
        cfg.pipeline.supported_targets = vec!["de".into(), "it".into()];
        cfg.logging.filter = "debug".into();

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.provider.kind, ProviderKind::Disabled);
        assert_eq!(loaded.provider.api_key, Some("sk-test".into()));
        assert_eq!(loaded.pipeline.summarizable_language, "*");
        assert_eq!(loaded.pipeline.supported_targets, vec!["de", "it"]);
        assert_eq!(loaded.logging.filter, "debug");
    }

    #[test]
    fn save_in_creates_config_dir() {
        let dir = tempdir().expect("temp dir");
        let paths = AppPaths::in_dir(dir.path().join("text-annotator"));

        let mut cfg = AppConfig::default();
        cfg.pipeline.default_target = "fr".into();
        cfg.save_in(&paths).expect("save");

        assert!(paths.config_dir.is_dir());
        let loaded = AppConfig::load_from(&paths.settings_file).expect("load");
        assert_eq!(loaded.pipeline.default_target, "fr");
    }

    #[test]
    fn summarizes_configured_language_only() {
        let cfg = PipelineConfig::default();
        assert!(cfg.summarizes_language(Some("en")));
        assert!(cfg.summarizes_language(Some("EN")));
        assert!(!cfg.summarizes_language(Some("es")));
        assert!(!cfg.summarizes_language(None));
    }

    #[test]
    fn wildcard_summarizes_any_language() {
        let cfg = PipelineConfig {
            summarizable_language: ANY_LANGUAGE.into(),
            ..PipelineConfig::default()
        };
        assert!(cfg.summarizes_language(Some("ru")));
        assert!(cfg.summarizes_language(None));
    }

    #[test]
    fn supports_target_ignores_case() {
        let cfg = PipelineConfig::default();
        assert!(cfg.supports_target("es"));
        assert!(cfg.supports_target("FR"));
        assert!(!cfg.supports_target("xx"));
        assert!(!cfg.supports_target("de"));
    }
}
