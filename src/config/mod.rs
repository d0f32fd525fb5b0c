//! Configuration module for the text annotator.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the capability
//! provider, the annotation pipeline and logging, `AppPaths` for
//! cross-platform directories, and TOML persistence via `AppConfig::load` /
//! `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, ANY_LANGUAGE, LoggingConfig, PipelineConfig, ProviderConfig, ProviderKind,
};
