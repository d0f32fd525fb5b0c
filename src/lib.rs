//! Text annotator — enriches chat messages with language detection,
//! translation and summarization from a pluggable capability provider.

pub mod command;
pub mod config;
pub mod language;
pub mod pipeline;
pub mod provider;
pub mod render;
pub mod session;
pub mod store;
