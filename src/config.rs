//! CLI settings: optional `mindweave.toml`, then environment overrides

use anyhow::Context;
use mindweave_core::ExportFormat;
use mindweave_core::session::DEFAULT_CHANGE_BUFFER;
use serde::Deserialize;
use std::path::Path;

/// Settings file looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "mindweave.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Format used by `export` when `--format` is omitted.
    pub default_format: ExportFormat,
    /// `tracing` filter directive; `--verbose` takes precedence.
    pub log_filter: Option<String>,
    /// Capacity of the session's change channel.
    pub change_buffer: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_format: ExportFormat::Json,
            log_filter: None,
            change_buffer: DEFAULT_CHANGE_BUFFER,
        }
    }
}

impl Settings {
    /// Load settings from `path` (required to exist) or from `mindweave.toml` if present,
    /// then apply `MINDWEAVE_*` variables from the environment and `.env`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(CONFIG_FILE).exists() => Self::from_file(Path::new(CONFIG_FILE))?,
            None => Settings::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Override fields from environment-style lookups.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(format) = lookup("MINDWEAVE_FORMAT") {
            self.default_format = format.parse()?;
        }
        if let Some(filter) = lookup("MINDWEAVE_LOG") {
            self.log_filter = Some(filter);
        }
        if let Some(buffer) = lookup("MINDWEAVE_CHANGE_BUFFER") {
            self.change_buffer = buffer
                .parse()
                .with_context(|| format!("MINDWEAVE_CHANGE_BUFFER must be a number, got {buffer}"))?;
        }
        Ok(())
    }
}
