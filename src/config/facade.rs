//! Config facade: load from the default location or an explicit file, and save.

use super::merge::merge_policy;
use super::sources::global_file;
use super::ShellConfig;
use crate::error::ShellError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads and persists [`ShellConfig`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global config file (if any) over defaults.
    pub fn load() -> Result<ShellConfig, ShellError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        Self::finish(builder)
    }

    /// Load configuration from an explicit file. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<ShellConfig, ShellError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_file(builder, path, true)?;
        Self::finish(builder)
    }

    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Write configuration as TOML, creating parent directories.
    pub fn save(config: &ShellConfig, path: &Path) -> Result<(), ShellError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ShellError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }
        let content = toml::to_string_pretty(config)
            .map_err(|e| ShellError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            ShellError::Config(format!("Failed to write {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<ShellConfig, ShellError> {
        let mut config: ShellConfig = builder.build()?.try_deserialize()?;
        config.normalize();
        Ok(config)
    }
}
