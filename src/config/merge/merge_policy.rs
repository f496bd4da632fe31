//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("server", "")?
        .set_default("auth_method", "cyberark")?
        .set_default("output_format", "table")?
        .set_default("history_size", 1000)?
        .set_default("verify_tls", true)?
        .set_default("timeout_secs", 30)
}
